use crate::app::LaunchCandidate;
use crate::doctor::AppProbe;
use crate::output::AppRow;

pub fn format_apps(rows: &[AppRow], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    for row in rows {
        writeln!(w, "{}", row.id)?;
    }
    Ok(())
}

pub fn format_candidates(candidates: &[LaunchCandidate], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    for candidate in candidates {
        writeln!(w, "{}", candidate.command_line())?;
    }
    Ok(())
}

/// Identifiers that can be dispatched on this host.
pub fn format_available(probes: &[AppProbe], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    for probe in probes.iter().filter(|p| p.is_available()) {
        writeln!(w, "{}", probe.id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppId;

    #[test]
    fn test_names_apps() {
        let rows = AppRow::all(AppId::Cursor);
        let mut buf = Vec::new();
        format_apps(&rows, &mut buf).unwrap();
        let output = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), AppId::ALL.len());
        assert_eq!(lines[0], "finder");
    }

    #[test]
    fn test_names_candidates_empty() {
        let mut buf = Vec::new();
        format_candidates(&[], &mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "");
    }

    #[test]
    fn test_names_candidates_one_per_line() {
        let candidates = vec![
            LaunchCandidate::handoff("open", vec!["-a".into(), "Sublime Text".into(), "/p".into()]),
            LaunchCandidate::direct("subl", vec!["/p".into()]),
        ];
        let mut buf = Vec::new();
        format_candidates(&candidates, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "open -a \"Sublime Text\" /p\nsubl /p\n"
        );
    }
}
