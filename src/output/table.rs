use comfy_table::{Cell, ContentArrangement, Table};
use owo_colors::OwoColorize;

use crate::app::{AppKind, LaunchCandidate};
use crate::doctor::AppProbe;
use crate::output::AppRow;

pub fn format_apps(rows: &[AppRow], w: &mut dyn std::io::Write, no_color: bool) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Name", "Kind", "Last used"]);

    for row in rows {
        let kind_str = row.kind.to_string();
        let kind_display = if no_color {
            kind_str
        } else {
            match row.kind {
                AppKind::FileManager => kind_str.green().to_string(),
                AppKind::Editor => kind_str.blue().to_string(),
                AppKind::Terminal => kind_str.yellow().to_string(),
            }
        };

        table.add_row(vec![
            Cell::new(row.id.slug()),
            Cell::new(&row.name),
            Cell::new(kind_display),
            Cell::new(if row.last_used { "*" } else { "" }),
        ]);
    }

    writeln!(w, "{}", table)?;
    Ok(())
}

pub fn format_candidates(candidates: &[LaunchCandidate], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Command", "Style"]);

    for (i, candidate) in candidates.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i + 1),
            Cell::new(candidate.command_line()),
            Cell::new(candidate.style.to_string()),
        ]);
    }

    writeln!(w, "{}", table)?;
    Ok(())
}

pub fn format_probes(probes: &[AppProbe], w: &mut dyn std::io::Write, no_color: bool) -> anyhow::Result<()> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Status", "Launchers"]);

    for probe in probes {
        let status = if probe.uses_system_handler() {
            "system".to_string()
        } else if probe.is_available() {
            mark("\u{2713}", true, no_color)
        } else {
            mark("\u{2717}", false, no_color)
        };

        let launchers: Vec<String> = probe
            .candidates
            .iter()
            .map(|c| {
                let flag = if c.found { "\u{2713}" } else { "\u{2717}" };
                format!("{} {}", flag, c.command_line)
            })
            .collect();

        table.add_row(vec![
            Cell::new(probe.id.slug()),
            Cell::new(status),
            Cell::new(launchers.join("\n")),
        ]);
    }

    writeln!(w, "{}", table)?;
    Ok(())
}

fn mark(symbol: &str, ok: bool, no_color: bool) -> String {
    match (no_color, ok) {
        (true, _) => symbol.to_string(),
        (false, true) => symbol.green().to_string(),
        (false, false) => symbol.red().to_string(),
    }
}
