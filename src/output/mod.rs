pub mod json;
pub mod names;
pub mod table;

use serde::Serialize;

use crate::app::{AppId, AppKind, LaunchCandidate};
use crate::doctor::AppProbe;
use crate::orchestrator::Dispatched;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Names,
}

/// One line of `openin apps`.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppRow {
    pub id: AppId,
    pub name: String,
    pub kind: AppKind,
    pub last_used: bool,
}

impl AppRow {
    pub fn all(last_used: AppId) -> Vec<AppRow> {
        AppId::ALL
            .into_iter()
            .map(|app| AppRow {
                id: app,
                name: app.display_name().to_string(),
                kind: app.kind(),
                last_used: app == last_used,
            })
            .collect()
    }
}

pub struct Formatter {
    format: OutputFormat,
    no_color: bool,
}

impl Formatter {
    pub fn new(format: OutputFormat, no_color: bool) -> Self {
        Self { format, no_color }
    }

    pub fn format_apps(&self, rows: &[AppRow], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => table::format_apps(rows, w, self.no_color),
            OutputFormat::Json => json::write_pretty(&rows, w),
            OutputFormat::Names => names::format_apps(rows, w),
        }
    }

    pub fn format_candidates(
        &self,
        app: AppId,
        candidates: &[LaunchCandidate],
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                if candidates.is_empty() {
                    let fallback = if app.is_file_manager() {
                        "revealed in the file manager"
                    } else {
                        "opened with the system default handler"
                    };
                    writeln!(w, "No launchers for {}: {}", app, fallback)?;
                    return Ok(());
                }
                table::format_candidates(candidates, w)
            }
            OutputFormat::Json => json::write_pretty(
                &serde_json::json!({ "app": app, "candidates": candidates }),
                w,
            ),
            OutputFormat::Names => names::format_candidates(candidates, w),
        }
    }

    pub fn format_dispatched(
        &self,
        app: AppId,
        dispatched: &Dispatched,
        w: &mut dyn std::io::Write,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json::write_pretty(
                &serde_json::json!({ "app": app, "result": dispatched }),
                w,
            ),
            // Quiet unless asked for JSON, like a shell opener.
            _ => Ok(()),
        }
    }

    pub fn format_last_used(&self, app: AppId, w: &mut dyn std::io::Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                json::write_pretty(&serde_json::json!({ "last_used": app }), w)
            }
            _ => {
                writeln!(w, "{}", app)?;
                Ok(())
            }
        }
    }

    pub fn format_probes(&self, probes: &[AppProbe], w: &mut dyn std::io::Write) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => json::write_pretty(&probes, w),
            OutputFormat::Names => names::format_available(probes, w),
            OutputFormat::Table => table::format_probes(probes, w, self.no_color),
        }
    }
}
