use std::path::PathBuf;

use rayon::prelude::*;
use serde::Serialize;

use crate::app::{AppId, LaunchCandidate, LaunchStyle, Target};
use crate::resolver::{resolve_at, Platform};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CandidateProbe {
    pub command_line: String,
    pub style: LaunchStyle,
    pub found: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AppProbe {
    pub id: AppId,
    pub name: String,
    pub candidates: Vec<CandidateProbe>,
}

impl AppProbe {
    /// True when dispatch never touches a candidate (reveal or default handler).
    pub fn uses_system_handler(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn is_available(&self) -> bool {
        self.uses_system_handler() || self.candidates.iter().any(|c| c.found)
    }
}

/// Probe every application in parallel.
pub fn probe_all(platform: Platform) -> Vec<AppProbe> {
    let probe_target = Target::new(".");
    let mut probes: Vec<AppProbe> = AppId::ALL
        .par_iter()
        .map(|app| AppProbe {
            id: *app,
            name: app.display_name().to_string(),
            candidates: resolve_at(*app, &probe_target, platform)
                .iter()
                .map(|c| CandidateProbe {
                    command_line: c.command_line(),
                    style: c.style,
                    found: is_installed(c),
                })
                .collect(),
        })
        .collect();
    probes.sort_by_key(|p| p.id);
    probes
}

fn is_installed(candidate: &LaunchCandidate) -> bool {
    if which::which(&candidate.command).is_err() {
        return false;
    }
    match candidate.style {
        LaunchStyle::Direct => true,
        LaunchStyle::Handoff => handoff_app_exists(candidate),
    }
}

/// `open -a <Name> <path>`: look for the bundle in the usual locations.
fn handoff_app_exists(candidate: &LaunchCandidate) -> bool {
    let Some(name) = candidate.args.get(1) else {
        return true;
    };
    bundle_dirs()
        .iter()
        .any(|dir| dir.join(format!("{}.app", name)).exists())
}

fn bundle_dirs() -> Vec<PathBuf> {
    let mut roots = vec![
        PathBuf::from("/Applications"),
        PathBuf::from("/System/Applications"),
        PathBuf::from("/System/Applications/Utilities"),
    ];
    if let Some(home) = dirs::home_dir() {
        roots.push(home.join("Applications"));
    }
    roots.retain(|d| d.is_dir());
    roots
}
