use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::app::{AppId, LaunchCandidate, Target};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Macos,
    Linux,
    Windows,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::Macos
        } else if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Macos => write!(f, "macos"),
            Platform::Linux => write!(f, "linux"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "macos" | "darwin" => Ok(Platform::Macos),
            "linux" => Ok(Platform::Linux),
            "windows" | "win32" => Ok(Platform::Windows),
            _ => Err(format!(
                "invalid platform '{}': expected macos, linux, or windows",
                s
            )),
        }
    }
}

/// Source of launch candidates for the orchestrator.
pub trait CandidateSource: Send + Sync {
    fn resolve(&self, app: AppId, target: &Target) -> Vec<LaunchCandidate>;
}

/// Built-in per-platform executable names and argument conventions.
#[derive(Debug, Clone, Copy)]
pub struct PlatformResolver {
    platform: Platform,
}

impl PlatformResolver {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }
}

impl Default for PlatformResolver {
    fn default() -> Self {
        Self::new(Platform::current())
    }
}

impl CandidateSource for PlatformResolver {
    fn resolve(&self, app: AppId, target: &Target) -> Vec<LaunchCandidate> {
        resolve_at(app, target, self.platform)
    }
}

/// Candidates for opening a bare path.
pub fn resolve(app: AppId, path: &str, platform: Platform) -> Vec<LaunchCandidate> {
    resolve_at(app, &Target::new(path), platform)
}

/// Candidates for opening a target, most likely first.
///
/// An empty result means no specific launcher is known and the OS default
/// handler should be used.
pub fn resolve_at(app: AppId, target: &Target, platform: Platform) -> Vec<LaunchCandidate> {
    if app.is_file_manager() {
        return Vec::new();
    }

    if app == AppId::Terminal {
        return terminal_candidates(&target.path, platform);
    }

    let shims: Vec<LaunchCandidate> = executables(app, platform)
        .iter()
        .map(|exe| LaunchCandidate::direct(exe, editor_args(app, target)))
        .collect();

    if platform != Platform::Macos {
        return shims;
    }

    let Some(bundle) = macos_bundle_name(app) else {
        return shims;
    };
    let open_a = LaunchCandidate::handoff(
        "open",
        vec!["-a".to_string(), bundle.to_string(), target.path.clone()],
    );

    // `open -a` cannot jump to a line, so the shim goes first when one is requested.
    if target.position.is_some() {
        shims.into_iter().chain(std::iter::once(open_a)).collect()
    } else {
        std::iter::once(open_a).chain(shims).collect()
    }
}

/// Executable names to try, in order.
fn executables(app: AppId, platform: Platform) -> &'static [&'static str] {
    match (app, platform) {
        (AppId::Finder, _) | (AppId::Terminal, _) => &[],

        (AppId::Vscode, Platform::Windows) => &["code.cmd", "code"],
        (AppId::Vscode, Platform::Linux) => &["code", "code-oss"],
        (AppId::Vscode, Platform::Macos) => &["code"],

        (AppId::Cursor, Platform::Windows) => &["cursor.cmd", "cursor"],
        (AppId::Cursor, _) => &["cursor"],

        (AppId::Zed, Platform::Linux) => &["zed", "zeditor", "zedit"],
        (AppId::Zed, _) => &["zed"],

        (AppId::Sublime, Platform::Windows) => &["subl.exe", "subl"],
        (AppId::Sublime, Platform::Linux) => &["subl", "sublime_text"],
        (AppId::Sublime, Platform::Macos) => &["subl"],

        (AppId::Xcode, Platform::Macos) => &["xed"],
        (AppId::Xcode, _) => &[],

        (AppId::Intellij, Platform::Windows) => &["idea64.exe", "idea"],
        (AppId::Intellij, Platform::Linux) => &[
            "idea",
            "intellij-idea-ultimate",
            "intellij-idea-community",
        ],
        (AppId::Intellij, Platform::Macos) => &["idea"],

        (AppId::Webstorm, Platform::Windows) => &["webstorm64.exe", "webstorm"],
        (AppId::Webstorm, _) => &["webstorm"],
    }
}

fn macos_bundle_name(app: AppId) -> Option<&'static str> {
    match app {
        AppId::Finder => None,
        AppId::Vscode => Some("Visual Studio Code"),
        AppId::Cursor => Some("Cursor"),
        AppId::Zed => Some("Zed"),
        AppId::Sublime => Some("Sublime Text"),
        AppId::Xcode => Some("Xcode"),
        AppId::Intellij => Some("IntelliJ IDEA"),
        AppId::Webstorm => Some("WebStorm"),
        AppId::Terminal => Some("Terminal"),
    }
}

/// Arguments for an editor's command-line shim, including goto syntax.
fn editor_args(app: AppId, target: &Target) -> Vec<String> {
    let Some(position) = target.position else {
        return vec![target.path.clone()];
    };

    match app {
        AppId::Vscode | AppId::Cursor => vec!["--goto".to_string(), target.goto_spec()],
        AppId::Zed | AppId::Sublime => vec![target.goto_spec()],
        AppId::Intellij | AppId::Webstorm => {
            let mut args = vec!["--line".to_string(), position.line.to_string()];
            if let Some(column) = position.column {
                args.push("--column".to_string());
                args.push(column.to_string());
            }
            args.push(target.path.clone());
            args
        }
        AppId::Xcode => vec![
            "--line".to_string(),
            position.line.to_string(),
            target.path.clone(),
        ],
        AppId::Finder | AppId::Terminal => vec![target.path.clone()],
    }
}

fn terminal_candidates(dir: &str, platform: Platform) -> Vec<LaunchCandidate> {
    match platform {
        Platform::Macos => vec![LaunchCandidate::handoff(
            "open",
            vec!["-a".to_string(), "Terminal".to_string(), dir.to_string()],
        )],
        // `wt` splits its own command line on `;`. Nothing goes through cmd.
        Platform::Windows => vec![LaunchCandidate::direct(
            "wt",
            vec!["-d".to_string(), dir.replace(';', "\\;")],
        )],
        Platform::Linux => {
            let attempts: [(&str, &[&str]); 6] = [
                ("x-terminal-emulator", &["--working-directory"]),
                ("gnome-terminal", &["--working-directory"]),
                ("konsole", &["--workdir"]),
                ("xfce4-terminal", &["--working-directory"]),
                ("kitty", &["--directory"]),
                ("alacritty", &["--working-directory"]),
            ];
            attempts
                .iter()
                .map(|(bin, flags)| {
                    let mut args: Vec<String> = flags.iter().map(|f| f.to_string()).collect();
                    args.push(dir.to_string());
                    LaunchCandidate::direct(bin, args)
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{LaunchStyle, Position};

    fn commands(candidates: &[LaunchCandidate]) -> Vec<&str> {
        candidates.iter().map(|c| c.command.as_str()).collect()
    }

    #[test]
    fn test_finder_has_no_candidates() {
        for platform in [Platform::Macos, Platform::Linux, Platform::Windows] {
            assert!(resolve(AppId::Finder, "/tmp", platform).is_empty());
        }
    }

    #[test]
    fn test_macos_prefers_open_a_then_shim() {
        let candidates = resolve(AppId::Cursor, "/work/repo", Platform::Macos);
        assert_eq!(commands(&candidates), vec!["open", "cursor"]);
        assert_eq!(candidates[0].style, LaunchStyle::Handoff);
        assert_eq!(candidates[0].args, vec!["-a", "Cursor", "/work/repo"]);
        assert_eq!(candidates[1].style, LaunchStyle::Direct);
        assert_eq!(candidates[1].args, vec!["/work/repo"]);
    }

    #[test]
    fn test_macos_position_puts_shim_first() {
        let target = Target::new("/work/main.rs").with_position(Some(Position {
            line: 10,
            column: Some(2),
        }));
        let candidates = resolve_at(AppId::Vscode, &target, Platform::Macos);
        assert_eq!(commands(&candidates), vec!["code", "open"]);
        assert_eq!(candidates[0].args, vec!["--goto", "/work/main.rs:10:2"]);
        assert_eq!(
            candidates[1].args,
            vec!["-a", "Visual Studio Code", "/work/main.rs"]
        );
    }

    #[test]
    fn test_linux_zed_names() {
        let candidates = resolve(AppId::Zed, "/p", Platform::Linux);
        assert_eq!(commands(&candidates), vec!["zed", "zeditor", "zedit"]);
        assert!(candidates.iter().all(|c| c.style == LaunchStyle::Direct));
    }

    #[test]
    fn test_windows_prefers_cmd_shims() {
        let candidates = resolve(AppId::Vscode, "C:\\src", Platform::Windows);
        assert_eq!(commands(&candidates), vec!["code.cmd", "code"]);
    }

    #[test]
    fn test_xcode_off_macos_is_empty() {
        assert!(resolve(AppId::Xcode, "/p", Platform::Linux).is_empty());
        assert!(resolve(AppId::Xcode, "/p", Platform::Windows).is_empty());
        assert!(!resolve(AppId::Xcode, "/p", Platform::Macos).is_empty());
    }

    #[test]
    fn test_jetbrains_line_flags() {
        let target = Target::new("/p/App.kt").with_position(Some(Position {
            line: 3,
            column: None,
        }));
        let candidates = resolve_at(AppId::Intellij, &target, Platform::Linux);
        assert_eq!(candidates[0].args, vec!["--line", "3", "/p/App.kt"]);
    }

    #[test]
    fn test_terminal_linux_working_directory() {
        let candidates = resolve(AppId::Terminal, "/home/me", Platform::Linux);
        assert_eq!(candidates[0].command, "x-terminal-emulator");
        assert_eq!(candidates[2].args, vec!["--workdir", "/home/me"]);
    }

    #[test]
    fn test_terminal_windows_never_goes_through_cmd() {
        let candidates = resolve(AppId::Terminal, "C:\\a&calc;x", Platform::Windows);
        assert_eq!(commands(&candidates), vec!["wt"]);
        assert_eq!(candidates[0].args, vec!["-d", "C:\\a&calc\\;x"]);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        for app in AppId::ALL {
            for platform in [Platform::Macos, Platform::Linux, Platform::Windows] {
                assert_eq!(
                    resolve(app, "/same/path", platform),
                    resolve(app, "/same/path", platform)
                );
            }
        }
    }

    #[test]
    fn test_parse_platform() {
        assert_eq!("Darwin".parse::<Platform>().unwrap(), Platform::Macos);
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
        assert!("beos".parse::<Platform>().is_err());
    }
}
