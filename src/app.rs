use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbolic name for an external program a path can be opened with.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AppId {
    Finder,
    Vscode,
    Cursor,
    Zed,
    Sublime,
    Xcode,
    Intellij,
    Webstorm,
    Terminal,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppKind {
    FileManager,
    Editor,
    Terminal,
}

impl AppId {
    pub const ALL: [AppId; 9] = [
        AppId::Finder,
        AppId::Vscode,
        AppId::Cursor,
        AppId::Zed,
        AppId::Sublime,
        AppId::Xcode,
        AppId::Intellij,
        AppId::Webstorm,
        AppId::Terminal,
    ];

    /// Used when no preference has been recorded yet.
    pub const DEFAULT: AppId = AppId::Cursor;

    pub fn slug(&self) -> &'static str {
        match self {
            AppId::Finder => "finder",
            AppId::Vscode => "vscode",
            AppId::Cursor => "cursor",
            AppId::Zed => "zed",
            AppId::Sublime => "sublime",
            AppId::Xcode => "xcode",
            AppId::Intellij => "intellij",
            AppId::Webstorm => "webstorm",
            AppId::Terminal => "terminal",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            AppId::Finder => "File Manager",
            AppId::Vscode => "Visual Studio Code",
            AppId::Cursor => "Cursor",
            AppId::Zed => "Zed",
            AppId::Sublime => "Sublime Text",
            AppId::Xcode => "Xcode",
            AppId::Intellij => "IntelliJ IDEA",
            AppId::Webstorm => "WebStorm",
            AppId::Terminal => "Terminal",
        }
    }

    pub fn kind(&self) -> AppKind {
        match self {
            AppId::Finder => AppKind::FileManager,
            AppId::Terminal => AppKind::Terminal,
            _ => AppKind::Editor,
        }
    }

    /// The file manager is revealed directly and never goes through candidates.
    pub fn is_file_manager(&self) -> bool {
        self.kind() == AppKind::FileManager
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl fmt::Display for AppKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppKind::FileManager => write!(f, "file manager"),
            AppKind::Editor => write!(f, "editor"),
            AppKind::Terminal => write!(f, "terminal"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownApp(pub String);

impl fmt::Display for UnknownApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown application '{}'", self.0)
    }
}

impl std::error::Error for UnknownApp {}

impl FromStr for AppId {
    type Err = UnknownApp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        AppId::ALL
            .into_iter()
            .find(|app| app.slug() == lower)
            .ok_or_else(|| UnknownApp(s.to_string()))
    }
}

/// How the launcher treats a candidate's process.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum LaunchStyle {
    /// The command is the application itself; spawning it is success.
    Direct,
    /// The command is an OS launcher wrapper (e.g. `open -a`) that exits
    /// promptly; its exit status is the launch result.
    Handoff,
}

impl fmt::Display for LaunchStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchStyle::Direct => write!(f, "direct"),
            LaunchStyle::Handoff => write!(f, "handoff"),
        }
    }
}

/// One concrete way to invoke an application.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LaunchCandidate {
    pub command: String,
    pub args: Vec<String>,
    pub style: LaunchStyle,
}

impl LaunchCandidate {
    pub fn direct(command: &str, args: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            args,
            style: LaunchStyle::Direct,
        }
    }

    pub fn handoff(command: &str, args: Vec<String>) -> Self {
        Self {
            command: command.to_string(),
            args,
            style: LaunchStyle::Handoff,
        }
    }

    /// Command line as a single string, for display only.
    pub fn command_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(quote(&self.command));
        parts.extend(self.args.iter().map(|a| quote(a)));
        parts.join(" ")
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{}\"", s)
    } else {
        s.to_string()
    }
}

/// Cursor position inside a file, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: u32,
    pub column: Option<u32>,
}

/// A resolved path, optionally with a position to jump to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub path: String,
    pub position: Option<Position>,
}

impl Target {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            position: None,
        }
    }

    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    /// `path:line[:column]`, or the bare path when there is no position.
    pub fn goto_spec(&self) -> String {
        match self.position {
            Some(Position {
                line,
                column: Some(column),
            }) => format!("{}:{}:{}", self.path, line, column),
            Some(Position { line, column: None }) => format!("{}:{}", self.path, line),
            None => self.path.clone(),
        }
    }
}
