use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::app::{AppId, Position};
use crate::output::OutputFormat;
use crate::resolver::Platform;

/// Parse an application identifier, suggesting the closest one on a miss.
pub fn parse_app(s: &str) -> Result<AppId, String> {
    if let Ok(app) = s.parse::<AppId>() {
        return Ok(app);
    }

    let valid: Vec<&str> = AppId::ALL.iter().map(|a| a.slug()).collect();
    match suggest(s) {
        Some(best) => Err(format!(
            "unknown application '{}' (did you mean '{}'?); expected one of: {}",
            s,
            best,
            valid.join(", ")
        )),
        None => Err(format!(
            "unknown application '{}': expected one of: {}",
            s,
            valid.join(", ")
        )),
    }
}

/// Best fuzzy match over slugs and display names.
fn suggest(input: &str) -> Option<AppId> {
    let matcher = SkimMatcherV2::default();
    let mut best: Option<(i64, AppId)> = None;
    for app in AppId::ALL {
        let score = matcher
            .fuzzy_match(app.slug(), input)
            .max(matcher.fuzzy_match(app.display_name(), input));
        if let Some(score) = score {
            match best {
                Some((best_score, _)) if score <= best_score => {}
                _ => best = Some((score, app)),
            }
        }
    }
    best.map(|(_, app)| app)
}

fn parse_platform(s: &str) -> Result<Platform, String> {
    s.parse()
}

#[derive(Parser, Debug)]
#[command(
    name = "openin",
    version,
    about = "Open paths in editors, terminals and file managers with launcher fallback"
)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Preference database, overriding the config file
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Open a path, in the given application or the last used one
    Open {
        /// Path to open
        path: String,

        /// Application to use; remembered as the new default
        #[arg(short, long, value_parser = parse_app)]
        app: Option<AppId>,
    },

    /// Open a file in the last used editor, optionally at a line
    Edit {
        /// File path, relative to --cwd
        path: String,

        /// Directory relative paths are resolved against
        #[arg(long)]
        cwd: Option<PathBuf>,

        /// Line to jump to
        #[arg(long)]
        line: Option<u32>,

        /// Column to jump to (requires --line)
        #[arg(long, requires = "line")]
        column: Option<u32>,
    },

    /// Show a path in the file manager
    Reveal {
        /// Path to reveal
        path: String,
    },

    /// Open a URL in the default browser
    Url {
        /// URL to open
        url: String,
    },

    /// Print the launch candidates for an application without running them
    Candidates {
        /// Application identifier
        #[arg(value_parser = parse_app)]
        app: AppId,

        /// Path the candidates would open
        path: String,

        /// Resolve for another platform
        #[arg(long, value_parser = parse_platform)]
        platform: Option<Platform>,

        /// Line to jump to
        #[arg(long)]
        line: Option<u32>,

        /// Column to jump to (requires --line)
        #[arg(long, requires = "line")]
        column: Option<u32>,
    },

    /// List known application identifiers
    Apps,

    /// Show the last used application, or set it
    LastUsed {
        /// New value
        #[arg(value_parser = parse_app)]
        app: Option<AppId>,
    },

    /// Check which applications can be launched on this host
    Doctor,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

pub fn position(line: Option<u32>, column: Option<u32>) -> Option<Position> {
    line.map(|line| Position { line, column })
}

impl ValueEnum for OutputFormat {
    fn value_variants<'a>() -> &'a [Self] {
        &[OutputFormat::Table, OutputFormat::Json, OutputFormat::Names]
    }

    fn to_possible_value(&self) -> Option<clap::builder::PossibleValue> {
        match self {
            OutputFormat::Table => Some(clap::builder::PossibleValue::new("table")),
            OutputFormat::Json => Some(clap::builder::PossibleValue::new("json")),
            OutputFormat::Names => Some(clap::builder::PossibleValue::new("names")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_app_exact() {
        assert_eq!(parse_app("zed"), Ok(AppId::Zed));
        assert_eq!(parse_app("VSCode"), Ok(AppId::Vscode));
    }

    #[test]
    fn test_parse_app_suggests() {
        let err = parse_app("sublim").unwrap_err();
        assert!(err.contains("did you mean 'sublime'"), "{err}");
    }

    #[test]
    fn test_parse_app_no_suggestion() {
        let err = parse_app("qqqq").unwrap_err();
        assert!(err.contains("expected one of"));
        assert!(!err.contains("did you mean"));
    }

    #[test]
    fn test_position_requires_line() {
        assert_eq!(position(None, None), None);
        assert_eq!(
            position(Some(4), Some(2)),
            Some(Position {
                line: 4,
                column: Some(2)
            })
        );
    }

    #[test]
    fn test_parse_open_with_app() {
        let cli = Cli::try_parse_from(["openin", "open", "/tmp", "--app", "cursor"]).unwrap();
        match cli.command {
            Command::Open { path, app } => {
                assert_eq!(path, "/tmp");
                assert_eq!(app, Some(AppId::Cursor));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_column_without_line_rejected() {
        assert!(Cli::try_parse_from(["openin", "edit", "a.rs", "--column", "3"]).is_err());
    }
}
