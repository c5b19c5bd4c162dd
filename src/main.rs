use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::generate;

use openin::app::Target;
use openin::cli::{position, Cli, Command};
use openin::config::Config;
use openin::doctor;
use openin::logging;
use openin::output::{AppRow, Formatter};
use openin::resolver::{resolve_at, Platform};
use openin::service::{resolve_path, Dispatcher};
use openin::store::PreferenceStore;

fn open_store(cli: &Cli, config: &Config) -> Result<PreferenceStore> {
    let path = cli.store.clone().unwrap_or_else(|| config.store_path.clone());
    PreferenceStore::open(&path, config.default_app)
        .with_context(|| format!("cannot open preference store {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load(cli.config.as_deref())?;
    let formatter = Formatter::new(cli.format, cli.no_color);
    let mut stdout = std::io::stdout();

    match &cli.command {
        Command::Open { path, app } => {
            let dispatcher = Dispatcher::system(open_store(&cli, &config)?, Platform::current());
            let result = match app {
                Some(app) => {
                    let resolved = resolve_path(path, None)?;
                    dispatcher
                        .open_in_app(&resolved.to_string_lossy(), *app)
                        .await
                        .map(|dispatched| (*app, dispatched))
                }
                None => dispatcher.open_in_editor(path, None, None).await,
            };
            let (app, dispatched) = result?;
            formatter.format_dispatched(app, &dispatched, &mut stdout)?;
            dispatcher.shutdown()?;
        }
        Command::Edit {
            path,
            cwd,
            line,
            column,
        } => {
            let dispatcher = Dispatcher::system(open_store(&cli, &config)?, Platform::current());
            let (app, dispatched) = dispatcher
                .open_in_editor(path, cwd.as_deref(), position(*line, *column))
                .await?;
            formatter.format_dispatched(app, &dispatched, &mut stdout)?;
            dispatcher.shutdown()?;
        }
        Command::Reveal { path } => {
            let dispatcher = Dispatcher::system(open_store(&cli, &config)?, Platform::current());
            let resolved = resolve_path(path, None)?;
            dispatcher.reveal(&resolved.to_string_lossy()).await;
            dispatcher.shutdown()?;
        }
        Command::Url { url } => {
            let dispatcher = Dispatcher::system(open_store(&cli, &config)?, Platform::current());
            dispatcher.open_url(url).await?;
            dispatcher.shutdown()?;
        }
        Command::Candidates {
            app,
            path,
            platform,
            line,
            column,
        } => {
            let platform = platform.unwrap_or_else(Platform::current);
            let target = Target::new(path.as_str()).with_position(position(*line, *column));
            let candidates = resolve_at(*app, &target, platform);
            formatter.format_candidates(*app, &candidates, &mut stdout)?;
        }
        Command::Apps => {
            let store = open_store(&cli, &config)?;
            let rows = AppRow::all(store.get_last_used()?);
            formatter.format_apps(&rows, &mut stdout)?;
            store.close()?;
        }
        Command::LastUsed { app } => {
            let store = open_store(&cli, &config)?;
            if let Some(app) = app {
                store.set_last_used(*app)?;
            }
            formatter.format_last_used(store.get_last_used()?, &mut stdout)?;
            store.close()?;
        }
        Command::Doctor => {
            let probes = doctor::probe_all(Platform::current());
            formatter.format_probes(&probes, &mut stdout)?;
        }
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "openin", &mut stdout);
        }
    }

    Ok(())
}
