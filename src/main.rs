mod app;
mod backend;
mod config;
mod model;
mod state;
mod ui;

use std::{
    fs::{self, OpenOptions},
    io,
    path::PathBuf,
    sync::Mutex,
    time::Duration,
};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste},
    execute,
};
use tracing_subscriber::EnvFilter;

use crate::{
    app::{App, Control},
    backend::DetachedBackend,
    config::{CONFIG_PATH_ENV, ConfigFile, FormConfig, Variant},
    model::ActiveTab,
};

/// Environment variable used to override the log file path.
const LOG_PATH_ENV: &str = "CODEDROP_LOG_FILE";
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Terminal intake form for a code-analysis service.
#[derive(Debug, Parser)]
#[command(name = "codedrop", version)]
struct Cli {
    /// Form preset to start from.
    #[arg(long, value_enum)]
    variant: Option<Variant>,

    /// Tab shown at start-up. Overrides the preset and the config file.
    #[arg(long, value_enum)]
    tab: Option<ActiveTab>,

    /// YAML file with form overrides.
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,

    /// Directory the file picker opens in.
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Log file. Defaults to the platform data directory.
    #[arg(long, env = LOG_PATH_ENV)]
    log_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_path = init_tracing(&cli)?;

    let file = ConfigFile::load(cli.config.as_deref())?;
    let config = FormConfig::resolve(cli.variant, cli.tab, file.as_ref());
    tracing::info!(
        default_tab = config.default_tab.label(),
        log = ?log_path,
        "starting intake form"
    );

    let mut app = App::new(config, cli.dir, Box::new(DetachedBackend))
        .context("failed to initialize the form")?;

    let mut terminal = ratatui::init();
    let result = execute!(io::stdout(), EnableBracketedPaste)
        .context("failed to enable bracketed paste")
        .and_then(|()| run(&mut terminal, &mut app));
    let _ = execute!(io::stdout(), DisableBracketedPaste);
    ratatui::restore();

    if let Err(err) = &result {
        tracing::error!(error = %err, "form exited with an error");
    }
    result
}

fn run(terminal: &mut ratatui::DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if app.handle_event(event::read()?) == Control::Quit {
            tracing::info!("quit requested");
            return Ok(());
        }
    }
}

// The terminal belongs to the UI, so logs only ever go to a file.
fn init_tracing(cli: &Cli) -> Result<Option<PathBuf>> {
    let Some(path) = cli.log_file.clone().or_else(default_log_path) else {
        return Ok(None);
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log directory '{}'", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();

    Ok(Some(path))
}

fn default_log_path() -> Option<PathBuf> {
    dirs_next::data_local_dir().map(|dir| dir.join("codedrop").join("codedrop.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_accepts_tab_and_variant_names() {
        let cli = Cli::try_parse_from([
            "codedrop",
            "--variant",
            "doc-generator",
            "--tab",
            "github",
            "--log-file",
            "/tmp/codedrop-test.log",
        ])
        .unwrap();
        assert_eq!(cli.variant, Some(Variant::DocGenerator));
        assert_eq!(cli.tab, Some(ActiveTab::GithubRepository));
        assert_eq!(cli.log_level, "info");
    }

    #[test]
    fn cli_rejects_unknown_tab() {
        assert!(Cli::try_parse_from(["codedrop", "--tab", "upload"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
