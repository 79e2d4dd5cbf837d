#![forbid(unsafe_code)]

mod backend;
mod config;
mod constants;
mod dirty;
mod form;
mod gui;
mod keyword;
mod poller;
mod session;
mod site_rules;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level as TraceLevel};
use tracing_subscriber::FmtSubscriber;

use backend::{AgentLauncher, LocalBackend, SettingsBackend};
use config::SettingsStore;
use form::FormState;

#[derive(Parser)]
#[command(name = "ticket-settings")]
#[command(version, about = "Settings editor for the ticket purchase agent")]
struct Cli {
    /// trace, debug, info, warn or error (overrides LOG_LEVEL)
    #[arg(long = "log-level", global = true)]
    log_level: Option<String>,

    /// Directory holding settings.json and the agent marker files
    #[arg(long = "app-root", global = true)]
    app_root: Option<PathBuf>,

    /// Command that starts the agent
    #[arg(long = "agent-cmd")]
    agent_cmd: Option<String>,

    /// Command that starts the agent when the driver is nodriver
    #[arg(long = "nodriver-agent-cmd")]
    nodriver_agent_cmd: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Print the display form of a stored keyword list
    Decode { canonical: String },
    /// Print the stored form of a semicolon-separated keyword list
    Encode { display: String },
    /// List fields of a saved form (JSON) that differ from the stored settings
    Dirty { form: PathBuf },
    /// Overwrite the stored settings with the defaults
    Reset,
}

fn parse_level(name: &str) -> TraceLevel {
    match name.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn report_dirty(store: &SettingsStore, form_path: &Path) -> Result<()> {
    let contents = fs::read_to_string(form_path)
        .with_context(|| format!("Failed to read form from {:?}", form_path))?;
    let form: FormState = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse form JSON from {:?}", form_path))?;

    let snapshot = store.load()?;
    for field in dirty::dirty_fields(&form, &snapshot) {
        println!("{field}");
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --log-level wins over LOG_LEVEL
    let log_level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .map_or(TraceLevel::INFO, |name| parse_level(&name));

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let root = cli.app_root.clone().unwrap_or_else(SettingsStore::default_root);
    let store = SettingsStore::new(root);
    info!(root = ?store.root(), "Using application root");

    match cli.cmd {
        Some(Command::Decode { canonical }) => println!("{}", keyword::decode_for_display(&canonical)),
        Some(Command::Encode { display }) => println!("{}", keyword::encode_for_storage(&display)),
        Some(Command::Dirty { form }) => report_dirty(&store, &form)?,
        Some(Command::Reset) => {
            store.reset()?;
            println!("{}", store.path().display());
        }
        None => {
            let launcher = AgentLauncher {
                default_cmd: cli.agent_cmd,
                nodriver_cmd: cli.nodriver_agent_cmd,
            };
            let backend: Arc<dyn SettingsBackend> = Arc::new(LocalBackend::new(store, launcher));
            gui::run_gui(backend)?;
        }
    }

    Ok(())
}
