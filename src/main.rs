#![forbid(unsafe_code)]

mod config;
mod constants;
mod host;
mod lang;
mod permissions;
mod policy;
mod simulate;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use config::{CameraSettings, ConfigStore, Configuration, LoadOutcome, ThirdPersonMode};
use lang::{LangStore, MessageCatalog};
use permissions::PermissionRegistry;
use policy::{HookTable, PluginContext};

#[derive(Parser, Debug)]
#[command(name = "dynamic-third-person", version, about = "Third person view toggling for game servers")]
struct Cli {
    /// Directory holding `dynamic-third-person/` (defaults to the user config dir)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the config, upgrade it if it is stale and write it back
    Migrate,
    /// Print the effective configuration without writing the file
    Show,
    /// Replay a JSON event script against an in-memory server
    Simulate {
        script: PathBuf,
        /// Override the configured mode for this run
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Always,
    Vehicle,
    Command,
}

impl From<ModeArg> for ThirdPersonMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Always => Self::AlwaysThirdPerson,
            ModeArg::Vehicle => Self::VehicleOnly,
            ModeArg::Command => Self::CommandOnly,
        }
    }
}

fn load_config(config_dir: &Path) -> Result<Configuration> {
    let store = ConfigStore::in_dir(config_dir);
    let outcome = store.load()?;
    match &outcome {
        LoadOutcome::Defaults(_) => info!(path = %store.path().display(), "Wrote default config"),
        LoadOutcome::Unchanged(config) => info!(version = %config.version, "Config is current"),
        LoadOutcome::Migrated { from, config } => {
            info!(from = %from, to = %config.version, "Config migrated")
        }
    }
    Ok(outcome.into_config())
}

fn load_messages(config_dir: &Path) -> Result<MessageCatalog> {
    let mut catalog = MessageCatalog::new();
    LangStore::in_dir(config_dir).sync(&mut catalog)?;
    Ok(catalog)
}

fn main() -> Result<()> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    // stdout is reserved for command output
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config_dir = cli
        .config_dir
        .or_else(dirs::config_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    match cli.command {
        Command::Migrate => {
            let store = ConfigStore::in_dir(&config_dir);
            match store.load()? {
                LoadOutcome::Defaults(_) => {
                    println!("No usable config found; wrote defaults to {}", store.path().display())
                }
                LoadOutcome::Unchanged(config) => {
                    println!("Config at {} is already version {}", store.path().display(), config.version)
                }
                LoadOutcome::Migrated { from, config } => println!(
                    "Updated {} from version {} to {}",
                    store.path().display(),
                    from,
                    config.version
                ),
            }
        }
        Command::Show => {
            let config = ConfigStore::in_dir(&config_dir).inspect().into_config();
            let camera = CameraSettings::from_config(&config.camera);
            let hooks = HookTable::for_mode(config.mode);
            println!("{}", serde_json::to_string_pretty(&config)?);
            println!(
                "camera: offset={} fov={} distance={}",
                camera.offset, camera.field_of_view, camera.distance
            );
            println!(
                "hooks: input={} mount={} dismount={} command=/{}",
                hooks.player_input, hooks.entity_mounted, hooks.entity_dismounted, config.toggle_command
            );
        }
        Command::Simulate { script, mode } => {
            let mut config = load_config(&config_dir)?;
            if let Some(mode) = mode {
                config.mode = mode.into();
            }
            let messages = load_messages(&config_dir)?;
            let script = simulate::Script::load(&script)?;

            let ctx = PluginContext::new(config, PermissionRegistry::new(), messages);
            let report = simulate::run(script, ctx)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
