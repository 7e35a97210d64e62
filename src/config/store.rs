//! Config file persistence and schema migration
//!
//! `load` reads the file, upgrades it to the running version and writes the
//! result back. `inspect` does the same in memory and leaves the disk alone.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::config::schema::{
    CameraConfig, Configuration, StoredConfig, ThirdPersonMode, default_vehicle_short_prefab_names,
};
use crate::config::version::SchemaVersion;
use crate::constants::{config as paths, defaults, schema};

/// What `load` found on disk
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// No usable file; compiled defaults were written
    Defaults(Configuration),
    /// File was already at (or beyond) the running version
    Unchanged(Configuration),
    /// File was upgraded from an older version
    Migrated {
        from: SchemaVersion,
        config: Configuration,
    },
}

impl LoadOutcome {
    pub fn config(&self) -> &Configuration {
        match self {
            Self::Defaults(config) | Self::Unchanged(config) => config,
            Self::Migrated { config, .. } => config,
        }
    }

    pub fn into_config(self) -> Configuration {
        match self {
            Self::Defaults(config) | Self::Unchanged(config) => config,
            Self::Migrated { config, .. } => config,
        }
    }
}

/// One schema upgrade: the version that introduced some fields, and how to
/// reset exactly those fields
struct MigrationStep {
    introduced_in: &'static str,
    apply: fn(&mut Configuration, &StoredConfig),
}

/// Ordered oldest first; `migrate` relies on this
const MIGRATION_STEPS: &[MigrationStep] = &[
    MigrationStep {
        introduced_in: schema::INITIAL,
        apply: reset_all,
    },
    MigrationStep {
        introduced_in: schema::CAMERA,
        apply: reset_camera,
    },
    MigrationStep {
        introduced_in: schema::VEHICLES_AND_COMMAND,
        apply: reset_vehicles_and_command,
    },
    MigrationStep {
        introduced_in: schema::MODE,
        apply: reset_mode,
    },
];

fn reset_all(config: &mut Configuration, _stored: &StoredConfig) {
    *config = Configuration::default();
}

fn reset_camera(config: &mut Configuration, _stored: &StoredConfig) {
    config.camera = CameraConfig::default();
}

fn reset_vehicles_and_command(config: &mut Configuration, _stored: &StoredConfig) {
    config.vehicle_short_prefab_names = default_vehicle_short_prefab_names();
    config.toggle_command = defaults::TOGGLE_COMMAND.to_string();
}

/// The mode replaced a vehicle-only boolean; carry that choice over when present
fn reset_mode(config: &mut Configuration, stored: &StoredConfig) {
    config.mode = stored
        .legacy_vehicle_only
        .map(ThirdPersonMode::from_legacy_vehicle_only)
        .unwrap_or_default();
}

/// Upgrade whatever was read from disk to a complete configuration for the
/// running version. Pure: never touches the filesystem.
pub fn migrate(stored: StoredConfig) -> LoadOutcome {
    let current = SchemaVersion::current();

    // A missing or unreadable version is older than every release
    let from = stored
        .version
        .as_deref()
        .and_then(|v| {
            v.parse::<SchemaVersion>()
                .inspect_err(|e| warn!(version = %v, error = %e, "Unreadable config version, treating as oldest"))
                .ok()
        })
        .unwrap_or_default();

    let mut config = complete(&stored);

    if from >= current {
        if from > current {
            warn!(stored = %from, running = %current, "Config was written by a newer version, keeping its version stamp");
        }
        config.version = from.to_string();
        return LoadOutcome::Unchanged(config);
    }

    warn!("Config changes detected! Updating...");

    for step in MIGRATION_STEPS {
        let introduced_in: SchemaVersion = match step.introduced_in.parse() {
            Ok(version) => version,
            Err(e) => {
                error!(version = step.introduced_in, error = %e, "Skipping migration step with invalid version");
                continue;
            }
        };
        if from < introduced_in {
            info!(step = %introduced_in, "Applying config migration step");
            (step.apply)(&mut config, &stored);
        }
    }

    warn!(from = %from, to = %current, "Config update complete! Updated from version {from} to {current}");
    config.version = current.to_string();

    LoadOutcome::Migrated { from, config }
}

/// Keep every field the file has, default the ones it doesn't
fn complete(stored: &StoredConfig) -> Configuration {
    let defaults = Configuration::default();
    Configuration {
        version: defaults.version,
        mode: stored.mode.unwrap_or(defaults.mode),
        vehicle_short_prefab_names: stored
            .vehicle_short_prefab_names
            .clone()
            .unwrap_or(defaults.vehicle_short_prefab_names),
        toggle_command: stored
            .toggle_command
            .clone()
            .unwrap_or(defaults.toggle_command),
        camera: stored
            .camera
            .clone()
            .map(|camera| camera.complete())
            .unwrap_or(defaults.camera),
    }
}

enum FileState {
    Missing,
    /// Not a JSON object
    Corrupt,
    Stored(StoredConfig),
}

/// File-backed configuration store
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Store rooted at `dir/<app dir>/<file name>`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(paths::APP_DIR).join(paths::FILENAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read, migrate and write back. Only write failures are returned; an
    /// absent or corrupt file silently becomes the defaults.
    pub fn load(&self) -> Result<LoadOutcome> {
        let outcome = match self.read() {
            FileState::Stored(stored) => migrate(stored),
            FileState::Corrupt => {
                self.preserve_corrupt_file();
                LoadOutcome::Defaults(Configuration::default())
            }
            FileState::Missing => LoadOutcome::Defaults(Configuration::default()),
        };

        self.save(outcome.config())?;
        Ok(outcome)
    }

    /// What `load` would produce, without writing anything
    pub fn inspect(&self) -> LoadOutcome {
        match self.read() {
            FileState::Stored(stored) => migrate(stored),
            FileState::Corrupt | FileState::Missing => LoadOutcome::Defaults(Configuration::default()),
        }
    }

    fn read(&self) -> FileState {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "No config file found, generating default");
                return FileState::Missing;
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to read config file, using defaults");
                return FileState::Missing;
            }
        };

        match serde_json::from_str::<StoredConfig>(&contents) {
            Ok(stored) => FileState::Stored(stored),
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "Failed to parse config file, using defaults");
                FileState::Corrupt
            }
        }
    }

    /// Keep a copy of an unparsable file before it is overwritten
    fn preserve_corrupt_file(&self) {
        let mut backup = self.path.clone().into_os_string();
        backup.push(".corrupt");
        let backup = PathBuf::from(backup);
        match fs::copy(&self.path, &backup) {
            Ok(_) => warn!(backup = %backup.display(), "Preserved unreadable config"),
            Err(e) => error!(backup = %backup.display(), error = %e, "Failed to preserve unreadable config"),
        }
    }

    /// Pretty-printed full rewrite
    pub fn save(&self, config: &Configuration) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(config).context("Failed to serialize config to JSON")?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write config to {}", self.path.display()))?;

        info!(path = %self.path.display(), "Saved config");
        Ok(())
    }
}
