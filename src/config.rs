//! Configuration loading and root folder resolution
//!
//! Settings sources, highest priority first:
//! 1. Command-line arguments (`--root-folder`, `--port`, `--database`)
//! 2. Environment variables (`SALESCAST_ROOT_FOLDER`, `SALESCAST_PORT`)
//! 3. TOML configuration file (`~/.config/salescast/config.toml`)
//! 4. Built-in defaults (OS data directory, port 5730)
//!
//! The root folder holds everything the module reads or writes at runtime:
//! the SQLite history database and the optional reference artifacts
//! (`stores_nigeria.csv`, `encoders.json`, `sales_model.json`). Artifacts
//! missing from the root folder fall back to compiled-in defaults, so a
//! fresh install starts with zero configuration.

use crate::error::Result;
use clap::Parser;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::info;

/// Default HTTP port
const DEFAULT_PORT: u16 = 5730;

/// Command-line arguments (clap also applies the environment tier)
#[derive(Debug, Parser)]
#[command(name = "salescast", version, about = "Nigeria retail sales forecasting web module")]
pub struct CliArgs {
    /// Root folder for database and reference artifacts
    #[arg(long, env = "SALESCAST_ROOT_FOLDER")]
    pub root_folder: Option<PathBuf>,

    /// HTTP server port
    #[arg(long, env = "SALESCAST_PORT")]
    pub port: Option<u16>,

    /// SQLite database path (defaults to <root>/salescast.db)
    #[arg(long)]
    pub database: Option<PathBuf>,
}

/// Optional TOML configuration file contents
#[derive(Debug, Default, Deserialize)]
struct TomlConfig {
    #[serde(default)]
    root_folder: Option<PathBuf>,
    #[serde(default)]
    port: Option<u16>,
}

/// Resolved application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Root folder for database and reference artifacts
    pub root_folder: PathBuf,
    /// HTTP server port
    pub port: u16,
    /// SQLite database path
    pub database_path: PathBuf,
}

impl Config {
    /// Resolve configuration from CLI/env arguments, the TOML file, and
    /// built-in defaults.
    pub fn resolve(args: CliArgs) -> Self {
        let file_config = load_config_file().unwrap_or_default();

        let root_folder = args
            .root_folder
            .or(file_config.root_folder)
            .unwrap_or_else(default_root_folder);

        let port = args.port.or(file_config.port).unwrap_or(DEFAULT_PORT);

        let database_path = args
            .database
            .unwrap_or_else(|| root_folder.join("salescast.db"));

        Self {
            root_folder,
            port,
            database_path,
        }
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_root_folder(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    /// Path of the store reference CSV under the root folder
    pub fn stores_path(&self) -> PathBuf {
        self.root_folder.join("stores_nigeria.csv")
    }

    /// Path of the label encoder artifact under the root folder
    pub fn encoders_path(&self) -> PathBuf {
        self.root_folder.join("encoders.json")
    }

    /// Path of the trained model artifact under the root folder
    pub fn model_path(&self) -> PathBuf {
        self.root_folder.join("sales_model.json")
    }
}

/// Load the TOML configuration file if one exists
fn load_config_file() -> Option<TomlConfig> {
    let path = config_file_path()?;
    let contents = std::fs::read_to_string(&path).ok()?;
    match toml::from_str::<TomlConfig>(&contents) {
        Ok(config) => {
            info!("Loaded configuration file: {}", path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("Ignoring unparseable config file {}: {}", path.display(), e);
            None
        }
    }
}

/// Configuration file location for the platform
///
/// Linux checks the user config directory first, then /etc/salescast.
fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("salescast").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }
    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/salescast/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }
    None
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        dirs::data_local_dir()
            .map(|d| d.join("salescast"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/salescast"))
    } else if cfg!(target_os = "macos") {
        dirs::data_dir()
            .map(|d| d.join("salescast"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/salescast"))
    } else if cfg!(target_os = "windows") {
        dirs::data_local_dir()
            .map(|d| d.join("salescast"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\salescast"))
    } else {
        PathBuf::from("./salescast_data")
    }
}
