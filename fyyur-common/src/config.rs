//! Bootstrap configuration and root folder resolution
//!
//! Every setting is resolved with the same priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`FYYUR_ROOT_FOLDER`, `FYYUR_BIND`, `FYYUR_PORT`)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; a config file that exists but does
//! not parse is.

use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub const ENV_ROOT_FOLDER: &str = "FYYUR_ROOT_FOLDER";
pub const ENV_BIND: &str = "FYYUR_BIND";
pub const ENV_PORT: &str = "FYYUR_PORT";

/// File name of the SQLite database inside the root folder
pub const DATABASE_FILE_NAME: &str = "fyyur.db";

/// File name of the persistent log inside the root folder
pub const ERROR_LOG_FILE_NAME: &str = "error.log";

/// Built-in fallback values
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub root_folder: PathBuf,
    pub bind: String,
    pub port: u16,
    pub log_level: String,
}

impl CompiledDefaults {
    /// Defaults for the platform this binary was built for
    pub fn for_current_platform() -> Self {
        Self {
            root_folder: default_root_folder(),
            bind: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "info".to_string(),
        }
    }
}

/// Contents of `config.toml`
///
/// All keys are optional so a partial file only overrides what it names.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub root_folder: Option<PathBuf>,

    #[serde(default)]
    pub bind: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging section of `config.toml`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default)]
    pub level: Option<String>,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub log_level: Option<String>,
    /// Explicit config file; replaces the platform search path when set
    pub config_file: Option<PathBuf>,
}

/// Environment variable values, captured once
#[derive(Debug, Clone, Default)]
pub struct EnvOverrides {
    pub root_folder: Option<PathBuf>,
    pub bind: Option<String>,
    pub port: Option<u16>,
}

impl EnvOverrides {
    /// Read `FYYUR_*` variables from the process environment
    ///
    /// An unparsable `FYYUR_PORT` is logged and ignored.
    pub fn from_env() -> Self {
        let port = std::env::var(ENV_PORT).ok().and_then(|raw| match raw.parse() {
            Ok(port) => Some(port),
            Err(_) => {
                warn!("Ignoring {}={:?}: not a valid port", ENV_PORT, raw);
                None
            }
        });

        Self {
            root_folder: std::env::var(ENV_ROOT_FOLDER).ok().map(PathBuf::from),
            bind: std::env::var(ENV_BIND).ok(),
            port,
        }
    }
}

/// Fully resolved server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub root_folder: PathBuf,
    pub bind: String,
    pub port: u16,
    pub log_level: String,
}

impl ServerConfig {
    /// Resolve configuration from the command line, environment, config file and defaults
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let toml = match &cli.config_file {
            Some(path) => Some(load_toml_config(path)?),
            None => match default_config_file() {
                Some(path) => {
                    info!("Loading config file: {}", path.display());
                    Some(load_toml_config(&path)?)
                }
                None => None,
            },
        };

        Ok(Self::from_sources(
            cli,
            &EnvOverrides::from_env(),
            toml.as_ref(),
            &CompiledDefaults::for_current_platform(),
        ))
    }

    /// Merge already-loaded sources by priority
    pub fn from_sources(
        cli: &CliOverrides,
        env: &EnvOverrides,
        toml: Option<&TomlConfig>,
        defaults: &CompiledDefaults,
    ) -> Self {
        let root_folder = cli
            .root_folder
            .clone()
            .or_else(|| env.root_folder.clone())
            .or_else(|| toml.and_then(|t| t.root_folder.clone()))
            .unwrap_or_else(|| defaults.root_folder.clone());

        let bind = cli
            .bind
            .clone()
            .or_else(|| env.bind.clone())
            .or_else(|| toml.and_then(|t| t.bind.clone()))
            .unwrap_or_else(|| defaults.bind.clone());

        let port = cli
            .port
            .or(env.port)
            .or_else(|| toml.and_then(|t| t.port))
            .unwrap_or(defaults.port);

        let log_level = cli
            .log_level
            .clone()
            .or_else(|| toml.and_then(|t| t.logging.level.clone()))
            .unwrap_or_else(|| defaults.log_level.clone());

        Self {
            root_folder,
            bind,
            port,
            log_level,
        }
    }

    /// Path of the SQLite database inside the root folder
    pub fn database_path(&self) -> PathBuf {
        self.root_folder.join(DATABASE_FILE_NAME)
    }

    /// Path of the append-only log file inside the root folder
    pub fn error_log_path(&self) -> PathBuf {
        self.root_folder.join(ERROR_LOG_FILE_NAME)
    }

    /// Create the root folder if it does not exist yet
    pub fn ensure_root_folder(&self) -> Result<()> {
        if !self.root_folder.exists() {
            std::fs::create_dir_all(&self.root_folder)?;
            info!("Created root folder: {}", self.root_folder.display());
        }
        Ok(())
    }

    /// Socket address the HTTP server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind, self.port)
            .parse()
            .map_err(|e| {
                Error::Config(format!(
                    "Invalid bind address {}:{}: {}",
                    self.bind, self.port, e
                ))
            })
    }
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// First existing config file on the platform search path
fn default_config_file() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("fyyur").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(unix) {
        let system_config = PathBuf::from("/etc/fyyur/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    if cfg!(target_os = "linux") {
        // ~/.local/share/fyyur (or /var/lib/fyyur for system-wide)
        dirs::data_local_dir()
            .map(|d| d.join("fyyur"))
            .unwrap_or_else(|| PathBuf::from("/var/lib/fyyur"))
    } else if cfg!(target_os = "macos") {
        // ~/Library/Application Support/fyyur
        dirs::data_dir()
            .map(|d| d.join("fyyur"))
            .unwrap_or_else(|| PathBuf::from("/Library/Application Support/fyyur"))
    } else if cfg!(target_os = "windows") {
        // %LOCALAPPDATA%\fyyur
        dirs::data_local_dir()
            .map(|d| d.join("fyyur"))
            .unwrap_or_else(|| PathBuf::from("C:\\ProgramData\\fyyur"))
    } else {
        PathBuf::from("./fyyur_data")
    }
}
