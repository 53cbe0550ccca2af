//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.msgfeed/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::route::Route;
use crate::core::storage;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub start_route: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_PER_PAGE: u32 = 10;
const FALLBACK_STORAGE_FILE: &str = ".msgfeed-storage.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub per_page: u32,
    pub storage_path: PathBuf,
    pub start_route: Route,
}

/// Values given on the command line. `None` means "not specified".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub per_page: Option<u32>,
    pub route: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.msgfeed/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".msgfeed").join("config.toml"))
}

/// Load config from `~/.msgfeed/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `FeedConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<FeedConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(FeedConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(FeedConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: FeedConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# msgfeed configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# start_route = "/"                  # "/", "/login" or "/messages"

# [api]
# base_url = "http://localhost:5000/api"   # Or set MSGFEED_BASE_URL
# per_page = 10                            # Or set MSGFEED_PER_PAGE

# [storage]
# path = "/home/me/.msgfeed/storage.json"  # Or set MSGFEED_STORAGE
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &FeedConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| std::env::var("MSGFEED_BASE_URL").ok())
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Page size: CLI → env → config → default. Zero is treated as unset at each level.
    let nonzero = |n: &u32| *n > 0;
    let per_page = cli
        .per_page
        .filter(nonzero)
        .or_else(|| {
            std::env::var("MSGFEED_PER_PAGE")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(nonzero)
        })
        .or(config.api.per_page.filter(nonzero))
        .unwrap_or(DEFAULT_PER_PAGE);

    // Storage path: env → config → ~/.msgfeed/storage.json → cwd
    let storage_path = std::env::var("MSGFEED_STORAGE")
        .ok()
        .or_else(|| config.storage.path.clone())
        .map(PathBuf::from)
        .or_else(storage::default_storage_path)
        .unwrap_or_else(|| PathBuf::from(FALLBACK_STORAGE_FILE));

    // Start route: CLI → config → "/"
    let requested = cli
        .route
        .clone()
        .or_else(|| config.general.start_route.clone());
    let start_route = match requested.as_deref() {
        Some(path) => Route::parse(path).unwrap_or_else(|| {
            warn!("Unknown start route {:?}, falling back to /", path);
            Route::Root
        }),
        None => Route::Root,
    };

    ResolvedConfig {
        base_url,
        per_page,
        storage_path,
        start_route,
    }
}
