//! # Configuration
//!
//! Where the client finds its backend, how it logs, and which generation
//! parameters it forwards. Later layers win:
//! defaults → config file → `CHATBOT_API_URL` → CLI flags.
//!
//! The file is `~/.chatbot-tui/config.toml`. The first run writes a fully
//! commented template there.

use log::{Level, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::api::GenerationParams;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ChatbotConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ApiConfig {
    pub base_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GenerationConfig {
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub file: Option<String>,
    /// One of "off", "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const BASE_URL_ENV: &str = "CHATBOT_API_URL";
pub const DEFAULT_LOG_FILE: &str = "chatbot-tui.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;

// Ranges the backend accepts; anything outside is rejected with a 422.
const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 10..=500;
const SAMPLING_RANGE: std::ops::RangeInclusive<f32> = 0.1..=1.0;

// ============================================================================
// CLI Overrides + Resolved Config
// ============================================================================

/// Values given on the command line. `None` = flag not passed.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub log_file: Option<PathBuf>,
    pub log_level: Option<LevelFilter>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub generation: GenerationParams,
    pub log_file: PathBuf,
    pub log_level: LevelFilter,
    /// Rejected values, for the caller to log once the logger is up
    pub notes: Vec<ConfigNote>,
}

/// A log line produced while config is read, before any logger exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigNote {
    pub level: Level,
    pub message: String,
}

impl ConfigNote {
    fn warn(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warn,
            message: message.into(),
        }
    }

    fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }
}

/// The parsed file plus what happened while finding it.
#[derive(Debug, Default)]
pub struct LoadedConfig {
    pub config: ChatbotConfig,
    pub notes: Vec<ConfigNote>,
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

/// Returns the path to `~/.chatbot-tui/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chatbot-tui").join("config.toml"))
}

/// Load config from `~/.chatbot-tui/config.toml`.
///
/// A missing file gets the commented template written in its place and
/// yields `ChatbotConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<LoadedConfig, ConfigError> {
    let mut loaded = LoadedConfig::default();
    let Some(path) = config_path() else {
        loaded.notes.push(ConfigNote::warn(
            "Could not determine home directory, using default config",
        ));
        return Ok(loaded);
    };

    if !path.exists() {
        loaded.notes.push(ConfigNote::info(format!(
            "No config file found, generating default at {}",
            path.display()
        )));
        if let Err(e) = generate_default_config(&path) {
            loaded
                .notes
                .push(ConfigNote::warn(format!("Failed to write default config: {e}")));
        }
        return Ok(loaded);
    }

    loaded.config = load_config_from(&path)?;
    loaded
        .notes
        .push(ConfigNote::info(format!("Loaded config from {}", path.display())));
    Ok(loaded)
}

/// Parse a config file at an explicit path.
pub fn load_config_from(path: &Path) -> Result<ChatbotConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&contents).map_err(ConfigError::Parse)
}

const DEFAULT_CONFIG_CONTENT: &str = r#"# Chatbot TUI Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [api]
# base_url = "http://localhost:8000"   # Or set CHATBOT_API_URL env var

# [generation]
# Omitted values fall back to the server's defaults.
# max_tokens = 150                     # 10..=500
# temperature = 0.7                    # 0.1..=1.0
# top_p = 0.9                          # 0.1..=1.0

# [logging]
# file = "chatbot-tui.log"
# level = "debug"                      # "off", "error", "warn", "info", "debug", "trace"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_CONFIG_CONTENT)
}

// ============================================================================
// Resolution
// ============================================================================

/// Flatten every layer into a `ResolvedConfig`, reading `CHATBOT_API_URL` from the process env.
pub fn resolve(config: &ChatbotConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, std::env::var(BASE_URL_ENV).ok())
}

/// `resolve` with the environment passed in, so tests don't touch process env.
pub fn resolve_with_env(
    config: &ChatbotConfig,
    cli: &CliOverrides,
    env_base_url: Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or(env_base_url.filter(|url| !url.trim().is_empty()))
        .or_else(|| config.api.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let log_file = cli
        .log_file
        .clone()
        .or_else(|| config.logging.file.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let mut notes = Vec::new();

    // A bad level in the file is still reported when the CLI overrides it
    let file_level = config
        .logging
        .level
        .as_deref()
        .and_then(|raw| parse_level(raw, &mut notes));
    let log_level = cli.log_level.or(file_level).unwrap_or(DEFAULT_LOG_LEVEL);

    let generation = resolve_generation(&config.generation, &mut notes);

    ResolvedConfig {
        base_url,
        generation,
        log_file,
        log_level,
        notes,
    }
}

fn parse_level(raw: &str, notes: &mut Vec<ConfigNote>) -> Option<LevelFilter> {
    match raw.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            notes.push(ConfigNote::warn(format!(
                "Unknown log level {raw:?} in config, using default"
            )));
            None
        }
    }
}

/// Drops out-of-range values so the server default applies instead of a 422.
fn resolve_generation(config: &GenerationConfig, notes: &mut Vec<ConfigNote>) -> GenerationParams {
    let max_tokens = config.max_tokens.filter(|n| {
        let ok = MAX_TOKENS_RANGE.contains(n);
        if !ok {
            notes.push(ConfigNote::warn(format!(
                "Ignoring max_tokens={n} (accepted {MAX_TOKENS_RANGE:?})"
            )));
        }
        ok
    });
    GenerationParams {
        max_tokens,
        temperature: sampling_param("temperature", config.temperature, notes),
        top_p: sampling_param("top_p", config.top_p, notes),
    }
}

fn sampling_param(name: &str, value: Option<f32>, notes: &mut Vec<ConfigNote>) -> Option<f32> {
    value.filter(|v| {
        let ok = SAMPLING_RANGE.contains(v);
        if !ok {
            notes.push(ConfigNote::warn(format!(
                "Ignoring {name}={v} (accepted {SAMPLING_RANGE:?})"
            )));
        }
        ok
    })
}
