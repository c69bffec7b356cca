use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ThinkConfig {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub storage: StorageConfig,
    pub models: ModelsConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub transport: String,
    pub log_level: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SessionConfig {
    /// Thought cap copied into every session at creation.
    pub max_thoughts_per_session: usize,
    pub timeout_secs: u64,
    pub reaper_enabled: bool,
    pub reaper_interval_secs: u64,
}

/// Accepted for config compatibility. State is in-memory only.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub enable_persistence: bool,
    pub persistence_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ModelsConfig {
    /// Custom mental-model file or directory of `*.toml` files.
    pub path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: "stdio".into(),
            log_level: "info".into(),
            host: "127.0.0.1".into(),
            port: 8080,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_thoughts_per_session: 100,
            timeout_secs: 30 * 60,
            reaper_enabled: false,
            reaper_interval_secs: 60,
        }
    }
}

impl SessionConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn reaper_interval(&self) -> Duration {
        Duration::from_secs(self.reaper_interval_secs.max(1))
    }
}

/// Returns `~/.thinkwell/`
pub fn default_thinkwell_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".thinkwell")
}

/// Returns the config file path: `$THINKWELL_CONFIG` or `~/.thinkwell/config.toml`
pub fn default_config_path() -> PathBuf {
    match std::env::var("THINKWELL_CONFIG") {
        Ok(path) if !path.is_empty() => expand_tilde(&path),
        _ => default_thinkwell_dir().join("config.toml"),
    }
}

impl ThinkConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            ThinkConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (THINKWELL_LOG_LEVEL, THINKWELL_HOST,
    /// THINKWELL_PORT / PORT, THINKWELL_MAX_THOUGHTS, THINKWELL_MODELS_PATH).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("THINKWELL_LOG_LEVEL") {
            self.server.log_level = val;
        }
        if let Ok(val) = std::env::var("THINKWELL_HOST") {
            self.server.host = val;
        }
        // Hosting platforms set a bare PORT; the prefixed variable wins.
        for key in ["PORT", "THINKWELL_PORT"] {
            if let Some(port) = std::env::var(key).ok().and_then(|v| v.parse().ok()) {
                self.server.port = port;
            }
        }
        if let Some(max) = std::env::var("THINKWELL_MAX_THOUGHTS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.session.max_thoughts_per_session = max;
        }
        if let Ok(val) = std::env::var("THINKWELL_MODELS_PATH") {
            self.models.path = Some(val);
        }
    }

    /// Resolve the custom models path, expanding `~` if needed.
    pub fn resolved_models_path(&self) -> Option<PathBuf> {
        self.models.path.as_deref().map(expand_tilde)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
