use config::{Config, ConfigError, File};
use extractors::SelectorConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_API_BASE_URL: &str = "https://api.creationinternational.co";
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ImporterConfig {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub watcher: WatcherConfig,
    /// Per-field selector overrides; unset fields keep the built-in lists
    pub selectors: Option<SelectorConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct StorageConfig {
    pub db_path: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct ExportConfig {
    pub directory: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(default)]
pub struct WatcherConfig {
    pub debounce_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "https://api.creationinternational.co"

[storage]
# Defaults to the platform data directory
# db_path = "/path/to/storage.sqlite3"

[export]
# Defaults to the current directory
# directory = "/path/to/exports"

[watcher]
debounce_ms = 500

# Override any selector list when the host page markup changes, e.g.
# [selectors]
# trigger = ['[data-testid="ai-personalizer-button"]']
# title = ['[class*="headline"]', '[class*="job-title"]']
"#;

impl ImporterConfig {
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();
        let config = Self::load_from(&config_path)?;
        Ok((config, config_path))
    }

    /// Reads `config_path`, writing the commented default file first when it
    /// does not exist.
    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .build()?;

        builder.try_deserialize()
    }

    pub fn save(&self, config_path: &Path) -> Result<(), ConfigError> {
        let toml_string = toml::to_string(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        std::fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config: {e}")))
    }

    pub fn selectors(&self) -> SelectorConfig {
        self.selectors.clone().unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("contact-import").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
