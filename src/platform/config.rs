// CompanyScope - platform/config.rs
//
// Platform-specific configuration directory resolution and config.toml
// loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::sort::{SortKey, SortOrder, SortSpec};
use crate::util::constants;
use crate::util::error::{self, ConfigError};
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for CompanyScope configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/companyscope/ or %APPDATA%\CompanyScope\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    /// Location of config.toml.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[data]` section.
    pub data: DataSection,
    /// `[view]` section.
    pub view: ViewSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[data]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// URL or file path of the record collection.
    pub source: Option<String>,
}

/// `[view]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ViewSection {
    /// Rows per table page.
    pub page_size: Option<usize>,
    /// Initial sort column: "name", "country", "industry", "numberOfEmployees" or "none".
    pub sort_key: Option<String>,
    /// Initial sort direction: "asc" or "desc".
    pub sort_order: Option<String>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// URL or file path of the record collection.
    pub source: String,

    /// Rows per table page.
    pub page_size: usize,

    /// Initial sort. `None` keeps the source order.
    pub sort: Option<SortSpec>,

    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source: constants::DEFAULT_SOURCE_URL.to_string(),
            page_size: constants::DEFAULT_PAGE_SIZE,
            sort: Some(SortSpec::default()),
            log_level: None,
        }
    }
}

/// Load and validate `config.toml` from the given config directory.
pub fn load_config(config_dir: &Path) -> (AppConfig, Vec<ConfigError>) {
    load_config_file(&config_dir.join(constants::CONFIG_FILE_NAME))
}

/// Load and validate a config file.
///
/// Returns `AppConfig` with validated values and a list of non-fatal problems.
/// If the file does not exist, returns defaults with no warnings (first run).
/// If the file is unreadable or unparseable, returns defaults with one warning;
/// the application still starts.
pub fn load_config_file(config_path: &Path) -> (AppConfig, Vec<ConfigError>) {
    let mut warnings: Vec<ConfigError> = Vec::new();

    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), warnings);
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            warnings.push(ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            warnings.push(ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            });
            return (AppConfig::default(), warnings);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");

    let config = validate(raw, &mut warnings);

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

/// Load a config file and reject it on the first problem instead of falling
/// back to defaults.
pub fn load_config_strict(config_path: &Path) -> error::Result<AppConfig> {
    let (config, warnings) = load_config_file(config_path);
    match warnings.into_iter().next() {
        Some(first) => Err(first.into()),
        None => Ok(config),
    }
}

/// Validate each field against named constants, accumulating all problems.
fn validate(raw: RawConfig, warnings: &mut Vec<ConfigError>) -> AppConfig {
    let mut config = AppConfig::default();

    // -- Data: source --
    if let Some(source) = raw.data.source {
        let source = source.trim();
        if source.is_empty() {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[data] source".to_string(),
                value: String::new(),
                expected: "a URL or file path".to_string(),
            });
        } else {
            config.source = source.to_string();
        }
    }

    // -- View: page_size --
    if let Some(size) = raw.view.page_size {
        if (constants::MIN_PAGE_SIZE..=constants::MAX_PAGE_SIZE).contains(&size) {
            config.page_size = size;
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[view] page_size".to_string(),
                value: size.to_string(),
                expected: format!(
                    "{}-{} (using default {})",
                    constants::MIN_PAGE_SIZE,
                    constants::MAX_PAGE_SIZE,
                    constants::DEFAULT_PAGE_SIZE
                ),
            });
        }
    }

    // -- View: sort_order --
    let mut order = SortOrder::default();
    if let Some(ref raw_order) = raw.view.sort_order {
        match raw_order.parse::<SortOrder>() {
            Ok(parsed) => order = parsed,
            Err(_) => warnings.push(ConfigError::ValueOutOfRange {
                field: "[view] sort_order".to_string(),
                value: raw_order.clone(),
                expected: "\"asc\" or \"desc\" (using asc)".to_string(),
            }),
        }
    }

    // -- View: sort_key --
    config.sort = match raw.view.sort_key.as_deref() {
        None => Some(SortSpec::new(SortKey::default(), order)),
        Some(key) if key.eq_ignore_ascii_case("none") => None,
        Some(key) => match key.parse::<SortKey>() {
            Ok(parsed) => Some(SortSpec::new(parsed, order)),
            Err(_) => {
                warnings.push(ConfigError::ValueOutOfRange {
                    field: "[view] sort_key".to_string(),
                    value: key.to_string(),
                    expected: "name, country, industry, numberOfEmployees or none (using name)"
                        .to_string(),
                });
                Some(SortSpec::new(SortKey::default(), order))
            }
        },
    };

    // -- Logging: level --
    if let Some(level) = raw.logging.level {
        if constants::VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level);
        } else {
            warnings.push(ConfigError::ValueOutOfRange {
                field: "[logging] level".to_string(),
                value: level,
                expected: "error, warn, info, debug or trace (using info)".to_string(),
            });
        }
    }

    config
}
