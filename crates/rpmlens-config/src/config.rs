use std::{
    fs,
    path::{Path, PathBuf},
    sync::{LazyLock, RwLock},
    time::Duration,
};

use documented::{Documented, DocumentedFields};
use serde::{Deserialize, Serialize};
use toml_edit::DocumentMut;
use tracing::info;

use crate::{
    annotations::annotate_toml_table,
    error::{ConfigError, Result},
    utils::{expand_path, xdg_config_home, xdg_data_home},
};

/// Pool limit used when none is configured or the configured value is 0.
pub use rpmlens_db::DEFAULT_POOL_LIMIT;
/// Default pool checkout timeout in seconds.
pub const DEFAULT_CONNECTION_TIMEOUT: u64 = rpmlens_db::DEFAULT_CONNECTION_TIMEOUT.as_secs();
/// Default SQLite busy timeout in milliseconds.
pub const DEFAULT_BUSY_TIMEOUT: u64 = rpmlens_db::DEFAULT_BUSY_TIMEOUT.as_millis() as u64;

/// Application's configuration
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct Config {
    /// Content store connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Content store connection settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct DatabaseConfig {
    /// Path to the SQLite content store.
    /// Default: $XDG_DATA_HOME/rpmlens/content.db
    pub path: Option<String>,

    /// Maximum number of pooled connections. 0 selects the default.
    /// Default: 20
    pub pool_limit: Option<u32>,

    /// Seconds to wait for a free pooled connection.
    /// Default: 30
    pub connection_timeout: Option<u64>,

    /// Milliseconds SQLite waits on a locked database before failing.
    /// Default: 5000
    pub busy_timeout: Option<u64>,
}

/// Logging settings. Command line flags take precedence.
#[derive(Clone, Debug, Default, Deserialize, Serialize, Documented, DocumentedFields)]
pub struct LogConfig {
    /// Log level: "error", "warn", "info", "debug" or "trace".
    /// Default: "info"
    pub level: Option<String>,

    /// Emit log events as JSON.
    /// Default: false
    pub json: Option<bool>,
}

pub static CONFIG: LazyLock<RwLock<Option<Config>>> = LazyLock::new(|| RwLock::new(None));

pub static CONFIG_PATH: LazyLock<RwLock<PathBuf>> = LazyLock::new(|| {
    RwLock::new(match std::env::var("RPMLENS_CONFIG") {
        Ok(path_str) => PathBuf::from(path_str),
        Err(_) => xdg_config_home().join("rpmlens").join("config.toml"),
    })
});

/// Loads the configuration file into the global config.
pub fn init() -> Result<()> {
    let config = Config::new()?;
    let mut global_config = CONFIG.write().unwrap();
    *global_config = Some(config);
    Ok(())
}

/// Points the global config at another file. Takes effect on the next [`init`].
pub fn set_config_path<P: AsRef<Path>>(path: P) {
    let mut config_path = CONFIG_PATH.write().unwrap();
    *config_path = path.as_ref().to_path_buf();
}

/// Returns the global config, falling back to defaults if [`init`] never ran.
pub fn get_config() -> Config {
    {
        let config_guard = CONFIG.read().unwrap();
        if let Some(config) = config_guard.as_ref() {
            return config.clone();
        }
    }

    let mut config_guard = CONFIG.write().unwrap();
    config_guard.get_or_insert_with(Config::default_config).clone()
}

impl Config {
    pub fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                path: Some(default_db_path()),
                pool_limit: Some(DEFAULT_POOL_LIMIT),
                connection_timeout: Some(DEFAULT_CONNECTION_TIMEOUT),
                busy_timeout: Some(DEFAULT_BUSY_TIMEOUT),
            },
            log: LogConfig {
                level: Some("info".to_string()),
                json: Some(false),
            },
        }
    }

    /// Creates a new configuration by loading it from the configuration file.
    /// If the configuration file is not found, it uses the default configuration.
    pub fn new() -> Result<Self> {
        let config_path = CONFIG_PATH.read().unwrap().to_path_buf();
        Self::load(&config_path)
    }

    /// Loads and resolves the configuration at `path`; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = match fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default_config(),
            Err(err) => return Err(ConfigError::IoError(err)),
        };

        config.resolve()?;

        Ok(config)
    }

    /// Applies environment overrides, fills unset fields with defaults and
    /// validates the result.
    pub fn resolve(&mut self) -> Result<()> {
        if let Ok(path) = std::env::var("RPMLENS_DB") {
            self.database.path = Some(path);
        }

        if let Ok(limit) = std::env::var("RPMLENS_POOL_LIMIT") {
            let parsed = limit.trim().parse::<u32>().map_err(|_| {
                ConfigError::InvalidValue {
                    key: "RPMLENS_POOL_LIMIT".into(),
                    value: limit.clone(),
                }
            })?;
            self.database.pool_limit = Some(parsed);
        }

        let db = &mut self.database;
        if db.path.as_deref().is_some_and(|p| p.trim().is_empty()) {
            return Err(ConfigError::EmptyDatabasePath);
        }
        db.path.get_or_insert_with(default_db_path);

        if matches!(db.pool_limit, None | Some(0)) {
            db.pool_limit = Some(DEFAULT_POOL_LIMIT);
        }
        db.connection_timeout.get_or_insert(DEFAULT_CONNECTION_TIMEOUT);
        db.busy_timeout.get_or_insert(DEFAULT_BUSY_TIMEOUT);

        self.log.level.get_or_insert_with(|| "info".to_string());
        self.log.json.get_or_insert(false);

        Ok(())
    }

    pub fn get_db_path(&self) -> PathBuf {
        let path = self
            .database
            .path
            .clone()
            .unwrap_or_else(default_db_path);
        expand_path(&path)
    }

    pub fn pool_limit(&self) -> u32 {
        match self.database.pool_limit {
            Some(0) | None => DEFAULT_POOL_LIMIT,
            Some(limit) => limit,
        }
    }

    pub fn connection_timeout(&self) -> Duration {
        Duration::from_secs(
            self.database
                .connection_timeout
                .unwrap_or(DEFAULT_CONNECTION_TIMEOUT),
        )
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.database.busy_timeout.unwrap_or(DEFAULT_BUSY_TIMEOUT))
    }

    pub fn to_annotated_document(&self) -> Result<DocumentMut> {
        let toml_string = toml::to_string_pretty(self)?;
        let mut doc = toml_string.parse::<DocumentMut>()?;

        annotate_toml_table::<Config>(doc.as_table_mut(), true)?;

        if let Some(table) = doc.get_mut("database").and_then(|i| i.as_table_mut()) {
            annotate_toml_table::<DatabaseConfig>(table, true)?;
        }

        if let Some(table) = doc.get_mut("log").and_then(|i| i.as_table_mut()) {
            annotate_toml_table::<LogConfig>(table, true)?;
        }

        Ok(doc)
    }
}

fn default_db_path() -> String {
    xdg_data_home()
        .join("rpmlens")
        .join("content.db")
        .display()
        .to_string()
}

/// Writes the annotated default configuration to [`CONFIG_PATH`].
///
/// Refuses to overwrite an existing file.
pub fn generate_default_config() -> Result<PathBuf> {
    let config_path = CONFIG_PATH.read().unwrap().to_path_buf();

    if config_path.exists() {
        return Err(ConfigError::ConfigAlreadyExists);
    }

    let annotated_doc = Config::default_config().to_annotated_document()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(&config_path, annotated_doc.to_string())?;
    info!(
        "Default configuration file generated with documentation at: {}",
        config_path.display()
    );
    Ok(config_path)
}
