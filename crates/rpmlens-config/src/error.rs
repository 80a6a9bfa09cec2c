use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("TOML serialization error: {0}")]
    #[diagnostic(
        code(rpmlens_config::toml_serialize),
        help("Check your configuration structure for invalid values")
    )]
    TomlSerError(#[from] toml::ser::Error),

    #[error("TOML deserialization error: {0}")]
    #[diagnostic(
        code(rpmlens_config::toml_deserialize),
        help("Check your config.toml syntax and structure")
    )]
    TomlDeError(#[from] toml::de::Error),

    #[error("Configuration file already exists")]
    #[diagnostic(
        code(rpmlens_config::already_exists),
        help("Remove the existing config file or use a different location")
    )]
    ConfigAlreadyExists,

    #[error("Database path must not be empty")]
    #[diagnostic(
        code(rpmlens_config::empty_db_path),
        help("Set database.path in config.toml or the RPMLENS_DB environment variable")
    )]
    EmptyDatabasePath,

    #[error("Invalid value for {key}: {value}")]
    #[diagnostic(
        code(rpmlens_config::invalid_value),
        help("Environment overrides must hold a value of the same type as the config field")
    )]
    InvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    #[diagnostic(code(rpmlens_config::io))]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    #[diagnostic(code(rpmlens_config::toml))]
    Toml(#[from] toml_edit::TomlError),

    #[error("Encountered unexpected TOML item: {0}")]
    #[diagnostic(code(rpmlens_config::unexpected_toml_item))]
    UnexpectedTomlItem(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
