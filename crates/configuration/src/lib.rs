use crate::error::ConfigError;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{DatabaseBackend, DatabaseSettings, LoggingSettings, ServerSettings, Settings};

/// Name of the optional configuration file, looked up in the working directory.
pub const CONFIG_FILE: &str = "config.toml";
/// Environment overrides look like `STUDENTS__SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "STUDENTS";

/// A single command-line override, e.g. `("server.port", 8080.into())`.
pub type Override = (&'static str, config::Value);

/// Loads the application configuration.
///
/// Sources, from lowest to highest precedence: built-in defaults, the optional
/// `config.toml` file, then `STUDENTS__*` environment variables. When no
/// database URL is configured, `DATABASE_URL` is used.
///
/// `overrides` (typically command-line flags) take precedence over all of them.
pub fn load_config(overrides: Vec<Override>) -> Result<Settings, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::with_name(CONFIG_FILE).required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

    let mut settings = with_overrides(builder, overrides)?
        .build()?
        .try_deserialize::<Settings>()?;
    if settings.database.url.is_none() {
        settings.database.url = std::env::var("DATABASE_URL").ok();
    }
    settings.validate()?;
    Ok(settings)
}

/// Loads settings from TOML text layered over the defaults, then `overrides`.
/// Neither `config.toml` nor the environment is consulted.
pub fn load_config_from_str(toml: &str, overrides: Vec<Override>) -> Result<Settings, ConfigError> {
    let builder = with_defaults(config::Config::builder())?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml));

    let settings = with_overrides(builder, overrides)?
        .build()?
        .try_deserialize::<Settings>()?;
    settings.validate()?;
    Ok(settings)
}

fn with_overrides(
    mut builder: config::ConfigBuilder<config::builder::DefaultState>,
    overrides: Vec<Override>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    for (key, value) in overrides {
        builder = builder.set_override(key, value)?;
    }
    Ok(builder)
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    Ok(builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 3000)?
        .set_default("database.backend", "postgres")?
        .set_default("database.max_connections", 10)?
        .set_default("database.acquire_timeout_secs", 5)?
        .set_default("logging.level", "info")?)
}
