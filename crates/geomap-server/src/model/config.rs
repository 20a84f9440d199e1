//! Configuration management for the Geomap server
//!
//! Values come from `conf/application.yml`, then `GEOMAP_`-prefixed environment
//! variables (`GEOMAP_DB__URL` sets `db.url`), then command line flags. Later
//! layers override earlier ones.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use config::{Config, Environment, File};
use geomap_persistence::StorageMode;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use super::constants::*;
use crate::startup::LoggingConfig;

/// Command line arguments for the server
#[derive(Debug, Default, Parser)]
#[command(name = "geomap-server", about = "CRUD web service for geometric map objects")]
pub struct Cli {
    /// Storage backend: sql, orm or memory
    #[arg(short = 's', long = "storage")]
    pub storage: Option<String>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    pub database_url: Option<String>,
    #[arg(short = 'p', long = "port")]
    pub port: Option<u16>,
    /// Path of the YAML configuration file
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
}

/// `GEOMAP_`-prefixed variables, `__` between key segments
fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    /// Load configuration using the process command line
    pub fn new() -> anyhow::Result<Self> {
        Self::from_cli(Cli::parse())
    }

    pub fn from_cli(args: Cli) -> anyhow::Result<Self> {
        let mut config_builder = Config::builder()
            .add_source(File::with_name(&args.config_file).required(false))
            .add_source(environment());

        if let Some(v) = args.storage {
            config_builder = config_builder.set_override(STORAGE_MODE, v)?;
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder.set_override(DB_URL, v)?;
        }
        if let Some(v) = args.port {
            config_builder = config_builder.set_override(SERVER_PORT, i64::from(v))?;
        }

        let app_config = config_builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", args.config_file))?;

        Ok(Self::from_config(app_config))
    }

    pub fn from_config(config: Config) -> Self {
        Configuration { config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT)
            .ok()
            .and_then(|v| u16::try_from(v).ok())
            .unwrap_or(DEFAULT_SERVER_PORT)
    }

    /// Context path without surrounding slashes
    pub fn server_context_path(&self) -> String {
        self.config
            .get_string(SERVER_CONTEXT_PATH)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string())
            .trim_matches('/')
            .to_string()
    }

    pub fn cors_allowed_origin(&self) -> String {
        self.config
            .get_string(SERVER_CORS_ALLOWED_ORIGIN)
            .unwrap_or(DEFAULT_ALLOWED_ORIGIN.to_string())
    }

    // ========================================================================
    // Storage Configuration
    // ========================================================================

    pub fn storage_mode(&self) -> anyhow::Result<StorageMode> {
        let value = self
            .config
            .get_string(STORAGE_MODE)
            .unwrap_or(DEFAULT_STORAGE_MODE.to_string());
        value.parse().map_err(|e: String| anyhow::anyhow!(e))
    }

    pub fn auto_create_schema(&self) -> bool {
        self.config.get_bool(DB_AUTO_CREATE_SCHEMA).unwrap_or(false)
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let max_connections = self
            .config
            .get_int("db.pool.config.maximumPoolSize")
            .unwrap_or(20) as u32;
        let min_connections = self
            .config
            .get_int("db.pool.config.minimumPoolSize")
            .unwrap_or(1) as u32;
        let connect_timeout = self
            .config
            .get_int("db.pool.config.connectionTimeout")
            .unwrap_or(30) as u64;
        let acquire_timeout = self
            .config
            .get_int("db.pool.config.acquireTimeout")
            .unwrap_or(8) as u64;
        let idle_timeout = self
            .config
            .get_int("db.pool.config.idleTimeout")
            .unwrap_or(10) as u64;
        let max_lifetime = self
            .config
            .get_int("db.pool.config.maxLifetime")
            .unwrap_or(1800) as u64;
        let sqlx_logging = self
            .config
            .get_bool("db.pool.config.sqlxLogging")
            .unwrap_or(false);

        let url = self
            .config
            .get_string(DB_URL)
            .context("db.url is required for database storage modes")?;

        let mut opt = ConnectOptions::new(url);

        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(connect_timeout))
            .acquire_timeout(Duration::from_secs(acquire_timeout))
            .idle_timeout(Duration::from_secs(idle_timeout))
            .max_lifetime(Duration::from_secs(max_lifetime))
            .sqlx_logging(sqlx_logging);

        tracing::info!(
            max_connections = max_connections,
            min_connections = min_connections,
            connect_timeout = connect_timeout,
            idle_timeout = idle_timeout,
            max_lifetime = max_lifetime,
            sqlx_logging = sqlx_logging,
            "Database connection pool configured"
        );

        let database_connection: DatabaseConnection = Database::connect(opt).await?;

        Ok(database_connection)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        let defaults = LoggingConfig::from_env();
        LoggingConfig::from_config(
            self.config
                .get_string(LOGGING_DIR)
                .ok()
                .or_else(|| Some(defaults.log_dir.display().to_string())),
            self.config
                .get_bool(LOGGING_CONSOLE)
                .unwrap_or(defaults.console_output),
            self.config
                .get_bool(LOGGING_FILE)
                .unwrap_or(defaults.file_logging),
            self.config
                .get_string(LOGGING_LEVEL)
                .unwrap_or(defaults.console_level.to_string()),
        )
        .with_rotation(
            self.config
                .get_string(LOGGING_ROTATION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.rotation),
        )
    }
}
