//! Configuration keys and defaults

pub const SERVER_ADDRESS: &str = "server.address";
pub const SERVER_PORT: &str = "server.port";
pub const SERVER_CONTEXT_PATH: &str = "server.contextPath";
pub const SERVER_CORS_ALLOWED_ORIGIN: &str = "server.cors.allowedOrigin";

pub const STORAGE_MODE: &str = "geomap.storage.mode";

pub const DB_URL: &str = "db.url";
pub const DB_AUTO_CREATE_SCHEMA: &str = "db.autoCreateSchema";

pub const LOGGING_DIR: &str = "logging.dir";
pub const LOGGING_LEVEL: &str = "logging.level";
pub const LOGGING_CONSOLE: &str = "logging.console";
pub const LOGGING_FILE: &str = "logging.file";
pub const LOGGING_ROTATION: &str = "logging.rotation";

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_CONTEXT_PATH: &str = "api";
/// Dev server origin of the map editor
pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";
pub const DEFAULT_STORAGE_MODE: &str = "sql";
pub const DEFAULT_CONFIG_FILE: &str = "conf/application.yml";

/// Prefix for environment overrides, e.g. `GEOMAP_SERVER__PORT` sets `server.port`
pub const ENV_PREFIX: &str = "geomap";
