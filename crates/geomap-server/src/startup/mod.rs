//! Server bootstrap: logging, storage backend selection and the HTTP listener

pub mod http;
pub mod logging;
pub mod storage;

pub use http::main_server;
pub use logging::{LogRotation, LoggingConfig, LoggingGuard, init_logging};
pub use storage::create_persistence;
