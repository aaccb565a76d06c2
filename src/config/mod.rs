//! Layered application configuration

mod app_config;

pub use app_config::{AppConfig, CorpusConfig, LogFormat, LoggingConfig, ProvidersConfig};
