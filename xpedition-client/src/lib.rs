pub mod app_config;
pub mod http_backend;

pub use app_config::Config;
pub use http_backend::HttpBackend;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
