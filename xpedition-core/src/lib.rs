pub mod backend;
pub mod config;
pub mod filter;
pub mod search;
pub mod theme;

pub use backend::{BackendError, TravelBackend};
pub use config::UiConfig;
pub use filter::{FilterState, OfferAttributes, PriceRange, StopBucket};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
