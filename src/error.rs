//! Unified error type.

use thiserror::Error;

use crate::config::ConfigError;
use crate::store::StoreError;

/// The error type returned by the crate's fallible start-up and serving
/// operations.
///
/// Request-level outcomes (404, 500, ...) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// process-level failures: bad configuration, a store that cannot be opened,
/// or a port that cannot be bound.
#[derive(Debug, Error)]
pub enum Error {
    /// Binding the listener or another socket operation failed
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// The environment held an invalid setting
    #[error("config: {0}")]
    Config(#[from] ConfigError),

    /// The article store could not be opened
    #[error("store: {0}")]
    Store(#[from] StoreError),
}
