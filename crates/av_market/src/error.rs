use thiserror::Error;

use av_crypto::CryptoError;
use av_store::StoreError;

#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Invalid request: {0}")]
    Validation(String),

    /// Uniform whether the handle or the password was wrong.
    #[error("Invalid credentials")]
    Auth,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Asset is no longer available: {0}")]
    AssetUnavailable(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Cryptographic failure. Internal detail is logged, not returned.
    #[error("Cryptographic operation failed")]
    Crypto(#[source] CryptoError),
}

impl From<CryptoError> for MarketError {
    fn from(err: CryptoError) -> Self {
        MarketError::Crypto(err)
    }
}

impl From<StoreError> for MarketError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => MarketError::NotFound(what),
            StoreError::Conflict(what) => MarketError::Conflict(what),
            StoreError::AssetUnavailable(id) => MarketError::AssetUnavailable(id),
        }
    }
}
