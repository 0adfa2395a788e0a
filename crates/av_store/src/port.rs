//! Persistence ports — the only seams between the core and storage.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::models::{AssetRow, DeliveryRow, IdentityRow, TransferRow};

/// Keyed record storage for identities, assets, transfers, and deliveries.
#[async_trait]
pub trait MarketStore: Send + Sync {
    /// Insert a new identity. `Conflict` if the handle is already taken.
    async fn insert_identity(&self, row: IdentityRow) -> Result<(), StoreError>;

    async fn identity(&self, id: &str) -> Result<IdentityRow, StoreError>;

    /// Lookup by login handle. `None` is not an error — authentication
    /// maps it to a uniform credentials failure.
    async fn identity_by_handle(&self, handle: &str) -> Result<Option<IdentityRow>, StoreError>;

    async fn insert_asset(&self, row: AssetRow) -> Result<(), StoreError>;

    async fn asset(&self, id: &str) -> Result<AssetRow, StoreError>;

    /// Record a completed sale. MUST be atomic: check the asset is still
    /// available, flip it to unavailable, and insert the transfer as one
    /// unit. Of N concurrent calls for one asset, exactly one succeeds;
    /// the rest get `AssetUnavailable`.
    async fn record_transfer(&self, row: TransferRow) -> Result<(), StoreError>;

    async fn transfer(&self, id: &str) -> Result<TransferRow, StoreError>;

    /// Persist the derived verification cache. Idempotent.
    async fn set_transfer_verified(&self, id: &str, verified: bool) -> Result<(), StoreError>;

    async fn insert_delivery(&self, row: DeliveryRow) -> Result<(), StoreError>;
}

/// Opaque byte-buffer storage for encrypted asset files.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store a buffer, returning an opaque reference.
    async fn put(&self, bytes: Vec<u8>) -> Result<String, StoreError>;

    async fn get(&self, blob_ref: &str) -> Result<Vec<u8>, StoreError>;
}
