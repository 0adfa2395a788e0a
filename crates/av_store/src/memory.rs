//! In-memory store — backs tests and demos.
//!
//! All state sits behind one `tokio::sync::RwLock`, which doubles as the
//! atomicity unit for [`MarketStore::record_transfer`]: the availability
//! check, the flag flip, and the insert happen under a single write guard,
//! so concurrent purchases of one asset serialize and exactly one wins.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{AssetRow, DeliveryRow, IdentityRow, TransferRow};
use crate::port::{BlobStore, MarketStore};

#[derive(Default)]
struct State {
    identities: HashMap<String, IdentityRow>,
    handles: HashMap<String, String>, // handle -> identity id
    assets: HashMap<String, AssetRow>,
    transfers: HashMap<String, TransferRow>,
    deliveries: HashMap<String, DeliveryRow>,
    blobs: HashMap<String, Vec<u8>>,
}

/// Cheap to clone (Arc internally).
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MarketStore for MemoryStore {
    async fn insert_identity(&self, row: IdentityRow) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        if state.handles.contains_key(&row.handle) {
            return Err(StoreError::Conflict(format!("handle {} taken", row.handle)));
        }
        state.handles.insert(row.handle.clone(), row.id.clone());
        state.identities.insert(row.id.clone(), row);
        Ok(())
    }

    async fn identity(&self, id: &str) -> Result<IdentityRow, StoreError> {
        self.inner
            .read()
            .await
            .identities
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("identity {id}")))
    }

    async fn identity_by_handle(&self, handle: &str) -> Result<Option<IdentityRow>, StoreError> {
        let state = self.inner.read().await;
        Ok(state
            .handles
            .get(handle)
            .and_then(|id| state.identities.get(id))
            .cloned())
    }

    async fn insert_asset(&self, row: AssetRow) -> Result<(), StoreError> {
        self.inner.write().await.assets.insert(row.id.clone(), row);
        Ok(())
    }

    async fn asset(&self, id: &str) -> Result<AssetRow, StoreError> {
        self.inner
            .read()
            .await
            .assets
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("asset {id}")))
    }

    async fn record_transfer(&self, row: TransferRow) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let asset = state
            .assets
            .get_mut(&row.asset_id)
            .ok_or_else(|| StoreError::NotFound(format!("asset {}", row.asset_id)))?;
        if !asset.available {
            return Err(StoreError::AssetUnavailable(row.asset_id.clone()));
        }
        asset.available = false;
        state.transfers.insert(row.id.clone(), row);
        Ok(())
    }

    async fn transfer(&self, id: &str) -> Result<TransferRow, StoreError> {
        self.inner
            .read()
            .await
            .transfers
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("transfer {id}")))
    }

    async fn set_transfer_verified(&self, id: &str, verified: bool) -> Result<(), StoreError> {
        let mut state = self.inner.write().await;
        let row = state
            .transfers
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("transfer {id}")))?;
        row.verified = verified;
        Ok(())
    }

    async fn insert_delivery(&self, row: DeliveryRow) -> Result<(), StoreError> {
        self.inner.write().await.deliveries.insert(row.id.clone(), row);
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryStore {
    async fn put(&self, bytes: Vec<u8>) -> Result<String, StoreError> {
        let blob_ref = Uuid::new_v4().to_string();
        self.inner.write().await.blobs.insert(blob_ref.clone(), bytes);
        Ok(blob_ref)
    }

    async fn get(&self, blob_ref: &str) -> Result<Vec<u8>, StoreError> {
        self.inner
            .read()
            .await
            .blobs
            .get(blob_ref)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("blob {blob_ref}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use av_proto::Role;
    use chrono::Utc;

    fn asset(id: &str) -> AssetRow {
        AssetRow {
            id: id.into(),
            title: "Sunset.png".into(),
            description: String::new(),
            price_usd: 150,
            owner_id: "seller-1".into(),
            blob_ref: "blob-1".into(),
            iv_hex: "00".repeat(16),
            available: true,
            created_at: Utc::now(),
        }
    }

    fn transfer(id: &str, asset_id: &str) -> TransferRow {
        TransferRow {
            id: id.into(),
            asset_id: asset_id.into(),
            seller_id: "seller-1".into(),
            buyer_id: format!("buyer-{id}"),
            certificate_text: "cert".into(),
            document_hash: "00".repeat(32),
            signature: "sig".into(),
            verified: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_handle_conflicts() {
        let store = MemoryStore::new();
        let row = IdentityRow {
            id: "id-1".into(),
            handle: "alice".into(),
            password_hash: "$argon2id$...".into(),
            role: Role::Seller,
            public_key_pem: None,
            private_key_pem: None,
            created_at: Utc::now(),
        };
        store.insert_identity(row.clone()).await.unwrap();

        let mut again = row;
        again.id = "id-2".into();
        assert!(matches!(
            store.insert_identity(again).await,
            Err(StoreError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn record_transfer_flips_availability() {
        let store = MemoryStore::new();
        store.insert_asset(asset("a1")).await.unwrap();
        store.record_transfer(transfer("t1", "a1")).await.unwrap();
        assert!(!store.asset("a1").await.unwrap().available);

        // Second sale of the same asset is rejected.
        assert!(matches!(
            store.record_transfer(transfer("t2", "a1")).await,
            Err(StoreError::AssetUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_transfers_yield_one_winner() {
        let store = MemoryStore::new();
        store.insert_asset(asset("a1")).await.unwrap();

        let mut handles = Vec::new();
        for n in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.record_transfer(transfer(&format!("t{n}"), "a1")).await
            }));
        }

        let mut wins = 0;
        let mut unavailable = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(()) => wins += 1,
                Err(StoreError::AssetUnavailable(_)) => unavailable += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!(wins, 1);
        assert_eq!(unavailable, 7);
    }

    #[tokio::test]
    async fn blob_roundtrip() {
        let store = MemoryStore::new();
        let blob_ref = BlobStore::put(&store, vec![1, 2, 3]).await.unwrap();
        assert_eq!(BlobStore::get(&store, &blob_ref).await.unwrap(), vec![1, 2, 3]);
        assert!(matches!(
            BlobStore::get(&store, "missing").await,
            Err(StoreError::NotFound(_))
        ));
    }
}
