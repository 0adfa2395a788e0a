//! The transfer orchestrator.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use av_crypto::cipher::{self, SymmetricKey};
use av_crypto::password::CredentialHasher;
use av_crypto::{envelope, keypair, signer};
use av_proto::api::{
    DownloadResponse, LoginResponse, RegisterRequest, RegisterResponse, StoredAssetResponse,
    TransferReceipt,
};
use av_proto::{CertificateInput, HybridPackage};
use av_store::models::{AssetRow, DeliveryRow, IdentityRow, TransferRow};
use av_store::{BlobStore, MarketStore};

use crate::error::MarketError;
use crate::session::SessionTable;

/// Upper bound on uploaded asset buffers (32 MiB).
pub const MAX_ASSET_BYTES: usize = 32 * 1024 * 1024;

/// Sequences the four cryptographic layers over injected ports.
pub struct Marketplace {
    store: Arc<dyn MarketStore>,
    blobs: Arc<dyn BlobStore>,
    master_key: SymmetricKey,
    hasher: CredentialHasher,
    sessions: SessionTable,
}

impl Marketplace {
    pub fn new(
        store: Arc<dyn MarketStore>,
        blobs: Arc<dyn BlobStore>,
        master_key: SymmetricKey,
    ) -> Self {
        Self {
            store,
            blobs,
            master_key,
            hasher: CredentialHasher::default(),
            sessions: SessionTable::new(),
        }
    }

    /// Override the password work factor (e.g. cheap params in tests).
    pub fn with_hasher(mut self, hasher: CredentialHasher) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn sessions(&self) -> &SessionTable {
        &self.sessions
    }

    /// Register a new identity. Sellers and buyers get an RSA keypair; the
    /// private half stays in the identity record, never on the response.
    pub async fn register_identity(
        &self,
        req: RegisterRequest,
    ) -> Result<RegisterResponse, MarketError> {
        if req.handle.trim().is_empty() {
            return Err(MarketError::Validation("handle is required".into()));
        }
        if req.password.is_empty() {
            return Err(MarketError::Validation("password is required".into()));
        }

        let password_hash = self.hasher.hash(&req.password)?;

        let (public_pem, private_pem) = if req.role.needs_keypair() {
            let pair = keypair::generate()?;
            (
                Some(pair.public.as_str().to_string()),
                Some(pair.private.as_str().to_string()),
            )
        } else {
            (None, None)
        };

        let row = IdentityRow {
            id: Uuid::new_v4().to_string(),
            handle: req.handle.clone(),
            password_hash,
            role: req.role,
            public_key_pem: public_pem.clone(),
            private_key_pem: private_pem,
            created_at: Utc::now(),
        };
        let identity_id = row.id.clone();
        self.store.insert_identity(row).await?;

        let access_token = self.sessions.issue(&identity_id).await;
        info!(handle = %req.handle, role = ?req.role, "identity registered");

        Ok(RegisterResponse {
            identity_id,
            role: req.role,
            public_key_pem: public_pem,
            access_token,
        })
    }

    /// Authenticate by handle + password. The failure is uniform: an
    /// unknown handle and a wrong password are indistinguishable.
    pub async fn authenticate(
        &self,
        handle: &str,
        password: &str,
    ) -> Result<LoginResponse, MarketError> {
        let Some(identity) = self.store.identity_by_handle(handle).await? else {
            debug!("login failed: unknown handle");
            return Err(MarketError::Auth);
        };
        if !self.hasher.verify(password, &identity.password_hash) {
            debug!(identity = %identity.id, "login failed: bad password");
            return Err(MarketError::Auth);
        }

        let access_token = self.sessions.issue(&identity.id).await;
        info!(identity = %identity.id, "login ok");

        Ok(LoginResponse {
            identity_id: identity.id,
            handle: identity.handle,
            role: identity.role,
            access_token,
        })
    }

    /// Encrypt and store an asset's bytes under the master key. The
    /// plaintext is never persisted; only ciphertext reaches the blob store.
    pub async fn store_encrypted_asset(
        &self,
        owner_id: &str,
        title: &str,
        description: &str,
        price_usd: u64,
        bytes: &[u8],
    ) -> Result<StoredAssetResponse, MarketError> {
        if title.trim().is_empty() {
            return Err(MarketError::Validation("title is required".into()));
        }
        if bytes.is_empty() {
            return Err(MarketError::Validation("asset file is empty".into()));
        }
        if bytes.len() > MAX_ASSET_BYTES {
            return Err(MarketError::Validation(format!(
                "asset exceeds {MAX_ASSET_BYTES} bytes"
            )));
        }

        let owner = self.store.identity(owner_id).await?;
        if owner.role != av_proto::Role::Seller {
            return Err(MarketError::Forbidden("only sellers can upload assets".into()));
        }

        let (ciphertext, iv) = cipher::encrypt(&self.master_key, bytes)?;
        let blob_ref = self.blobs.put(ciphertext).await?;

        let row = AssetRow {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            price_usd,
            owner_id: owner_id.to_string(),
            blob_ref: blob_ref.clone(),
            iv_hex: hex::encode(iv),
            available: true,
            created_at: Utc::now(),
        };
        let asset_id = row.id.clone();
        let iv_hex = row.iv_hex.clone();
        self.store.insert_asset(row).await?;

        info!(asset = %asset_id, owner = %owner_id, size = bytes.len(), "asset encrypted and stored");

        Ok(StoredAssetResponse { asset_id, blob_ref, iv: iv_hex })
    }

    /// Create and sign a rights transfer. The certificate is hashed,
    /// signed with the seller's private key, and recorded atomically with
    /// the asset becoming unavailable.
    pub async fn create_transfer(
        &self,
        asset_id: &str,
        seller_id: &str,
        buyer_id: &str,
    ) -> Result<TransferReceipt, MarketError> {
        let asset = self.store.asset(asset_id).await?;
        if asset.owner_id != seller_id {
            return Err(MarketError::Forbidden(
                "asset does not belong to this seller".into(),
            ));
        }
        if !asset.available {
            return Err(MarketError::AssetUnavailable(asset_id.to_string()));
        }

        let seller = self.store.identity(seller_id).await?;
        let buyer = self.store.identity(buyer_id).await?;

        let Some(private_pem) = seller.private_key_pem else {
            return Err(MarketError::Validation("seller has no signing keys".into()));
        };
        let private = keypair::PrivateKeyPem::from_pem(private_pem);

        let signed_at = Utc::now();
        let certificate = CertificateInput {
            asset_id: asset.id.clone(),
            asset_title: asset.title.clone(),
            price_usd: asset.price_usd,
            seller_id: seller.id.clone(),
            seller_handle: seller.handle.clone(),
            buyer_id: buyer.id.clone(),
            buyer_handle: buyer.handle.clone(),
            issued_at: signed_at,
        }
        .render();

        let document_hash = signer::hash_document(&certificate);
        let signature = signer::sign(&document_hash, &private)?;

        let row = TransferRow {
            id: Uuid::new_v4().to_string(),
            asset_id: asset.id.clone(),
            seller_id: seller.id.clone(),
            buyer_id: buyer.id.clone(),
            certificate_text: certificate,
            document_hash: document_hash.clone(),
            signature: signature.clone(),
            verified: false,
            created_at: signed_at,
        };
        let transfer_id = row.id.clone();

        // Availability flip + insert are one atomic unit in the store; a
        // concurrent sale of the same asset loses here, not above.
        self.store.record_transfer(row).await?;

        info!(transfer = %transfer_id, asset = %asset_id, seller = %seller_id, buyer = %buyer_id,
              "transfer signed and recorded");

        Ok(TransferReceipt {
            transfer_id,
            asset_id: asset.id,
            seller_id: seller.id,
            buyer_id: buyer.id,
            document_hash,
            signature,
            signed_at,
        })
    }

    /// Re-verify a transfer's signature from the stored hash, signature,
    /// and seller public key, and persist the outcome as a derived cache.
    /// Idempotent; safe to repeat.
    pub async fn verify_transfer(&self, transfer_id: &str) -> Result<bool, MarketError> {
        let transfer = self.store.transfer(transfer_id).await?;
        let seller = self.store.identity(&transfer.seller_id).await?;

        let valid = match seller.public_key_pem {
            Some(pem) => signer::verify(
                &transfer.document_hash,
                &transfer.signature,
                &keypair::PublicKeyPem(pem),
            ),
            None => false,
        };

        self.store.set_transfer_verified(transfer_id, valid).await?;
        if valid {
            debug!(transfer = %transfer_id, "signature valid");
        } else {
            warn!(transfer = %transfer_id, "signature INVALID");
        }
        Ok(valid)
    }

    /// Decrypt the purchased asset with the master key and reseal it into
    /// a hybrid package under the buyer-of-record's public key.
    pub async fn prepare_download(
        &self,
        transfer_id: &str,
        buyer_id: &str,
    ) -> Result<DownloadResponse, MarketError> {
        let transfer = self.store.transfer(transfer_id).await?;
        if transfer.buyer_id != buyer_id {
            return Err(MarketError::Forbidden(
                "only the buyer of record may download".into(),
            ));
        }

        let asset = self.store.asset(&transfer.asset_id).await?;
        let buyer = self.store.identity(buyer_id).await?;
        let Some(public_pem) = buyer.public_key_pem else {
            return Err(MarketError::Validation("buyer has no receiving keys".into()));
        };

        let ciphertext = self.blobs.get(&asset.blob_ref).await?;
        let iv = hex::decode(&asset.iv_hex).map_err(av_crypto::CryptoError::from)?;
        let plaintext = cipher::decrypt(&self.master_key, &ciphertext, &iv)?;

        let sealed = envelope::seal(&plaintext, &keypair::PublicKeyPem(public_pem))?;
        let package = HybridPackage::from(sealed);

        let delivery = DeliveryRow {
            id: Uuid::new_v4().to_string(),
            transfer_id: transfer_id.to_string(),
            buyer_id: buyer_id.to_string(),
            wrapped_key_b64: package.encrypted_key.clone(),
            iv_hex: package.iv.clone(),
            completed: true,
            created_at: Utc::now(),
        };
        let download_id = delivery.id.clone();
        self.store.insert_delivery(delivery).await?;

        info!(transfer = %transfer_id, buyer = %buyer_id, download = %download_id,
              "hybrid package prepared");

        Ok(DownloadResponse {
            download_id,
            transfer_id: transfer_id.to_string(),
            package,
        })
    }
}

/// Open a delivery package with the buyer's own private key. Runs on the
/// buyer's client; the server never sees this key.
pub fn open_download(
    package: &HybridPackage,
    private: &keypair::PrivateKeyPem,
) -> Result<Vec<u8>, MarketError> {
    if !package.validate() {
        return Err(MarketError::Validation("malformed hybrid package".into()));
    }
    let sealed = package.to_sealed()?;
    let plaintext = envelope::open(&sealed.ciphertext, &sealed.wrapped_key, &sealed.iv, private)?;
    Ok(plaintext.to_vec())
}
