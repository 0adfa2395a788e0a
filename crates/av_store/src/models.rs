//! Record shapes — these map to rows in whatever backend implements the
//! ports. Sensitive fields hold ciphertext or one-way hashes; plaintext
//! asset bytes and passwords never appear here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use av_proto::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRow {
    pub id: String,
    /// Unique login handle.
    pub handle: String,
    /// Argon2id PHC token — one-way, never reversible. Replaced wholesale
    /// on a password change.
    pub password_hash: String,
    pub role: Role,
    /// SPKI PEM, present iff the role signs or receives.
    pub public_key_pem: Option<String>,
    /// PKCS#8 PEM. Server-side only; no boundary operation returns it.
    pub private_key_pem: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price_usd: u64,
    pub owner_id: String,
    /// Opaque reference into the blob store; the blob is AES ciphertext.
    pub blob_ref: String,
    /// IV of the at-rest encryption, hex.
    pub iv_hex: String,
    /// Flipped to false atomically with transfer creation.
    pub available: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferRow {
    pub id: String,
    pub asset_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    /// Canonical certificate text, exactly as hashed and signed.
    pub certificate_text: String,
    /// SHA-256 of the certificate text, hex.
    pub document_hash: String,
    /// Seller's RSA signature over the hash, hex.
    pub signature: String,
    /// Derived cache only — re-verification from (hash, signature, public
    /// key) must always be possible.
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRow {
    pub id: String,
    pub transfer_id: String,
    pub buyer_id: String,
    /// One-time AES key wrapped to the buyer, base64.
    pub wrapped_key_b64: String,
    pub iv_hex: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}
