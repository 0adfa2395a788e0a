//! Request/response types shared between the core and the web boundary.
//! These map directly to JSON bodies; no transport detail is mandated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::package::HybridPackage;

/// Marketplace role. A closed enum — role checks are exhaustive matches,
/// never string comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Seller,
    Buyer,
    Admin,
}

impl Role {
    /// Whether this role signs certificates or receives deliveries, and
    /// therefore needs an RSA keypair at registration.
    pub fn needs_keypair(&self) -> bool {
        matches!(self, Role::Seller | Role::Buyer)
    }
}

// ── Identity ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub handle: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub identity_id: String,
    pub role: Role,
    /// SPKI PEM, present iff the role needs a keypair. The private half
    /// never appears on any response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_key_pem: Option<String>,
    pub access_token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub handle: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub identity_id: String,
    pub handle: String,
    pub role: Role,
    /// Opaque bearer credential.
    pub access_token: String,
}

// ── Assets & transfers ───────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct StoredAssetResponse {
    pub asset_id: String,
    pub blob_ref: String,
    /// IV of the at-rest encryption, hex. Stored, not secret.
    pub iv: String,
}

/// The signed transfer document, as returned to both parties.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub transfer_id: String,
    pub asset_id: String,
    pub seller_id: String,
    pub buyer_id: String,
    /// SHA-256 of the certificate text, hex.
    pub document_hash: String,
    /// RSA signature over the document hash, hex.
    pub signature: String,
    pub signed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub download_id: String,
    pub transfer_id: String,
    pub package: HybridPackage,
}

// ── Common ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serialises_snake_case() {
        assert_eq!(serde_json::to_string(&Role::Seller).unwrap(), "\"seller\"");
        let role: Role = serde_json::from_str("\"buyer\"").unwrap();
        assert_eq!(role, Role::Buyer);
    }

    #[test]
    fn keypair_capability_by_role() {
        assert!(Role::Seller.needs_keypair());
        assert!(Role::Buyer.needs_keypair());
        assert!(!Role::Admin.needs_keypair());
    }

    #[test]
    fn register_response_omits_absent_public_key() {
        let resp = RegisterResponse {
            identity_id: "id-1".into(),
            role: Role::Admin,
            public_key_pem: None,
            access_token: "tok".into(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(!json.contains("public_key_pem"));
    }
}
