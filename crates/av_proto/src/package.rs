//! Hybrid delivery package — what the buyer's client receives.
//!
//! Wire encodings match the original storage format: base64 for the
//! ciphertext and wrapped key, hex for the IV.

use base64::{engine::general_purpose::STANDARD as B64, Engine as _};
use serde::{Deserialize, Serialize};

use av_crypto::cipher::IV_LEN;
use av_crypto::envelope::SealedEnvelope;
use av_crypto::CryptoError;

/// RSA-2048 wraps a key into exactly this many bytes.
const WRAPPED_KEY_LEN: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HybridPackage {
    /// AES-256-CBC ciphertext of the payload, base64.
    pub encrypted_data: String,
    /// One-time AES key, RSA-OAEP-encrypted to the recipient, base64.
    pub encrypted_key: String,
    /// 16-byte IV, hex.
    pub iv: String,
}

impl HybridPackage {
    /// Structural well-formedness check — runs before any crypto and never
    /// touches key material. Rejects fast on malformed input.
    pub fn validate(&self) -> bool {
        if self.encrypted_data.is_empty() || self.encrypted_key.is_empty() || self.iv.is_empty() {
            return false;
        }
        let Ok(data) = B64.decode(&self.encrypted_data) else {
            return false;
        };
        let Ok(key) = B64.decode(&self.encrypted_key) else {
            return false;
        };
        let Ok(iv) = hex::decode(&self.iv) else {
            return false;
        };
        !data.is_empty() && key.len() == WRAPPED_KEY_LEN && iv.len() == IV_LEN
    }

    /// Decode back into raw envelope parts for [`av_crypto::envelope::open`].
    pub fn to_sealed(&self) -> Result<SealedEnvelope, CryptoError> {
        let ciphertext = B64.decode(&self.encrypted_data)?;
        let wrapped_key = B64.decode(&self.encrypted_key)?;
        let iv_bytes = hex::decode(&self.iv)?;
        let iv: [u8; IV_LEN] = iv_bytes
            .try_into()
            .map_err(|_| CryptoError::Envelope)?;
        Ok(SealedEnvelope { ciphertext, wrapped_key, iv })
    }
}

impl From<SealedEnvelope> for HybridPackage {
    fn from(sealed: SealedEnvelope) -> Self {
        Self {
            encrypted_data: B64.encode(&sealed.ciphertext),
            encrypted_key: B64.encode(&sealed.wrapped_key),
            iv: hex::encode(sealed.iv),
        }
    }
}
