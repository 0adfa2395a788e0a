use thiserror::Error;

#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Symmetric key must be 32 bytes, got {0}")]
    InvalidKeyLength(usize),

    #[error("Decryption failed (wrong key, wrong IV, or tampered ciphertext)")]
    Decryption,

    #[error("Hybrid envelope operation failed")]
    Envelope,

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Hex decode error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Base64 decode error: {0}")]
    Base64Decode(#[from] base64::DecodeError),
}
