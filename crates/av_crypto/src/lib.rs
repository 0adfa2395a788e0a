//! av_crypto — ArtVault cryptographic primitives
//!
//! # Design principles
//! - NO custom crypto; all primitives come from audited Rust crates.
//! - Zeroize all secret material on drop.
//! - Public APIs use opaque newtypes to prevent accidental key misuse.
//!
//! # Module layout
//! - `password` — Argon2id credential hashing (layer 1)
//! - `cipher`   — AES-256-CBC at-rest encryption (layer 2)
//! - `keypair`  — RSA-2048 keypair generation + PEM encoding
//! - `signer`   — SHA-256 hash-then-sign transfer certificates (layer 3)
//! - `envelope` — hybrid AES + RSA-OAEP delivery envelope (layer 4)
//! - `error`    — unified error type

pub mod cipher;
pub mod envelope;
pub mod error;
pub mod keypair;
pub mod password;
pub mod signer;

pub use error::CryptoError;
