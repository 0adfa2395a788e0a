//! Symmetric at-rest encryption — AES-256-CBC with PKCS#7 padding.
//!
//! Key size: 32 bytes. IV: 16 bytes, generated fresh from the OS RNG on
//! every encrypt call — never derived, never reused.
//!
//! CBC carries no authentication tag; tampering surfaces as an unpad
//! failure on decrypt, which is mapped to [`CryptoError::Decryption`].
//! A decrypt failure is always an error, never silently-returned garbage.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::RngCore;
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::error::CryptoError;

pub const KEY_LEN: usize = 32;
pub const IV_LEN: usize = 16;

type Aes256CbcEnc = cbc::Encryptor<aes::Aes256>;
type Aes256CbcDec = cbc::Decryptor<aes::Aes256>;

/// 32-byte AES key. Zeroized on drop.
#[derive(ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_LEN]);

impl SymmetricKey {
    /// Fresh random key from the OS RNG.
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::rngs::OsRng.fill_bytes(&mut key);
        Self(key)
    }

    /// Wrap externally supplied key bytes; anything but 32 bytes is rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        let arr: [u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| CryptoError::InvalidKeyLength(bytes.len()))?;
        Ok(Self(arr))
    }

    /// Parse a hex-encoded key (64 hex chars), e.g. from configuration.
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(s)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Generate a fresh random 16-byte IV.
pub fn generate_iv() -> [u8; IV_LEN] {
    let mut iv = [0u8; IV_LEN];
    rand::rngs::OsRng.fill_bytes(&mut iv);
    iv
}

/// Encrypt a byte buffer. Returns (ciphertext, iv); the IV is unique to
/// this call and must be stored alongside the ciphertext.
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<(Vec<u8>, [u8; IV_LEN]), CryptoError> {
    let iv = generate_iv();
    let enc = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
        .map_err(|_| CryptoError::InvalidKeyLength(key.as_bytes().len()))?;
    let ciphertext = enc.encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    Ok((ciphertext, iv))
}

/// Decrypt a byte buffer with the key and IV used at encrypt time.
///
/// Wrong key, wrong IV, or tampered ciphertext all produce
/// [`CryptoError::Decryption`].
pub fn decrypt(
    key: &SymmetricKey,
    ciphertext: &[u8],
    iv: &[u8],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let dec =
        Aes256CbcDec::new_from_slices(key.as_bytes(), iv).map_err(|_| CryptoError::Decryption)?;
    let plaintext = dec
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::Decryption)?;
    Ok(Zeroizing::new(plaintext))
}

/// Encrypt a text field for at-rest storage. Returns hex-encoded
/// (ciphertext, iv) suitable for string columns.
pub fn encrypt_text(key: &SymmetricKey, text: &str) -> Result<(String, String), CryptoError> {
    let (ct, iv) = encrypt(key, text.as_bytes())?;
    Ok((hex::encode(ct), hex::encode(iv)))
}

/// Decrypt a hex-encoded text field back to a string.
pub fn decrypt_text(key: &SymmetricKey, ct_hex: &str, iv_hex: &str) -> Result<String, CryptoError> {
    let ct = hex::decode(ct_hex)?;
    let iv = hex::decode(iv_hex)?;
    let plaintext = decrypt(key, &ct, &iv)?;
    String::from_utf8(plaintext.to_vec()).map_err(|_| CryptoError::Decryption)
}
