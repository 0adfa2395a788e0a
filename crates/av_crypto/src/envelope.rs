//! Hybrid delivery envelope — AES-256-CBC payload + RSA-OAEP key wrap.
//!
//! Seal (sender side): generate a one-time 32-byte key K, encrypt the
//! payload with K, wrap K with the recipient's public key (OAEP, SHA-256).
//! K exists only for the duration of the call; it is never persisted or
//! logged.
//!
//! Open (recipient side): unwrap K with the private key, decrypt the
//! payload. Both failure causes collapse into one [`CryptoError::Envelope`]
//! so a caller cannot tell which stage failed.

use rsa::Oaep;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::cipher::{self, SymmetricKey, IV_LEN};
use crate::error::CryptoError;
use crate::keypair::{PrivateKeyPem, PublicKeyPem};

/// Output of [`seal`]: everything the recipient needs except their
/// private key.
pub struct SealedEnvelope {
    pub ciphertext: Vec<u8>,
    /// One-time AES key, RSA-OAEP-encrypted to the recipient.
    pub wrapped_key: Vec<u8>,
    pub iv: [u8; IV_LEN],
}

/// Seal `payload` for the holder of `recipient` public key.
pub fn seal(payload: &[u8], recipient: &PublicKeyPem) -> Result<SealedEnvelope, CryptoError> {
    let one_time_key = SymmetricKey::generate();
    let (ciphertext, iv) = cipher::encrypt(&one_time_key, payload).map_err(|_| CryptoError::Envelope)?;

    let rsa_public = recipient.to_rsa().map_err(|_| CryptoError::Envelope)?;
    let wrapped_key = rsa_public
        .encrypt(&mut rand::rngs::OsRng, Oaep::new::<Sha256>(), one_time_key.as_bytes())
        .map_err(|_| CryptoError::Envelope)?;

    Ok(SealedEnvelope { ciphertext, wrapped_key, iv })
}

/// Open a sealed envelope with the recipient's private key.
pub fn open(
    ciphertext: &[u8],
    wrapped_key: &[u8],
    iv: &[u8],
    private: &PrivateKeyPem,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let rsa_private = private.to_rsa().map_err(|_| CryptoError::Envelope)?;
    let key_bytes = Zeroizing::new(
        rsa_private
            .decrypt(Oaep::new::<Sha256>(), wrapped_key)
            .map_err(|_| CryptoError::Envelope)?,
    );
    let one_time_key = SymmetricKey::from_bytes(&key_bytes).map_err(|_| CryptoError::Envelope)?;
    cipher::decrypt(&one_time_key, ciphertext, iv).map_err(|_| CryptoError::Envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair;

    #[test]
    fn seal_open_roundtrip() {
        let pair = keypair::generate().unwrap();
        let payload = b"original artwork bytes, byte-for-byte";
        let sealed = seal(payload, &pair.public).unwrap();
        assert_ne!(&sealed.ciphertext[..], &payload[..]);
        // 2048-bit RSA wraps to a 256-byte block.
        assert_eq!(sealed.wrapped_key.len(), 256);

        let opened = open(&sealed.ciphertext, &sealed.wrapped_key, &sealed.iv, &pair.private).unwrap();
        assert_eq!(&opened[..], &payload[..]);
    }

    #[test]
    fn wrong_private_key_fails_uniformly() {
        let recipient = keypair::generate().unwrap();
        let intruder = keypair::generate().unwrap();
        let sealed = seal(b"for the buyer only", &recipient.public).unwrap();
        let err = open(&sealed.ciphertext, &sealed.wrapped_key, &sealed.iv, &intruder.private)
            .unwrap_err();
        assert!(matches!(err, CryptoError::Envelope));
    }

    #[test]
    fn tampered_wrapped_key_fails_uniformly() {
        let pair = keypair::generate().unwrap();
        let mut sealed = seal(b"payload", &pair.public).unwrap();
        sealed.wrapped_key[0] ^= 0x01;
        let err =
            open(&sealed.ciphertext, &sealed.wrapped_key, &sealed.iv, &pair.private).unwrap_err();
        assert!(matches!(err, CryptoError::Envelope));
    }

    #[test]
    fn two_seals_use_distinct_one_time_keys() {
        let pair = keypair::generate().unwrap();
        let a = seal(b"same payload", &pair.public).unwrap();
        let b = seal(b"same payload", &pair.public).unwrap();
        // Fresh K and IV per seal; identical payloads never collide.
        assert_ne!(a.iv, b.iv);
        assert_ne!(a.ciphertext, b.ciphertext);
        assert_ne!(a.wrapped_key, b.wrapped_key);
    }
}
