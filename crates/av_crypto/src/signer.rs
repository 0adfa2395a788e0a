//! Transfer-certificate signing — SHA-256 digest + RSA PKCS#1 v1.5.
//!
//! The certificate text is hashed to a hex digest, and the digest string is
//! what gets signed. Verification is strictly boolean: a malformed public
//! key, malformed signature, or any mismatch returns `false`, so callers
//! can present one uniform "invalid signature" outcome.

use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::signature::{SignatureEncoding, Signer as _, Verifier as _};
use sha2::{Digest, Sha256};

use crate::error::CryptoError;
use crate::keypair::{PrivateKeyPem, PublicKeyPem};

/// SHA-256 digest of the exact byte representation of `text`, hex-encoded.
pub fn hash_document(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Sign a document digest with the holder's private key.
/// Returns the hex-encoded signature.
pub fn sign(digest_hex: &str, private: &PrivateKeyPem) -> Result<String, CryptoError> {
    let key = private.to_rsa()?;
    let signing_key = SigningKey::<Sha256>::new(key);
    let signature = signing_key
        .try_sign(digest_hex.as_bytes())
        .map_err(|e| CryptoError::InvalidKey(e.to_string()))?;
    Ok(hex::encode(signature.to_bytes()))
}

/// Verify a hex signature over a document digest against a public key.
///
/// Returns `true` iff the signature was produced by the matching private
/// key over this exact digest. Never errors.
pub fn verify(digest_hex: &str, signature_hex: &str, public: &PublicKeyPem) -> bool {
    let Ok(key) = public.to_rsa() else {
        return false;
    };
    let Ok(sig_bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(sig_bytes.as_slice()) else {
        return false;
    };
    VerifyingKey::<Sha256>::new(key)
        .verify(digest_hex.as_bytes(), &signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keypair;

    const DOC: &str = "Transfer of all rights to asset 42, $150 USD";

    #[test]
    fn sign_then_verify() {
        let pair = keypair::generate().unwrap();
        let digest = hash_document(DOC);
        let sig = sign(&digest, &pair.private).unwrap();
        assert!(verify(&digest, &sig, &pair.public));
    }

    #[test]
    fn wrong_public_key_rejected() {
        let signer = keypair::generate().unwrap();
        let other = keypair::generate().unwrap();
        let digest = hash_document(DOC);
        let sig = sign(&digest, &signer.private).unwrap();
        assert!(!verify(&digest, &sig, &other.public));
    }

    #[test]
    fn altered_digest_rejected() {
        let pair = keypair::generate().unwrap();
        let digest = hash_document(DOC);
        let sig = sign(&digest, &pair.private).unwrap();
        let altered = hash_document("Transfer of all rights to asset 43, $150 USD");
        assert!(!verify(&altered, &sig, &pair.public));
    }

    #[test]
    fn malformed_inputs_return_false_not_panic() {
        let pair = keypair::generate().unwrap();
        let digest = hash_document(DOC);
        let sig = sign(&digest, &pair.private).unwrap();

        assert!(!verify(&digest, &sig, &PublicKeyPem("garbage".into())));
        assert!(!verify(&digest, "zz-not-hex", &pair.public));
        assert!(!verify(&digest, "deadbeef", &pair.public)); // wrong length
    }

    #[test]
    fn single_character_change_changes_hash() {
        let a = hash_document("Sunset.png");
        let b = hash_document("Sunset.pnG");
        assert_ne!(a, b);
        assert_eq!(a.len(), 64);
        assert_eq!(b.len(), 64);
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_document(DOC), hash_document(DOC));
    }
}
