//! Opaque bearer tokens for the web boundary.
//!
//! Token issuance mechanics beyond "opaque credential" are out of scope;
//! this table maps random tokens to identity ids for the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use rand::RngCore;
use tokio::sync::RwLock;

/// Thread-safe token table. Clone to share.
#[derive(Clone, Default)]
pub struct SessionTable {
    tokens: Arc<RwLock<HashMap<String, String>>>,
}

impl SessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a fresh opaque token bound to `identity_id`.
    pub async fn issue(&self, identity_id: &str) -> String {
        let mut raw = [0u8; 32];
        rand::rngs::OsRng.fill_bytes(&mut raw);
        let token = URL_SAFE_NO_PAD.encode(raw);
        self.tokens
            .write()
            .await
            .insert(token.clone(), identity_id.to_string());
        token
    }

    /// Resolve a bearer token to its identity id, if valid.
    pub async fn resolve(&self, token: &str) -> Option<String> {
        self.tokens.read().await.get(token).cloned()
    }

    pub async fn revoke(&self, token: &str) {
        self.tokens.write().await.remove(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn issue_resolve_revoke() {
        let sessions = SessionTable::new();
        let token = sessions.issue("id-1").await;
        assert_eq!(sessions.resolve(&token).await.as_deref(), Some("id-1"));

        sessions.revoke(&token).await;
        assert_eq!(sessions.resolve(&token).await, None);
    }

    #[tokio::test]
    async fn tokens_are_opaque_and_unique() {
        let sessions = SessionTable::new();
        let a = sessions.issue("id-1").await;
        let b = sessions.issue("id-1").await;
        assert_ne!(a, b);
        assert!(!a.contains("id-1"));
        assert_eq!(sessions.resolve("forged-token").await, None);
    }
}
