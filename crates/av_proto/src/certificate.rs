//! Canonical transfer-certificate text.
//!
//! The certificate is what gets hashed and signed, so its rendering must be
//! byte-stable: same inputs, same text, at signing time and at any later
//! re-verification. The timestamp is supplied by the caller and embedded in
//! the text; it is not read from a clock here.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Everything named by the certificate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CertificateInput {
    pub asset_id: String,
    pub asset_title: String,
    pub price_usd: u64,
    pub seller_id: String,
    pub seller_handle: String,
    pub buyer_id: String,
    pub buyer_handle: String,
    pub issued_at: DateTime<Utc>,
}

impl CertificateInput {
    /// Render the canonical certificate text.
    pub fn render(&self) -> String {
        format!(
            "DIGITAL RIGHTS TRANSFER CERTIFICATE\n\
             \n\
             By this document, I, {seller} (identity {seller_id}), as the\n\
             legitimate owner of the digital work titled \"{title}\", declare my\n\
             intent to transfer all rights of ownership, use, reproduction, and\n\
             distribution of said work to {buyer} (identity {buyer_id}).\n\
             \n\
             This transfer is irrevocable and grants the buyer all rights over\n\
             the digital work named above.\n\
             \n\
             Asset: {title}\n\
             Asset ID: {asset_id}\n\
             Price: ${price} USD\n\
             Date: {date}\n\
             Seller: {seller} (ID: {seller_id})\n\
             Buyer: {buyer} (ID: {buyer_id})",
            seller = self.seller_handle,
            seller_id = self.seller_id,
            title = self.asset_title,
            buyer = self.buyer_handle,
            buyer_id = self.buyer_id,
            asset_id = self.asset_id,
            price = self.price_usd,
            date = self.issued_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn input() -> CertificateInput {
        CertificateInput {
            asset_id: "asset-1".into(),
            asset_title: "Sunset.png".into(),
            price_usd: 150,
            seller_id: "id-alice".into(),
            seller_handle: "alice".into(),
            buyer_id: "id-bob".into(),
            buyer_handle: "bob".into(),
            issued_at: Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn render_is_deterministic() {
        assert_eq!(input().render(), input().render());
    }

    #[test]
    fn render_names_all_parties_and_terms() {
        let text = input().render();
        assert!(text.contains("alice"));
        assert!(text.contains("bob"));
        assert!(text.contains("Sunset.png"));
        assert!(text.contains("Asset ID: asset-1"));
        assert!(text.contains("Price: $150 USD"));
        assert!(text.contains("2026-01-15T12:00:00.000Z"));
    }

    #[test]
    fn different_buyer_changes_text() {
        let a = input().render();
        let mut other = input();
        other.buyer_handle = "mallory".into();
        assert_ne!(a, other.render());
    }
}
