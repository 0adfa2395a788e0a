//! av_market — Purchase and delivery orchestration for ArtVault
//!
//! [`Marketplace`] sequences the four cryptographic layers into the
//! end-to-end workflows: registration (password hash + keypair), asset
//! upload (at-rest encryption), transfer (certificate hash-then-sign), and
//! download (hybrid reseal to the buyer). It owns no cryptographic logic of
//! its own — only coordination and persistence side effects.
//!
//! Dependencies are injected at construction: a [`av_store::MarketStore`],
//! a [`av_store::BlobStore`], and the master symmetric key. No module-level
//! singletons.

pub mod error;
pub mod market;
pub mod session;

pub use error::MarketError;
pub use market::{open_download, Marketplace, MAX_ASSET_BYTES};
