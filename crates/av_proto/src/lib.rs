//! av_proto — Wire types and serialisation for the ArtVault transfer protocol
//!
//! All on-wire types serialise to JSON. Binary fields use the original wire
//! encodings: hex for IVs, digests, and signatures; base64 for ciphertext
//! and wrapped keys.
//!
//! # Modules
//! - `package`     — hybrid delivery package (ciphertext + wrapped key + IV)
//! - `certificate` — canonical transfer-certificate text
//! - `api`         — request/response types shared with the web boundary

pub mod api;
pub mod certificate;
pub mod package;

pub use api::Role;
pub use certificate::CertificateInput;
pub use package::HybridPackage;
