//! av_store — Record models and persistence ports for ArtVault
//!
//! The marketplace core never talks to a database engine directly; it goes
//! through the [`port::MarketStore`] and [`port::BlobStore`] traits. The
//! in-memory implementation here backs tests and demos; a SQL or KV backend
//! plugs in behind the same contracts.
//!
//! The one ordering guarantee a backend must honour lives in
//! [`port::MarketStore::record_transfer`]: the availability check, the flag
//! flip, and the transfer insert are a single atomic unit.

pub mod error;
pub mod memory;
pub mod models;
pub mod port;

pub use error::StoreError;
pub use memory::MemoryStore;
pub use port::{BlobStore, MarketStore};
