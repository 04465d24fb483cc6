//! Content-addressable filesystem cache for pipeline artifacts.
//!
//! Values are stored as JSON envelopes under `<root>/<namespace>/<key>.json`,
//! where the key is the SHA-256 of the request's canonical JSON form. Reads
//! treat any corruption or IO failure as a cache miss; writes log failures
//! and carry on, so the cache can never take the pipeline down with it.

pub mod error;
pub mod key;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use key::{CacheKey, KeyBuilder};
pub use store::{CacheStats, CacheStore, Entry};
