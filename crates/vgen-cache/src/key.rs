//! Canonical cache key derivation.
//!
//! Keys are the SHA-256 hex digest of the request parameters serialized as
//! JSON with sorted field names, so two requests with the same parameters in
//! any order always hash to the same key.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// A 64-character lowercase hex SHA-256 digest identifying a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First 16 hex characters, used where a short fingerprint is enough.
    pub fn short(&self) -> &str {
        &self.0[..16]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a [`CacheKey`] from named parameters.
///
/// Parameters are held in a `BTreeMap` so serialization order is always
/// alphabetical regardless of insertion order.
#[derive(Debug, Default, Clone)]
pub struct KeyBuilder {
    params: BTreeMap<String, serde_json::Value>,
}

impl KeyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: &str, value: impl Serialize) -> Self {
        // Built-in Serialize impls for strings and integers cannot fail
        let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
        self.params.insert(name.to_string(), value);
        self
    }

    pub fn build(self) -> CacheKey {
        // BTreeMap serialization is deterministic, so this cannot fail
        let canonical =
            serde_json::to_string(&self.params).unwrap_or_else(|_| String::from("{}"));
        let digest = Sha256::digest(canonical.as_bytes());
        CacheKey(format!("{:x}", digest))
    }
}
