//! Structured payload attached to a stack.
//!
//! A [`Payload`] is an ordered key → bytes map with typed accessors via
//! zerocopy. Two payloads compare equal when they hold the same keys with
//! the same bytes, and equal payloads produce the same [`content_hash`]
//! (entries are folded in key order).
//!
//! An *absent* payload (`Option<Payload>::None` on the stack) is a distinct
//! comparable state from a present-but-empty payload.
//!
//! [`content_hash`]: Payload::content_hash

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::hash::{FNV_OFFSET, fnv1a_64, mix};

/// Ordered key-value payload with value equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    entries: BTreeMap<String, Vec<u8>>,
}

impl Payload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a typed value for a key.
    ///
    /// The type must implement `zerocopy::IntoBytes + Immutable`.
    /// Use `#[derive(IntoBytes, Immutable)]` on your type.
    ///
    /// Returns the previous raw bytes if any.
    pub fn set<T: IntoBytes + Immutable>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Option<Vec<u8>> {
        self.entries.insert(key.into(), value.as_bytes().to_vec())
    }

    /// Get a typed value for a key.
    ///
    /// The type must implement `zerocopy::FromBytes + Immutable`.
    /// Use `#[derive(FromBytes, Immutable)]` on your type.
    ///
    /// Returns `None` if the key doesn't exist or the bytes don't match
    /// the type layout.
    #[inline]
    pub fn get<T: FromBytes + KnownLayout + Immutable>(&self, key: &str) -> Option<&T> {
        let bytes = self.entries.get(key)?;
        T::ref_from_bytes(bytes).ok()
    }

    /// Set raw bytes for a key.
    ///
    /// Use this when you need manual serialization control.
    pub fn set_raw(&mut self, key: impl Into<String>, value: Vec<u8>) -> Option<Vec<u8>> {
        self.entries.insert(key.into(), value)
    }

    /// Get raw bytes for a key.
    #[inline]
    pub fn get_raw(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(|v| v.as_slice())
    }

    /// Check if a key is present.
    #[inline]
    pub fn has(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key, returning its raw bytes if any.
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    /// All keys, in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|k| k.as_str())
    }

    /// All entries as (key, bytes) pairs, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deterministic hash over the payload contents.
    ///
    /// Entries are folded in key order, so `a == b` implies
    /// `a.content_hash() == b.content_hash()` regardless of insertion order.
    pub fn content_hash(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        for (key, value) in &self.entries {
            hash = mix(hash, fnv1a_64(key.as_bytes()));
            hash = mix(hash, fnv1a_64(value));
        }
        hash
    }
}
