//! Kind registry — stable-name lookup and kind construction.
//!
//! A [`Kind`] is the in-session identity token for a logical item type.
//! Identity is reference identity: two `Kind` values are the same kind only
//! if they originate from the same registration. The registry additionally
//! assigns each registered kind a *stable name*, a durable identifier that
//! survives reloads where the in-memory token does not — rebuilding a
//! registry from the same definitions yields distinct tokens with equal
//! stable names.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use thiserror::Error;

/// Errors reported by the registry build/registration paths.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("duplicate kind name: '{0}'")]
    DuplicateName(String),
    #[error("empty kind name is not allowed")]
    EmptyName,
}

/// Definition of a kind (used for registry building).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindDef {
    pub name: &'static str,
}

impl KindDef {
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

#[derive(Debug)]
struct KindInner {
    stable_name: Option<String>,
}

/// Reference-stable identity token for a logical item type.
///
/// Cheap to clone (`Arc`-backed). Equality and hashing are by *identity*,
/// not by name: a kind equals only itself and the clones made from it.
/// Use [`Kind::stable_name`] when identity must survive a reload.
#[derive(Clone, Debug)]
pub struct Kind {
    inner: Arc<KindInner>,
}

impl Kind {
    /// Create an unregistered kind with no stable name.
    pub fn anonymous() -> Self {
        Self {
            inner: Arc::new(KindInner { stable_name: None }),
        }
    }

    fn named(name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(KindInner {
                stable_name: Some(name.into()),
            }),
        }
    }

    /// The reload-durable name, if this kind was registered under one.
    #[inline]
    pub fn stable_name(&self) -> Option<&str> {
        self.inner.stable_name.as_deref()
    }

    /// Identity comparison: same registration (or a clone of it).
    #[inline]
    pub fn same(a: &Kind, b: &Kind) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Session-local identity hash.
    ///
    /// Stable for the lifetime of the kind, not across processes; persistent
    /// hashing goes through the stable name instead.
    #[inline]
    pub fn identity_hash(&self) -> u64 {
        Arc::as_ptr(&self.inner) as usize as u64
    }
}

/// Identity equality — a kind equals only itself.
impl PartialEq for Kind {
    fn eq(&self, other: &Self) -> bool {
        Kind::same(self, other)
    }
}

impl Eq for Kind {}

impl Hash for Kind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.identity_hash());
    }
}

/// Registry of named kinds.
///
/// Provides:
/// - Stable name → kind lookup
/// - Build from static definitions with duplicate detection
/// - Idempotent runtime registration
#[derive(Clone, Debug, Default)]
pub struct KindRegistry {
    by_name: HashMap<String, Kind>,
    order: Vec<Kind>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from kind definitions.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::EmptyName`] if a definition has an empty name
    /// - [`RegistryError::DuplicateName`] if two definitions share a name
    pub fn build(defs: &[KindDef]) -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        for def in defs {
            if def.name.is_empty() {
                return Err(RegistryError::EmptyName);
            }
            if registry.by_name.contains_key(def.name) {
                return Err(RegistryError::DuplicateName(def.name.to_string()));
            }
            registry.insert(def.name);
        }
        Ok(registry)
    }

    /// Register a kind under a stable name at runtime.
    ///
    /// Idempotent: registering a known name returns the existing kind.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for an empty name.
    pub fn register(&mut self, name: &str) -> Result<Kind, RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if let Some(existing) = self.by_name.get(name) {
            return Ok(existing.clone());
        }
        Ok(self.insert(name))
    }

    fn insert(&mut self, name: &str) -> Kind {
        let kind = Kind::named(name);
        self.by_name.insert(name.to_string(), kind.clone());
        self.order.push(kind.clone());
        kind
    }

    /// Stable name → kind.
    #[inline]
    pub fn get(&self, name: &str) -> Option<&Kind> {
        self.by_name.get(name)
    }

    /// Check if a name is registered.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Number of registered kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// All registered kinds, in registration order.
    pub fn kinds(&self) -> impl Iterator<Item = &Kind> {
        self.order.iter()
    }
}
