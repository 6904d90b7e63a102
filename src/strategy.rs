//! Facet-configurable equivalence strategies.
//!
//! A [`StackStrategy`] is an immutable hash/equals pair closed over a
//! [`FacetSet`] snapshot. Every selectable facet combination yields a valid
//! equivalence relation with a consistent hash:
//!
//! - equality of two non-empty stacks is the conjunction, over the selected
//!   facets only, of per-facet equality;
//! - the hash folds exactly one slot per facet in a fixed order, substituting
//!   [`EXCLUDED_FACET`] for a deselected facet so it never reads a value the
//!   relation ignores;
//! - every absent or empty stack collapses into one canonical class hashing
//!   to [`EMPTY_HASH`](crate::EMPTY_HASH).
//!
//! ```
//! use stack_key::{ItemStack, KindRegistry, StackStrategy};
//!
//! let mut registry = KindRegistry::new();
//! let iron = registry.register("iron_ingot").unwrap();
//!
//! let a = ItemStack::new(iron.clone(), 5);
//! let b = ItemStack::new(iron.clone(), 3);
//!
//! let ignore_count = StackStrategy::comparing_all_but_count();
//! assert!(ignore_count.equals(Some(&a), Some(&b)));
//!
//! let strict = StackStrategy::comparing_all();
//! assert!(!strict.equals(Some(&a), Some(&b)));
//! ```

use serde::{Deserialize, Serialize};

use crate::EMPTY_HASH;
use crate::hash::{ABSENT_VALUE, EXCLUDED_FACET, combine, fnv1a_64};
use crate::registry::Kind;
use crate::stack::StackLike;

/// Which facets participate in equality and hashing.
///
/// Each field toggles one comparison dimension independently; every
/// combination is legal, including all-false and all-true.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacetSet {
    /// Compare the kind by in-session reference identity.
    pub kind: bool,
    /// Compare the kind by its reload-durable stable name.
    pub stable_kind_name: bool,
    /// Compare the item count.
    pub count: bool,
    /// Compare the damage value.
    pub damage: bool,
    /// Compare the payload by value.
    pub payload: bool,
}

/// Fluent configuration for a [`StackStrategy`].
///
/// Setters are last-write-wins and cannot fail; [`build`](Self::build) is a
/// pure read of the current flags. A builder is a short-lived, single-owner
/// staging object — the built strategy is the thing to share.
///
/// `kind` and `stable_kind_name` are alternative spellings of the same
/// identity facet; enable one or the other. Enabling both is legal and means
/// both must agree for two stacks to be equal.
#[derive(Clone, Copy, Debug, Default)]
pub struct StrategyBuilder {
    facets: FacetSet,
}

impl StrategyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the kind (reference identity) is considered for equality.
    pub fn compare_kind(mut self, choice: bool) -> Self {
        self.facets.kind = choice;
        self
    }

    /// Whether the stable kind name is considered for equality
    /// (identity that survives reloads, at the cost of a name lookup).
    pub fn compare_stable_kind_name(mut self, choice: bool) -> Self {
        self.facets.stable_kind_name = choice;
        self
    }

    /// Whether the item count is considered for equality.
    pub fn compare_count(mut self, choice: bool) -> Self {
        self.facets.count = choice;
        self
    }

    /// Whether the damage value is considered for equality.
    pub fn compare_damage(mut self, choice: bool) -> Self {
        self.facets.damage = choice;
        self
    }

    /// Whether the payload is considered for equality.
    pub fn compare_payload(mut self, choice: bool) -> Self {
        self.facets.payload = choice;
        self
    }

    /// Snapshot the current flags into an immutable strategy.
    pub fn build(&self) -> StackStrategy {
        StackStrategy::new(self.facets)
    }
}

/// Immutable hash/equals pair over a facet snapshot.
///
/// `Copy`, stateless, and safe for unsynchronized concurrent use; it holds
/// no entity references and never mutates the stacks it inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackStrategy {
    facets: FacetSet,
}

impl StackStrategy {
    /// Strategy over an explicit facet set.
    pub fn new(facets: FacetSet) -> Self {
        Self { facets }
    }

    /// Builder for a custom strategy.
    pub fn builder() -> StrategyBuilder {
        StrategyBuilder::new()
    }

    /// The facet snapshot this strategy is closed over.
    #[inline]
    pub fn facets(&self) -> FacetSet {
        self.facets
    }

    /// Compares every facet of a stack: kind identity, count, damage and
    /// payload.
    pub fn comparing_all() -> Self {
        Self::builder()
            .compare_kind(true)
            .compare_count(true)
            .compare_damage(true)
            .compare_payload(true)
            .build()
    }

    /// Compares every facet, using the stable kind name to determine
    /// identity instead of the kind's transient location in memory.
    pub fn comparing_all_persistent() -> Self {
        Self::builder()
            .compare_stable_kind_name(true)
            .compare_count(true)
            .compare_damage(true)
            .compare_payload(true)
            .build()
    }

    /// Compares every facet except the number of items in the stack.
    pub fn comparing_all_but_count() -> Self {
        Self::builder()
            .compare_kind(true)
            .compare_damage(true)
            .compare_payload(true)
            .build()
    }

    /// Compares kind identity, damage and count, ignoring the payload.
    pub fn comparing_kind_damage_count() -> Self {
        Self::builder()
            .compare_kind(true)
            .compare_damage(true)
            .compare_count(true)
            .build()
    }

    /// Hash of a stack under this strategy.
    ///
    /// Total: absent and empty stacks hash to [`EMPTY_HASH`](crate::EMPTY_HASH)
    /// under every facet set. For a non-empty stack, folds one slot per facet
    /// in fixed order; a deselected facet contributes [`EXCLUDED_FACET`]
    /// instead of its live value, so stacks equal under [`equals`](Self::equals)
    /// always hash alike.
    pub fn hash<S: StackLike>(&self, stack: Option<&S>) -> u64 {
        let stack = match stack {
            Some(stack) if !stack.is_empty() => stack,
            _ => return EMPTY_HASH,
        };
        let facets = self.facets;
        combine(&[
            if facets.kind {
                stack.kind().identity_hash()
            } else {
                EXCLUDED_FACET
            },
            if facets.stable_kind_name {
                stack
                    .stable_kind_name()
                    .map_or(ABSENT_VALUE, |name| fnv1a_64(name.as_bytes()))
            } else {
                EXCLUDED_FACET
            },
            if facets.count {
                u64::from(stack.count())
            } else {
                EXCLUDED_FACET
            },
            if facets.damage {
                stack.damage() as u64
            } else {
                EXCLUDED_FACET
            },
            if facets.payload {
                stack.payload().map_or(ABSENT_VALUE, |p| p.content_hash())
            } else {
                EXCLUDED_FACET
            },
        ])
    }

    /// Equality of two stacks under this strategy.
    ///
    /// Total: if `a` is absent or empty, the result is exactly "`b` is absent
    /// or empty" — every empty stack belongs to one canonical class, unequal
    /// to any non-empty stack. For two non-empty stacks, the selected facets
    /// must all agree; a deselected facet contributes no constraint.
    pub fn equals<S: StackLike>(&self, a: Option<&S>, b: Option<&S>) -> bool {
        let a = match a {
            Some(stack) if !stack.is_empty() => stack,
            _ => return b.is_none_or(|stack| stack.is_empty()),
        };
        let b = match b {
            Some(stack) if !stack.is_empty() => stack,
            _ => return false,
        };
        let facets = self.facets;
        (!facets.kind || Kind::same(a.kind(), b.kind()))
            && (!facets.stable_kind_name || a.stable_kind_name() == b.stable_kind_name())
            && (!facets.count || a.count() == b.count())
            && (!facets.damage || a.damage() == b.damage())
            && (!facets.payload || a.payload() == b.payload())
    }
}

impl From<FacetSet> for StackStrategy {
    fn from(facets: FacetSet) -> Self {
        Self::new(facets)
    }
}
