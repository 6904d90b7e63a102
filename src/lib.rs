//! # Configurable stack equivalence strategies (stack-key)
//!
//! Item stacks bundle a kind, a count, a damage value and an optional
//! structured payload — and "equal" depends on who is asking. An inventory
//! merger ignores counts; a recipe index ignores payloads; a cache that
//! must survive reloads compares kinds by stable name instead of by the
//! in-memory token. This crate lets a caller pick the comparison facets
//! declaratively and hands back one immutable strategy object whose
//! `hash`/`equals` pair is a valid equivalence relation for *every* facet
//! combination.
//!
//! ## Design
//!
//! - [`StrategyBuilder`] accumulates five independent facet toggles;
//!   [`StackStrategy`] is the immutable snapshot built from them, with four
//!   named presets ([`comparing_all`](StackStrategy::comparing_all) and
//!   friends).
//! - Identity is an explicit abstraction: [`Kind`] compares by in-session
//!   reference identity (fast path), while its stable name — assigned by a
//!   [`KindRegistry`] — survives reloads (durable path). A strategy selects
//!   one, the other, or both.
//! - Absent and empty stacks collapse into one canonical class: they hash
//!   to [`EMPTY_HASH`] and equal exactly each other, under every
//!   configuration.
//! - [`StrategyMap`]/[`StrategySet`] are hash collections that route every
//!   probe through a supplied strategy instead of the key's own `Hash`/`Eq`.
//!
//! ```
//! use stack_key::{ItemStack, KindRegistry, StackStrategy, StrategySet};
//!
//! let mut registry = KindRegistry::new();
//! let iron = registry.register("iron_ingot").unwrap();
//!
//! let mut seen = StrategySet::with_strategy(StackStrategy::comparing_all_but_count());
//! assert!(seen.insert(ItemStack::new(iron.clone(), 5)));
//! // Same kind, different count — already present under this strategy.
//! assert!(!seen.insert(ItemStack::new(iron.clone(), 3)));
//! ```

pub mod hash;
pub mod map;
pub mod payload;
pub mod registry;
pub mod stack;
pub mod strategy;

pub use hash::{ABSENT_VALUE, EXCLUDED_FACET, fnv1a_64};
pub use map::{StrategyMap, StrategySet};
pub use payload::Payload;
pub use registry::{Kind, KindDef, KindRegistry, RegistryError};
pub use stack::{ItemStack, StackLike};
pub use strategy::{FacetSet, StackStrategy, StrategyBuilder};

/// Canonical hash of the empty class.
///
/// Every absent or empty stack hashes to this value under every strategy.
pub const EMPTY_HASH: u64 = 0;
