//! Stack types — the read-accessor seam and a concrete item stack.
//!
//! Strategies never touch a stack directly; they go through [`StackLike`],
//! which exposes exactly the facets a strategy may compare. [`ItemStack`]
//! is the crate's reference implementation.
//!
//! `ItemStack` deliberately does not implement `PartialEq`: which facets
//! make two stacks "equal" is the caller's choice, expressed through a
//! [`StackStrategy`](crate::strategy::StackStrategy).

use std::sync::OnceLock;

use crate::payload::Payload;
use crate::registry::Kind;

/// Read-only facet accessors consumed by strategies.
///
/// All accessors must be pure and side-effect-free; a strategy may call
/// them any number of times, from any thread.
pub trait StackLike {
    /// In-session identity token of the stack's item type.
    fn kind(&self) -> &Kind;

    /// Reload-durable name of the item type, if registered under one.
    fn stable_kind_name(&self) -> Option<&str> {
        self.kind().stable_name()
    }

    /// Number of items in the stack.
    fn count(&self) -> u32;

    /// Variant discriminator (damage/wear level, 0 = undamaged).
    fn damage(&self) -> i32;

    /// Nested structured payload, if any.
    fn payload(&self) -> Option<&Payload>;

    /// Sentinel predicate: an empty stack belongs to the canonical empty
    /// class under every strategy, regardless of its other fields.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// A stack of items: kind, count, damage, optional payload.
#[derive(Clone, Debug)]
pub struct ItemStack {
    kind: Kind,
    count: u32,
    damage: i32,
    payload: Option<Payload>,
}

fn empty_kind() -> &'static Kind {
    static EMPTY: OnceLock<Kind> = OnceLock::new();
    EMPTY.get_or_init(Kind::anonymous)
}

impl ItemStack {
    /// Create a stack of `count` items of `kind`, undamaged, no payload.
    pub fn new(kind: Kind, count: u32) -> Self {
        Self {
            kind,
            count,
            damage: 0,
            payload: None,
        }
    }

    /// The empty stack (count 0, shared anonymous kind).
    pub fn empty() -> Self {
        Self::new(empty_kind().clone(), 0)
    }

    /// Set the damage value, builder-style.
    pub fn with_damage(mut self, damage: i32) -> Self {
        self.damage = damage;
        self
    }

    /// Attach a payload, builder-style.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }

    #[inline]
    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    pub fn damage(&self) -> i32 {
        self.damage
    }

    #[inline]
    pub fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    /// A stack is empty when it holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    pub fn set_damage(&mut self, damage: i32) {
        self.damage = damage;
    }

    /// Payload for in-place edits, created empty on first access.
    pub fn payload_mut(&mut self) -> &mut Payload {
        self.payload.get_or_insert_with(Payload::new)
    }

    /// Detach and return the payload, if any.
    pub fn take_payload(&mut self) -> Option<Payload> {
        self.payload.take()
    }
}

impl StackLike for ItemStack {
    #[inline]
    fn kind(&self) -> &Kind {
        &self.kind
    }

    #[inline]
    fn count(&self) -> u32 {
        self.count
    }

    #[inline]
    fn damage(&self) -> i32 {
        self.damage
    }

    #[inline]
    fn payload(&self) -> Option<&Payload> {
        self.payload.as_ref()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::KindRegistry;

    fn iron() -> Kind {
        let mut registry = KindRegistry::new();
        registry.register("iron_ingot").unwrap()
    }

    #[test]
    fn new_stack_defaults() {
        let stack = ItemStack::new(iron(), 5);
        assert_eq!(stack.count(), 5);
        assert_eq!(stack.damage(), 0);
        assert!(stack.payload().is_none());
        assert!(!stack.is_empty());
    }

    #[test]
    fn empty_stack_is_empty() {
        let stack = ItemStack::empty();
        assert!(stack.is_empty());
        assert_eq!(stack.count(), 0);
        assert_eq!(stack.stable_kind_name(), None);
    }

    #[test]
    fn count_zero_means_empty_regardless_of_kind() {
        let mut stack = ItemStack::new(iron(), 5);
        stack.set_count(0);
        assert!(stack.is_empty());
    }

    #[test]
    fn stable_kind_name_follows_kind() {
        let stack = ItemStack::new(iron(), 1);
        assert_eq!(stack.stable_kind_name(), Some("iron_ingot"));

        let anon = ItemStack::new(Kind::anonymous(), 1);
        assert_eq!(anon.stable_kind_name(), None);
    }

    #[test]
    fn builder_style_fields() {
        let mut payload = Payload::new();
        payload.set("enchant", &1i32);

        let stack = ItemStack::new(iron(), 1).with_damage(3).with_payload(payload);
        assert_eq!(stack.damage(), 3);
        assert!(stack.payload().is_some_and(|p| p.has("enchant")));
    }

    #[test]
    fn payload_mut_creates_on_demand() {
        let mut stack = ItemStack::new(iron(), 1);
        assert!(stack.payload().is_none());

        stack.payload_mut().set("charge", &9u8);
        assert!(stack.payload().is_some_and(|p| p.has("charge")));

        let taken = stack.take_payload().unwrap();
        assert!(taken.has("charge"));
        assert!(stack.payload().is_none());
    }
}
