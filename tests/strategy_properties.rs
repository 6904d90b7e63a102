//! Property-based tests for the equivalence and hash contracts.
//!
//! Verifies, for every one of the 32 facet combinations, that equality is
//! an equivalence relation (reflexive, symmetric, transitive), that the
//! hash is consistent with it, and that absent/empty stacks form a single
//! canonical class.

use std::sync::OnceLock;

use proptest::prelude::*;
use stack_key::{
    EMPTY_HASH, FacetSet, ItemStack, Kind, KindDef, KindRegistry, Payload, StackStrategy,
};

const KIND_NAMES: &[&str] = &["iron_ingot", "gold_ingot", "steel_plate"];

/// Kind pool: three registered kinds, a rebuilt duplicate of the first
/// (same stable name, fresh identity), and an anonymous kind.
fn kind_pool() -> &'static [Kind] {
    static POOL: OnceLock<Vec<Kind>> = OnceLock::new();
    POOL.get_or_init(|| {
        let defs: Vec<KindDef> = KIND_NAMES.iter().map(|&name| KindDef::new(name)).collect();
        let first = KindRegistry::build(&defs).unwrap();
        let rebuilt = KindRegistry::build(&defs).unwrap();

        let mut pool: Vec<Kind> = first.kinds().cloned().collect();
        pool.push(rebuilt.get("iron_ingot").unwrap().clone());
        pool.push(Kind::anonymous());
        pool
    })
}

fn facet_set(bits: u8) -> FacetSet {
    FacetSet {
        kind: bits & 1 != 0,
        stable_kind_name: bits & 2 != 0,
        count: bits & 4 != 0,
        damage: bits & 8 != 0,
        payload: bits & 16 != 0,
    }
}

fn payloads() -> impl Strategy<Value = Option<Payload>> {
    prop_oneof![
        Just(None::<Payload>),
        Just(Some(Payload::new())),
        (1i32..3).prop_map(|level| {
            let mut payload = Payload::new();
            payload.set("enchant", &level);
            Some(payload)
        }),
    ]
}

// Small value domains on purpose: collisions are what exercise the
// relation, and count 0 produces empty stacks.
fn stacks() -> impl Strategy<Value = ItemStack> {
    let pool_len = kind_pool().len();
    (0..pool_len, 0u32..4, 0i32..3, payloads()).prop_map(|(kind, count, damage, payload)| {
        let mut stack = ItemStack::new(kind_pool()[kind].clone(), count).with_damage(damage);
        if let Some(payload) = payload {
            stack = stack.with_payload(payload);
        }
        stack
    })
}

fn maybe_stacks() -> impl Strategy<Value = Option<ItemStack>> {
    prop_oneof![1 => Just(None::<ItemStack>), 4 => stacks().prop_map(Some)]
}

proptest! {
    #[test]
    fn equality_is_reflexive(stack in stacks(), bits in 0u8..32) {
        let strategy = StackStrategy::new(facet_set(bits));
        prop_assert!(strategy.equals(Some(&stack), Some(&stack)));
    }

    #[test]
    fn equality_is_symmetric(a in maybe_stacks(), b in maybe_stacks(), bits in 0u8..32) {
        let strategy = StackStrategy::new(facet_set(bits));
        prop_assert_eq!(
            strategy.equals(a.as_ref(), b.as_ref()),
            strategy.equals(b.as_ref(), a.as_ref())
        );
    }

    #[test]
    fn equality_is_transitive(
        a in maybe_stacks(),
        b in maybe_stacks(),
        c in maybe_stacks(),
        bits in 0u8..32,
    ) {
        let strategy = StackStrategy::new(facet_set(bits));
        if strategy.equals(a.as_ref(), b.as_ref()) && strategy.equals(b.as_ref(), c.as_ref()) {
            prop_assert!(strategy.equals(a.as_ref(), c.as_ref()));
        }
    }

    #[test]
    fn equal_stacks_hash_alike(a in maybe_stacks(), b in maybe_stacks(), bits in 0u8..32) {
        let strategy = StackStrategy::new(facet_set(bits));
        if strategy.equals(a.as_ref(), b.as_ref()) {
            prop_assert_eq!(strategy.hash(a.as_ref()), strategy.hash(b.as_ref()));
        }
    }

    #[test]
    fn hash_is_stable_across_calls(stack in stacks(), bits in 0u8..32) {
        let strategy = StackStrategy::new(facet_set(bits));
        prop_assert_eq!(strategy.hash(Some(&stack)), strategy.hash(Some(&stack)));
    }

    #[test]
    fn empty_class_is_canonical(stack in stacks(), bits in 0u8..32) {
        let strategy = StackStrategy::new(facet_set(bits));
        let empty = ItemStack::empty();

        prop_assert_eq!(strategy.hash::<ItemStack>(None), EMPTY_HASH);
        prop_assert_eq!(strategy.hash(Some(&empty)), EMPTY_HASH);
        prop_assert!(strategy.equals(None, Some(&empty)));
        prop_assert!(strategy.equals(Some(&empty), None));

        if stack.is_empty() {
            prop_assert!(strategy.equals(Some(&stack), Some(&empty)));
            prop_assert_eq!(strategy.hash(Some(&stack)), EMPTY_HASH);
        } else {
            prop_assert!(!strategy.equals(Some(&stack), Some(&empty)));
            prop_assert!(!strategy.equals(Some(&empty), Some(&stack)));
        }
    }

    #[test]
    fn disabling_every_facet_equates_non_empty_stacks(a in stacks(), b in stacks()) {
        let strategy = StackStrategy::new(facet_set(0));
        if !a.is_empty() && !b.is_empty() {
            prop_assert!(strategy.equals(Some(&a), Some(&b)));
            prop_assert_eq!(strategy.hash(Some(&a)), strategy.hash(Some(&b)));
        }
    }
}
