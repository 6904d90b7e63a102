//! Strategy-keyed hash collections.
//!
//! Std's `HashMap` hashes keys through their own `Hash`/`Eq`; these
//! wrappers instead route every probe through an externally supplied
//! [`StackStrategy`], so the same set of stacks can be bucketed by kind,
//! by kind+damage, by stable name, or any other facet combination.
//!
//! Keys equal under the strategy occupy one slot: inserting with an
//! equal key replaces the value and returns the old one. Empty stacks are
//! legal keys and collapse into the single canonical empty class.

use hashbrown::hash_table::{Entry, HashTable};

use crate::stack::StackLike;
use crate::strategy::StackStrategy;

/// Hash map keyed by stacks under a [`StackStrategy`].
pub struct StrategyMap<K, V> {
    strategy: StackStrategy,
    table: HashTable<(K, V)>,
}

impl<K: StackLike, V> StrategyMap<K, V> {
    /// An empty map using `strategy` as its key comparator.
    pub fn with_strategy(strategy: StackStrategy) -> Self {
        Self {
            strategy,
            table: HashTable::new(),
        }
    }

    /// An empty map with pre-allocated capacity.
    pub fn with_capacity(strategy: StackStrategy, capacity: usize) -> Self {
        Self {
            strategy,
            table: HashTable::with_capacity(capacity),
        }
    }

    /// The key comparator this map was built with.
    #[inline]
    pub fn strategy(&self) -> StackStrategy {
        self.strategy
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Insert a key-value pair.
    ///
    /// If a key equal under the strategy is already present, its value is
    /// replaced and returned; the stored key is kept.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let strategy = self.strategy;
        let hash = strategy.hash(Some(&key));
        match self.table.entry(
            hash,
            |(stored, _)| strategy.equals(Some(stored), Some(&key)),
            |(stored, _)| strategy.hash(Some(stored)),
        ) {
            Entry::Occupied(mut entry) => {
                Some(std::mem::replace(&mut entry.get_mut().1, value))
            }
            Entry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.strategy.hash(Some(key));
        self.table
            .find(hash, |(stored, _)| {
                self.strategy.equals(Some(stored), Some(key))
            })
            .map(|(_, value)| value)
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let strategy = self.strategy;
        let hash = strategy.hash(Some(key));
        self.table
            .find_mut(hash, |(stored, _)| strategy.equals(Some(stored), Some(key)))
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove a key, returning its value if present.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let strategy = self.strategy;
        let hash = strategy.hash(Some(key));
        match self
            .table
            .find_entry(hash, |(stored, _)| strategy.equals(Some(stored), Some(key)))
        {
            Ok(entry) => {
                let ((_, value), _) = entry.remove();
                Some(value)
            }
            Err(_) => None,
        }
    }

    /// All entries, in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.table.iter().map(|(key, value)| (key, value))
    }
}

impl<K: StackLike + std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for StrategyMap<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Hash set of stacks under a [`StackStrategy`].
pub struct StrategySet<K> {
    map: StrategyMap<K, ()>,
}

impl<K: StackLike> StrategySet<K> {
    /// An empty set using `strategy` as its comparator.
    pub fn with_strategy(strategy: StackStrategy) -> Self {
        Self {
            map: StrategyMap::with_strategy(strategy),
        }
    }

    #[inline]
    pub fn strategy(&self) -> StackStrategy {
        self.map.strategy()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Insert a stack. Returns `true` if it was not already present
    /// under the strategy.
    pub fn insert(&mut self, key: K) -> bool {
        self.map.insert(key, ()).is_none()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Remove a stack. Returns `true` if it was present.
    pub fn remove(&mut self, key: &K) -> bool {
        self.map.remove(key).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.map.iter().map(|(key, _)| key)
    }
}

impl<K: StackLike + std::fmt::Debug> std::fmt::Debug for StrategySet<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
