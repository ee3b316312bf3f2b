use std::mem;

use crate::probe::ProbeStrategy;

/// Smallest capacity the slot array is ever allocated with; growth doubles
/// from here.
const MIN_CAPACITY: usize = 4;

/// Load-factor growth trigger, stored as a percentage of capacity.
///
/// Growth fires when `used * 100 > capacity * LOAD_FACTOR_PERCENT`, keeping
/// occupancy at or below 80% between inserts.
const LOAD_FACTOR_PERCENT: usize = 80;

/// One entry in the backing slot array.
#[derive(Debug, Clone)]
enum Slot {
    /// Never used; terminates probe chains.
    Empty,
    /// A live entry.
    Occupied {
        /// The key stored in this slot.
        key: u64,
        /// The owned value bytes, or `None` for a keyless marker entry.
        value: Option<Box<[u8]>>,
    },
    /// Formerly used; probing continues past it and inserts may reclaim it.
    Tombstone,
}

/// Error returned when an insert argument is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertError {
    /// The value was present but zero-length; marker entries must pass
    /// `None` instead.
    EmptyValue,
}

/// An open-addressing hash table with `u64` keys and owned byte values.
///
/// Collisions are resolved by probing alternate slots of a single backing
/// array with a [`ProbeStrategy`] fixed at construction. Removal leaves a
/// tombstone so probe chains through the freed slot stay intact, and the
/// table doubles its capacity whenever occupancy crosses the load-factor
/// threshold.
///
/// Note: this implementation is not thread-safe. Wrap it in external
/// synchronization for concurrent access.
#[derive(Debug, Clone)]
pub struct ByteTable {
    /// The backing slot array; its length is the table capacity.
    slots: Vec<Slot>,
    /// Current number of live entries (tombstones excluded).
    used: usize,
    /// Probe sequence generator, fixed for the table's lifetime.
    strategy: ProbeStrategy,
}

impl Default for ByteTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ByteTable {
    /// Creates an empty table that allocates its slot array on first insert.
    #[must_use]
    pub fn new() -> Self {
        Self::with_strategy(ProbeStrategy::default())
    }

    /// Creates an empty table with at least `capacity` slots pre-allocated.
    ///
    /// The capacity is rounded up to a power of two of at least
    /// `MIN_CAPACITY`; both this and the lazy [`ByteTable::new`] path behave
    /// identically after the first insert.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_strategy(capacity, ProbeStrategy::default())
    }

    /// Creates an empty, unallocated table probing with `strategy`.
    #[must_use]
    pub fn with_strategy(strategy: ProbeStrategy) -> Self {
        Self { slots: Vec::new(), used: 0, strategy }
    }

    /// Creates a pre-allocated table probing with `strategy`.
    #[must_use]
    pub fn with_capacity_and_strategy(capacity: usize, strategy: ProbeStrategy) -> Self {
        let capacity = capacity.max(MIN_CAPACITY).next_power_of_two();
        Self { slots: vec![Slot::Empty; capacity], used: 0, strategy }
    }

    /// Returns the slot index holding `key`, if present.
    ///
    /// The scan stops at the first `Empty` slot on the probe path and never
    /// runs past a full probe period. Stopping early is sound because
    /// [`ByteTable::remove`] leaves a `Tombstone` rather than an `Empty`
    /// slot, so a live key can never hide behind a reusable gap.
    #[must_use]
    pub fn find(&self, key: u64) -> Option<usize> {
        let capacity = self.slots.len();
        for attempt in 0..capacity as u64 {
            let index = self.strategy.slot(capacity, key, attempt);
            match self.slots.get(index) {
                Some(Slot::Occupied { key: held, .. }) if *held == key => return Some(index),
                Some(Slot::Occupied { .. } | Slot::Tombstone) => {}
                None | Some(Slot::Empty) => return None,
            }
        }
        None
    }

    /// Inserts a copy of `value` under `key`, or a keyless marker entry when
    /// `value` is `None`, and returns the slot index used.
    ///
    /// An already-present key is updated in place: the previous buffer is
    /// released, the slot index and `used` are unchanged. The caller's
    /// buffer is copied in and may be reused immediately.
    ///
    /// # Errors
    ///
    /// Returns [`InsertError::EmptyValue`] when `value` is present but
    /// zero-length, leaving the table untouched.
    ///
    /// # Panics
    ///
    /// Panics if a full probe period finds no free slot, which the growth
    /// trigger keeps unreachable.
    pub fn insert(&mut self, key: u64, value: Option<&[u8]>) -> Result<usize, InsertError> {
        if value.is_some_and(<[u8]>::is_empty) {
            return Err(InsertError::EmptyValue);
        }

        if self.slots.len() < MIN_CAPACITY
            || self.used.saturating_mul(100) > self.slots.len().saturating_mul(LOAD_FACTOR_PERCENT)
        {
            self.grow();
        }

        Ok(self.place(key, value.map(Box::from)))
    }

    /// Removes `key`, releasing its owned value, and returns the slot index
    /// it occupied. Removing an absent key is a no-op returning `None`.
    ///
    /// The slot is left as a `Tombstone` so probe chains running through it
    /// stay intact; a later insert may reclaim it.
    pub fn remove(&mut self, key: u64) -> Option<usize> {
        let index = self.find(key)?;
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Tombstone;
            self.used = self.used.saturating_sub(1);
        }
        Some(index)
    }

    /// Returns a borrowed view of the bytes stored under `key`, or `default`
    /// when the key is absent.
    ///
    /// A marker entry yields its stored `None` rather than the default; only
    /// absent keys fall back. The view is invalidated by the next mutating
    /// call on the table.
    #[must_use]
    pub fn get<'a>(&'a self, key: u64, default: Option<&'a [u8]>) -> Option<&'a [u8]> {
        self.find(key).map_or(default, |index| match self.slots.get(index) {
            Some(Slot::Occupied { value, .. }) => value.as_deref(),
            _ => None,
        })
    }

    /// Returns an owned copy of the bytes stored under `key`, or `default`
    /// when the key is absent or holds a marker entry.
    #[must_use]
    pub fn get_copy(&self, key: u64, default: Option<Vec<u8>>) -> Option<Vec<u8>> {
        self.get(key, None).map(<[u8]>::to_vec).or(default)
    }

    /// Returns `true` if `key` is live in the table.
    #[must_use]
    pub fn contains_key(&self, key: u64) -> bool {
        self.find(key).is_some()
    }

    /// Returns the number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.used
    }

    /// Returns `true` if the table holds no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    /// Returns the slot count of the backing array.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the probe strategy fixed at construction.
    #[must_use]
    pub fn probe_strategy(&self) -> ProbeStrategy {
        self.strategy
    }

    /// Returns the current load factor of the table.
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        if self.slots.is_empty() {
            return 0.0;
        }
        self.used as f64 / self.slots.len() as f64
    }

    /// Drops every stored value and marks every slot `Empty`, keeping the
    /// allocation.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = Slot::Empty;
        }
        self.used = 0;
    }

    /// Returns an iterator over `(key, value)` pairs in unspecified order.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_> {
        Iter { slots: &self.slots, index: 0 }
    }

    /// Stores `value` under `key`, updating in place when the key is live
    /// and claiming the first reusable slot otherwise. Returns the index.
    fn place(&mut self, key: u64, value: Option<Box<[u8]>>) -> usize {
        if let Some(index) = self.find(key) {
            if let Some(Slot::Occupied { value: held, .. }) = self.slots.get_mut(index) {
                *held = value;
            }
            return index;
        }

        let index = self.first_free(key);
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = Slot::Occupied { key, value };
            self.used = self.used.saturating_add(1);
        }
        index
    }

    /// Returns the first `Empty` or `Tombstone` slot on `key`'s probe path.
    ///
    /// The growth trigger guarantees a free slot exists; a full probe period
    /// without one is a broken invariant.
    #[allow(clippy::panic)]
    fn first_free(&self, key: u64) -> usize {
        let capacity = self.slots.len();
        for attempt in 0..capacity as u64 {
            let index = self.strategy.slot(capacity, key, attempt);
            if matches!(self.slots.get(index), Some(Slot::Empty | Slot::Tombstone)) {
                return index;
            }
        }
        panic!("probe period exhausted without a free slot");
    }

    /// Doubles the capacity (minimum `MIN_CAPACITY`) and migrates every live
    /// entry into a fresh slot array, moving the owned buffers.
    ///
    /// The new array is fully built before the old table is released; an
    /// aborting allocation failure leaves the original table untouched.
    fn grow(&mut self) {
        let new_capacity = self.slots.len().saturating_mul(2).max(MIN_CAPACITY);
        let mut grown =
            Self { slots: vec![Slot::Empty; new_capacity], used: 0, strategy: self.strategy };

        for slot in mem::take(&mut self.slots) {
            if let Slot::Occupied { key, value } = slot {
                grown.place(key, value);
            }
        }

        *self = grown;
    }
}

/// Iterator over the live entries of a [`ByteTable`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    /// The slot array being walked.
    slots: &'a [Slot],
    /// Current position in the walk.
    index: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (u64, Option<&'a [u8]>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(slot) = self.slots.get(self.index) {
            self.index = self.index.saturating_add(1);
            if let Slot::Occupied { key, value } = slot {
                return Some((*key, value.as_deref()));
            }
        }
        None
    }
}
