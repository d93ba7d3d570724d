//! Fixed-capacity entity pools
//!
//! A pool is a slot array sized once at construction. An occupied slot is an
//! active entity; releasing a slot leaves a tombstone that the next `acquire`
//! reuses. Slots are never compacted, so an index stays valid for as long as
//! the entity it names is active.

use thiserror::Error;

/// Errors reported by a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PoolError {
    /// Every slot is occupied
    #[error("pool full ({capacity} slots in use)")]
    Full { capacity: usize },
}

/// Fixed-capacity slot array with tombstone reuse
#[derive(Debug, Clone)]
pub struct Pool<T> {
    slots: Vec<Option<T>>,
}

impl<T> Pool<T> {
    /// Create a pool with `capacity` empty slots
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn active_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Store `value` in the lowest free slot and return its index
    pub fn acquire(&mut self, value: T) -> Result<usize, PoolError> {
        match self.slots.iter().position(Option::is_none) {
            Some(index) => {
                self.slots[index] = Some(value);
                Ok(index)
            }
            None => Err(PoolError::Full {
                capacity: self.capacity(),
            }),
        }
    }

    /// Free a slot, returning the entity that occupied it
    pub fn release(&mut self, index: usize) -> Option<T> {
        debug_assert!(index < self.capacity(), "slot {index} out of range");
        self.slots.get_mut(index).and_then(Option::take)
    }

    /// Free every slot
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    pub fn is_active(&self, index: usize) -> bool {
        matches!(self.slots.get(index), Some(Some(_)))
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.slots.get_mut(index).and_then(Option::as_mut)
    }

    /// Active entities with their slot index, in index order
    pub fn iter_active(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i, v)))
    }

    /// Mutable access to active entities, in index order
    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (i, v)))
    }

    /// Run `f` on every active entity; entities for which it returns `false`
    /// are released.
    pub fn retain_active(&mut self, mut f: impl FnMut(&mut T) -> bool) {
        for slot in &mut self.slots {
            let keep = match slot.as_mut() {
                Some(value) => f(value),
                None => continue,
            };
            if !keep {
                *slot = None;
            }
        }
    }

    /// Snapshot of the currently active slot indices
    pub fn active_indices(&self) -> Vec<usize> {
        self.iter_active().map(|(i, _)| i).collect()
    }
}
