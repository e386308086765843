//! Entity Pools
//!
//! Ordered entity storage that can be mutated while a pass walks it.
//!
//! During a pass, entries are addressed by [`Handle`]. Removing an entry
//! only marks it; later lookups and live iteration skip it. Spawned entries
//! wait in a pending list. [`EntityPool::commit`] ends the pass: marked
//! entries are dropped (keeping the order of the rest) and pending entries
//! are appended in spawn order. Handles are invalid after a commit.

/// Position of an entry within a pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Handle(usize);

impl Handle {
    /// Slot index.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
struct Slot<T> {
    item: T,
    removed: bool,
}

/// Ordered pool with deferred removal and spawning.
#[derive(Clone, Debug)]
pub struct EntityPool<T> {
    slots: Vec<Slot<T>>,
    spawned: Vec<T>,
    live: usize,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityPool<T> {
    /// Create an empty pool.
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            spawned: Vec::new(),
            live: 0,
        }
    }

    /// Live committed entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.live
    }

    /// No live committed entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Entries waiting for the next commit.
    #[inline]
    pub fn pending_spawns(&self) -> usize {
        self.spawned.len()
    }

    /// Handles of live entries, in order.
    pub fn handles(&self) -> Vec<Handle> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| !slot.removed)
            .map(|(index, _)| Handle(index))
            .collect()
    }

    /// Entry is present and not removed.
    #[inline]
    pub fn is_live(&self, handle: Handle) -> bool {
        self.slots.get(handle.0).is_some_and(|slot| !slot.removed)
    }

    /// Live entry at `handle`.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        self.slots
            .get(handle.0)
            .filter(|slot| !slot.removed)
            .map(|slot| &slot.item)
    }

    /// Mutable live entry at `handle`.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.0)
            .filter(|slot| !slot.removed)
            .map(|slot| &mut slot.item)
    }

    /// Mark an entry removed. Returns false if it was not live.
    pub fn remove(&mut self, handle: Handle) -> bool {
        match self.slots.get_mut(handle.0) {
            Some(slot) if !slot.removed => {
                slot.removed = true;
                self.live -= 1;
                true
            }
            _ => false,
        }
    }

    /// Swap a live entry in place, returning the old one.
    pub fn replace(&mut self, handle: Handle, item: T) -> Option<T> {
        let slot = self.slots.get_mut(handle.0).filter(|slot| !slot.removed)?;
        Some(std::mem::replace(&mut slot.item, item))
    }

    /// Queue an entry to be appended at the next commit.
    pub fn spawn(&mut self, item: T) {
        self.spawned.push(item);
    }

    /// Append immediately. Only for use between passes.
    pub fn push(&mut self, item: T) {
        self.slots.push(Slot { item, removed: false });
        self.live += 1;
    }

    /// Drop removed entries and append pending spawns.
    pub fn commit(&mut self) {
        self.slots.retain(|slot| !slot.removed);
        self.slots.extend(
            self.spawned
                .drain(..)
                .map(|item| Slot { item, removed: false }),
        );
        self.live = self.slots.len();
    }

    /// Remove everything, including pending spawns.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.spawned.clear();
        self.live = 0;
    }

    /// Live entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.slots
            .iter()
            .filter(|slot| !slot.removed)
            .map(|slot| &slot.item)
    }

    /// Live entries in order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.slots
            .iter_mut()
            .filter(|slot| !slot.removed)
            .map(|slot| &mut slot.item)
    }
}

impl<T> FromIterator<T> for EntityPool<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut pool = Self::new();
        for item in iter {
            pool.push(item);
        }
        pool
    }
}

// =============================================================================
// TESTS
// =============================================================================
