//! Fixed-capacity slot arena
//!
//! Balls, falling pickups and active effects all live in bounded pools: a
//! slot is either occupied or free, nothing is allocated after construction,
//! and insertion claims the lowest free slot. Slot indices are stable for the
//! lifetime of an entry.

/// A bounded arena of `N` slots
#[derive(Debug, Clone)]
pub struct Pool<T, const N: usize> {
    slots: [Option<T>; N],
}

impl<T, const N: usize> Default for Pool<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> Pool<T, N> {
    pub fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }

    /// Claim the lowest free slot. Returns `None` (and drops `value`) if full.
    pub fn insert(&mut self, value: T) -> Option<usize> {
        let slot = self.slots.iter().position(Option::is_none)?;
        self.slots[slot] = Some(value);
        Some(slot)
    }

    /// Put `value` into a specific slot, replacing any occupant
    pub fn insert_at(&mut self, slot: usize, value: T) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = Some(value);
        }
    }

    pub fn remove(&mut self, slot: usize) -> Option<T> {
        self.slots.get_mut(slot).and_then(Option::take)
    }

    pub fn get(&self, slot: usize) -> Option<&T> {
        self.slots.get(slot).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, slot: usize) -> Option<&mut T> {
        self.slots.get_mut(slot).and_then(Option::as_mut)
    }

    pub fn is_occupied(&self, slot: usize) -> bool {
        self.get(slot).is_some()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    #[cfg(test)]
    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
    }

    /// Occupied entries with their slot index, in slot order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i, v)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (i, v)))
    }

    /// Free every slot whose entry fails the predicate
    pub fn retain(&mut self, mut keep: impl FnMut(usize, &mut T) -> bool) {
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let kept = match slot {
                Some(v) => keep(i, v),
                None => continue,
            };
            if !kept {
                *slot = None;
            }
        }
    }

    /// First occupied entry in slot order
    pub fn first(&self) -> Option<(usize, &T)> {
        self.iter().next()
    }

    /// Indices of free slots, in slot order
    pub fn free_slots(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_none())
            .map(|(i, _)| i)
    }
}
