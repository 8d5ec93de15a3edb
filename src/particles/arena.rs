/// Handle to an occupied arena slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub(crate) u32);

impl SlotId {
    /// Slot index inside the arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Fixed-capacity slot storage with an explicit free list.
///
/// All slots are allocated up front; insert and remove only move indices between the free
/// list and the occupied set, so the steady state never allocates.
#[derive(Clone, Debug)]
pub struct SlotArena<T> {
    slots: Vec<Option<T>>,
    // LIFO: the most recently freed slot is reused first.
    free: Vec<u32>,
    len: usize,
}

impl<T> SlotArena<T> {
    /// Arena holding at most `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self {
            slots,
            free: (0..capacity as u32).rev().collect(),
            len: 0,
        }
    }

    /// Maximum number of live values.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// `true` when no value is live.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// `true` when every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.free.is_empty()
    }

    /// Store `value`, or hand it back when the arena is full.
    pub fn insert(&mut self, value: T) -> Result<SlotId, T> {
        let Some(i) = self.free.pop() else {
            return Err(value);
        };
        self.slots[i as usize] = Some(value);
        self.len += 1;
        Ok(SlotId(i))
    }

    /// Remove and return the value at `id`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let v = self.slots.get_mut(id.index())?.take()?;
        self.free.push(id.0);
        self.len -= 1;
        Some(v)
    }

    /// Value at `id`.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    /// Mutable value at `id`.
    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// Live values in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (SlotId(i as u32), v)))
    }

    /// Mutable live values in slot order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SlotId, &mut T)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(i, s)| s.as_mut().map(|v| (SlotId(i as u32), v)))
    }

    /// Keep values for which `keep` returns `true`; returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&mut T) -> bool) -> usize {
        let mut removed = 0;
        for (i, slot) in self.slots.iter_mut().enumerate() {
            let drop_it = match slot {
                Some(v) => !keep(v),
                None => false,
            };
            if drop_it {
                *slot = None;
                self.free.push(i as u32);
                removed += 1;
            }
        }
        self.len -= removed;
        removed
    }

    /// Remove every value, keeping the allocation.
    pub fn clear(&mut self) {
        for s in &mut self.slots {
            *s = None;
        }
        self.free.clear();
        self.free.extend((0..self.slots.len() as u32).rev());
        self.len = 0;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/arena.rs"]
mod tests;
