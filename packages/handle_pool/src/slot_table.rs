use crate::{FreeList, Handle};

/// Structural state of a fixed set of slots: which slots are occupied, what generation each slot
/// is in and which slots are free for the next insertion.
///
/// The table knows nothing about the objects stored in the slots. The pools pair it with a
/// payload store indexed by the same slot indices and keep the two in agreement: a payload is live
/// exactly when the table says its slot is occupied.
#[derive(Debug)]
pub(crate) struct SlotTable {
    slots: Box<[SlotState]>,

    free_list: FreeList,
}

#[derive(Clone, Copy, Debug, Default)]
struct SlotState {
    /// Advances by one every time the slot is vacated, so handles issued for a previous occupant
    /// no longer match. Wraps around on overflow.
    generation: u32,

    occupied: bool,
}

impl SlotTable {
    /// Creates a table of `capacity` vacant slots, all in generation zero.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or too large to be addressed by a [`Handle`].
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "handle pool must have non-zero capacity");

        // The highest index is then at most u32::MAX - 1, which keeps it clear of the sentinel.
        let capacity_u32 = u32::try_from(capacity).unwrap_or_else(|_| {
            panic!("handle pool capacity {capacity} exceeds the addressable maximum of u32::MAX slots")
        });

        Self {
            slots: vec![SlotState::default(); capacity].into_boxed_slice(),
            free_list: FreeList::with_all_free(capacity_u32),
        }
    }

    #[must_use]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of vacant slots.
    #[must_use]
    pub(crate) fn free(&self) -> usize {
        self.free_list.len()
    }

    /// Number of occupied slots.
    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.capacity()
            .checked_sub(self.free())
            .expect("free list can never hold more entries than there are slots")
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.free() == self.capacity()
    }

    #[must_use]
    pub(crate) fn is_full(&self) -> bool {
        self.free_list.is_empty()
    }

    /// The slot that the next [`occupy()`][Self::occupy] will fill, if any slot is vacant.
    ///
    /// Peeking does not reserve anything. This allows the caller to construct the payload before
    /// committing to the slot, so a failed construction leaves the table untouched.
    #[must_use]
    pub(crate) fn next_vacant(&self) -> Option<u32> {
        self.free_list.peek()
    }

    /// Marks the slot returned by [`next_vacant()`][Self::next_vacant] as occupied and returns
    /// the handle for it. The caller must already have placed the payload into the slot.
    ///
    /// # Panics
    ///
    /// Panics if there is no vacant slot.
    pub(crate) fn occupy(&mut self) -> Handle {
        let index = self
            .free_list
            .pop()
            .expect("occupy() is only called after next_vacant() found a vacant slot");

        let slot = self.slot_mut(index);
        debug_assert!(!slot.occupied, "slot {index} on the free list was occupied");

        slot.occupied = true;

        Handle::new(index, slot.generation)
    }

    /// Vacates the slot referenced by `handle` if the handle is valid, advancing the slot's
    /// generation and pushing it onto the free list.
    ///
    /// Returns the vacated index so the caller can drop the payload in it, or `None` if the
    /// handle did not resolve to an occupied slot (in which case nothing changes).
    pub(crate) fn vacate(&mut self, handle: Handle) -> Option<u32> {
        if !self.is_valid(handle) {
            return None;
        }

        let index = handle.index();
        let slot = self.slot_mut(index);

        slot.occupied = false;
        slot.generation = slot.generation.wrapping_add(1);

        self.free_list.push(index);

        Some(index)
    }

    /// Whether `handle` refers to an occupied slot in the generation the handle was issued for.
    ///
    /// Never panics, no matter what handle is passed in.
    #[must_use]
    pub(crate) fn is_valid(&self, handle: Handle) -> bool {
        if !handle.is_valid() {
            return false;
        }

        let Ok(index) = usize::try_from(handle.index()) else {
            return false;
        };

        self.slots
            .get(index)
            .is_some_and(|slot| slot.occupied && slot.generation == handle.generation())
    }

    /// Indices of all occupied slots, in ascending order.
    pub(crate) fn occupied_indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots
            .iter()
            .zip(0_u32..)
            .filter(|(slot, _)| slot.occupied)
            .map(|(_, index)| index)
    }

    fn slot_mut(&mut self, index: u32) -> &mut SlotState {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get_mut(i))
            .unwrap_or_else(|| panic!("slot index {index} out of bounds"))
    }

    #[cfg_attr(test, mutants::skip)] // This is essentially test logic, mutation is meaningless.
    #[cfg(any(test, debug_assertions))]
    pub(crate) fn integrity_check(&self) {
        let mut seen_free = vec![false; self.capacity()];

        for index in self.free_list.iter() {
            let seen = usize::try_from(index)
                .ok()
                .and_then(|i| seen_free.get_mut(i))
                .unwrap_or_else(|| panic!("free list holds out of bounds index {index}"));

            assert!(!*seen, "free list holds index {index} more than once");
            *seen = true;
        }

        for (slot, is_free) in self.slots.iter().zip(&seen_free) {
            assert!(
                slot.occupied != *is_free,
                "slot occupancy disagrees with free list membership: {slot:?}"
            );
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn occupy_next(table: &mut SlotTable) -> Handle {
        assert!(table.next_vacant().is_some());
        table.occupy()
    }

    #[test]
    fn starts_empty() {
        let table = SlotTable::new(3);

        assert_eq!(table.capacity(), 3);
        assert_eq!(table.free(), 3);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert!(!table.is_full());
        assert_eq!(table.occupied_indices().count(), 0);

        table.integrity_check();
    }

    #[test]
    fn occupy_issues_peeked_index_in_current_generation() {
        let mut table = SlotTable::new(3);

        let peeked = table.next_vacant().unwrap();
        let handle = table.occupy();

        assert_eq!(handle.index(), peeked);
        assert_eq!(handle.generation(), 0);
        assert!(table.is_valid(handle));
        assert_eq!(table.len(), 1);

        table.integrity_check();
    }

    #[test]
    fn peek_does_not_reserve() {
        let mut table = SlotTable::new(2);

        let first = table.next_vacant();
        let second = table.next_vacant();

        assert_eq!(first, second);
        assert_eq!(table.free(), 2);

        let handle = table.occupy();
        assert_eq!(Some(handle.index()), first);
    }

    #[test]
    fn fills_up() {
        let mut table = SlotTable::new(2);

        let a = occupy_next(&mut table);
        let b = occupy_next(&mut table);

        assert_ne!(a, b);
        assert!(table.is_full());
        assert_eq!(table.next_vacant(), None);
        assert_eq!(table.free(), 0);

        table.integrity_check();
    }

    #[test]
    fn vacate_advances_generation_and_frees_slot() {
        let mut table = SlotTable::new(2);

        let handle = occupy_next(&mut table);

        assert_eq!(table.vacate(handle), Some(handle.index()));
        assert!(!table.is_valid(handle));
        assert_eq!(table.free(), 2);

        // Last freed, first reused.
        let reused = occupy_next(&mut table);
        assert_eq!(reused.index(), handle.index());
        assert_eq!(reused.generation(), handle.generation() + 1);
        assert!(!table.is_valid(handle));
        assert!(table.is_valid(reused));

        table.integrity_check();
    }

    #[test]
    fn vacate_stale_is_noop() {
        let mut table = SlotTable::new(2);

        let handle = occupy_next(&mut table);
        assert!(table.vacate(handle).is_some());

        assert_eq!(table.vacate(handle), None);
        assert_eq!(table.free(), 2);

        table.integrity_check();
    }

    #[test]
    fn vacate_invalid_is_noop() {
        let mut table = SlotTable::new(2);
        _ = occupy_next(&mut table);

        assert_eq!(table.vacate(Handle::invalid()), None);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn validity_requires_all_conditions() {
        let mut table = SlotTable::new(2);
        let handle = occupy_next(&mut table);

        assert!(table.is_valid(handle));

        // Sentinel.
        assert!(!table.is_valid(Handle::invalid()));

        // Out of bounds.
        assert!(!table.is_valid(Handle::new(2, 0)));
        assert!(!table.is_valid(Handle::new(u32::MAX - 1, 0)));

        // Vacant slot in the right generation.
        let vacant_index = table.next_vacant().unwrap();
        assert!(!table.is_valid(Handle::new(vacant_index, 0)));

        // Occupied slot but wrong generation.
        assert!(!table.is_valid(Handle::new(handle.index(), handle.generation() + 1)));
    }

    #[test]
    fn generation_wraps_on_overflow() {
        let mut table = SlotTable::new(1);

        table.slot_mut(0).generation = u32::MAX;

        let handle = occupy_next(&mut table);
        assert_eq!(handle.generation(), u32::MAX);

        assert!(table.vacate(handle).is_some());

        let next = occupy_next(&mut table);
        assert_eq!(next.generation(), 0);
        assert!(!table.is_valid(handle));
    }

    #[test]
    fn occupied_indices_lists_only_occupied() {
        let mut table = SlotTable::new(3);

        let a = occupy_next(&mut table);
        let b = occupy_next(&mut table);
        let c = occupy_next(&mut table);

        assert!(table.vacate(b).is_some());

        let mut expected = vec![a.index(), c.index()];
        expected.sort_unstable();

        assert_eq!(table.occupied_indices().collect::<Vec<_>>(), expected);
    }

    #[test]
    #[should_panic]
    fn zero_capacity_panics() {
        drop(SlotTable::new(0));
    }

    #[test]
    #[should_panic]
    fn occupy_when_full_panics() {
        let mut table = SlotTable::new(1);

        _ = table.occupy();
        _ = table.occupy();
    }
}
