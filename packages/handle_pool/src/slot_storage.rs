use std::any::type_name;
use std::iter;
use std::mem::MaybeUninit;

use parking_lot::{
    MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};

/// The payload half of a [`HandlePool`][crate::HandlePool]: one contiguous, heap-allocated array
/// of possibly-uninitialized values, allocated once at construction.
///
/// Storage does not know which slots hold a live value - that is tracked by the
/// [`SlotTable`][crate::SlotTable] that the pool pairs it with. All the accessors that assume a
/// live value are therefore `unsafe` and rely on the pool to only call them for occupied slots.
///
/// Every cell has its own reader/writer lock. This lock only coordinates access to the payload by
/// views; the structural state of the pool is protected by the pool-wide lock. A cell lock is
/// never contended while the pool-wide lock is held exclusively because every cell guard is owned
/// by a view, and every view also holds the pool-wide lock in shared mode.
#[derive(Debug)]
pub(crate) struct SlotStorage<T> {
    cells: Box<[RwLock<MaybeUninit<T>>]>,
}

impl<T> SlotStorage<T> {
    #[must_use]
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            cells: iter::repeat_with(|| RwLock::new(MaybeUninit::uninit()))
                .take(capacity)
                .collect(),
        }
    }

    fn cell(&self, index: u32) -> &RwLock<MaybeUninit<T>> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get(i))
            .unwrap_or_else(|| {
                panic!(
                    "slot {index} out of bounds in storage of {}",
                    type_name::<T>()
                )
            })
    }

    /// Exclusive access to a cell that nobody else may be looking at.
    fn cell_exclusive(&self, index: u32) -> RwLockWriteGuard<'_, MaybeUninit<T>> {
        self.cell(index).try_write().unwrap_or_else(|| {
            panic!(
                "slot {index} in storage of {} is being viewed while the pool is exclusively locked",
                type_name::<T>()
            )
        })
    }

    /// Moves `value` into the slot.
    ///
    /// The caller must hold the pool-wide lock exclusively and the slot must be vacant. Writing
    /// into an occupied slot would leak its previous value.
    pub(crate) fn put(&self, index: u32, value: T) {
        self.cell_exclusive(index).write(value);
    }

    /// Drops the value in the slot, leaving the slot uninitialized.
    ///
    /// # Safety
    ///
    /// The slot must hold a live value and the caller must hold the pool-wide lock exclusively.
    /// After this call the slot must be treated as vacant.
    pub(crate) unsafe fn drop_in_place(&self, index: u32) {
        let mut cell = self.cell_exclusive(index);

        // SAFETY: Forwarding guarantee from caller that the slot holds a live value.
        unsafe {
            cell.assume_init_drop();
        }
    }

    /// Drops the value in the slot through an exclusive reference to the storage.
    ///
    /// # Safety
    ///
    /// The slot must hold a live value. After this call the slot must be treated as vacant.
    pub(crate) unsafe fn drop_in_place_mut(&mut self, index: u32) {
        let cell = usize::try_from(index)
            .ok()
            .and_then(|i| self.cells.get_mut(i))
            .unwrap_or_else(|| {
                panic!(
                    "slot {index} out of bounds in storage of {}",
                    type_name::<T>()
                )
            })
            .get_mut();

        // SAFETY: Forwarding guarantee from caller that the slot holds a live value.
        unsafe {
            cell.assume_init_drop();
        }
    }

    /// Shared access to the value in the slot, coexisting with other shared accessors.
    ///
    /// Acquisition is recursive, so a thread that already holds a shared guard for this slot can
    /// take another one even if an exclusive acquisition is queued.
    ///
    /// # Safety
    ///
    /// The slot must hold a live value and must keep holding it for as long as the returned guard
    /// exists. The pool ensures this by holding the pool-wide lock in shared mode for longer than
    /// the guard lives.
    pub(crate) unsafe fn read(&self, index: u32) -> MappedRwLockReadGuard<'_, T> {
        RwLockReadGuard::map(self.cell(index).read_recursive(), |value| {
            // SAFETY: Forwarding guarantee from caller that the slot holds a live value.
            unsafe { value.assume_init_ref() }
        })
    }

    /// Exclusive access to the value in the slot, waiting for any other accessors of the same slot
    /// to go away first.
    ///
    /// # Safety
    ///
    /// Same as [`read()`][Self::read].
    pub(crate) unsafe fn write(&self, index: u32) -> MappedRwLockWriteGuard<'_, T> {
        RwLockWriteGuard::map(self.cell(index).write(), |value| {
            // SAFETY: Forwarding guarantee from caller that the slot holds a live value.
            unsafe { value.assume_init_mut() }
        })
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    struct DropCounter {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    #[test]
    fn put_then_read_and_write() {
        let storage = SlotStorage::<u32>::new(2);

        storage.put(1, 42);

        // SAFETY: We just put a value into slot 1.
        unsafe {
            assert_eq!(*storage.read(1), 42);

            *storage.write(1) = 43;

            assert_eq!(*storage.read(1), 43);
        }

        // SAFETY: Slot 1 holds a value and we drop it exactly once.
        unsafe {
            storage.drop_in_place(1);
        }
    }

    #[test]
    fn shared_reads_coexist() {
        let storage = SlotStorage::<u32>::new(1);
        storage.put(0, 7);

        // SAFETY: Slot 0 holds a value for the lifetime of both guards.
        unsafe {
            let a = storage.read(0);
            let b = storage.read(0);

            assert_eq!(*a, *b);
        }
    }

    #[test]
    fn drop_in_place_drops_once() {
        let drops = Rc::new(Cell::new(0));
        let mut storage = SlotStorage::new(2);

        storage.put(
            0,
            DropCounter {
                drops: Rc::clone(&drops),
            },
        );
        storage.put(
            1,
            DropCounter {
                drops: Rc::clone(&drops),
            },
        );

        // SAFETY: Slot 0 holds a value and we drop it exactly once.
        unsafe {
            storage.drop_in_place(0);
        }
        assert_eq!(drops.get(), 1);

        // SAFETY: Slot 1 holds a value and we drop it exactly once.
        unsafe {
            storage.drop_in_place_mut(1);
        }
        assert_eq!(drops.get(), 2);

        // Dropping the storage itself never touches the (now uninitialized) cells.
        drop(storage);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    #[should_panic]
    fn put_while_viewed_panics() {
        let storage = SlotStorage::<u32>::new(1);
        storage.put(0, 1);

        // SAFETY: Slot 0 holds a value for the lifetime of the guard.
        let _guard = unsafe { storage.read(0) };

        storage.put(0, 2);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_panics() {
        let storage = SlotStorage::<u32>::new(1);
        storage.put(1, 1);
    }
}
