use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::thread;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::{
    CreateError, DropPolicy, Handle, HandlePoolBuilder, SlotStorage, SlotTable, View, ViewMut,
};

/// A thread-safe object pool with a fixed capacity of `CAPACITY` objects of type `T`.
///
/// All objects live in one contiguous array allocated when the pool is created. In release builds,
/// creating and destroying objects never allocates (debug builds verify the internal bookkeeping
/// on every create, which does allocate). Instead of references, the pool hands out [`Handle`]s,
/// which are small `Copy` values that can be stored anywhere. A handle keeps working until the
/// object it refers to is destroyed, after which it is permanently rejected, even if its slot is
/// reused for a new object.
///
/// # Access
///
/// Objects are accessed through [`get()`][Self::get] and [`get_mut()`][Self::get_mut], which return
/// a [`View`] or [`ViewMut`]. A view keeps the pool locked in shared mode for as long as it exists,
/// which guarantees that the object stays alive while you look at it:
///
/// * [`create()`][Self::create] and [`destroy()`][Self::destroy] lock the pool exclusively, so they
///   wait until no views exist.
/// * Views, [`is_valid()`][Self::is_valid] and the size queries lock the pool in shared mode and
///   only wait while a `create()` or `destroy()` is in progress.
///
/// Views of different objects never block each other. Views of the same object follow the usual
/// reader/writer rules: many [`View`]s or one [`ViewMut`].
///
/// # Deadlocks
///
/// Shared locking is recursive, so taking a second [`View`] on a thread that already holds a view
/// never deadlocks. However, the following will deadlock and must be avoided:
///
/// * calling [`create()`][Self::create] or [`destroy()`][Self::destroy] on a thread that holds a
///   view of the same pool;
/// * calling [`get_mut()`][Self::get_mut] for an object that the same thread already holds a
///   [`View`] of;
/// * calling [`get()`][Self::get] or [`get_mut()`][Self::get_mut] for an object that the same
///   thread already holds a [`ViewMut`] of.
///
/// Because shared locking is recursive, a steady stream of overlapping views can delay
/// `create()` and `destroy()` indefinitely. Keep views short-lived.
///
/// # Example
///
/// ```rust
/// use handle_pool::HandlePool;
///
/// let pool = HandlePool::<u32, 2>::new();
///
/// let h1 = pool.create(10);
/// let h2 = pool.create(20);
///
/// // The pool is full.
/// assert!(!pool.create(40).is_valid());
///
/// assert!(pool.destroy(h1));
///
/// // The freed slot is reused in a new generation.
/// let h3 = pool.create(30);
/// assert_eq!(h3.index(), h1.index());
/// assert_eq!(h3.generation(), h1.generation() + 1);
///
/// assert_eq!(*pool.get(h2).unwrap(), 20);
/// assert!(pool.get(h1).is_none());
/// ```
pub struct HandlePool<T, const CAPACITY: usize> {
    /// Occupancy, generations and the free list. This is the pool-wide lock: everything that
    /// changes the structure of the pool holds it exclusively, everything else in shared mode.
    table: RwLock<SlotTable>,

    storage: SlotStorage<T>,

    drop_policy: DropPolicy,
}

impl<T, const CAPACITY: usize> HandlePool<T, CAPACITY> {
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub(crate) fn new_inner(drop_policy: DropPolicy) -> Self {
        Self {
            table: RwLock::new(SlotTable::new(CAPACITY)),
            storage: SlotStorage::new(CAPACITY),
            drop_policy,
        }
    }

    /// Creates a new [`HandlePool`] with the default configuration.
    ///
    /// Every slot starts out vacant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::HandlePool;
    ///
    /// let pool = HandlePool::<String, 16>::new();
    ///
    /// assert_eq!(pool.capacity(), 16);
    /// assert_eq!(pool.free(), 16);
    /// assert!(pool.is_empty());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts building a new [`HandlePool`].
    ///
    /// Use this when you want to customize the pool configuration beyond the defaults.
    pub fn builder() -> HandlePoolBuilder<T, CAPACITY> {
        HandlePoolBuilder::new()
    }

    /// The fixed number of objects the pool can hold.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of vacant slots, i.e. how many more objects can be created right now.
    ///
    /// The value may be out of date as soon as it is returned if other threads use the pool.
    #[must_use]
    pub fn free(&self) -> usize {
        self.table.read_recursive().free()
    }

    /// The number of live objects in the pool.
    ///
    /// The value may be out of date as soon as it is returned if other threads use the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.read_recursive().len()
    }

    /// Whether the pool holds no live objects.
    ///
    /// The value may be out of date as soon as it is returned if other threads use the pool.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.read_recursive().is_empty()
    }

    /// Whether every slot of the pool is occupied.
    ///
    /// The value may be out of date as soon as it is returned if other threads use the pool.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.table.read_recursive().is_full()
    }

    /// Moves `value` into the pool and returns a handle to it.
    ///
    /// Returns [`Handle::invalid()`] if the pool is full, in which case `value` is dropped.
    ///
    /// Waits until no views of the pool exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::HandlePool;
    ///
    /// let pool = HandlePool::<u64, 1>::new();
    ///
    /// let handle = pool.create(42);
    /// assert!(pool.is_valid(handle));
    ///
    /// // There is no room for a second object.
    /// assert!(!pool.create(43).is_valid());
    /// ```
    pub fn create(&self, value: T) -> Handle {
        self.create_with(|| value)
    }

    /// Constructs an object directly in the pool and returns a handle to it.
    ///
    /// The constructor is only called if there is room in the pool; otherwise this returns
    /// [`Handle::invalid()`]. The constructor runs while the pool is exclusively locked, so it
    /// must not access the pool itself.
    ///
    /// If the constructor panics, the pool is left exactly as it was before the call.
    pub fn create_with<F>(&self, constructor: F) -> Handle
    where
        F: FnOnce() -> T,
    {
        match self.try_create_with(|| Ok::<T, Infallible>(constructor())) {
            Ok(handle) => handle,
            Err(CreateError::Exhausted { .. }) => Handle::invalid(),
            Err(CreateError::Construction(never)) => match never {},
        }
    }

    /// Constructs an object directly in the pool using a constructor that can fail.
    ///
    /// The constructor is only called if there is room in the pool. It runs while the pool is
    /// exclusively locked, so it must not access the pool itself.
    ///
    /// # Errors
    ///
    /// Returns [`CreateError::Exhausted`] if the pool is full and [`CreateError::Construction`] if
    /// the constructor fails. Either way, the pool is left exactly as it was before the call.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::num::ParseIntError;
    ///
    /// use handle_pool::{CreateError, HandlePool};
    ///
    /// let pool = HandlePool::<u32, 4>::new();
    ///
    /// let handle = pool.try_create_with(|| "42".parse::<u32>()).unwrap();
    /// assert_eq!(*pool.get(handle).unwrap(), 42);
    ///
    /// let result = pool.try_create_with(|| "forty-two".parse::<u32>());
    /// assert!(matches!(result, Err(CreateError::Construction(_))));
    /// assert_eq!(pool.len(), 1);
    /// ```
    pub fn try_create_with<F, E>(&self, constructor: F) -> Result<Handle, CreateError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let mut table = self.table.write();

        #[cfg(debug_assertions)]
        table.integrity_check();

        let Some(index) = table.next_vacant() else {
            debug!(
                item_type = type_name::<T>(),
                capacity = CAPACITY,
                "handle pool is full, refusing to create object"
            );

            return Err(CreateError::Exhausted {
                capacity: CAPACITY,
            });
        };

        // Nothing has been reserved yet, so a failing or panicking constructor leaves no trace.
        let value = constructor().map_err(|error| {
            debug!(
                item_type = type_name::<T>(),
                index, "constructor of pooled object failed"
            );

            CreateError::Construction(error)
        })?;

        self.storage.put(index, value);
        let handle = table.occupy();

        trace!(
            item_type = type_name::<T>(),
            index = handle.index(),
            generation = handle.generation(),
            "created object"
        );

        Ok(handle)
    }

    /// Destroys the object that `handle` refers to, making its slot available for reuse.
    ///
    /// Returns `true` if an object was destroyed, or `false` if the handle did not refer to a live
    /// object (e.g. it was already destroyed). Destroying a stale handle is harmless and does not
    /// affect whatever object may have since taken its slot.
    ///
    /// Waits until no views of the pool exist.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::HandlePool;
    ///
    /// let pool = HandlePool::<u32, 4>::new();
    ///
    /// let handle = pool.create(42);
    ///
    /// assert!(pool.destroy(handle));
    /// assert!(!pool.destroy(handle));
    /// assert!(!pool.is_valid(handle));
    /// ```
    pub fn destroy(&self, handle: Handle) -> bool {
        let mut table = self.table.write();

        // The slot is vacated before the object is dropped. If the object panics in its drop,
        // the slot is already considered empty and nobody will try to drop the object again.
        let Some(index) = table.vacate(handle) else {
            trace!(
                item_type = type_name::<T>(),
                index = handle.index(),
                generation = handle.generation(),
                "ignoring destroy of handle that does not refer to a live object"
            );

            return false;
        };

        trace!(
            item_type = type_name::<T>(),
            index,
            generation = handle.generation(),
            "destroying object"
        );

        // SAFETY: The table said the slot was occupied until just now and we hold the
        // pool-wide lock exclusively.
        unsafe {
            self.storage.drop_in_place(index);
        }

        true
    }

    /// Returns a read-only view of the object that `handle` refers to, or `None` if the handle
    /// does not refer to a live object.
    ///
    /// The pool stays locked in shared mode until the view is dropped, so the object cannot be
    /// destroyed while you hold the view.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::HandlePool;
    ///
    /// let pool = HandlePool::<String, 4>::new();
    ///
    /// let handle = pool.create("hello".to_string());
    ///
    /// {
    ///     let view = pool.get(handle).unwrap();
    ///     assert_eq!(view.len(), 5);
    /// }
    ///
    /// pool.destroy(handle);
    /// assert!(pool.get(handle).is_none());
    /// ```
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<View<'_, T>> {
        let table = self.table.read_recursive();

        if !table.is_valid(handle) {
            return None;
        }

        // SAFETY: The slot is occupied and stays occupied while `table` is held, which the view
        // does for longer than it holds the payload guard.
        let value = unsafe { self.storage.read(handle.index()) };

        Some(View::new(value, table, handle))
    }

    /// Returns a mutable view of the object that `handle` refers to, or `None` if the handle does
    /// not refer to a live object.
    ///
    /// Like [`get()`][Self::get], this keeps the pool locked in shared mode while the view exists.
    /// Access to this one object is exclusive: if other views of it exist, this waits until they
    /// are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::HandlePool;
    ///
    /// let pool = HandlePool::<u32, 4>::new();
    ///
    /// let handle = pool.create(10);
    ///
    /// *pool.get_mut(handle).unwrap() = 999;
    ///
    /// assert_eq!(*pool.get(handle).unwrap(), 999);
    /// ```
    #[must_use]
    pub fn get_mut(&self, handle: Handle) -> Option<ViewMut<'_, T>> {
        let table = self.table.read_recursive();

        if !table.is_valid(handle) {
            return None;
        }

        // SAFETY: The slot is occupied and stays occupied while `table` is held, which the view
        // does for longer than it holds the payload guard.
        let value = unsafe { self.storage.write(handle.index()) };

        Some(ViewMut::new(value, table, handle))
    }

    /// Whether `handle` refers to a live object in this pool.
    ///
    /// The answer reflects the instant of the call only. Another thread may destroy the object
    /// right after this returns `true` - use [`get()`][Self::get] if you need the object to stay
    /// alive while you use it.
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.table.read_recursive().is_valid(handle)
    }
}

impl<T, const CAPACITY: usize> Default for HandlePool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for HandlePool<T, CAPACITY> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("capacity", &CAPACITY)
            .field("len", &self.len())
            .field("drop_policy", &self.drop_policy)
            .finish_non_exhaustive()
    }
}

impl<T, const CAPACITY: usize> Drop for HandlePool<T, CAPACITY> {
    fn drop(&mut self) {
        let table = self.table.get_mut();
        let remaining = table.len();

        if remaining > 0 {
            debug!(
                item_type = type_name::<T>(),
                remaining, "dropping handle pool that still holds objects"
            );
        }

        for index in table.occupied_indices() {
            // SAFETY: The table says the slot is occupied. The pool is going away, so nobody
            // will look at the slot again.
            unsafe {
                self.storage.drop_in_place_mut(index);
            }
        }

        // If we are already panicking, we do not want to panic again because that will
        // simply obscure whatever the original panic was, leading to debug difficulties.
        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                remaining == 0,
                "dropped a handle pool of {} that still held {remaining} objects with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::cell::Cell;
    use std::panic::{AssertUnwindSafe, catch_unwind};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use static_assertions::{assert_impl_all, assert_not_impl_any};

    use super::*;

    assert_impl_all!(HandlePool<u32, 4>: Send, Sync, fmt::Debug, Default);
    assert_impl_all!(HandlePool<Cell<u32>, 4>: Send);
    assert_not_impl_any!(HandlePool<Cell<u32>, 4>: Sync);
    assert_not_impl_any!(HandlePool<Rc<u32>, 4>: Send, Sync, Clone);

    struct DropCounter {
        drops: Arc<AtomicUsize>,
    }

    impl Drop for DropCounter {
        fn drop(&mut self) {
            self.drops.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[test]
    fn smoke_test() {
        let pool = HandlePool::<u32, 3>::new();

        let a = pool.create(42);
        let b = pool.create(43);
        let c = pool.create(44);

        assert_eq!(*pool.get(a).unwrap(), 42);
        assert_eq!(*pool.get(b).unwrap(), 43);
        assert_eq!(*pool.get(c).unwrap(), 44);

        assert_eq!(pool.len(), 3);
        assert!(pool.is_full());

        assert!(pool.destroy(b));

        assert_eq!(pool.len(), 2);

        let d = pool.create(45);

        assert_eq!(*pool.get(a).unwrap(), 42);
        assert_eq!(*pool.get(c).unwrap(), 44);
        assert_eq!(*pool.get(d).unwrap(), 45);
        assert!(pool.get(b).is_none());
    }

    #[test]
    fn new_pool_is_empty() {
        let pool = HandlePool::<u32, 5>::new();

        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.free(), 5);
        assert_eq!(pool.len(), 0);
        assert!(pool.is_empty());
        assert!(!pool.is_full());
    }

    #[test]
    fn handles_are_unique_while_alive() {
        let pool = HandlePool::<usize, 8>::new();

        let handles = (0..8).map(|i| pool.create(i)).collect::<Vec<_>>();

        for (i, a) in handles.iter().enumerate() {
            assert!(a.is_valid());

            for b in handles.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }

        // Each handle addresses its own storage.
        for (i, handle) in handles.iter().enumerate() {
            assert_eq!(*pool.get(*handle).unwrap(), i);
        }
    }

    #[test]
    fn capacity_bound() {
        let pool = HandlePool::<u32, 3>::new();

        for i in 0..3 {
            assert!(pool.create(i).is_valid());
        }

        assert_eq!(pool.free(), 0);
        assert_eq!(pool.create(99), Handle::invalid());
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn try_create_when_full_reports_exhausted() {
        let pool = HandlePool::<u32, 1>::new();
        _ = pool.create(1);

        let called = Cell::new(false);
        let result = pool.try_create_with(|| {
            called.set(true);
            Ok::<_, Infallible>(2)
        });

        assert!(matches!(result, Err(CreateError::Exhausted { capacity: 1 })));
        assert!(!called.get(), "constructor must not run when the pool is full");
    }

    #[test]
    fn create_with_when_full_does_not_construct() {
        let pool = HandlePool::<u32, 1>::new();
        _ = pool.create(1);

        let handle = pool.create_with(|| panic!("constructor must not run when the pool is full"));

        assert!(!handle.is_valid());
    }

    #[test]
    fn failed_construction_leaves_pool_unchanged() {
        let pool = HandlePool::<u32, 2>::new();
        let first = pool.create(1);
        pool.destroy(first);

        let result = pool.try_create_with(|| Err::<u32, _>("nope"));
        assert!(matches!(result, Err(CreateError::Construction("nope"))));

        assert_eq!(pool.free(), 2);
        assert!(pool.is_empty());

        // The slot that would have been used is still the next one to be handed out,
        // in the same generation.
        let next = pool.create(2);
        assert_eq!(next.index(), first.index());
        assert_eq!(next.generation(), first.generation() + 1);
    }

    #[test]
    fn panicking_construction_leaves_pool_usable() {
        let pool = HandlePool::<u32, 2>::new();

        let result = catch_unwind(AssertUnwindSafe(|| {
            pool.create_with(|| panic!("constructor exploded"))
        }));
        assert!(result.is_err());

        assert_eq!(pool.free(), 2);
        assert!(pool.is_empty());

        let handle = pool.create(5);
        assert_eq!(*pool.get(handle).unwrap(), 5);
    }

    #[test]
    fn destroy_is_idempotent() {
        let pool = HandlePool::<u32, 2>::new();
        let handle = pool.create(10);

        assert!(pool.destroy(handle));
        assert!(!pool.destroy(handle));
        assert!(!pool.destroy(Handle::invalid()));

        assert_eq!(pool.free(), 2);
    }

    #[test]
    fn stale_handle_stays_rejected_after_reuse() {
        let pool = HandlePool::<u32, 1>::new();

        let old = pool.create(1);
        assert!(pool.destroy(old));

        let new = pool.create(2);
        assert_eq!(new.index(), old.index());
        assert!(new.generation() > old.generation());

        assert!(!pool.is_valid(old));
        assert!(pool.get(old).is_none());
        assert!(pool.get_mut(old).is_none());

        // Destroying the stale handle must not touch the new occupant.
        assert!(!pool.destroy(old));
        assert_eq!(*pool.get(new).unwrap(), 2);
    }

    #[test]
    fn foreign_index_is_rejected() {
        let pool = HandlePool::<u32, 2>::new();
        _ = pool.create(1);

        assert!(!pool.is_valid(Handle::new(2, 0)));
        assert!(pool.get(Handle::new(u32::MAX - 1, 0)).is_none());
        assert!(!pool.destroy(Handle::new(17, 0)));
    }

    #[test]
    fn read_your_write() {
        let pool = HandlePool::<u32, 1>::new();
        let handle = pool.create(10);

        {
            let mut view = pool.get_mut(handle).unwrap();
            assert_eq!(*view, 10);
            *view = 999;
        }

        {
            let mut view = pool.get_mut(handle).unwrap();
            assert_eq!(*view, 999);
            *view = 1000;
        }

        assert_eq!(*pool.get(handle).unwrap(), 1000);
    }

    #[test]
    fn nested_shared_views_do_not_deadlock() {
        let pool = HandlePool::<u32, 2>::new();
        let a = pool.create(1);
        let b = pool.create(2);

        let view_a = pool.get(a).unwrap();
        let view_a_again = pool.get(a).unwrap();
        let mut view_b = pool.get_mut(b).unwrap();

        *view_b += *view_a + *view_a_again;

        assert_eq!(*view_b, 4);
        assert!(pool.is_valid(a));
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn view_reports_its_handle() {
        let pool = HandlePool::<u32, 1>::new();
        let handle = pool.create(1);

        assert_eq!(pool.get(handle).unwrap().handle(), handle);
        assert_eq!(pool.get_mut(handle).unwrap().handle(), handle);
    }

    #[test]
    fn destroy_drops_object() {
        let drops = Arc::new(AtomicUsize::new(0));
        let pool = HandlePool::<DropCounter, 2>::new();

        let handle = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });
        assert_eq!(drops.load(Ordering::Relaxed), 0);

        assert!(pool.destroy(handle));
        assert_eq!(drops.load(Ordering::Relaxed), 1);

        assert!(!pool.destroy(handle));
        assert_eq!(drops.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn full_pool_drops_rejected_value() {
        let drops = Arc::new(AtomicUsize::new(0));
        let pool = HandlePool::<DropCounter, 1>::new();

        _ = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });
        let rejected = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });

        assert!(!rejected.is_valid());
        assert_eq!(drops.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn drop_drops_remaining_objects_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let pool = HandlePool::<DropCounter, 4>::new();

        let a = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });
        _ = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });
        _ = pool.create(DropCounter {
            drops: Arc::clone(&drops),
        });
        pool.destroy(a);

        assert_eq!(drops.load(Ordering::Relaxed), 1);

        drop(pool);

        assert_eq!(drops.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn panicking_drop_does_not_double_drop() {
        struct PanicOnDrop {
            drops: Arc<AtomicUsize>,
        }

        impl Drop for PanicOnDrop {
            fn drop(&mut self) {
                self.drops.fetch_add(1, Ordering::Relaxed);
                panic!("drop exploded");
            }
        }

        let drops = Arc::new(AtomicUsize::new(0));
        let pool = HandlePool::<PanicOnDrop, 2>::new();

        let handle = pool.create(PanicOnDrop {
            drops: Arc::clone(&drops),
        });

        let result = catch_unwind(AssertUnwindSafe(|| pool.destroy(handle)));
        assert!(result.is_err());

        assert!(!pool.is_valid(handle));
        assert!(pool.is_empty());

        // Dropping the pool must not drop the object a second time.
        drop(pool);
        assert_eq!(drops.load(Ordering::Relaxed), 1);
    }

    #[test]
    #[should_panic]
    fn drop_item_with_forbidden_to_drop_policy_panics() {
        let pool = HandlePool::<u32, 3>::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();
        _ = pool.create(123);
    }

    #[test]
    fn drop_itemless_with_forbidden_to_drop_policy_ok() {
        let pool = HandlePool::<u32, 3>::builder()
            .drop_policy(DropPolicy::MustNotDropItems)
            .build();

        let handle = pool.create(1);
        pool.destroy(handle);

        drop(pool);
    }

    #[test]
    fn zero_sized_objects_are_supported() {
        let pool = HandlePool::<(), 2>::new();

        let a = pool.create(());
        let b = pool.create(());

        assert_ne!(a, b);
        assert!(pool.get(a).is_some());
        assert!(pool.destroy(b));
        assert!(pool.get(b).is_none());
    }

    #[test]
    #[should_panic]
    fn zero_capacity_is_panic() {
        drop(HandlePool::<u32, 0>::new());
    }

    #[test]
    fn debug_output_names_item_type() {
        let pool = HandlePool::<u32, 2>::new();
        _ = pool.create(1);

        let text = format!("{pool:?}");
        assert!(text.contains("u32"));
        assert!(text.contains("len: 1"));
    }

    #[test]
    fn view_debug_output_names_item_type() {
        let pool = HandlePool::<u32, 2>::new();
        let handle = pool.create(42);

        let text = format!("{:?}", pool.get(handle).unwrap());
        assert!(text.contains("View<u32>"));
        assert!(text.contains("value: 42"));

        let text = format!("{:?}", pool.get_mut(handle).unwrap());
        assert!(text.contains("ViewMut<u32>"));
        assert!(text.contains("value: 42"));
    }
}
