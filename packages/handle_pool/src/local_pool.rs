use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::iter;
use std::mem::MaybeUninit;
use std::thread;

use tracing::{debug, trace};

use crate::{CreateError, DropPolicy, Handle, HandlePoolBuilder, SlotTable};

/// A single-threaded object pool with a fixed capacity of `CAPACITY` objects of type `T`.
///
/// This has the same handle semantics as [`HandlePool`][crate::HandlePool] but no locking at all.
/// Instead of views, access is governed by the borrow checker: creating and destroying objects
/// requires `&mut self`, so no reference obtained from [`get()`][Self::get] or
/// [`get_mut()`][Self::get_mut] can outlive the object it points to.
///
/// # Example
///
/// ```rust
/// use handle_pool::LocalHandlePool;
///
/// let mut pool = LocalHandlePool::<String, 4>::new();
///
/// let handle = pool.create("hello".to_string());
/// pool.get_mut(handle).unwrap().push_str(", world");
///
/// assert_eq!(pool.get(handle).unwrap(), "hello, world");
///
/// assert!(pool.destroy(handle));
/// assert!(pool.get(handle).is_none());
/// ```
pub struct LocalHandlePool<T, const CAPACITY: usize> {
    table: SlotTable,

    values: Box<[MaybeUninit<T>]>,

    drop_policy: DropPolicy,
}

impl<T, const CAPACITY: usize> LocalHandlePool<T, CAPACITY> {
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub(crate) fn new_inner(drop_policy: DropPolicy) -> Self {
        Self {
            table: SlotTable::new(CAPACITY),
            values: iter::repeat_with(MaybeUninit::uninit)
                .take(CAPACITY)
                .collect(),
            drop_policy,
        }
    }

    /// Creates a new [`LocalHandlePool`] with the default configuration.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build_local()
    }

    /// Starts building a new pool.
    ///
    /// Finish with [`build_local()`][HandlePoolBuilder::build_local] to obtain a
    /// [`LocalHandlePool`].
    pub fn builder() -> HandlePoolBuilder<T, CAPACITY> {
        HandlePoolBuilder::new()
    }

    /// The fixed number of objects the pool can hold.
    #[must_use]
    #[inline]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// The number of vacant slots.
    #[must_use]
    pub fn free(&self) -> usize {
        self.table.free()
    }

    /// The number of live objects in the pool.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the pool holds no live objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Whether every slot of the pool is occupied.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.table.is_full()
    }

    /// Moves `value` into the pool and returns a handle to it.
    ///
    /// Returns [`Handle::invalid()`] if the pool is full, in which case `value` is dropped.
    pub fn create(&mut self, value: T) -> Handle {
        self.create_with(|| value)
    }

    /// Constructs an object directly in the pool and returns a handle to it.
    ///
    /// The constructor is only called if there is room in the pool; otherwise this returns
    /// [`Handle::invalid()`]. If the constructor panics, the pool is left unchanged.
    pub fn create_with<F>(&mut self, constructor: F) -> Handle
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
    /// # Errors
    ///
    /// Returns [`CreateError::Exhausted`] if the pool is full and [`CreateError::Construction`] if
    /// the constructor fails. Either way, the pool is left exactly as it was before the call.
    pub fn try_create_with<F, E>(&mut self, constructor: F) -> Result<Handle, CreateError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        #[cfg(debug_assertions)]
        self.table.integrity_check();

        let Some(index) = self.table.next_vacant() else {
            debug!(
                item_type = type_name::<T>(),
                capacity = CAPACITY,
                "local handle pool is full, refusing to create object"
            );

            return Err(CreateError::Exhausted {
                capacity: CAPACITY,
            });
        };

        let value = constructor().map_err(|error| {
            debug!(
                item_type = type_name::<T>(),
                index, "constructor of pooled object failed"
            );

            CreateError::Construction(error)
        })?;

        self.value_mut(index).write(value);
        let handle = self.table.occupy();

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
    /// object.
    pub fn destroy(&mut self, handle: Handle) -> bool {
        let Some(index) = self.table.vacate(handle) else {
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

        // SAFETY: The table said the slot was occupied until just now. It is now vacant, so the
        // value will not be dropped again.
        unsafe {
            self.value_mut(index).assume_init_drop();
        }

        true
    }

    /// Returns a reference to the object that `handle` refers to, or `None` if the handle does
    /// not refer to a live object.
    #[must_use]
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.table.is_valid(handle) {
            return None;
        }

        let value = usize::try_from(handle.index())
            .ok()
            .and_then(|i| self.values.get(i))
            .expect("valid handles are always in bounds");

        // SAFETY: The table says the slot is occupied, so it holds a live value.
        Some(unsafe { value.assume_init_ref() })
    }

    /// Returns an exclusive reference to the object that `handle` refers to, or `None` if the
    /// handle does not refer to a live object.
    #[must_use]
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.table.is_valid(handle) {
            return None;
        }

        let value = self.value_mut(handle.index());

        // SAFETY: The table says the slot is occupied, so it holds a live value.
        Some(unsafe { value.assume_init_mut() })
    }

    /// Whether `handle` refers to a live object in this pool.
    #[must_use]
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.table.is_valid(handle)
    }

    fn value_mut(&mut self, index: u32) -> &mut MaybeUninit<T> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.values.get_mut(i))
            .unwrap_or_else(|| {
                panic!(
                    "slot {index} out of bounds in local handle pool of {}",
                    type_name::<T>()
                )
            })
    }
}

impl<T, const CAPACITY: usize> Default for LocalHandlePool<T, CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const CAPACITY: usize> fmt::Debug for LocalHandlePool<T, CAPACITY> {
    #[cfg_attr(test, mutants::skip)] // No API contract to test.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("capacity", &CAPACITY)
            .field("len", &self.len())
            .field("drop_policy", &self.drop_policy)
            .finish_non_exhaustive()
    }
}

impl<T, const CAPACITY: usize> Drop for LocalHandlePool<T, CAPACITY> {
    fn drop(&mut self) {
        let remaining = self.table.len();

        if remaining > 0 {
            debug!(
                item_type = type_name::<T>(),
                remaining, "dropping local handle pool that still holds objects"
            );
        }

        for index in self.table.occupied_indices() {
            let value = usize::try_from(index)
                .ok()
                .and_then(|i| self.values.get_mut(i))
                .expect("occupied slots are always in bounds");

            // SAFETY: The table says the slot is occupied. The pool is going away, so nobody
            // will look at the slot again.
            unsafe {
                value.assume_init_drop();
            }
        }

        if self.drop_policy == DropPolicy::MustNotDropItems && !thread::panicking() {
            assert!(
                remaining == 0,
                "dropped a local handle pool of {} that still held {remaining} objects with a policy that says it must be empty when dropped",
                type_name::<T>()
            );
        }
    }
}
