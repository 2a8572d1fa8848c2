use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

use crate::{DropPolicy, HandlePool, LocalHandlePool};

/// Builder for creating an instance of [`HandlePool`] or [`LocalHandlePool`].
///
/// You only need to use this builder if you want to customize the pool configuration.
/// The default configuration used by [`HandlePool::new()`][1] and [`LocalHandlePool::new()`][2]
/// is sufficient for most use cases.
///
/// The capacity is not part of the builder because it is fixed by the `CAPACITY` type parameter.
///
/// # Examples
///
/// ```
/// use handle_pool::{DropPolicy, HandlePool};
///
/// let pool = HandlePool::<String, 64>::builder()
///     .drop_policy(DropPolicy::MayDropItems)
///     .build();
///
/// assert_eq!(pool.capacity(), 64);
/// ```
///
/// [1]: HandlePool::new
/// [2]: LocalHandlePool::new
#[must_use]
pub struct HandlePoolBuilder<T, const CAPACITY: usize> {
    drop_policy: DropPolicy,

    _item: PhantomData<T>,
}

impl<T, const CAPACITY: usize> fmt::Debug for HandlePoolBuilder<T, CAPACITY> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("capacity", &CAPACITY)
            .field("drop_policy", &self.drop_policy)
            .finish()
    }
}

impl<T, const CAPACITY: usize> HandlePoolBuilder<T, CAPACITY> {
    pub(crate) fn new() -> Self {
        Self {
            drop_policy: DropPolicy::default(),
            _item: PhantomData,
        }
    }

    /// Sets the [drop policy][DropPolicy] for the pool. This governs how
    /// to treat remaining objects in the pool when the pool is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use handle_pool::{DropPolicy, LocalHandlePool};
    ///
    /// let pool = LocalHandlePool::<u32, 4>::builder()
    ///     .drop_policy(DropPolicy::MustNotDropItems)
    ///     .build_local();
    ///
    /// assert!(pool.is_empty());
    /// ```
    pub fn drop_policy(mut self, policy: DropPolicy) -> Self {
        self.drop_policy = policy;
        self
    }

    /// Builds a thread-safe pool with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub fn build(self) -> HandlePool<T, CAPACITY> {
        HandlePool::new_inner(self.drop_policy)
    }

    /// Builds a single-threaded pool with the specified configuration.
    ///
    /// # Panics
    ///
    /// Panics if `CAPACITY` is zero or greater than `u32::MAX`.
    #[must_use]
    pub fn build_local(self) -> LocalHandlePool<T, CAPACITY> {
        LocalHandlePool::new_inner(self.drop_policy)
    }
}
