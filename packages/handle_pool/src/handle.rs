/// Identifies one object in a [`HandlePool`][crate::HandlePool] or
/// [`LocalHandlePool`][crate::LocalHandlePool].
///
/// A handle is a plain `(index, generation)` ticket. It does not own the object and does not keep
/// it alive - it merely names a slot in the pool together with the generation the slot was in when
/// the object was created. Once the object is destroyed, the slot's generation advances and the
/// handle stops resolving, even if the slot is later reused for a different object.
///
/// Handles are only meaningful for the pool that issued them. Using a handle with a different pool
/// is not detected and may resolve to an unrelated object in that pool.
///
/// # Example
///
/// ```rust
/// use handle_pool::{Handle, HandlePool};
///
/// let pool = HandlePool::<u32, 4>::new();
///
/// let handle = pool.create(42);
/// assert!(handle.is_valid());
/// assert_ne!(handle, Handle::invalid());
///
/// // Handles are plain values that can be copied around freely.
/// let copy = handle;
/// assert_eq!(*pool.get(copy).unwrap(), 42);
/// ```
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: u32,
    generation: u32,
}

/// Slot index reserved for [`Handle::invalid()`]. No pool ever issues a handle with this index.
pub(crate) const SENTINEL_INDEX: u32 = u32::MAX;

impl Handle {
    #[must_use]
    pub(crate) const fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the "no handle" value.
    ///
    /// This is what the pools return when they cannot create an object because they are full.
    /// It is distinguishable from every handle a pool can issue.
    ///
    /// # Example
    ///
    /// ```rust
    /// use handle_pool::Handle;
    ///
    /// let handle = Handle::invalid();
    /// assert!(!handle.is_valid());
    /// assert_eq!(handle, Handle::default());
    /// ```
    #[must_use]
    pub const fn invalid() -> Self {
        Self::new(SENTINEL_INDEX, 0)
    }

    /// Whether this is anything other than [`Handle::invalid()`].
    ///
    /// This is a syntactic check only. It says nothing about whether the handle currently
    /// resolves to a live object in some pool - use [`HandlePool::is_valid()`][1] for that.
    ///
    /// [1]: crate::HandlePool::is_valid
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.index != SENTINEL_INDEX
    }

    /// The index of the slot this handle refers to.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// The generation the slot was in when the referenced object was created.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::invalid()
    }
}
