use std::any::type_name;
use std::fmt;
use std::ops::{Deref, DerefMut};

use parking_lot::{MappedRwLockReadGuard, MappedRwLockWriteGuard, RwLockReadGuard};

use crate::{Handle, SlotTable};

/// Read-only access to an object in a [`HandlePool`][crate::HandlePool].
///
/// Obtained from [`HandlePool::get()`][1]. While the view exists, the pool is locked in shared
/// mode, so the object cannot be destroyed and its slot cannot be reused. Any thread calling
/// [`destroy()`][2] or [`create()`][3] on the pool waits until all views are gone.
///
/// Views cannot be cloned or copied. The borrow checker ensures a view never outlives its pool.
///
/// Any number of views of the same object may exist at the same time, but a [`ViewMut`] of that
/// object waits until they are all gone.
///
/// [1]: crate::HandlePool::get
/// [2]: crate::HandlePool::destroy
/// [3]: crate::HandlePool::create
pub struct View<'a, T> {
    // Field order matters: the payload guard must be released before the structural guard.
    value: MappedRwLockReadGuard<'a, T>,

    _table: RwLockReadGuard<'a, SlotTable>,

    handle: Handle,
}

impl<'a, T> View<'a, T> {
    pub(crate) fn new(
        value: MappedRwLockReadGuard<'a, T>,
        table: RwLockReadGuard<'a, SlotTable>,
        handle: Handle,
    ) -> Self {
        Self {
            value,
            _table: table,
            handle,
        }
    }

    /// The handle this view was obtained for.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl<T> Deref for View<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for View<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("handle", &self.handle)
            .field("value", &*self.value)
            .finish_non_exhaustive()
    }
}

/// Mutable access to an object in a [`HandlePool`][crate::HandlePool].
///
/// Obtained from [`HandlePool::get_mut()`][1]. Like [`View`], this keeps the pool locked in shared
/// mode for as long as it exists, so other threads can keep accessing other objects while this one
/// is being modified. Only access to this particular object is exclusive: any other view of it,
/// shared or mutable, waits until this one is gone.
///
/// This includes views requested by the thread that holds this one. Calling
/// [`HandlePool::get()`][2] or [`HandlePool::get_mut()`][1] for the same object while holding a
/// `ViewMut` of it deadlocks.
///
/// [1]: crate::HandlePool::get_mut
/// [2]: crate::HandlePool::get
pub struct ViewMut<'a, T> {
    // Field order matters: the payload guard must be released before the structural guard.
    value: MappedRwLockWriteGuard<'a, T>,

    _table: RwLockReadGuard<'a, SlotTable>,

    handle: Handle,
}

impl<'a, T> ViewMut<'a, T> {
    pub(crate) fn new(
        value: MappedRwLockWriteGuard<'a, T>,
        table: RwLockReadGuard<'a, SlotTable>,
        handle: Handle,
    ) -> Self {
        Self {
            value,
            _table: table,
            handle,
        }
    }

    /// The handle this view was obtained for.
    #[must_use]
    pub fn handle(&self) -> Handle {
        self.handle
    }
}

impl<T> Deref for ViewMut<'_, T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl<T> DerefMut for ViewMut<'_, T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for ViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(type_name::<Self>())
            .field("handle", &self.handle)
            .field("value", &*self.value)
            .finish_non_exhaustive()
    }
}
