use thiserror::Error;

/// Reasons why [`HandlePool::try_create_with()`][1] or
/// [`LocalHandlePool::try_create_with()`][2] did not create an object.
///
/// In either case, the pool is left exactly as it was before the call.
///
/// [1]: crate::HandlePool::try_create_with
/// [2]: crate::LocalHandlePool::try_create_with
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CreateError<E> {
    /// Every slot in the pool is occupied. The constructor was not called.
    #[error("all {capacity} slots of the handle pool are occupied")]
    Exhausted {
        /// The fixed capacity of the pool that refused the object.
        capacity: usize,
    },

    /// The constructor of the object returned an error.
    #[error("constructing the pooled object failed")]
    Construction(#[source] E),
}
