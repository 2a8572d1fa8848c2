/// What a pool does about objects that are still alive when the pool itself is dropped.
///
/// Either way, every remaining object is dropped exactly once before the pool releases its
/// storage. The policy only decides whether that is considered a bug.
///
/// # Examples
///
/// ```
/// use handle_pool::{DropPolicy, HandlePool};
///
/// let pool = HandlePool::<u32, 8>::builder()
///     .drop_policy(DropPolicy::MustNotDropItems)
///     .build();
///
/// let handle = pool.create(5);
/// pool.destroy(handle);
///
/// // The pool is empty, so dropping it is fine.
/// drop(pool);
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[non_exhaustive]
pub enum DropPolicy {
    /// Objects left in the pool are silently dropped together with the pool. This is the default.
    #[default]
    MayDropItems,

    /// Objects left in the pool are dropped, after which the pool panics.
    ///
    /// Use this when every object is expected to be explicitly destroyed, for example because
    /// destruction has side effects that the owner of the handle is responsible for triggering.
    /// The pool does not panic if the thread is already panicking.
    MustNotDropItems,
}
