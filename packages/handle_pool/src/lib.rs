#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! A fixed-capacity object pool that hands out generation-checked handles instead of references.
//!
//! All objects of a pool live in one contiguous array allocated when the pool is created, so in
//! release builds creating and destroying objects never allocates. Each object is identified by a
//! [`Handle`], a small `Copy` value made of a slot index and the slot's generation. Destroying an object advances
//! the generation of its slot, so any handle to the destroyed object is rejected from then on,
//! even after the slot has been reused for another object.
//!
//! # Pool types
//!
//! * [`HandlePool`] is thread-safe. Objects are accessed through [`View`] and [`ViewMut`] guards
//!   that keep the pool locked in shared mode while they exist, which makes it impossible to hold
//!   a reference to an object while another thread destroys it.
//! * [`LocalHandlePool`] is the single-threaded variant, without any locking. Access is through
//!   plain references and the borrow checker keeps them from outliving the objects.
//!
//! # Failure is a value
//!
//! Nothing in this crate treats ordinary outcomes as errors:
//!
//! * A full pool returns [`Handle::invalid()`] from `create()` (or [`CreateError::Exhausted`] from
//!   `try_create_with()`).
//! * Stale or foreign handles make `get()` return `None` and `destroy()` return `false`.
//!   Destroying the same handle twice is harmless.
//!
//! # Example
//!
//! ```rust
//! use std::thread;
//!
//! use handle_pool::HandlePool;
//!
//! let pool = HandlePool::<String, 32>::new();
//!
//! let greeting = pool.create("hello".to_string());
//!
//! thread::scope(|s| {
//!     s.spawn(|| {
//!         // The view keeps the object alive while this thread looks at it.
//!         if let Some(view) = pool.get(greeting) {
//!             assert_eq!(&*view, "hello");
//!         }
//!     });
//!
//!     s.spawn(|| {
//!         // Waits for any views to be dropped, then destroys the object.
//!         pool.destroy(greeting);
//!     });
//! });
//!
//! assert!(!pool.is_valid(greeting));
//! assert!(pool.is_empty());
//! ```

mod builder;
mod drop_policy;
mod error;
mod free_list;
mod handle;
mod local_pool;
mod pool;
mod slot_storage;
mod slot_table;
mod view;

pub use builder::*;
pub use drop_policy::*;
pub use error::*;
pub(crate) use free_list::*;
pub use handle::Handle;
pub use local_pool::*;
pub use pool::*;
pub(crate) use slot_storage::*;
pub(crate) use slot_table::*;
pub use view::*;
