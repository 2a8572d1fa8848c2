//! Basic usage of the `handle_pool` crate:
//!
//! * Creating a pool.
//! * Creating objects and keeping their handles.
//! * Reading and modifying objects through views.
//! * Destroying objects and observing that stale handles are rejected.

use std::thread;

use handle_pool::HandlePool;

fn main() {
    let pool = HandlePool::<String, 4>::new();

    // Creating an object gives you a handle that you can later use to look up the object again.
    let alice = pool.create("Alice".to_string());
    let bob = pool.create("Bob".to_string());

    println!(
        "Pool holds {} objects and has room for {} more",
        pool.len(),
        pool.free()
    );

    // A view keeps the object alive for as long as you hold it.
    if let Some(view) = pool.get(alice) {
        println!("Retrieved object: {}", *view);
    }

    // Objects can be modified in place through a mutable view.
    if let Some(mut view) = pool.get_mut(alice) {
        view.push_str(" Smith");
    }

    // Handles are plain values, so they can be sent to other threads together with the pool.
    thread::scope(|s| {
        s.spawn(|| {
            if let Some(view) = pool.get(alice) {
                println!("Another thread sees: {}", *view);
            }
        });
    });

    pool.destroy(bob);

    // The slot that Bob occupied is reused, but Bob's handle does not see the new object.
    let charlie = pool.create("Charlie".to_string());

    println!(
        "Charlie took over slot {} (generation {}) from Bob (generation {})",
        charlie.index(),
        charlie.generation(),
        bob.generation()
    );

    assert!(pool.get(bob).is_none());
    println!("Bob's handle is no longer valid: {}", !pool.is_valid(bob));
}
