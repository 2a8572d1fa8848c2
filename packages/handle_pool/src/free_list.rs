/// Stack of the indices of vacant slots.
///
/// The most recently freed slot is the first one to be reused. The stack never holds more than
/// the capacity it was created with, so it is allocated once up front and never reallocates.
#[derive(Debug)]
pub(crate) struct FreeList {
    indices: Vec<u32>,
}

impl FreeList {
    /// Creates a free list in which every index in `0..capacity` is free, in ascending order.
    #[must_use]
    pub(crate) fn with_all_free(capacity: u32) -> Self {
        let mut indices = Vec::with_capacity(
            usize::try_from(capacity).expect("u32 slot indices always fit in usize on supported targets"),
        );
        indices.extend(0..capacity);

        Self { indices }
    }

    #[must_use]
    pub(crate) fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The index that the next [`pop()`][Self::pop] will return.
    #[must_use]
    pub(crate) fn peek(&self) -> Option<u32> {
        self.indices.last().copied()
    }

    pub(crate) fn pop(&mut self) -> Option<u32> {
        self.indices.pop()
    }

    pub(crate) fn push(&mut self, index: u32) {
        debug_assert!(
            self.indices.len() < self.indices.capacity(),
            "free list overflow when pushing index {index}"
        );

        self.indices.push(index);
    }

    #[cfg(any(test, debug_assertions))]
    pub(crate) fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.indices.iter().copied()
    }
}
