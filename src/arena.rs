//! Bump allocation for geometry storage.
//!
//! Every vertex buffer and part list of a geometry value is carved out of one [`Arena`]. Memory
//! is reclaimed in bulk by [`Arena::reset`], which requires exclusive access: the borrow checker
//! guarantees no geometry allocated from the arena survives the reset.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::error::{GeometryError, Result};

/// A bump allocator supplying storage for geometry values.
///
/// An arena is not `Sync`; give each concurrent unit of work its own.
#[derive(Debug, Default)]
pub struct Arena {
    bump: Bump,
}

impl Arena {
    /// Create an empty arena. No memory is reserved until the first allocation.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Create an arena with `bytes` of storage reserved up front.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Create an arena that refuses to grow past `limit` bytes.
    ///
    /// Allocations that would exceed the limit fail with [`GeometryError::OutOfMemory`].
    pub fn with_allocation_limit(limit: usize) -> Self {
        let bump = Bump::new();
        bump.set_allocation_limit(Some(limit));
        Self { bump }
    }

    /// Allocate a zeroed byte buffer of length `n`, valid until the next [`reset`][Self::reset].
    pub fn allocate(&self, n: usize) -> Result<&mut [u8]> {
        let mut buf = self.vec_with_capacity::<u8>(n)?;
        buf.resize(n, 0);
        Ok(buf.into_bump_slice_mut())
    }

    /// Allocate an empty vector able to hold exactly `capacity` items without growing.
    pub(crate) fn vec_with_capacity<T>(&self, capacity: usize) -> Result<BumpVec<'_, T>> {
        let mut vec = BumpVec::new_in(&self.bump);
        vec.try_reserve_exact(capacity).map_err(|_| {
            GeometryError::OutOfMemory(capacity.saturating_mul(std::mem::size_of::<T>()))
        })?;
        Ok(vec)
    }

    /// Invalidate every allocation and make the memory available for reuse.
    pub fn reset(&mut self) {
        tracing::debug!(
            reclaimed_bytes = self.bump.allocated_bytes(),
            "resetting geometry arena"
        );
        self.bump.reset();
    }

    /// Total bytes of backing storage currently held by the arena.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn allocate_zeroed() {
        let arena = Arena::new();
        let buf = arena.allocate(64).unwrap();
        assert_eq!(buf.len(), 64);
        assert!(buf.iter().all(|b| *b == 0));
        buf[3] = 7;
        assert_eq!(buf[3], 7);
    }

    #[test]
    fn reset_reuses_memory() {
        let mut arena = Arena::with_capacity(1024);
        {
            let buf = arena.allocate(512).unwrap();
            buf[0] = 1;
        }
        let before = arena.allocated_bytes();
        arena.reset();
        arena.allocate(512).unwrap();
        assert_eq!(arena.allocated_bytes(), before);
    }

    #[test]
    fn allocation_limit() {
        let arena = Arena::with_allocation_limit(0);
        assert!(matches!(
            arena.allocate(1024),
            Err(GeometryError::OutOfMemory(1024))
        ));
    }

    #[test]
    fn exact_capacity() {
        let arena = Arena::new();
        let vec = arena.vec_with_capacity::<f64>(10).unwrap();
        assert!(vec.capacity() >= 10);
        assert!(vec.is_empty());
    }
}
