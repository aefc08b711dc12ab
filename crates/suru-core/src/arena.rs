//! Bump-allocated arena backing the compile-time object graph.
//!
//! The arena owns a list of fixed-size chunks and hands out [`ArenaRef`]
//! handles instead of raw pointers. A handle stays valid until the arena is
//! reset or dropped; there is no per-allocation free. Chunks are never
//! reallocated, so the bytes behind a handle never move.

/// Granularity of chunk sizing. Allocations larger than a page get a
/// dedicated chunk rounded up to the next page multiple.
pub const PAGE_SIZE: usize = 4096;

const ALIGN: usize = 8;

/// Handle to a range of bytes inside an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArenaRef {
    chunk: u32,
    offset: u32,
    len: u32,
}

impl ArenaRef {
    /// Length of the allocation in bytes (the requested size, before
    /// alignment padding).
    #[inline]
    pub fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

struct Chunk {
    data: Box<[u8]>,
    used: usize,
}

impl Chunk {
    fn with_capacity(min_size: usize) -> Chunk {
        let size = if min_size > PAGE_SIZE {
            min_size.div_ceil(PAGE_SIZE) * PAGE_SIZE
        } else {
            PAGE_SIZE
        };
        Chunk {
            data: vec![0u8; size].into_boxed_slice(),
            used: 0,
        }
    }

    fn remaining(&self) -> usize {
        self.data.len() - self.used
    }
}

/// A chunked bump allocator.
///
/// Allocation scans chunks first-fit and bumps the winner's used counter.
/// [`Arena::reset`] rewinds every chunk without releasing memory, so a
/// pipeline run can recycle the arena of the previous one.
pub struct Arena {
    chunks: Vec<Chunk>,
}

impl Arena {
    /// Creates an arena with one chunk sized to hold at least `hint` bytes.
    pub fn new(hint: usize) -> Arena {
        Arena {
            chunks: vec![Chunk::with_capacity(hint)],
        }
    }

    /// Allocates `len` bytes and returns a handle to them.
    ///
    /// Requests are padded to 8-byte alignment so consecutive allocations
    /// stay aligned. Zero-length requests succeed and return an empty handle
    /// into the current chunk.
    pub fn alloc(&mut self, len: usize) -> ArenaRef {
        let aligned = pad(len);

        let idx = match self.chunks.iter().position(|c| c.remaining() >= aligned) {
            Some(idx) => idx,
            None => {
                self.chunks.push(Chunk::with_capacity(aligned));
                self.chunks.len() - 1
            }
        };

        let chunk = &mut self.chunks[idx];
        let offset = chunk.used;
        chunk.used += aligned;
        ArenaRef {
            chunk: idx as u32,
            offset: offset as u32,
            len: len as u32,
        }
    }

    /// Allocates `count * size` zeroed bytes.
    pub fn alloc_zeroed(&mut self, count: usize, size: usize) -> ArenaRef {
        let r = self.alloc(count * size);
        self.bytes_mut(r).fill(0);
        r
    }

    /// Copies `bytes` into the arena and returns a handle to the copy.
    pub fn copy_in(&mut self, bytes: &[u8]) -> ArenaRef {
        let r = self.alloc(bytes.len());
        self.bytes_mut(r).copy_from_slice(bytes);
        r
    }

    /// The bytes behind a handle.
    #[inline]
    pub fn bytes(&self, r: ArenaRef) -> &[u8] {
        let chunk = &self.chunks[r.chunk as usize];
        &chunk.data[r.offset as usize..r.offset as usize + r.len as usize]
    }

    /// Mutable view of the bytes behind a handle.
    #[inline]
    pub fn bytes_mut(&mut self, r: ArenaRef) -> &mut [u8] {
        let chunk = &mut self.chunks[r.chunk as usize];
        &mut chunk.data[r.offset as usize..r.offset as usize + r.len as usize]
    }

    /// Total unused capacity across all chunks.
    pub fn available(&self) -> usize {
        self.chunks.iter().map(Chunk::remaining).sum()
    }

    /// Rewinds every chunk to empty. Existing handles become dangling;
    /// chunk memory is retained for reuse.
    pub fn reset(&mut self) {
        for chunk in &mut self.chunks {
            chunk.used = 0;
        }
    }
}

#[inline]
fn pad(len: usize) -> usize {
    (len + (ALIGN - 1)) & !(ALIGN - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_returns_distinct_ranges() {
        let mut arena = Arena::new(64);
        let a = arena.alloc(16);
        let b = arena.alloc(16);
        assert_ne!(a, b);
        arena.bytes_mut(a).fill(0xaa);
        arena.bytes_mut(b).fill(0xbb);
        assert!(arena.bytes(a).iter().all(|&x| x == 0xaa));
        assert!(arena.bytes(b).iter().all(|&x| x == 0xbb));
    }

    #[test]
    fn allocations_are_aligned() {
        let mut arena = Arena::new(64);
        let a = arena.alloc(3);
        let b = arena.alloc(5);
        let c = arena.alloc(1);
        // Offsets advance in 8-byte steps.
        assert_eq!(a.len(), 3);
        assert_eq!(b.len(), 5);
        assert_eq!(c.len(), 1);
        let before = arena.available();
        arena.alloc(0);
        assert_eq!(arena.available(), before);
    }

    #[test]
    fn zero_size_alloc_succeeds() {
        let mut arena = Arena::new(16);
        let r = arena.alloc(0);
        assert!(r.is_empty());
        assert_eq!(arena.bytes(r), &[] as &[u8]);
    }

    #[test]
    fn grows_past_first_chunk() {
        let mut arena = Arena::new(1);
        let mut refs = Vec::new();
        for i in 0..100 {
            let r = arena.copy_in(&vec![i as u8; 100]);
            refs.push((r, i as u8));
        }
        // Old allocations survive growth untouched.
        for (r, fill) in refs {
            assert!(arena.bytes(r).iter().all(|&x| x == fill));
        }
    }

    #[test]
    fn oversized_request_gets_dedicated_chunk() {
        let mut arena = Arena::new(1);
        let r = arena.alloc(3 * PAGE_SIZE + 17);
        assert_eq!(r.len(), 3 * PAGE_SIZE + 17);
        arena.bytes_mut(r).fill(7);
        assert!(arena.bytes(r).iter().all(|&x| x == 7));
    }

    #[test]
    fn first_fit_reuses_earlier_chunks() {
        let mut arena = Arena::new(1);
        arena.alloc(PAGE_SIZE - 32); // nearly fill chunk 0
        arena.alloc(PAGE_SIZE); // forces chunk 1
        let small = arena.alloc(8); // fits back in chunk 0
        assert_eq!(small.len(), 8);
        let available = arena.available();
        assert!(available < 2 * PAGE_SIZE);
    }

    #[test]
    fn reset_recycles_chunks() {
        let mut arena = Arena::new(16);
        for _ in 0..10 {
            arena.alloc(1000);
        }
        let capacity_before = arena.available();
        arena.reset();
        let capacity_after = arena.available();
        assert!(capacity_after > capacity_before);
        // A fresh allocation lands at the start of the first chunk again.
        let r = arena.alloc(8);
        assert_eq!(arena.bytes(r).len(), 8);
    }

    #[test]
    fn alloc_zeroed_clears_recycled_memory() {
        let mut arena = Arena::new(16);
        let r = arena.alloc(32);
        arena.bytes_mut(r).fill(0xff);
        arena.reset();
        let z = arena.alloc_zeroed(4, 8);
        assert!(arena.bytes(z).iter().all(|&x| x == 0));
    }
}
