//! Process-wide used-memory accounting.
//!
//! A single atomic counter holds the sum of the usable sizes of all
//! currently-live blocks. Every mutation is one atomic add or subtract,
//! never a read-then-write, so concurrent callers cannot tear or lose an
//! update and no call site ever holds a lock.

use core::sync::atomic::{AtomicUsize, Ordering};

static USED_MEMORY: AtomicUsize = AtomicUsize::new(0);

/// Account for a newly allocated block of `size` usable bytes.
#[inline(always)]
pub fn record_alloc(size: usize) {
    USED_MEMORY.fetch_add(size, Ordering::Relaxed);
}

/// Account for a freed block of `size` usable bytes.
#[inline(always)]
pub fn record_free(size: usize) {
    USED_MEMORY.fetch_sub(size, Ordering::Relaxed);
}

/// Account for a block resized from `old` to `new` usable bytes.
#[inline(always)]
pub fn record_resize(old: usize, new: usize) {
    if new >= old {
        USED_MEMORY.fetch_add(new - old, Ordering::Relaxed);
    } else {
        USED_MEMORY.fetch_sub(old - new, Ordering::Relaxed);
    }
}

/// Current number of usable bytes held by live blocks.
#[inline]
pub fn used_memory() -> usize {
    USED_MEMORY.load(Ordering::Relaxed)
}
