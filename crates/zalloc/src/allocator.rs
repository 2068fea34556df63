//! The accounting allocator: the four entry points, each composing header
//! management, delegation to the underlying libc allocator, and an atomic
//! used-memory update.
//!
//! The counter is never touched on a path that also reports failure;
//! counter and result are all-or-nothing.

use crate::{block, config, oom, stats};
use core::ptr;

/// Size-tracking wrapper around the underlying general-purpose allocator.
///
/// The wrapper itself holds no state: every allocation carries its own
/// header and the used-memory counter lives in [`crate::stats`]. The type
/// exists so call sites read like any other allocator and so the C ABI
/// layer and the `GlobalAlloc` integration share one implementation.
pub struct AccountingAllocator;

static ALLOCATOR: AccountingAllocator = AccountingAllocator;

/// The process-wide allocator instance.
#[inline(always)]
pub fn allocator() -> &'static AccountingAllocator {
    &ALLOCATOR
}

impl AccountingAllocator {
    /// Allocate `size` usable, uninitialized bytes. Returns NULL on
    /// failure under the default policy.
    ///
    /// `size == 0` is legal and yields a unique, freeable pointer to a
    /// zero-usable-size block that contributes nothing to the counter.
    ///
    /// # Safety
    /// The returned pointer must be released through [`Self::free`] or
    /// resized through [`Self::realloc`], and through nothing else.
    pub unsafe fn malloc(&self, size: usize) -> *mut u8 {
        config::ensure_initialized();

        let total = match block::raw_block_size(size) {
            Some(t) => t,
            None => {
                oom::set_errno_nomem();
                return oom::handle_allocation_failure(size);
            }
        };

        let raw = libc::malloc(total) as *mut u8;
        if raw.is_null() {
            return oom::handle_allocation_failure(size);
        }

        block::write_header(raw, size);
        stats::record_alloc(size);
        block::user_of(raw)
    }

    /// Allocate `count * elem_size` zero-filled bytes.
    ///
    /// The multiplication is overflow-checked before any allocation
    /// attempt and a failure is reported exactly like an allocation
    /// failure; silent truncation here is a classic allocator
    /// vulnerability.
    ///
    /// # Safety
    /// As [`Self::malloc`].
    pub unsafe fn calloc(&self, count: usize, elem_size: usize) -> *mut u8 {
        config::ensure_initialized();

        let total = match count.checked_mul(elem_size) {
            Some(t) => t,
            None => {
                oom::set_errno_nomem();
                return oom::handle_allocation_failure(usize::MAX);
            }
        };

        let raw_size = match block::raw_block_size(total) {
            Some(t) => t,
            None => {
                oom::set_errno_nomem();
                return oom::handle_allocation_failure(total);
            }
        };

        // The underlying calloc provides the zero fill; only the header
        // bytes are dirtied afterwards, never the user region.
        let raw = libc::calloc(1, raw_size) as *mut u8;
        if raw.is_null() {
            return oom::handle_allocation_failure(total);
        }

        block::write_header(raw, total);
        stats::record_alloc(total);
        block::user_of(raw)
    }

    /// Resize the block at `ptr` to `new_size` usable bytes, preserving
    /// the lesser of the old and new sizes' worth of content. The block
    /// may move.
    ///
    /// `realloc(NULL, n)` behaves as `malloc(n)`; `realloc(p, 0)` behaves
    /// as `free(p)` and returns NULL. On failure the original block and
    /// the used-memory counter are left untouched.
    ///
    /// # Safety
    /// `ptr` must be null or a live pointer previously returned by this
    /// allocator.
    pub unsafe fn realloc(&self, ptr: *mut u8, new_size: usize) -> *mut u8 {
        if ptr.is_null() {
            return self.malloc(new_size);
        }
        if new_size == 0 {
            self.free(ptr);
            return ptr::null_mut();
        }

        config::ensure_initialized();

        let old_size = block::usable_size(ptr);

        let total = match block::raw_block_size(new_size) {
            Some(t) => t,
            None => {
                oom::set_errno_nomem();
                return oom::handle_allocation_failure(new_size);
            }
        };

        let raw = libc::realloc(block::raw_of(ptr) as *mut libc::c_void, total) as *mut u8;
        if raw.is_null() {
            // The underlying realloc leaves the original block valid.
            return oom::handle_allocation_failure(new_size);
        }

        block::write_header(raw, new_size);
        stats::record_resize(old_size, new_size);
        block::user_of(raw)
    }

    /// Release the block at `ptr`. `free(NULL)` is a guaranteed no-op.
    ///
    /// # Safety
    /// `ptr` must be null or a live pointer previously returned by this
    /// allocator. Double frees and foreign pointers are detected
    /// best-effort via the header tag and abort with a diagnostic.
    pub unsafe fn free(&self, ptr: *mut u8) {
        if ptr.is_null() {
            return;
        }

        let size = block::usable_size(ptr);
        block::mark_freed(ptr);
        stats::record_free(size);
        libc::free(block::raw_of(ptr) as *mut libc::c_void);
    }

    /// Recorded usable size of `ptr`; 0 for NULL.
    ///
    /// # Safety
    /// `ptr` must be null or a live pointer previously returned by this
    /// allocator.
    pub unsafe fn usable_size(&self, ptr: *mut u8) -> usize {
        if ptr.is_null() {
            return 0;
        }
        block::usable_size(ptr)
    }

    /// Current used-memory counter value.
    #[inline]
    pub fn used_memory(&self) -> usize {
        stats::used_memory()
    }
}
