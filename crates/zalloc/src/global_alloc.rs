//! `#[global_allocator]` support.
//!
//! Routes a Rust program's own heap through the accounting layer so the
//! used-memory counter covers it too:
//!
//! ```rust,ignore
//! use zalloc::Zalloc;
//!
//! #[global_allocator]
//! static GLOBAL: Zalloc = Zalloc;
//! ```

use crate::allocator::allocator;
use crate::stats;
use crate::util::MIN_ALIGN;
use core::alloc::{GlobalAlloc, Layout};
use std::alloc::System;

/// A zero-sized unit struct that implements [`GlobalAlloc`] by delegating
/// to the accounting allocator. Requests whose alignment exceeds the
/// layer's `MIN_ALIGN` fall through to the system allocator and are
/// accounted directly by layout size, since `Layout` travels with every
/// call on this interface.
pub struct Zalloc;

unsafe impl GlobalAlloc for Zalloc {
    #[inline]
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let size = layout.size();
        let align = layout.align();

        // Zero-size types: return a well-aligned dangling pointer, the
        // standard library's own pattern.
        if size == 0 {
            return align as *mut u8;
        }

        if align <= MIN_ALIGN {
            allocator().malloc(size)
        } else {
            let ptr = System.alloc(layout);
            if !ptr.is_null() {
                stats::record_alloc(size);
            }
            ptr
        }
    }

    #[inline]
    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let size = layout.size();
        let align = layout.align();

        if size == 0 {
            return align as *mut u8;
        }

        if align <= MIN_ALIGN {
            allocator().calloc(1, size)
        } else {
            let ptr = System.alloc_zeroed(layout);
            if !ptr.is_null() {
                stats::record_alloc(size);
            }
            ptr
        }
    }

    #[inline]
    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        if layout.align() <= MIN_ALIGN {
            allocator().free(ptr);
        } else {
            System.dealloc(ptr, layout);
            stats::record_free(layout.size());
        }
    }

    #[inline]
    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let old_size = layout.size();
        let align = layout.align();

        // Old allocation was zero-sized: effectively a fresh alloc.
        if old_size == 0 {
            return self.alloc(Layout::from_size_align_unchecked(new_size, align));
        }

        // Rust's GlobalAlloc contract guarantees new_size > 0.
        debug_assert!(new_size > 0, "GlobalAlloc::realloc called with new_size == 0");

        if align <= MIN_ALIGN {
            allocator().realloc(ptr, new_size)
        } else {
            let new_ptr = System.realloc(ptr, layout, new_size);
            if !new_ptr.is_null() {
                stats::record_resize(old_size, new_size);
            }
            new_ptr
        }
    }
}
