//! The C ABI surface: `z`-prefixed entry points with the exact standard
//! allocation signatures. Unmodified call sites reach them through the
//! external compile-time redirection layer (`-Dmalloc=zmalloc` and
//! friends) or, from Rust, through this crate's `malloc!`-style macros.

use crate::allocator::allocator;
use crate::stats;
use core::ffi::c_void;

/// `malloc` replacement: `size` usable, uninitialized bytes or NULL.
#[no_mangle]
pub unsafe extern "C" fn zmalloc(size: usize) -> *mut c_void {
    allocator().malloc(size) as *mut c_void
}

/// `calloc` replacement: `count * elem_size` zero-filled bytes or NULL.
/// The size multiplication is overflow-checked.
#[no_mangle]
pub unsafe extern "C" fn zcalloc(count: usize, elem_size: usize) -> *mut c_void {
    allocator().calloc(count, elem_size) as *mut c_void
}

/// `realloc` replacement. `zrealloc(NULL, n)` is `zmalloc(n)`;
/// `zrealloc(p, 0)` is `zfree(p)` followed by NULL.
#[no_mangle]
pub unsafe extern "C" fn zrealloc(ptr: *mut c_void, new_size: usize) -> *mut c_void {
    allocator().realloc(ptr as *mut u8, new_size) as *mut c_void
}

/// `free` replacement. `zfree(NULL)` is a guaranteed no-op.
#[no_mangle]
pub unsafe extern "C" fn zfree(ptr: *mut c_void) {
    allocator().free(ptr as *mut u8);
}

/// Recorded usable size of an allocation; 0 for NULL.
#[no_mangle]
pub unsafe extern "C" fn zmalloc_usable_size(ptr: *mut c_void) -> usize {
    allocator().usable_size(ptr as *mut u8)
}

/// Current number of usable bytes held by live blocks.
#[no_mangle]
pub extern "C" fn zmalloc_used_memory() -> usize {
    stats::used_memory()
}
