//! Block headers: the fixed-size metadata prefix in front of every
//! user-visible allocation.
//!
//! Layout of one underlying allocation:
//!
//! ```text
//! raw pointer                    user pointer
//! |                              |
//! [ usable_size | tag | padding ][ usable bytes ............. ]
//! '--------- PREFIX_SIZE -------'
//! ```
//!
//! The header occupies exactly `PREFIX_SIZE` bytes so the user pointer
//! keeps the platform's maximum fundamental alignment. The `tag` word
//! distinguishes live blocks from freed ones and gives best-effort
//! detection of double frees and foreign pointers.

use crate::oom;
use crate::util::{checked_align_up, MIN_ALIGN};

/// Bytes reserved in front of every block for the header.
pub const PREFIX_SIZE: usize = MIN_ALIGN;

/// Marker stored next to the size while the block is live.
const TAG_LIVE: usize = 0x5a4c_4956; // "ZLIV"
/// Marker written just before the block is released.
const TAG_FREED: usize = 0x5a44_4544; // "ZDED"

const _: () = assert!(PREFIX_SIZE >= 2 * core::mem::size_of::<usize>());
const _: () = assert!(PREFIX_SIZE.is_power_of_two());

/// True underlying allocation size for `usable` user bytes: header plus
/// payload, rounded up to `MIN_ALIGN`. `None` if the sum overflows.
#[inline]
pub fn raw_block_size(usable: usize) -> Option<usize> {
    let total = usable.checked_add(PREFIX_SIZE)?;
    checked_align_up(total, MIN_ALIGN)
}

/// The pointer handed to the caller: just past the header.
///
/// # Safety
/// `raw` must point to at least `PREFIX_SIZE` bytes.
#[inline]
pub unsafe fn user_of(raw: *mut u8) -> *mut u8 {
    raw.add(PREFIX_SIZE)
}

/// The underlying allocation a user pointer belongs to.
///
/// # Safety
/// `user` must have been produced by [`user_of`].
#[inline]
pub unsafe fn raw_of(user: *mut u8) -> *mut u8 {
    user.sub(PREFIX_SIZE)
}

/// Record `usable` and the live tag at `raw`. Runs on every successful
/// allocation and reallocation, before the user pointer is handed out.
///
/// # Safety
/// `raw` must point to a writable region of at least `PREFIX_SIZE` bytes.
#[inline]
pub unsafe fn write_header(raw: *mut u8, usable: usize) {
    let header = raw as *mut usize;
    header.write(usable);
    header.add(1).write(TAG_LIVE);
}

/// Recorded usable size of a live block. Aborts if the header tag does
/// not match: the pointer was never returned by this allocator, or was
/// already freed. Detection is best-effort -- a foreign pointer whose
/// preceding bytes happen to match the live tag is not caught.
///
/// # Safety
/// `user` must be null-checked by the caller and point into the address
/// space; the header read stays within this allocator's own prefix for
/// any pointer the allocator returned.
#[inline]
pub unsafe fn usable_size(user: *mut u8) -> usize {
    let header = raw_of(user) as *const usize;
    match header.add(1).read() {
        TAG_LIVE => header.read(),
        TAG_FREED => oom::abort_with_message("zalloc: double free detected\n"),
        _ => oom::abort_with_message("zalloc: invalid pointer passed to allocator\n"),
    }
}

/// Invalidate the header tag. Must be the last header write before the
/// block goes back to the underlying allocator.
///
/// # Safety
/// `user` must be a live pointer previously returned by this allocator.
#[inline]
pub unsafe fn mark_freed(user: *mut u8) {
    let header = raw_of(user) as *mut usize;
    header.add(1).write(TAG_FREED);
}
