//! Failure policy: what happens when the underlying allocator cannot
//! satisfy a request, and how contract violations are reported.

use crate::config;
use core::ptr;

/// What to do when the underlying allocator cannot satisfy a request.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum OomPolicy {
    /// Return NULL to the caller, matching the standard malloc contract.
    PropagateNull,
    /// Terminate the process with a diagnostic on stderr.
    AbortOnFailure,
}

/// Abort with a diagnostic message to stderr.
/// Used when a caller contract violation (double free, foreign pointer)
/// is detected. Writes directly to fd 2 -- this path must not allocate.
#[cold]
#[inline(never)]
pub fn abort_with_message(msg: &str) -> ! {
    unsafe {
        libc::write(2, msg.as_ptr() as *const libc::c_void, msg.len());
        libc::abort();
    }
}

/// Handle a failed allocation of `size` usable bytes according to the
/// configured policy. Returns NULL under `PropagateNull` and does not
/// return under `AbortOnFailure`. The used-memory counter has not been
/// touched when this is reached.
#[cold]
#[inline(never)]
pub fn handle_allocation_failure(size: usize) -> *mut u8 {
    match config::oom_policy() {
        OomPolicy::PropagateNull => ptr::null_mut(),
        OomPolicy::AbortOnFailure => abort_oom(size),
    }
}

#[cold]
fn abort_oom(size: usize) -> ! {
    // Render the message on the stack; the heap may be exhausted.
    let mut buf = [0u8; 96];
    let mut n = 0;
    for &b in b"zalloc: out of memory allocating " {
        buf[n] = b;
        n += 1;
    }
    n += format_usize(size, &mut buf[n..]);
    for &b in b" bytes\n" {
        buf[n] = b;
        n += 1;
    }
    unsafe {
        libc::write(2, buf.as_ptr() as *const libc::c_void, n);
        libc::abort();
    }
}

/// Render `value` as decimal into `out`, returning the byte count.
fn format_usize(mut value: usize, out: &mut [u8]) -> usize {
    let mut digits = [0u8; 20];
    let mut i = 0;
    loop {
        digits[i] = b'0' + (value % 10) as u8;
        value /= 10;
        i += 1;
        if value == 0 {
            break;
        }
    }
    for j in 0..i {
        out[j] = digits[i - 1 - j];
    }
    i
}

/// Set errno to ENOMEM, as the underlying allocator would on failure.
///
/// # Safety
/// Dereferences the thread's errno location.
#[inline]
pub unsafe fn set_errno_nomem() {
    #[cfg(target_os = "linux")]
    {
        *libc::__errno_location() = libc::ENOMEM;
    }
    #[cfg(target_os = "macos")]
    {
        *libc::__error() = libc::ENOMEM;
    }
}
