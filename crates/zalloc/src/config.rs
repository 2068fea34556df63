//! Environment-driven configuration, read exactly once.

use crate::oom::OomPolicy;
use core::sync::atomic::{AtomicU8, Ordering};

const UNINIT: u8 = 0;
const INITIALIZING: u8 = 1;
const READY: u8 = 2;

static INIT_STATE: AtomicU8 = AtomicU8::new(UNINIT);

const POLICY_PROPAGATE: u8 = 0;
const POLICY_ABORT: u8 = 1;

static OOM_POLICY: AtomicU8 = AtomicU8::new(POLICY_PROPAGATE);

/// Read configuration from the environment exactly once. Safe to call
/// from any thread on every entry; after the first call it is a single
/// atomic load. Concurrent first calls spin until the winner finishes,
/// so no caller ever observes half-read configuration.
#[inline]
pub fn ensure_initialized() {
    if INIT_STATE.load(Ordering::Acquire) == READY {
        return;
    }
    init_slow();
}

#[cold]
#[inline(never)]
fn init_slow() {
    match INIT_STATE.compare_exchange(UNINIT, INITIALIZING, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {}
        Err(_) => {
            while INIT_STATE.load(Ordering::Acquire) != READY {
                core::hint::spin_loop();
            }
            return;
        }
    }

    unsafe { read_config() };
    INIT_STATE.store(READY, Ordering::Release);
}

/// Read env vars. Runs once, before any concurrent policy reads.
///
/// # Safety
/// Calls libc::getenv, which must not race with setenv; acceptable here
/// because this runs once during the first allocation.
unsafe fn read_config() {
    if env_flag_set(b"ZALLOC_OOM_ABORT\0") {
        OOM_POLICY.store(POLICY_ABORT, Ordering::Relaxed);
    }
}

unsafe fn env_flag_set(key: &[u8]) -> bool {
    let val = libc::getenv(key.as_ptr() as *const libc::c_char);
    if val.is_null() {
        return false;
    }
    // Empty and "0" both mean unset.
    let first = *(val as *const u8);
    first != 0 && first != b'0'
}

/// The active out-of-memory policy.
pub fn oom_policy() -> OomPolicy {
    match OOM_POLICY.load(Ordering::Relaxed) {
        POLICY_ABORT => OomPolicy::AbortOnFailure,
        _ => OomPolicy::PropagateNull,
    }
}

/// Override the out-of-memory policy at runtime. Takes effect for all
/// subsequent allocations in the process.
pub fn set_oom_policy(policy: OomPolicy) {
    let raw = match policy {
        OomPolicy::PropagateNull => POLICY_PROPAGATE,
        OomPolicy::AbortOnFailure => POLICY_ABORT,
    };
    OOM_POLICY.store(raw, Ordering::Relaxed);
}
