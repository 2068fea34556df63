//! Redirection macros for Rust call sites.
//!
//! C call sites reach the `z` entry points through an external
//! compile-time substitution (`-Dmalloc=zmalloc`, ...). Rust call sites
//! written against the standard names use these macros; each expands to
//! exactly one call of the corresponding `z` entry point, so the expanded
//! token stream names the internal implementation directly.

/// Expands to `zmalloc($size)`.
#[macro_export]
macro_rules! malloc {
    ($size:expr) => {
        $crate::api::zmalloc($size)
    };
}

/// Expands to `zcalloc($count, $elem_size)`.
#[macro_export]
macro_rules! calloc {
    ($count:expr, $elem_size:expr) => {
        $crate::api::zcalloc($count, $elem_size)
    };
}

/// Expands to `zrealloc($ptr, $new_size)`.
#[macro_export]
macro_rules! realloc {
    ($ptr:expr, $new_size:expr) => {
        $crate::api::zrealloc($ptr, $new_size)
    };
}

/// Expands to `zfree($ptr)`.
#[macro_export]
macro_rules! free {
    ($ptr:expr) => {
        $crate::api::zfree($ptr)
    };
}
