extern crate libc;

pub mod allocator;
pub mod api;
pub mod block;
pub mod config;
pub mod oom;
pub mod redirect;
pub mod stats;
pub mod util;

#[cfg(feature = "global-allocator")]
pub mod global_alloc;

pub use allocator::{allocator, AccountingAllocator};
pub use oom::OomPolicy;

#[cfg(feature = "global-allocator")]
pub use global_alloc::Zalloc;
