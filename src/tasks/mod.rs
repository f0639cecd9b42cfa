//! Background Tasks Module
//!
//! Maintenance tasks the owning process may start explicitly.
//!
//! # Tasks
//! - Expiry sweep: calls `evict()` on the cache at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
