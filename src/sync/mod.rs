//! Synchronization primitives for the Ember runtime.
//!
//! A single exclusive lock lives here. It is deliberately small: no
//! reader/writer variants, no condition variables, no timeouts. Callers
//! needing bounded waits layer them externally.

pub mod lock;

pub use lock::{Lock, LockGuard};
