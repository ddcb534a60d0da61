#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

//! # Emberkit
//!
//! Low-level support primitives for the Ember runtime.
//!
//! This crate provides the two pieces of process-wide infrastructure the
//! rest of the runtime leans on:
//!
//! - A mutual-exclusion [`Lock`] with configurable busy-spin tuning, backed
//!   by the platform's blocking primitive and degrading gracefully on hosts
//!   where spinning buys nothing.
//! - A swappable, process-wide logging sink reached through a single global
//!   slot, with category-mask filtering, bounded formatting, and
//!   platform-appropriate output routing.
//!
//! The two components are independent leaves; neither depends on the other.
//!
//! ## Quick example
//!
//! ```
//! use emberkit::logging::{self, ConsoleSink, LogSink};
//! use std::sync::Arc;
//!
//! let sink: Arc<dyn LogSink> = Arc::new(ConsoleSink::new());
//! logging::set_global_sink(Some(&sink));
//! emberkit::log_text!("starting up, pid={}", std::process::id());
//! ```

/// Synchronization primitives.
#[cfg(feature = "threading")]
pub mod sync;

/// Process-wide logging: message types, sinks, and the global sink slot.
pub mod logging;

#[cfg(feature = "threading")]
pub use sync::lock::{Lock, LockGuard};

pub use logging::buffer::{MessageBuffer, MAX_MESSAGE_SIZE};
pub use logging::config::{ConfigError, SinkConfig};
pub use logging::message::{LogCategories, LogMessageType};
pub use logging::sink::{debug_output_enabled, ConsoleSink, LogSink, MemorySink, NullSink};
pub use logging::{default_sink, global_sink, set_global_sink};
