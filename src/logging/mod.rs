//! Process-wide logging for the Ember runtime.
//!
//! The logging path is built from three small pieces:
//!
//! - [`message`]: the closed set of message types and the category mask
//!   used to filter them.
//! - [`buffer`] and [`sink`]: bounded formatting and the [`LogSink`]
//!   interface with its stock implementations.
//! - [`global`]: the single process-wide sink slot and the free emitter
//!   functions that route through it.
//!
//! A sink is installed explicitly; nothing is auto-installed on read.
//! Emitting through an empty slot is a defined no-op, never a crash.

pub mod buffer;
pub mod config;
pub mod global;
pub mod message;
pub mod sink;

pub use buffer::{MessageBuffer, MAX_MESSAGE_SIZE};
pub use config::{ConfigError, SinkConfig};
pub use global::{
    default_sink, global_sink, log_assert, log_debug, log_debug_text, log_error, log_text,
    set_global_sink,
};
pub use message::{LogCategories, LogMessageType};
pub use sink::{debug_output_enabled, ConsoleSink, LogSink, MemorySink, NullSink};
