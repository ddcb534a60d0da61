//! The process-wide sink slot and the free emitter functions.
//!
//! The slot has exactly three states: unset, pointing at an
//! externally-owned sink, or pointing at the lazily-created default sink.
//! It holds a weak reference, so an external owner dropping its sink
//! transitions the slot back to unset on the next read; there is no window
//! in which a reader can observe a dangling sink, even when teardown and
//! reassignment race.

use std::fmt;
use std::sync::{Arc, Weak};

use once_cell::sync::Lazy;
use parking_lot::RwLock;

use super::message::LogMessageType;
use super::sink::{ConsoleSink, LogSink, NullSink};

fn empty_slot() -> Weak<dyn LogSink> {
    let weak: Weak<NullSink> = Weak::new();
    weak
}

static GLOBAL_SINK: Lazy<RwLock<Weak<dyn LogSink>>> = Lazy::new(|| RwLock::new(empty_slot()));

/// Created on first demand, lives for the remainder of the process.
static DEFAULT_SINK: Lazy<Arc<ConsoleSink>> = Lazy::new(|| Arc::new(ConsoleSink::new()));

/// Replace or clear the process-wide sink.
///
/// The slot keeps a weak reference: ownership stays with the caller, and
/// dropping the owning `Arc` clears the slot implicitly.
pub fn set_global_sink(sink: Option<&Arc<dyn LogSink>>) {
    let slot = match sink {
        Some(sink) => Arc::downgrade(sink),
        None => empty_slot(),
    };
    *GLOBAL_SINK.write() = slot;
}

/// The currently installed sink, if any.
///
/// Never installs a default; an empty slot stays empty until
/// [`set_global_sink`] is called.
pub fn global_sink() -> Option<Arc<dyn LogSink>> {
    GLOBAL_SINK.read().upgrade()
}

/// The process-wide default sink, created lazily on first call.
///
/// Safe to call before any other initialization. The instance is cached
/// and never torn down; it is not installed as the global sink
/// automatically.
pub fn default_sink() -> Arc<dyn LogSink> {
    DEFAULT_SINK.clone()
}

fn forward(ty: LogMessageType, args: fmt::Arguments<'_>) {
    if let Some(sink) = global_sink() {
        sink.log_message(ty, args);
    }
}

/// Emit plain text through the global sink; no-op when the slot is empty.
pub fn log_text(args: fmt::Arguments<'_>) {
    forward(LogMessageType::Text, args);
}

/// Emit an error through the global sink; no-op when the slot is empty.
pub fn log_error(args: fmt::Arguments<'_>) {
    forward(LogMessageType::Error, args);
}

/// Emit a debug diagnostic through the global sink; no-op when the slot is
/// empty, and suppressed entirely in optimized builds.
pub fn log_debug(args: fmt::Arguments<'_>) {
    forward(LogMessageType::Debug, args);
}

/// Emit debug text through the global sink; no-op when the slot is empty,
/// and suppressed entirely in optimized builds.
pub fn log_debug_text(args: fmt::Arguments<'_>) {
    forward(LogMessageType::DebugText, args);
}

/// Emit an assertion failure through the global sink; no-op when the slot
/// is empty.
pub fn log_assert(args: fmt::Arguments<'_>) {
    forward(LogMessageType::Assert, args);
}

/// Emit plain text through the global sink.
#[macro_export]
macro_rules! log_text {
    ($($arg:tt)*) => {
        $crate::logging::log_text(::core::format_args!($($arg)*))
    };
}

/// Emit an error through the global sink.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::log_error(::core::format_args!($($arg)*))
    };
}

/// Emit a debug diagnostic through the global sink.
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::log_debug(::core::format_args!($($arg)*))
    };
}

/// Emit debug text through the global sink.
#[macro_export]
macro_rules! log_debug_text {
    ($($arg:tt)*) => {
        $crate::logging::log_debug_text(::core::format_args!($($arg)*))
    };
}

/// Emit an assertion failure through the global sink.
#[macro_export]
macro_rules! log_assert {
    ($($arg:tt)*) => {
        $crate::logging::log_assert(::core::format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::sink::MemorySink;
    use parking_lot::Mutex;

    // The slot is process state; tests touching it must not interleave.
    static SLOT_GUARD: Mutex<()> = Mutex::new(());

    fn install() -> Arc<MemorySink> {
        let sink = Arc::new(MemorySink::new());
        let as_dyn: Arc<dyn LogSink> = sink.clone();
        set_global_sink(Some(&as_dyn));
        sink
    }

    #[test]
    fn test_unset_slot_is_a_noop() {
        let _guard = SLOT_GUARD.lock();
        set_global_sink(None);

        assert!(global_sink().is_none());
        log_text(format_args!("nobody listening"));
        log_error(format_args!("nobody listening"));
        log_assert(format_args!("nobody listening"));
    }

    #[test]
    fn test_emitters_route_to_installed_sink() {
        let _guard = SLOT_GUARD.lock();
        let sink = install();

        crate::log_text!("t={}", 1);
        crate::log_error!("e={}", 2);
        crate::log_assert!("a={}", 3);

        let texts: Vec<String> = sink.messages().into_iter().map(|(_, m)| m).collect();
        assert_eq!(texts, vec!["t=1", "Error: e=2\n", "Assert: a=3\n"]);

        set_global_sink(None);
        crate::log_error!("after clear");
        assert_eq!(sink.len(), 3);
    }

    #[test]
    fn test_debug_emitters_follow_build() {
        let _guard = SLOT_GUARD.lock();
        let sink = install();

        crate::log_debug!("d");
        crate::log_debug_text!("dt");

        let expected = if crate::logging::debug_output_enabled() {
            2
        } else {
            0
        };
        assert_eq!(sink.len(), expected);

        set_global_sink(None);
    }

    #[test]
    fn test_dropping_active_sink_clears_slot() {
        let _guard = SLOT_GUARD.lock();
        let sink = install();

        assert!(global_sink().is_some());
        drop(sink);
        assert!(global_sink().is_none());

        // Emitters tolerate the now-empty slot.
        log_error(format_args!("no sink"));
    }

    #[test]
    fn test_replacing_while_old_sink_drops() {
        let _guard = SLOT_GUARD.lock();
        let first = install();
        let second = install();

        drop(first);
        log_text(format_args!("to second"));
        assert_eq!(second.len(), 1);

        set_global_sink(None);
    }

    #[test]
    fn test_default_sink_is_cached_and_not_auto_installed() {
        let _guard = SLOT_GUARD.lock();
        set_global_sink(None);

        let a = default_sink();
        let b = default_sink();
        assert!(Arc::ptr_eq(&a, &b));

        // Reading the slot never installs the default.
        assert!(global_sink().is_none());

        // But it can be installed explicitly and outlives local handles.
        set_global_sink(Some(&a));
        drop(a);
        drop(b);
        assert!(global_sink().is_some());

        set_global_sink(None);
    }
}
