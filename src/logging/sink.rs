//! The [`LogSink`] interface and its stock implementations.
//!
//! A sink owns a mutable category mask and exposes two overridable
//! capability methods: `format_message` renders a message into a bounded
//! buffer, `emit` routes the rendered text to an output channel. The
//! provided `log_message` ties them together behind the central filtering
//! gate; consumers wanting custom routing implement the trait rather than
//! wrapping a concrete type.

use std::fmt;
use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write as _};
use std::sync::atomic::{AtomicU32, Ordering};

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use super::buffer::MessageBuffer;
use super::config::SinkConfig;
use super::message::{LogCategories, LogMessageType};

/// Whether debug-classified messages are emitted by this build.
///
/// The emitters themselves are compiled in every profile so that
/// debug-instrumented callers can link against an optimized build of this
/// crate; suppression is purely behavioral.
pub const fn debug_output_enabled() -> bool {
    cfg!(debug_assertions)
}

/// Atomic storage for a per-sink category mask, mutable through `&self`.
struct MaskCell(AtomicU32);

impl MaskCell {
    fn new(mask: LogCategories) -> Self {
        Self(AtomicU32::new(mask.bits()))
    }

    fn get(&self) -> LogCategories {
        LogCategories::from_bits_truncate(self.0.load(Ordering::Relaxed))
    }

    fn set(&self, mask: LogCategories) {
        self.0.store(mask.bits(), Ordering::Relaxed);
    }
}

/// A logging destination: filters, formats, and emits messages.
///
/// Implementors must be callable concurrently from any number of threads
/// without external synchronization.
pub trait LogSink: Send + Sync {
    /// Categories currently enabled on this sink.
    fn logging_mask(&self) -> LogCategories;

    /// Replace the enabled-category mask.
    fn set_logging_mask(&self, mask: LogCategories);

    /// Route already-formatted text to an output channel.
    fn emit(&self, ty: LogMessageType, text: &str);

    /// Render the severity prefix, the caller's payload, and the trailing
    /// newline (where the type calls for one) into `out`.
    ///
    /// All writes are bounded by the buffer capacity; overflow truncates.
    fn format_message(&self, out: &mut MessageBuffer, ty: LogMessageType, args: fmt::Arguments<'_>) {
        let _ = out.write_str(ty.prefix());
        let _ = out.write_fmt(args);
        if ty.appends_newline() {
            let _ = out.write_str("\n");
        }
    }

    /// Format and emit a message if it passes the filtering gate.
    ///
    /// The gate is evaluated before any formatting work: the message must
    /// have its category bit set in the current mask, and debug-classified
    /// messages additionally require a debug build. A suppressed message
    /// has no side effect at all.
    fn log_message(&self, ty: LogMessageType, args: fmt::Arguments<'_>) {
        if !self.logging_mask().intersects(ty.category()) {
            return;
        }
        if ty.is_debug() && !debug_output_enabled() {
            return;
        }

        let mut out = MessageBuffer::new();
        self.format_message(&mut out, ty, args);
        self.emit(ty, out.as_str());
    }
}

/// Cached once per process; consoles do not appear or vanish mid-run.
static HAS_CONSOLE: Lazy<bool> = Lazy::new(|| io::stdout().is_terminal());

/// The default sink: console output with an optional `log`-facade route.
///
/// With the facade route enabled, each message is forwarded to the `log`
/// crate at the level mapped by [`LogMessageType::level`], letting whatever
/// structured log service the host installed take over. Otherwise regular
/// messages go to standard output when a console is attached, and
/// debug-classified (or console-less) output goes to the diagnostic
/// channel, standard error.
pub struct ConsoleSink {
    mask: MaskCell,
    use_log_facade: bool,
}

impl ConsoleSink {
    /// Create a sink with the default configuration (all categories on).
    pub fn new() -> Self {
        Self::with_config(SinkConfig::default())
    }

    /// Create a sink from an explicit configuration.
    pub fn with_config(config: SinkConfig) -> Self {
        Self {
            mask: MaskCell::new(config.mask),
            use_log_facade: config.use_log_facade,
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for ConsoleSink {
    fn logging_mask(&self) -> LogCategories {
        self.mask.get()
    }

    fn set_logging_mask(&self, mask: LogCategories) {
        self.mask.set(mask);
    }

    fn emit(&self, ty: LogMessageType, text: &str) {
        if self.use_log_facade {
            log::log!(target: "emberkit", ty.level(), "{}", text.trim_end_matches('\n'));
            return;
        }

        // Output failure never interrupts the caller.
        if *HAS_CONSOLE && !ty.is_debug() {
            let _ = io::stdout().lock().write_all(text.as_bytes());
        } else {
            let _ = io::stderr().lock().write_all(text.as_bytes());
        }
    }
}

/// A sink that discards every message.
pub struct NullSink {
    mask: MaskCell,
}

impl NullSink {
    /// Create a discarding sink.
    pub fn new() -> Self {
        Self {
            mask: MaskCell::new(LogCategories::ALL),
        }
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for NullSink {
    fn logging_mask(&self) -> LogCategories {
        self.mask.get()
    }

    fn set_logging_mask(&self, mask: LogCategories) {
        self.mask.set(mask);
    }

    fn emit(&self, _ty: LogMessageType, _text: &str) {}
}

/// A sink that captures emitted messages in memory.
///
/// Useful in tests and for short-lived in-process capture.
pub struct MemorySink {
    mask: MaskCell,
    messages: Mutex<Vec<(LogMessageType, String)>>,
}

impl MemorySink {
    /// Create an empty capturing sink with all categories enabled.
    pub fn new() -> Self {
        Self {
            mask: MaskCell::new(LogCategories::ALL),
            messages: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of the captured messages, in emission order.
    pub fn messages(&self) -> Vec<(LogMessageType, String)> {
        self.messages.lock().clone()
    }

    /// Number of messages captured so far.
    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    /// Whether nothing has been captured.
    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    /// Drop all captured messages.
    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl LogSink for MemorySink {
    fn logging_mask(&self) -> LogCategories {
        self.mask.get()
    }

    fn set_logging_mask(&self, mask: LogCategories) {
        self.mask.set(mask);
    }

    fn emit(&self, ty: LogMessageType, text: &str) {
        self.messages.lock().push((ty, text.to_string()));
    }
}
