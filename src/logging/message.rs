//! Message types and the category mask used to filter them.

use bitflags::bitflags;

bitflags! {
    /// Bitmask of enabled message categories.
    ///
    /// Each [`LogMessageType`] owns one bit; a sink emits a message only
    /// when that bit is set in its current mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LogCategories: u32 {
        /// Plain text output, no prefix, no trailing newline.
        const TEXT = 0b0000_0001;
        /// Errors.
        const ERROR = 0b0000_0010;
        /// Debug-only plain text.
        const DEBUG_TEXT = 0b0000_0100;
        /// Debug-only diagnostics.
        const DEBUG = 0b0000_1000;
        /// Assertion failures.
        const ASSERT = 0b0001_0000;

        /// Everything that survives an optimized build.
        const REGULAR = Self::TEXT.bits() | Self::ERROR.bits() | Self::ASSERT.bits();
        /// Every category.
        const ALL = Self::REGULAR.bits() | Self::DEBUG_TEXT.bits() | Self::DEBUG.bits();
    }
}

/// The closed set of message severities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LogMessageType {
    /// Plain text, emitted verbatim.
    Text,
    /// Debug diagnostic, prefixed and newline-terminated.
    Debug,
    /// Debug text, emitted verbatim.
    DebugText,
    /// Error, prefixed and newline-terminated.
    Error,
    /// Assertion failure, prefixed and newline-terminated.
    Assert,
}

impl LogMessageType {
    /// The category bit this type is filtered by.
    pub fn category(self) -> LogCategories {
        match self {
            Self::Text => LogCategories::TEXT,
            Self::Debug => LogCategories::DEBUG,
            Self::DebugText => LogCategories::DEBUG_TEXT,
            Self::Error => LogCategories::ERROR,
            Self::Assert => LogCategories::ASSERT,
        }
    }

    /// Whether this type only exists for debug builds.
    pub fn is_debug(self) -> bool {
        matches!(self, Self::Debug | Self::DebugText)
    }

    /// Human-readable severity prefix; empty for the verbatim types.
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Error => "Error: ",
            Self::Debug => "Debug: ",
            Self::Assert => "Assert: ",
            Self::Text | Self::DebugText => "",
        }
    }

    /// Whether formatting appends a trailing newline.
    pub fn appends_newline(self) -> bool {
        !matches!(self, Self::Text | Self::DebugText)
    }

    /// Priority mapping for the structured log-service route.
    pub fn level(self) -> log::Level {
        match self {
            Self::Debug | Self::DebugText => log::Level::Debug,
            Self::Error | Self::Assert => log::Level::Error,
            Self::Text => log::Level::Info,
        }
    }
}
