//! Fixed-capacity message formatting.
//!
//! Every log message is rendered into a stack-local [`MessageBuffer`]
//! before it reaches an output channel. Writes past the capacity are
//! dropped at a character boundary; overflow truncates, it never errors
//! and never panics.

use std::fmt;

/// Formatting capacity for a single message, in bytes.
pub const MAX_MESSAGE_SIZE: usize = 4096;

/// A stack-allocated, truncating text buffer.
///
/// Implements [`fmt::Write`] so it can be the target of
/// `write!`/`fmt::Arguments` rendering. Once full, further writes are
/// silently discarded.
pub struct MessageBuffer {
    buf: [u8; MAX_MESSAGE_SIZE],
    len: usize,
}

impl MessageBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_MESSAGE_SIZE],
            len: 0,
        }
    }

    /// The formatted text written so far.
    pub fn as_str(&self) -> &str {
        // Writes only ever land on character boundaries, so this cannot
        // fail; an empty message is the silent-degradation fallback.
        std::str::from_utf8(&self.buf[..self.len]).unwrap_or_default()
    }

    /// Bytes currently used.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard the contents, keeping the storage.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Largest prefix of `s` that fits in `room` whole characters.
    fn fitting_prefix(s: &str, room: usize) -> &str {
        if s.len() <= room {
            return s;
        }
        let mut end = room;
        while end > 0 && !s.is_char_boundary(end) {
            end -= 1;
        }
        &s[..end]
    }
}

impl fmt::Write for MessageBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = MAX_MESSAGE_SIZE - self.len;
        let take = Self::fitting_prefix(s, room);
        self.buf[self.len..self.len + take.len()].copy_from_slice(take.as_bytes());
        self.len += take.len();
        Ok(())
    }
}

impl Default for MessageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MessageBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBuffer")
            .field("len", &self.len)
            .field("capacity", &MAX_MESSAGE_SIZE)
            .finish()
    }
}
