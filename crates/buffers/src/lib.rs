//! Little-endian byte primitives for the docwire codec.
//!
//! # Overview
//!
//! - [`Reader`] - Reads binary data from a byte slice with cursor tracking
//! - [`Writer`] - Writes binary data to a growable buffer
//! - [`read_i32_le`], [`read_cstring`], [`write_cstring`] - slice-in, rest-out
//!   helpers for code that threads the unread tail through recursive calls
//!
//! Every read is bounds checked: running off the end of the input is an
//! [`BufferError::EndOfBuffer`], never a panic.
//!
//! # Example
//!
//! ```
//! use docwire_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.i32_le(5);
//! writer.cstring("key").unwrap();
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.i32_le(), Ok(5));
//! assert_eq!(reader.cstr(), Ok("key"));
//! assert_eq!(reader.size(), 0);
//! ```

mod primitives;
mod reader;
mod writer;

pub use primitives::{read_cstring, read_i32_le, write_cstring};
pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    EndOfBuffer,
    /// A C-string ran to the end of the buffer without a zero terminator.
    MissingNul,
    /// Invalid UTF-8 sequence.
    InvalidUtf8,
    /// Text destined for a C-string contains a zero byte.
    EmbeddedNul,
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer => write!(f, "end of buffer"),
            BufferError::MissingNul => write!(f, "unterminated C-string"),
            BufferError::InvalidUtf8 => write!(f, "invalid UTF-8 sequence"),
            BufferError::EmbeddedNul => write!(f, "embedded NUL byte in C-string"),
        }
    }
}

impl std::error::Error for BufferError {}
