//! Error types for tar decoding.
//!
//! This module provides the [`TarError`] type covering all failures the
//! decoder can surface.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Format | [`NotUstar`], [`MalformedPax`] | Archive violates the ustar/PAX format |
//! | I/O | [`Io`], [`BufferTooSmall`] | Byte-source read errors |
//!
//! Only the format errors are produced by the decoding core itself; once
//! one is raised the whole decode is abandoned and no partial results are
//! implied to be valid. Everything else the format allows to be sloppy
//! (non-numeric octal fields, unknown type flags, PAX overrides of the
//! wrong type) is recovered locally and never reaches this type.
//!
//! [`NotUstar`]: TarError::NotUstar
//! [`MalformedPax`]: TarError::MalformedPax
//! [`Io`]: TarError::Io
//! [`BufferTooSmall`]: TarError::BufferTooSmall

use std::fmt;
use std::io;

/// Error type for tar decoding operations.
#[derive(Debug)]
pub enum TarError {
    /// The format-magic token of a decoded header does not contain the
    /// literal `ustar`.
    ///
    /// Raised only for headers whose detail fields are decoded; the
    /// archive is rejected as a whole once this is seen.
    NotUstar,

    /// A PAX extended-header record does not match the required
    /// `<length> <key>=<value>\n` shape.
    ///
    /// The `String` names the check that failed (missing length
    /// delimiter, bad UTF-8, missing `=`, missing trailing newline).
    MalformedPax(String),

    /// The byte source returned fewer bytes than the requested range.
    BufferTooSmall {
        /// Number of bytes needed.
        needed: usize,
        /// Number of bytes available.
        have: usize,
    },

    /// An I/O error from the underlying byte source.
    Io(io::Error),
}

impl fmt::Display for TarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotUstar => write!(f, "Header magic does not contain \"ustar\""),
            Self::MalformedPax(check) => write!(f, "Malformed PAX record: {}", check),
            Self::BufferTooSmall { needed, have } => {
                write!(f, "Buffer too small: need {} bytes, have {}", needed, have)
            }
            Self::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for TarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for TarError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, TarError>;
