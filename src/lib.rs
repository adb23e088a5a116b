//! Windowed tar decoding library.
//!
//! Decodes POSIX `ustar`-family archives, including GNU long-filename
//! markers and PAX extended headers, while reading the archive in
//! bounded-size windows instead of holding it in memory. Archives are
//! consumed through an abstract "read byte range at absolute offset"
//! source, so hosts that only expose chunked reads of a large file
//! handle can decode without buffering the whole file.
//!
//! ## Features
//! - Core decoding works on plain in-memory buffers with no runtime
//! - `async` (default) - windowed decoding over a [`ByteSource`] with tokio
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tar_stream::{DecodeOptions, LocalFileSource, WindowDecoder};
//!
//! let source = Arc::new(LocalFileSource::new("bundle.tar")?);
//! let options = DecodeOptions {
//!     patterns: vec![regex::Regex::new(r"\.json$")?],
//!     ..DecodeOptions::default()
//! };
//! let files = WindowDecoder::new(source).decode(&options).await?;
//! ```

/// Tar archives are laid out in 512-byte blocks; headers occupy one
/// block and content is zero-padded up to the next block boundary.
pub const BLOCK_SIZE: usize = 512;

mod byte_cursor;
mod byte_source;
mod decoder;
mod entry;
pub mod error;
pub mod parsing;

#[cfg(feature = "async")]
mod window_decoder;

#[cfg(test)]
pub(crate) mod test_archive;

pub use byte_cursor::ByteCursor;
pub use byte_source::{LocalFileSource, MemoryByteSource, ReadInterval};
pub use decoder::{
    decode_blocks, decode_buffer, DecodeMode, DecodeOptions, DecoderState, StepOutcome,
};
pub use entry::{
    DecodedFile, Entry, TYPE_GNU_LONG_LINK, TYPE_GNU_LONG_NAME, TYPE_PAX_GLOBAL, TYPE_PAX_LOCAL,
    TYPE_REGULAR, TYPE_REGULAR_OLD,
};
pub use error::{Result, TarError};

#[cfg(feature = "async")]
pub use byte_source::ByteSource;
#[cfg(feature = "async")]
pub use window_decoder::{WindowDecoder, DEFAULT_WINDOW_SIZE};
