//! Tar header parsing modules.

pub mod entry_header;
pub mod extended_header;
pub mod long_link;

pub use entry_header::EntryHeaderParser;
pub use extended_header::{ExtendedHeaderParser, PaxRecord, PaxValue};
pub use long_link::LongLinkParser;
