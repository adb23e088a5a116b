//! Entry header parser.
//!
//! Each entry in a ustar archive starts with a 512-byte header block of
//! fixed-width text fields. Numeric fields are ASCII octal, NUL- or
//! space-terminated; the decoder is lenient and turns anything
//! unparsable into 0.

use crate::byte_cursor::ByteCursor;
use crate::entry::Entry;
use crate::error::{Result, TarError};
use crate::BLOCK_SIZE;

/// Field widths, in header layout order.
const NAME_LEN: usize = 100;
const MODE_LEN: usize = 8;
const UID_LEN: usize = 8;
const GID_LEN: usize = 8;
const SIZE_LEN: usize = 12;
const MTIME_LEN: usize = 12;
const CHECKSUM_LEN: usize = 8;
const LINKNAME_LEN: usize = 100;
const MAGIC_LEN: usize = 6;
const VERSION_LEN: usize = 2;
const UNAME_LEN: usize = 32;
const GNAME_LEN: usize = 32;
const DEV_LEN: usize = 8;
const PREFIX_LEN: usize = 155;

/// The literal every ustar-family magic token contains.
const USTAR_MAGIC: &str = "ustar";

/// Decode an ASCII octal field, leniently.
///
/// Non-numeric or unparsable text decodes to 0 rather than failing;
/// the format tolerates blank and garbage numeric fields.
pub fn parse_octal(text: &str) -> u64 {
    let trimmed = text.trim_matches(|c| c == ' ' || c == '\0');
    if trimmed.is_empty() {
        return 0;
    }
    u64::from_str_radix(trimmed, 8).unwrap_or(0)
}

pub struct EntryHeaderParser;

impl EntryHeaderParser {
    /// Decode one 512-byte header block into an [`Entry`].
    ///
    /// The name, mode, uid, gid and size fields are always decoded.
    /// `decode_detail` is consulted with the decoded name; when it
    /// returns false the remaining 394 bytes of header detail are left
    /// at their defaults. Skipping detail is purely an optimization for
    /// entries whose extra fields will never be looked at.
    ///
    /// Whichever path is taken, the cursor ends exactly
    /// [`BLOCK_SIZE`] bytes past where it started.
    pub fn parse(
        cursor: &mut ByteCursor<'_>,
        decode_detail: impl FnOnce(&str) -> bool,
    ) -> Result<Entry> {
        let start = cursor.position();

        let mut entry = Entry {
            name: cursor.read_fixed_field(NAME_LEN),
            mode: cursor.read_fixed_field(MODE_LEN),
            ..Entry::default()
        };
        entry.uid = parse_octal(&cursor.read_fixed_field(UID_LEN));
        entry.gid = parse_octal(&cursor.read_fixed_field(GID_LEN));
        let size = parse_octal(&cursor.read_fixed_field(SIZE_LEN));
        entry.set_size(size);

        if decode_detail(&entry.name) {
            entry.mtime = cursor.read_fixed_field(MTIME_LEN);
            entry.checksum = cursor.read_fixed_field(CHECKSUM_LEN);
            entry.type_flag = cursor.read_byte();
            let linkname = cursor.read_fixed_field(LINKNAME_LEN);
            entry.linkname = (!linkname.is_empty()).then_some(linkname);
            entry.magic = cursor.read_fixed_field(MAGIC_LEN);
            if !entry.magic.contains(USTAR_MAGIC) {
                return Err(TarError::NotUstar);
            }
            entry.version = cursor.read_fixed_field(VERSION_LEN);
            let uname = cursor.read_fixed_field(UNAME_LEN);
            entry.uname = (!uname.is_empty()).then_some(uname);
            let gname = cursor.read_fixed_field(GNAME_LEN);
            entry.gname = (!gname.is_empty()).then_some(gname);
            entry.dev_major = parse_octal(&cursor.read_fixed_field(DEV_LEN));
            entry.dev_minor = parse_octal(&cursor.read_fixed_field(DEV_LEN));
            entry.prefix = cursor.read_fixed_field(PREFIX_LEN);
        }

        // Consume any undecoded tail of the block so offsets never drift.
        cursor.seek_to(start + BLOCK_SIZE);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_archive::header_block;

    #[test]
    fn test_parse_base_fields() {
        let block = header_block("hello.txt", 1234, b'0');
        let mut cursor = ByteCursor::new(&block);
        let entry = EntryHeaderParser::parse(&mut cursor, |_| false).unwrap();

        assert_eq!(entry.name, "hello.txt");
        assert_eq!(entry.size, 1234);
        assert_eq!(entry.padded_size, 1536);
        assert_eq!(cursor.position(), BLOCK_SIZE);
        // Detail fields stay at their defaults when skipped.
        assert_eq!(entry.type_flag, 0);
        assert_eq!(entry.magic, "");
    }

    #[test]
    fn test_parse_detail_fields() {
        let block = header_block("hello.txt", 7, b'5');
        let mut cursor = ByteCursor::new(&block);
        let entry = EntryHeaderParser::parse(&mut cursor, |_| true).unwrap();

        assert_eq!(entry.type_flag, b'5');
        assert_eq!(entry.magic, "ustar");
        assert_eq!(entry.version, "00");
        assert_eq!(cursor.position(), BLOCK_SIZE);
    }

    #[test]
    fn test_detail_decision_sees_name() {
        let block = header_block("watched.json", 0, b'0');
        let mut cursor = ByteCursor::new(&block);
        let entry =
            EntryHeaderParser::parse(&mut cursor, |name| name.ends_with(".json")).unwrap();
        assert_eq!(entry.magic, "ustar");
    }

    #[test]
    fn test_missing_magic_is_fatal() {
        let mut block = header_block("x", 0, b'0');
        block[257..263].copy_from_slice(b"gnarly");
        let mut cursor = ByteCursor::new(&block);
        assert!(matches!(
            EntryHeaderParser::parse(&mut cursor, |_| true),
            Err(TarError::NotUstar)
        ));
    }

    #[test]
    fn test_magic_not_checked_without_detail() {
        let mut block = header_block("x", 0, b'0');
        block[257..263].copy_from_slice(b"gnarly");
        let mut cursor = ByteCursor::new(&block);
        assert!(EntryHeaderParser::parse(&mut cursor, |_| false).is_ok());
    }

    #[test]
    fn test_lenient_octal() {
        assert_eq!(parse_octal("0000644"), 0o644);
        assert_eq!(parse_octal("  644 "), 0o644);
        assert_eq!(parse_octal(""), 0);
        assert_eq!(parse_octal("   "), 0);
        assert_eq!(parse_octal("bogus"), 0);
        assert_eq!(parse_octal("9991"), 0);
    }

    #[test]
    fn test_garbage_size_decodes_to_zero() {
        let mut block = header_block("x", 0, b'0');
        block[124..136].copy_from_slice(b"zzzzzzzzzzz\0");
        let mut cursor = ByteCursor::new(&block);
        let entry = EntryHeaderParser::parse(&mut cursor, |_| false).unwrap();
        assert_eq!(entry.size, 0);
        assert_eq!(entry.padded_size, 0);
    }
}
