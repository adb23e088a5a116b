//! GNU long-filename carry-over.
//!
//! GNU tar stores names longer than the 100-byte header field in a
//! dedicated marker entry named `././@LongLink`, whose content is the
//! real name of the entry that physically follows it. Type `'L'`
//! carries the next entry's name, `'K'` the next entry's link target.

/// The reserved marker name used by GNU long name/link entries.
pub const LONG_LINK_MARKER: &str = "././@LongLink";

pub struct LongLinkParser;

impl LongLinkParser {
    /// Whether an entry name is the GNU long-link marker.
    pub fn is_marker(name: &str) -> bool {
        name == LONG_LINK_MARKER
    }

    /// Decode a marker entry's content into the carried-over name.
    ///
    /// The stored name is NUL-terminated; the terminator is stripped.
    pub fn parse(content: &[u8]) -> String {
        let text: String = content.iter().map(|&b| b as char).collect();
        text.trim_end_matches('\0').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_detection() {
        assert!(LongLinkParser::is_marker("././@LongLink"));
        assert!(!LongLinkParser::is_marker("./@LongLink"));
        assert!(!LongLinkParser::is_marker("some/file.txt"));
    }

    #[test]
    fn test_parse_strips_terminator() {
        assert_eq!(
            LongLinkParser::parse(b"very/long/path/to/a/file.txt\0"),
            "very/long/path/to/a/file.txt"
        );
    }

    #[test]
    fn test_parse_without_terminator() {
        assert_eq!(LongLinkParser::parse(b"plain"), "plain");
    }
}
