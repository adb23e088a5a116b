//! PAX extended header parser.
//!
//! A PAX header entry (`type 'x'` local, `'g'` global) carries a stream
//! of records shaped `<length> <key>=<value>\n`, where `<length>` is the
//! decimal byte count of the whole record including itself. The records
//! override fields of the following entry (local) or of all following
//! entries (global).

use crate::entry::Entry;
use crate::error::{Result, TarError};

/// Value of one PAX record.
///
/// A value is classified as [`Number`](PaxValue::Number) only when the
/// raw text is non-empty and entirely decimal digits; an empty value is
/// the deletion sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaxValue {
    Text(String),
    Number(u64),
    Null,
}

impl PaxValue {
    fn classify(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Null;
        }
        if raw.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(n) = raw.parse::<u64>() {
                return Self::Number(n);
            }
        }
        Self::Text(raw.to_string())
    }
}

/// One parsed `key=value` override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaxRecord {
    pub key: String,
    pub value: PaxValue,
}

fn malformed(check: &str) -> TarError {
    TarError::MalformedPax(check.to_string())
}

pub struct ExtendedHeaderParser;

impl ExtendedHeaderParser {
    /// Parse a PAX record stream into its ordered records.
    ///
    /// Fails with [`TarError::MalformedPax`] on the first record that
    /// does not match the declared `<length> <key>=<value>\n` pattern.
    pub fn parse(buffer: &[u8]) -> Result<Vec<PaxRecord>> {
        let mut records = Vec::new();
        let mut pos = 0;

        while pos < buffer.len() {
            let mut digits_end = pos;
            while digits_end < buffer.len() && buffer[digits_end].is_ascii_digit() {
                digits_end += 1;
            }
            if digits_end == pos {
                return Err(malformed("record length missing"));
            }
            if digits_end >= buffer.len() || buffer[digits_end] != b' ' {
                return Err(malformed("no space after record length"));
            }
            let mut declared: usize = 0;
            for &digit in &buffer[pos..digits_end] {
                declared = declared
                    .checked_mul(10)
                    .and_then(|d| d.checked_add(usize::from(digit - b'0')))
                    .ok_or_else(|| malformed("record length out of range"))?;
            }

            let end = pos
                .checked_add(declared)
                .ok_or_else(|| malformed("record length out of range"))?;
            // The declared length counts its own digits and delimiter.
            let prefix_len = digits_end - pos + 1;
            if declared <= prefix_len || end > buffer.len() {
                return Err(malformed("record length exceeds header"));
            }

            let record = std::str::from_utf8(&buffer[pos..end])
                .map_err(|_| malformed("record is not valid UTF-8"))?;
            let after_length = &record[prefix_len..];
            let body = after_length
                .strip_suffix('\n')
                .ok_or_else(|| malformed("record missing trailing newline"))?;
            let (key, value) = body
                .split_once('=')
                .ok_or_else(|| malformed("record missing key=value separator"))?;

            records.push(PaxRecord {
                key: key.to_string(),
                value: PaxValue::classify(value),
            });
            pos = end;
        }

        Ok(records)
    }

    /// Apply parsed records to a pending entry.
    ///
    /// Known keys are dispatched explicitly; `path` supersedes both name
    /// and prefix, `linkpath` maps to the link name. An override whose
    /// value type does not match the field's type is dropped, which is
    /// deliberate leniency. Unknown keys are ignored.
    pub fn apply(entry: &mut Entry, records: &[PaxRecord]) {
        for record in records {
            match record.key.as_str() {
                "path" => {
                    if let PaxValue::Text(v) = &record.value {
                        entry.name = v.clone();
                        // A PAX path is complete; a leftover ustar
                        // prefix must not be re-joined onto it.
                        entry.prefix.clear();
                    }
                }
                "linkpath" => match &record.value {
                    PaxValue::Text(v) => entry.linkname = Some(v.clone()),
                    PaxValue::Null => entry.linkname = None,
                    PaxValue::Number(_) => {}
                },
                "uid" => {
                    if let PaxValue::Number(n) = record.value {
                        entry.uid = n;
                    }
                }
                "gid" => {
                    if let PaxValue::Number(n) = record.value {
                        entry.gid = n;
                    }
                }
                "size" => {
                    if let PaxValue::Number(n) = record.value {
                        entry.set_size(n);
                    }
                }
                "mtime" => {
                    if let PaxValue::Text(v) = &record.value {
                        entry.mtime = v.clone();
                    }
                }
                "uname" => match &record.value {
                    PaxValue::Text(v) => entry.uname = Some(v.clone()),
                    PaxValue::Null => entry.uname = None,
                    PaxValue::Number(_) => {}
                },
                "gname" => match &record.value {
                    PaxValue::Text(v) => entry.gname = Some(v.clone()),
                    PaxValue::Null => entry.gname = None,
                    PaxValue::Number(_) => {}
                },
                _ => {}
            }
        }
    }
}
