//! Window-by-window decoding core.
//!
//! [`decode_blocks`] is the pure, synchronous step of the decoder: it
//! consumes as many whole entries as one byte window holds, mutating a
//! [`DecoderState`] that carries everything a parse needs to continue in
//! the next window: a header whose content has not fully arrived, a
//! pending GNU long-link name, pending global/local PAX overrides. The
//! async window loop and the single-buffer entry point both drive this
//! same function, so re-chunking an archive can never change the result.

use crate::byte_cursor::ByteCursor;
use crate::entry::{DecodedFile, Entry};
use crate::error::Result;
use crate::parsing::entry_header::parse_octal;
use crate::parsing::{EntryHeaderParser, ExtendedHeaderParser, LongLinkParser, PaxRecord};
use crate::BLOCK_SIZE;
use regex::Regex;

/// Names PAX carrier entries are recognized by, in addition to their
/// type flag: GNU and BSD tar call them `PaxHeaders.N/<path>`. The type
/// flag lives in the detail region of the header, so without this name
/// hint a carrier could be misclassified before its detail is decoded.
const PAX_NAME_HINT: &str = "PaxHeader";

/// Entry selection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Patterns select entries to fully decode. Every other regular
    /// entry is still listed by name with empty content, unless
    /// `exclude_unmatched` drops it from the results entirely.
    Content { exclude_unmatched: bool },
    /// No content is ever read. With `patterns_exclude` set the
    /// patterns are an exclude-list, otherwise an include-list; an
    /// empty pattern set lists every valid name either way.
    NamesOnly { patterns_exclude: bool },
}

impl Default for DecodeMode {
    fn default() -> Self {
        Self::Content {
            exclude_unmatched: false,
        }
    }
}

/// Options for one archive decode.
#[derive(Default)]
pub struct DecodeOptions {
    /// Ordered name patterns; an entry matches when any pattern does.
    pub patterns: Vec<Regex>,
    pub mode: DecodeMode,
    /// Checked once per window boundary; return true to stop decoding.
    pub cancel: Option<Box<dyn Fn() -> bool + Send + Sync>>,
}

impl DecodeOptions {
    pub fn matches(&self, name: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(name))
    }

    pub fn is_names_only(&self) -> bool {
        matches!(self.mode, DecodeMode::NamesOnly { .. })
    }

    fn names_only_keeps(&self, matched: bool) -> bool {
        match self.mode {
            DecodeMode::NamesOnly { patterns_exclude } => {
                if self.patterns.is_empty() {
                    true
                } else if patterns_exclude {
                    !matched
                } else {
                    matched
                }
            }
            DecodeMode::Content { .. } => false,
        }
    }
}

/// Parse state carried across windows during one archive decode.
#[derive(Debug, Default)]
pub struct DecoderState {
    /// Absolute archive offset of the next fresh read.
    pub(crate) offset: u64,
    /// Unconsumed bytes left over from the previous window.
    pub(crate) carry: Vec<u8>,
    /// Header decoded but content not yet fully in-window.
    pending_entry: Option<Entry>,
    /// GNU long name awaiting the next physical header.
    pending_long_name: Option<String>,
    /// GNU long link target awaiting the next physical header.
    pending_long_linkname: Option<String>,
    /// Global PAX overrides; persist until replaced by another global.
    global_pax: Option<Vec<PaxRecord>>,
    /// Local PAX overrides; consumed by exactly the next entry.
    local_pax: Option<Vec<PaxRecord>>,
}

impl DecoderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an entry is waiting for more bytes.
    pub fn has_pending_entry(&self) -> bool {
        self.pending_entry.is_some()
    }
}

/// Result of one [`decode_blocks`] step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Bytes logically consumed. May exceed the window length when a
    /// skipped entry's padded span runs past the window's physical end;
    /// the overrun must then be added to the absolute read offset.
    pub consumed: u64,
    /// The archive terminator was reached; the decode is complete.
    pub finished: bool,
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != "./"
}

fn placeholder(entry: &Entry) -> DecodedFile {
    DecodedFile {
        name: entry.name.clone(),
        mode: parse_octal(&entry.mode) as u32,
        content: Vec::new(),
    }
}

/// Decode whole entries out of one byte window.
///
/// Appends results to `out` in archive physical order and returns how
/// many bytes were consumed. Bytes past `consumed` (when it is below
/// the window length) must be carried into the next window.
pub fn decode_blocks(
    window: &[u8],
    state: &mut DecoderState,
    options: &DecodeOptions,
    out: &mut Vec<DecodedFile>,
) -> Result<StepOutcome> {
    let mut pos: usize = 0;

    loop {
        let mut entry = match state.pending_entry.take() {
            Some(entry) => entry,
            None => {
                if window.len() - pos < BLOCK_SIZE {
                    break;
                }
                let block = &window[pos..pos + BLOCK_SIZE];

                // The first all-zero block is the archive trailer.
                if block.iter().all(|&b| b == 0) {
                    log::debug!("zero header block, ending decode");
                    return Ok(StepOutcome {
                        consumed: (pos + BLOCK_SIZE) as u64,
                        finished: true,
                    });
                }

                let mut cursor = ByteCursor::new(block);
                let mut entry = EntryHeaderParser::parse(&mut cursor, |name| {
                    let effective = state.pending_long_name.as_deref().unwrap_or(name);
                    LongLinkParser::is_marker(effective)
                        || effective.contains(PAX_NAME_HINT)
                        || state.global_pax.is_some()
                        || state.local_pax.is_some()
                        || options.matches(effective)
                })?;
                pos += BLOCK_SIZE;

                // A nearly-empty header that is not a zero block still
                // yields nothing usable; end the decode rather than
                // spinning on it.
                if entry.name.is_empty()
                    && entry.size == 0
                    && state.pending_long_name.is_none()
                {
                    log::debug!("header block without name or size, ending decode");
                    return Ok(StepOutcome {
                        consumed: pos as u64,
                        finished: true,
                    });
                }

                if let Some(records) = &state.global_pax {
                    ExtendedHeaderParser::apply(&mut entry, records);
                }
                if let Some(records) = state.local_pax.take() {
                    ExtendedHeaderParser::apply(&mut entry, &records);
                }
                if let Some(long_name) = state.pending_long_name.take() {
                    entry.name = long_name;
                }
                if let Some(long_link) = state.pending_long_linkname.take() {
                    entry.linkname = Some(long_link);
                }
                entry
            }
        };

        let valid_name = is_valid_name(&entry.name);
        let matched = options.matches(&entry.name);
        let extension = entry.is_pax_local()
            || entry.is_pax_global()
            || LongLinkParser::is_marker(&entry.name);

        // Entries whose content will never be needed are skipped, not
        // read; a skip may run past the physical end of the window.
        let skip = if options.is_names_only() {
            !extension
        } else {
            entry.is_regular() && valid_name && !matched
        };
        if skip {
            match options.mode {
                DecodeMode::Content { exclude_unmatched } => {
                    if !exclude_unmatched {
                        out.push(placeholder(&entry));
                    }
                }
                DecodeMode::NamesOnly { .. } => {
                    if entry.is_regular() && valid_name && options.names_only_keeps(matched) {
                        out.push(placeholder(&entry));
                    }
                }
            }
            let logical = (pos as u64).saturating_add(entry.padded_size);
            if logical > window.len() as u64 {
                return Ok(StepOutcome {
                    consumed: logical,
                    finished: false,
                });
            }
            pos = logical as usize;
            continue;
        }

        // Defer until the whole padded span has arrived.
        if ((window.len() - pos) as u64) < entry.padded_size {
            state.pending_entry = Some(entry);
            break;
        }

        if valid_name {
            let content = &window[pos..pos + entry.size as usize];
            if entry.is_pax_global() {
                state.global_pax = Some(ExtendedHeaderParser::parse(content)?);
            } else if entry.is_pax_local() {
                state.local_pax = Some(ExtendedHeaderParser::parse(content)?);
            } else if LongLinkParser::is_marker(&entry.name) {
                let carried = LongLinkParser::parse(content);
                if entry.is_gnu_long_link() {
                    state.pending_long_linkname = Some(carried);
                } else {
                    state.pending_long_name = Some(carried);
                }
            } else if matched {
                entry.content = Some(content.to_vec());
                out.push(DecodedFile {
                    name: entry.name.clone(),
                    mode: parse_octal(&entry.mode) as u32,
                    content: entry.content.take().unwrap_or_default(),
                });
            }
        }

        pos += entry.padded_size as usize;
    }

    Ok(StepOutcome {
        consumed: pos as u64,
        finished: false,
    })
}

/// Decode a single fully-buffered archive.
///
/// Applies the same step the windowed loop uses, once, to the whole
/// buffer.
pub fn decode_buffer(bytes: &[u8], options: &DecodeOptions) -> Result<Vec<DecodedFile>> {
    let mut state = DecoderState::new();
    let mut out = Vec::new();
    let outcome = decode_blocks(bytes, &mut state, options, &mut out)?;
    if !outcome.finished && state.has_pending_entry() {
        log::warn!("archive ended with an incomplete entry");
    }
    Ok(out)
}
