//! WindowDecoder - drives archive decoding over bounded byte windows.
//!
//! Each iteration stitches the carry left over from the previous window
//! together with freshly-read bytes, runs the synchronous decode step,
//! and keeps the absolute archive offset exact even when a skipped
//! entry's padded span runs past the window it started in. The window
//! read is the decoder's sole suspension point.

use crate::byte_source::{ByteSource, ReadInterval};
use crate::decoder::{decode_blocks, DecodeMode, DecodeOptions, DecoderState, StepOutcome};
use crate::entry::DecodedFile;
use crate::error::Result;
use crate::BLOCK_SIZE;
use regex::Regex;
use std::sync::Arc;

/// Default window size: 1 MiB.
pub const DEFAULT_WINDOW_SIZE: u64 = 1024 * 1024;

/// Windowed archive decoder over an abstract [`ByteSource`].
pub struct WindowDecoder {
    source: Arc<dyn ByteSource>,
    window_size: u64,
}

impl WindowDecoder {
    pub fn new(source: Arc<dyn ByteSource>) -> Self {
        Self {
            source,
            window_size: DEFAULT_WINDOW_SIZE,
        }
    }

    /// Set the fresh-read size per window. Values below one header
    /// block are raised to it.
    pub fn with_window_size(mut self, window_size: u64) -> Self {
        self.window_size = window_size.max(BLOCK_SIZE as u64);
        self
    }

    /// Decode the archive, returning results in archive physical order.
    pub async fn decode(&self, options: &DecodeOptions) -> Result<Vec<DecodedFile>> {
        let total = self.source.length();
        let mut state = DecoderState::new();
        let mut results = Vec::new();

        while state.offset < total {
            let fresh_len = self.window_size.min(total - state.offset);
            let fresh = self
                .source
                .read_range(ReadInterval {
                    start: state.offset,
                    end: state.offset + fresh_len - 1,
                })
                .await?;
            state.offset += fresh.len() as u64;

            let window = if state.carry.is_empty() {
                fresh
            } else {
                let mut joined = std::mem::take(&mut state.carry);
                joined.extend_from_slice(&fresh);
                joined
            };
            log::trace!("decoding a {}-byte window ending at offset {}", window.len(), state.offset);

            if let Some(cancel) = &options.cancel {
                if cancel() {
                    log::debug!("decode of {} cancelled at offset {}", self.source.name(), state.offset);
                    return Ok(results);
                }
            }

            let StepOutcome { consumed, finished } =
                decode_blocks(&window, &mut state, options, &mut results)?;
            if finished {
                return Ok(results);
            }

            let window_len = window.len() as u64;
            if consumed >= window_len {
                // A skip ran past the window; resume reading after it.
                state.offset += consumed - window_len;
            } else {
                state.carry = window[consumed as usize..].to_vec();
            }
        }

        if state.has_pending_entry() {
            log::warn!("{}: archive ended with an incomplete entry", self.source.name());
        }
        Ok(results)
    }

    /// Names-only convenience: list entry names, with the patterns as
    /// an exclude-list (`patterns_exclude`) or an include-list.
    pub async fn decode_names(
        &self,
        patterns: Vec<Regex>,
        patterns_exclude: bool,
    ) -> Result<Vec<String>> {
        let options = DecodeOptions {
            patterns,
            mode: DecodeMode::NamesOnly { patterns_exclude },
            cancel: None,
        };
        let results = self.decode(&options).await?;
        Ok(results.into_iter().map(|f| f.name).collect())
    }
}
