/*
    FoLiA2OAC (FoLiA to Open Annotation converter)
        Digital Infrastucture, KNAW Humanities Cluster

        Licensed under the GNU General Public License v3
*/

//! Aligns tokens with the source text they were derived from. FoLiA does not record
//! character offsets, so they are reconstructed by replaying the tokens in document order
//! against the raw text.

use crate::error::FoliaError;
use crate::token::TokenRegistry;
use crate::types::{Alignment, OffsetUnit};

/// Summary of an alignment pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlignmentReport {
    /// Tokens that were found in the text
    pub aligned: usize,
    /// Tokens without text, these can not be aligned
    pub skipped: usize,
    /// Tokens with text that was not found after the cursor
    pub unresolved: usize,
}

/// A forward-only cursor over a text that tracks its position both in UTF-8 bytes
/// and in the configured offset unit.
struct TextCursor<'t> {
    text: &'t str,
    unit: OffsetUnit,
    bytepos: usize,
    pos: usize,
}

impl<'t> TextCursor<'t> {
    fn new(text: &'t str, unit: OffsetUnit) -> Self {
        Self {
            text,
            unit,
            bytepos: 0,
            pos: 0,
        }
    }

    /// Finds the first occurrence of the fragment at or after the cursor. On success the cursor
    /// moves to the end of the match, otherwise it stays where it is.
    fn seek(&mut self, fragment: &str) -> Option<Alignment> {
        let remainder = &self.text[self.bytepos..];
        let found = remainder.find(fragment)?;
        let offset = self.pos + self.unit.measure(&remainder[..found]);
        let length = self.unit.measure(fragment);
        self.bytepos += found + fragment.len();
        self.pos = offset + length;
        Some(Alignment::new(offset, length))
    }
}

/// Resolves the offset and length of every token in the registry by sequential forward
/// search in the source text. Tokens without text, and tokens whose text does not occur after
/// the previous match, remain unaligned. An empty text leaves all tokens unaligned.
pub fn align_tokens(
    registry: &mut TokenRegistry,
    text: &str,
    unit: OffsetUnit,
) -> Result<AlignmentReport, FoliaError> {
    let mut report = AlignmentReport::default();
    let mut cursor = TextCursor::new(text, unit);
    for handle in registry.ordered_handles() {
        let found = match registry.get(handle).and_then(|token| token.text()) {
            Some(fragment) if !fragment.is_empty() => {
                if text.is_empty() {
                    None
                } else {
                    cursor.seek(fragment)
                }
            }
            _ => {
                report.skipped += 1;
                continue;
            }
        };
        match found {
            Some(alignment) => {
                registry.set_alignment(handle, alignment)?;
                report.aligned += 1;
            }
            None => {
                if let Some(token) = registry.get(handle) {
                    tracing::debug!(
                        "Token {} ({:?}) not found in source text after position {}",
                        token.id(),
                        token.text().unwrap_or_default(),
                        cursor.pos
                    );
                }
                report.unresolved += 1;
            }
        }
    }
    Ok(report)
}
