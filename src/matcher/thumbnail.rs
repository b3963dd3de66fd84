//! Filename-based thumbnail-to-document matching
//!
//! Archive files share a base name and carry variant data after a `__`
//! delimiter, e.g. `abc123__orig.pdf` and `abc123__jpg_thumb.jpg`.
//! A thumbnail belongs to a document when the thumbnail's full filename
//! starts with the document's base token.

use std::collections::HashSet;

use crate::state::data::{DerivativeImage, DocumentFile, MediaItem};

/// Separator between the base name and the variant suffix
pub const BASE_DELIMITER: &str = "__";

/// Result of matching every document of one item
pub type DocumentMatch<'a> = (&'a DocumentFile, Option<&'a DerivativeImage>);

/// Everything before the first `__`, or the whole filename when there is none
pub fn base_token(filename: &str) -> &str {
    match filename.find(BASE_DELIMITER) {
        Some(end) => &filename[..end],
        None => filename,
    }
}

/// Find the thumbnail for a document.
///
/// Only thumbnail-role candidates are considered. The first one (in the
/// given order) whose filename starts with the document's base token wins;
/// later candidates are never looked at. `None` is the normal outcome for a
/// document without a preview.
pub fn match_document_to_thumbnail<'a>(
    document: &DocumentFile,
    candidates: &'a [DerivativeImage],
) -> Option<&'a DerivativeImage> {
    let base = base_token(&document.filename);

    candidates
        .iter()
        .filter(|image| image.role.is_thumbnail())
        .find(|image| image.filename.starts_with(base))
}

/// Match every document of `item` against the item's own derivatives,
/// keeping document order.
pub fn match_all(item: &MediaItem) -> Vec<DocumentMatch<'_>> {
    item.documents
        .iter()
        .map(|doc| (doc, match_document_to_thumbnail(doc, &item.derivative_images)))
        .collect()
}

/// "N of M documents matched"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchSummary {
    pub matched: usize,
    pub total: usize,
}

impl MatchSummary {
    pub fn unmatched(&self) -> usize {
        self.total.saturating_sub(self.matched)
    }

    pub fn is_complete(&self) -> bool {
        self.matched >= self.total
    }
}

pub fn summarize(matches: &[DocumentMatch<'_>]) -> MatchSummary {
    MatchSummary {
        matched: matches.iter().filter(|(_, thumb)| thumb.is_some()).count(),
        total: matches.len(),
    }
}

/// Derivative images that stand on their own rather than previewing a document.
///
/// Thumbnails are always kept. Any other derivative is dropped when it
/// shares an asset id with one of the item's documents, or when its base
/// token equals a document's base token with a trailing `.pdf` removed.
/// Images with no base token and no asset id are kept.
pub fn standalone_images(item: &MediaItem) -> Vec<&DerivativeImage> {
    let document_assets: HashSet<&str> = item
        .documents
        .iter()
        .filter_map(|doc| doc.asset_id.as_deref())
        .filter(|id| !id.is_empty())
        .collect();

    let document_bases: HashSet<&str> = item
        .documents
        .iter()
        .map(|doc| strip_pdf_extension(base_token(&doc.filename)))
        .filter(|base| !base.is_empty())
        .collect();

    item.derivative_images
        .iter()
        .filter(|image| {
            if image.role.is_thumbnail() {
                return true;
            }
            if let Some(asset) = image.asset_id.as_deref() {
                if document_assets.contains(asset) {
                    return false;
                }
            }
            let base = base_token(&image.filename);
            base.is_empty() || !document_bases.contains(base)
        })
        .collect()
}

fn strip_pdf_extension(name: &str) -> &str {
    let cut = name.len().saturating_sub(4);
    match name.get(cut..) {
        Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &name[..cut],
        _ => name,
    }
}
