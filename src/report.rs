//! Console reports for the two diagnostics
//!
//! Reports are written to any `io::Write` so `main` can pass stdout and
//! tests can pass a buffer.

use std::io::{self, Write};

use crate::matcher::{self, Counts};
use crate::state::data::MediaItem;
use crate::state::library::Library;

/// Counting diagnostic: first item in detail, then totals over all items
pub fn write_counts<W: Write>(out: &mut W, library: &Library) -> io::Result<()> {
    writeln!(out, "Found {} media items\n", library.len())?;

    if let Some(first) = library.item(0) {
        let counts = matcher::classify_counts(std::slice::from_ref(first));
        writeln!(out, "Item 1: {}", first.display_name())?;
        writeln!(out, "  display images: {}", counts.total_display)?;
        writeln!(out, "  thumbnails: {}", counts.total_thumbnail)?;
        writeln!(out, "  documents: {}", counts.total_documents)?;
        for image in &first.derivative_images {
            writeln!(
                out,
                "    - {}: {}",
                image.role,
                labelled(&image.filename, image.label.as_deref())
            )?;
        }
        for document in &first.documents {
            writeln!(
                out,
                "    - document: {}",
                labelled(&document.filename, document.label.as_deref())
            )?;
        }
        writeln!(out)?;
    }

    let counts = matcher::classify_counts(library.items());
    write_totals(out, &counts)?;

    let standalone_display: usize = library
        .items()
        .iter()
        .map(|item| {
            matcher::standalone_images(item)
                .iter()
                .filter(|image| image.role.is_display())
                .count()
        })
        .sum();

    writeln!(out)?;
    if counts.total_display > 0 {
        writeln!(
            out,
            "WARNING: {} display images found; these will be shown as separate images",
            counts.total_display
        )?;
        writeln!(
            out,
            "   {} remain after dropping previews of documents",
            standalone_display
        )?;
    } else {
        writeln!(out, "OK: no display images found")?;
        writeln!(out, "   Only thumbnails (document previews) and documents")?;
    }

    Ok(())
}

fn write_totals<W: Write>(out: &mut W, counts: &Counts) -> io::Result<()> {
    writeln!(out, "=== TOTALS ===")?;
    writeln!(out, "Total items: {}", counts.item_count)?;
    writeln!(out, "display images: {}", counts.total_display)?;
    writeln!(out, "thumbnails: {}", counts.total_thumbnail)?;
    if counts.unclassified_images() > 0 {
        writeln!(out, "other images: {}", counts.unclassified_images())?;
    }
    writeln!(out, "documents: {}", counts.total_documents)?;
    writeln!(out)?;
    writeln!(out, "Items with only images: {}", counts.images_only_items)?;
    writeln!(out, "Items with only documents: {}", counts.documents_only_items)?;
    writeln!(out, "Items with both: {}", counts.both_items)?;
    Ok(())
}

/// Matching diagnostic for one item.
///
/// `limit` caps how many documents are listed; the summary line always
/// covers every document of the item.
pub fn write_matches<W: Write>(
    out: &mut W,
    item: &MediaItem,
    limit: Option<usize>,
) -> io::Result<()> {
    let counts = matcher::classify_counts(std::slice::from_ref(item));
    writeln!(out, "Item: {}", item.display_name())?;
    writeln!(out, "Total documents: {}", counts.total_documents)?;
    writeln!(out, "Total thumbnails: {}\n", counts.total_thumbnail)?;

    let matches = matcher::match_all(item);
    let shown = limit.unwrap_or(matches.len());

    for (i, (document, thumb)) in matches.iter().take(shown).enumerate() {
        writeln!(
            out,
            "Document {}: {}",
            i + 1,
            labelled(&document.filename, document.label.as_deref())
        )?;
        writeln!(out, "  Base: {}", matcher::base_token(&document.filename))?;
        if let Some(url) = &document.url {
            writeln!(out, "  URL: {}", url)?;
        }
        match thumb {
            Some(image) => {
                writeln!(out, "  Matched thumbnail: {}", image.filename)?;
                if let Some(url) = &image.url {
                    writeln!(out, "    URL: {}", url)?;
                }
            }
            None => writeln!(out, "  No matching thumbnail found")?,
        }
        writeln!(out)?;
    }

    let summary = matcher::summarize(&matches);
    writeln!(
        out,
        "{} of {} documents matched",
        summary.matched, summary.total
    )?;
    if !summary.is_complete() {
        writeln!(out, "{} documents have no thumbnail", summary.unmatched())?;
    }
    Ok(())
}

/// `filename [label]`, or just the filename when there is no label
fn labelled(filename: &str, label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => format!("{} [{}]", filename, label),
        _ => filename.to_string(),
    }
}
