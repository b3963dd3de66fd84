use crate::state::data::{Composition, MediaItem};

/// Aggregate tallies over a set of media items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Counts {
    pub item_count: usize,
    pub total_display: usize,
    pub total_thumbnail: usize,
    pub total_documents: usize,
    /// Every derivative image, whatever its role
    pub total_images: usize,
    /// Items with derivative images but no documents
    pub images_only_items: usize,
    /// Items with documents but no derivative images
    pub documents_only_items: usize,
    /// Items with both
    pub both_items: usize,
}

impl Counts {
    /// Images whose role is neither display nor thumbnail
    pub fn unclassified_images(&self) -> usize {
        self.total_images
            .saturating_sub(self.total_display)
            .saturating_sub(self.total_thumbnail)
    }
}

/// Tally display images, thumbnails and documents across `items`.
///
/// Images with any other role only show up in `total_images`.
pub fn classify_counts(items: &[MediaItem]) -> Counts {
    let mut counts = Counts {
        item_count: items.len(),
        ..Counts::default()
    };

    for item in items {
        for image in &item.derivative_images {
            if image.role.is_display() {
                counts.total_display += 1;
            } else if image.role.is_thumbnail() {
                counts.total_thumbnail += 1;
            }
        }
        counts.total_images += item.derivative_images.len();
        counts.total_documents += item.documents.len();

        match item.composition() {
            Composition::ImagesOnly => counts.images_only_items += 1,
            Composition::DocumentsOnly => counts.documents_only_items += 1,
            Composition::Both => counts.both_items += 1,
            Composition::Empty => {}
        }
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{DerivativeImage, DocumentFile, Role};

    fn item(id: &str, roles: &[Role], documents: usize) -> MediaItem {
        let mut item = MediaItem::new(id);
        item.derivative_images = roles
            .iter()
            .enumerate()
            .map(|(i, role)| DerivativeImage::new(format!("{}__{}.jpg", id, i), role.clone()))
            .collect();
        item.documents = (0..documents)
            .map(|i| DocumentFile::new(format!("{}__{}.pdf", id, i)))
            .collect();
        item
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let counts = classify_counts(&[]);
        assert_eq!(counts, Counts::default());
        assert_eq!(counts.item_count, 0);
        assert_eq!(counts.total_display, 0);
        assert_eq!(counts.total_thumbnail, 0);
        assert_eq!(counts.total_documents, 0);
    }

    #[test]
    fn test_counts_across_items() {
        let items = vec![
            item("a", &[Role::Display, Role::Thumbnail, Role::Thumbnail], 2),
            item("b", &[Role::Thumbnail], 0),
            item("c", &[], 3),
            item("d", &[], 0),
        ];

        let counts = classify_counts(&items);
        assert_eq!(counts.item_count, 4);
        assert_eq!(counts.total_display, 1);
        assert_eq!(counts.total_thumbnail, 3);
        assert_eq!(counts.total_documents, 5);
        assert_eq!(counts.both_items, 1);
        assert_eq!(counts.images_only_items, 1);
        assert_eq!(counts.documents_only_items, 1);
        assert_eq!(counts.unclassified_images(), 0);
    }

    #[test]
    fn test_unknown_roles_are_not_tallied() {
        let items = vec![item(
            "a",
            &[
                Role::Other("tiff_master".to_string()),
                Role::Other(String::new()),
                Role::Display,
            ],
            0,
        )];

        let counts = classify_counts(&items);
        assert_eq!(counts.total_display, 1);
        assert_eq!(counts.total_thumbnail, 0);
        assert_eq!(counts.total_images, 3);
        assert_eq!(counts.unclassified_images(), 2);
        assert!(counts.total_display + counts.total_thumbnail <= counts.total_images);
    }

    #[test]
    fn test_hand_built_counts_do_not_underflow() {
        let counts = Counts {
            total_display: 1,
            ..Counts::default()
        };
        assert_eq!(counts.unclassified_images(), 0);
    }

    #[test]
    fn test_classify_is_idempotent() {
        let items = vec![
            item("a", &[Role::Display, Role::Thumbnail], 1),
            item("b", &[Role::Other("x".to_string())], 4),
        ];
        assert_eq!(classify_counts(&items), classify_counts(&items));
    }
}
