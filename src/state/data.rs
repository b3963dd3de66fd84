//! Shared data structures for one query snapshot
//!
//! These structs represent the data model that flows between
//! the snapshot loader and the matcher. They are built once at the
//! loading boundary and never mutated afterwards.

use std::fmt;

/// Wire tag for display-quality JPEG derivatives
pub const ROLE_DISPLAY: &str = "jpg_display";
/// Wire tag for thumbnail JPEG derivatives
pub const ROLE_THUMBNAIL: &str = "jpg_thumb";

/// Classification tag on a derivative image
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Role {
    /// Display-quality image shown on its own
    Display,
    /// Small preview, usually standing in for a document
    Thumbnail,
    /// Any other tag, kept verbatim (empty when the record had none)
    Other(String),
}

impl Role {
    /// Parse a role tag as it appears in the archive response.
    ///
    /// The short forms `display` and `thumbnail` are accepted too.
    pub fn from_tag(tag: Option<&str>) -> Self {
        match tag {
            Some(ROLE_DISPLAY) | Some("display") => Role::Display,
            Some(ROLE_THUMBNAIL) | Some("thumbnail") => Role::Thumbnail,
            Some(other) => Role::Other(other.to_string()),
            None => Role::Other(String::new()),
        }
    }

    pub fn is_display(&self) -> bool {
        matches!(self, Role::Display)
    }

    pub fn is_thumbnail(&self) -> bool {
        matches!(self, Role::Thumbnail)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Display => f.write_str(ROLE_DISPLAY),
            Role::Thumbnail => f.write_str(ROLE_THUMBNAIL),
            Role::Other(tag) if tag.is_empty() => f.write_str("<none>"),
            Role::Other(tag) => f.write_str(tag),
        }
    }
}

/// A generated image file attached to a media item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeImage {
    /// Filename only (e.g., "abc123__jpg_thumb__0001.jpg")
    pub filename: String,
    pub role: Role,
    /// Human label from the archive, if any
    pub label: Option<String>,
    /// Signed URL when present, otherwise the plain URL
    pub url: Option<String>,
    /// Archive asset this file was derived from, if the response carries it
    pub asset_id: Option<String>,
}

impl DerivativeImage {
    pub fn new(filename: impl Into<String>, role: Role) -> Self {
        Self {
            filename: filename.into(),
            role,
            label: None,
            url: None,
            asset_id: None,
        }
    }
}

/// A companion document (PDF) attached to a media item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFile {
    /// Filename only (e.g., "abc123__orig.pdf")
    pub filename: String,
    pub label: Option<String>,
    pub url: Option<String>,
    pub asset_id: Option<String>,
}

impl DocumentFile {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            label: None,
            url: None,
            asset_id: None,
        }
    }
}

/// Which kinds of files a media item carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    Empty,
    ImagesOnly,
    DocumentsOnly,
    Both,
}

/// Represents a single attached media record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem {
    /// Stable archive identifier (the record PID)
    pub id: String,
    pub title: Option<String>,
    /// Derivative images in response order
    pub derivative_images: Vec<DerivativeImage>,
    /// Documents in response order
    pub documents: Vec<DocumentFile>,
}

impl MediaItem {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            derivative_images: Vec::new(),
            documents: Vec::new(),
        }
    }

    /// Title when it is set and non-empty, otherwise the id
    pub fn display_name(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.id,
        }
    }

    pub fn composition(&self) -> Composition {
        match (self.derivative_images.is_empty(), self.documents.is_empty()) {
            (true, true) => Composition::Empty,
            (false, true) => Composition::ImagesOnly,
            (true, false) => Composition::DocumentsOnly,
            (false, false) => Composition::Both,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_wire_tags() {
        assert_eq!(Role::from_tag(Some("jpg_display")), Role::Display);
        assert_eq!(Role::from_tag(Some("jpg_thumb")), Role::Thumbnail);
        assert_eq!(Role::from_tag(Some("thumbnail")), Role::Thumbnail);
        assert_eq!(Role::from_tag(Some("display")), Role::Display);
    }

    #[test]
    fn test_unknown_and_missing_roles_are_preserved() {
        let tiff = Role::from_tag(Some("tiff_master"));
        assert_eq!(tiff, Role::Other("tiff_master".to_string()));
        assert!(!tiff.is_display() && !tiff.is_thumbnail());
        assert_eq!(tiff.to_string(), "tiff_master");

        let missing = Role::from_tag(None);
        assert!(!missing.is_display() && !missing.is_thumbnail());
        assert_eq!(missing.to_string(), "<none>");
    }

    #[test]
    fn test_display_name_falls_back_to_id() {
        let mut item = MediaItem::new("880612075513");
        assert_eq!(item.display_name(), "880612075513");

        item.title = Some(String::new());
        assert_eq!(item.display_name(), "880612075513");

        item.title = Some("RCA Prospectus 1965".to_string());
        assert_eq!(item.display_name(), "RCA Prospectus 1965");
    }

    #[test]
    fn test_composition() {
        let mut item = MediaItem::new("a");
        assert_eq!(item.composition(), Composition::Empty);

        item.documents.push(DocumentFile::new("a__orig.pdf"));
        assert_eq!(item.composition(), Composition::DocumentsOnly);

        item.derivative_images
            .push(DerivativeImage::new("a__t.jpg", Role::Thumbnail));
        assert_eq!(item.composition(), Composition::Both);

        item.documents.clear();
        assert_eq!(item.composition(), Composition::ImagesOnly);
    }
}
