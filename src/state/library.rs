use serde::Deserialize;
use serde_json::{Map, Value};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::data::{DerivativeImage, DocumentFile, MediaItem, Role};

/// Environment variable that overrides the default dump location
pub const DUMP_ENV_VAR: &str = "DERIVATIVE_AUDIT_DUMP";

/// Query alias the diagnostic queries use for the record list
pub const DEFAULT_ALIAS: &str = "all_media_items";

const DUMP_FILE_NAME: &str = "rca-test.json";

/// Errors raised while turning a cached query response into a Library
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed query response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("query response carries errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The document parsed but does not have the required shape
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

pub type LibraryResult<T> = Result<T, LibraryError>;

// Wire shapes. Everything optional here; presence rules are applied in
// `into_item` so the rest of the crate only sees the validated model.

#[derive(Debug, Deserialize)]
struct QueryResponse {
    data: Option<Map<String, Value>>,
    errors: Option<Vec<QueryError>>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawMediaItem {
    pid: Option<Value>,
    id: Option<Value>,
    title: Option<String>,
    jpg_derivatives: Option<Vec<RawFile>>,
    pdf_files: Option<Vec<RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    role: Option<String>,
    filename: Option<String>,
    label: Option<String>,
    url: Option<String>,
    signed_url: Option<String>,
    asset_id: Option<Value>,
    #[serde(rename = "assetId")]
    asset_id_camel: Option<Value>,
}

impl RawFile {
    fn best_url(&self) -> Option<String> {
        self.signed_url.clone().or_else(|| self.url.clone())
    }

    /// `asset_id` wins over `assetId`; the archive has used both spellings
    fn asset_id(&self) -> Option<String> {
        self.asset_id
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| self.asset_id_camel.as_ref().and_then(scalar_to_string))
    }

    fn into_image(self) -> DerivativeImage {
        let url = self.best_url();
        let asset_id = self.asset_id();
        DerivativeImage {
            filename: self.filename.unwrap_or_default(),
            role: Role::from_tag(self.role.as_deref()),
            label: self.label,
            url,
            asset_id,
        }
    }

    fn into_document(self) -> DocumentFile {
        let url = self.best_url();
        let asset_id = self.asset_id();
        DocumentFile {
            filename: self.filename.unwrap_or_default(),
            label: self.label,
            url,
            asset_id,
        }
    }
}

/// Identifiers come back as strings or numbers depending on the field
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl RawMediaItem {
    fn into_item(self, index: usize) -> LibraryResult<MediaItem> {
        let id = self
            .pid
            .as_ref()
            .and_then(scalar_to_string)
            .or_else(|| self.id.as_ref().and_then(scalar_to_string))
            .ok_or_else(|| {
                LibraryError::InvalidInput(format!(
                    "attached_media[{}] has neither a pid nor an id",
                    index
                ))
            })?;

        Ok(MediaItem {
            id,
            title: self.title,
            derivative_images: self
                .jpg_derivatives
                .unwrap_or_default()
                .into_iter()
                .map(RawFile::into_image)
                .collect(),
            documents: self
                .pdf_files
                .unwrap_or_default()
                .into_iter()
                .map(RawFile::into_document)
                .collect(),
        })
    }
}

/// The Library holds the media items of one cached query response.
/// It is read-only once loaded.
pub struct Library {
    items: Vec<MediaItem>,
    source: Option<PathBuf>,
}

impl Library {
    /// Load a cached query response from disk.
    pub fn open(path: &Path) -> LibraryResult<Self> {
        debug!(path = %path.display(), "reading query dump");

        let text = std::fs::read_to_string(path).map_err(|source| LibraryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut library = Self::from_json_str(&text)?;
        library.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            items = library.len(),
            "loaded query dump"
        );
        Ok(library)
    }

    /// Parse a query response that is already in memory.
    pub fn from_json_str(text: &str) -> LibraryResult<Self> {
        let response: QueryResponse = serde_json::from_str(text)?;

        if let Some(errors) = response.errors.filter(|e| !e.is_empty()) {
            let messages = errors
                .into_iter()
                .map(|e| e.message.unwrap_or_else(|| "unknown error".to_string()))
                .collect();
            return Err(LibraryError::GraphQl(messages));
        }

        let data = response
            .data
            .ok_or_else(|| LibraryError::InvalidInput("response has no data object".to_string()))?;

        let attached = find_attached_media(&data)?;
        let raw_items: Vec<RawMediaItem> = serde_json::from_value(attached.clone())?;

        let items = raw_items
            .into_iter()
            .enumerate()
            .map(|(index, raw)| raw.into_item(index))
            .collect::<LibraryResult<Vec<_>>>()?;

        Ok(Library { items, source: None })
    }

    /// Build a Library straight from already-mapped items
    pub fn from_items(items: Vec<MediaItem>) -> Self {
        Library { items, source: None }
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<&MediaItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Path the library was loaded from, if it came from disk
    pub fn path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Locate the `attached_media` array under `data`.
///
/// Prefers the `all_media_items` alias and otherwise takes the first
/// object that carries `attached_media`.
fn find_attached_media(data: &Map<String, Value>) -> LibraryResult<&Value> {
    let container = match data.get(DEFAULT_ALIAS) {
        Some(value) => value,
        None => {
            let found = data
                .iter()
                .find(|(_, v)| v.get("attached_media").is_some());
            match found {
                Some((alias, value)) => {
                    warn!(alias = %alias, "no {} alias, using {}", DEFAULT_ALIAS, alias);
                    value
                }
                None => {
                    return Err(LibraryError::InvalidInput(
                        "no record with attached_media under data".to_string(),
                    ))
                }
            }
        }
    };

    match container.get("attached_media") {
        Some(list) if list.is_array() => Ok(list),
        Some(_) => Err(LibraryError::InvalidInput(
            "attached_media is not an array".to_string(),
        )),
        None => Err(LibraryError::InvalidInput(format!(
            "{} has no attached_media",
            DEFAULT_ALIAS
        ))),
    }
}

/// Get the path where the cached query dump is expected.
///
/// Order: `$DERIVATIVE_AUDIT_DUMP`, then
/// - Linux: ~/.cache/derivative-audit/rca-test.json
/// - macOS: ~/Library/Caches/derivative-audit/rca-test.json
/// - Windows: %LOCALAPPDATA%\derivative-audit\rca-test.json
///
/// and finally the system temp directory.
pub fn default_dump_path() -> PathBuf {
    dump_path_from(std::env::var_os(DUMP_ENV_VAR), dirs::cache_dir())
}

fn dump_path_from(env_override: Option<OsString>, cache_dir: Option<PathBuf>) -> PathBuf {
    if let Some(path) = env_override.filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }

    match cache_dir {
        Some(mut path) => {
            path.push("derivative-audit");
            path.push(DUMP_FILE_NAME);
            path
        }
        None => std::env::temp_dir().join(DUMP_FILE_NAME),
    }
}

// Implement Debug without dumping every item
impl std::fmt::Debug for Library {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Library")
            .field("source", &self.source)
            .field("items", &self.items.len())
            .finish()
    }
}
