//! Contract against the content endpoint.
//!
//! The hosting service exposes one read/write pair per file under
//! `/a/v1/{file_id}`: `GET` returns the raw text body, `POST` overwrites it
//! with the request body. Everything else about the service (listings,
//! shares, auth) is out of scope here; this module only names the resource
//! and the ways talking to it can fail.

use std::fmt;

use thiserror::Error;

/// Path prefix of the content API.
pub const API_PREFIX: &str = "/a/v1/";

/// Opaque token naming one remote file resource.
///
/// Extracted as the final path segment of the file page address and held
/// unchanged for the app's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileId(String);

impl FileId {
    /// Accepts any non-empty single path segment.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        (!raw.is_empty() && !raw.contains('/')).then(|| Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a file page address into the server origin and the file
/// identifier (final path segment, query and fragment stripped).
#[must_use]
pub fn split_page_url(url: &str) -> Option<(String, FileId)> {
    let scheme_end = url.find("://")?;
    let after_scheme = &url[scheme_end + 3..];
    let before_query = after_scheme
        .split(['?', '#'])
        .next()
        .unwrap_or(after_scheme);

    let path_start = before_query.find('/')?;
    let origin = &url[..scheme_end + 3 + path_start];
    let last_segment = before_query[path_start..].rsplit('/').next()?;

    FileId::new(last_segment).map(|id| (origin.to_owned(), id))
}

/// Build the content URL for one file: `{origin}/a/v1/{id}`.
#[must_use]
pub fn content_url(origin: &str, id: &FileId) -> String {
    format!("{}{API_PREFIX}{id}", origin.trim_end_matches('/'))
}

/// Ways the initial read can fail. Load failures leave the editor
/// unpopulated; a blank surface must never be mistaken for file content.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("load failed: HTTP status {0}")]
    Status(u16),
    #[error("load failed: {0}")]
    Api(String),
    #[error("load failed: {0}")]
    Transport(String),
    #[error("file is not plain text (invalid UTF-8)")]
    NotText,
    #[error("file exceeds the {limit}-byte editor limit")]
    TooLarge { limit: u64 },
}

/// Ways the write can fail. None of these clear the unsaved-changes flag.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SaveError {
    #[error("save failed: HTTP status {0}")]
    Status(u16),
    #[error("save failed: {0}")]
    Api(String),
    #[error("save failed: {0}")]
    Transport(String),
}
