#![forbid(unsafe_code)]

//! Shared logic for `remotepad` (GUI + tests): the line-structured document
//! model, markup-safe display encoding, the edit-surface capability trait,
//! the session controller that owns the unsaved-changes flag, and the
//! content-endpoint contract.

pub mod document;
pub mod markup;
pub mod remote;
pub mod session;
pub mod surface;

/// Hard cap on file sizes we will load into the editor.
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;
