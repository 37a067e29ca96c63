//! Per-record image uploads.
//!
//! Each record owns one folder, `item_{id}`, under the configured root.
//! Folders are append-only: files are added under fresh time-ordered names
//! and never rewritten.

pub mod store;
pub mod validation;

pub use store::{AssetFile, AssetStore, StoredAsset};
pub use validation::{
    ALLOWED_EXTENSIONS, allowed_extension, content_type_for_extension,
    validate_magic_bytes,
};
