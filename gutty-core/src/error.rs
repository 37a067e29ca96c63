use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Upload rejected: {0}")]
    UploadRejected(UploadRejection),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons an image upload is refused before anything touches disk.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadRejection {
    #[error("no file provided")]
    MissingFile,

    #[error("no file selected")]
    EmptyFilename,

    #[error("uploaded file is empty")]
    EmptyFile,

    #[error("file type not allowed: {0}")]
    DisallowedExtension(String),
}

impl From<UploadRejection> for CatalogError {
    fn from(rejection: UploadRejection) -> Self {
        CatalogError::UploadRejected(rejection)
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
