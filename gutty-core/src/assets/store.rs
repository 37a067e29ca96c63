use std::{
    io::{self, SeekFrom},
    path::{Path, PathBuf},
    time::SystemTime,
};

use serde::{Deserialize, Serialize};
use tokio::{
    fs::{self, File, OpenOptions},
    io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt},
};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::validation::{
    allowed_extension, content_type_for_extension, is_servable_name,
    validate_magic_bytes,
};
use crate::{
    api_routes,
    domain::RecordId,
    error::{CatalogError, Result, UploadRejection},
};

const FOLDER_PREFIX: &str = "item_";

/// A stored image and the public URL it is served under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredAsset {
    #[serde(skip)]
    pub record_id: RecordId,
    pub filename: String,
    pub url: String,
}

/// An opened stored image, positioned at its first byte.
#[derive(Debug)]
pub struct AssetFile {
    pub file: File,
    pub len: u64,
    pub modified: SystemTime,
    pub content_type: &'static str,
}

/// Filesystem-backed image store rooted at one directory.
#[derive(Debug, Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn folder_name(id: RecordId) -> String {
        format!("{FOLDER_PREFIX}{id}")
    }

    /// Record id encoded in a folder name, if it has the `item_{id}` shape.
    pub fn record_for_folder(folder: &str) -> Option<RecordId> {
        let digits = folder.strip_prefix(FOLDER_PREFIX)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse().ok()
    }

    pub fn folder_for(&self, id: RecordId) -> PathBuf {
        self.root.join(Self::folder_name(id))
    }

    pub fn url_for(id: RecordId, filename: &str) -> String {
        format!(
            "{}/{}/{}",
            api_routes::uploads::ROOT,
            Self::folder_name(id),
            filename
        )
    }

    /// Validate and persist one upload under a fresh name.
    ///
    /// Bytes land in a hidden `.part` sibling first and are renamed into
    /// place, so listings and readers never observe a partial file.
    pub async fn save(
        &self,
        id: RecordId,
        original_filename: &str,
        bytes: &[u8],
    ) -> Result<StoredAsset> {
        let extension = allowed_extension(original_filename)?;
        if bytes.is_empty() {
            return Err(UploadRejection::EmptyFile.into());
        }

        let folder = self.folder_for(id);
        fs::create_dir_all(&folder).await?;

        let filename = format!("{}.{}", Uuid::now_v7(), extension);
        let staging = folder.join(format!(".{filename}.part"));
        let target = folder.join(&filename);

        if let Err(err) = write_new(&staging, bytes).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }
        if let Err(err) = fs::rename(&staging, &target).await {
            let _ = fs::remove_file(&staging).await;
            return Err(err.into());
        }

        info!(
            record_id = id,
            filename = %filename,
            bytes = bytes.len(),
            "stored upload"
        );

        Ok(StoredAsset {
            record_id: id,
            url: Self::url_for(id, &filename),
            filename,
        })
    }

    /// Stored images for a record in upload order. A record that never
    /// received an upload has none.
    pub async fn list(&self, id: RecordId) -> Result<Vec<StoredAsset>> {
        let folder = self.folder_for(id);
        let mut entries = match fs::read_dir(&folder).await {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) if is_servable_name(&name) => names.push(name),
                Ok(_) => {}
                Err(raw) => {
                    warn!(record_id = id, name = ?raw, "skipping non-UTF-8 upload name");
                }
            }
        }
        names.sort();

        Ok(names
            .into_iter()
            .map(|filename| StoredAsset {
                record_id: id,
                url: Self::url_for(id, &filename),
                filename,
            })
            .collect())
    }

    /// Open a stored image for serving. Anything that is not a plain file
    /// the store could have written reports as not found.
    pub async fn open(&self, id: RecordId, filename: &str) -> Result<AssetFile> {
        if !is_servable_name(filename) {
            debug!(record_id = id, filename, "refusing unservable upload name");
            return Err(not_found(id, filename));
        }

        let path = self.folder_for(id).join(filename);
        let meta = match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => meta,
            Ok(_) => return Err(not_found(id, filename)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(not_found(id, filename));
            }
            Err(err) => return Err(err.into()),
        };

        let mut file = File::open(&path).await?;
        let mut head = [0u8; 16];
        let read = file.read(&mut head).await?;
        file.seek(SeekFrom::Start(0)).await?;

        let content_type = validate_magic_bytes(&head[..read]).unwrap_or_else(|_| {
            let extension = Path::new(filename)
                .extension()
                .and_then(|ext| ext.to_str())
                .unwrap_or_default();
            content_type_for_extension(extension)
        });

        Ok(AssetFile {
            file,
            len: meta.len(),
            modified: meta.modified().unwrap_or_else(|_| SystemTime::now()),
            content_type,
        })
    }
}

async fn write_new(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await?;
    file.write_all(bytes).await?;
    file.sync_all().await?;
    Ok(())
}

fn not_found(id: RecordId, filename: &str) -> CatalogError {
    CatalogError::NotFound(format!(
        "image `{filename}` not found for record {id}"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_names_round_trip_record_ids() {
        assert_eq!(AssetStore::folder_name(12), "item_12");
        assert_eq!(AssetStore::record_for_folder("item_12"), Some(12));
        assert_eq!(AssetStore::record_for_folder("item_"), None);
        assert_eq!(AssetStore::record_for_folder("item_-3"), None);
        assert_eq!(AssetStore::record_for_folder("item_1a"), None);
        assert_eq!(AssetStore::record_for_folder("photos"), None);
    }

    #[test]
    fn urls_live_under_upload_root() {
        assert_eq!(
            AssetStore::url_for(7, "abc.png"),
            "/uploads/item_7/abc.png"
        );
    }

    #[tokio::test]
    async fn listing_skips_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::new(dir.path());
        let folder = store.folder_for(3);
        std::fs::create_dir_all(&folder).unwrap();
        std::fs::write(folder.join(".pending.png.part"), b"partial").unwrap();
        std::fs::write(folder.join("notes.txt"), b"text").unwrap();
        std::fs::write(folder.join("a.png"), b"png").unwrap();

        let listed = store.list(3).await.unwrap();
        let names: Vec<_> = listed.iter().map(|a| a.filename.as_str()).collect();
        assert_eq!(names, vec!["a.png"]);
    }
}
