//! Photo blob storage
//!
//! Content-addressable storage for the capture flow's image bytes. The
//! engines never touch image data; sessions hold only the storage refs
//! returned from here.

use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::PhotoAngle;

/// Hex characters of the content hash kept in the file name
const REF_HASH_LEN: usize = 16;

/// Blob store for progress photos
///
/// `save` returns an opaque storage ref to embed in the session; `load`
/// reports a missing blob as `None` rather than an error so a session with
/// a gap still renders.
pub trait PhotoStore: Send + Sync {
    fn save(&self, image: &[u8], angle: PhotoAngle) -> Result<String>;
    fn load(&self, storage_ref: &str) -> Result<Option<Vec<u8>>>;
    fn delete(&self, storage_ref: &str) -> Result<()>;
}

/// Filesystem-backed photo store
///
/// Files are named `<hash-prefix>_<angle>.jpg` where the prefix is the
/// SHA-256 of the image bytes, so re-saving identical bytes is idempotent.
pub struct LocalPhotoStore {
    photos_dir: PathBuf,
}

impl LocalPhotoStore {
    /// Create a store rooted at `photos_dir`, creating it if needed
    pub fn new(photos_dir: impl Into<PathBuf>) -> Result<Self> {
        let photos_dir = photos_dir.into();
        if !photos_dir.exists() {
            fs::create_dir_all(&photos_dir).map_err(|e| {
                Error::Photo(format!(
                    "Failed to create photos directory {}: {}",
                    photos_dir.display(),
                    e
                ))
            })?;
            info!("Created photos directory: {}", photos_dir.display());
        }
        Ok(Self { photos_dir })
    }

    pub fn photos_dir(&self) -> &Path {
        &self.photos_dir
    }

    fn path_for(&self, storage_ref: &str) -> PathBuf {
        self.photos_dir.join(storage_ref)
    }

    fn ref_for(image: &[u8], angle: PhotoAngle) -> String {
        let digest = Sha256::digest(image);
        let hash = hex::encode(&digest[..]);
        format!("{}_{}.jpg", &hash[..REF_HASH_LEN], angle.as_str())
    }
}

impl PhotoStore for LocalPhotoStore {
    fn save(&self, image: &[u8], angle: PhotoAngle) -> Result<String> {
        let storage_ref = Self::ref_for(image, angle);
        let path = self.path_for(&storage_ref);
        fs::write(&path, image)?;
        debug!(%storage_ref, bytes = image.len(), "Saved photo");
        Ok(storage_ref)
    }

    fn load(&self, storage_ref: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(storage_ref);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(&path)?))
    }

    fn delete(&self, storage_ref: &str) -> Result<()> {
        let path = self.path_for(storage_ref);
        if !path.exists() {
            return Err(Error::NotFound(format!("Photo not found: {}", storage_ref)));
        }
        fs::remove_file(&path)?;
        debug!(storage_ref, "Deleted photo");
        Ok(())
    }
}
