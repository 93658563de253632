//! Fotobox Gallery - Folder Janitor
//!
//! Removes date folders once a trash operation has emptied them. Never
//! runs on a schedule; lifecycle operations invoke it as a post-step, so
//! an empty folder nobody just emptied stays untouched.

use std::fs;

use crate::config::{GalleryConfig, ACTIVE_EXTENSIONS};
use crate::error::GalleryResult;
use crate::index::{count_images, FolderIndex};

pub struct FolderJanitor {
    config: GalleryConfig,
}

impl FolderJanitor {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    /// Remove one date folder if it no longer holds any photo.
    ///
    /// Returns whether the folder was removed. A folder that is already
    /// gone counts as a no-op, keeping repeated sweeps idempotent. Names
    /// outside the date-folder pattern (the trash folder included) are
    /// never swept.
    pub fn sweep_partition(&self, partition_id: &str) -> GalleryResult<bool> {
        if !self.config.is_partition_name(partition_id) {
            return Ok(false);
        }
        let path = self.config.partition_path(partition_id);
        if !path.is_dir() {
            return Ok(false);
        }
        if count_images(&path, ACTIVE_EXTENSIONS)? > 0 {
            return Ok(false);
        }

        fs::remove_dir_all(&path)?;
        log::info!("Removed emptied folder {}", partition_id);
        Ok(true)
    }

    /// Sweep every date folder; returns how many were removed
    pub fn sweep_empty(&self) -> GalleryResult<usize> {
        let index = FolderIndex::new(self.config.clone());
        let mut removed = 0;
        for partition in index.partition_dirs()? {
            if self.sweep_partition(&partition.id)? {
                removed += 1;
            }
        }
        Ok(removed)
    }
}
