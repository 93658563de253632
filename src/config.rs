//! Fotobox Gallery - Configuration
//!
//! Paths and naming rules for the date-partitioned photo tree.

use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Extensions recognized as photos inside active date folders
pub const ACTIVE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "svg"];

/// Extensions recognized inside the trash folder (broader, for display)
pub const TRASH_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg"];

/// Name of the metadata side-table inside the trash folder
pub const METADATA_FILE_NAME: &str = ".metadata.json";

/// Gallery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Root directory holding date folders and the trash folder
    pub photo_root: PathBuf,
    /// Trash folder name (kept compatible with existing installations)
    pub trash_dir_name: String,
    /// Suffix appended to the date part of folder names
    pub partition_suffix: String,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            photo_root: PathBuf::from("./photos"),
            trash_dir_name: "papierkorb".into(),
            partition_suffix: "_Photobooth".into(),
        }
    }
}

impl GalleryConfig {
    /// Create a config rooted at the given directory
    pub fn new<P: AsRef<Path>>(photo_root: P) -> Self {
        Self {
            photo_root: photo_root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Full path of the trash folder
    pub fn trash_dir(&self) -> PathBuf {
        self.photo_root.join(&self.trash_dir_name)
    }

    /// Full path of the metadata side-table
    pub fn metadata_path(&self) -> PathBuf {
        self.trash_dir().join(METADATA_FILE_NAME)
    }

    /// Full path of a date folder by its identifier
    pub fn partition_path(&self, partition_id: &str) -> PathBuf {
        self.photo_root.join(partition_id)
    }

    /// Folder identifier for a calendar day, e.g. `20250101_Photobooth`
    pub fn partition_id_for(&self, when: DateTime<Utc>) -> String {
        format!("{}{}", when.format("%Y%m%d"), self.partition_suffix)
    }

    /// Check whether a directory name is a date folder (`YYYYMMDD` + suffix)
    pub fn is_partition_name(&self, name: &str) -> bool {
        if name == self.trash_dir_name {
            return false;
        }
        let Some(date_part) = name.strip_suffix(self.partition_suffix.as_str()) else {
            return false;
        };
        date_part.len() == 8 && date_part.bytes().all(|b| b.is_ascii_digit())
    }
}

/// Check a filename against an extension set, case-insensitively
pub fn has_extension(name: &str, extensions: &[&str]) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| *e == ext)
        })
        .unwrap_or(false)
}
