//! Fotobox Gallery - Folder Index
//!
//! Read-only view over the date-partitioned photo tree. Records returned
//! here are snapshots of the directory contents, nothing is cached.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::{has_extension, GalleryConfig, ACTIVE_EXTENSIONS, TRASH_EXTENSIONS};
use crate::error::{GalleryError, GalleryResult};

/// A date folder currently present on disk
#[derive(Debug, Clone, Serialize)]
pub struct DatePartition {
    /// Folder identifier, e.g. `20250101_Photobooth`
    pub id: String,
    /// Absolute folder path
    pub path: PathBuf,
    /// Number of photos currently inside
    pub photo_count: usize,
}

/// A photo currently present on disk
#[derive(Debug, Clone, Serialize)]
pub struct PhotoRecord {
    /// File name without directory
    pub filename: String,
    /// Date folder holding the file; `None` for legacy root-level photos
    pub partition: Option<String>,
    /// Absolute file path
    pub path: PathBuf,
    /// File size in bytes
    pub size_bytes: u64,
    /// Creation timestamp (modification time when creation is unavailable)
    pub created_at: DateTime<Utc>,
}

/// Read-only index over the photo tree
pub struct FolderIndex {
    config: GalleryConfig,
}

impl FolderIndex {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Every date folder on disk, including emptied ones.
    ///
    /// Sorted by identifier descending (newest first). A missing photo
    /// root yields an empty list, not an error.
    pub fn partition_dirs(&self) -> GalleryResult<Vec<DatePartition>> {
        let root = &self.config.photo_root;
        if !root.exists() {
            return Ok(Vec::new());
        }

        let mut partitions = Vec::new();
        for entry in fs::read_dir(root)? {
            let entry = entry?;
            if !entry.path().is_dir() {
                continue;
            }
            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                continue;
            };
            if !self.config.is_partition_name(&name) {
                continue;
            }

            let path = entry.path();
            let photo_count = count_images(&path, ACTIVE_EXTENSIONS)?;
            partitions.push(DatePartition {
                id: name,
                path,
                photo_count,
            });
        }

        partitions.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(partitions)
    }

    /// Date folders holding at least one photo (the display contract)
    pub fn list_partitions(&self) -> GalleryResult<Vec<DatePartition>> {
        let mut partitions = self.partition_dirs()?;
        partitions.retain(|p| p.photo_count > 0);
        Ok(partitions)
    }

    /// Photos of one date folder, or of the whole tree.
    ///
    /// With `partition = None` the result aggregates every date folder
    /// plus legacy photos sitting directly in the photo root. Sorted by
    /// creation timestamp descending.
    pub fn list_photos(&self, partition: Option<&str>) -> GalleryResult<Vec<PhotoRecord>> {
        let mut photos = match partition {
            Some(id) => {
                // The trash folder and arbitrary paths are not partitions
                if !self.config.is_partition_name(id) {
                    return Err(GalleryError::PartitionNotFound(id.to_string()));
                }
                let dir = self.config.partition_path(id);
                if !dir.is_dir() {
                    return Err(GalleryError::PartitionNotFound(id.to_string()));
                }
                scan_dir(&dir, ACTIVE_EXTENSIONS, Some(id))?
            }
            None => {
                let mut all = Vec::new();
                for p in self.partition_dirs()? {
                    all.extend(scan_dir(&p.path, ACTIVE_EXTENSIONS, Some(&p.id))?);
                }
                if self.config.photo_root.is_dir() {
                    all.extend(scan_dir(&self.config.photo_root, ACTIVE_EXTENSIONS, None)?);
                }
                all
            }
        };

        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }

    /// Photos currently sitting in the trash folder
    pub fn list_trash(&self) -> GalleryResult<Vec<PhotoRecord>> {
        let trash = self.config.trash_dir();
        if !trash.is_dir() {
            return Ok(Vec::new());
        }
        let mut photos = scan_dir(&trash, TRASH_EXTENSIONS, None)?;
        photos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(photos)
    }
}

/// List image files of one directory, non-recursively
pub(crate) fn scan_dir(
    dir: &Path,
    extensions: &[&str],
    partition: Option<&str>,
) -> GalleryResult<Vec<PhotoRecord>> {
    let mut records = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(filename) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if !has_extension(&filename, extensions) {
            continue;
        }

        let metadata = entry.metadata()?;
        let created = metadata
            .created()
            .or_else(|_| metadata.modified())
            .unwrap_or(std::time::SystemTime::UNIX_EPOCH);

        records.push(PhotoRecord {
            filename,
            partition: partition.map(str::to_string),
            path,
            size_bytes: metadata.len(),
            created_at: DateTime::<Utc>::from(created),
        });
    }
    Ok(records)
}

/// Count image files of one directory, non-recursively
pub(crate) fn count_images(dir: &Path, extensions: &[&str]) -> GalleryResult<usize> {
    let mut count = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.path().is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if has_extension(name, extensions) {
                count += 1;
            }
        }
    }
    Ok(count)
}
