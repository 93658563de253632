//! Fotobox Gallery - Unified Public API
//!
//! Single entry point for the routing layer. Every operation returns a
//! serializable outcome with a success flag, a human-readable message
//! and operation-specific counts; no error ever escapes this surface.

use serde::Serialize;
use walkdir::WalkDir;

use crate::config::GalleryConfig;
use crate::error::GalleryError;
use crate::index::{DatePartition, PhotoRecord};
use crate::lifecycle::{BatchReport, LifecycleManager, PurgeReport};
use crate::trash_store::{TrashEntry, TrashStore};

// ═══════════════════════════════════════════════════════════════════════════════
// OUTCOME TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Structured result of a state-changing operation
#[derive(Debug, Clone, Serialize)]
pub struct OperationOutcome {
    pub success: bool,
    pub message: String,
    /// Trash-resident name after a trash operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash_name: Option<String>,
    /// Name after a restore operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restored_name: Option<String>,
    /// Date folder involved in the operation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition: Option<String>,
    /// Batch counters, present for folder/all operations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchReport>,
    /// Purge counters, present for purge-all
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purge: Option<PurgeReport>,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            trash_name: None,
            restored_name: None,
            partition: None,
            batch: None,
            purge: None,
        }
    }

    fn failed(err: &GalleryError) -> Self {
        Self {
            success: false,
            ..Self::ok(err.to_string())
        }
    }
}

/// Result of a listing operation
#[derive(Debug, Clone, Serialize)]
pub struct Listing<T> {
    pub success: bool,
    pub message: String,
    pub items: Vec<T>,
}

impl<T> Listing<T> {
    fn of(items: Vec<T>) -> Self {
        Self {
            success: true,
            message: format!("{} entries", items.len()),
            items,
        }
    }

    fn failed(err: &GalleryError) -> Self {
        Self {
            success: false,
            message: err.to_string(),
            items: Vec::new(),
        }
    }
}

/// A trashed photo joined with its restore hint, for display
#[derive(Debug, Clone, Serialize)]
pub struct TrashedListing {
    #[serde(flatten)]
    pub photo: PhotoRecord,
    /// Side-table entry, absent when no restore hint exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<TrashEntry>,
}

/// Tree-wide statistics
#[derive(Debug, Clone, Serialize)]
pub struct GalleryStats {
    pub folders: usize,
    pub active_photos: usize,
    pub trashed_photos: usize,
    /// Recursive byte total of the whole photo root
    pub total_bytes: u64,
}

// ═══════════════════════════════════════════════════════════════════════════════
// GALLERY API
// ═══════════════════════════════════════════════════════════════════════════════

/// Fotobox Gallery API
///
/// # Example
///
/// ```rust,ignore
/// use fotobox_gallery::GalleryApi;
///
/// let api = GalleryApi::new("/srv/fotobox/photos");
/// let outcome = api.trash_photo("IMG_0042.jpg");
/// assert!(outcome.success);
/// api.restore_photo(outcome.trash_name.as_deref().unwrap());
/// ```
pub struct GalleryApi {
    manager: LifecycleManager,
}

impl GalleryApi {
    pub fn new<P: AsRef<std::path::Path>>(photo_root: P) -> Self {
        Self::with_config(GalleryConfig::new(photo_root))
    }

    pub fn with_config(config: GalleryConfig) -> Self {
        Self {
            manager: LifecycleManager::new(config),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        self.manager.config()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LISTINGS
    // ═══════════════════════════════════════════════════════════════════════

    /// Date folders currently holding photos, newest first
    pub fn list_folders(&self) -> Listing<DatePartition> {
        match self.manager.index().list_partitions() {
            Ok(folders) => Listing::of(folders),
            Err(e) => Listing::failed(&e),
        }
    }

    /// Photos of one folder, or of the whole tree, newest first
    pub fn list_photos(&self, folder: Option<&str>) -> Listing<PhotoRecord> {
        match self.manager.index().list_photos(folder) {
            Ok(photos) => Listing::of(photos),
            Err(e) => Listing::failed(&e),
        }
    }

    /// Trashed photos with their restore hints, newest first
    pub fn list_trash(&self) -> Listing<TrashedListing> {
        let store = TrashStore::new(self.config().clone()).load();
        match self.manager.index().list_trash() {
            Ok(photos) => Listing::of(
                photos
                    .into_iter()
                    .map(|photo| {
                        let entry = store.get(&photo.filename).cloned();
                        TrashedListing { photo, entry }
                    })
                    .collect(),
            ),
            Err(e) => Listing::failed(&e),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // LIFECYCLE OPERATIONS
    // ═══════════════════════════════════════════════════════════════════════

    /// Soft-delete one photo into the trash folder
    pub fn trash_photo(&self, filename: &str) -> OperationOutcome {
        match self.manager.trash_one(filename) {
            Ok(trashed) => OperationOutcome {
                trash_name: Some(trashed.trash_name.clone()),
                partition: trashed.source_partition.clone(),
                ..OperationOutcome::ok(format!("Moved {} to trash", trashed.trash_name))
            },
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    /// Soft-delete every photo of one date folder
    pub fn trash_folder(&self, folder: &str) -> OperationOutcome {
        match self.manager.trash_folder(folder) {
            Ok(report) => OperationOutcome {
                partition: Some(folder.to_string()),
                batch: Some(report),
                ..OperationOutcome::ok(format!(
                    "Trashed folder {}: {} moved, {} errors",
                    folder, report.moved, report.errors
                ))
            },
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    /// Soft-delete every photo in the tree
    pub fn trash_all(&self) -> OperationOutcome {
        match self.manager.trash_all() {
            Ok(report) => OperationOutcome {
                batch: Some(report),
                ..OperationOutcome::ok(format!(
                    "Trashed all photos: {} moved, {} errors, {} skipped",
                    report.moved, report.errors, report.skipped
                ))
            },
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    /// Bring one trashed photo back into its date folder
    pub fn restore_photo(&self, filename: &str) -> OperationOutcome {
        match self.manager.restore_one(filename) {
            Ok(restored) => OperationOutcome {
                restored_name: Some(restored.restored_name.clone()),
                partition: Some(restored.partition.clone()),
                ..OperationOutcome::ok(format!(
                    "Restored {} into {}",
                    restored.restored_name, restored.partition
                ))
            },
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    /// Permanently delete one trashed photo
    pub fn purge_photo(&self, filename: &str) -> OperationOutcome {
        match self.manager.purge_one(filename) {
            Ok(()) => OperationOutcome::ok(format!("Permanently deleted {filename}")),
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    /// Permanently delete everything in the trash, metadata included
    pub fn purge_all(&self) -> OperationOutcome {
        match self.manager.purge_all() {
            Ok(report) => OperationOutcome {
                purge: Some(report),
                ..OperationOutcome::ok(format!("Emptied trash: {} deleted", report.deleted))
            },
            Err(e) => OperationOutcome::failed(&e),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // STATISTICS
    // ═══════════════════════════════════════════════════════════════════════

    /// Tree-wide counters and byte totals
    pub fn stats(&self) -> GalleryStats {
        let index = self.manager.index();
        let folders = index.list_partitions().map(|p| p.len()).unwrap_or(0);
        let active_photos = index.list_photos(None).map(|p| p.len()).unwrap_or(0);
        let trashed_photos = index.list_trash().map(|p| p.len()).unwrap_or(0);

        let total_bytes = WalkDir::new(&self.config().photo_root)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .filter_map(|entry| entry.metadata().ok())
            .map(|meta| meta.len())
            .sum();

        GalleryStats {
            folders,
            active_photos,
            trashed_photos,
            total_bytes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn put_photo(root: &std::path::Path, partition: &str, name: &str) {
        let dir = root.join(partition);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(name), name.as_bytes()).unwrap();
    }

    #[test]
    fn test_outcomes_never_panic_on_missing_targets() {
        let dir = tempdir().unwrap();
        let api = GalleryApi::new(dir.path());

        let outcome = api.trash_photo("ghost.jpg");
        assert!(!outcome.success);
        assert!(outcome.message.contains("ghost.jpg"));

        assert!(!api.restore_photo("ghost.jpg").success);
        assert!(!api.purge_photo("ghost.jpg").success);
        assert!(!api.trash_folder("20990101_Photobooth").success);
    }

    #[test]
    fn test_trash_and_restore_through_api() {
        let dir = tempdir().unwrap();
        put_photo(dir.path(), "20250101_Photobooth", "foo.jpg");

        let api = GalleryApi::new(dir.path());
        let trashed = api.trash_photo("foo.jpg");
        assert!(trashed.success);
        assert_eq!(trashed.trash_name.as_deref(), Some("foo.jpg"));

        let listing = api.list_trash();
        assert!(listing.success);
        assert_eq!(listing.items.len(), 1);
        assert!(listing.items[0].entry.is_some());

        let restored = api.restore_photo("foo.jpg");
        assert!(restored.success);
        assert_eq!(restored.partition.as_deref(), Some("20250101_Photobooth"));
    }

    #[test]
    fn test_outcome_serialization_shape() {
        let dir = tempdir().unwrap();
        put_photo(dir.path(), "20250101_Photobooth", "foo.jpg");

        let api = GalleryApi::new(dir.path());
        let json = serde_json::to_value(api.trash_all()).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["batch"]["moved"], 1);
        // Absent fields are omitted entirely
        assert!(json.get("trash_name").is_none());
    }

    #[test]
    fn test_stats_counts_tree() {
        let dir = tempdir().unwrap();
        put_photo(dir.path(), "20250101_Photobooth", "a.jpg");
        put_photo(dir.path(), "20250101_Photobooth", "b.jpg");

        let api = GalleryApi::new(dir.path());
        let stats = api.stats();
        assert_eq!(stats.folders, 1);
        assert_eq!(stats.active_photos, 2);
        assert_eq!(stats.trashed_photos, 0);
        assert!(stats.total_bytes > 0);
    }
}
