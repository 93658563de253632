//! Fotobox Gallery - Lifecycle Manager
//!
//! Orchestrates the photo state machine: Active -> Trashed -> Restored
//! or Purged. Reads through [`FolderIndex`], moves files on disk, keeps
//! the trash side-table current through [`TrashStore`], and lets the
//! [`FolderJanitor`] collect folders the operation emptied.
//!
//! Every read-modify-write of the side-table runs under one mutex per
//! manager, so concurrent operations cannot silently drop each other's
//! metadata updates.

use std::fs;
use std::path::{Path, PathBuf};
use chrono::Utc;
use parking_lot::Mutex;
use serde::Serialize;

use crate::collision::{resolve_collision, resolve_restore_collision};
use crate::config::{has_extension, GalleryConfig, ACTIVE_EXTENSIONS, TRASH_EXTENSIONS};
use crate::error::{GalleryError, GalleryResult};
use crate::index::{scan_dir, FolderIndex, PhotoRecord};
use crate::janitor::FolderJanitor;
use crate::trash_store::{TrashMetadataStore, TrashStore};

/// Outcome of a single trash operation
#[derive(Debug, Clone, Serialize)]
pub struct TrashedPhoto {
    /// Name the file carries inside the trash folder
    pub trash_name: String,
    /// Date folder the file came from; `None` for root-level photos
    pub source_partition: Option<String>,
}

/// Outcome of a single restore operation
#[derive(Debug, Clone, Serialize)]
pub struct RestoredPhoto {
    /// Name the file carries after the restore
    pub restored_name: String,
    /// Date folder the file was placed in
    pub partition: String,
}

/// Counters of a batch trash operation
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct BatchReport {
    /// Files moved into trash
    pub moved: usize,
    /// Files that failed with an I/O error (batch continued)
    pub errors: usize,
    /// Files that vanished between listing and move
    pub skipped: usize,
}

/// Counters of a purge-all operation
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PurgeReport {
    /// Files permanently deleted
    pub deleted: usize,
    /// Files that failed to delete
    pub errors: usize,
    /// Whether the metadata side-table was discarded
    pub metadata_discarded: bool,
}

/// Photo lifecycle orchestrator
pub struct LifecycleManager {
    config: GalleryConfig,
    index: FolderIndex,
    store: TrashStore,
    janitor: FolderJanitor,
    /// Serializes all side-table read-modify-write cycles
    metadata_lock: Mutex<()>,
}

impl LifecycleManager {
    pub fn new(config: GalleryConfig) -> Self {
        Self {
            index: FolderIndex::new(config.clone()),
            store: TrashStore::new(config.clone()),
            janitor: FolderJanitor::new(config.clone()),
            config,
            metadata_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn index(&self) -> &FolderIndex {
        &self.index
    }

    // ═══════════════════════════════════════════════════════════════════════
    // TRASH
    // ═══════════════════════════════════════════════════════════════════════

    /// Move one photo into the trash folder.
    ///
    /// Date folders are scanned newest first and the first one containing
    /// `filename` wins; root-level legacy photos are checked last. The
    /// final trash-resident name (renamed on collision) and the source
    /// folder are returned.
    pub fn trash_one(&self, filename: &str) -> GalleryResult<TrashedPhoto> {
        validate_filename(filename, ACTIVE_EXTENSIONS)?;
        let _guard = self.metadata_lock.lock();

        let (source_path, source_partition) = self.locate_active(filename)?;

        let trash_dir = self.config.trash_dir();
        fs::create_dir_all(&trash_dir)?;

        let trash_name = resolve_collision(&trash_dir, filename);
        fs::rename(&source_path, trash_dir.join(&trash_name))?;
        log::debug!("Trashed {} as {}", filename, trash_name);

        let mut store = self.store.load();
        store.record_trashed(&trash_name, filename, source_partition.as_deref(), Utc::now());
        self.store.save(&store)?;

        if let Some(ref partition) = source_partition {
            self.janitor.sweep_partition(partition)?;
        }

        Ok(TrashedPhoto {
            trash_name,
            source_partition,
        })
    }

    /// Move every photo of one date folder into the trash.
    ///
    /// Only date-folder identifiers are accepted; the trash folder and
    /// anything outside the naming pattern are never a source. Per-file
    /// failures are counted, never fatal to the batch; the side-table is
    /// written once at the end.
    pub fn trash_folder(&self, partition_id: &str) -> GalleryResult<BatchReport> {
        if !self.config.is_partition_name(partition_id) {
            return Err(GalleryError::PartitionNotFound(partition_id.to_string()));
        }
        let dir = self.config.partition_path(partition_id);
        if !dir.is_dir() {
            return Err(GalleryError::PartitionNotFound(partition_id.to_string()));
        }

        let _guard = self.metadata_lock.lock();

        let photos = scan_dir(&dir, ACTIVE_EXTENSIONS, Some(partition_id))?;
        let trash_dir = self.config.trash_dir();
        fs::create_dir_all(&trash_dir)?;

        let mut store = self.store.load();
        let mut report = BatchReport::default();
        for photo in &photos {
            self.move_to_trash(&mut store, photo, &mut report);
        }
        self.store.save(&store)?;

        self.janitor.sweep_partition(partition_id)?;
        log::info!(
            "Trashed folder {}: {} moved, {} errors, {} skipped",
            partition_id,
            report.moved,
            report.errors,
            report.skipped
        );
        Ok(report)
    }

    /// Move every photo of every date folder, plus root-level strays,
    /// into the trash in one batch with a single side-table write.
    pub fn trash_all(&self) -> GalleryResult<BatchReport> {
        let _guard = self.metadata_lock.lock();

        let mut photos: Vec<PhotoRecord> = Vec::new();
        for partition in self.index.partition_dirs()? {
            photos.extend(scan_dir(&partition.path, ACTIVE_EXTENSIONS, Some(&partition.id))?);
        }
        if self.config.photo_root.is_dir() {
            photos.extend(scan_dir(&self.config.photo_root, ACTIVE_EXTENSIONS, None)?);
        }

        let trash_dir = self.config.trash_dir();
        fs::create_dir_all(&trash_dir)?;

        let mut store = self.store.load();
        let mut report = BatchReport::default();
        for photo in &photos {
            self.move_to_trash(&mut store, photo, &mut report);
        }
        self.store.save(&store)?;

        self.janitor.sweep_empty()?;
        log::info!(
            "Trashed all: {} moved, {} errors, {} skipped",
            report.moved,
            report.errors,
            report.skipped
        );
        Ok(report)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // RESTORE
    // ═══════════════════════════════════════════════════════════════════════

    /// Move one trashed photo back into a date folder.
    ///
    /// The side-table entry is resolved by either the trash-resident or
    /// the original name. A missing entry degrades to restoring under the
    /// given name into the current day's folder. The recorded folder is
    /// recreated when it no longer exists; an occupied slot produces a
    /// `_restored_<ts>` variant. Both side-table keys are removed.
    pub fn restore_one(&self, filename: &str) -> GalleryResult<RestoredPhoto> {
        validate_filename(filename, TRASH_EXTENSIONS)?;
        let _guard = self.metadata_lock.lock();

        let mut store = self.store.load();
        let resolved = store.lookup(filename);

        let trash_name = resolved
            .as_ref()
            .map(|r| r.trash_name.clone())
            .unwrap_or_else(|| filename.to_string());

        let trash_path = self.config.trash_dir().join(&trash_name);
        if !trash_path.is_file() {
            return Err(GalleryError::TrashEntryNotFound(filename.to_string()));
        }

        let now = Utc::now();
        let (desired_name, partition_id) = match resolved.as_ref() {
            Some(r) => (
                r.entry.original_name.clone(),
                r.entry
                    .original_folder
                    .clone()
                    .unwrap_or_else(|| self.config.partition_id_for(now)),
            ),
            None => {
                log::warn!("No restore hint for {}, using fallback folder", filename);
                (trash_name.clone(), self.config.partition_id_for(now))
            }
        };

        let target_dir = self.config.partition_path(&partition_id);
        fs::create_dir_all(&target_dir)?;

        let restored_name = resolve_restore_collision(&target_dir, &desired_name, now);
        fs::rename(&trash_path, target_dir.join(&restored_name))?;
        log::debug!("Restored {} into {}", restored_name, partition_id);

        if let Some(ref r) = resolved {
            store.remove_resolved(r);
            self.store.save(&store)?;
        }

        Ok(RestoredPhoto {
            restored_name,
            partition: partition_id,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // PURGE
    // ═══════════════════════════════════════════════════════════════════════

    /// Permanently delete one file from the trash folder.
    ///
    /// The side-table is intentionally left untouched; stale entries are
    /// tolerated by load/lookup and wiped wholesale by [`purge_all`].
    ///
    /// [`purge_all`]: LifecycleManager::purge_all
    pub fn purge_one(&self, filename: &str) -> GalleryResult<()> {
        validate_filename(filename, TRASH_EXTENSIONS)?;

        let path = self.config.trash_dir().join(filename);
        if !path.is_file() {
            return Err(GalleryError::PhotoNotFound(filename.to_string()));
        }
        fs::remove_file(&path)?;
        log::debug!("Purged {}", filename);
        Ok(())
    }

    /// Permanently delete every trashed photo and the whole side-table
    pub fn purge_all(&self) -> GalleryResult<PurgeReport> {
        let _guard = self.metadata_lock.lock();

        let trash_dir = self.config.trash_dir();
        let mut report = PurgeReport::default();

        if trash_dir.is_dir() {
            for photo in scan_dir(&trash_dir, TRASH_EXTENSIONS, None)? {
                match fs::remove_file(&photo.path) {
                    Ok(()) => report.deleted += 1,
                    Err(e) => {
                        log::warn!("Failed to purge {}: {}", photo.filename, e);
                        report.errors += 1;
                    }
                }
            }
        }

        self.store.discard()?;
        report.metadata_discarded = true;

        log::info!("Purged trash: {} deleted, {} errors", report.deleted, report.errors);
        Ok(report)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // HELPERS
    // ═══════════════════════════════════════════════════════════════════════

    /// Find an active photo by name: date folders newest first, then the
    /// photo root for legacy files
    fn locate_active(&self, filename: &str) -> GalleryResult<(PathBuf, Option<String>)> {
        for partition in self.index.partition_dirs()? {
            let candidate = partition.path.join(filename);
            if candidate.is_file() {
                return Ok((candidate, Some(partition.id)));
            }
        }

        let root_candidate = self.config.photo_root.join(filename);
        if root_candidate.is_file() {
            return Ok((root_candidate, None));
        }

        Err(GalleryError::PhotoNotFound(filename.to_string()))
    }

    /// Move one listed photo into trash, updating the in-memory store and
    /// the batch counters; I/O failures never abort the batch
    fn move_to_trash(
        &self,
        store: &mut TrashMetadataStore,
        photo: &PhotoRecord,
        report: &mut BatchReport,
    ) {
        if !photo.path.is_file() {
            report.skipped += 1;
            return;
        }

        let trash_dir = self.config.trash_dir();
        let trash_name = resolve_collision(&trash_dir, &photo.filename);
        match fs::rename(&photo.path, trash_dir.join(&trash_name)) {
            Ok(()) => {
                store.record_trashed(
                    &trash_name,
                    &photo.filename,
                    photo.partition.as_deref(),
                    Utc::now(),
                );
                report.moved += 1;
            }
            Err(e) => {
                log::warn!("Failed to trash {}: {}", photo.path.display(), e);
                report.errors += 1;
            }
        }
    }
}

/// Reject names that could escape the photo tree or are not photos.
///
/// A name must be a single plain path component, so separators and `..`
/// segments are out while odd-but-valid capture names like `a..jpg`
/// pass. The extension check keeps the side-table file itself out of
/// reach of the single-file operations.
fn validate_filename(name: &str, extensions: &[&str]) -> GalleryResult<()> {
    use std::path::Component;

    let mut components = Path::new(name).components();
    let single_normal = matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    );
    if !single_normal || name.contains('\\') {
        return Err(GalleryError::InvalidName(name.to_string()));
    }
    if !has_extension(name, extensions) {
        return Err(GalleryError::InvalidName(name.to_string()));
    }
    Ok(())
}
