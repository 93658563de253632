//! Fotobox Gallery - Trash Metadata Store
//!
//! The side-table living at `<trash>/.metadata.json`. Maps a lookup key
//! to restore information. Dual-keyed: the primary key is the name the
//! file carries inside the trash folder; when trashing forced a rename,
//! a second entry keyed by the original name points at the primary via
//! `actualTrashName`, so a restore request using either name succeeds.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::GalleryConfig;
use crate::error::GalleryResult;

/// Restore information for one trashed photo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashEntry {
    /// Name the photo had before it was trashed
    pub original_name: String,
    /// Date folder the photo came from; `None` for root-level photos
    pub original_folder: Option<String>,
    /// When the photo was trashed
    pub deleted_at: DateTime<Utc>,
    /// Set on alias entries only: the name the file actually carries in trash
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_trash_name: Option<String>,
}

/// A lookup result carrying everything needed to restore and clean up
#[derive(Debug, Clone)]
pub struct ResolvedEntry {
    /// Name of the physical file inside the trash folder
    pub trash_name: String,
    /// Canonical restore information
    pub entry: TrashEntry,
}

/// In-memory image of the side-table
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrashMetadataStore {
    entries: BTreeMap<String, TrashEntry>,
}

impl TrashMetadataStore {
    /// Record a trashed photo under its trash-resident name.
    ///
    /// When the trash name differs from the original (collision rename),
    /// an alias entry keyed by the original name is inserted as well.
    /// The alias never displaces an existing entry: if another trashed
    /// photo already owns that key, both remain independently resolvable.
    pub fn record_trashed(
        &mut self,
        trash_name: &str,
        original_name: &str,
        original_folder: Option<&str>,
        deleted_at: DateTime<Utc>,
    ) {
        self.entries.insert(
            trash_name.to_string(),
            TrashEntry {
                original_name: original_name.to_string(),
                original_folder: original_folder.map(str::to_string),
                deleted_at,
                actual_trash_name: None,
            },
        );

        if trash_name != original_name {
            self.entries
                .entry(original_name.to_string())
                .or_insert_with(|| TrashEntry {
                    original_name: original_name.to_string(),
                    original_folder: original_folder.map(str::to_string),
                    deleted_at,
                    actual_trash_name: Some(trash_name.to_string()),
                });
        }
    }

    /// Resolve an entry by trash-resident name or original name.
    ///
    /// Exact key match first; otherwise a linear scan for any entry whose
    /// `originalName` equals the key. `None` means no restore hint is
    /// available, which callers treat as degraded, not as an error.
    pub fn lookup(&self, key: &str) -> Option<ResolvedEntry> {
        let hit = self
            .entries
            .get(key)
            .map(|entry| (key, entry))
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(_, entry)| entry.original_name == key)
                    .map(|(k, entry)| (k.as_str(), entry))
            })?;

        let (found_key, found) = hit;
        let trash_name = found
            .actual_trash_name
            .clone()
            .unwrap_or_else(|| found_key.to_string());

        // Prefer the primary entry for restore info; the alias mirrors it.
        let entry = self
            .entries
            .get(&trash_name)
            .cloned()
            .unwrap_or_else(|| found.clone());

        Some(ResolvedEntry { trash_name, entry })
    }

    /// Remove both the primary entry and, when present, its alias.
    ///
    /// The original-name key is only removed when it really aliases this
    /// file; it may belong to a different trashed photo of the same name.
    pub fn remove_resolved(&mut self, resolved: &ResolvedEntry) {
        self.entries.remove(&resolved.trash_name);
        if resolved.entry.original_name != resolved.trash_name {
            let is_alias_of_this = self
                .entries
                .get(&resolved.entry.original_name)
                .map(|e| e.actual_trash_name.as_deref() == Some(resolved.trash_name.as_str()))
                .unwrap_or(false);
            if is_alias_of_this {
                self.entries.remove(&resolved.entry.original_name);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TrashEntry)> {
        self.entries.iter()
    }

    pub fn get(&self, key: &str) -> Option<&TrashEntry> {
        self.entries.get(key)
    }
}

/// Persistence handler for the side-table
pub struct TrashStore {
    config: GalleryConfig,
}

impl TrashStore {
    pub fn new(config: GalleryConfig) -> Self {
        Self { config }
    }

    /// Load the side-table.
    ///
    /// A missing or unparsable file yields an empty store with a warning;
    /// restore then degrades to the fallback folder, it never fails here.
    pub fn load(&self) -> TrashMetadataStore {
        let path = self.config.metadata_path();
        if !path.exists() {
            return TrashMetadataStore::default();
        }

        match fs::read(&path) {
            Ok(data) => match serde_json::from_slice(&data) {
                Ok(store) => store,
                Err(e) => {
                    log::warn!("Trash metadata unparsable, starting empty: {}", e);
                    TrashMetadataStore::default()
                }
            },
            Err(e) => {
                log::warn!("Trash metadata unreadable, starting empty: {}", e);
                TrashMetadataStore::default()
            }
        }
    }

    /// Replace the side-table on disk.
    ///
    /// Writes a temp file next to the target and renames over it, so a
    /// crash mid-save never leaves a half-written table behind.
    pub fn save(&self, store: &TrashMetadataStore) -> GalleryResult<()> {
        let path = self.config.metadata_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = serde_json::to_vec_pretty(store)?;
        let temp_path = path.with_extension("json.tmp");

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        file.write_all(&data)?;
        file.sync_all()?;

        fs::rename(&temp_path, &path)?;
        Ok(())
    }

    /// Delete the side-table file, if present
    pub fn discard(&self) -> GalleryResult<()> {
        let path = self.config.metadata_path();
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_at(root: &std::path::Path) -> TrashStore {
        TrashStore::new(GalleryConfig::new(root))
    }

    #[test]
    fn test_record_without_rename_has_no_alias() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("foo.jpg", "foo.jpg", Some("20250101_Photobooth"), Utc::now());

        assert_eq!(store.len(), 1);
        assert!(store.get("foo.jpg").unwrap().actual_trash_name.is_none());
    }

    #[test]
    fn test_record_with_rename_inserts_alias() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("foo_1.jpg", "foo.jpg", Some("20250101_Photobooth"), Utc::now());

        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("foo.jpg").unwrap().actual_trash_name.as_deref(),
            Some("foo_1.jpg")
        );
        assert!(store.get("foo_1.jpg").unwrap().actual_trash_name.is_none());
    }

    #[test]
    fn test_lookup_by_either_key_resolves_same_file() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("foo_1.jpg", "foo.jpg", None, Utc::now());

        let by_trash = store.lookup("foo_1.jpg").unwrap();
        let by_original = store.lookup("foo.jpg").unwrap();

        assert_eq!(by_trash.trash_name, "foo_1.jpg");
        assert_eq!(by_original.trash_name, "foo_1.jpg");
        assert_eq!(by_trash.entry.original_name, "foo.jpg");
        assert_eq!(by_original.entry.original_name, "foo.jpg");
    }

    #[test]
    fn test_remove_resolved_drops_alias_too() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("foo_1.jpg", "foo.jpg", None, Utc::now());

        let resolved = store.lookup("foo.jpg").unwrap();
        store.remove_resolved(&resolved);

        assert!(store.is_empty());
    }

    #[test]
    fn test_alias_never_displaces_existing_entry() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("foo.jpg", "foo.jpg", Some("20250102_Photobooth"), Utc::now());
        store.record_trashed("foo_1.jpg", "foo.jpg", Some("20250101_Photobooth"), Utc::now());

        // Both photos keep their own folder
        assert_eq!(
            store.get("foo.jpg").unwrap().original_folder.as_deref(),
            Some("20250102_Photobooth")
        );
        assert_eq!(
            store.get("foo_1.jpg").unwrap().original_folder.as_deref(),
            Some("20250101_Photobooth")
        );

        // Removing the renamed one must not take the other's entry with it
        let resolved = store.lookup("foo_1.jpg").unwrap();
        store.remove_resolved(&resolved);
        assert!(store.get("foo.jpg").is_some());
    }

    #[test]
    fn test_lookup_unknown_key_is_none() {
        let store = TrashMetadataStore::default();
        assert!(store.lookup("nope.jpg").is_none());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        assert!(store_at(dir.path()).load().is_empty());
    }

    #[test]
    fn test_load_corrupt_file_is_empty() {
        let dir = tempdir().unwrap();
        let trash = store_at(dir.path());
        std::fs::create_dir_all(dir.path().join("papierkorb")).unwrap();
        std::fs::write(dir.path().join("papierkorb/.metadata.json"), b"{ nope").unwrap();

        assert!(trash.load().is_empty());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let persistence = store_at(dir.path());

        let mut store = TrashMetadataStore::default();
        store.record_trashed("a_1.jpg", "a.jpg", Some("20250101_Photobooth"), Utc::now());
        persistence.save(&store).unwrap();

        let loaded = persistence.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get("a.jpg").unwrap().actual_trash_name.as_deref(),
            Some("a_1.jpg")
        );
    }

    #[test]
    fn test_on_disk_shape_is_camel_case() {
        let mut store = TrashMetadataStore::default();
        store.record_trashed("a.jpg", "a.jpg", Some("20250101_Photobooth"), Utc::now());

        let json = serde_json::to_string(&store).unwrap();
        assert!(json.contains("\"originalName\""));
        assert!(json.contains("\"originalFolder\""));
        assert!(json.contains("\"deletedAt\""));
        // No alias on a non-renamed entry
        assert!(!json.contains("actualTrashName"));
    }

    #[test]
    fn test_discard_removes_file() {
        let dir = tempdir().unwrap();
        let persistence = store_at(dir.path());
        persistence.save(&TrashMetadataStore::default()).unwrap();
        assert!(dir.path().join("papierkorb/.metadata.json").exists());

        persistence.discard().unwrap();
        assert!(!dir.path().join("papierkorb/.metadata.json").exists());
    }
}
