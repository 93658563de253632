//! Fotobox Gallery - Collision-Safe Naming
//!
//! One deterministic rename strategy for every move into an occupied
//! directory: an incrementing numeric suffix before the extension.

use std::path::Path;
use chrono::{DateTime, Utc};

/// Split a filename into stem and extension (extension includes no dot)
fn split_name(name: &str) -> (&str, Option<&str>) {
    let path = Path::new(name);
    let ext = path.extension().and_then(|e| e.to_str());
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name);
    (stem, ext)
}

/// Join a stem and optional extension back into a filename
fn join_name(stem: &str, ext: Option<&str>) -> String {
    match ext {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem.to_string(),
    }
}

/// Resolve a non-colliding name inside `target_dir`.
///
/// Returns `desired` unchanged when the slot is free, otherwise
/// `stem_1.ext`, `stem_2.ext`, ... until an unused name is found.
/// Pure with respect to a snapshot of the directory; a second process
/// creating the same name between check and move is an accepted race.
pub fn resolve_collision(target_dir: &Path, desired: &str) -> String {
    if !target_dir.join(desired).exists() {
        return desired.to_string();
    }

    let (stem, ext) = split_name(desired);
    let mut counter = 1u32;
    loop {
        let candidate = join_name(&format!("{stem}_{counter}"), ext);
        if !target_dir.join(&candidate).exists() {
            return candidate;
        }
        counter += 1;
    }
}

/// Resolve a restore target name inside a live date folder.
///
/// Restores must not shadow a photo captured since the original was
/// trashed, so the conflict suffix carries a timestamp instead of a bare
/// counter: `stem_restored_<unix-ts>.ext`. Deterministic for a given `now`.
pub fn resolve_restore_collision(target_dir: &Path, desired: &str, now: DateTime<Utc>) -> String {
    if !target_dir.join(desired).exists() {
        return desired.to_string();
    }

    let (stem, ext) = split_name(desired);
    let stamped = join_name(&format!("{stem}_restored_{}", now.timestamp()), ext);
    // The stamped name can itself be taken; fall back to the counter rule.
    resolve_collision(target_dir, &stamped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_free_slot_passes_through() {
        let dir = tempdir().unwrap();
        assert_eq!(resolve_collision(dir.path(), "foo.jpg"), "foo.jpg");
    }

    #[test]
    fn test_numeric_suffix_increments() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("foo.jpg"), b"a").unwrap();
        assert_eq!(resolve_collision(dir.path(), "foo.jpg"), "foo_1.jpg");

        std::fs::write(dir.path().join("foo_1.jpg"), b"b").unwrap();
        assert_eq!(resolve_collision(dir.path(), "foo.jpg"), "foo_2.jpg");
    }

    #[test]
    fn test_name_without_extension() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("foo"), b"a").unwrap();
        assert_eq!(resolve_collision(dir.path(), "foo"), "foo_1");
    }

    #[test]
    fn test_restore_suffix_carries_timestamp() {
        let dir = tempdir().unwrap();
        let now = Utc::now();

        assert_eq!(resolve_restore_collision(dir.path(), "foo.jpg", now), "foo.jpg");

        std::fs::write(dir.path().join("foo.jpg"), b"a").unwrap();
        let resolved = resolve_restore_collision(dir.path(), "foo.jpg", now);
        assert_eq!(resolved, format!("foo_restored_{}.jpg", now.timestamp()));
    }
}
