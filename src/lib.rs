//! # Fotobox Gallery
//!
//! Lifecycle management for photobooth photos stored in date-partitioned
//! directories: soft-delete into a trash folder with restore metadata,
//! bulk operations over whole folders, permanent purge and cleanup of
//! emptied date folders.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     GALLERY API                          │
//! │        structured outcomes for the routing layer         │
//! └───────────────────────────┬──────────────────────────────┘
//!                             │
//! ┌───────────────────────────┴──────────────────────────────┐
//! │                  LIFECYCLE MANAGER                       │
//! │     trash-one / trash-folder / trash-all / restore       │
//! │              purge-one / purge-all                       │
//! └───┬───────────────┬───────────────┬──────────────┬───────┘
//!     │               │               │              │
//! ┌───┴────────┐ ┌────┴───────┐ ┌─────┴──────┐ ┌─────┴──────┐
//! │ FOLDER     │ │ TRASH      │ │ COLLISION  │ │ FOLDER     │
//! │ INDEX      │ │ STORE      │ │ RESOLVER   │ │ JANITOR    │
//! └────────────┘ └────────────┘ └────────────┘ └────────────┘
//! ```
//!
//! ## Storage Model
//!
//! - `<root>/<YYYYMMDD>_Photobooth/` — active photos of one calendar day,
//!   created lazily by the capture process
//! - `<root>/papierkorb/` — trashed photos, possibly renamed on collision
//! - `<root>/papierkorb/.metadata.json` — dual-keyed restore side-table
//!
//! All side-table read-modify-write cycles are serialized through one
//! mutex per [`LifecycleManager`]; emptied date folders are removed only
//! as a post-step of trash operations, never proactively.

pub mod api;
pub mod collision;
pub mod config;
pub mod error;
pub mod index;
pub mod janitor;
pub mod lifecycle;
pub mod trash_store;

pub use api::{GalleryApi, GalleryStats, Listing, OperationOutcome, TrashedListing};
pub use config::GalleryConfig;
pub use error::{GalleryError, GalleryResult};
pub use index::{DatePartition, FolderIndex, PhotoRecord};
pub use janitor::FolderJanitor;
pub use lifecycle::{BatchReport, LifecycleManager, PurgeReport, RestoredPhoto, TrashedPhoto};
pub use trash_store::{TrashEntry, TrashMetadataStore, TrashStore};

/// Fotobox Gallery version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
