//! Fotobox Gallery - CLI
//!
//! Command-line interface for gallery lifecycle operations.

use std::path::PathBuf;
use clap::{Parser, Subcommand};

use fotobox_gallery::{GalleryApi, OperationOutcome};

#[derive(Parser)]
#[command(name = "fotobox-gallery")]
#[command(version = fotobox_gallery::VERSION)]
#[command(about = "Fotobox Gallery - manage date-partitioned photos, trash and restore")]
struct Cli {
    /// Photo root directory
    #[arg(short, long, default_value = "./photos")]
    root: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List date folders holding photos
    Folders,

    /// List photos, optionally of one folder
    Photos {
        /// Folder identifier, e.g. 20250101_Photobooth
        #[arg(short, long)]
        folder: Option<String>,
    },

    /// Move one photo into the trash
    Trash {
        /// Photo file name
        filename: String,
    },

    /// Move every photo of one folder into the trash
    TrashFolder {
        /// Folder identifier
        folder: String,
    },

    /// Move every photo into the trash
    TrashAll,

    /// List trashed photos
    ListTrash,

    /// Restore one trashed photo
    Restore {
        /// Trash-resident or original file name
        filename: String,
    },

    /// Permanently delete one trashed photo
    Purge {
        /// Trash-resident file name
        filename: String,
    },

    /// Permanently delete everything in the trash
    PurgeAll,

    /// Show gallery statistics
    Stats,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if !run(cli) {
        std::process::exit(1);
    }
}

fn report(outcome: &OperationOutcome) -> bool {
    if outcome.success {
        println!("✅ {}", outcome.message);
    } else {
        eprintln!("❌ {}", outcome.message);
    }
    outcome.success
}

fn run(cli: Cli) -> bool {
    let api = GalleryApi::new(&cli.root);

    match cli.command {
        Commands::Folders => {
            let listing = api.list_folders();
            if listing.items.is_empty() {
                println!("📭 No photo folders");
            } else {
                println!("📁 Folders ({}):", listing.items.len());
                for folder in &listing.items {
                    println!("   {} ({} photos)", folder.id, folder.photo_count);
                }
            }
            listing.success
        }

        Commands::Photos { folder } => {
            let listing = api.list_photos(folder.as_deref());
            if !listing.success {
                eprintln!("❌ {}", listing.message);
                return false;
            }
            if listing.items.is_empty() {
                println!("📭 No photos");
            } else {
                println!("📷 Photos ({}):", listing.items.len());
                for photo in &listing.items {
                    println!(
                        "   {} [{}] ({} bytes)",
                        photo.filename,
                        photo.partition.as_deref().unwrap_or("-"),
                        photo.size_bytes
                    );
                }
            }
            true
        }

        Commands::Trash { filename } => {
            println!("🗑️ Trashing {}", filename);
            report(&api.trash_photo(&filename))
        }

        Commands::TrashFolder { folder } => {
            println!("🗑️ Trashing folder {}", folder);
            report(&api.trash_folder(&folder))
        }

        Commands::TrashAll => {
            println!("🗑️ Trashing all photos");
            report(&api.trash_all())
        }

        Commands::ListTrash => {
            let listing = api.list_trash();
            if listing.items.is_empty() {
                println!("📭 Trash is empty");
            } else {
                println!("🗑️ Trashed photos ({}):", listing.items.len());
                for item in &listing.items {
                    let origin = item
                        .entry
                        .as_ref()
                        .and_then(|e| e.original_folder.as_deref())
                        .unwrap_or("-");
                    println!("   {} (from {})", item.photo.filename, origin);
                }
            }
            listing.success
        }

        Commands::Restore { filename } => {
            println!("♻️ Restoring {}", filename);
            report(&api.restore_photo(&filename))
        }

        Commands::Purge { filename } => {
            println!("🔥 Purging {}", filename);
            report(&api.purge_photo(&filename))
        }

        Commands::PurgeAll => {
            println!("🔥 Emptying trash");
            report(&api.purge_all())
        }

        Commands::Stats => {
            let stats = api.stats();
            println!("📊 Fotobox Gallery Statistics");
            println!("{:-<40}", "");
            println!("Folders:          {}", stats.folders);
            println!("Active photos:    {}", stats.active_photos);
            println!("Trashed photos:   {}", stats.trashed_photos);
            println!("Total size:       {} KB", stats.total_bytes / 1024);
            true
        }
    }
}
