//! Dropped-tree traversal: finds the one qualifying app image.
//!
//! The entry point is [`locate_app_image`], which walks a tree of
//! [`AppEntry`] nodes depth-first up to a fixed depth bound and records the
//! first file matching the app-image rule (leaf name `esp32c3.app`, parent
//! directory name parsing to an id ≥ 2) in a set-once [`CandidateCell`].
//!
//! Directory enumeration is asynchronous. The browser original detected
//! overall completion by polling a flag on a timer; here every directory's
//! sub-traversals are awaited as a set, so the locate future resolves
//! exactly when no outstanding work remains.

mod candidate;
mod entry;
mod fs_entry;
mod walk;

pub use candidate::{Candidate, CandidateCell};
pub use entry::{AppEntry, EntryFuture};
pub use fs_entry::FsEntry;
pub use walk::{locate_app_image, parse_app_id};

/// Errors produced while walking a dropped tree.
#[derive(Debug, thiserror::Error)]
pub enum LocatorError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
