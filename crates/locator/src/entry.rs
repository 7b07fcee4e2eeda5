//! Abstract file-or-directory handle for a dropped tree.

use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::LocatorError;

/// Boxed future returned by [`AppEntry`] operations.
pub type EntryFuture<'a, T> = BoxFuture<'a, Result<T, LocatorError>>;

/// A file or directory node in a dropped tree.
///
/// [`FsEntry`](crate::FsEntry) implements this over the real filesystem;
/// the front end may bridge it to whatever drop mechanism it has. Using a
/// trait keeps the traversal decoupled from the entry source and testable
/// with scripted in-memory trees.
pub trait AppEntry: Send + Sync {
    /// Leaf name of this entry, without path separators.
    fn name(&self) -> &str;

    /// Returns `true` if this entry is a file.
    fn is_file(&self) -> bool;

    /// Returns `true` if this entry is a directory.
    fn is_dir(&self) -> bool;

    /// Enumerates child entries, in enumeration order.
    ///
    /// Only meaningful for directories; files resolve to an empty list.
    fn children(&self) -> EntryFuture<'_, Vec<Arc<dyn AppEntry>>>;

    /// Materializes the full byte content of a file.
    fn read(&self) -> EntryFuture<'_, Vec<u8>>;
}
