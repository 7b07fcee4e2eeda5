//! Set-once result cell for the traversal.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::entry::AppEntry;

/// The single file located by traversal, with its derived identifiers.
#[derive(Clone)]
pub struct Candidate {
    /// The matched file entry.
    pub entry: Arc<dyn AppEntry>,
    /// Path relative to the dropped root, `/`-separated.
    pub full_path: String,
    /// App id parsed from the immediate parent directory name.
    pub app_id: u32,
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Candidate")
            .field("full_path", &self.full_path)
            .field("app_id", &self.app_id)
            .finish()
    }
}

/// Holds at most one [`Candidate`]. The first write wins; later writes are
/// no-ops, so sibling branches that resolve after a match cannot alter the
/// result.
#[derive(Default)]
pub struct CandidateCell {
    slot: Mutex<Option<Candidate>>,
}

impl CandidateCell {
    /// Creates an empty cell.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a candidate unless one is already present.
    ///
    /// Returns `true` if this call stored the value.
    pub fn try_set(&self, candidate: Candidate) -> bool {
        let mut slot = self.slot.lock().unwrap();
        if slot.is_some() {
            return false;
        }
        *slot = Some(candidate);
        true
    }

    /// Returns `true` once a candidate has been recorded.
    pub fn is_set(&self) -> bool {
        self.slot.lock().unwrap().is_some()
    }

    /// Removes and returns the recorded candidate, if any.
    pub fn take(&self) -> Option<Candidate> {
        self.slot.lock().unwrap().take()
    }
}
