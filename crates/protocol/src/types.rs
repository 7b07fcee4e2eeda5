//! Shared state types.

use serde::{Deserialize, Serialize};

/// State of the single allowed transfer slot.
///
/// Exactly one transfer may be in flight; a second drop while `Uploading`
/// is rejected, not queued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferState {
    #[default]
    Idle,
    Uploading,
}

impl TransferState {
    /// Returns `true` while a transfer is in flight.
    pub fn is_uploading(self) -> bool {
        matches!(self, TransferState::Uploading)
    }
}
