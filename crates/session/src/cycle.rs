//! One drop cycle: locate, inspect, upload, reset.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tracing::{error, info, warn};

use pocudrop_image::inspect_image;
use pocudrop_locator::{AppEntry, locate_app_image};
use pocudrop_protocol::{IMAGE_FILE_NAME, TransferState};
use pocudrop_uploader::{UploadClient, UploadError};

use crate::error::SessionError;
use crate::types::{CycleEvent, CycleOutcome};

/// Drives drop cycles against one device.
///
/// Holds the busy flag guarding the single transfer slot; everything else
/// (candidate, metadata) lives only for the duration of one
/// [`handle_drop`](Self::handle_drop) call and is discarded when the cycle
/// ends, whatever the outcome.
pub struct DropSession {
    client: UploadClient,
    uploading: AtomicBool,
    events_tx: mpsc::Sender<CycleEvent>,
    events_rx: Option<mpsc::Receiver<CycleEvent>>,
}

impl DropSession {
    /// Creates a session around an upload client.
    pub fn new(client: UploadClient) -> Self {
        let (events_tx, events_rx) = mpsc::channel(64);
        Self {
            client,
            uploading: AtomicBool::new(false),
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<CycleEvent>> {
        self.events_rx.take()
    }

    /// Current state of the transfer slot.
    pub fn state(&self) -> TransferState {
        if self.uploading.load(Ordering::SeqCst) {
            TransferState::Uploading
        } else {
            TransferState::Idle
        }
    }

    /// Runs one full cycle for a dropped set of top-level entries.
    ///
    /// More than one item is rejected before traversal starts. A cycle
    /// started while another is in flight is rejected, not queued. On
    /// every exit path the session returns to idle, so the caller can
    /// retry a failed drop immediately.
    pub async fn handle_drop(
        &self,
        items: Vec<Arc<dyn AppEntry>>,
    ) -> Result<CycleOutcome, SessionError> {
        if items.len() > 1 {
            return Err(SessionError::MultipleItems);
        }
        let Some(root) = items.into_iter().next() else {
            return Err(SessionError::NotFound(IMAGE_FILE_NAME.into()));
        };

        // Single transfer slot: re-entry is a caller bug, logged and
        // rejected without a user dialog.
        if self.uploading.swap(true, Ordering::SeqCst) {
            error!("drop cycle started while a transfer is in flight");
            return Err(SessionError::Busy);
        }

        let result = self.run_cycle(root).await;
        self.uploading.store(false, Ordering::SeqCst);

        match &result {
            Ok(outcome) => {
                info!(
                    app_id = outcome.app_id,
                    status = outcome.status,
                    "drop cycle finished"
                )
            }
            Err(err) => warn!(%err, "drop cycle aborted"),
        }
        result
    }

    async fn run_cycle(&self, root: Arc<dyn AppEntry>) -> Result<CycleOutcome, SessionError> {
        let Some(candidate) = locate_app_image(root).await? else {
            return Err(SessionError::NotFound(IMAGE_FILE_NAME.into()));
        };
        self.emit(CycleEvent::Located {
            app_id: candidate.app_id,
            path: candidate.full_path.clone(),
        })
        .await;

        let payload = candidate.entry.read().await?;
        let metadata = inspect_image(&payload);
        self.emit(CycleEvent::Inspected {
            app_id: candidate.app_id,
            path: candidate.full_path.clone(),
            metadata: metadata.clone(),
        })
        .await;

        let progress_tx = self.events_tx.clone();
        let on_progress = Box::new(move |percent: u8| {
            // Progress is advisory; drop updates rather than block the
            // body stream when the consumer lags.
            let _ = progress_tx.try_send(CycleEvent::Progress { percent });
        });

        let outcome = match self
            .client
            .upload_image(candidate.app_id, &metadata, payload, Some(on_progress))
            .await
        {
            Ok(outcome) => outcome,
            Err(UploadError::ImageTooSmall { size, min }) => {
                // User-input error: the candidate is discarded with the
                // rest of the cycle state.
                return Err(SessionError::ImageTooSmall { size, min });
            }
            Err(err) => return Err(err.into()),
        };

        self.emit(CycleEvent::Finished {
            status: outcome.status,
        })
        .await;

        Ok(CycleOutcome {
            app_id: candidate.app_id,
            status: outcome.status,
            response: outcome.body,
        })
    }

    async fn emit(&self, event: CycleEvent) {
        let _ = self.events_tx.send(event).await;
    }
}
