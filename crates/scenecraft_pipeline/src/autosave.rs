//! Debounced autosave.

use crate::DraftHistory;
use scenecraft_core::TopicDraft;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, instrument, warn};

/// Messages accepted by the autosave task.
#[derive(Debug)]
enum AutosaveMessage {
    /// Replace the pending draft and restart the quiet period
    Schedule(Box<TopicDraft>),
    /// Save the pending draft now
    Flush(oneshot::Sender<()>),
    /// Drop the pending draft without saving it
    Discard(oneshot::Sender<()>),
    /// Save the pending draft and stop
    Shutdown(oneshot::Sender<()>),
}

/// Handle to a background task that autosaves the latest scheduled draft
/// once no new draft has arrived for the quiet period.
///
/// Dropping the handle closes the channel; the task then saves whatever is
/// still pending and exits.
#[derive(Debug)]
pub struct Autosaver {
    tx: mpsc::UnboundedSender<AutosaveMessage>,
    handle: JoinHandle<()>,
    quiet: Duration,
}

impl Autosaver {
    /// Spawn the autosave task on the current runtime.
    pub fn spawn(history: Arc<DraftHistory>, quiet: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(run(history, quiet, rx));
        info!(quiet_ms = quiet.as_millis() as u64, "Autosaver started");
        Self { tx, handle, quiet }
    }

    /// Quiet period after the last scheduled draft.
    pub fn quiet_period(&self) -> Duration {
        self.quiet
    }

    /// Schedule the latest state of a draft. Replaces any pending draft.
    pub fn schedule(&self, draft: TopicDraft) {
        if self.tx.send(AutosaveMessage::Schedule(Box::new(draft))).is_err() {
            warn!("Autosaver stopped, draft not scheduled");
        }
    }

    /// Save the pending draft immediately and wait for the write.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(AutosaveMessage::Flush(ack)).is_err() {
            warn!("Autosaver stopped, nothing to flush");
            return;
        }
        let _ = done.await;
    }

    /// Drop the pending draft and wait until the task has done so.
    ///
    /// Used before an explicit save: the pending snapshot is older than the
    /// state being saved and may still lack the stable identity.
    pub async fn discard(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(AutosaveMessage::Discard(ack)).is_err() {
            return;
        }
        let _ = done.await;
    }

    /// Save the pending draft and stop the task.
    pub async fn shutdown(self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(AutosaveMessage::Shutdown(ack)).is_ok() {
            let _ = done.await;
        }
        if let Err(e) = self.handle.await {
            error!(error = %e, "Autosave task panicked");
        }
    }
}

#[instrument(skip_all)]
async fn run(
    history: Arc<DraftHistory>,
    quiet: Duration,
    mut rx: mpsc::UnboundedReceiver<AutosaveMessage>,
) {
    let mut pending: Option<Box<TopicDraft>> = None;

    loop {
        let message = if pending.is_some() {
            match tokio::time::timeout(quiet, rx.recv()).await {
                Ok(message) => message,
                Err(_) => {
                    debug!("Quiet period elapsed");
                    save(&history, pending.take()).await;
                    continue;
                }
            }
        } else {
            rx.recv().await
        };

        match message {
            Some(AutosaveMessage::Schedule(draft)) => pending = Some(draft),
            Some(AutosaveMessage::Flush(ack)) => {
                save(&history, pending.take()).await;
                let _ = ack.send(());
            }
            Some(AutosaveMessage::Discard(ack)) => {
                if pending.take().is_some() {
                    debug!("Pending autosave discarded");
                }
                let _ = ack.send(());
            }
            Some(AutosaveMessage::Shutdown(ack)) => {
                save(&history, pending.take()).await;
                let _ = ack.send(());
                break;
            }
            None => {
                save(&history, pending.take()).await;
                break;
            }
        }
    }

    debug!("Autosaver stopped");
}

async fn save(history: &DraftHistory, draft: Option<Box<TopicDraft>>) {
    let Some(draft) = draft else { return };
    match history.autosave(&draft).await {
        Ok(Some(key)) => debug!(key = %key, "Autosave complete"),
        Ok(None) => {}
        Err(e) => error!(error = %e, "Autosave failed"),
    }
}
