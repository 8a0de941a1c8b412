//! Engine status listener

use tokio::task::JoinHandle;

use crate::engine::StatusChannel;
use crate::model::StatusUpdate;

use super::PlayerController;

impl PlayerController {
    pub fn start_status_listener(&self, mut status_rx: StatusChannel) -> JoinHandle<()> {
        let controller = self.clone();
        tracing::info!("Starting engine status listener");

        tokio::spawn(async move {
            while let Some(update) = status_rx.recv().await {
                if controller.should_quit().await {
                    tracing::debug!("Status listener shutting down");
                    break;
                }
                controller.apply_status(update).await;
            }
        })
    }

    /// Apply one engine report; reports from an older load are dropped.
    pub async fn apply_status(&self, update: StatusUpdate) {
        let finished = {
            let mut session = self.session.lock().await;
            if update.generation != session.generation {
                tracing::trace!(
                    generation = update.generation,
                    current = session.generation,
                    "Ignoring stale status"
                );
                return;
            }
            session.timing.apply(&update.status);
            session.is_playing = update.status.is_playing;
            update.status.did_just_finish
        };

        if finished {
            tracing::debug!(generation = update.generation, "Track finished");
            self.handle_track_end().await;
        }
    }
}
