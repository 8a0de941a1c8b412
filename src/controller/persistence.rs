//! Session save/restore

use crate::model::{PersistedSession, SESSION_KEY};

use super::PlayerController;

impl PlayerController {
    /// Read the saved session once at startup.
    ///
    /// A missing or unreadable blob leaves the empty session in place; a
    /// malformed one is also removed from the store.
    pub async fn restore(&self) {
        let persisted = match self.store.get(SESSION_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<PersistedSession>(value) {
                Ok(persisted) => Some(persisted),
                Err(e) => {
                    tracing::warn!(error = %e, "Saved session is malformed, discarding it");
                    if let Err(e) = self.store.remove(SESSION_KEY).await {
                        tracing::warn!(error = %e, "Could not discard malformed session");
                    }
                    None
                }
            },
            Ok(None) => {
                tracing::debug!("No saved session");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not read saved session, starting fresh");
                None
            }
        };

        if let Some(persisted) = persisted {
            let saved_at = persisted.saved_at;
            let mut session = self.session.lock().await;
            session.restore(persisted);
            tracing::info!(
                len = session.queue.len(),
                cursor = ?session.queue.cursor(),
                saved_at = ?saved_at,
                "Session restored"
            );
        }
    }

    /// Write queue, cursor and current track. Failures are logged only.
    pub(crate) async fn persist(&self) {
        // the snapshot is taken under the write lock so writes land in state order
        let _write = self.persist_lock.lock().await;
        let snapshot = self.session.lock().await.to_persisted();

        let result = match serde_json::to_value(&snapshot) {
            Ok(value) => self.store.set(SESSION_KEY, value).await,
            Err(e) => Err(e.into()),
        };

        match result {
            Ok(()) => tracing::trace!(len = snapshot.queue.len(), "Session saved"),
            Err(e) => tracing::warn!(error = %e, "Failed to save session"),
        }
    }
}
