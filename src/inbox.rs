//! Local notification list for one portal session.
//!
//! Holds the enriched list produced by the last successful load and applies
//! read-state changes against the remote API.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::api::{ApiError, Credential, NotificationApi};
use crate::notifications::{enrich_all, EnrichedNotification, Role};

/// Errors surfaced by inbox operations.
#[derive(Debug, thiserror::Error)]
pub enum InboxError {
    /// A single remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// The id is not in the loaded list.
    #[error("notification {0} is not loaded")]
    NotFound(i64),
    /// Bulk mark-as-read had failures; no local state was changed.
    #[error("failed to mark {failed} of {total} notifications as read")]
    Bulk {
        /// Number of calls that failed.
        failed: usize,
        /// Number of calls issued.
        total: usize,
    },
}

/// Enriched notifications for one role, in server order.
#[derive(Debug, Clone, Default)]
pub struct Inbox {
    role: Role,
    notifications: Vec<EnrichedNotification>,
}

impl Inbox {
    /// Empty inbox for `role`.
    pub fn new(role: Role) -> Self {
        Self {
            role,
            notifications: Vec::new(),
        }
    }

    /// Role whose rule table classifies this inbox.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Loaded notifications.
    pub fn notifications(&self) -> &[EnrichedNotification] {
        &self.notifications
    }

    /// Look up a loaded notification.
    pub fn get(&self, id: i64) -> Option<&EnrichedNotification> {
        self.notifications.iter().find(|n| n.raw.id == id)
    }

    /// Number of unread notifications.
    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.raw.is_read).count()
    }

    /// Flip the expanded flag; returns the new value.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::NotFound` for an unknown id.
    pub fn toggle_expanded(&mut self, id: i64) -> Result<bool, InboxError> {
        let n = self.find_mut(id)?;
        n.is_expanded = !n.is_expanded;
        Ok(n.is_expanded)
    }

    /// Fetch and enrich the list, replacing local state.
    ///
    /// On failure the previous list is kept and the error returned as-is;
    /// there is no retry.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::Api` when the list call fails.
    pub async fn load<A>(&mut self, api: &A, credential: &Credential) -> Result<usize, InboxError>
    where
        A: NotificationApi + ?Sized,
    {
        let raws = api.list(credential).await?;
        self.notifications = enrich_all(raws, self.role);
        info!(
            total = self.notifications.len(),
            unread = self.unread_count(),
            role = ?self.role,
            "notifications loaded"
        );
        Ok(self.notifications.len())
    }

    /// Mark as read after the server confirms.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::NotFound` for an unknown id, `InboxError::Api`
    /// when the remote call fails (local state untouched).
    pub async fn mark_read<A>(
        &mut self,
        api: &A,
        id: i64,
        credential: &Credential,
    ) -> Result<(), InboxError>
    where
        A: NotificationApi + ?Sized,
    {
        if self.find_mut(id)?.raw.is_read {
            debug!(id, "notification already read");
            return Ok(());
        }
        api.mark_read(id, credential).await?;
        self.find_mut(id)?.raw.is_read = true;
        Ok(())
    }

    /// Mark as read locally first, then tell the server.
    ///
    /// The local flag is restored if the remote call fails.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::NotFound` for an unknown id, `InboxError::Api`
    /// when the remote call fails.
    pub async fn mark_read_optimistic<A>(
        &mut self,
        api: &A,
        id: i64,
        credential: &Credential,
    ) -> Result<(), InboxError>
    where
        A: NotificationApi + ?Sized,
    {
        let n = self.find_mut(id)?;
        if n.raw.is_read {
            return Ok(());
        }
        n.raw.is_read = true;

        if let Err(e) = api.mark_read(id, credential).await {
            warn!(id, error = %e, "optimistic mark-as-read rolled back");
            self.find_mut(id)?.raw.is_read = false;
            return Err(e.into());
        }
        Ok(())
    }

    /// Mark every unread notification as read with concurrent remote calls.
    ///
    /// All calls are joined before local state changes. If any call fails
    /// nothing is marked locally and one aggregate error is returned.
    /// Dropping the returned future aborts calls still in flight.
    ///
    /// # Errors
    ///
    /// Returns `InboxError::Bulk` when at least one call failed.
    pub async fn mark_all_read<A>(
        &mut self,
        api: Arc<A>,
        credential: &Credential,
    ) -> Result<usize, InboxError>
    where
        A: NotificationApi + ?Sized + 'static,
    {
        let unread: Vec<i64> = self
            .notifications
            .iter()
            .filter(|n| !n.raw.is_read)
            .map(|n| n.raw.id)
            .collect();
        if unread.is_empty() {
            return Ok(0);
        }

        let mut calls = JoinSet::new();
        for &id in &unread {
            let api = Arc::clone(&api);
            let credential = credential.clone();
            calls.spawn(async move { (id, api.mark_read(id, &credential).await) });
        }

        let total = unread.len();
        let mut failed = 0_usize;
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok((_, Ok(()))) => {}
                Ok((id, Err(e))) => {
                    debug!(id, error = %e, "mark-as-read call failed");
                    failed = failed.saturating_add(1);
                }
                Err(e) => {
                    debug!(error = %e, "mark-as-read task did not complete");
                    failed = failed.saturating_add(1);
                }
            }
        }

        if failed > 0 {
            warn!(failed, total, "bulk mark-as-read failed");
            return Err(InboxError::Bulk { failed, total });
        }

        for n in &mut self.notifications {
            n.raw.is_read = true;
        }
        info!(total, "all notifications marked as read");
        Ok(total)
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut EnrichedNotification, InboxError> {
        self.notifications
            .iter_mut()
            .find(|n| n.raw.id == id)
            .ok_or(InboxError::NotFound(id))
    }
}
