//! Pending-appointments badge
//!
//! The badge is raised when the list of pending appointment ids contains
//! an id that was not there on the previous check, and cleared when the
//! user looks at the list or no appointments are pending. Both the badge
//! flag and the last seen ids are installation-wide keys.

use super::{encode_flag, parse_flag, FlagContext, Indicator};
use crate::error::{FetchError, Result, StoreError};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Data-fetch collaborator supplying the currently pending appointment ids
#[async_trait]
pub trait PendingSource: Send + Sync {
    async fn pending_ids(&self) -> std::result::Result<Vec<String>, FetchError>;
}

#[derive(Clone)]
pub struct PendingBadge {
    ctx: FlagContext,
    indicator: Arc<Indicator>,
}

impl PendingBadge {
    pub fn new(ctx: FlagContext) -> Self {
        Self {
            ctx,
            indicator: Arc::new(Indicator::new(false)),
        }
    }

    /// Whether the badge is currently shown
    pub fn show_indicator(&self) -> bool {
        self.indicator.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.indicator.subscribe()
    }

    pub fn detach(&self) {
        self.indicator.detach();
    }

    /// Load the persisted badge flag. A failed read keeps the current value.
    pub async fn load(&self) -> bool {
        let keys = self.ctx.keys();
        let _guard = self.ctx.locks().acquire(&keys.last_seen_ids).await;

        match self.ctx.store().get(&keys.pending_flag).await {
            Ok(raw) => {
                self.indicator.set(parse_flag(raw.as_deref()));
            }
            Err(e) => {
                warn!(key = %keys.pending_flag, error = %e, "Failed to read pending badge flag");
            }
        }
        self.indicator.get()
    }

    /// The user looked at the pending list: clear the badge
    pub async fn mark_seen(&self) -> Result<()> {
        let keys = self.ctx.keys();
        let _guard = self.ctx.locks().acquire(&keys.last_seen_ids).await;

        if let Err(e) = self.ctx.store().set(&keys.pending_flag, encode_flag(false)).await {
            warn!(key = %keys.pending_flag, error = %e, "Failed to clear pending badge flag");
            return Err(e.into());
        }
        self.indicator.set(false);
        Ok(())
    }

    /// Compare `current_ids` with the ids seen on the previous check.
    ///
    /// - empty `current_ids` clears the badge
    /// - any id not seen before raises it
    /// - otherwise the badge is left alone
    ///
    /// `current_ids` always becomes the baseline for the next check. If the
    /// baseline cannot be read, nothing is written and the badge is kept.
    pub async fn recheck_against(&self, current_ids: &[String]) -> Result<bool> {
        let keys = self.ctx.keys();
        let _guard = self.ctx.locks().acquire(&keys.last_seen_ids).await;
        let store = self.ctx.store();

        let previous: Vec<String> = match store.get(&keys.last_seen_ids).await {
            Ok(None) => Vec::new(),
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(ids) => ids,
                Err(e) => {
                    warn!(key = %keys.last_seen_ids, error = %e, "Stored pending ids are not a JSON string array");
                    return Ok(self.indicator.get());
                }
            },
            Err(e) => {
                warn!(key = %keys.last_seen_ids, error = %e, "Failed to read last seen pending ids");
                return Ok(self.indicator.get());
            }
        };

        let seen: HashSet<&str> = previous.iter().map(String::as_str).collect();
        let new_count = current_ids
            .iter()
            .filter(|id| !seen.contains(id.as_str()))
            .count();

        let next = if current_ids.is_empty() {
            Some(false)
        } else if new_count > 0 {
            Some(true)
        } else {
            None
        };

        // The indicator follows the flag as soon as it is stored, even if
        // the baseline write below fails.
        match next {
            Some(flag) => {
                store.set(&keys.pending_flag, encode_flag(flag)).await?;
                if flag {
                    info!(new_count, total = current_ids.len(), "New pending appointments");
                }
                self.indicator.set(flag);
            }
            None => debug!(total = current_ids.len(), "No new pending appointments"),
        }

        let baseline = serde_json::to_string(current_ids).map_err(StoreError::from)?;
        if let Err(e) = store.set(&keys.last_seen_ids, &baseline).await {
            warn!(key = %keys.last_seen_ids, error = %e, "Failed to persist pending ids baseline");
            return Err(e.into());
        }
        Ok(self.indicator.get())
    }

    /// Fetch pending ids and recheck against them.
    ///
    /// A fetch error means no data this cycle: it is logged and never
    /// raises the badge.
    pub async fn refresh(&self, source: &dyn PendingSource) -> Result<bool> {
        match source.pending_ids().await {
            Ok(ids) => self.recheck_against(&ids).await,
            Err(e) => {
                warn!(error = %e, "Could not fetch pending appointments, badge unchanged");
                Ok(self.indicator.get())
            }
        }
    }
}
