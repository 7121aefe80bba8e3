//! Per-user resolution flags (profile completion, onboarding)

use super::{encode_flag, parse_flag, FlagContext, Indicator};
use crate::error::Result;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Which per-user flag a [`ResolutionFlag`] tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// `hasCompletedProfile_<userId>`, drives the complete-your-profile banner
    ProfileCompletion,
    /// `hasSeenOnboarding_<userId>`, drives the onboarding carousel
    Onboarding,
}

/// Tracks whether a user still needs to be nudged about something.
///
/// The indicator starts out shown: until storage says otherwise, the user
/// is assumed not to have resolved it. Call [`ResolutionFlag::check`]
/// every time the owning view gains focus so resolutions made elsewhere
/// in the app are picked up.
#[derive(Clone)]
pub struct ResolutionFlag {
    ctx: FlagContext,
    kind: FlagKind,
    indicator: Arc<Indicator>,
}

impl ResolutionFlag {
    pub fn new(ctx: FlagContext, kind: FlagKind) -> Self {
        Self {
            ctx,
            kind,
            indicator: Arc::new(Indicator::new(true)),
        }
    }

    pub fn profile_completion(ctx: FlagContext) -> Self {
        Self::new(ctx, FlagKind::ProfileCompletion)
    }

    pub fn onboarding(ctx: FlagContext) -> Self {
        Self::new(ctx, FlagKind::Onboarding)
    }

    pub fn kind(&self) -> FlagKind {
        self.kind
    }

    /// Storage key for `entity_id`
    pub fn key(&self, entity_id: &str) -> String {
        let keys = self.ctx.keys();
        match self.kind {
            FlagKind::ProfileCompletion => keys.profile_completed(entity_id),
            FlagKind::Onboarding => keys.onboarding_seen(entity_id),
        }
    }

    /// Whether the banner should currently be shown
    pub fn show_indicator(&self) -> bool {
        self.indicator.get()
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.indicator.subscribe()
    }

    /// Mark the owning view as torn down
    pub fn detach(&self) {
        self.indicator.detach();
    }

    /// Refresh the indicator from storage and return it.
    ///
    /// Without an entity id nothing is read. A failed read is logged and
    /// keeps the current value.
    pub async fn check(&self, entity_id: Option<&str>) -> bool {
        let Some(entity_id) = entity_id else {
            debug!(kind = ?self.kind, "No entity id, skipping flag check");
            return self.indicator.get();
        };

        let key = self.key(entity_id);
        let _guard = self.ctx.locks().acquire(&key).await;

        match self.ctx.store().get(&key).await {
            Ok(raw) => {
                let resolved = parse_flag(raw.as_deref());
                self.indicator.set(!resolved);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Failed to read resolution flag, keeping current state");
            }
        }
        self.indicator.get()
    }

    /// Persist the resolution and hide the indicator.
    ///
    /// The indicator only changes once the write succeeded; a failed write
    /// is returned and the indicator stays as it was. Without an entity id
    /// this does nothing.
    pub async fn mark_resolved(&self, entity_id: Option<&str>) -> Result<()> {
        let Some(entity_id) = entity_id else {
            debug!(kind = ?self.kind, "No entity id, not persisting resolution");
            return Ok(());
        };

        let key = self.key(entity_id);
        let _guard = self.ctx.locks().acquire(&key).await;

        if let Err(e) = self.ctx.store().set(&key, encode_flag(true)).await {
            warn!(key = %key, error = %e, "Failed to persist resolution flag");
            return Err(e.into());
        }

        info!(key = %key, "Resolution flag persisted");
        self.indicator.set(false);
        Ok(())
    }
}
