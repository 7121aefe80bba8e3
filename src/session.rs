//! Logout cleanup

use crate::error::Result;
use crate::tracker::FlagContext;
use tracing::info;

/// Remove every stored key except onboarding-seen flags.
///
/// Onboarding survives logout so a returning user is not walked through
/// it again. Returns the number of keys removed.
pub async fn clear_session(ctx: &FlagContext) -> Result<usize> {
    let keys = ctx.keys();
    let doomed: Vec<String> = ctx
        .store()
        .all_keys()
        .await?
        .into_iter()
        .filter(|key| !keys.is_onboarding_key(key))
        .collect();

    if doomed.is_empty() {
        return Ok(0);
    }

    ctx.store().multi_remove(&doomed).await?;
    info!(removed = doomed.len(), "Session storage cleared");
    Ok(doomed.len())
}
