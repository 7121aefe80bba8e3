//! Storage key configuration
//!
//! Key names must stay byte-for-byte compatible with existing installs, so
//! the defaults below are the keys the app has always written.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, StateError};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    /// Prefix for the per-user profile completion flag
    #[serde(default = "default_profile_completed_prefix")]
    pub profile_completed_prefix: String,

    /// Prefix for the per-user onboarding seen flag
    #[serde(default = "default_onboarding_prefix")]
    pub onboarding_prefix: String,

    /// Installation-wide "has unseen pending appointments" flag
    #[serde(default = "default_pending_flag")]
    pub pending_flag: String,

    /// Installation-wide JSON array of pending ids seen last time
    #[serde(default = "default_last_seen_ids")]
    pub last_seen_ids: String,
}

// Defaults
fn default_profile_completed_prefix() -> String { "hasCompletedProfile_".to_string() }
fn default_onboarding_prefix() -> String { "hasSeenOnboarding_".to_string() }
fn default_pending_flag() -> String { "hasPendingAppointments".to_string() }
fn default_last_seen_ids() -> String { "lastSeenPendingIds".to_string() }

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            profile_completed_prefix: default_profile_completed_prefix(),
            onboarding_prefix: default_onboarding_prefix(),
            pending_flag: default_pending_flag(),
            last_seen_ids: default_last_seen_ids(),
        }
    }
}

impl StorageKeys {
    /// Parse keys from a TOML document. Missing entries fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let keys: StorageKeys = toml::from_str(content)?;
        keys.validate()?;
        Ok(keys)
    }

    /// Load keys from a TOML file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            StateError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    pub fn profile_completed(&self, user_id: &str) -> String {
        format!("{}{}", self.profile_completed_prefix, user_id)
    }

    pub fn onboarding_seen(&self, user_id: &str) -> String {
        format!("{}{}", self.onboarding_prefix, user_id)
    }

    /// Whether `key` belongs to an onboarding seen flag of any user
    pub fn is_onboarding_key(&self, key: &str) -> bool {
        key.starts_with(&self.onboarding_prefix)
    }

    fn validate(&self) -> Result<()> {
        let named = [
            ("profile_completed_prefix", &self.profile_completed_prefix),
            ("onboarding_prefix", &self.onboarding_prefix),
            ("pending_flag", &self.pending_flag),
            ("last_seen_ids", &self.last_seen_ids),
        ];
        for (name, value) in named {
            if value.is_empty() {
                return Err(StateError::Config(format!("{} must not be empty", name)));
            }
        }
        if self.pending_flag == self.last_seen_ids {
            return Err(StateError::Config(
                "pending_flag and last_seen_ids must be distinct keys".to_string(),
            ));
        }
        Ok(())
    }
}
