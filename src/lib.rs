//! Booking State - client state core for the interpreter booking app
//!
//! Two independent pieces of state the app's screens lean on:
//!
//! - **Forms**: named fields with explicit, context-aware validation
//!   ([`FormState`]).
//! - **Attention flags**: banners and badges derived from small values in
//!   the device's key-value storage ([`ResolutionFlag`], [`PendingBadge`]).
//!
//! Storage is reached only through [`KeyValueStore`], which the host app
//! implements (or uses [`JsonFileStore`] / [`MemoryStore`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use booking_state::{FlagContext, JsonFileStore, PendingBadge, ResolutionFlag};
//! use std::sync::Arc;
//!
//! # async fn example() -> booking_state::Result<()> {
//! let ctx = FlagContext::with_store(Arc::new(JsonFileStore::new("/data/app/state.json")));
//!
//! let profile = ResolutionFlag::profile_completion(ctx.clone());
//! if profile.check(Some("user-42")).await {
//!     // show the complete-your-profile banner
//! }
//!
//! let badge = PendingBadge::new(ctx);
//! badge.recheck_against(&["apt-1".to_string()]).await?;
//! # Ok(())
//! # }
//! ```

// Storage key names
pub mod config;

// Error types
pub mod error;

// Validated form state
pub mod form;

// Logout cleanup
pub mod session;

// Key-value persistence
pub mod store;

// Persisted attention flags
pub mod tracker;

pub use config::StorageKeys;
pub use error::{FetchError, Result, StateError, StoreError};
pub use form::{Field, FormBuilder, FormSnapshot, FormState, Validator};
pub use session::clear_session;
pub use store::{JsonFileStore, KeyValueStore, KeyedLock, MemoryStore};
pub use tracker::{FlagContext, FlagKind, PendingBadge, PendingSource, ResolutionFlag};
