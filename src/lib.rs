//! Sportsfeed preferences - personalization state for the sports feed app
//!
//! Core modules:
//! - `store`: `PreferenceStore`, the single owner of user preferences
//! - `preferences`: the `UserPreferences` record and its persisted format
//! - `storage`: key-value persistence (LocalStorage on web, files on native)
//! - `views`: pure derived views (available teams, visible feed, counters)
//! - `catalog`: reference data for sports, teams, articles, live matches

pub mod catalog;
pub mod error;
pub mod ids;
pub mod preferences;
pub mod storage;
pub mod store;
pub mod views;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use catalog::{Article, Catalog, LiveMatch, MatchSide, Sport, Team};
pub use error::{PreferencesError, StorageError};
pub use ids::{ArticleId, IdSet, SportId, TeamId};
pub use preferences::UserPreferences;
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{PreferenceStore, StoreConfig, SubscriptionId};
pub use views::FeedFilter;

/// Store configuration constants
pub mod consts {
    /// Directory name under the platform data dir (native)
    pub const APP_NAME: &str = "sportsfeed";
    /// Storage key for the preferences record
    pub const STORAGE_KEY: &str = "user-preferences";
    /// Current persisted record version
    pub const SCHEMA_VERSION: u32 = 1;

    /// Sports required before onboarding can continue
    pub const MIN_ONBOARDING_SPORTS: usize = 1;
    /// Suggested team range on the onboarding team picker
    pub const MIN_ONBOARDING_TEAMS: usize = 3;
    pub const MAX_ONBOARDING_TEAMS: usize = 10;
}
