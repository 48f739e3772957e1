//! Preference store
//!
//! Single owner of the user's `UserPreferences`. Every mutation builds a new
//! value from the current one, persists it (best effort), swaps it in, and
//! then notifies observers with the new snapshot. Mutations take `&mut self`,
//! so two toggles can never interleave their read-modify-write.
//!
//! Storage failures never reach the caller. A failed write is logged and the
//! in-memory update still applies; unreadable or corrupt data loads as
//! defaults so the app always boots.

use crate::consts::STORAGE_KEY;
use crate::error::{PreferencesError, Result, StorageError};
use crate::ids::IdSet;
use crate::preferences::UserPreferences;
use crate::storage::KeyValueStorage;

/// Callback receiving the new snapshot after each mutation
pub type Observer = Box<dyn FnMut(&UserPreferences)>;

/// Handle returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub fn as_u32(&self) -> u32 {
        self.0
    }

    pub fn from_u32(id: u32) -> Self {
        Self(id)
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Key the preferences record is stored under
    pub storage_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

pub struct PreferenceStore<S: KeyValueStorage> {
    storage: S,
    config: StoreConfig,
    prefs: UserPreferences,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u32,
    /// Whether the last write reached durable storage
    last_save_ok: bool,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    /// Create a store, rehydrating from `storage` under the default key
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, StoreConfig::default())
    }

    /// Create a store with a custom configuration
    pub fn with_config(storage: S, config: StoreConfig) -> Self {
        let mut store = Self {
            storage,
            config,
            prefs: UserPreferences::default(),
            observers: Vec::new(),
            next_subscription: 0,
            last_save_ok: true,
        };
        store.prefs = store.load();
        store
    }

    // === Persistence ===

    /// Read preferences from durable storage
    ///
    /// Returns defaults if nothing is stored, the record is corrupt, or
    /// storage cannot be read. Does not change the in-memory state.
    pub fn load(&self) -> UserPreferences {
        match self.try_load() {
            Ok(Some(prefs)) => {
                log::info!("Loaded preferences from storage");
                prefs
            }
            Ok(None) => {
                log::info!("No stored preferences, using defaults");
                UserPreferences::default()
            }
            Err(e) => {
                log::warn!("Ignoring stored preferences, using defaults: {}", e);
                UserPreferences::default()
            }
        }
    }

    /// Read preferences from durable storage, reporting failures
    ///
    /// `Ok(None)` if nothing (or only whitespace) is stored.
    pub fn try_load(&self) -> Result<Option<UserPreferences>> {
        let json = match self.storage.get_item(&self.config.storage_key) {
            Ok(Some(json)) if !json.trim().is_empty() => json,
            Ok(_) => return Ok(None),
            Err(StorageError::InvalidData(msg)) => {
                return Err(PreferencesError::MalformedPersistedData(msg));
            }
            Err(e) => return Err(e.into()),
        };
        UserPreferences::from_json(&json).map(Some)
    }

    /// Replace the whole preferences value and persist it
    pub fn save(&mut self, prefs: UserPreferences) {
        self.commit(prefs);
    }

    /// Re-read durable storage into memory (e.g. after another tab wrote it)
    ///
    /// An unreadable or corrupt record keeps the current in-memory state.
    pub fn reload(&mut self) -> UserPreferences {
        match self.try_load() {
            Ok(stored) => {
                self.prefs = stored.unwrap_or_default();
                self.notify();
            }
            Err(e) => log::warn!("Reload failed, keeping current preferences: {}", e),
        }
        self.prefs.clone()
    }

    /// Write the current in-memory state again, reporting failures
    pub fn flush(&mut self) -> Result<()> {
        let result = Self::write(&mut self.storage, &self.config.storage_key, &self.prefs);
        self.last_save_ok = result.is_ok();
        result
    }

    /// Whether the most recent write reached durable storage
    pub fn last_save_succeeded(&self) -> bool {
        self.last_save_ok
    }

    fn write(storage: &mut S, key: &str, prefs: &UserPreferences) -> Result<()> {
        let json = prefs.to_json()?;
        storage
            .set_item(key, &json)
            .map_err(PreferencesError::StorageUnavailable)
    }

    /// Persist, publish, and hand back the new snapshot
    fn commit(&mut self, next: UserPreferences) -> UserPreferences {
        match Self::write(&mut self.storage, &self.config.storage_key, &next) {
            Ok(()) => {
                self.last_save_ok = true;
            }
            Err(e) => {
                self.last_save_ok = false;
                log::warn!("Preferences not saved, keeping in-memory update: {}", e);
            }
        }
        self.prefs = next;
        self.notify();
        self.prefs.clone()
    }

    fn update(&mut self, f: impl FnOnce(&mut UserPreferences)) -> UserPreferences {
        let mut next = self.prefs.clone();
        f(&mut next);
        self.commit(next)
    }

    // === Reads ===

    /// Current preferences
    pub fn preferences(&self) -> &UserPreferences {
        &self.prefs
    }

    /// Owned copy of the current preferences
    pub fn snapshot(&self) -> UserPreferences {
        self.prefs.clone()
    }

    pub fn is_sport_hidden(&self, id: &str) -> bool {
        self.prefs.is_sport_hidden(id)
    }

    pub fn is_team_hidden(&self, id: &str) -> bool {
        self.prefs.is_team_hidden(id)
    }

    pub fn is_article_saved(&self, id: &str) -> bool {
        self.prefs.is_article_saved(id)
    }

    pub fn is_onboarding_complete(&self) -> bool {
        self.prefs.onboarding_completed
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // === Mutations ===

    /// Replace the selected sports. Teams of deselected sports stay selected.
    pub fn set_selected_sports<I, T>(&mut self, ids: I) -> UserPreferences
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let sports: IdSet = ids.into_iter().collect();
        log::debug!("Selected sports: {:?}", sports.as_slice());
        self.update(|p| p.selected_sports = sports)
    }

    pub fn set_selected_teams<I, T>(&mut self, ids: I) -> UserPreferences
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let teams: IdSet = ids.into_iter().collect();
        log::debug!("Selected teams: {:?}", teams.as_slice());
        self.update(|p| p.selected_teams = teams)
    }

    /// Select or deselect one sport (settings tile tap)
    pub fn toggle_selected_sport(&mut self, id: &str) -> UserPreferences {
        log::debug!("Toggle selected sport {}", id);
        self.update(|p| {
            p.selected_sports.toggle(id);
        })
    }

    /// Follow or unfollow one team
    pub fn toggle_selected_team(&mut self, id: &str) -> UserPreferences {
        log::debug!("Toggle selected team {}", id);
        self.update(|p| {
            p.selected_teams.toggle(id);
        })
    }

    pub fn toggle_hidden_sport(&mut self, id: &str) -> UserPreferences {
        log::debug!("Toggle hidden sport {}", id);
        self.update(|p| {
            p.hidden_sports.toggle(id);
        })
    }

    pub fn toggle_hidden_team(&mut self, id: &str) -> UserPreferences {
        log::debug!("Toggle hidden team {}", id);
        self.update(|p| {
            p.hidden_teams.toggle(id);
        })
    }

    /// Bookmark or un-bookmark an article
    pub fn toggle_saved_article(&mut self, id: &str) -> UserPreferences {
        log::debug!("Toggle saved article {}", id);
        self.update(|p| {
            p.saved_articles.toggle(id);
        })
    }

    pub fn set_notifications_enabled(&mut self, enabled: bool) -> UserPreferences {
        self.update(|p| p.notifications_enabled = enabled)
    }

    pub fn set_ai_enhancements_enabled(&mut self, enabled: bool) -> UserPreferences {
        self.update(|p| p.ai_enhancements_enabled = enabled)
    }

    /// Mark onboarding done so it is not shown again after a reload
    pub fn complete_onboarding(&mut self) -> UserPreferences {
        log::info!("Onboarding completed");
        self.update(|p| p.onboarding_completed = true)
    }

    /// Back to defaults, persisted (logout)
    pub fn reset(&mut self) -> UserPreferences {
        log::info!("Preferences reset");
        self.commit(UserPreferences::default())
    }

    // === Observers ===

    /// Register an observer, called after every mutation in registration order
    pub fn subscribe(&mut self, observer: impl FnMut(&UserPreferences) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription = self.next_subscription.wrapping_add(1);
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Remove an observer. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn notify(&mut self) {
        for (_, observer) in self.observers.iter_mut() {
            observer(&self.prefs);
        }
    }
}
