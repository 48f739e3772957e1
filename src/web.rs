//! JavaScript bindings (WASM only)
//!
//! The UI layer holds one `PreferencesHandle` for the session. Id lists go
//! in and snapshots come out as JSON strings.

use wasm_bindgen::prelude::*;

use crate::catalog::Catalog;
use crate::preferences::UserPreferences;
use crate::storage::{KeyValueStorage, LocalStorage, MemoryStorage};
use crate::store::{PreferenceStore, SubscriptionId};
use crate::views;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        // Logger already installed by the host page
        return;
    }
    log::info!("Sportsfeed preferences loaded");
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(to_js_error)
}

fn parse_ids(ids_json: &str) -> Result<Vec<String>, JsValue> {
    serde_json::from_str(ids_json).map_err(to_js_error)
}

#[wasm_bindgen]
pub struct PreferencesHandle {
    store: PreferenceStore<Box<dyn KeyValueStorage>>,
    catalog: Catalog,
}

#[wasm_bindgen]
impl PreferencesHandle {
    /// Open the store on `localStorage`, falling back to memory if it is disabled
    #[wasm_bindgen(constructor)]
    pub fn new() -> PreferencesHandle {
        let storage: Box<dyn KeyValueStorage> = match LocalStorage::open() {
            Ok(local) => Box::new(local),
            Err(e) => {
                log::warn!("{}; preferences will not persist this session", e);
                Box::new(MemoryStorage::new())
            }
        };
        PreferencesHandle {
            store: PreferenceStore::new(storage),
            catalog: Catalog::builtin(),
        }
    }

    /// Current preferences as JSON
    pub fn preferences(&self) -> Result<String, JsValue> {
        to_json(self.store.preferences())
    }

    /// Catalog as JSON (`{"sports": [...], "teams": [...]}`)
    pub fn catalog(&self) -> Result<String, JsValue> {
        to_json(&self.catalog)
    }

    #[wasm_bindgen(js_name = setSelectedSports)]
    pub fn set_selected_sports(&mut self, ids_json: &str) -> Result<String, JsValue> {
        let prefs = self.store.set_selected_sports(parse_ids(ids_json)?);
        to_json(&prefs)
    }

    #[wasm_bindgen(js_name = setSelectedTeams)]
    pub fn set_selected_teams(&mut self, ids_json: &str) -> Result<String, JsValue> {
        let prefs = self.store.set_selected_teams(parse_ids(ids_json)?);
        to_json(&prefs)
    }

    #[wasm_bindgen(js_name = toggleSelectedSport)]
    pub fn toggle_selected_sport(&mut self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.toggle_selected_sport(id))
    }

    #[wasm_bindgen(js_name = toggleSelectedTeam)]
    pub fn toggle_selected_team(&mut self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.toggle_selected_team(id))
    }

    #[wasm_bindgen(js_name = toggleHiddenSport)]
    pub fn toggle_hidden_sport(&mut self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.toggle_hidden_sport(id))
    }

    #[wasm_bindgen(js_name = toggleHiddenTeam)]
    pub fn toggle_hidden_team(&mut self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.toggle_hidden_team(id))
    }

    #[wasm_bindgen(js_name = toggleSavedArticle)]
    pub fn toggle_saved_article(&mut self, id: &str) -> Result<String, JsValue> {
        to_json(&self.store.toggle_saved_article(id))
    }

    #[wasm_bindgen(js_name = setNotificationsEnabled)]
    pub fn set_notifications_enabled(&mut self, enabled: bool) -> Result<String, JsValue> {
        to_json(&self.store.set_notifications_enabled(enabled))
    }

    #[wasm_bindgen(js_name = setAiEnhancementsEnabled)]
    pub fn set_ai_enhancements_enabled(&mut self, enabled: bool) -> Result<String, JsValue> {
        to_json(&self.store.set_ai_enhancements_enabled(enabled))
    }

    #[wasm_bindgen(js_name = completeOnboarding)]
    pub fn complete_onboarding(&mut self) -> Result<String, JsValue> {
        to_json(&self.store.complete_onboarding())
    }

    pub fn reset(&mut self) -> Result<String, JsValue> {
        to_json(&self.store.reset())
    }

    /// Pick up writes made by another tab (call from the `storage` event)
    pub fn reload(&mut self) -> Result<String, JsValue> {
        to_json(&self.store.reload())
    }

    #[wasm_bindgen(js_name = isSportHidden)]
    pub fn is_sport_hidden(&self, id: &str) -> bool {
        self.store.is_sport_hidden(id)
    }

    #[wasm_bindgen(js_name = isTeamHidden)]
    pub fn is_team_hidden(&self, id: &str) -> bool {
        self.store.is_team_hidden(id)
    }

    #[wasm_bindgen(js_name = isArticleSaved)]
    pub fn is_article_saved(&self, id: &str) -> bool {
        self.store.is_article_saved(id)
    }

    #[wasm_bindgen(js_name = isOnboardingComplete)]
    pub fn is_onboarding_complete(&self) -> bool {
        self.store.is_onboarding_complete()
    }

    /// False after a write was rejected (storage disabled or full)
    #[wasm_bindgen(js_name = lastSaveSucceeded)]
    pub fn last_save_succeeded(&self) -> bool {
        self.store.last_save_succeeded()
    }

    #[wasm_bindgen(js_name = availableTeams)]
    pub fn available_teams(&self) -> Result<String, JsValue> {
        to_json(&views::available_teams(self.store.preferences(), &self.catalog.teams))
    }

    #[wasm_bindgen(js_name = savedArticleCount)]
    pub fn saved_article_count(&self) -> usize {
        views::saved_article_count(self.store.preferences())
    }

    #[wasm_bindgen(js_name = selectedSportCount)]
    pub fn selected_sport_count(&self) -> usize {
        views::selected_sport_count(self.store.preferences())
    }

    #[wasm_bindgen(js_name = selectedTeamCount)]
    pub fn selected_team_count(&self) -> usize {
        views::selected_team_count(self.store.preferences())
    }

    #[wasm_bindgen(js_name = hasHiddenContent)]
    pub fn has_hidden_content(&self) -> bool {
        views::has_hidden_content(self.store.preferences())
    }

    /// Register a callback receiving each new snapshot as a JSON string
    pub fn subscribe(&mut self, callback: js_sys::Function) -> u32 {
        let id = self.store.subscribe(move |prefs: &UserPreferences| {
            let json = match serde_json::to_string(prefs) {
                Ok(json) => json,
                Err(e) => {
                    log::error!("Failed to serialize preferences for observer: {}", e);
                    return;
                }
            };
            if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                log::warn!("Preferences observer threw: {:?}", e);
            }
        });
        id.as_u32()
    }

    pub fn unsubscribe(&mut self, id: u32) -> bool {
        self.store.unsubscribe(SubscriptionId::from_u32(id))
    }
}

impl Default for PreferencesHandle {
    fn default() -> Self {
        Self::new()
    }
}
