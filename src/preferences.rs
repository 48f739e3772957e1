//! User preferences and personalization state
//!
//! Persisted as a single versioned JSON record under one storage key.

use serde::{Deserialize, Serialize};

use crate::consts::SCHEMA_VERSION;
use crate::error::{PreferencesError, Result};
use crate::ids::IdSet;

/// Everything the app knows about what the user wants to see
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPreferences {
    // === Interests ===
    /// Sports picked during onboarding or in settings
    pub selected_sports: IdSet,
    /// Teams followed. May still hold teams whose sport was deselected.
    pub selected_teams: IdSet,

    // === Feed exclusions ===
    /// Sports excluded from the feed (may also be selected)
    pub hidden_sports: IdSet,
    /// Teams excluded from the feed (may also be selected)
    pub hidden_teams: IdSet,

    // === Bookmarks ===
    /// Saved article ids, oldest first
    pub saved_articles: IdSet,

    // === Switches ===
    /// Push notifications for breaking news
    pub notifications_enabled: bool,
    /// AI-generated insights on articles
    pub ai_enhancements_enabled: bool,
    /// Onboarding finished (or skipped)
    pub onboarding_completed: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            selected_sports: IdSet::new(),
            selected_teams: IdSet::new(),
            hidden_sports: IdSet::new(),
            hidden_teams: IdSet::new(),
            saved_articles: IdSet::new(),

            // Switches are on until the user opts out
            notifications_enabled: true,
            ai_enhancements_enabled: true,

            onboarding_completed: false,
        }
    }
}

impl UserPreferences {
    pub fn is_sport_selected(&self, id: &str) -> bool {
        self.selected_sports.contains(id)
    }

    pub fn is_team_selected(&self, id: &str) -> bool {
        self.selected_teams.contains(id)
    }

    pub fn is_sport_hidden(&self, id: &str) -> bool {
        self.hidden_sports.contains(id)
    }

    pub fn is_team_hidden(&self, id: &str) -> bool {
        self.hidden_teams.contains(id)
    }

    pub fn is_article_saved(&self, id: &str) -> bool {
        self.saved_articles.contains(id)
    }

    /// Serialize to the persisted record (current schema version)
    pub fn to_json(&self) -> Result<String> {
        let record = PersistedRef {
            version: SCHEMA_VERSION,
            prefs: self,
        };
        serde_json::to_string(&record).map_err(PreferencesError::Serialize)
    }

    /// Parse a persisted record, migrating older versions
    ///
    /// Records without a `version` field predate versioning and are read as
    /// version 0. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: PersistedOwned = serde_json::from_str(json)
            .map_err(|e| PreferencesError::MalformedPersistedData(e.to_string()))?;
        migrate(record.version, record.prefs)
    }
}

/// Persisted record, borrowed for writing
#[derive(Serialize)]
struct PersistedRef<'a> {
    version: u32,
    #[serde(flatten)]
    prefs: &'a UserPreferences,
}

/// Persisted record, owned for reading
#[derive(Deserialize)]
struct PersistedOwned {
    #[serde(default)]
    version: u32,
    #[serde(flatten)]
    prefs: UserPreferences,
}

fn migrate(version: u32, prefs: UserPreferences) -> Result<UserPreferences> {
    match version {
        // Unversioned records share the v1 field layout
        0 => {
            log::info!("Migrating unversioned preferences to v{}", SCHEMA_VERSION);
            Ok(prefs)
        }
        SCHEMA_VERSION => Ok(prefs),
        found => Err(PreferencesError::UnsupportedVersion {
            found,
            supported: SCHEMA_VERSION,
        }),
    }
}
