//! Reference data: sports, teams, articles, live matches
//!
//! The store never fetches or validates against this data; it is handed to
//! the view helpers by whoever owns the content.

use serde::{Deserialize, Serialize};

use crate::ids::{ArticleId, SportId, TeamId};

/// A top-level sport category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sport {
    pub id: SportId,
    pub name: String,
    /// Emoji shown on selection tiles
    #[serde(default)]
    pub icon: String,
}

/// A team, belonging to exactly one sport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub sport: SportId,
    #[serde(default)]
    pub logo: String,
}

/// A feed article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    pub sport: SportId,
    /// Primary team, if the article is about one
    #[serde(default)]
    pub team: Option<TeamId>,
    #[serde(default)]
    pub trending: bool,
}

/// One side of a live match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSide {
    pub team: TeamId,
    pub name: String,
    pub score: u32,
}

/// A match currently in progress
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveMatch {
    pub id: String,
    pub sport: SportId,
    pub home: MatchSide,
    pub away: MatchSide,
    /// e.g. "Q3", "2nd Half"
    pub status: String,
    /// Game clock, e.g. "5:42"
    pub time: String,
}

/// Full list of sports and teams, loaded once at startup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub sports: Vec<Sport>,
    pub teams: Vec<Team>,
}

impl Sport {
    pub fn new(id: &str, name: &str, icon: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
        }
    }
}

impl Team {
    pub fn new(id: &str, name: &str, sport: &str, logo: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            sport: sport.to_string(),
            logo: logo.to_string(),
        }
    }
}

impl Catalog {
    /// Catalog shipped with the app
    pub fn builtin() -> Self {
        Self {
            sports: vec![
                Sport::new("nba", "Basketball", "🏀"),
                Sport::new("nfl", "Football", "🏈"),
                Sport::new("soccer", "Soccer", "⚽"),
                Sport::new("mlb", "Baseball", "⚾"),
                Sport::new("nhl", "Hockey", "🏒"),
                Sport::new("tennis", "Tennis", "🎾"),
            ],
            teams: vec![
                Team::new("lakers", "Los Angeles Lakers", "nba", "💜"),
                Team::new("warriors", "Golden State Warriors", "nba", "💛"),
                Team::new("celtics", "Boston Celtics", "nba", "☘️"),
                Team::new("cowboys", "Dallas Cowboys", "nfl", "⭐"),
                Team::new("chiefs", "Kansas City Chiefs", "nfl", "🏹"),
                Team::new("eagles", "Philadelphia Eagles", "nfl", "🦅"),
                Team::new("real-madrid", "Real Madrid", "soccer", "👑"),
                Team::new("man-united", "Manchester United", "soccer", "👹"),
                Team::new("barcelona", "FC Barcelona", "soccer", "🔵"),
                Team::new("yankees", "New York Yankees", "mlb", "🗽"),
                Team::new("dodgers", "Los Angeles Dodgers", "mlb", "🔷"),
                Team::new("maple-leafs", "Toronto Maple Leafs", "nhl", "🍁"),
                Team::new("rangers", "New York Rangers", "nhl", "🗽"),
            ],
        }
    }

    /// Parse a catalog supplied by a content provider
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn sport(&self, id: &str) -> Option<&Sport> {
        self.sports.iter().find(|s| s.id == id)
    }

    pub fn team(&self, id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    /// Teams of one sport, in catalog order
    pub fn teams_for_sport<'a>(&'a self, sport: &'a str) -> impl Iterator<Item = &'a Team> + 'a {
        self.teams.iter().filter(move |t| t.sport == sport)
    }
}
