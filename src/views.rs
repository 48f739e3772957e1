//! Derived views over preferences
//!
//! Pure functions; safe to call on every render. Input order is always
//! preserved, ranking happens upstream.

use crate::catalog::{Article, LiveMatch, Team};
use crate::consts::{MAX_ONBOARDING_TEAMS, MIN_ONBOARDING_SPORTS, MIN_ONBOARDING_TEAMS};
use crate::ids::SportId;
use crate::preferences::UserPreferences;

/// Quick filters above the feed
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FeedFilter {
    #[default]
    All,
    /// Articles about selected sports or followed teams
    ForYou,
    Trending,
    /// Bookmarked articles
    Saved,
    /// One sport from the filter bar
    Sport(SportId),
}

/// Teams whose sport is selected, in catalog order
pub fn available_teams<'a>(prefs: &UserPreferences, all_teams: &'a [Team]) -> Vec<&'a Team> {
    all_teams
        .iter()
        .filter(|t| prefs.is_sport_selected(&t.sport))
        .collect()
}

/// Followed teams whose sport is no longer selected
///
/// Deselecting a sport leaves its teams in the selection; this surfaces them.
pub fn selected_teams_outside_selected_sports<'a>(
    prefs: &UserPreferences,
    all_teams: &'a [Team],
) -> Vec<&'a Team> {
    all_teams
        .iter()
        .filter(|t| prefs.is_team_selected(&t.id) && !prefs.is_sport_selected(&t.sport))
        .collect()
}

fn is_article_visible(prefs: &UserPreferences, article: &Article) -> bool {
    if prefs.is_sport_hidden(&article.sport) {
        return false;
    }
    match &article.team {
        Some(team) => !prefs.is_team_hidden(team),
        None => true,
    }
}

/// Articles not excluded by a hidden sport or hidden primary team
pub fn visible_articles<'a>(prefs: &UserPreferences, all_articles: &'a [Article]) -> Vec<&'a Article> {
    all_articles
        .iter()
        .filter(|a| is_article_visible(prefs, a))
        .collect()
}

/// Visible articles narrowed by a quick filter
pub fn filter_feed<'a>(
    prefs: &UserPreferences,
    articles: &'a [Article],
    filter: &FeedFilter,
) -> Vec<&'a Article> {
    articles
        .iter()
        .filter(|a| is_article_visible(prefs, a))
        .filter(|a| match filter {
            FeedFilter::All => true,
            FeedFilter::ForYou => {
                prefs.is_sport_selected(&a.sport)
                    || a.team.as_deref().is_some_and(|t| prefs.is_team_selected(t))
            }
            FeedFilter::Trending => a.trending,
            FeedFilter::Saved => prefs.is_article_saved(&a.id),
            FeedFilter::Sport(sport) => a.sport == *sport,
        })
        .collect()
}

/// Bookmarked articles, most recently saved first
///
/// Saved ids with no matching article are skipped.
pub fn saved_articles<'a>(prefs: &UserPreferences, all_articles: &'a [Article]) -> Vec<&'a Article> {
    prefs
        .saved_articles
        .iter()
        .rev()
        .filter_map(|id| all_articles.iter().find(|a| a.id == id))
        .collect()
}

/// Case-insensitive match on title or excerpt. Empty query matches all.
pub fn search_articles<'a>(articles: &'a [Article], query: &str) -> Vec<&'a Article> {
    let query = query.trim().to_lowercase();
    articles
        .iter()
        .filter(|a| {
            query.is_empty()
                || a.title.to_lowercase().contains(&query)
                || a.excerpt.to_lowercase().contains(&query)
        })
        .collect()
}

/// Case-insensitive match on team name. Empty query matches all.
pub fn search_teams<'a>(teams: &'a [Team], query: &str) -> Vec<&'a Team> {
    let query = query.trim().to_lowercase();
    teams
        .iter()
        .filter(|t| query.is_empty() || t.name.to_lowercase().contains(&query))
        .collect()
}

/// Live matches not involving a hidden sport or hidden team
pub fn visible_live_matches<'a>(prefs: &UserPreferences, matches: &'a [LiveMatch]) -> Vec<&'a LiveMatch> {
    matches
        .iter()
        .filter(|m| {
            !prefs.is_sport_hidden(&m.sport)
                && !prefs.is_team_hidden(&m.home.team)
                && !prefs.is_team_hidden(&m.away.team)
        })
        .collect()
}

pub fn saved_article_count(prefs: &UserPreferences) -> usize {
    prefs.saved_articles.len()
}

pub fn selected_sport_count(prefs: &UserPreferences) -> usize {
    prefs.selected_sports.len()
}

pub fn selected_team_count(prefs: &UserPreferences) -> usize {
    prefs.selected_teams.len()
}

pub fn hidden_sport_count(prefs: &UserPreferences) -> usize {
    prefs.hidden_sports.len()
}

pub fn hidden_team_count(prefs: &UserPreferences) -> usize {
    prefs.hidden_teams.len()
}

/// Anything hidden at all (drives the "no hidden content" empty state)
pub fn has_hidden_content(prefs: &UserPreferences) -> bool {
    !prefs.hidden_sports.is_empty() || !prefs.hidden_teams.is_empty()
}

/// Onboarding may leave the sport picker
pub fn can_complete_sport_selection(prefs: &UserPreferences) -> bool {
    prefs.selected_sports.len() >= MIN_ONBOARDING_SPORTS
}

/// Team picker count is within the onboarding range
pub fn team_selection_within_limits(prefs: &UserPreferences) -> bool {
    (MIN_ONBOARDING_TEAMS..=MAX_ONBOARDING_TEAMS).contains(&prefs.selected_teams.len())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::ids::IdSet;
    use proptest::prelude::*;

    fn sport_ids() -> impl Strategy<Value = IdSet> {
        prop::collection::vec(
            prop::sample::select(vec!["nba", "nfl", "soccer", "mlb", "nhl", "tennis", "f1"]),
            0..7,
        )
        .prop_map(|ids| ids.into_iter().collect())
    }

    proptest! {
        #[test]
        fn available_teams_only_from_selected_sports(sports in sport_ids(), teams in sport_ids()) {
            let catalog = Catalog::builtin();
            let prefs = UserPreferences {
                selected_sports: sports,
                // Arbitrary, possibly stale, team selection must not matter
                selected_teams: teams,
                ..Default::default()
            };
            let available = available_teams(&prefs, &catalog.teams);
            prop_assert!(available.iter().all(|t| prefs.selected_sports.contains(&t.sport)));
            let expected = catalog.teams.iter().filter(|t| prefs.selected_sports.contains(&t.sport)).count();
            prop_assert_eq!(available.len(), expected);
        }

        #[test]
        fn views_are_deterministic(hidden in sport_ids()) {
            let articles = vec![
                Article { id: "x".into(), title: "X".into(), excerpt: String::new(), sport: "nba".into(), team: None, trending: false },
                Article { id: "y".into(), title: "Y".into(), excerpt: String::new(), sport: "nfl".into(), team: None, trending: true },
            ];
            let prefs = UserPreferences { hidden_sports: hidden, ..Default::default() };
            prop_assert_eq!(visible_articles(&prefs, &articles), visible_articles(&prefs, &articles));
            prop_assert!(visible_articles(&prefs, &articles).iter().all(|a| !prefs.hidden_sports.contains(&a.sport)));
        }
    }
}
