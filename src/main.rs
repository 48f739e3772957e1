//! Sportsfeed preferences entry point
//!
//! On the web the library's start hook does the setup. Natively this prints
//! the preferences stored in a data directory, which is handy for checking
//! what the app persisted.

#[cfg(not(target_arch = "wasm32"))]
use clap::Parser;

/// Show the stored sports feed preferences
#[cfg(not(target_arch = "wasm32"))]
#[derive(Parser, Debug)]
#[command(name = "sportsfeed-prefs", version, about)]
struct Args {
    /// Directory holding the preference files [default: platform data dir]
    #[arg(env = "SPORTSFEED_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sportsfeed_prefs::storage::file::default_dir;
    use sportsfeed_prefs::views;
    use sportsfeed_prefs::{Catalog, FileStorage, PreferenceStore};

    env_logger::init();
    let args = Args::parse();

    let Some(dir) = args.data_dir.or_else(default_dir) else {
        eprintln!("Could not determine a data directory. Pass one or set SPORTSFEED_DATA_DIR.");
        std::process::exit(2);
    };
    log::info!("Reading preferences from {}", dir.display());

    let store = PreferenceStore::new(FileStorage::new(dir));
    let catalog = Catalog::builtin();
    let prefs = store.preferences();

    let sport_name = |id: &str| {
        catalog
            .sport(id)
            .map(|s| s.name.clone())
            .unwrap_or_else(|| id.to_string())
    };
    let team_name = |id: &str| {
        catalog
            .team(id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| id.to_string())
    };

    println!("Onboarding complete: {}", prefs.onboarding_completed);
    println!("Notifications:       {}", prefs.notifications_enabled);
    println!("AI enhancements:     {}", prefs.ai_enhancements_enabled);

    println!("\nSports ({}):", views::selected_sport_count(prefs));
    for id in &prefs.selected_sports {
        let hidden = if prefs.is_sport_hidden(id) { " (hidden)" } else { "" };
        println!("  {}{}", sport_name(id), hidden);
    }

    println!("\nTeams ({}):", views::selected_team_count(prefs));
    for id in &prefs.selected_teams {
        let hidden = if prefs.is_team_hidden(id) { " (hidden)" } else { "" };
        println!("  {}{}", team_name(id), hidden);
    }
    for team in views::selected_teams_outside_selected_sports(prefs, &catalog.teams) {
        log::warn!("{} is followed but {} is not selected", team.name, sport_name(&team.sport));
    }

    if views::has_hidden_content(prefs) {
        println!(
            "\nHidden: {} sports, {} teams",
            views::hidden_sport_count(prefs),
            views::hidden_team_count(prefs)
        );
    }
    println!("\nSaved articles: {}", views::saved_article_count(prefs));
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::path::PathBuf;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_data_dir_argument() {
        let args = Args::try_parse_from(["sportsfeed-prefs", "/srv/prefs"]).unwrap();
        assert_eq!(args.data_dir, Some(PathBuf::from("/srv/prefs")));
    }

    #[test]
    fn test_rejects_extra_arguments() {
        assert!(Args::try_parse_from(["sportsfeed-prefs", "a", "b"]).is_err());
    }
}
