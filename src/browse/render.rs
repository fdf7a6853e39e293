//! Plain-text rendering of the search view.

use std::fmt::Write;

use crate::models::Dog;
use crate::search::{MatchOutcome, SearchState};

const NO_RESULTS: &str = "No dogs found. Try a different search.";
const NO_FAVORITES: &str = "Please select some favorite dogs first!";

/// One grid card as a single line.
pub fn render_dog(dog: &Dog, favorite: bool) -> String {
    let heart = if favorite { "[*]" } else { "[ ]" };
    let age = if dog.age > 0 {
        format!("{} years", dog.age)
    } else {
        "N/A".to_string()
    };
    format!(
        "{} {:<22} {:<14} {:<24} {:<9} {}, {} ({})",
        heart,
        dog.id,
        dog.name,
        dog.breed,
        age,
        dog.city.as_deref().unwrap_or("N/A"),
        dog.state.as_deref().unwrap_or("N/A"),
        dog.zip_code,
    )
}

/// The grid, error banner and pagination bar.
pub fn render_view(state: &SearchState) -> String {
    let mut out = String::new();

    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {}", error);
    }

    if state.loading() {
        let _ = writeln!(out, "Loading...");
        return out;
    }

    let dogs = state.visible_dogs();
    if dogs.is_empty() {
        let empty = if state.showing_favorites() {
            NO_FAVORITES
        } else {
            NO_RESULTS
        };
        let _ = writeln!(out, "{}", empty);
    } else {
        for dog in dogs {
            let _ = writeln!(out, "{}", render_dog(dog, state.is_favorite(&dog.id)));
        }
    }

    let _ = writeln!(
        out,
        "{} {} {} of {} {}  ({} favorites)",
        if state.can_go_previous() { "<prev" } else { "     " },
        if state.showing_favorites() {
            "Favorites page"
        } else {
            "Page"
        },
        state.page() + 1,
        state.total_pages(),
        if state.can_go_next() { "next>" } else { "     " },
        state.favorites().len(),
    );
    out
}

/// The match dialog.
pub fn render_match(outcome: &MatchOutcome) -> String {
    match outcome {
        MatchOutcome::Matched(dog) => format!("Your Best Match:\n{}", render_dog(dog, true)),
        other => format!("Your Best Match:\n{}", other.message().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{Action, NO_MATCH_MESSAGE};

    fn dog() -> Dog {
        Dog {
            id: "d1".into(),
            img: String::new(),
            name: "Rex".into(),
            age: 3,
            zip_code: "60601".into(),
            breed: "Poodle".into(),
            city: Some("Chicago".into()),
            state: Some("IL".into()),
        }
    }

    #[test]
    fn test_render_dog() {
        let line = render_dog(&dog(), true);
        assert!(line.starts_with("[*] d1"));
        assert!(line.contains("3 years"));
        assert!(line.contains("Chicago, IL (60601)"));

        let mut unknown = dog();
        unknown.city = None;
        unknown.age = 0;
        let line = render_dog(&unknown, false);
        assert!(line.starts_with("[ ]"));
        assert!(line.contains("N/A, IL"));
    }

    #[test]
    fn test_render_empty_views() {
        let mut state = SearchState::new();
        let view = render_view(&state);
        assert!(view.contains(NO_RESULTS));
        assert!(view.contains("Page 1 of 1"));

        state.reduce(Action::ShowFavorites(true));
        assert!(render_view(&state).contains(NO_FAVORITES));
    }

    #[test]
    fn test_render_match() {
        assert!(render_match(&MatchOutcome::NoMatch).contains(NO_MATCH_MESSAGE));
        assert!(render_match(&MatchOutcome::Matched(dog())).contains("Rex"));
    }
}
