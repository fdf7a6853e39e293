//! Search, filter, pagination and favorites state.
//!
//! All view state lives in [`SearchState`] and changes only through
//! [`SearchState::reduce`]. The reducer never performs I/O; it returns an
//! [`Effect`] telling [`SearchController`] whether a new search is needed.
//!
//! Every search is tagged with a [`RequestToken`]. A finished search is applied
//! only if its token is the most recent one issued, so a slow response can
//! never overwrite the results of a newer request.

mod favorites;
mod fetch;
mod matcher;

pub use favorites::*;
pub use fetch::*;
pub use matcher::*;

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{Dog, FilterChange, FilterCriteria, PAGE_SIZE};

/// Monotonically increasing search sequence number.
pub type RequestToken = u64;

/// Page navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStep {
    Previous,
    Next,
    To(usize),
}

/// Every state transition the view can trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetFilter(FilterChange),
    TogglePage(PageStep),
    ToggleFavorite(Dog),
    SetMatchResult(MatchOutcome),
    DismissMatch,
    ShowFavorites(bool),
    ResetFilters,
    SearchFinished {
        token: RequestToken,
        result: Result<PageResult, ClientError>,
    },
}

/// Follow-up work requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Search,
}

/// A search that has been issued but not yet applied.
#[derive(Debug, Clone)]
pub struct PendingSearch {
    pub token: RequestToken,
    pub criteria: FilterCriteria,
}

/// Total page count for `total` matches, never less than one.
pub fn total_pages_for(total: u64) -> usize {
    (total as usize).div_ceil(PAGE_SIZE).max(1)
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    criteria: FilterCriteria,
    breeds: Vec<String>,
    dogs: Vec<Dog>,
    total_pages: usize,
    favorites: Favorites,
    show_favorites: bool,
    loading: bool,
    error: Option<String>,
    match_result: Option<MatchOutcome>,
    latest_token: RequestToken,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            total_pages: 1,
            ..Default::default()
        }
    }

    /// Apply one action and report whether a search must follow.
    pub fn reduce(&mut self, action: Action) -> Effect {
        match action {
            Action::SetFilter(change) => {
                if !self.criteria.apply(change) {
                    return Effect::None;
                }
                self.remote_refresh()
            }
            Action::TogglePage(step) => {
                let Some(page) = self.target_page(step) else {
                    return Effect::None;
                };
                if page == self.criteria.page {
                    return Effect::None;
                }
                tracing::debug!("Page {} -> {}", self.criteria.page, page);
                self.criteria.page = page;
                self.remote_refresh()
            }
            Action::ToggleFavorite(dog) => {
                self.favorites.toggle(dog);
                if self.show_favorites {
                    let last = self.favorites.page_count().saturating_sub(1);
                    self.criteria.page = self.criteria.page.min(last);
                }
                Effect::None
            }
            Action::SetMatchResult(outcome) => {
                self.match_result = Some(outcome);
                Effect::None
            }
            Action::DismissMatch => {
                self.match_result = None;
                Effect::None
            }
            Action::ShowFavorites(show) => {
                if show == self.show_favorites {
                    return Effect::None;
                }
                self.show_favorites = show;
                self.criteria.page = 0;
                self.error = None;
                self.remote_refresh()
            }
            Action::ResetFilters => {
                self.criteria = FilterCriteria::default();
                self.remote_refresh()
            }
            Action::SearchFinished { token, result } => {
                self.finish_search(token, result);
                Effect::None
            }
        }
    }

    /// Issue a new request token and mark the view as loading.
    pub fn begin_search(&mut self) -> PendingSearch {
        self.latest_token += 1;
        self.loading = true;
        self.error = None;
        PendingSearch {
            token: self.latest_token,
            criteria: self.criteria.clone(),
        }
    }

    fn finish_search(&mut self, token: RequestToken, result: Result<PageResult, ClientError>) {
        if token != self.latest_token {
            tracing::debug!(
                "Discarding stale search response {} (latest {})",
                token,
                self.latest_token
            );
            return;
        }

        self.loading = false;
        match result {
            Ok(page) => {
                tracing::info!(
                    "Loaded {} dogs ({} total matches)",
                    page.dogs.len(),
                    page.total
                );
                self.total_pages = if page.dogs.is_empty() {
                    1
                } else {
                    total_pages_for(page.total)
                };
                self.dogs = page.dogs;
            }
            Err(ClientError::Validation(msg)) => {
                tracing::warn!("Search blocked by validation: {}", msg);
                self.error = Some(msg);
            }
            Err(err) => {
                tracing::warn!("Search failed: {}", err);
                self.error = Some(err.user_message());
                self.dogs.clear();
                self.total_pages = 1;
            }
        }
    }

    fn remote_refresh(&self) -> Effect {
        if self.show_favorites {
            Effect::None
        } else {
            Effect::Search
        }
    }

    fn target_page(&self, step: PageStep) -> Option<usize> {
        let page = self.criteria.page;
        match step {
            PageStep::Previous => page.checked_sub(1),
            PageStep::Next => self.can_go_next().then_some(page + 1),
            PageStep::To(n) => {
                let last = if self.show_favorites {
                    self.favorites.page_count().saturating_sub(1)
                } else {
                    self.total_pages.saturating_sub(1)
                };
                Some(n.min(last))
            }
        }
    }

    pub fn can_go_previous(&self) -> bool {
        self.criteria.page > 0
    }

    pub fn can_go_next(&self) -> bool {
        if self.show_favorites {
            self.criteria.page + 1 < self.favorites.page_count()
        } else {
            self.dogs.len() >= PAGE_SIZE
        }
    }

    /// The dogs the grid shows right now.
    pub fn visible_dogs(&self) -> &[Dog] {
        if self.show_favorites {
            self.favorites.page(self.criteria.page)
        } else {
            &self.dogs
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn page(&self) -> usize {
        self.criteria.page
    }

    pub fn total_pages(&self) -> usize {
        if self.show_favorites {
            self.favorites.page_count().max(1)
        } else {
            self.total_pages
        }
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn showing_favorites(&self) -> bool {
        self.show_favorites
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn match_result(&self) -> Option<&MatchOutcome> {
        self.match_result.as_ref()
    }

    pub fn breeds(&self) -> &[String] {
        &self.breeds
    }

    pub fn set_breeds(&mut self, mut breeds: Vec<String>) {
        breeds.sort();
        self.breeds = breeds;
    }

    /// Breeds starting with `prefix`, ignoring case.
    pub fn suggest_breeds(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.is_empty() {
            return Vec::new();
        }
        self.breeds
            .iter()
            .filter(|b| b.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

/// Drives [`SearchState`] against the adoption service.
pub struct SearchController {
    client: ApiClient,
    state: SearchState,
    enrich_locations: bool,
}

impl SearchController {
    pub fn new(client: ApiClient, enrich_locations: bool) -> Self {
        Self {
            client,
            state: SearchState::new(),
            enrich_locations,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Fetch the breed list once for the breed picker.
    pub async fn load_breeds(&mut self) {
        match self.client.breeds().await {
            Ok(breeds) => {
                tracing::info!("Loaded {} breeds", breeds.len());
                self.state.set_breeds(breeds);
            }
            Err(e) => {
                tracing::error!("Error fetching breeds: {}", e);
                self.state.error = Some("Failed to fetch breeds. Please try again.".to_string());
            }
        }
    }

    /// Apply an action and run the search it calls for, if any.
    pub async fn dispatch(&mut self, action: Action) {
        if self.state.reduce(action) == Effect::Search {
            self.apply_filters().await;
        }
    }

    /// Run the search for the current criteria and apply its result.
    pub async fn apply_filters(&mut self) {
        let pending = self.state.begin_search();
        let result = fetch_page(&self.client, &pending.criteria, self.enrich_locations).await;
        self.state.reduce(Action::SearchFinished {
            token: pending.token,
            result,
        });
    }

    pub async fn set_filter(&mut self, change: FilterChange) {
        self.dispatch(Action::SetFilter(change)).await;
    }

    pub async fn set_page(&mut self, step: PageStep) {
        self.dispatch(Action::TogglePage(step)).await;
    }

    pub async fn reset_filters(&mut self) {
        self.dispatch(Action::ResetFilters).await;
    }

    pub async fn show_favorites(&mut self, show: bool) {
        self.dispatch(Action::ShowFavorites(show)).await;
    }

    pub fn toggle_favorite(&mut self, dog: Dog) {
        self.state.reduce(Action::ToggleFavorite(dog));
    }

    /// Look up a visible dog by id and toggle it.
    pub fn toggle_favorite_by_id(&mut self, id: &str) -> bool {
        let dog = self
            .state
            .visible_dogs()
            .iter()
            .find(|d| d.id == id)
            .or_else(|| self.state.favorites.get(id))
            .cloned();
        match dog {
            Some(dog) => {
                self.toggle_favorite(dog);
                true
            }
            None => false,
        }
    }

    /// Request a best match and store it for display.
    ///
    /// Only [`ClientError::EmptyFavorites`] is returned; transport failures
    /// become a [`MatchOutcome::Failed`] result.
    pub async fn find_match(&mut self) -> Result<(), ClientError> {
        let outcome = match find_match(&self.client, &self.state.favorites).await {
            Ok(outcome) => outcome,
            Err(ClientError::EmptyFavorites) => return Err(ClientError::EmptyFavorites),
            Err(e) => {
                tracing::error!("Error finding match: {}", e);
                MatchOutcome::Failed(MATCH_ERROR_MESSAGE.to_string())
            }
        };
        self.state.reduce(Action::SetMatchResult(outcome));
        Ok(())
    }

    pub fn dismiss_match(&mut self) {
        self.state.reduce(Action::DismissMatch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeRange, SortOrder};

    fn dog(id: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: format!("Dog {}", id),
            age: 4,
            zip_code: "60601".to_string(),
            breed: "Poodle".to_string(),
            city: None,
            state: None,
        }
    }

    fn full_page(prefix: &str) -> PageResult {
        PageResult {
            dogs: (0..PAGE_SIZE).map(|i| dog(&format!("{}{}", prefix, i))).collect(),
            total: 40,
        }
    }

    fn finish(state: &mut SearchState, result: Result<PageResult, ClientError>) {
        let pending = state.begin_search();
        state.reduce(Action::SearchFinished {
            token: pending.token,
            result,
        });
    }

    #[test]
    fn test_previous_never_goes_negative() {
        let mut state = SearchState::new();
        for _ in 0..5 {
            assert_eq!(state.reduce(Action::TogglePage(PageStep::Previous)), Effect::None);
        }
        assert_eq!(state.page(), 0);
        assert!(!state.can_go_previous());
    }

    #[test]
    fn test_next_disabled_on_short_page() {
        let mut state = SearchState::new();
        finish(
            &mut state,
            Ok(PageResult {
                dogs: vec![dog("a"), dog("b")],
                total: 2,
            }),
        );
        assert!(!state.can_go_next());
        assert_eq!(state.reduce(Action::TogglePage(PageStep::Next)), Effect::None);

        finish(&mut state, Ok(full_page("p")));
        assert!(state.can_go_next());
        assert_eq!(state.reduce(Action::TogglePage(PageStep::Next)), Effect::Search);
        assert_eq!(state.page(), 1);
        assert_eq!(state.reduce(Action::TogglePage(PageStep::Previous)), Effect::Search);
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_page_jump_is_clamped() {
        let mut state = SearchState::new();
        finish(&mut state, Ok(full_page("p")));
        assert_eq!(state.total_pages(), 5);

        state.reduce(Action::TogglePage(PageStep::To(99)));
        assert_eq!(state.page(), 4);
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages_for(0), 1);
        assert_eq!(total_pages_for(8), 1);
        assert_eq!(total_pages_for(9), 2);
        assert_eq!(total_pages_for(17), 3);
    }

    #[test]
    fn test_zero_results_yield_single_empty_page() {
        let mut state = SearchState::new();
        finish(&mut state, Ok(full_page("p")));
        finish(&mut state, Ok(PageResult::default()));
        assert!(state.visible_dogs().is_empty());
        assert_eq!(state.total_pages(), 1);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let mut state = SearchState::new();
        let first = state.begin_search();
        let second = state.begin_search();

        state.reduce(Action::SearchFinished {
            token: second.token,
            result: Ok(PageResult {
                dogs: vec![dog("new")],
                total: 1,
            }),
        });
        state.reduce(Action::SearchFinished {
            token: first.token,
            result: Ok(PageResult {
                dogs: vec![dog("old")],
                total: 1,
            }),
        });

        assert_eq!(state.visible_dogs()[0].id, "new");
        assert!(!state.loading());
    }

    #[test]
    fn test_stale_failure_does_not_clear_newer_results() {
        let mut state = SearchState::new();
        let first = state.begin_search();
        let second = state.begin_search();
        state.reduce(Action::SearchFinished {
            token: second.token,
            result: Ok(full_page("p")),
        });
        state.reduce(Action::SearchFinished {
            token: first.token,
            result: Err(ClientError::Transport("timeout".into())),
        });
        assert_eq!(state.visible_dogs().len(), PAGE_SIZE);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_transport_error_clears_page() {
        let mut state = SearchState::new();
        finish(&mut state, Ok(full_page("p")));
        finish(&mut state, Err(ClientError::Transport("refused".into())));
        assert!(state.visible_dogs().is_empty());
        assert_eq!(state.total_pages(), 1);
        assert!(state.error().unwrap().contains("try again"));
    }

    #[test]
    fn test_validation_error_keeps_page() {
        let mut state = SearchState::new();
        finish(&mut state, Ok(full_page("p")));
        finish(
            &mut state,
            Err(ClientError::Validation("Invalid zip code.".into())),
        );
        assert_eq!(state.visible_dogs().len(), PAGE_SIZE);
        assert_eq!(state.error(), Some("Invalid zip code."));
    }

    #[tokio::test]
    async fn test_overlong_zip_shows_validation_error() {
        // Nothing listens here; reaching the network would turn this into a
        // transport error instead.
        let client = ApiClient::new(reqwest::Client::new(), "http://127.0.0.1:9");
        let mut controller = SearchController::new(client, false);

        for bad in ["606011", "60601-1234", "12ab"] {
            controller
                .set_filter(FilterChange::ZipCode(bad.into()))
                .await;
            assert_eq!(controller.state().criteria().zip_code, bad);
            assert_eq!(
                controller.state().error(),
                Some("Invalid zip code. Please enter a 5-digit zip code.")
            );
            assert!(!controller.state().loading());
        }
    }

    #[test]
    fn test_filter_change_triggers_search_and_reset_restores_defaults() {
        let mut state = SearchState::new();
        assert_eq!(
            state.reduce(Action::SetFilter(FilterChange::Breed(Some("Poodle".into())))),
            Effect::Search
        );
        state.reduce(Action::SetFilter(FilterChange::AgeRange(AgeRange::new(2, 5))));
        state.reduce(Action::SetFilter(FilterChange::Sort(SortOrder::BreedDesc)));

        assert_eq!(state.reduce(Action::ResetFilters), Effect::Search);
        assert_eq!(*state.criteria(), FilterCriteria::default());
    }

    #[test]
    fn test_favorites_mode_is_local() {
        let mut state = SearchState::new();
        for i in 0..10 {
            state.reduce(Action::ToggleFavorite(dog(&i.to_string())));
        }

        assert_eq!(state.reduce(Action::ShowFavorites(true)), Effect::None);
        assert_eq!(state.visible_dogs().len(), PAGE_SIZE);
        assert_eq!(state.total_pages(), 2);
        assert!(state.can_go_next());

        assert_eq!(state.reduce(Action::TogglePage(PageStep::Next)), Effect::None);
        assert_eq!(state.visible_dogs().len(), 2);
        assert!(!state.can_go_next());

        // Filters are remembered but not fetched while favorites are shown.
        assert_eq!(
            state.reduce(Action::SetFilter(FilterChange::City("Austin".into()))),
            Effect::None
        );

        assert_eq!(state.reduce(Action::ShowFavorites(false)), Effect::Search);
        assert_eq!(state.page(), 0);
    }

    #[test]
    fn test_unfavoriting_last_item_pulls_page_back() {
        let mut state = SearchState::new();
        for i in 0..9 {
            state.reduce(Action::ToggleFavorite(dog(&i.to_string())));
        }
        state.reduce(Action::ShowFavorites(true));
        state.reduce(Action::TogglePage(PageStep::Next));
        assert_eq!(state.page(), 1);

        state.reduce(Action::ToggleFavorite(dog("8")));
        assert_eq!(state.page(), 0);
        assert_eq!(state.visible_dogs().len(), PAGE_SIZE);
    }

    #[test]
    fn test_match_result_set_and_dismissed() {
        let mut state = SearchState::new();
        state.reduce(Action::SetMatchResult(MatchOutcome::NoMatch));
        assert_eq!(
            state.match_result().and_then(|m| m.message()),
            Some(NO_MATCH_MESSAGE)
        );
        state.reduce(Action::DismissMatch);
        assert!(state.match_result().is_none());
    }

    #[test]
    fn test_breed_suggestions() {
        let mut state = SearchState::new();
        state.set_breeds(vec![
            "Poodle".into(),
            "Beagle".into(),
            "Pug".into(),
            "Boxer".into(),
        ]);
        assert_eq!(state.breeds()[0], "Beagle");
        assert_eq!(state.suggest_breeds("p"), vec!["Poodle", "Pug"]);
        assert_eq!(state.suggest_breeds("BO"), vec!["Boxer"]);
        assert!(state.suggest_breeds("").is_empty());
    }
}
