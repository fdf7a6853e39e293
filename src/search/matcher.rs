//! Best-match requests over the favorites set.

use super::Favorites;
use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::Dog;

pub const NO_MATCH_MESSAGE: &str = "No perfect match found, but keep looking!";
pub const MATCH_ERROR_MESSAGE: &str = "An error occurred while finding a match.";

/// What the match dialog shows.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// The favorited record the service picked.
    Matched(Dog),
    NoMatch,
    Failed(String),
}

impl MatchOutcome {
    /// Text for outcomes that are not a dog record.
    pub fn message(&self) -> Option<&str> {
        match self {
            MatchOutcome::Matched(_) => None,
            MatchOutcome::NoMatch => Some(NO_MATCH_MESSAGE),
            MatchOutcome::Failed(msg) => Some(msg),
        }
    }
}

/// Ask the adoption service to pick one of the favorites.
///
/// An empty set fails with [`ClientError::EmptyFavorites`] before any request
/// is made. The returned identifier is resolved against `favorites`, never
/// re-fetched.
pub async fn find_match(
    client: &ApiClient,
    favorites: &Favorites,
) -> Result<MatchOutcome, ClientError> {
    if favorites.is_empty() {
        return Err(ClientError::EmptyFavorites);
    }

    let response = client.match_dogs(&favorites.ids()).await?;

    let Some(id) = response.matched else {
        tracing::info!("Match service returned no match");
        return Ok(MatchOutcome::NoMatch);
    };

    match favorites.get(&id) {
        Some(dog) => {
            tracing::info!("Matched favorite {} ({})", dog.name, dog.id);
            Ok(MatchOutcome::Matched(dog.clone()))
        }
        None => {
            tracing::warn!("Match service returned {} which is not a favorite", id);
            Ok(MatchOutcome::NoMatch)
        }
    }
}
