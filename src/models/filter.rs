//! Search filter criteria and the rules for turning them into a request.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::ClientError;
use crate::models::LocationSearchRequest;

/// Number of dogs per result page, for both remote search and favorites.
pub const PAGE_SIZE: usize = 8;

/// Youngest age the age filter accepts.
pub const MIN_AGE: u32 = 0;
/// Oldest age the age filter accepts.
pub const MAX_AGE: u32 = 20;

static ZIP_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{5}$").expect("Invalid zip regex"));

/// True when `value` is a complete 5-digit zip code.
pub fn is_valid_zip(value: &str) -> bool {
    ZIP_REGEX.is_match(value)
}

/// Upper-case a state filter and keep at most two characters.
pub fn normalize_state(value: &str) -> String {
    value.trim().to_uppercase().chars().take(2).collect()
}

/// Sort direction on the breed field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    BreedAsc,
    BreedDesc,
}

impl SortOrder {
    /// Wire form used by the search endpoint (`field:direction`).
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::BreedAsc => "breed:asc",
            SortOrder::BreedDesc => "breed:desc",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "breed:asc" | "asc" | "a-z" => Some(SortOrder::BreedAsc),
            "breed:desc" | "desc" | "z-a" => Some(SortOrder::BreedDesc),
            _ => None,
        }
    }
}

/// Inclusive age bounds, always within `[MIN_AGE, MAX_AGE]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    min: u32,
    max: u32,
}

impl AgeRange {
    /// Build a range, clamping both ends into bounds and swapping if reversed.
    pub fn new(a: u32, b: u32) -> Self {
        let a = a.clamp(MIN_AGE, MAX_AGE);
        let b = b.clamp(MIN_AGE, MAX_AGE);
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: MIN_AGE,
            max: MAX_AGE,
        }
    }
}

/// How the zip-code list of a search is obtained.
#[derive(Debug, Clone, PartialEq)]
pub enum ZipFilter {
    /// No location filter.
    Any,
    /// A single validated zip code.
    Exact(String),
    /// Zip codes must be resolved from a city and/or state first.
    ByLocation(LocationSearchRequest),
}

/// A single edit to the filter panel.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterChange {
    Breed(Option<String>),
    ZipCode(String),
    City(String),
    State(String),
    AgeRange(AgeRange),
    Sort(SortOrder),
}

/// Everything the user can filter on, plus the current page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FilterCriteria {
    pub breed: Option<String>,
    pub zip_code: String,
    pub city: String,
    pub state: String,
    pub age_range: AgeRange,
    pub sort: SortOrder,
    pub page: usize,
}

impl FilterCriteria {
    /// Apply an edit. Returns `false` when the edit changed nothing.
    ///
    /// Any accepted edit moves back to the first page.
    pub fn apply(&mut self, change: FilterChange) -> bool {
        let before = self.clone();
        match change {
            FilterChange::Breed(breed) => {
                self.breed = breed.map(|b| b.trim().to_string()).filter(|b| !b.is_empty());
            }
            // Stored as typed; `zip_filter` rejects malformed values.
            FilterChange::ZipCode(zip) => self.zip_code = zip.trim().to_string(),
            FilterChange::City(city) => self.city = city.trim().to_string(),
            FilterChange::State(state) => self.state = normalize_state(&state),
            FilterChange::AgeRange(range) => self.age_range = range,
            FilterChange::Sort(sort) => self.sort = sort,
        }
        if *self == before {
            return false;
        }
        self.page = 0;
        true
    }

    /// Decide how zip codes are obtained. Fails on a malformed zip code.
    pub fn zip_filter(&self) -> Result<ZipFilter, ClientError> {
        if !self.zip_code.is_empty() {
            if !is_valid_zip(&self.zip_code) {
                return Err(ClientError::Validation(
                    "Invalid zip code. Please enter a 5-digit zip code.".to_string(),
                ));
            }
            return Ok(ZipFilter::Exact(self.zip_code.clone()));
        }

        if self.city.is_empty() && self.state.is_empty() {
            return Ok(ZipFilter::Any);
        }

        Ok(ZipFilter::ByLocation(LocationSearchRequest {
            city: Some(self.city.clone()).filter(|c| !c.is_empty()),
            states: Some(vec![self.state.clone()]).filter(|_| !self.state.is_empty()),
        }))
    }

    /// Query parameters for `GET /dogs/search`.
    pub fn search_params(&self, zip_codes: &[String]) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(breed) = &self.breed {
            params.push(("breeds", breed.clone()));
        }
        for zip in zip_codes {
            params.push(("zipCodes", zip.clone()));
        }
        params.push(("ageMin", self.age_range.min().to_string()));
        params.push(("ageMax", self.age_range.max().to_string()));
        params.push(("sort", self.sort.as_str().to_string()));
        params.push(("from", (self.page * PAGE_SIZE).to_string()));
        params.push(("size", PAGE_SIZE.to_string()));
        params
    }
}
