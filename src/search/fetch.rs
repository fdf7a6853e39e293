//! One search round trip: zip resolution, id search, detail fetch, enrichment.

use std::collections::HashMap;

use crate::client::ApiClient;
use crate::errors::ClientError;
use crate::models::{Dog, FilterCriteria, Location, ZipFilter};

/// A page of dogs and the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PageResult {
    pub dogs: Vec<Dog>,
    pub total: u64,
}

/// Fetch the page described by `criteria`.
///
/// Validation happens before the first request, so a malformed zip code never
/// reaches the network. Requests run strictly in sequence.
pub async fn fetch_page(
    client: &ApiClient,
    criteria: &FilterCriteria,
    enrich_locations: bool,
) -> Result<PageResult, ClientError> {
    let zip_codes = match criteria.zip_filter()? {
        ZipFilter::Any => Vec::new(),
        ZipFilter::Exact(zip) => vec![zip],
        ZipFilter::ByLocation(query) => {
            let found = client.search_locations(&query).await?;
            if found.results.is_empty() {
                return Err(ClientError::NoLocationMatch);
            }
            found.results.into_iter().map(|l| l.zip_code).collect()
        }
    };

    let search = client
        .search_dogs(&criteria.search_params(&zip_codes))
        .await?;

    if search.result_ids.is_empty() {
        return Ok(PageResult::default());
    }

    let dogs = order_like(client.fetch_dogs(&search.result_ids).await?, &search.result_ids);

    let dogs = if enrich_locations {
        with_locations(client, dogs).await?
    } else {
        dogs
    };

    Ok(PageResult {
        dogs,
        total: search.total,
    })
}

/// Put fetched records back into search order; unknown ids sort last.
fn order_like(mut dogs: Vec<Dog>, ids: &[String]) -> Vec<Dog> {
    let rank: HashMap<&str, usize> = ids
        .iter()
        .enumerate()
        .map(|(i, id)| (id.as_str(), i))
        .collect();
    dogs.sort_by_key(|d| rank.get(d.id.as_str()).copied().unwrap_or(usize::MAX));
    dogs
}

async fn with_locations(client: &ApiClient, dogs: Vec<Dog>) -> Result<Vec<Dog>, ClientError> {
    let mut zip_codes: Vec<String> = Vec::new();
    for dog in &dogs {
        if !zip_codes.contains(&dog.zip_code) {
            zip_codes.push(dog.zip_code.clone());
        }
    }

    let locations = client.lookup_locations(&zip_codes).await?;
    let by_zip: HashMap<&str, &Location> = locations
        .iter()
        .flatten()
        .map(|l| (l.zip_code.as_str(), l))
        .collect();

    Ok(dogs
        .into_iter()
        .map(|dog| {
            let location = by_zip.get(dog.zip_code.as_str()).copied();
            match location {
                Some(location) => dog.with_location(location),
                None => dog,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: String::new(),
            name: id.to_uppercase(),
            age: 1,
            zip_code: "10001".to_string(),
            breed: "Pug".to_string(),
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_order_like_follows_search_order() {
        let ids = vec!["c".to_string(), "a".to_string(), "b".to_string()];
        let ordered = order_like(vec![dog("a"), dog("x"), dog("b"), dog("c")], &ids);
        let got: Vec<&str> = ordered.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(got, vec!["c", "a", "b", "x"]);
    }
}
