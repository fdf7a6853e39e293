//! In-memory favorites set keyed by dog identifier.

use crate::models::{Dog, PAGE_SIZE};

/// Favorited dogs in insertion order. Never holds two records with one id.
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    dogs: Vec<Dog>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the dog if present, otherwise append it.
    ///
    /// Returns whether the dog is a favorite afterwards.
    pub fn toggle(&mut self, dog: Dog) -> bool {
        if let Some(pos) = self.position(&dog.id) {
            self.dogs.remove(pos);
            false
        } else {
            self.dogs.push(dog);
            true
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&Dog> {
        self.dogs.iter().find(|d| d.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.dogs.iter().map(|d| d.id.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.dogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dogs.is_empty()
    }

    /// Number of `PAGE_SIZE` slices; zero when empty.
    pub fn page_count(&self) -> usize {
        self.dogs.len().div_ceil(PAGE_SIZE)
    }

    /// The dogs shown on `page` (zero-based). Empty past the end.
    pub fn page(&self, page: usize) -> &[Dog] {
        let start = (page * PAGE_SIZE).min(self.dogs.len());
        let end = (start + PAGE_SIZE).min(self.dogs.len());
        &self.dogs[start..end]
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.dogs.iter().position(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dog(id: &str) -> Dog {
        Dog {
            id: id.to_string(),
            img: format!("https://img.example/{}.jpg", id),
            name: format!("Dog {}", id),
            age: 2,
            zip_code: "60601".to_string(),
            breed: "Beagle".to_string(),
            city: None,
            state: None,
        }
    }

    #[test]
    fn test_double_toggle_restores_membership() {
        let mut favorites = Favorites::new();
        favorites.toggle(dog("a"));

        assert!(favorites.toggle(dog("b")));
        assert!(!favorites.toggle(dog("b")));

        assert_eq!(favorites.ids(), vec!["a"]);
        assert!(!favorites.contains("b"));
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut favorites = Favorites::new();
        favorites.toggle(dog("a"));
        favorites.toggle(dog("a"));
        favorites.toggle(dog("a"));
        assert_eq!(favorites.len(), 1);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut favorites = Favorites::new();
        for id in ["c", "a", "b"] {
            favorites.toggle(dog(id));
        }
        favorites.toggle(dog("a"));
        favorites.toggle(dog("a"));
        assert_eq!(favorites.ids(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_paging() {
        let mut favorites = Favorites::new();
        assert_eq!(favorites.page_count(), 0);
        assert!(favorites.page(0).is_empty());

        for i in 0..10 {
            favorites.toggle(dog(&i.to_string()));
        }
        assert_eq!(favorites.page_count(), 2);
        assert_eq!(favorites.page(0).len(), 8);
        assert_eq!(favorites.page(1).len(), 2);
        assert_eq!(favorites.page(1)[0].id, "8");
        assert!(favorites.page(5).is_empty());
    }
}
