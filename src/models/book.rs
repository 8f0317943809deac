//! Book model and catalog query

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::AppResult;

/// Category value that matches every book
pub const ALL_CATEGORIES: &str = "Semua";

const BUNDLED_CATALOG: &str = include_str!("../../data/books.json");

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Cover image URI
    pub cover: String,
    pub description: String,
    pub category: String,
    pub isbn: String,
    pub publish_year: i32,
    pub available: bool,
}

impl Book {
    /// Parse the catalog bundled with the crate
    pub fn bundled() -> AppResult<Vec<Book>> {
        Ok(serde_json::from_str(BUNDLED_CATALOG)?)
    }
}

/// Catalog search parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQuery {
    /// Free text matched against title and author
    pub search: Option<String>,
    pub category: Option<String>,
}

impl BookQuery {
    pub fn new(search: &str, category: &str) -> Self {
        Self {
            search: Some(search.to_string()),
            category: Some(category.to_string()),
        }
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.matches_search(book) && self.matches_category(book)
    }

    fn matches_search(&self, book: &Book) -> bool {
        let needle = match self.search.as_deref().map(fold) {
            Some(needle) if !needle.is_empty() => needle,
            _ => return true,
        };
        fold(&book.title).contains(&needle) || fold(&book.author).contains(&needle)
    }

    fn matches_category(&self, book: &Book) -> bool {
        match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => book.category == category,
        }
    }
}

/// Case-fold for search comparisons
fn fold(s: &str) -> String {
    s.nfkc().collect::<String>().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog() {
        let books = Book::bundled().unwrap();
        assert!(!books.is_empty());
        assert_eq!(books[0].title, "Laskar Pelangi");
        assert_eq!(books[0].publish_year, 2005);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let books = Book::bundled().unwrap();
        let query = BookQuery::new("LASKAR", ALL_CATEGORIES);
        let found: Vec<_> = books.iter().filter(|b| query.matches(b)).collect();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "1");
    }

    #[test]
    fn test_search_matches_author() {
        let books = Book::bundled().unwrap();
        let query = BookQuery::new("hirata", ALL_CATEGORIES);
        assert!(books.iter().filter(|b| query.matches(b)).count() >= 3);
    }

    #[test]
    fn test_category_filter() {
        let books = Book::bundled().unwrap();
        let query = BookQuery::new("", "Novel Religi");
        assert!(books
            .iter()
            .filter(|b| query.matches(b))
            .all(|b| b.category == "Novel Religi"));

        let query = BookQuery::new("hirata", "Novel Sejarah");
        assert_eq!(books.iter().filter(|b| query.matches(b)).count(), 0);
    }

    #[test]
    fn test_default_query_matches_everything() {
        let books = Book::bundled().unwrap();
        let query = BookQuery::default();
        assert!(books.iter().all(|b| query.matches(b)));
    }
}
