//! Catalog and wishlist service

use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookQuery, ALL_CATEGORIES},
        wishlist::WishlistEntry,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    books: Arc<Vec<Book>>,
    // Keyed by book id: one entry per book, kept in the order it was added
    wishlist: Arc<RwLock<IndexMap<String, WishlistEntry>>>,
}

impl CatalogService {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            books: Arc::new(books),
            wishlist: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// Service over the catalog bundled with the crate
    pub fn bundled() -> AppResult<Self> {
        let books = Book::bundled()?;
        tracing::info!("Loaded {} books from bundled catalog", books.len());
        Ok(Self::new(books))
    }

    /// All books in catalog order
    pub fn list_books(&self) -> Vec<Book> {
        self.books.as_ref().clone()
    }

    pub fn count_books(&self) -> usize {
        self.books.len()
    }

    /// Search by title/author text and category
    pub fn search(&self, query: &BookQuery) -> Vec<Book> {
        self.books
            .iter()
            .filter(|book| query.matches(book))
            .cloned()
            .collect()
    }

    /// Filter values for the category picker, starting with "all"
    pub fn categories(&self) -> Vec<String> {
        let mut categories = vec![ALL_CATEGORIES.to_string()];
        for book in self.books.iter() {
            if !categories.contains(&book.category) {
                categories.push(book.category.clone());
            }
        }
        categories
    }

    /// Get a book by id
    pub fn get_book(&self, id: &str) -> AppResult<Book> {
        self.books
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }

    /// Add the book to the wishlist, or remove it if already there.
    /// Returns whether the book is wishlisted afterwards.
    pub async fn toggle_wishlist(&self, book_id: &str) -> bool {
        let mut wishlist = self.wishlist.write().await;
        if wishlist.shift_remove(book_id).is_some() {
            tracing::debug!("Removed book {} from wishlist", book_id);
            return false;
        }

        wishlist.insert(
            book_id.to_string(),
            WishlistEntry {
                book_id: book_id.to_string(),
                added_date: Utc::now(),
            },
        );
        tracing::debug!("Added book {} to wishlist", book_id);
        true
    }

    /// Add a book to the wishlist; an existing entry keeps its date
    pub async fn add_to_wishlist(&self, book_id: &str) -> bool {
        let mut wishlist = self.wishlist.write().await;
        if wishlist.contains_key(book_id) {
            return false;
        }

        wishlist.insert(
            book_id.to_string(),
            WishlistEntry {
                book_id: book_id.to_string(),
                added_date: Utc::now(),
            },
        );
        tracing::debug!("Added book {} to wishlist", book_id);
        true
    }

    /// Drop a book from the wishlist, returning whether it was there
    pub async fn remove_from_wishlist(&self, book_id: &str) -> bool {
        let removed = self.wishlist.write().await.shift_remove(book_id).is_some();
        if removed {
            tracing::debug!("Removed book {} from wishlist", book_id);
        }
        removed
    }

    pub async fn is_wishlisted(&self, book_id: &str) -> bool {
        self.wishlist.read().await.contains_key(book_id)
    }

    /// Wishlist entries in the order they were added
    pub async fn wishlist(&self) -> Vec<WishlistEntry> {
        self.wishlist.read().await.values().cloned().collect()
    }

    /// Wishlisted books in catalog order
    pub async fn wishlist_books(&self) -> Vec<Book> {
        let wishlist = self.wishlist.read().await;
        self.books
            .iter()
            .filter(|book| wishlist.contains_key(&book.id))
            .cloned()
            .collect()
    }

    pub async fn count_wishlist(&self) -> usize {
        self.wishlist.read().await.len()
    }
}
