//! Dashboard counters

use serde::Serialize;

/// Counters shown on the home and profile screens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total_books: usize,
    pub active_borrows: usize,
    pub overdue: usize,
    pub wishlist: usize,
}
