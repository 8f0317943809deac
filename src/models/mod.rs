//! Data models for PerpusTB

pub mod book;
pub mod loan;
pub mod stats;
pub mod user;
pub mod wishlist;

// Re-export commonly used types
pub use book::{Book, BookQuery, ALL_CATEGORIES};
pub use loan::{BorrowStatus, BorrowedBook};
pub use stats::LibraryStats;
pub use user::{LoginRequest, RegisterUser, SessionUser, UserRecord};
pub use wishlist::WishlistEntry;
