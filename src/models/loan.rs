//! Borrowed book model and due-date arithmetic

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::book::Book;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Borrow lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorrowStatus {
    #[serde(rename = "dipinjam")]
    Borrowed,
    #[serde(rename = "dikembalikan")]
    Returned,
}

impl std::fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            BorrowStatus::Borrowed => "Dipinjam",
            BorrowStatus::Returned => "Dikembalikan",
        };
        write!(f, "{}", label)
    }
}

/// A book plus the dates of its active borrow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedBook {
    #[serde(flatten)]
    pub book: Book,
    pub borrow_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub status: BorrowStatus,
}

impl BorrowedBook {
    pub fn new(book: Book, borrow_date: DateTime<Utc>, return_date: DateTime<Utc>) -> Self {
        Self {
            book,
            borrow_date,
            return_date,
            status: BorrowStatus::Borrowed,
        }
    }

    pub fn book_id(&self) -> &str {
        &self.book.id
    }

    /// Whole days until the due date, rounded up
    pub fn days_left_at(&self, now: DateTime<Utc>) -> i64 {
        ceil_days(self.return_date - now)
    }

    pub fn days_left(&self) -> i64 {
        self.days_left_at(Utc::now())
    }

    pub fn is_overdue_at(&self, now: DateTime<Utc>) -> bool {
        self.return_date < now
    }

    pub fn is_overdue(&self) -> bool {
        self.is_overdue_at(Utc::now())
    }

    /// Length of the borrow in days, rounded up
    pub fn duration_days(&self) -> i64 {
        ceil_days(self.return_date - self.borrow_date)
    }
}

/// `ceil(delta / 1 day)` on millisecond precision
pub fn ceil_days(delta: Duration) -> i64 {
    let millis = delta.num_milliseconds();
    millis.div_euclid(MILLIS_PER_DAY) + i64::from(millis.rem_euclid(MILLIS_PER_DAY) != 0)
}
