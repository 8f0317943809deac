//! Borrow and return service

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{
    config::BorrowingConfig,
    error::{AppError, AppResult},
    models::{book::Book, loan::BorrowedBook},
};

#[derive(Clone)]
pub struct LoansService {
    borrowed: Arc<RwLock<Vec<BorrowedBook>>>,
    config: BorrowingConfig,
}

impl LoansService {
    pub fn new(config: BorrowingConfig) -> Self {
        Self {
            borrowed: Arc::new(RwLock::new(Vec::new())),
            config,
        }
    }

    /// Borrow a book until `return_date`
    pub async fn borrow(&self, book: &Book, return_date: DateTime<Utc>) -> AppResult<BorrowedBook> {
        self.borrow_at(book, return_date, Utc::now()).await
    }

    /// Borrow a book with an explicit borrow instant
    pub async fn borrow_at(
        &self,
        book: &Book,
        return_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> AppResult<BorrowedBook> {
        if !book.available {
            return Err(AppError::BusinessRule(
                "Buku ini sedang dipinjam oleh pengguna lain".to_string(),
            ));
        }

        let (earliest, latest) = self.return_date_bounds_at(now)?;
        let day = return_date.date_naive();
        if day < earliest.date_naive() || day > latest.date_naive() {
            return Err(AppError::Validation(format!(
                "Tanggal pengembalian harus antara {} dan {} hari dari sekarang",
                self.config.min_days, self.config.max_days
            )));
        }

        let borrowed = BorrowedBook::new(book.clone(), now, return_date);
        self.borrowed.write().await.push(borrowed.clone());
        tracing::info!(
            "Borrowed book {} until {}",
            book.id,
            return_date.format("%Y-%m-%d")
        );

        Ok(borrowed)
    }

    /// Return a book; every active borrow of it is dropped
    pub async fn return_book(&self, book_id: &str) -> Vec<BorrowedBook> {
        let mut borrowed = self.borrowed.write().await;
        let (returned, kept): (Vec<_>, Vec<_>) =
            borrowed.drain(..).partition(|b| b.book_id() == book_id);
        *borrowed = kept;

        if returned.is_empty() {
            tracing::debug!("Return of book {} ignored: not borrowed", book_id);
        } else {
            tracing::info!("Returned book {}", book_id);
        }
        returned
    }

    /// Active borrows in the order they were made
    pub async fn borrowed_books(&self) -> Vec<BorrowedBook> {
        self.borrowed.read().await.clone()
    }

    pub async fn is_borrowed(&self, book_id: &str) -> bool {
        self.borrowed
            .read()
            .await
            .iter()
            .any(|b| b.book_id() == book_id)
    }

    /// Count active loans
    pub async fn count_active(&self) -> usize {
        self.borrowed.read().await.len()
    }

    /// Count overdue loans
    pub async fn count_overdue(&self) -> usize {
        self.count_overdue_at(Utc::now()).await
    }

    pub async fn count_overdue_at(&self, now: DateTime<Utc>) -> usize {
        self.borrowed
            .read()
            .await
            .iter()
            .filter(|b| b.is_overdue_at(now))
            .count()
    }

    /// Return date proposed on the confirmation screen
    pub fn default_return_date(&self) -> AppResult<DateTime<Utc>> {
        days_from(Utc::now(), self.config.default_days)
    }

    /// Earliest and latest allowed return dates
    pub fn return_date_bounds(&self) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        self.return_date_bounds_at(Utc::now())
    }

    fn return_date_bounds_at(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
        Ok((
            days_from(now, self.config.min_days)?,
            days_from(now, self.config.max_days)?,
        ))
    }

    pub fn fine_label(&self) -> &str {
        &self.config.fine_label
    }
}

fn days_from(now: DateTime<Utc>, days: i64) -> AppResult<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|offset| now.checked_add_signed(offset))
        .ok_or_else(|| {
            AppError::Validation(format!("Jangka waktu {} hari tidak valid", days))
        })
}
