//! Business logic services

pub mod catalog;
pub mod loans;
pub mod session;

use chrono::{DateTime, Utc};

use crate::{config::BorrowingConfig, error::AppResult, models::LibraryStats, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub session: session::SessionService,
    pub catalog: catalog::CatalogService,
    pub loans: loans::LoansService,
}

impl Services {
    /// Create all services over the given repository and the bundled catalog
    pub fn new(repository: Repository, borrowing: BorrowingConfig) -> AppResult<Self> {
        Ok(Self::with_catalog(
            repository,
            borrowing,
            catalog::CatalogService::bundled()?,
        ))
    }

    /// Create all services with a caller-supplied catalog
    pub fn with_catalog(
        repository: Repository,
        borrowing: BorrowingConfig,
        catalog: catalog::CatalogService,
    ) -> Self {
        Self {
            session: session::SessionService::new(repository),
            catalog,
            loans: loans::LoansService::new(borrowing),
        }
    }

    /// Dashboard counters
    pub async fn stats(&self) -> LibraryStats {
        self.stats_at(Utc::now()).await
    }

    pub async fn stats_at(&self, now: DateTime<Utc>) -> LibraryStats {
        LibraryStats {
            total_books: self.catalog.count_books(),
            active_borrows: self.loans.count_active().await,
            overdue: self.loans.count_overdue_at(now).await,
            wishlist: self.catalog.count_wishlist().await,
        }
    }
}
