//! PerpusTB - start-up smoke run
//!
//! Loads configuration, restores the persisted session and reports what the
//! home screen would show.

use perpustb::{config::AppConfig, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load_or_default();
    logging::init(&config.logging)?;

    tracing::info!("Starting PerpusTB v{}", env!("CARGO_PKG_VERSION"));

    let state = AppState::open(config).await?;
    let services = &state.services;

    match services.session.restore_session().await {
        Some(user) => tracing::info!("Signed in as {} ({})", user.name, user.nipd),
        None => tracing::info!("No persisted session, login required"),
    }

    let stats = services.stats().await;
    tracing::info!(
        "{} books in catalog, {} categories, {} borrowed, {} overdue, {} wishlisted",
        stats.total_books,
        services.catalog.categories().len() - 1,
        stats.active_borrows,
        stats.overdue,
        stats.wishlist
    );

    Ok(())
}
