//! Wishlist entry

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    pub book_id: String,
    pub added_date: DateTime<Utc>,
}
