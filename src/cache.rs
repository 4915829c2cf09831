//! In-memory caching using moka
//!
//! Saved quotes are kept for their validity period so share links, QR codes
//! and message text keep working. Rendered QR images are cached separately
//! because PNG encoding is the only expensive step on the share routes.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::pricing::services::SavedQuote;

/// Application cache holding saved quotes and their rendered QR codes
#[derive(Clone)]
pub struct AppCache {
    /// Saved quotes (id -> SavedQuote)
    pub quotes: Cache<Uuid, Arc<SavedQuote>>,
    /// QR code PNG bytes (quote id -> png)
    pub qr_codes: Cache<Uuid, Arc<Vec<u8>>>,
}

impl AppCache {
    /// Create a new cache; quotes live for `validity_days`
    pub fn new(validity_days: u32) -> Self {
        let validity = Duration::from_secs(u64::from(validity_days) * 24 * 60 * 60);

        Self {
            // Saved quotes: 10k entries, expire with the quote
            quotes: Cache::builder()
                .max_capacity(10_000)
                .time_to_live(validity)
                .build(),

            // QR codes: 500 entries, 1 hour idle
            qr_codes: Cache::builder()
                .max_capacity(500)
                .time_to_live(validity)
                .time_to_idle(Duration::from_secs(60 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            quotes_size: self.quotes.entry_count(),
            qr_codes_size: self.qr_codes.entry_count(),
        }
    }

    /// Drop one saved quote and its QR code
    pub async fn invalidate_quote(&self, id: &Uuid) {
        self.quotes.invalidate(id).await;
        self.qr_codes.invalidate(id).await;
        info!("Cache invalidated for quote: {}", id);
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new(30)
    }
}

/// Cache statistics for monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub quotes_size: u64,
    pub qr_codes_size: u64,
}
