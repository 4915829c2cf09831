//! Active rate configuration snapshot.
//!
//! The store is the single writer of the rate config. Readers clone the
//! current `Arc` and price against it; writers build a whole new snapshot,
//! persist it when a database is configured, then swap it in. Writes are
//! serialized by the lock, so the last write wins.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::error::AppError;
use crate::pricing::errors::ConfigError;
use crate::pricing::models::{RateConfig, SlabTier};
use crate::pricing::slab;

use super::queries;

/// Partial settings update; absent fields keep their current value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsPatch {
    #[serde(default)]
    pub base_drilling_rate_per_foot: Option<Decimal>,
    #[serde(default)]
    pub pvc7_rate_per_foot: Option<Decimal>,
    #[serde(default)]
    pub pvc10_rate_per_foot: Option<Decimal>,
    #[serde(default)]
    pub old_bore_rate_per_foot: Option<Decimal>,
    #[serde(default)]
    pub gst_percentage: Option<Decimal>,
    #[serde(default)]
    pub fixed_fee: Option<Decimal>,
    #[serde(default)]
    pub tier_increments: Option<Vec<Decimal>>,
}

impl SettingsPatch {
    fn apply(&self, current: &RateConfig) -> RateConfig {
        let mut next = current.clone();
        if let Some(v) = self.base_drilling_rate_per_foot {
            next.base_drilling_rate_per_foot = v;
        }
        if let Some(v) = self.pvc7_rate_per_foot {
            next.pvc7_rate_per_foot = v;
        }
        if let Some(v) = self.pvc10_rate_per_foot {
            next.pvc10_rate_per_foot = v;
        }
        if let Some(v) = self.old_bore_rate_per_foot {
            next.old_bore_rate_per_foot = v;
        }
        if let Some(v) = self.gst_percentage {
            next.gst_percentage = v;
        }
        if let Some(v) = self.fixed_fee {
            next.fixed_fee = v;
        }
        if let Some(v) = &self.tier_increments {
            next.tier_increments = v.clone();
        }
        next
    }
}

/// Check that a config can price quotes
pub fn validate_config(config: &RateConfig) -> Result<(), ConfigError> {
    if config.base_drilling_rate_per_foot <= Decimal::ZERO {
        return Err(ConfigError::NonPositiveBaseRate(
            config.base_drilling_rate_per_foot,
        ));
    }
    if config.tier_increments.is_empty() {
        return Err(ConfigError::EmptyTierTable);
    }

    let rates = [
        ("pvc7_rate_per_foot", config.pvc7_rate_per_foot),
        ("pvc10_rate_per_foot", config.pvc10_rate_per_foot),
        ("old_bore_rate_per_foot", config.old_bore_rate_per_foot),
        ("fixed_fee", config.fixed_fee),
    ];
    for (field, value) in rates {
        if value < Decimal::ZERO {
            return Err(ConfigError::NegativeRate { field, value });
        }
    }

    if config.gst_percentage < Decimal::ZERO || config.gst_percentage > Decimal::ONE_HUNDRED {
        return Err(ConfigError::TaxPercentageOutOfRange(config.gst_percentage));
    }

    let tiers = config.tier_increments.len();
    for (&index, &value) in &config.tier_overrides {
        if index >= tiers {
            return Err(ConfigError::OverrideOutOfRange { index, tiers });
        }
        if value < Decimal::ZERO {
            return Err(ConfigError::NegativeRate {
                field: "tier_override",
                value,
            });
        }
    }

    slab::build_from_config(config)?;

    Ok(())
}

/// Holder of the active rate configuration
#[derive(Clone)]
pub struct SettingsStore {
    active: Arc<RwLock<Arc<RateConfig>>>,
    db: Option<PgPool>,
}

impl SettingsStore {
    /// Store without persistence
    pub fn in_memory(config: RateConfig) -> Self {
        Self {
            active: Arc::new(RwLock::new(Arc::new(config))),
            db: None,
        }
    }

    /// Store backed by Postgres, seeded from the persisted config.
    ///
    /// A persisted config that no longer validates is ignored in favour of
    /// the defaults.
    pub async fn with_database(pool: PgPool) -> Result<Self, AppError> {
        let config = match queries::load_rate_config(&pool).await? {
            Some(row) => match validate_config(&row.value.0) {
                Ok(()) => {
                    info!("Loaded rate config saved at {}", row.updated_at);
                    row.value.0
                }
                Err(e) => {
                    warn!("Ignoring invalid persisted rate config: {}", e);
                    RateConfig::default()
                }
            },
            None => {
                info!("No persisted rate config, using defaults");
                RateConfig::default()
            }
        };

        Ok(Self {
            active: Arc::new(RwLock::new(Arc::new(config))),
            db: Some(pool),
        })
    }

    /// Current snapshot
    pub async fn current(&self) -> Arc<RateConfig> {
        self.active.read().await.clone()
    }

    /// Tier table of the current snapshot
    pub async fn tiers(&self) -> Result<Vec<SlabTier>, ConfigError> {
        slab::build_from_config(&*self.current().await)
    }

    /// Apply a partial update. Manual tier overrides are kept.
    pub async fn update(&self, patch: &SettingsPatch) -> Result<Arc<RateConfig>, AppError> {
        self.replace_with(|current| Ok(patch.apply(current))).await
    }

    /// Pin tier `index` to `rate` until cleared
    pub async fn set_override(&self, index: usize, rate: Decimal) -> Result<Arc<RateConfig>, AppError> {
        self.replace_with(|current| {
            let mut next = current.clone();
            next.tier_overrides.insert(index, rate);
            Ok(next)
        })
        .await
    }

    /// Clear one manual tier rate
    pub async fn clear_override(&self, index: usize) -> Result<Arc<RateConfig>, AppError> {
        self.replace_with(|current| {
            let mut next = current.clone();
            if next.tier_overrides.remove(&index).is_none() {
                return Err(AppError::NotFound);
            }
            Ok(next)
        })
        .await
    }

    /// Clear every manual tier rate
    pub async fn clear_overrides(&self) -> Result<Arc<RateConfig>, AppError> {
        self.replace_with(|current| {
            let mut next = current.clone();
            next.tier_overrides.clear();
            Ok(next)
        })
        .await
    }

    /// Restore the reference defaults and drop the persisted blob
    pub async fn reset(&self) -> Result<Arc<RateConfig>, AppError> {
        let mut active = self.active.write().await;
        if let Some(pool) = &self.db {
            queries::delete_rate_config(pool).await?;
        }
        let next = Arc::new(RateConfig::default());
        *active = next.clone();
        info!("Rate config reset to defaults");
        Ok(next)
    }

    async fn replace_with<F>(&self, build: F) -> Result<Arc<RateConfig>, AppError>
    where
        F: FnOnce(&RateConfig) -> Result<RateConfig, AppError>,
    {
        let mut active = self.active.write().await;
        let next = build(&**active)?;
        validate_config(&next)?;

        if let Some(pool) = &self.db {
            queries::save_rate_config(pool, &next).await?;
        }

        let next = Arc::new(next);
        *active = next.clone();
        info!(
            "Rate config updated: base rate {}, {} tier override(s)",
            next.base_drilling_rate_per_foot,
            next.tier_overrides.len()
        );
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&RateConfig::default()).is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let gst = RateConfig {
            gst_percentage: dec!(101),
            ..RateConfig::default()
        };
        assert_eq!(
            validate_config(&gst),
            Err(ConfigError::TaxPercentageOutOfRange(dec!(101)))
        );

        let pvc = RateConfig {
            pvc7_rate_per_foot: dec!(-1),
            ..RateConfig::default()
        };
        assert!(matches!(
            validate_config(&pvc),
            Err(ConfigError::NegativeRate { field: "pvc7_rate_per_foot", .. })
        ));

        let mut overrides = RateConfig::default();
        overrides.tier_overrides.insert(18, dec!(100));
        assert_eq!(
            validate_config(&overrides),
            Err(ConfigError::OverrideOutOfRange { index: 18, tiers: 18 })
        );

        let huge = RateConfig {
            base_drilling_rate_per_foot: Decimal::MAX,
            ..RateConfig::default()
        };
        assert_eq!(
            validate_config(&huge),
            Err(ConfigError::RateOverflow { index: 1 })
        );
    }

    #[tokio::test]
    async fn test_tiers_of_current_snapshot() {
        let store = SettingsStore::in_memory(RateConfig::default());

        let tiers = store.tiers().await.unwrap();
        assert_eq!(tiers.len(), 18);
        assert_eq!(tiers[5].rate_per_foot, dec!(205));
    }

    #[tokio::test]
    async fn test_override_persists_across_base_rate_update() {
        let store = SettingsStore::in_memory(RateConfig::default());
        store.set_override(2, dec!(150)).await.unwrap();

        let patch = SettingsPatch {
            base_drilling_rate_per_foot: Some(dec!(120)),
            ..SettingsPatch::default()
        };
        store.update(&patch).await.unwrap();

        let tiers = store.tiers().await.unwrap();
        assert_eq!(tiers[0].rate_per_foot, dec!(120));
        assert_eq!(tiers[1].rate_per_foot, dec!(125));
        assert_eq!(tiers[2].rate_per_foot, dec!(150));
        assert!(tiers[2].overridden);
        assert_eq!(tiers[3].rate_per_foot, dec!(155));
    }

    #[tokio::test]
    async fn test_clear_override_restores_computed_rate() {
        let store = SettingsStore::in_memory(RateConfig::default());
        store.set_override(2, dec!(150)).await.unwrap();
        store.clear_override(2).await.unwrap();

        let tiers = store.tiers().await.unwrap();
        assert_eq!(tiers[2].rate_per_foot, dec!(105));
        assert!(matches!(
            store.clear_override(2).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_invalid_update_keeps_previous_snapshot() {
        let store = SettingsStore::in_memory(RateConfig::default());
        let patch = SettingsPatch {
            base_drilling_rate_per_foot: Some(dec!(0)),
            ..SettingsPatch::default()
        };

        assert!(store.update(&patch).await.is_err());
        assert_eq!(store.current().await.base_drilling_rate_per_foot, dec!(90));

        assert!(store.set_override(30, dec!(10)).await.is_err());
        assert!(store.current().await.tier_overrides.is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_is_not_mutated_by_later_writes() {
        let store = SettingsStore::in_memory(RateConfig::default());
        let before = store.current().await;

        let patch = SettingsPatch {
            gst_percentage: Some(dec!(12)),
            ..SettingsPatch::default()
        };
        store.update(&patch).await.unwrap();

        assert_eq!(before.gst_percentage, dec!(18));
        assert_eq!(store.current().await.gst_percentage, dec!(12));
    }

    #[tokio::test]
    async fn test_last_write_wins_and_reset() {
        let store = SettingsStore::in_memory(RateConfig::default());
        for rate in [dec!(100), dec!(110), dec!(95)] {
            let patch = SettingsPatch {
                base_drilling_rate_per_foot: Some(rate),
                ..SettingsPatch::default()
            };
            store.update(&patch).await.unwrap();
        }
        store.set_override(0, dec!(80)).await.unwrap();
        assert_eq!(store.current().await.base_drilling_rate_per_foot, dec!(95));

        store.clear_overrides().await.unwrap();
        assert!(store.current().await.tier_overrides.is_empty());

        store.reset().await.unwrap();
        assert_eq!(*store.current().await, RateConfig::default());
    }
}
