use std::fmt;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use super::domain::PurchaseMetrics;
use super::medium::{KeyValueMedium, MediumError};

/// Slot holding the JSON array of saved calculations.
pub const CALCULATIONS_SLOT: &str = "should-i-buy-it-calculations";
/// Slot holding the last positive monthly income as a bare number.
pub const MONTHLY_INCOME_SLOT: &str = "free-monthly-money";

/// Identifier wrapper for saved calculations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalculationId(pub String);

impl CalculationId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalculationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CalculationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Persisted snapshot of a scored calculation. The score is never recomputed on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedCalculation {
    pub id: CalculationId,
    /// Epoch milliseconds of the latest save.
    pub timestamp: i64,
    pub score: u8,
    pub metrics: PurchaseMetrics,
}

impl SavedCalculation {
    pub fn saved_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(self.timestamp)
    }
}

/// Error raised when a mutation could not be persisted.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Medium(#[from] MediumError),
    #[error("failed to encode calculations: {0}")]
    Serialize(#[from] serde_json::Error),
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Saved calculations over a key-value medium.
///
/// Every mutation rewrites the whole collection before returning; the internal
/// mutex keeps concurrent read-modify-write cycles from losing updates.
pub struct CalculationStore<M> {
    medium: M,
    write_lock: Mutex<()>,
    clock: fn() -> i64,
}

impl<M: KeyValueMedium> CalculationStore<M> {
    pub fn new(medium: M) -> Self {
        Self::with_clock(medium, now_millis)
    }

    pub fn with_clock(medium: M, clock: fn() -> i64) -> Self {
        Self {
            medium,
            write_lock: Mutex::new(()),
            clock,
        }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }

    /// Saved calculations, newest first. Unreadable storage yields an empty list.
    pub fn list(&self) -> Vec<SavedCalculation> {
        self.load()
    }

    pub fn get_by_id(&self, id: &CalculationId) -> Option<SavedCalculation> {
        self.load().into_iter().find(|record| &record.id == id)
    }

    /// Persists a calculation.
    ///
    /// A known `id` is replaced in place; a missing or unknown one is prepended.
    /// Fails without writing when the stored collection cannot be read.
    pub fn save(
        &self,
        metrics: PurchaseMetrics,
        score: u8,
        id: Option<CalculationId>,
    ) -> Result<SavedCalculation, StoreError> {
        let _guard = self.lock();
        let mut calculations = self.try_load()?;

        let id = id
            .filter(|id| !id.0.trim().is_empty())
            .unwrap_or_else(CalculationId::generate);
        let record = SavedCalculation {
            id,
            timestamp: (self.clock)(),
            score,
            metrics,
        };

        match calculations
            .iter()
            .position(|existing| existing.id == record.id)
        {
            Some(index) => {
                debug!(id = %record.id, index, "replacing saved calculation");
                calculations[index] = record.clone();
            }
            None => {
                debug!(id = %record.id, "saving new calculation");
                calculations.insert(0, record.clone());
            }
        }

        self.persist(&calculations)?;
        Ok(record)
    }

    /// Removes a calculation; unknown ids leave storage untouched.
    pub fn delete_by_id(&self, id: &CalculationId) -> Result<(), StoreError> {
        let _guard = self.lock();
        let mut calculations = self.try_load()?;
        let before = calculations.len();
        calculations.retain(|record| &record.id != id);

        if calculations.len() == before {
            debug!(%id, "delete requested for unknown calculation");
            return Ok(());
        }

        self.persist(&calculations)
    }

    /// Last remembered monthly income, 0 when none is stored.
    pub fn last_monthly_income(&self) -> f64 {
        let raw = match self.medium.read(MONTHLY_INCOME_SLOT) {
            Ok(Some(raw)) => raw,
            Ok(None) => return 0.0,
            Err(err) => {
                warn!(error = %err, "failed to read remembered income");
                return 0.0;
            }
        };

        match raw.trim().parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => amount,
            _ => {
                warn!(value = %raw.trim(), "ignoring malformed remembered income");
                0.0
            }
        }
    }

    /// Remembers a positive income for future calculations; other amounts are ignored.
    pub fn remember_monthly_income(&self, amount: f64) -> Result<(), StoreError> {
        if !amount.is_finite() || amount <= 0.0 {
            return Ok(());
        }
        self.medium
            .write(MONTHLY_INCOME_SLOT, &amount.to_string())
            .map_err(StoreError::from)
    }

    /// Default metrics prepopulated with the remembered income.
    pub fn new_metrics(&self) -> PurchaseMetrics {
        PurchaseMetrics::with_monthly_income(self.last_monthly_income())
    }

    fn load(&self) -> Vec<SavedCalculation> {
        self.try_load().unwrap_or_else(|err| {
            warn!(error = %err, "failed to read saved calculations");
            Vec::new()
        })
    }

    /// Only a failing medium is an error here. Mutations must not rewrite a
    /// collection they could not read.
    fn try_load(&self) -> Result<Vec<SavedCalculation>, StoreError> {
        let raw = match self.medium.read(CALCULATIONS_SLOT)? {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Ok(Vec::new()),
        };

        let entries: Vec<serde_json::Value> = match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "discarding malformed saved calculations");
                return Ok(Vec::new());
            }
        };

        Ok(entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value(entry) {
                Ok(calculation) => Some(calculation),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable saved calculation");
                    None
                }
            })
            .collect())
    }

    fn persist(&self, calculations: &[SavedCalculation]) -> Result<(), StoreError> {
        let encoded = serde_json::to_string(calculations)?;
        self.medium.write(CALCULATIONS_SLOT, &encoded)?;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
