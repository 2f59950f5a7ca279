//! Purchase evaluation: metrics model, scoring engine, advice rules and saved calculations.

pub mod advice;
pub mod domain;
pub mod evaluation;
pub mod medium;
pub mod repository;

#[cfg(test)]
mod tests;

pub use advice::{advise, cooling_off, Advice, AdviceRules, AdviceThresholds};
pub use domain::PurchaseMetrics;
pub use evaluation::{
    recommendation, score, ImpactWeights, Recommendation, RecommendationThresholds,
    RecommendationTier, ScoreBreakdown, ScoreComponent, ScoringConfig, ScoringConfigError,
    ScoringDimension, ScoringEngine, ScoringProfile, Severity,
};
pub use medium::{FileMedium, KeyValueMedium, MediumError, MemoryMedium};
pub use repository::{CalculationId, CalculationStore, SavedCalculation, StoreError};
