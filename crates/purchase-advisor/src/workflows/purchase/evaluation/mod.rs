mod config;
mod policy;
mod rules;

pub use config::{
    ImpactWeights, RecommendationThresholds, ScoringConfig, ScoringConfigError, ScoringDimension,
    ScoringProfile,
};
pub use policy::{Recommendation, RecommendationTier, Severity};
pub use rules::{affordability_score, discount_benefit, waiting_period_score};

use super::domain::PurchaseMetrics;
use serde::{Deserialize, Serialize};

/// Stateless evaluator applying a weight table and thresholds to purchase metrics.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Builds an engine after checking the weights and thresholds.
    pub fn new(config: ScoringConfig) -> Result<Self, ScoringConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn for_profile(profile: ScoringProfile) -> Self {
        Self {
            config: ScoringConfig::for_profile(profile),
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Full audit trail of how the score was reached.
    pub fn evaluate(&self, metrics: &PurchaseMetrics) -> ScoreBreakdown {
        let metrics = metrics.sanitized();
        let totals = rules::weigh_metrics(&metrics, &self.config.weights);
        let (normalized, score) = rules::normalize(totals.total_weighted, totals.max_possible);

        ScoreBreakdown {
            components: totals.components,
            unused_similar_penalty: totals.penalty,
            total_weighted: totals.total_weighted,
            max_possible: totals.max_possible,
            normalized,
            score,
        }
    }

    pub fn score(&self, metrics: &PurchaseMetrics) -> u8 {
        self.evaluate(metrics).score
    }

    pub fn recommendation(&self, score: u8) -> Recommendation {
        policy::classify(score, &self.config.thresholds)
    }
}

/// Final 0-100 score under the default profile.
pub fn score(metrics: &PurchaseMetrics) -> u8 {
    ScoringEngine::default().score(metrics)
}

/// Recommendation tier under the default thresholds.
pub fn recommendation(score: u8) -> Recommendation {
    ScoringEngine::default().recommendation(score)
}

/// Weighted contribution of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub dimension: ScoringDimension,
    pub sub_score: f64,
    pub weight: f64,
    pub contribution: f64,
    pub max_contribution: f64,
}

/// Evaluation output describing the composite score and every term behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub components: Vec<ScoreComponent>,
    pub unused_similar_penalty: f64,
    pub total_weighted: f64,
    pub max_possible: f64,
    pub normalized: f64,
    pub score: u8,
}

impl ScoreBreakdown {
    pub fn component(&self, dimension: ScoringDimension) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.dimension == dimension)
    }
}
