use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Scored dimensions of a purchase. Each maps to one 0-10 sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringDimension {
    Affordability,
    Discount,
    Utility,
    Necessity,
    LongTermValue,
    UseFrequency,
    ResearchDepth,
    ImpulseResistance,
    InstantHappiness,
    WaitingPeriod,
    Upgrade,
}

impl ScoringDimension {
    pub const ALL: [ScoringDimension; 11] = [
        ScoringDimension::Affordability,
        ScoringDimension::Discount,
        ScoringDimension::Utility,
        ScoringDimension::Necessity,
        ScoringDimension::LongTermValue,
        ScoringDimension::UseFrequency,
        ScoringDimension::ResearchDepth,
        ScoringDimension::ImpulseResistance,
        ScoringDimension::InstantHappiness,
        ScoringDimension::WaitingPeriod,
        ScoringDimension::Upgrade,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ScoringDimension::Affordability => "Affordability",
            ScoringDimension::Discount => "Discount",
            ScoringDimension::Utility => "Utility",
            ScoringDimension::Necessity => "Necessity",
            ScoringDimension::LongTermValue => "Long-term value",
            ScoringDimension::UseFrequency => "Use frequency",
            ScoringDimension::ResearchDepth => "Research depth",
            ScoringDimension::ImpulseResistance => "Impulse resistance",
            ScoringDimension::InstantHappiness => "Instant happiness",
            ScoringDimension::WaitingPeriod => "Waiting period",
            ScoringDimension::Upgrade => "Upgrade justification",
        }
    }
}

/// Impact multipliers keyed by dimension. A missing dimension is not scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactWeights {
    pub multipliers: BTreeMap<ScoringDimension, f64>,
    /// Deducted as `10 * penalty` when similar unused items exist.
    pub unused_similar_penalty: f64,
}

impl ImpactWeights {
    pub fn new<I>(multipliers: I, unused_similar_penalty: f64) -> Self
    where
        I: IntoIterator<Item = (ScoringDimension, f64)>,
    {
        Self {
            multipliers: multipliers.into_iter().collect(),
            unused_similar_penalty,
        }
    }

    pub fn get(&self, dimension: ScoringDimension) -> Option<f64> {
        self.multipliers.get(&dimension).copied()
    }

    pub fn set(&mut self, dimension: ScoringDimension, multiplier: f64) {
        self.multipliers.insert(dimension, multiplier);
    }

    pub fn remove(&mut self, dimension: ScoringDimension) {
        self.multipliers.remove(&dimension);
    }
}

/// Minimum scores for the three upper recommendation tiers; anything lower skips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationThresholds {
    pub go: u8,
    pub consider: u8,
    pub think: u8,
}

/// Named weight/threshold sets covering both historical rule sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringProfile {
    /// Anti-impulsivity weighting: waiting, research and self-control count heavily.
    #[default]
    Deliberate,
    /// Value, discount and affordability weighting without deliberation signals.
    Classic,
}

impl ScoringProfile {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "deliberate" | "adhd" | "default" => Some(Self::Deliberate),
            "classic" | "simple" => Some(Self::Classic),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoringProfile::Deliberate => "deliberate",
            ScoringProfile::Classic => "classic",
        }
    }
}

impl fmt::Display for ScoringProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Complete tunable surface of the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ImpactWeights,
    pub thresholds: RecommendationThresholds,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self::for_profile(ScoringProfile::default())
    }
}

impl ScoringConfig {
    pub fn for_profile(profile: ScoringProfile) -> Self {
        use ScoringDimension::*;

        match profile {
            ScoringProfile::Deliberate => Self {
                weights: ImpactWeights::new(
                    [
                        (Affordability, 1.3),
                        (Discount, 0.4),
                        (Utility, 1.6),
                        (Necessity, 1.8),
                        (LongTermValue, 1.4),
                        (UseFrequency, 1.2),
                        (ResearchDepth, 1.5),
                        (ImpulseResistance, 1.7),
                        (WaitingPeriod, 2.0),
                        (Upgrade, 0.8),
                    ],
                    1.5,
                ),
                thresholds: RecommendationThresholds {
                    go: 80,
                    consider: 65,
                    think: 45,
                },
            },
            ScoringProfile::Classic => Self {
                weights: ImpactWeights::new(
                    [
                        (Affordability, 1.2),
                        (Discount, 0.8),
                        (Utility, 1.5),
                        (InstantHappiness, 0.6),
                        (LongTermValue, 1.3),
                        (Upgrade, 0.7),
                        (Necessity, 1.4),
                    ],
                    1.0,
                ),
                thresholds: RecommendationThresholds {
                    go: 75,
                    consider: 60,
                    think: 40,
                },
            },
        }
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        for (dimension, multiplier) in &self.weights.multipliers {
            if !multiplier.is_finite() || *multiplier <= 0.0 {
                return Err(ScoringConfigError::NonPositiveWeight {
                    dimension: *dimension,
                    multiplier: *multiplier,
                });
            }
        }

        let penalty = self.weights.unused_similar_penalty;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err(ScoringConfigError::NegativePenalty(penalty));
        }

        let RecommendationThresholds {
            go,
            consider,
            think,
        } = self.thresholds;
        if !(go <= 100 && go > consider && consider > think && think > 0) {
            return Err(ScoringConfigError::UnorderedThresholds {
                go,
                consider,
                think,
            });
        }

        Ok(())
    }
}

/// Rejected scoring configuration.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("weight for {dimension:?} must be a positive number, got {multiplier}")]
    NonPositiveWeight {
        dimension: ScoringDimension,
        multiplier: f64,
    },
    #[error("unused-similar penalty must be zero or positive, got {0}")]
    NegativePenalty(f64),
    #[error("thresholds must satisfy 100 >= go > consider > think > 0, got {go}/{consider}/{think}")]
    UnorderedThresholds { go: u8, consider: u8, think: u8 },
}
