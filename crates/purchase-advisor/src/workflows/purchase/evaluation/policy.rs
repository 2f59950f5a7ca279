use std::fmt;

use serde::{Deserialize, Serialize};

use super::config::RecommendationThresholds;

/// Display severity attached to recommendations and advice. Callers pick the styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Success,
    Info,
    Warning,
    Danger,
}

impl Severity {
    pub fn label(self) -> &'static str {
        match self {
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered recommendation bands, best first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationTier {
    Go,
    Consider,
    Think,
    Skip,
}

impl RecommendationTier {
    pub fn label(self) -> &'static str {
        match self {
            RecommendationTier::Go => "Go for it!",
            RecommendationTier::Consider => "Worth Considering",
            RecommendationTier::Think => "Think It Over",
            RecommendationTier::Skip => "Skip This One",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            RecommendationTier::Go => Severity::Success,
            RecommendationTier::Consider => Severity::Info,
            RecommendationTier::Think => Severity::Warning,
            RecommendationTier::Skip => Severity::Danger,
        }
    }

    /// Badge variant hint for graphical front ends.
    pub fn display_hint(self) -> &'static str {
        match self {
            RecommendationTier::Go => "default",
            RecommendationTier::Consider => "secondary",
            RecommendationTier::Think => "outline",
            RecommendationTier::Skip => "destructive",
        }
    }
}

/// Qualitative verdict for a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub tier: RecommendationTier,
    pub label: &'static str,
    pub severity: Severity,
    pub display_hint: &'static str,
}

impl From<RecommendationTier> for Recommendation {
    fn from(tier: RecommendationTier) -> Self {
        Self {
            tier,
            label: tier.label(),
            severity: tier.severity(),
            display_hint: tier.display_hint(),
        }
    }
}

/// A score equal to a threshold lands in the higher tier.
pub fn classify(score: u8, thresholds: &RecommendationThresholds) -> Recommendation {
    let tier = if score >= thresholds.go {
        RecommendationTier::Go
    } else if score >= thresholds.consider {
        RecommendationTier::Consider
    } else if score >= thresholds.think {
        RecommendationTier::Think
    } else {
        RecommendationTier::Skip
    };

    Recommendation::from(tier)
}
