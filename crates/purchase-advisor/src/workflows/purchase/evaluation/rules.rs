use super::super::domain::{PurchaseMetrics, MAX_RATING};
use super::config::{ImpactWeights, ScoringDimension};
use super::ScoreComponent;

const MAX_SUB_SCORE: f64 = MAX_RATING as f64;

/// Price-to-income step function. Unknown income scores as unaffordable.
pub fn affordability_score(price: f64, monthly_income: f64) -> f64 {
    if monthly_income <= 0.0 {
        return 0.0;
    }

    let ratio = price / monthly_income;
    if ratio <= 0.01 {
        10.0
    } else if ratio <= 0.05 {
        9.0
    } else if ratio <= 0.10 {
        7.0
    } else if ratio <= 0.20 {
        5.0
    } else if ratio <= 0.30 {
        3.0
    } else if ratio <= 0.50 {
        1.0
    } else {
        0.0
    }
}

/// Linear up to a 50% discount, flat afterwards.
pub fn discount_benefit(discount_percentage: f64) -> f64 {
    (discount_percentage / 50.0 * MAX_SUB_SCORE).min(MAX_SUB_SCORE)
}

pub fn waiting_period_score(waiting_days: u32) -> f64 {
    match waiting_days {
        0 => 0.0,
        1 => 3.0,
        2..=3 => 5.0,
        4..=7 => 7.0,
        8..=14 => 9.0,
        _ => 10.0,
    }
}

fn sub_score(dimension: ScoringDimension, metrics: &PurchaseMetrics) -> f64 {
    match dimension {
        ScoringDimension::Affordability => {
            affordability_score(metrics.price, metrics.monthly_income)
        }
        ScoringDimension::Discount => discount_benefit(metrics.discount_percentage),
        ScoringDimension::WaitingPeriod => waiting_period_score(metrics.waiting_days),
        ScoringDimension::Utility => f64::from(metrics.utility_score),
        ScoringDimension::Necessity => f64::from(metrics.necessity_score),
        ScoringDimension::LongTermValue => f64::from(metrics.long_term_value),
        ScoringDimension::UseFrequency => f64::from(metrics.use_frequency),
        ScoringDimension::ResearchDepth => f64::from(metrics.research_depth),
        ScoringDimension::ImpulseResistance => f64::from(metrics.impulse_resistance),
        ScoringDimension::InstantHappiness => f64::from(metrics.instant_happiness_score),
        ScoringDimension::Upgrade => f64::from(metrics.upgrade_justification),
    }
}

fn is_active(dimension: ScoringDimension, metrics: &PurchaseMetrics) -> bool {
    dimension != ScoringDimension::Upgrade || metrics.is_replacement
}

pub(crate) struct WeightedTotals {
    pub components: Vec<ScoreComponent>,
    pub penalty: f64,
    pub total_weighted: f64,
    pub max_possible: f64,
}

/// Weights every active sub-score. `metrics` must already be sanitized.
pub(crate) fn weigh_metrics(metrics: &PurchaseMetrics, weights: &ImpactWeights) -> WeightedTotals {
    let mut components = Vec::new();
    let mut total_weighted = 0.0;
    let mut max_possible = 0.0;

    for dimension in ScoringDimension::ALL {
        let Some(weight) = weights.get(dimension) else {
            continue;
        };
        if !is_active(dimension, metrics) {
            continue;
        }

        let raw = sub_score(dimension, metrics);
        let contribution = raw * weight;
        let max_contribution = MAX_SUB_SCORE * weight;
        total_weighted += contribution;
        max_possible += max_contribution;

        components.push(ScoreComponent {
            dimension,
            sub_score: raw,
            weight,
            contribution,
            max_contribution,
        });
    }

    let penalty = if metrics.has_unused_similar {
        MAX_SUB_SCORE * weights.unused_similar_penalty
    } else {
        0.0
    };
    total_weighted -= penalty;

    WeightedTotals {
        components,
        penalty,
        total_weighted,
        max_possible,
    }
}

/// Rescales the weighted sum to 0-100 and rounds into the final score.
pub(crate) fn normalize(total_weighted: f64, max_possible: f64) -> (f64, u8) {
    if max_possible <= 0.0 {
        return (0.0, 0);
    }

    let normalized = total_weighted / max_possible * 100.0;
    let score = normalized.clamp(0.0, 100.0).round() as u8;
    (normalized, score)
}
