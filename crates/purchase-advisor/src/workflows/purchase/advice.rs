use serde::{Deserialize, Serialize};

use super::domain::PurchaseMetrics;
use super::evaluation::Severity;

/// One piece of guidance for the buyer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub severity: Severity,
    pub message: String,
}

impl Advice {
    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }
}

/// Cut-offs used by the advice rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdviceThresholds {
    /// Below this many days the urge is still considered fresh.
    pub short_wait_days: u32,
    pub patient_wait_days: u32,
    pub low_research: u8,
    pub thorough_research: u8,
    pub low_impulse_resistance: u8,
    pub high_impulse_resistance: u8,
    pub low_necessity: u8,
    pub want_score_ceiling: u8,
    /// Share of monthly income above which the price is flagged.
    pub max_income_share: f64,
    pub discount_trap_percentage: f64,
    pub discount_trap_wait_days: u32,
    pub low_use_frequency: u8,
    pub cooling_off_days: u32,
}

impl Default for AdviceThresholds {
    fn default() -> Self {
        Self {
            short_wait_days: 3,
            patient_wait_days: 7,
            low_research: 4,
            thorough_research: 7,
            low_impulse_resistance: 4,
            high_impulse_resistance: 7,
            low_necessity: 5,
            want_score_ceiling: 60,
            max_income_share: 0.20,
            discount_trap_percentage: 30.0,
            discount_trap_wait_days: 2,
            low_use_frequency: 5,
            cooling_off_days: 7,
        }
    }
}

/// Independent threshold rules turning metrics and a score into guidance.
#[derive(Debug, Clone, Default)]
pub struct AdviceRules {
    thresholds: AdviceThresholds,
}

impl AdviceRules {
    pub fn new(thresholds: AdviceThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &AdviceThresholds {
        &self.thresholds
    }

    /// Advice in rule order. Never fails for any metrics.
    pub fn advise(&self, metrics: &PurchaseMetrics, score: u8) -> Vec<Advice> {
        let metrics = metrics.sanitized();
        let t = &self.thresholds;
        let mut advice = Vec::new();

        let waited = metrics.waiting_days;
        if waited == 0 {
            advice.push(Advice::new(
                Severity::Danger,
                "You just started wanting this. Wait at least 24 hours before buying.",
            ));
        } else if waited < t.short_wait_days {
            advice.push(Advice::new(
                Severity::Warning,
                format!(
                    "You've only waited {}. Wait longer to see if the urge lasts.",
                    pluralize_days(waited)
                ),
            ));
        } else if waited >= t.patient_wait_days {
            advice.push(Advice::new(
                Severity::Success,
                format!(
                    "Good job waiting {}! The desire has stood the test of time.",
                    pluralize_days(waited)
                ),
            ));
        }

        if metrics.research_depth < t.low_research {
            advice.push(Advice::new(
                Severity::Warning,
                "Do more research: compare alternatives, read reviews and check other prices.",
            ));
        } else if metrics.research_depth >= t.thorough_research {
            advice.push(Advice::new(
                Severity::Success,
                "Good research. You know what you're buying.",
            ));
        }

        if metrics.impulse_resistance < t.low_impulse_resistance {
            advice.push(Advice::new(
                Severity::Danger,
                "This feels impulsive. Step away and revisit the decision later.",
            ));
        } else if metrics.impulse_resistance >= t.high_impulse_resistance {
            advice.push(Advice::new(
                Severity::Success,
                "This looks like a deliberate decision, not an impulse.",
            ));
        }

        if metrics.necessity_score < t.low_necessity && score < t.want_score_ceiling {
            advice.push(Advice::new(
                Severity::Warning,
                "This seems more like a want than a need. Is it really worth it?",
            ));
        }

        if let Some(ratio) = metrics.income_ratio() {
            if ratio > t.max_income_share {
                advice.push(Advice::new(
                    Severity::Danger,
                    format!(
                        "This costs {:.0}% of your free monthly money, more than {:.0}%.",
                        ratio * 100.0,
                        t.max_income_share * 100.0
                    ),
                ));
            }
        }

        if metrics.discount_percentage > t.discount_trap_percentage
            && waited < t.discount_trap_wait_days
        {
            advice.push(Advice::new(
                Severity::Danger,
                format!(
                    "Discount trap: a {:.0}% sale creates false urgency. Good deals come back.",
                    metrics.discount_percentage
                ),
            ));
        }

        if metrics.use_frequency < t.low_use_frequency {
            advice.push(Advice::new(
                Severity::Warning,
                "You may not use this often. Will it end up collecting dust?",
            ));
        }

        if metrics.has_unused_similar {
            advice.push(Advice::new(
                Severity::Danger,
                "You have a history of unused similar purchases. Use what you already own first.",
            ));
        }

        advice
    }

    /// Days left in the cooling-off period, `None` once it has passed.
    pub fn cooling_off(&self, metrics: &PurchaseMetrics) -> Option<u32> {
        self.thresholds
            .cooling_off_days
            .checked_sub(metrics.waiting_days)
            .filter(|remaining| *remaining > 0)
    }
}

/// Advice under the default thresholds.
pub fn advise(metrics: &PurchaseMetrics, score: u8) -> Vec<Advice> {
    AdviceRules::default().advise(metrics, score)
}

pub fn cooling_off(metrics: &PurchaseMetrics) -> Option<u32> {
    AdviceRules::default().cooling_off(metrics)
}

pub fn pluralize_days(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}
