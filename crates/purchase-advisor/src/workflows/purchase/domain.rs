use serde::{Deserialize, Serialize};

/// Upper bound shared by every subjective rating.
pub const MAX_RATING: u8 = 10;

/// Inputs describing one prospective purchase.
///
/// Every field is optional on the wire and falls back to the neutral defaults
/// from [`PurchaseMetrics::default`], so records written before a field existed
/// still load. Older records may carry `freeMonthlyMoney` and
/// `sustainabilityScore`, alone or next to the current keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredMetrics")]
pub struct PurchaseMetrics {
    pub product_name: String,
    pub price: f64,
    /// Free money per month. Zero means the income is unknown.
    pub monthly_income: f64,
    pub discount_percentage: f64,

    pub utility_score: u8,
    pub necessity_score: u8,
    pub long_term_value: u8,
    pub use_frequency: u8,

    pub waiting_days: u32,
    pub research_depth: u8,
    pub impulse_resistance: u8,
    pub instant_happiness_score: u8,
    pub has_unused_similar: bool,

    pub is_replacement: bool,
    pub upgrade_justification: u8,
}

impl Default for PurchaseMetrics {
    fn default() -> Self {
        Self {
            product_name: String::new(),
            price: 0.0,
            monthly_income: 0.0,
            discount_percentage: 0.0,
            utility_score: 5,
            necessity_score: 5,
            long_term_value: 5,
            use_frequency: 5,
            waiting_days: 0,
            research_depth: 0,
            impulse_resistance: 5,
            instant_happiness_score: 5,
            has_unused_similar: false,
            is_replacement: false,
            upgrade_justification: 5,
        }
    }
}

impl PurchaseMetrics {
    /// Fresh record carrying a previously remembered monthly income.
    pub fn with_monthly_income(monthly_income: f64) -> Self {
        Self {
            monthly_income: non_negative(monthly_income),
            ..Self::default()
        }
    }

    /// Copy with every field forced into its valid range.
    pub fn sanitized(&self) -> Self {
        Self {
            product_name: self.product_name.clone(),
            price: non_negative(self.price),
            monthly_income: non_negative(self.monthly_income),
            discount_percentage: non_negative(self.discount_percentage).min(100.0),
            utility_score: rating(self.utility_score),
            necessity_score: rating(self.necessity_score),
            long_term_value: rating(self.long_term_value),
            use_frequency: rating(self.use_frequency),
            waiting_days: self.waiting_days,
            research_depth: rating(self.research_depth),
            impulse_resistance: rating(self.impulse_resistance),
            instant_happiness_score: rating(self.instant_happiness_score),
            has_unused_similar: self.has_unused_similar,
            is_replacement: self.is_replacement,
            upgrade_justification: rating(self.upgrade_justification),
        }
    }

    /// Share of the monthly income the price represents, if income is known.
    pub fn income_ratio(&self) -> Option<f64> {
        if self.monthly_income > 0.0 {
            Some(self.price / self.monthly_income)
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &str {
        let trimmed = self.product_name.trim();
        if trimmed.is_empty() {
            "Unnamed product"
        } else {
            trimmed
        }
    }
}

/// Wire shape accepted on input, including the legacy key names.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredMetrics {
    product_name: Option<String>,
    price: Option<f64>,
    monthly_income: Option<f64>,
    free_monthly_money: Option<f64>,
    discount_percentage: Option<f64>,
    utility_score: Option<u8>,
    necessity_score: Option<u8>,
    long_term_value: Option<u8>,
    sustainability_score: Option<u8>,
    use_frequency: Option<u8>,
    waiting_days: Option<u32>,
    research_depth: Option<u8>,
    impulse_resistance: Option<u8>,
    instant_happiness_score: Option<u8>,
    has_unused_similar: Option<bool>,
    is_replacement: Option<bool>,
    upgrade_justification: Option<u8>,
}

// Current key names win over legacy ones when both are present.
impl From<StoredMetrics> for PurchaseMetrics {
    fn from(stored: StoredMetrics) -> Self {
        let defaults = PurchaseMetrics::default();
        Self {
            product_name: stored.product_name.unwrap_or(defaults.product_name),
            price: stored.price.unwrap_or(defaults.price),
            monthly_income: stored
                .monthly_income
                .or(stored.free_monthly_money)
                .unwrap_or(defaults.monthly_income),
            discount_percentage: stored
                .discount_percentage
                .unwrap_or(defaults.discount_percentage),
            utility_score: stored.utility_score.unwrap_or(defaults.utility_score),
            necessity_score: stored.necessity_score.unwrap_or(defaults.necessity_score),
            long_term_value: stored
                .long_term_value
                .or(stored.sustainability_score)
                .unwrap_or(defaults.long_term_value),
            use_frequency: stored.use_frequency.unwrap_or(defaults.use_frequency),
            waiting_days: stored.waiting_days.unwrap_or(defaults.waiting_days),
            research_depth: stored.research_depth.unwrap_or(defaults.research_depth),
            impulse_resistance: stored
                .impulse_resistance
                .unwrap_or(defaults.impulse_resistance),
            instant_happiness_score: stored
                .instant_happiness_score
                .unwrap_or(defaults.instant_happiness_score),
            has_unused_similar: stored
                .has_unused_similar
                .unwrap_or(defaults.has_unused_similar),
            is_replacement: stored.is_replacement.unwrap_or(defaults.is_replacement),
            upgrade_justification: stored
                .upgrade_justification
                .unwrap_or(defaults.upgrade_justification),
        }
    }
}

fn rating(value: u8) -> u8 {
    value.min(MAX_RATING)
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
