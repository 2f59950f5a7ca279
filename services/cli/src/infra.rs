use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use purchase_advisor::config::AdvisorConfig;
use purchase_advisor::error::AppError;
use purchase_advisor::workflows::purchase::{
    CalculationStore, FileMedium, PurchaseMetrics, ScoringConfig, ScoringEngine, ScoringProfile,
};

/// Everything a command needs: configuration plus the on-disk store.
pub(crate) struct AdvisorContext {
    pub(crate) config: AdvisorConfig,
    pub(crate) store: CalculationStore<FileMedium>,
}

impl AdvisorContext {
    pub(crate) fn new(config: AdvisorConfig) -> Self {
        let store = CalculationStore::new(FileMedium::new(config.storage.data_dir.clone()));
        Self { config, store }
    }

    /// Engine for the requested profile, falling back to the configured one.
    pub(crate) fn engine(&self, profile: Option<ProfileArg>) -> Result<ScoringEngine, AppError> {
        let profile = profile
            .map(ScoringProfile::from)
            .unwrap_or(self.config.scoring.profile);
        Ok(ScoringEngine::new(ScoringConfig::for_profile(profile))?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ProfileArg {
    Deliberate,
    Classic,
}

impl From<ProfileArg> for ScoringProfile {
    fn from(value: ProfileArg) -> Self {
        match value {
            ProfileArg::Deliberate => ScoringProfile::Deliberate,
            ProfileArg::Classic => ScoringProfile::Classic,
        }
    }
}

/// Metric flags. Anything left out keeps the value from `--from-json` or the defaults.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct MetricArgs {
    /// Load a metrics record (JSON, camelCase fields) before applying flags
    #[arg(long)]
    pub(crate) from_json: Option<PathBuf>,
    /// Product label
    #[arg(long)]
    pub(crate) name: Option<String>,
    /// Price after discount
    #[arg(long)]
    pub(crate) price: Option<f64>,
    /// Free money per month (defaults to the remembered amount)
    #[arg(long)]
    pub(crate) monthly_income: Option<f64>,
    /// Discount in percent
    #[arg(long)]
    pub(crate) discount: Option<f64>,
    /// How much it improves daily life (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) utility: Option<u8>,
    /// How much it is actually needed (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) necessity: Option<u8>,
    /// Lasting value (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) long_term_value: Option<u8>,
    /// Expected use frequency (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) use_frequency: Option<u8>,
    /// Days since the wish first came up
    #[arg(long)]
    pub(crate) waiting_days: Option<u32>,
    /// How thoroughly alternatives were researched (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) research_depth: Option<u8>,
    /// How calm and deliberate the wish feels (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) impulse_resistance: Option<u8>,
    /// Immediate joy expected (0-10)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) instant_happiness: Option<u8>,
    /// How much better than the current item it is (0-10, replacements only)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    pub(crate) upgrade: Option<u8>,
    /// Similar items bought before ended up unused
    #[arg(long)]
    pub(crate) unused_similar: bool,
    /// This purchase replaces something already owned
    #[arg(long)]
    pub(crate) replacement: bool,
}

impl MetricArgs {
    /// Applies the flags on top of `base`, or on top of the `--from-json` record.
    pub(crate) fn resolve(&self, base: PurchaseMetrics) -> Result<PurchaseMetrics, AppError> {
        let mut metrics = match &self.from_json {
            Some(path) => read_metrics(path)?,
            None => base,
        };

        if let Some(name) = &self.name {
            metrics.product_name = name.clone();
        }
        if let Some(price) = self.price {
            metrics.price = price;
        }
        if let Some(income) = self.monthly_income {
            metrics.monthly_income = income;
        }
        if let Some(discount) = self.discount {
            metrics.discount_percentage = discount;
        }
        if let Some(value) = self.utility {
            metrics.utility_score = value;
        }
        if let Some(value) = self.necessity {
            metrics.necessity_score = value;
        }
        if let Some(value) = self.long_term_value {
            metrics.long_term_value = value;
        }
        if let Some(value) = self.use_frequency {
            metrics.use_frequency = value;
        }
        if let Some(days) = self.waiting_days {
            metrics.waiting_days = days;
        }
        if let Some(value) = self.research_depth {
            metrics.research_depth = value;
        }
        if let Some(value) = self.impulse_resistance {
            metrics.impulse_resistance = value;
        }
        if let Some(value) = self.instant_happiness {
            metrics.instant_happiness_score = value;
        }
        if let Some(value) = self.upgrade {
            metrics.upgrade_justification = value;
        }
        metrics.has_unused_similar |= self.unused_similar;
        metrics.is_replacement |= self.replacement;

        Ok(metrics.sanitized())
    }
}

fn read_metrics(path: &Path) -> Result<PurchaseMetrics, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
