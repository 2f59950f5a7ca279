use chrono::{Days, Local};
use clap::Args;
use purchase_advisor::error::AppError;
use purchase_advisor::workflows::purchase::advice::pluralize_days;
use purchase_advisor::workflows::purchase::{
    Advice, AdviceRules, CalculationId, PurchaseMetrics, Recommendation, SavedCalculation,
    ScoreBreakdown, ScoringEngine,
};
use serde::Serialize;
use tracing::info;

use crate::infra::{AdvisorContext, MetricArgs, ProfileArg};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    #[command(flatten)]
    pub(crate) metrics: MetricArgs,
    /// Weight table to score with (defaults to ADVISOR_PROFILE)
    #[arg(long, value_enum)]
    pub(crate) profile: Option<ProfileArg>,
    /// Print the evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct SaveArgs {
    #[command(flatten)]
    pub(crate) metrics: MetricArgs,
    /// Weight table to score with (defaults to ADVISOR_PROFILE)
    #[arg(long, value_enum)]
    pub(crate) profile: Option<ProfileArg>,
    /// Update this saved calculation instead of creating a new one
    #[arg(long)]
    pub(crate) id: Option<String>,
}

#[derive(Args, Debug)]
pub(crate) struct IncomeArgs {
    /// New monthly income to remember
    pub(crate) amount: Option<f64>,
}

/// Everything shown for one evaluated purchase.
#[derive(Debug, Serialize)]
pub(crate) struct EvaluationReport {
    pub(crate) metrics: PurchaseMetrics,
    pub(crate) breakdown: ScoreBreakdown,
    pub(crate) recommendation: Recommendation,
    pub(crate) advice: Vec<Advice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) cooling_off_days: Option<u32>,
}

pub(crate) fn build_report(engine: &ScoringEngine, metrics: PurchaseMetrics) -> EvaluationReport {
    let rules = AdviceRules::default();
    let breakdown = engine.evaluate(&metrics);
    let recommendation = engine.recommendation(breakdown.score);
    let advice = rules.advise(&metrics, breakdown.score);
    let cooling_off_days = rules.cooling_off(&metrics);

    EvaluationReport {
        metrics,
        breakdown,
        recommendation,
        advice,
        cooling_off_days,
    }
}

pub(crate) fn run_score(context: &AdvisorContext, args: ScoreArgs) -> Result<(), AppError> {
    let metrics = args.metrics.resolve(context.store.new_metrics())?;
    let engine = context.engine(args.profile)?;
    let report = build_report(&engine, metrics);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render_report(&report);
    }
    Ok(())
}

pub(crate) fn run_save(
    context: &AdvisorContext,
    args: SaveArgs,
) -> Result<SavedCalculation, AppError> {
    let metrics = args.metrics.resolve(context.store.new_metrics())?;
    let engine = context.engine(args.profile)?;
    let report = build_report(&engine, metrics);

    let id = args.id.map(CalculationId);
    let existed = id
        .as_ref()
        .map(|id| context.store.get_by_id(id).is_some())
        .unwrap_or(false);

    let saved = context
        .store
        .save(report.metrics.clone(), report.breakdown.score, id)?;
    context
        .store
        .remember_monthly_income(report.metrics.monthly_income)?;

    info!(id = %saved.id, score = saved.score, updated = existed, "calculation stored");
    render_report(&report);
    println!(
        "\n{} {} as {}",
        if existed { "Updated" } else { "Saved" },
        saved.metrics.display_name(),
        saved.id
    );
    Ok(saved)
}

pub(crate) fn run_list(context: &AdvisorContext) -> Result<(), AppError> {
    let calculations = context.store.list();
    if calculations.is_empty() {
        println!("No saved calculations");
        return Ok(());
    }

    let engine = context.engine(None)?;
    println!("Saved calculations");
    for calculation in &calculations {
        println!(
            "- {} | {} | score {} ({}) | {}",
            calculation.id,
            calculation.metrics.display_name(),
            calculation.score,
            engine.recommendation(calculation.score).label,
            format_saved_at(calculation)
        );
    }
    Ok(())
}

pub(crate) fn run_show(context: &AdvisorContext, id: &str) -> Result<(), AppError> {
    let calculation = context
        .store
        .get_by_id(&CalculationId::from(id))
        .ok_or_else(|| AppError::NotFound(id.to_string()))?;

    let engine = context.engine(None)?;
    let rules = AdviceRules::default();
    let metrics = &calculation.metrics;

    println!("{} (saved {})", metrics.display_name(), format_saved_at(&calculation));
    println!(
        "Price {:.2} | monthly income {:.2} | discount {:.0}%",
        metrics.price, metrics.monthly_income, metrics.discount_percentage
    );
    println!(
        "Stored score {}: {}",
        calculation.score,
        engine.recommendation(calculation.score).label
    );
    render_advice(&rules.advise(metrics, calculation.score));
    Ok(())
}

pub(crate) fn run_delete(context: &AdvisorContext, id: &str) -> Result<(), AppError> {
    let id = CalculationId::from(id);
    match context.store.get_by_id(&id) {
        Some(calculation) => {
            context.store.delete_by_id(&id)?;
            info!(%id, "calculation deleted");
            println!("Deleted {} ({})", calculation.metrics.display_name(), id);
        }
        None => println!("No saved calculation with id {id}"),
    }
    Ok(())
}

pub(crate) fn run_income(context: &AdvisorContext, args: IncomeArgs) -> Result<(), AppError> {
    match args.amount {
        Some(amount) if amount.is_finite() && amount > 0.0 => {
            context.store.remember_monthly_income(amount)?;
            println!("Remembered monthly income {amount:.2}");
        }
        Some(_) => println!("Only positive amounts are remembered"),
        None => {
            let amount = context.store.last_monthly_income();
            if amount > 0.0 {
                println!("Remembered monthly income {amount:.2}");
            } else {
                println!("No monthly income remembered yet");
            }
        }
    }
    Ok(())
}

fn render_report(report: &EvaluationReport) {
    let breakdown = &report.breakdown;

    println!("{}", report.metrics.display_name());
    println!(
        "Score {}/100: {} [{}]",
        breakdown.score, report.recommendation.label, report.recommendation.severity
    );

    println!("\nBreakdown");
    for component in &breakdown.components {
        println!(
            "- {}: {:.1}/10 x {:.1} = {:.1} of {:.1}",
            component.dimension.label(),
            component.sub_score,
            component.weight,
            component.contribution,
            component.max_contribution
        );
    }
    if breakdown.unused_similar_penalty > 0.0 {
        println!(
            "- Unused similar purchases: -{:.1}",
            breakdown.unused_similar_penalty
        );
    }

    render_advice(&report.advice);

    if let Some(days) = report.cooling_off_days {
        let buy_after = Local::now()
            .date_naive()
            .checked_add_days(Days::new(u64::from(days)));
        match buy_after {
            Some(date) => println!(
                "\nCooling-off period ends {date} ({} to go)",
                pluralize_days(days)
            ),
            None => println!("\nCooling-off period: {} to go", pluralize_days(days)),
        }
    }
}

fn render_advice(advice: &[Advice]) {
    if advice.is_empty() {
        println!("\nAdvice: none");
        return;
    }

    println!("\nAdvice");
    for item in advice {
        println!("- [{}] {}", item.severity, item.message);
    }
}

fn format_saved_at(calculation: &SavedCalculation) -> String {
    calculation
        .saved_at()
        .map(|instant| {
            instant
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| "unknown time".to_string())
}
