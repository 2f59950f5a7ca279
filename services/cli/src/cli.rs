use crate::commands::{
    run_delete, run_income, run_list, run_save, run_score, run_show, IncomeArgs, SaveArgs,
    ScoreArgs,
};
use crate::infra::AdvisorContext;
use clap::{Parser, Subcommand};
use purchase_advisor::config::AdvisorConfig;
use purchase_advisor::error::AppError;
use purchase_advisor::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "purchase-advisor",
    about = "Score a prospective purchase and keep a history of past decisions",
    version
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a purchase and print the recommendation and advice
    Score(ScoreArgs),
    /// Score a purchase and store the result
    Save(SaveArgs),
    /// List saved calculations, newest first
    List,
    /// Show one saved calculation
    Show {
        /// Identifier printed by `save` or `list`
        id: String,
    },
    /// Delete a saved calculation
    Delete {
        /// Identifier printed by `save` or `list`
        id: String,
    },
    /// Show or update the remembered monthly income
    Income(IncomeArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AdvisorConfig::load()?;
    telemetry::init(&config.telemetry, config.environment)?;
    debug!(
        data_dir = %config.storage.data_dir.display(),
        profile = %config.scoring.profile,
        "advisor configured"
    );

    let context = AdvisorContext::new(config);

    match cli.command {
        Command::Score(args) => run_score(&context, args),
        Command::Save(args) => run_save(&context, args).map(|_| ()),
        Command::List => run_list(&context),
        Command::Show { id } => run_show(&context, &id),
        Command::Delete { id } => run_delete(&context, &id),
        Command::Income(args) => run_income(&context, args),
    }
}
