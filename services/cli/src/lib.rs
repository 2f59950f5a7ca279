mod cli;
mod commands;
mod infra;

use purchase_advisor::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
