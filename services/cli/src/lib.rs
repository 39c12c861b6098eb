mod cli;
mod commands;
mod infra;

use loot_arbiter::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
