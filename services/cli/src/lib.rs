mod cli;
mod commands;
mod infra;

use rubric_engine::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
