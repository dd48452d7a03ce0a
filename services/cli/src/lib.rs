mod catalog;
mod cli;
mod recipes;

use recipe_catalog::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
