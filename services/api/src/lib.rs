mod cli;
mod infra;
mod report;
mod routes;
mod server;

use employee_pairs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
