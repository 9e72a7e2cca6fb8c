mod cli;
mod demo;
mod infra;
mod provider;
mod routes;
mod server;

use invest_check::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
