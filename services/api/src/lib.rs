mod cli;
mod infra;
mod quote;
mod routes;
mod server;

use shipping_fee::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
