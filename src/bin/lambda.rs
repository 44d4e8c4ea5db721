//! AWS Lambda entry point for hoops-crawler
//!
//! Deploy with `cargo lambda build --release --features lambda`.
//! Environment: `S3_BUCKET` (config and snapshot bucket), `S3_PREFIX` (key prefix),
//! `RUST_LOG` (log filter).

use hoops_crawler::lambda::handler;
use lambda_runtime::{Error as LambdaError, service_fn};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    info!("hoops-crawler Lambda starting...");
    lambda_runtime::run(service_fn(handler)).await
}
