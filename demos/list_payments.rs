//! List recent payments
//!
//! ```text
//! MOLLIE_API_KEY=test_... RUST_LOG=mollie_client=debug cargo run --example list_payments -- 25
//! ```
//!
//! Fetches the requested number of payments in as few pages as possible and
//! stays under 600 payments per minute.

use mollie_client::models::ResourceLinks;
use mollie_client::{ClientConfig, DemandIteratorExt, IterateParams, MollieClient};
use std::num::NonZeroU32;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let count = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(10);

    if let Err(e) = run(count).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(count: usize) -> mollie_client::Result<()> {
    let client = MollieClient::from_config(&ClientConfig::from_env()?)?;

    let mut params = IterateParams::new();
    if let Some(budget) = NonZeroU32::new(600) {
        params = params.values_per_minute(budget);
    }

    client
        .payments()
        .iterate(params)
        .take(count)
        .for_each(|payment| {
            println!(
                "{:<16} {:>12} {:<10} {}",
                payment.id,
                payment.amount.to_string(),
                format!("{:?}", payment.status),
                payment.checkout_url().or(payment.dashboard_url()).unwrap_or("-")
            );
        })
        .await
}
