mod startup;

use tracing::info;

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Initialize logging
    startup::init_logging()?;

    info!("Starting calendar lookahead");

    // Load configuration
    let config = startup::load_config()?;

    // Refresh the feed and print today's digest
    startup::run(config).await
}
