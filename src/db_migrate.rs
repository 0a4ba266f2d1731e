use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use vendorslots::{config::AppConfig, init_tracing};
use vendorslots_db::schema::initialize_database;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_level)?;

    info!("Connecting to database...");
    let db_pool = vendorslots_db::create_pool(&config.database_url, config.max_connections).await?;

    initialize_database(&db_pool).await?;

    Ok(())
}
