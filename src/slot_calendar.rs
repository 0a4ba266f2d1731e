use color_eyre::eyre::Result;
use dotenv::dotenv;
use tracing::info;
use vendorslots::{config::AppConfig, init_tracing};
use vendorslots_core::service::TimeSlotService;
use vendorslots_db::{PgSlotRepository, create_pool};

/// Writes booked time slots as an iCalendar document to stdout.
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_level)?;

    let db_pool = create_pool(&config.database_url, config.max_connections).await?;
    let service = TimeSlotService::new(PgSlotRepository::new(db_pool));

    info!(
        "Exporting calendar: scope={:?}, location={:?}",
        config.calendar_scope, config.calendar_location_id
    );
    let calendar = service
        .calendar(config.calendar_location_id, config.calendar_scope.as_deref())
        .await?;

    print!("{}", calendar);

    Ok(())
}
