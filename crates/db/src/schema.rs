use eyre::Result;
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create vendors table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vendors (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            cuisine VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create locations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS locations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create time_slots table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS time_slots (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            vendor_id UUID NULL REFERENCES vendors(id),
            location_id UUID NOT NULL REFERENCES locations(id),
            start_at TIMESTAMP WITH TIME ZONE NOT NULL,
            finish_at TIMESTAMP WITH TIME ZONE NOT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT valid_time_range CHECK (finish_at > start_at)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Several statements, so this goes through the simple query protocol
    pool.execute(
        r#"
        CREATE INDEX IF NOT EXISTS idx_time_slots_location_id ON time_slots(location_id);
        CREATE INDEX IF NOT EXISTS idx_time_slots_vendor_id ON time_slots(vendor_id);
        CREATE INDEX IF NOT EXISTS idx_time_slots_start_at ON time_slots(start_at);
        CREATE INDEX IF NOT EXISTS idx_time_slots_finish_at ON time_slots(finish_at);
        "#,
    )
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
