use crate::models::DbLocation;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_location(pool: &Pool<Postgres>, name: &str) -> Result<DbLocation> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating location: id={}, name={}", id, name);

    let location = sqlx::query_as::<_, DbLocation>(
        r#"
        INSERT INTO locations (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(location)
}

pub async fn get_location_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbLocation>> {
    let location = sqlx::query_as::<_, DbLocation>(
        r#"
        SELECT id, name, created_at
        FROM locations
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(location)
}
