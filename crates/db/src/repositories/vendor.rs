use crate::models::DbVendor;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_vendor(pool: &Pool<Postgres>, name: &str, cuisine: &str) -> Result<DbVendor> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating vendor: id={}, name={}, cuisine={}", id, name, cuisine);

    let vendor = sqlx::query_as::<_, DbVendor>(
        r#"
        INSERT INTO vendors (id, name, cuisine, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, cuisine, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(cuisine)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(vendor)
}

pub async fn get_vendor_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbVendor>> {
    let vendor = sqlx::query_as::<_, DbVendor>(
        r#"
        SELECT id, name, cuisine, created_at
        FROM vendors
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    if vendor.is_none() {
        tracing::debug!("Vendor not found: id={}", id);
    }

    Ok(vendor)
}
