use crate::models::DbTimeSlot;
use chrono::{DateTime, Utc};
use eyre::{Result, eyre};
use sqlx::{Pool, Postgres, QueryBuilder};
use uuid::Uuid;
use vendorslots_core::{
    models::time_slot::TimeSlot,
    scope::{Scope, SlotFilter},
};

const SLOT_COLUMNS: &str = "id, vendor_id, location_id, start_at, finish_at, created_at";

pub async fn create_time_slot(pool: &Pool<Postgres>, slot: &TimeSlot) -> Result<DbTimeSlot> {
    tracing::debug!(
        "Creating time slot: id={}, location_id={}, vendor_id={:?}",
        slot.id, slot.location_id, slot.vendor_id
    );

    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        INSERT INTO time_slots (id, vendor_id, location_id, start_at, finish_at, created_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, vendor_id, location_id, start_at, finish_at, created_at
        "#,
    )
    .bind(slot.id)
    .bind(slot.vendor_id)
    .bind(slot.location_id)
    .bind(slot.start_at)
    .bind(slot.finish_at)
    .bind(slot.created_at)
    .fetch_one(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slot_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbTimeSlot>> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, vendor_id, location_id, start_at, finish_at, created_at
        FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(time_slot)
}

pub async fn get_time_slots_by_location_excluding(
    pool: &Pool<Postgres>,
    location_id: Uuid,
    exclude_id: Uuid,
) -> Result<Vec<DbTimeSlot>> {
    let time_slots = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        SELECT id, vendor_id, location_id, start_at, finish_at, created_at
        FROM time_slots
        WHERE location_id = $1 AND id != $2
        ORDER BY start_at ASC
        "#,
    )
    .bind(location_id)
    .bind(exclude_id)
    .fetch_all(pool)
    .await?;

    Ok(time_slots)
}

pub async fn list_time_slots(
    pool: &Pool<Postgres>,
    filter: SlotFilter,
    now: DateTime<Utc>,
    location_id: Option<Uuid>,
) -> Result<Vec<DbTimeSlot>> {
    let mut query = list_query(filter, now, location_id);
    tracing::debug!("Listing time slots: sql={}", query.sql());

    let time_slots = query
        .build_query_as::<DbTimeSlot>()
        .fetch_all(pool)
        .await?;

    Ok(time_slots)
}

fn list_query(
    filter: SlotFilter,
    now: DateTime<Utc>,
    location_id: Option<Uuid>,
) -> QueryBuilder<'static, Postgres> {
    let mut query = QueryBuilder::<Postgres>::new("SELECT ");
    query.push(SLOT_COLUMNS).push(" FROM time_slots WHERE TRUE");

    if let SlotFilter::Scope(scope) = filter {
        push_scope(&mut query, scope, now);
    }
    if let Some(location_id) = location_id {
        query.push(" AND location_id = ").push_bind(location_id);
    }
    query.push(" ORDER BY start_at ASC");
    query
}

fn push_scope(query: &mut QueryBuilder<'_, Postgres>, scope: Scope, now: DateTime<Utc>) {
    match scope {
        Scope::Upcoming => {
            query.push(" AND start_at > ").push_bind(now);
        }
        Scope::Expired => {
            query.push(" AND finish_at < ").push_bind(now);
        }
        Scope::Current => {
            query
                .push(" AND start_at < ")
                .push_bind(now)
                .push(" AND finish_at > ")
                .push_bind(now);
        }
        Scope::CurrentOrUpcoming => {
            query.push(" AND finish_at >= ").push_bind(now);
        }
    }
}

pub async fn update_time_slot(pool: &Pool<Postgres>, slot: &TimeSlot) -> Result<DbTimeSlot> {
    let time_slot = sqlx::query_as::<_, DbTimeSlot>(
        r#"
        UPDATE time_slots
        SET vendor_id = $2, location_id = $3, start_at = $4, finish_at = $5
        WHERE id = $1
        RETURNING id, vendor_id, location_id, start_at, finish_at, created_at
        "#,
    )
    .bind(slot.id)
    .bind(slot.vendor_id)
    .bind(slot.location_id)
    .bind(slot.start_at)
    .bind(slot.finish_at)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| eyre!("Time slot not found"))?;

    Ok(time_slot)
}

pub async fn delete_time_slot(pool: &Pool<Postgres>, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM time_slots
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}
