#![cfg(test)]
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use models::{boat, boat_type, member, parking};

/// Fresh, migrated in-memory database. One pooled connection, so every
/// query sees the same SQLite memory store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_member(db: &DatabaseConnection, first: &str, last: &str) -> Result<member::Model, anyhow::Error> {
    Ok(member::create(db, first, last).await?)
}

pub async fn seed_type(db: &DatabaseConnection, name: &str) -> Result<boat_type::Model, anyhow::Error> {
    Ok(boat_type::create(db, name).await?)
}

pub async fn seed_parking(
    db: &DatabaseConnection,
    code: &str,
    boat_type_id: i32,
    actual_boat_id: Option<&str>,
) -> Result<parking::Model, anyhow::Error> {
    Ok(parking::create(db, code, boat_type_id, actual_boat_id).await?)
}

pub async fn seed_boat(
    db: &DatabaseConnection,
    member_id: i32,
    boat_type_id: i32,
    class: &str,
    parking_code: Option<&str>,
) -> Result<boat::Model, anyhow::Error> {
    let values = boat::BoatValues {
        member_id,
        boat_class: class.to_string(),
        hull_colour: Some("White".into()),
        sail_number: None,
        hull_length: 12.0,
        boat_type_id,
        parking_code: parking_code.map(str::to_string),
    };
    Ok(boat::create(db, values).await?)
}
