use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{boat, boat_type, errors};

pub const MAX_CODE_LEN: usize = 16;
pub const MAX_ACTUAL_BOAT_LEN: usize = 32;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "parking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub parking_code: String,
    pub boat_type_id: i32,
    /// Occupancy marker; `None` or empty means the slot is free.
    pub actual_boat_id: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { BoatType, Boat }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::BoatType => Entity::belongs_to(boat_type::Entity)
                .from(Column::BoatTypeId)
                .to(boat_type::Column::BoatTypeId)
                .into(),
            Relation::Boat => Entity::has_many(boat::Entity).into(),
        }
    }
}

impl Related<boat_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::BoatType.def() }
}

impl Related<boat::Entity> for Entity {
    fn to() -> RelationDef { Relation::Boat.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_code(code: &str) -> Result<(), errors::ModelError> {
    if code.trim().is_empty() {
        return Err(errors::ModelError::Validation("Please insert a parkingCode".into()));
    }
    if code.chars().count() > MAX_CODE_LEN {
        return Err(errors::ModelError::Validation(format!("parking code too long (<={MAX_CODE_LEN})")));
    }
    if code.chars().any(char::is_whitespace) {
        return Err(errors::ModelError::Validation("parking code must not contain spaces".into()));
    }
    Ok(())
}

pub async fn create(
    db: &DatabaseConnection,
    parking_code: &str,
    boat_type_id: i32,
    actual_boat_id: Option<&str>,
) -> Result<Model, errors::ModelError> {
    validate_code(parking_code)?;
    let am = ActiveModel {
        parking_code: Set(parking_code.to_string()),
        boat_type_id: Set(boat_type_id),
        actual_boat_id: Set(actual_boat_id.map(str::to_string)),
        version: Set(0),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_rules() {
        assert!(validate_code("P1").is_ok());
        assert_eq!(validate_code("  ").unwrap_err().message(), "Please insert a parkingCode");
        assert!(validate_code("P 1").is_err());
        assert!(validate_code(&"X".repeat(MAX_CODE_LEN + 1)).is_err());
    }
}
