use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{boat, errors, parking};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boat_type")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub boat_type_id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Boat, Parking }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Boat => Entity::has_many(boat::Entity).into(),
            Relation::Parking => Entity::has_many(parking::Entity).into(),
        }
    }
}

impl Related<boat::Entity> for Entity {
    fn to() -> RelationDef { Relation::Boat.def() }
}

impl Related<parking::Entity> for Entity {
    fn to() -> RelationDef { Relation::Parking.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("boat type name required".into())); }
    if name.chars().count() > 64 { return Err(errors::ModelError::Validation("boat type name too long (<=64)".into())); }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    let am = ActiveModel { name: Set(name.trim().to_string()), ..Default::default() };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
