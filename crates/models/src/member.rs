use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{boat, errors};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub member_id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Boat }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Boat => Entity::has_many(boat::Entity).into(),
        }
    }
}

impl Related<boat::Entity> for Entity {
    fn to() -> RelationDef { Relation::Boat.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// "First Last" as shown in titles.
pub fn compose_full_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.trim(), last_name.trim()).trim().to_string()
}

pub async fn create(db: &DatabaseConnection, first_name: &str, last_name: &str) -> Result<Model, errors::ModelError> {
    if first_name.trim().is_empty() && last_name.trim().is_empty() {
        return Err(errors::ModelError::Validation("member name required".into()));
    }
    let am = ActiveModel {
        first_name: Set(first_name.trim().to_string()),
        last_name: Set(last_name.trim().to_string()),
        full_name: Set(compose_full_name(first_name, last_name)),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_joins_trimmed_parts() {
        assert_eq!(compose_full_name(" Ada ", "Lovelace"), "Ada Lovelace");
        assert_eq!(compose_full_name("", "Nelson"), "Nelson");
    }
}
