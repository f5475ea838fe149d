use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use serde::{Deserialize, Serialize};

use crate::{boat_type, errors, member, parking};

pub const MAX_CLASS_LEN: usize = 64;
pub const MAX_COLOUR_LEN: usize = 32;
pub const MAX_SAIL_NUMBER_LEN: usize = 32;
/// Longest hull accepted, in feet.
pub const MAX_HULL_LENGTH: f64 = 500.0;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "boat")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub boat_id: i32,
    pub member_id: i32,
    pub boat_class: String,
    pub hull_colour: Option<String>,
    pub sail_number: Option<String>,
    pub hull_length: f64,
    pub boat_type_id: i32,
    pub parking_code: Option<String>,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Member, BoatType, Parking }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Member => Entity::belongs_to(member::Entity)
                .from(Column::MemberId)
                .to(member::Column::MemberId)
                .into(),
            Relation::BoatType => Entity::belongs_to(boat_type::Entity)
                .from(Column::BoatTypeId)
                .to(boat_type::Column::BoatTypeId)
                .into(),
            Relation::Parking => Entity::belongs_to(parking::Entity)
                .from(Column::ParkingCode)
                .to(parking::Column::ParkingCode)
                .into(),
        }
    }
}

impl Related<member::Entity> for Entity {
    fn to() -> RelationDef { Relation::Member.def() }
}

impl Related<boat_type::Entity> for Entity {
    fn to() -> RelationDef { Relation::BoatType.def() }
}

impl Related<parking::Entity> for Entity {
    fn to() -> RelationDef { Relation::Parking.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_boat_class(class: &str) -> Result<(), errors::ModelError> {
    if class.trim().is_empty() { return Err(errors::ModelError::Validation("The BoatClass field is required.".into())); }
    if class.chars().count() > MAX_CLASS_LEN {
        return Err(errors::ModelError::Validation(format!("boat class too long (<={MAX_CLASS_LEN})")));
    }
    Ok(())
}

pub fn validate_hull_length(len: f64) -> Result<(), errors::ModelError> {
    if !len.is_finite() || len <= 0.0 {
        return Err(errors::ModelError::Validation("hull length must be greater than zero".into()));
    }
    if len > MAX_HULL_LENGTH {
        return Err(errors::ModelError::Validation(format!("hull length must be at most {MAX_HULL_LENGTH}")));
    }
    Ok(())
}

/// Column values for a new or replaced boat row.
#[derive(Clone, Debug, PartialEq)]
pub struct BoatValues {
    pub member_id: i32,
    pub boat_class: String,
    pub hull_colour: Option<String>,
    pub sail_number: Option<String>,
    pub hull_length: f64,
    pub boat_type_id: i32,
    pub parking_code: Option<String>,
}

pub async fn create(db: &DatabaseConnection, values: BoatValues) -> Result<Model, errors::ModelError> {
    validate_boat_class(&values.boat_class)?;
    validate_hull_length(values.hull_length)?;
    let am = ActiveModel {
        member_id: Set(values.member_id),
        boat_class: Set(values.boat_class),
        hull_colour: Set(values.hull_colour),
        sail_number: Set(values.sail_number),
        hull_length: Set(values.hull_length),
        boat_type_id: Set(values.boat_type_id),
        parking_code: Set(values.parking_code),
        version: Set(0),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
