//! SeaORM entities for the marina schema plus the field-level validators
//! shared by the service layer.

pub mod errors;
pub mod validation;
pub mod db;
pub mod member;
pub mod boat_type;
pub mod parking;
pub mod boat;
