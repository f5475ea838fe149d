use serde::{Deserialize, Serialize};

use models::{
    boat_type, parking,
    validation::{self, ValidationErrors},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParkingForm {
    pub parking_code: Option<String>,
    pub boat_type_id: Option<String>,
    pub actual_boat_id: Option<String>,
    pub version: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParkingInput {
    pub parking_code: String,
    pub boat_type_id: i32,
    pub actual_boat_id: Option<String>,
    pub version: Option<i32>,
}

impl ParkingForm {
    /// Trimmed payload code, if any.
    pub fn payload_code(&self) -> Option<&str> {
        validation::non_blank(self.parking_code.as_deref())
    }

    pub fn validate(&self) -> Result<ParkingInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let code = self.payload_code().unwrap_or_default();
        if let Err(e) = parking::validate_code(code) {
            errors.add("parking_code", e.message());
        }
        let boat_type_id = validation::required_int(&mut errors, "boat_type_id", "BoatTypeId", self.boat_type_id.as_deref());
        let actual_boat_id = validation::optional_text(
            &mut errors, "actual_boat_id", "ActualBoatId", self.actual_boat_id.as_deref(), parking::MAX_ACTUAL_BOAT_LEN,
        );
        let version = validation::optional_int(&mut errors, "version", "Version", self.version.as_deref());

        match boat_type_id {
            Some(boat_type_id) if errors.is_empty() => Ok(ParkingInput {
                parking_code: code.to_string(),
                boat_type_id,
                actual_boat_id,
                version,
            }),
            _ => Err(errors),
        }
    }
}

/// A slot with its expected boat type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkingDetails {
    #[serde(flatten)]
    pub parking: parking::Model,
    pub boat_type: Option<boat_type::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkingFormOptions {
    pub boat_types: Vec<boat_type::Model>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParkingEditForm {
    pub parking: parking::Model,
    pub options: ParkingFormOptions,
}
