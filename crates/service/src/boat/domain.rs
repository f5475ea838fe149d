use serde::{Deserialize, Serialize};

use models::{
    boat::{self, BoatValues},
    boat_type, member, parking,
    validation::{self, ValidationErrors},
};

/// Boat form as submitted. Every field is raw text so that type errors can be
/// reported per field instead of rejecting the whole request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoatForm {
    pub boat_id: Option<String>,
    pub member_id: Option<String>,
    pub boat_class: Option<String>,
    pub hull_colour: Option<String>,
    pub sail_number: Option<String>,
    pub hull_length: Option<String>,
    pub boat_type_id: Option<String>,
    pub parking_code: Option<String>,
    /// Concurrency token from the edit form; absent means last writer wins.
    pub version: Option<String>,
}

/// Typed, validated boat submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BoatInput {
    pub boat_id: Option<i32>,
    pub values: BoatValues,
    pub version: Option<i32>,
}

impl BoatForm {
    /// Fill a blank owner from the current selection.
    pub fn with_default_member(mut self, member_id: Option<i32>) -> Self {
        if validation::non_blank(self.member_id.as_deref()).is_none() {
            self.member_id = member_id.map(|id| id.to_string());
        }
        self
    }

    /// Payload id, `None` when absent or not a number.
    pub fn payload_id(&self) -> Option<i32> {
        validation::non_blank(self.boat_id.as_deref()).and_then(|s| s.parse().ok())
    }

    /// Required fields, types and value ranges. Reference existence is
    /// checked by the service.
    pub fn validate(&self) -> Result<BoatInput, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let boat_id = validation::optional_int(&mut errors, "boat_id", "BoatId", self.boat_id.as_deref());
        let member_id = validation::required_int(&mut errors, "member_id", "MemberId", self.member_id.as_deref());
        let boat_class = validation::required_text(&mut errors, "boat_class", "BoatClass", self.boat_class.as_deref());
        if let Some(class) = &boat_class {
            if let Err(e) = boat::validate_boat_class(class) {
                errors.add("boat_class", e.message());
            }
        }
        let hull_colour = validation::optional_text(
            &mut errors, "hull_colour", "HullColour", self.hull_colour.as_deref(), boat::MAX_COLOUR_LEN,
        );
        let sail_number = validation::optional_text(
            &mut errors, "sail_number", "SailNumber", self.sail_number.as_deref(), boat::MAX_SAIL_NUMBER_LEN,
        );
        let hull_length = validation::required_f64(&mut errors, "hull_length", "HullLength", self.hull_length.as_deref());
        if let Some(len) = hull_length {
            if let Err(e) = boat::validate_hull_length(len) {
                errors.add("hull_length", e.message());
            }
        }
        let boat_type_id = validation::required_int(&mut errors, "boat_type_id", "BoatTypeId", self.boat_type_id.as_deref());
        let parking_code = validation::optional_text(
            &mut errors, "parking_code", "ParkingCode", self.parking_code.as_deref(), parking::MAX_CODE_LEN,
        );
        let version = validation::optional_int(&mut errors, "version", "Version", self.version.as_deref());

        match (member_id, boat_class, hull_length, boat_type_id) {
            (Some(member_id), Some(boat_class), Some(hull_length), Some(boat_type_id)) if errors.is_empty() => {
                Ok(BoatInput {
                    boat_id,
                    values: BoatValues {
                        member_id,
                        boat_class,
                        hull_colour,
                        sail_number,
                        hull_length,
                        boat_type_id,
                        parking_code,
                    },
                    version,
                })
            }
            _ => Err(errors),
        }
    }
}

/// A boat with its type, owner and parking slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoatDetails {
    #[serde(flatten)]
    pub boat: boat::Model,
    pub boat_type: Option<boat_type::Model>,
    pub member: Option<member::Model>,
    pub parking: Option<parking::Model>,
}

/// Selection lists for the create/edit forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoatFormOptions {
    pub boat_types: Vec<boat_type::Model>,
    pub members: Vec<member::Model>,
    /// Free codes in order, then `None` for "no parking".
    pub parking_codes: Vec<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoatEditForm {
    pub boat: boat::Model,
    pub options: BoatFormOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> BoatForm {
        BoatForm {
            member_id: Some("1".into()),
            boat_class: Some("Dinghy".into()),
            hull_length: Some("4.2".into()),
            boat_type_id: Some("2".into()),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_produces_typed_input() {
        let input = form().validate().unwrap();
        assert_eq!(input.values.member_id, 1);
        assert_eq!(input.values.hull_length, 4.2);
        assert_eq!(input.values.parking_code, None);
        assert_eq!(input.version, None);
    }

    #[test]
    fn every_problem_is_reported() {
        let bad = BoatForm {
            member_id: None,
            boat_class: Some(" ".into()),
            hull_length: Some("long".into()),
            boat_type_id: Some("two".into()),
            ..Default::default()
        };
        let errors = bad.validate().unwrap_err();
        for field in ["member_id", "boat_class", "hull_length", "boat_type_id"] {
            assert!(errors.has(field), "missing error for {field}");
        }
    }

    #[test]
    fn blank_optional_fields_become_none() {
        let f = BoatForm { hull_colour: Some("  ".into()), parking_code: Some(String::new()), ..form() };
        let input = f.validate().unwrap();
        assert_eq!(input.values.hull_colour, None);
        assert_eq!(input.values.parking_code, None);
    }

    #[test]
    fn member_defaults_only_when_blank() {
        let f = BoatForm { member_id: Some("".into()), ..form() }.with_default_member(Some(9));
        assert_eq!(f.member_id.as_deref(), Some("9"));
        let f = form().with_default_member(Some(9));
        assert_eq!(f.member_id.as_deref(), Some("1"));
    }

    #[test]
    fn payload_id_ignores_garbage() {
        assert_eq!(BoatForm { boat_id: Some("12".into()), ..form() }.payload_id(), Some(12));
        assert_eq!(BoatForm { boat_id: Some("x".into()), ..form() }.payload_id(), None);
        assert_eq!(form().payload_id(), None);
    }
}
