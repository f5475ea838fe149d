//! Parking slots keyed by parking code.

pub mod domain;
pub mod service;

pub use domain::{ParkingDetails, ParkingEditForm, ParkingForm, ParkingFormOptions, ParkingInput};
pub use service::ParkingService;
