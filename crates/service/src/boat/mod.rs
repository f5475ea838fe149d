//! Boats: form domain types and the service operating on them.

pub mod domain;
pub mod service;

pub use domain::{BoatDetails, BoatEditForm, BoatForm, BoatFormOptions, BoatInput};
pub use service::BoatService;
