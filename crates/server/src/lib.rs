pub mod csrf;
pub mod errors;
pub mod observability;
pub mod openapi;
pub mod routes;
pub mod selection;
pub mod startup;
pub mod state;

pub use startup::serve;
