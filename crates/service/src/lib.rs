//! Service layer providing the marina's business operations on top of `models`.
//! - Boats and parking slots: list, details, form preparation, create, update, delete.
//! - Reference data for selection inputs as plain ordered lists.
//! - Selected-member resolution independent of how the selection is stored.

pub mod errors;
pub mod reference;
pub mod member_service;
pub mod selection;
pub mod boat;
pub mod parking;
#[cfg(test)]
pub mod test_support;
