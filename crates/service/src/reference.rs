//! Reference data used to populate selection inputs.
//!
//! Every function returns a plain ordered list; nothing here knows about forms
//! or rendering.

use sea_orm::{
    sea_query::Query, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use models::{boat, boat_type, member, parking};

use crate::errors::ServiceError;

/// All boat types ordered by name.
pub async fn boat_types_by_name(db: &DatabaseConnection) -> Result<Vec<boat_type::Model>, ServiceError> {
    boat_type::Entity::find()
        .order_by_asc(boat_type::Column::Name)
        .order_by_asc(boat_type::Column::BoatTypeId)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// All members ordered by last name, then first name.
pub async fn members_by_name(db: &DatabaseConnection) -> Result<Vec<member::Model>, ServiceError> {
    member::Entity::find()
        .order_by_asc(member::Column::LastName)
        .order_by_asc(member::Column::FirstName)
        .order_by_asc(member::Column::MemberId)
        .all(db)
        .await
        .map_err(ServiceError::db)
}

/// Parking codes not held by any boat, ordered by code, followed by the
/// `None` ("no parking") sentinel.
///
/// With `except_boat` set, the codes held by that boat stay available so an
/// edit form can keep the boat's current slot.
pub async fn available_parking_codes(
    db: &DatabaseConnection,
    except_boat: Option<i32>,
) -> Result<Vec<Option<String>>, ServiceError> {
    let mut occupied = Query::select();
    occupied
        .column(boat::Column::ParkingCode)
        .from(boat::Entity)
        .and_where(boat::Column::ParkingCode.is_not_null());
    if let Some(id) = except_boat {
        occupied.and_where(boat::Column::BoatId.ne(id));
    }

    let free: Vec<String> = parking::Entity::find()
        .select_only()
        .column(parking::Column::ParkingCode)
        .filter(parking::Column::ParkingCode.not_in_subquery(occupied.to_owned()))
        .order_by_asc(parking::Column::ParkingCode)
        .into_tuple()
        .all(db)
        .await
        .map_err(ServiceError::db)?;

    let mut codes: Vec<Option<String>> = free.into_iter().map(Some).collect();
    codes.push(None);
    Ok(codes)
}
