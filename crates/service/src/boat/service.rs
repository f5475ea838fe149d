use std::collections::{BTreeSet, HashMap};

use sea_orm::{
    sea_query::Expr, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument, warn};

use models::{boat, boat_type, member, parking, validation::ValidationErrors};

use super::domain::{BoatDetails, BoatEditForm, BoatForm, BoatFormOptions, BoatInput};
use crate::errors::ServiceError;
use crate::reference;

/// Boat use cases over a SeaORM connection.
#[derive(Clone)]
pub struct BoatService {
    db: DatabaseConnection,
}

impl BoatService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Boats owned by `member_id`, ordered by boat class.
    #[instrument(skip(self))]
    pub async fn list_for_member(&self, member_id: i32) -> Result<Vec<BoatDetails>, ServiceError> {
        let boats = boat::Entity::find()
            .filter(boat::Column::MemberId.eq(member_id))
            .order_by_asc(boat::Column::BoatClass)
            .order_by_asc(boat::Column::BoatId)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        self.with_references(boats).await
    }

    #[instrument(skip(self))]
    pub async fn get_details(&self, id: i32) -> Result<BoatDetails, ServiceError> {
        let found = self.find(id).await?;
        let mut details = self.with_references(vec![found]).await?;
        details.pop().ok_or_else(|| ServiceError::not_found("boat"))
    }

    /// Lists for a new boat: every free parking code plus "no parking".
    pub async fn prepare_create_form(&self) -> Result<BoatFormOptions, ServiceError> {
        self.form_options(None).await
    }

    /// Lists for editing boat `id`; its own parking code stays selectable.
    /// Does not require the boat to exist.
    pub async fn edit_options(&self, id: i32) -> Result<BoatFormOptions, ServiceError> {
        self.form_options(Some(id)).await
    }

    #[instrument(skip(self))]
    pub async fn prepare_edit_form(&self, id: i32) -> Result<BoatEditForm, ServiceError> {
        let boat = self.find(id).await?;
        let options = self.edit_options(id).await?;
        Ok(BoatEditForm { boat, options })
    }

    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &BoatForm) -> Result<boat::Model, ServiceError> {
        let input = self.validate(form).await?;
        let created = boat::create(&self.db, input.values).await?;
        info!(boat_id = created.boat_id, member_id = created.member_id, "boat_created");
        Ok(created)
    }

    /// Replace boat `id` with the submitted values.
    ///
    /// The payload must name the same boat as the path. When the row is not
    /// updated, a vanished row is `NotFound` and a still-present row (stale
    /// version) is `ConcurrencyConflict`.
    #[instrument(skip(self, form))]
    pub async fn update(&self, id: i32, form: &BoatForm) -> Result<boat::Model, ServiceError> {
        if form.payload_id() != Some(id) {
            return Err(ServiceError::not_found("boat"));
        }
        let input = self.validate(form).await?;
        let v = input.values;

        let mut stmt = boat::Entity::update_many()
            .col_expr(boat::Column::MemberId, Expr::value(v.member_id))
            .col_expr(boat::Column::BoatClass, Expr::value(v.boat_class))
            .col_expr(boat::Column::HullColour, Expr::value(v.hull_colour))
            .col_expr(boat::Column::SailNumber, Expr::value(v.sail_number))
            .col_expr(boat::Column::HullLength, Expr::value(v.hull_length))
            .col_expr(boat::Column::BoatTypeId, Expr::value(v.boat_type_id))
            .col_expr(boat::Column::ParkingCode, Expr::value(v.parking_code))
            .col_expr(boat::Column::Version, Expr::col(boat::Column::Version).add(1))
            .filter(boat::Column::BoatId.eq(id));
        if let Some(version) = input.version {
            stmt = stmt.filter(boat::Column::Version.eq(version));
        }
        let res = stmt.exec(&self.db).await.map_err(ServiceError::db)?;

        if res.rows_affected == 0 {
            if self.exists(id).await? {
                warn!(boat_id = id, version = ?input.version, "boat_update_conflict");
                return Err(ServiceError::ConcurrencyConflict(format!("boat {id} was changed by another request")));
            }
            return Err(ServiceError::not_found("boat"));
        }

        let updated = self.find(id).await?;
        info!(boat_id = id, version = updated.version, "boat_updated");
        Ok(updated)
    }

    /// First delete step: the record to confirm.
    pub async fn delete(&self, id: i32) -> Result<BoatDetails, ServiceError> {
        self.get_details(id).await
    }

    /// Second delete step: remove the row.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = boat::Entity::delete_by_id(id).exec(&self.db).await.map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("boat"));
        }
        info!(boat_id = id, "boat_deleted");
        Ok(())
    }

    async fn find(&self, id: i32) -> Result<boat::Model, ServiceError> {
        boat::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("boat"))
    }

    async fn exists(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(boat::Entity::find_by_id(id).one(&self.db).await.map_err(ServiceError::db)?.is_some())
    }

    async fn form_options(&self, except_boat: Option<i32>) -> Result<BoatFormOptions, ServiceError> {
        Ok(BoatFormOptions {
            boat_types: reference::boat_types_by_name(&self.db).await?,
            members: reference::members_by_name(&self.db).await?,
            parking_codes: reference::available_parking_codes(&self.db, except_boat).await?,
        })
    }

    /// Form rules plus existence of the referenced member, type and slot.
    async fn validate(&self, form: &BoatForm) -> Result<BoatInput, ServiceError> {
        let input = form.validate()?;
        let v = &input.values;
        let mut errors = ValidationErrors::new();

        if member::Entity::find_by_id(v.member_id).one(&self.db).await.map_err(ServiceError::db)?.is_none() {
            errors.add("member_id", format!("Member {} does not exist.", v.member_id));
        }
        if boat_type::Entity::find_by_id(v.boat_type_id).one(&self.db).await.map_err(ServiceError::db)?.is_none() {
            errors.add("boat_type_id", format!("Boat type {} does not exist.", v.boat_type_id));
        }
        if let Some(code) = &v.parking_code {
            if parking::Entity::find_by_id(code.clone()).one(&self.db).await.map_err(ServiceError::db)?.is_none() {
                errors.add("parking_code", format!("Parking {code} does not exist."));
            }
        }
        errors.into_result(input).map_err(ServiceError::from)
    }

    /// Attach type, owner and slot rows with one query per table.
    async fn with_references(&self, boats: Vec<boat::Model>) -> Result<Vec<BoatDetails>, ServiceError> {
        if boats.is_empty() {
            return Ok(Vec::new());
        }
        let type_ids: BTreeSet<i32> = boats.iter().map(|b| b.boat_type_id).collect();
        let member_ids: BTreeSet<i32> = boats.iter().map(|b| b.member_id).collect();
        let codes: BTreeSet<String> = boats.iter().filter_map(|b| b.parking_code.clone()).collect();

        let types: HashMap<i32, boat_type::Model> = boat_type::Entity::find()
            .filter(boat_type::Column::BoatTypeId.is_in(type_ids))
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?
            .into_iter()
            .map(|t| (t.boat_type_id, t))
            .collect();
        let members: HashMap<i32, member::Model> = member::Entity::find()
            .filter(member::Column::MemberId.is_in(member_ids))
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?
            .into_iter()
            .map(|m| (m.member_id, m))
            .collect();
        let slots: HashMap<String, parking::Model> = if codes.is_empty() {
            HashMap::new()
        } else {
            parking::Entity::find()
                .filter(parking::Column::ParkingCode.is_in(codes))
                .all(&self.db)
                .await
                .map_err(ServiceError::db)?
                .into_iter()
                .map(|p| (p.parking_code.clone(), p))
                .collect()
        };

        Ok(boats
            .into_iter()
            .map(|boat| BoatDetails {
                boat_type: types.get(&boat.boat_type_id).cloned(),
                member: members.get(&boat.member_id).cloned(),
                parking: boat.parking_code.as_ref().and_then(|c| slots.get(c).cloned()),
                boat,
            })
            .collect())
    }
}
