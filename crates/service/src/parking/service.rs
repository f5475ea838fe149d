use sea_orm::{
    sea_query::Expr, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use tracing::{info, instrument, warn};

use models::{boat_type, parking, validation::ValidationErrors};

use super::domain::{ParkingDetails, ParkingEditForm, ParkingForm, ParkingFormOptions, ParkingInput};
use crate::errors::ServiceError;
use crate::reference;

/// Parking slot use cases over a SeaORM connection.
#[derive(Clone)]
pub struct ParkingService {
    db: DatabaseConnection,
}

impl ParkingService {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    /// Occupied slots only (non-empty actual-boat marker), ordered by code.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<ParkingDetails>, ServiceError> {
        let rows = parking::Entity::find()
            .find_also_related(boat_type::Entity)
            .filter(
                Condition::all()
                    .add(parking::Column::ActualBoatId.is_not_null())
                    .add(parking::Column::ActualBoatId.ne("")),
            )
            .order_by_asc(parking::Column::ParkingCode)
            .all(&self.db)
            .await
            .map_err(ServiceError::db)?;
        Ok(rows.into_iter().map(|(parking, boat_type)| ParkingDetails { parking, boat_type }).collect())
    }

    #[instrument(skip(self))]
    pub async fn get_details(&self, code: &str) -> Result<ParkingDetails, ServiceError> {
        let (parking, boat_type) = parking::Entity::find_by_id(code.to_string())
            .find_also_related(boat_type::Entity)
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("parking"))?;
        Ok(ParkingDetails { parking, boat_type })
    }

    pub async fn prepare_create_form(&self) -> Result<ParkingFormOptions, ServiceError> {
        Ok(ParkingFormOptions { boat_types: reference::boat_types_by_name(&self.db).await? })
    }

    pub async fn prepare_edit_form(&self, code: &str) -> Result<ParkingEditForm, ServiceError> {
        let parking = self.find(code).await?;
        let options = self.prepare_create_form().await?;
        Ok(ParkingEditForm { parking, options })
    }

    /// Empty codes are rejected with "Please insert a parkingCode"; so are codes
    /// already in use.
    #[instrument(skip(self, form))]
    pub async fn create(&self, form: &ParkingForm) -> Result<parking::Model, ServiceError> {
        let input = self.validate(form).await?;
        if self.exists(&input.parking_code).await? {
            return Err(ServiceError::invalid(
                "parking_code",
                format!("Parking code {} already exists.", input.parking_code),
            ));
        }
        let created = parking::create(
            &self.db,
            &input.parking_code,
            input.boat_type_id,
            input.actual_boat_id.as_deref(),
        )
        .await?;
        info!(parking_code = %created.parking_code, "parking_created");
        Ok(created)
    }

    /// Same contract as boat updates: path and payload codes must match, a
    /// vanished row is `NotFound`, a stale version is `ConcurrencyConflict`.
    #[instrument(skip(self, form))]
    pub async fn update(&self, code: &str, form: &ParkingForm) -> Result<parking::Model, ServiceError> {
        if form.payload_code() != Some(code) {
            return Err(ServiceError::not_found("parking"));
        }
        let input = self.validate(form).await?;

        let mut stmt = parking::Entity::update_many()
            .col_expr(parking::Column::BoatTypeId, Expr::value(input.boat_type_id))
            .col_expr(parking::Column::ActualBoatId, Expr::value(input.actual_boat_id))
            .col_expr(parking::Column::Version, Expr::col(parking::Column::Version).add(1))
            .filter(parking::Column::ParkingCode.eq(code));
        if let Some(version) = input.version {
            stmt = stmt.filter(parking::Column::Version.eq(version));
        }
        let res = stmt.exec(&self.db).await.map_err(ServiceError::db)?;

        if res.rows_affected == 0 {
            if self.exists(code).await? {
                warn!(parking_code = %code, version = ?input.version, "parking_update_conflict");
                return Err(ServiceError::ConcurrencyConflict(format!("parking {code} was changed by another request")));
            }
            return Err(ServiceError::not_found("parking"));
        }

        let updated = self.find(code).await?;
        info!(parking_code = %code, version = updated.version, "parking_updated");
        Ok(updated)
    }

    pub async fn delete(&self, code: &str) -> Result<ParkingDetails, ServiceError> {
        self.get_details(code).await
    }

    /// Boats parked here keep existing with no parking code.
    #[instrument(skip(self))]
    pub async fn confirm_delete(&self, code: &str) -> Result<(), ServiceError> {
        let res = parking::Entity::delete_by_id(code.to_string())
            .exec(&self.db)
            .await
            .map_err(ServiceError::db)?;
        if res.rows_affected == 0 {
            return Err(ServiceError::not_found("parking"));
        }
        info!(parking_code = %code, "parking_deleted");
        Ok(())
    }

    async fn find(&self, code: &str) -> Result<parking::Model, ServiceError> {
        parking::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .ok_or_else(|| ServiceError::not_found("parking"))
    }

    async fn exists(&self, code: &str) -> Result<bool, ServiceError> {
        Ok(parking::Entity::find_by_id(code.to_string())
            .one(&self.db)
            .await
            .map_err(ServiceError::db)?
            .is_some())
    }

    async fn validate(&self, form: &ParkingForm) -> Result<ParkingInput, ServiceError> {
        let input = form.validate()?;
        let mut errors = ValidationErrors::new();
        if boat_type::Entity::find_by_id(input.boat_type_id).one(&self.db).await.map_err(ServiceError::db)?.is_none() {
            errors.add("boat_type_id", format!("Boat type {} does not exist.", input.boat_type_id));
        }
        errors.into_result(input).map_err(ServiceError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_boat, seed_member, seed_parking, seed_type};
    use models::boat;

    fn form(code: &str, boat_type_id: i32, marker: Option<&str>) -> ParkingForm {
        ParkingForm {
            parking_code: Some(code.to_string()),
            boat_type_id: Some(boat_type_id.to_string()),
            actual_boat_id: marker.map(str::to_string),
            version: None,
        }
    }

    #[tokio::test]
    async fn list_skips_unoccupied_slots_and_orders_by_code() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ParkingService::new(db.clone());
        let t = seed_type(&db, "Keel").await?;
        seed_parking(&db, "B2", t.boat_type_id, Some("boat-9")).await?;
        seed_parking(&db, "A1", t.boat_type_id, Some("boat-4")).await?;
        seed_parking(&db, "C3", t.boat_type_id, Some("")).await?;
        seed_parking(&db, "D4", t.boat_type_id, None).await?;

        let list = svc.list().await?;
        let codes: Vec<&str> = list.iter().map(|d| d.parking.parking_code.as_str()).collect();
        assert_eq!(codes, ["A1", "B2"]);
        assert_eq!(list[0].boat_type.as_ref().map(|t| t.name.as_str()), Some("Keel"));
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_empty_code_without_writing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ParkingService::new(db.clone());
        let t = seed_type(&db, "Keel").await?;

        match svc.create(&form("", t.boat_type_id, None)).await {
            Err(ServiceError::Validation(errors)) => {
                assert_eq!(errors.get("parking_code"), ["Please insert a parkingCode".to_string()]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
        assert!(parking::Entity::find().all(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_persists_fresh_code_and_rejects_duplicates() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ParkingService::new(db.clone());
        let t = seed_type(&db, "Keel").await?;

        let created = svc.create(&form("E5", t.boat_type_id, Some("boat-1"))).await?;
        assert_eq!(created.parking_code, "E5");
        assert_eq!(svc.get_details("E5").await?.parking, created);

        let dup = svc.create(&form("E5", t.boat_type_id, None)).await;
        assert!(matches!(dup, Err(ServiceError::Validation(ref e)) if e.has("parking_code")));

        let bad_type = svc.create(&form("E6", t.boat_type_id + 1, None)).await;
        assert!(matches!(bad_type, Err(ServiceError::Validation(ref e)) if e.has("boat_type_id")));
        assert_eq!(parking::Entity::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn update_checks_code_and_version() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ParkingService::new(db.clone());
        let t = seed_type(&db, "Keel").await?;
        let t2 = seed_type(&db, "Multihull").await?;
        let p = seed_parking(&db, "F1", t.boat_type_id, None).await?;

        let mismatched = svc.update("F2", &form("F1", t2.boat_type_id, None)).await;
        assert!(matches!(mismatched, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.get_details("F1").await?.parking, p);

        let mut f = form("F1", t2.boat_type_id, Some("boat-2"));
        f.version = Some(p.version.to_string());
        let updated = svc.update("F1", &f).await?;
        assert_eq!(updated.boat_type_id, t2.boat_type_id);
        assert_eq!(updated.version, 1);

        let stale = svc.update("F1", &f).await;
        assert!(matches!(stale, Err(ServiceError::ConcurrencyConflict(_))));

        svc.confirm_delete("F1").await?;
        assert!(matches!(svc.update("F1", &f).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn deleting_slot_unparks_boat() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let svc = ParkingService::new(db.clone());
        let t = seed_type(&db, "Keel").await?;
        let m = seed_member(&db, "Dee", "Port").await?;
        seed_parking(&db, "G1", t.boat_type_id, Some("x")).await?;
        let b = seed_boat(&db, m.member_id, t.boat_type_id, "Keelboat", Some("G1")).await?;

        assert_eq!(svc.delete("G1").await?.parking.parking_code, "G1");
        svc.confirm_delete("G1").await?;
        assert!(matches!(svc.get_details("G1").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.confirm_delete("G1").await, Err(ServiceError::NotFound(_))));

        let reloaded = boat::Entity::find_by_id(b.boat_id).one(&db).await?.expect("boat kept");
        assert_eq!(reloaded.parking_code, None);
        Ok(())
    }
}
