use sea_orm::{DatabaseConnection, EntityTrait};

use models::member;
use crate::errors::ServiceError;
use crate::reference;

/// Members in selection order.
pub async fn list_members(db: &DatabaseConnection) -> Result<Vec<member::Model>, ServiceError> {
    reference::members_by_name(db).await
}

/// Get member by id.
pub async fn get_member(db: &DatabaseConnection, id: i32) -> Result<Option<member::Model>, ServiceError> {
    member::Entity::find_by_id(id).one(db).await.map_err(ServiceError::db)
}

/// Get member by id, `NotFound` when missing.
pub async fn require_member(db: &DatabaseConnection, id: i32) -> Result<member::Model, ServiceError> {
    get_member(db, id).await?.ok_or_else(|| ServiceError::not_found("member"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_member};

    #[tokio::test]
    async fn member_lookup() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let m = seed_member(&db, "Grace", "Hopper").await?;

        let found = require_member(&db, m.member_id).await?;
        assert_eq!(found.full_name, "Grace Hopper");
        assert!(get_member(&db, m.member_id + 100).await?.is_none());
        assert!(matches!(require_member(&db, m.member_id + 100).await, Err(ServiceError::NotFound(_))));
        assert_eq!(list_members(&db).await?.len(), 1);
        Ok(())
    }
}
