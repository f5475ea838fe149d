//! "Currently selected member" state.
//!
//! A selection is a member id plus the display name shown in page titles.
//! It lives in whatever key/value store the caller provides (cookies for the
//! HTTP server) and stays until another member is explicitly chosen.

use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::debug;

use crate::errors::ServiceError;
use crate::member_service;

/// Shown when the boat list is requested without any member chosen.
pub const NO_SELECTION_MESSAGE: &str = "Please select a member to see their boats";

/// Persisted selection entries, readable and writable across requests.
pub trait SelectionStore {
    fn member_id(&self) -> Option<i32>;
    fn full_name(&self) -> Option<String>;
    fn set_member_id(&mut self, member_id: i32);
    fn set_full_name(&mut self, full_name: &str);
}

/// Plain in-process store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemorySelectionStore {
    pub member_id: Option<i32>,
    pub full_name: Option<String>,
}

impl SelectionStore for MemorySelectionStore {
    fn member_id(&self) -> Option<i32> { self.member_id }
    fn full_name(&self) -> Option<String> { self.full_name.clone() }
    fn set_member_id(&mut self, member_id: i32) { self.member_id = Some(member_id); }
    fn set_full_name(&mut self, full_name: &str) { self.full_name = Some(full_name.to_string()); }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberSource {
    /// Chosen on this request; becomes the new persisted selection.
    Request,
    /// Carried over from an earlier request.
    Persisted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedMember {
    pub member_id: i32,
    pub source: MemberSource,
}

/// Request id wins over the persisted one; neither is `MissingSelection`.
pub fn resolve_member(requested: Option<i32>, persisted: Option<i32>) -> Result<ResolvedMember, ServiceError> {
    match (requested, persisted) {
        (Some(member_id), _) => Ok(ResolvedMember { member_id, source: MemberSource::Request }),
        (None, Some(member_id)) => Ok(ResolvedMember { member_id, source: MemberSource::Persisted }),
        (None, None) => Err(ServiceError::MissingSelection),
    }
}

/// Provided name when non-blank, otherwise the member's full name.
/// The member must exist either way.
pub async fn resolve_display_name(
    db: &DatabaseConnection,
    member_id: i32,
    provided: Option<&str>,
) -> Result<String, ServiceError> {
    let member = member_service::require_member(db, member_id).await?;
    Ok(match provided.map(str::trim).filter(|s| !s.is_empty()) {
        Some(name) => name.to_string(),
        None => member.full_name,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub member_id: i32,
    pub full_name: String,
}

/// Resolve the selection for this request and write it back to `store`.
/// Without a provided name, a persisted selection reuses the stored name and
/// a newly chosen member gets its full name. Nothing is written when
/// resolution fails.
pub async fn select<S: SelectionStore>(
    db: &DatabaseConnection,
    store: &mut S,
    requested_id: Option<i32>,
    provided_name: Option<&str>,
) -> Result<Selection, ServiceError> {
    let resolved = resolve_member(requested_id, store.member_id())?;
    // a carried-over selection keeps its remembered name
    let remembered = match resolved.source {
        MemberSource::Persisted => store.full_name(),
        MemberSource::Request => None,
    };
    let name = provided_name.filter(|s| !s.trim().is_empty()).or(remembered.as_deref());
    let full_name = resolve_display_name(db, resolved.member_id, name).await?;

    if resolved.source == MemberSource::Request {
        store.set_member_id(resolved.member_id);
    }
    store.set_full_name(&full_name);
    debug!(member_id = resolved.member_id, source = ?resolved.source, "member selection resolved");
    Ok(Selection { member_id: resolved.member_id, full_name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_member};

    #[test]
    fn request_id_overrides_persisted() {
        let r = resolve_member(Some(7), Some(3)).unwrap();
        assert_eq!(r, ResolvedMember { member_id: 7, source: MemberSource::Request });
        let r = resolve_member(None, Some(3)).unwrap();
        assert_eq!(r.source, MemberSource::Persisted);
        assert!(matches!(resolve_member(None, None), Err(ServiceError::MissingSelection)));
    }

    #[tokio::test]
    async fn selection_persists_and_carries_over() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let m = seed_member(&db, "Ellen", "MacArthur").await?;
        let mut store = MemorySelectionStore::default();

        let first = select(&db, &mut store, Some(m.member_id), None).await?;
        assert_eq!(first.full_name, "Ellen MacArthur");
        assert_eq!(store.member_id, Some(m.member_id));
        assert_eq!(store.full_name.as_deref(), Some("Ellen MacArthur"));

        // later request without a member id
        let again = select(&db, &mut store, None, Some("Skipper Ellen")).await?;
        assert_eq!(again.member_id, m.member_id);
        assert_eq!(store.full_name.as_deref(), Some("Skipper Ellen"));
        Ok(())
    }

    #[tokio::test]
    async fn carried_over_selection_keeps_stored_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let m = seed_member(&db, "Tracy", "Edwards").await?;
        let mut store = MemorySelectionStore { member_id: Some(m.member_id), full_name: Some("Skipper Tracy".into()) };

        let kept = select(&db, &mut store, None, None).await?;
        assert_eq!(kept.full_name, "Skipper Tracy");

        // picking the member again by id falls back to the member record
        let fresh = select(&db, &mut store, Some(m.member_id), None).await?;
        assert_eq!(fresh.full_name, "Tracy Edwards");
        assert_eq!(store.full_name.as_deref(), Some("Tracy Edwards"));
        Ok(())
    }

    #[tokio::test]
    async fn empty_store_is_missing_selection() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let mut store = MemorySelectionStore::default();
        let res = select(&db, &mut store, None, None).await;
        assert!(matches!(res, Err(ServiceError::MissingSelection)));
        assert_eq!(store, MemorySelectionStore::default());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_member_leaves_store_untouched() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let m = seed_member(&db, "Robin", "Knox-Johnston").await?;
        let mut store = MemorySelectionStore { member_id: Some(m.member_id), full_name: Some("Robin Knox-Johnston".into()) };

        let res = select(&db, &mut store, Some(m.member_id + 50), None).await;
        assert!(matches!(res, Err(ServiceError::NotFound(_))));
        assert_eq!(store.member_id, Some(m.member_id));
        Ok(())
    }
}
