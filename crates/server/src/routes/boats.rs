use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use tracing::info;

use models::validation;
use service::{
    boat::{BoatDetails, BoatForm, BoatFormOptions},
    errors::ServiceError,
    selection::{self, Selection, SelectionStore},
};

use crate::{
    csrf,
    errors::ApiError,
    observability::BOAT_MUTATIONS_TOTAL,
    selection::CookieSelectionStore,
    state::AppState,
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoatListQuery {
    pub member_id: Option<String>,
    pub full_name: Option<String>,
}

#[derive(Serialize)]
pub struct BoatListPage {
    pub selection: Selection,
    pub boats: Vec<BoatDetails>,
}

#[derive(Serialize)]
pub struct BoatFormPage {
    pub csrf_token: String,
    pub form: BoatForm,
    pub options: BoatFormOptions,
}

#[derive(Serialize)]
pub struct BoatDeletePage {
    pub csrf_token: String,
    pub boat: BoatDetails,
}

fn parse_member_id(raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    match validation::non_blank(raw) {
        None => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| ApiError::BadRequest(format!("memberId '{s}' is not a number"))),
    }
}

/// Form fields as strings, the way an edit page shows them.
fn form_from_model(boat: &models::boat::Model) -> BoatForm {
    BoatForm {
        boat_id: Some(boat.boat_id.to_string()),
        member_id: Some(boat.member_id.to_string()),
        boat_class: Some(boat.boat_class.clone()),
        hull_colour: boat.hull_colour.clone(),
        sail_number: boat.sail_number.clone(),
        hull_length: Some(boat.hull_length.to_string()),
        boat_type_id: Some(boat.boat_type_id.to_string()),
        parking_code: boat.parking_code.clone(),
        version: Some(boat.version.to_string()),
    }
}

#[utoipa::path(
    get, path = "/Boat", tag = "boat",
    params(
        ("memberId" = Option<i32>, Query, description = "Member to select"),
        ("fullName" = Option<String>, Query, description = "Display name for the selection"),
    ),
    responses(
        (status = 200, description = "Boats of the selected member"),
        (status = 303, description = "No member selected, redirect to /Member"),
        (status = 404, description = "Member not found")
    )
)]
pub async fn list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(q): Query<BoatListQuery>,
) -> Result<(CookieJar, Json<BoatListPage>), ApiError> {
    let requested = parse_member_id(q.member_id.as_deref())?;
    let mut store = CookieSelectionStore::new(jar, &state.selection);
    let selection = selection::select(&state.db, &mut store, requested, q.full_name.as_deref()).await?;
    let boats = state.boats.list_for_member(selection.member_id).await?;
    info!(member_id = selection.member_id, count = boats.len(), "list boats");
    Ok((store.into_jar(), Json(BoatListPage { selection, boats })))
}

#[utoipa::path(
    get, path = "/Boat/Details/{id}", tag = "boat",
    params(("id" = i32, Path, description = "Boat id")),
    responses((status = 200, description = "Boat with type, owner and slot"), (status = 404, description = "Not Found"))
)]
pub async fn details(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Json<BoatDetails>, ApiError> {
    Ok(Json(state.boats.get_details(id).await?))
}

#[utoipa::path(
    get, path = "/Boat/Create", tag = "boat",
    responses((status = 200, description = "Empty form with selection lists"))
)]
pub async fn create_form(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Json<BoatFormPage>), ApiError> {
    let member_id = CookieSelectionStore::new(jar.clone(), &state.selection).member_id();
    let options = state.boats.prepare_create_form().await?;
    let (jar, csrf_token) = csrf::issue(jar);
    let form = BoatForm::default().with_default_member(member_id);
    Ok((jar, Json(BoatFormPage { csrf_token, form, options })))
}

#[utoipa::path(
    post, path = "/Boat/Create", tag = "boat",
    request_body(content = crate::openapi::BoatFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 403, description = "Anti-forgery token rejected"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<BoatForm>,
) -> Result<Redirect, ApiError> {
    let member_id = CookieSelectionStore::new(jar, &state.selection).member_id();
    let form = form.with_default_member(member_id);
    match state.boats.create(&form).await {
        Ok(_) => {
            BOAT_MUTATIONS_TOTAL.inc();
            Ok(Redirect::to("/Boat"))
        }
        Err(ServiceError::Validation(errors)) => {
            let options = state.boats.prepare_create_form().await?;
            Err(ApiError::invalid(&form, errors, &options))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/Boat/Edit/{id}", tag = "boat",
    params(("id" = i32, Path, description = "Boat id")),
    responses((status = 200, description = "Filled form with selection lists"), (status = 404, description = "Not Found"))
)]
pub async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Json<BoatFormPage>), ApiError> {
    let edit = state.boats.prepare_edit_form(id).await?;
    let (jar, csrf_token) = csrf::issue(jar);
    let form = form_from_model(&edit.boat);
    Ok((jar, Json(BoatFormPage { csrf_token, form, options: edit.options })))
}

#[utoipa::path(
    post, path = "/Boat/Edit/{id}", tag = "boat",
    params(("id" = i32, Path, description = "Boat id")),
    request_body(content = crate::openapi::BoatFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to the list"),
        (status = 404, description = "Not Found or id mismatch"),
        (status = 409, description = "Changed by another request"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<BoatForm>,
) -> Result<Redirect, ApiError> {
    match state.boats.update(id, &form).await {
        Ok(_) => {
            BOAT_MUTATIONS_TOTAL.inc();
            Ok(Redirect::to("/Boat"))
        }
        Err(ServiceError::Validation(errors)) => {
            let options = state.boats.edit_options(id).await?;
            Err(ApiError::invalid(&form, errors, &options))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/Boat/Delete/{id}", tag = "boat",
    params(("id" = i32, Path, description = "Boat id")),
    responses((status = 200, description = "Boat to confirm"), (status = 404, description = "Not Found"))
)]
pub async fn delete_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i32>,
) -> Result<(CookieJar, Json<BoatDeletePage>), ApiError> {
    let boat = state.boats.delete(id).await?;
    let (jar, csrf_token) = csrf::issue(jar);
    Ok((jar, Json(BoatDeletePage { csrf_token, boat })))
}

#[utoipa::path(
    post, path = "/Boat/Delete/{id}", tag = "boat",
    params(("id" = i32, Path, description = "Boat id")),
    responses((status = 303, description = "Deleted, redirect to the list"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(id): Path<i32>) -> Result<Redirect, ApiError> {
    state.boats.confirm_delete(id).await?;
    BOAT_MUTATIONS_TOTAL.inc();
    Ok(Redirect::to("/Boat"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_id_query_is_optional_but_numeric() {
        assert_eq!(parse_member_id(None).unwrap(), None);
        assert_eq!(parse_member_id(Some(" ")).unwrap(), None);
        assert_eq!(parse_member_id(Some("12")).unwrap(), Some(12));
        assert!(matches!(parse_member_id(Some("x")), Err(ApiError::BadRequest(_))));
    }
}
