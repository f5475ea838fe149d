use axum::{
    extract::{Path, State},
    response::Redirect,
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use service::{
    errors::ServiceError,
    parking::{ParkingDetails, ParkingForm, ParkingFormOptions},
};

use crate::{csrf, errors::ApiError, observability::PARKING_MUTATIONS_TOTAL, state::AppState};

#[derive(Serialize)]
pub struct ParkingFormPage {
    pub csrf_token: String,
    pub form: ParkingForm,
    pub options: ParkingFormOptions,
}

#[derive(Serialize)]
pub struct ParkingDeletePage {
    pub csrf_token: String,
    pub parking: ParkingDetails,
}

fn form_from_model(parking: &models::parking::Model) -> ParkingForm {
    ParkingForm {
        parking_code: Some(parking.parking_code.clone()),
        boat_type_id: Some(parking.boat_type_id.to_string()),
        actual_boat_id: parking.actual_boat_id.clone(),
        version: Some(parking.version.to_string()),
    }
}

#[utoipa::path(
    get, path = "/Parking", tag = "parking",
    responses((status = 200, description = "Occupied slots ordered by code"))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ParkingDetails>>, ApiError> {
    Ok(Json(state.parkings.list().await?))
}

#[utoipa::path(
    get, path = "/Parking/Details/{code}", tag = "parking",
    params(("code" = String, Path, description = "Parking code")),
    responses((status = 200, description = "Slot with its boat type"), (status = 404, description = "Not Found"))
)]
pub async fn details(State(state): State<AppState>, Path(code): Path<String>) -> Result<Json<ParkingDetails>, ApiError> {
    Ok(Json(state.parkings.get_details(&code).await?))
}

#[utoipa::path(
    get, path = "/Parking/Create", tag = "parking",
    responses((status = 200, description = "Empty form with boat types"))
)]
pub async fn create_form(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Json<ParkingFormPage>), ApiError> {
    let options = state.parkings.prepare_create_form().await?;
    let (jar, csrf_token) = csrf::issue(jar);
    Ok((jar, Json(ParkingFormPage { csrf_token, form: ParkingForm::default(), options })))
}

#[utoipa::path(
    post, path = "/Parking/Create", tag = "parking",
    request_body(content = crate::openapi::ParkingFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Created, redirect to the list"),
        (status = 403, description = "Anti-forgery token rejected"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(State(state): State<AppState>, Form(form): Form<ParkingForm>) -> Result<Redirect, ApiError> {
    match state.parkings.create(&form).await {
        Ok(_) => {
            PARKING_MUTATIONS_TOTAL.inc();
            Ok(Redirect::to("/Parking"))
        }
        Err(ServiceError::Validation(errors)) => {
            let options = state.parkings.prepare_create_form().await?;
            Err(ApiError::invalid(&form, errors, &options))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/Parking/Edit/{code}", tag = "parking",
    params(("code" = String, Path, description = "Parking code")),
    responses((status = 200, description = "Filled form with boat types"), (status = 404, description = "Not Found"))
)]
pub async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(code): Path<String>,
) -> Result<(CookieJar, Json<ParkingFormPage>), ApiError> {
    let edit = state.parkings.prepare_edit_form(&code).await?;
    let (jar, csrf_token) = csrf::issue(jar);
    let form = form_from_model(&edit.parking);
    Ok((jar, Json(ParkingFormPage { csrf_token, form, options: edit.options })))
}

#[utoipa::path(
    post, path = "/Parking/Edit/{code}", tag = "parking",
    params(("code" = String, Path, description = "Parking code")),
    request_body(content = crate::openapi::ParkingFormDoc, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Updated, redirect to the list"),
        (status = 404, description = "Not Found or code mismatch"),
        (status = 409, description = "Changed by another request"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn edit(
    State(state): State<AppState>,
    Path(code): Path<String>,
    Form(form): Form<ParkingForm>,
) -> Result<Redirect, ApiError> {
    match state.parkings.update(&code, &form).await {
        Ok(_) => {
            PARKING_MUTATIONS_TOTAL.inc();
            Ok(Redirect::to("/Parking"))
        }
        Err(ServiceError::Validation(errors)) => {
            let options = state.parkings.prepare_create_form().await?;
            Err(ApiError::invalid(&form, errors, &options))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    get, path = "/Parking/Delete/{code}", tag = "parking",
    params(("code" = String, Path, description = "Parking code")),
    responses((status = 200, description = "Slot to confirm"), (status = 404, description = "Not Found"))
)]
pub async fn delete_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(code): Path<String>,
) -> Result<(CookieJar, Json<ParkingDeletePage>), ApiError> {
    let parking = state.parkings.delete(&code).await?;
    let (jar, csrf_token) = csrf::issue(jar);
    Ok((jar, Json(ParkingDeletePage { csrf_token, parking })))
}

#[utoipa::path(
    post, path = "/Parking/Delete/{code}", tag = "parking",
    params(("code" = String, Path, description = "Parking code")),
    responses((status = 303, description = "Deleted, redirect to the list"), (status = 404, description = "Not Found"))
)]
pub async fn delete(State(state): State<AppState>, Path(code): Path<String>) -> Result<Redirect, ApiError> {
    state.parkings.confirm_delete(&code).await?;
    PARKING_MUTATIONS_TOTAL.inc();
    Ok(Redirect::to("/Parking"))
}
