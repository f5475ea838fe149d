use axum::{extract::State, Json};
use axum_extra::extract::cookie::CookieJar;
use common::types::FlashMessage;
use serde::Serialize;

use service::member_service;

use crate::{errors::ApiError, selection::take_flash, state::AppState};

#[derive(Serialize)]
pub struct MemberPage {
    #[serde(flatten)]
    pub flash: FlashMessage,
    pub members: Vec<models::member::Model>,
}

/// Member picker. Shows and clears any pending flash message.
#[utoipa::path(
    get, path = "/Member", tag = "member",
    responses((status = 200, description = "Members by last and first name"))
)]
pub async fn index(State(state): State<AppState>, jar: CookieJar) -> Result<(CookieJar, Json<MemberPage>), ApiError> {
    let members = member_service::list_members(&state.db).await?;
    let (jar, message) = take_flash(jar);
    Ok((jar, Json(MemberPage { flash: FlashMessage { message }, members })))
}
