use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Boat form fields as posted. Numbers travel as text.
#[derive(ToSchema)]
pub struct BoatFormDoc {
    pub boat_id: Option<String>,
    pub member_id: Option<String>,
    pub boat_class: String,
    pub hull_colour: Option<String>,
    pub sail_number: Option<String>,
    pub hull_length: String,
    pub boat_type_id: String,
    pub parking_code: Option<String>,
    pub version: Option<String>,
}

#[derive(ToSchema)]
pub struct ParkingFormDoc {
    pub parking_code: String,
    pub boat_type_id: String,
    pub actual_boat_id: Option<String>,
    pub version: Option<String>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::members::index,
        crate::routes::boats::list,
        crate::routes::boats::details,
        crate::routes::boats::create_form,
        crate::routes::boats::create,
        crate::routes::boats::edit_form,
        crate::routes::boats::edit,
        crate::routes::boats::delete_form,
        crate::routes::boats::delete,
        crate::routes::parking::list,
        crate::routes::parking::details,
        crate::routes::parking::create_form,
        crate::routes::parking::create,
        crate::routes::parking::edit_form,
        crate::routes::parking::edit,
        crate::routes::parking::delete_form,
        crate::routes::parking::delete,
    ),
    components(schemas(HealthResponse, BoatFormDoc, ParkingFormDoc)),
    tags(
        (name = "health"),
        (name = "member"),
        (name = "boat"),
        (name = "parking")
    )
)]
pub struct ApiDoc;
