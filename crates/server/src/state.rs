use configs::SelectionConfig;
use sea_orm::DatabaseConnection;
use service::{boat::BoatService, parking::ParkingService};

/// Shared handler state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub boats: BoatService,
    pub parkings: ParkingService,
    pub selection: SelectionConfig,
}

impl AppState {
    pub fn new(db: DatabaseConnection, selection: SelectionConfig) -> Self {
        Self {
            boats: BoatService::new(db.clone()),
            parkings: ParkingService::new(db.clone()),
            db,
            selection,
        }
    }
}
