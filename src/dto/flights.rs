use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateFlightRequest {
    pub route: Uuid,
    pub airplane: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    #[serde(default)]
    pub crew: Vec<Uuid>,
}

/// List shape of a flight: related entities rendered as display strings,
/// plus the seats still available for booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct FlightListItem {
    pub id: Uuid,
    pub route: String,
    pub airplane: String,
    pub airplane_image: Option<String>,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<String>,
    pub tickets_available: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct FlightList {
    #[schema(value_type = Vec<FlightListItem>)]
    pub items: Vec<FlightListItem>,
}

/// A booked seat, as shown on the flight detail view.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, ToSchema)]
pub struct TakenPlace {
    pub row: i32,
    pub seat: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FlightDetail {
    pub id: Uuid,
    pub route: String,
    pub airplane: String,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<String>,
    pub taken_places: Vec<TakenPlace>,
}
