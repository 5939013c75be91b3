use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Airport {
    pub id: Uuid,
    pub name: String,
    pub closest_big_city: String,
}

/// Write shape of a route: airports referenced by id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Route {
    pub id: Uuid,
    pub source: Uuid,
    pub destination: Uuid,
    pub distance: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AirplaneType {
    pub id: Uuid,
    pub name: String,
}

/// Write shape of an airplane. `capacity` is derived from the seat layout
/// and `image` carries the public media URL when an image was uploaded.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Airplane {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
    pub airplane_type: Uuid,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Crew {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// Write shape of a flight: route, airplane and crew referenced by id.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Flight {
    pub id: Uuid,
    pub route: Uuid,
    pub airplane: Uuid,
    pub departure_time: DateTime<Utc>,
    pub arrival_time: DateTime<Utc>,
    pub crew: Vec<Uuid>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Ticket {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight: Uuid,
}

/// Default shape of an order: owned tickets nested, owner implicit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub tickets: Vec<Ticket>,
    pub created_at: DateTime<Utc>,
}
