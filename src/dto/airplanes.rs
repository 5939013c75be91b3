use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneRequest {
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type: Uuid,
}

/// Merge-style update: absent fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAirplaneRequest {
    pub name: Option<String>,
    pub rows: Option<i32>,
    pub seats_in_row: Option<i32>,
    pub airplane_type: Option<Uuid>,
}

/// List shape of an airplane: type shown by name instead of id.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct AirplaneListItem {
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub capacity: i32,
    pub airplane_type: String,
    pub image: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AirplaneList {
    #[schema(value_type = Vec<AirplaneListItem>)]
    pub items: Vec<AirplaneListItem>,
}

/// Answer of the image-upload action: the airplane id and its media URL.
#[derive(Debug, Serialize, ToSchema)]
pub struct AirplaneImage {
    pub id: Uuid,
    pub image: Option<String>,
}
