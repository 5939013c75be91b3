use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Airport;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirportRequest {
    pub name: String,
    pub closest_big_city: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AirportList {
    #[schema(value_type = Vec<Airport>)]
    pub items: Vec<Airport>,
}
