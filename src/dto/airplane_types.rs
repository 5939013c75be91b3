use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::AirplaneType;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAirplaneTypeRequest {
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct AirplaneTypeList {
    #[schema(value_type = Vec<AirplaneType>)]
    pub items: Vec<AirplaneType>,
}
