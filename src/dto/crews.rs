use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Crew;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCrewRequest {
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CrewList {
    #[schema(value_type = Vec<Crew>)]
    pub items: Vec<Crew>,
}
