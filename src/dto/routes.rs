use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRouteRequest {
    pub source: Uuid,
    pub destination: Uuid,
    pub distance: i32,
}

/// List shape of a route: endpoint airports shown by the city they serve.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct RouteListItem {
    pub id: Uuid,
    pub source: String,
    pub destination: String,
    pub distance: i32,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RouteList {
    #[schema(value_type = Vec<RouteListItem>)]
    pub items: Vec<RouteListItem>,
}
