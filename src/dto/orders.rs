use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::dto::flights::FlightListItem;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTicketRequest {
    pub row: i32,
    pub seat: i32,
    pub flight: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub tickets: Vec<CreateTicketRequest>,
}

/// Ticket as nested under an order listing: the flight is expanded to its
/// full list shape so a listing is self-contained.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TicketListItem {
    pub id: Uuid,
    pub row: i32,
    pub seat: i32,
    pub flight: FlightListItem,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrderListItem {
    pub id: Uuid,
    pub tickets: Vec<TicketListItem>,
    pub ticket_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderList {
    #[schema(value_type = Vec<OrderListItem>)]
    pub items: Vec<OrderListItem>,
}
