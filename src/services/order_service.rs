use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use crate::dto::orders::{CreateOrderRequest, CreateTicketRequest, OrderList, OrderListItem, TicketListItem};
use crate::services::flight_service;
use crate::{
    entity::airplanes::{Column as AirplaneCol, Model as AirplaneModel},
    entity::flights::{Column as FlightCol, Model as FlightModel},
    entity::orders::{ActiveModel as OrderActive, Column as OrderCol},
    entity::tickets::{ActiveModel as TicketActive, Column as TicketCol},
    entity::{Airplanes, Flights, Orders, Tickets},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, Ticket},
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    routes::params::{ORDER_PAGE_SIZE, Pagination},
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderList>> {
    policy::authorize(Resource::Orders, Action::List, user)?;

    let (page, per_page, offset) = pagination.normalize(ORDER_PAGE_SIZE);

    // Always scoped to the requesting user; there is no way to widen this.
    let finder = Orders::find()
        .filter(OrderCol::UserId.eq(user.user_id))
        .order_by_desc(OrderCol::CreatedAt);

    let total = finder.clone().count(&state.orm).await? as i64;

    let orders = finder
        .limit(per_page as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;

    let order_ids: Vec<Uuid> = orders.iter().map(|order| order.id).collect();
    let tickets = Tickets::find()
        .filter(TicketCol::OrderId.is_in(order_ids))
        .order_by_asc(TicketCol::Row)
        .order_by_asc(TicketCol::Seat)
        .all(&state.orm)
        .await?;

    let mut flight_ids: Vec<Uuid> = tickets.iter().map(|ticket| ticket.flight_id).collect();
    flight_ids.sort_unstable();
    flight_ids.dedup();
    let flights = flight_service::load_flight_list_items(&state.orm, flight_ids).await?;

    let mut tickets_by_order: HashMap<Uuid, Vec<TicketListItem>> = HashMap::new();
    for ticket in tickets {
        let flight = flights.get(&ticket.flight_id).cloned().ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "ticket {} references missing flight",
                ticket.id
            ))
        })?;
        tickets_by_order
            .entry(ticket.order_id)
            .or_default()
            .push(TicketListItem {
                id: ticket.id,
                row: ticket.row,
                seat: ticket.seat,
                flight,
            });
    }

    let items = orders
        .into_iter()
        .map(|order| {
            let tickets = tickets_by_order.remove(&order.id).unwrap_or_default();
            OrderListItem {
                id: order.id,
                ticket_count: tickets.len() as i64,
                tickets,
                created_at: order.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(ApiResponse::success(
        "Orders",
        OrderList { items },
        Some(Meta::new(page, per_page, total)),
    ))
}

pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    policy::authorize(Resource::Orders, Action::Create, user)?;

    if payload.tickets.is_empty() {
        return Err(AppError::validation("tickets", "This list may not be empty."));
    }

    // Reads and writes share one transaction; a failure anywhere rolls the
    // whole order back.
    let txn = state.orm.begin().await?;

    let mut flight_ids: Vec<Uuid> = payload.tickets.iter().map(|ticket| ticket.flight).collect();
    flight_ids.sort_unstable();
    flight_ids.dedup();

    let flights: HashMap<Uuid, FlightModel> = Flights::find()
        .filter(FlightCol::Id.is_in(flight_ids.clone()))
        .all(&txn)
        .await?
        .into_iter()
        .map(|flight| (flight.id, flight))
        .collect();

    let mut airplane_ids: Vec<Uuid> = flights.values().map(|flight| flight.airplane_id).collect();
    airplane_ids.sort_unstable();
    airplane_ids.dedup();
    let airplanes: HashMap<Uuid, AirplaneModel> = Airplanes::find()
        .filter(AirplaneCol::Id.is_in(airplane_ids))
        .all(&txn)
        .await?
        .into_iter()
        .map(|airplane| (airplane.id, airplane))
        .collect();

    let booked: Vec<(Uuid, i32, i32)> = Tickets::find()
        .select_only()
        .column(TicketCol::FlightId)
        .column(TicketCol::Row)
        .column(TicketCol::Seat)
        .filter(TicketCol::FlightId.is_in(flight_ids))
        .into_tuple()
        .all(&txn)
        .await?;
    let mut taken: HashSet<(Uuid, i32, i32)> = booked.into_iter().collect();

    for ticket in &payload.tickets {
        let flight = flights.get(&ticket.flight).ok_or_else(|| {
            AppError::validation("flight", format!("Unknown flight: {}", ticket.flight))
        })?;
        let airplane = airplanes.get(&flight.airplane_id).ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "flight {} references missing airplane",
                flight.id
            ))
        })?;
        validate_ticket_seat(ticket.row, ticket.seat, airplane.rows, airplane.seats_in_row)?;
        // Checks both already-booked seats and duplicates inside the payload.
        if !taken.insert((ticket.flight, ticket.row, ticket.seat)) {
            return Err(seat_taken_error(ticket));
        }
    }

    let order = OrderActive {
        id: Set(Uuid::new_v4()),
        user_id: Set(user.user_id),
        created_at: NotSet,
    }
    .insert(&txn)
    .await?;

    let mut out_tickets = Vec::with_capacity(payload.tickets.len());
    for ticket in &payload.tickets {
        let inserted = TicketActive {
            id: Set(Uuid::new_v4()),
            row: Set(ticket.row),
            seat: Set(ticket.seat),
            flight_id: Set(ticket.flight),
            order_id: Set(order.id),
        }
        .insert(&txn)
        .await
        .map_err(|err| seat_conflict(err, ticket))?;

        out_tickets.push(Ticket {
            id: inserted.id,
            row: inserted.row,
            seat: inserted.seat,
            flight: inserted.flight_id,
        });
    }

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Order created",
        Order {
            id: order.id,
            tickets: out_tickets,
            created_at: order.created_at.with_timezone(&Utc),
        },
        Some(Meta::empty()),
    ))
}

/// Range check for a seat against its airplane's layout. Both bounds are
/// inclusive and 1-based.
pub(crate) fn validate_ticket_seat(
    row: i32,
    seat: i32,
    rows: i32,
    seats_in_row: i32,
) -> AppResult<()> {
    for (value, field, bound_name, bound) in [
        (row, "row", "rows", rows),
        (seat, "seat", "seats_in_row", seats_in_row),
    ] {
        if !(1..=bound).contains(&value) {
            return Err(AppError::validation(
                field,
                format!(
                    "{field} number must be in available range: (1, {bound_name}): (1, {bound})"
                ),
            ));
        }
    }
    Ok(())
}

fn seat_taken_error(ticket: &CreateTicketRequest) -> AppError {
    AppError::validation(
        "tickets",
        format!(
            "Seat {} in row {} on flight {} is already taken",
            ticket.seat, ticket.row, ticket.flight
        ),
    )
}

/// A unique-constraint violation on insert means another order got the seat
/// first; anything else stays a database error.
fn seat_conflict(err: sea_orm::DbErr, ticket: &CreateTicketRequest) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => seat_taken_error(ticket),
        _ => AppError::from(err),
    }
}
