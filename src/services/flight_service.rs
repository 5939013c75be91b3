use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::dto::flights::{CreateFlightRequest, FlightDetail, FlightList, FlightListItem, TakenPlace};
use crate::{
    entity::airplanes::{Column as AirplaneCol, Model as AirplaneModel},
    entity::airports::{Column as AirportCol, Model as AirportModel},
    entity::crews::Column as CrewCol,
    entity::flight_crew::{ActiveModel as FlightCrewActive, Column as FlightCrewCol},
    entity::flights::{ActiveModel as FlightActive, Column as FlightCol, Model as FlightModel},
    entity::routes::{Column as RouteCol, Model as RouteModel},
    entity::tickets::Column as TicketCol,
    entity::{Airplanes, Airports, Crews, FlightCrew, Flights, Routes, Tickets},
    error::{AppError, AppResult, FieldErrors},
    media,
    middleware::auth::AuthUser,
    models::Flight,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    routes::params::FlightFilterQuery,
    state::AppState,
};

pub async fn list_flights(
    state: &AppState,
    user: &AuthUser,
    query: FlightFilterQuery,
) -> AppResult<ApiResponse<FlightList>> {
    policy::authorize(Resource::Flights, Action::List, user)?;

    let mut condition = Condition::all();
    if let Some((start, end)) = query.departure_window()? {
        condition = condition
            .add(FlightCol::DepartureTime.gte(start))
            .add(FlightCol::DepartureTime.lt(end));
    }
    if let Some(floor) = query.arrival_floor()? {
        condition = condition.add(FlightCol::ArrivalTime.gte(floor));
    }

    let flights = Flights::find()
        .filter(condition)
        .distinct()
        .order_by_asc(FlightCol::DepartureTime)
        .all(&state.orm)
        .await?;

    let items = assemble_flight_list(&state.orm, flights).await?;

    Ok(ApiResponse::success("Flights", FlightList { items }, None))
}

pub async fn get_flight(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<FlightDetail>> {
    policy::authorize(Resource::Flights, Action::Retrieve, user)?;

    let flight = Flights::find_by_id(id).one(&state.orm).await?;
    let flight = match flight {
        Some(f) => f,
        None => return Err(AppError::NotFound),
    };

    let route = Routes::find_by_id(flight.route_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!("flight {} references missing route", flight.id))
        })?;
    let airports = airports_by_id(&state.orm, vec![route.source_id, route.destination_id]).await?;
    let route_name = route_display(&route, &airports)?;

    let airplane = Airplanes::find_by_id(flight.airplane_id)
        .one(&state.orm)
        .await?
        .ok_or_else(|| {
            AppError::Internal(anyhow::anyhow!(
                "flight {} references missing airplane",
                flight.id
            ))
        })?;

    let mut crew: Vec<String> = flight
        .find_related(Crews)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|member| member.full_name())
        .collect();
    crew.sort();

    let taken_places: Vec<TakenPlace> = Tickets::find()
        .filter(TicketCol::FlightId.eq(flight.id))
        .order_by_asc(TicketCol::Row)
        .order_by_asc(TicketCol::Seat)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|ticket| TakenPlace {
            row: ticket.row,
            seat: ticket.seat,
        })
        .collect();

    let detail = FlightDetail {
        id: flight.id,
        route: route_name,
        airplane: airplane.name,
        departure_time: flight.departure_time.with_timezone(&Utc),
        arrival_time: flight.arrival_time.with_timezone(&Utc),
        crew,
        taken_places,
    };

    Ok(ApiResponse::success("Flight", detail, None))
}

pub async fn create_flight(
    state: &AppState,
    user: &AuthUser,
    payload: CreateFlightRequest,
) -> AppResult<ApiResponse<Flight>> {
    policy::authorize(Resource::Flights, Action::Create, user)?;

    let mut crew_ids = payload.crew.clone();
    let mut seen = HashSet::new();
    crew_ids.retain(|id| seen.insert(*id));

    let mut errors = FieldErrors::new();
    if Routes::find_by_id(payload.route)
        .one(&state.orm)
        .await?
        .is_none()
    {
        errors.insert("route".into(), format!("Unknown route: {}", payload.route));
    }
    if Airplanes::find_by_id(payload.airplane)
        .one(&state.orm)
        .await?
        .is_none()
    {
        errors.insert(
            "airplane".into(),
            format!("Unknown airplane: {}", payload.airplane),
        );
    }
    if !crew_ids.is_empty() {
        let found: HashSet<Uuid> = Crews::find()
            .filter(CrewCol::Id.is_in(crew_ids.clone()))
            .all(&state.orm)
            .await?
            .into_iter()
            .map(|member| member.id)
            .collect();
        let missing: Vec<String> = crew_ids
            .iter()
            .filter(|id| !found.contains(id))
            .map(|id| id.to_string())
            .collect();
        if !missing.is_empty() {
            errors.insert("crew".into(), format!("Unknown crew: {}", missing.join(", ")));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    // The flight and its crew assignments persist together or not at all.
    let txn = state.orm.begin().await?;

    let flight = FlightActive {
        id: Set(Uuid::new_v4()),
        route_id: Set(payload.route),
        airplane_id: Set(payload.airplane),
        departure_time: Set(payload.departure_time.into()),
        arrival_time: Set(payload.arrival_time.into()),
    }
    .insert(&txn)
    .await?;

    for crew_id in &crew_ids {
        FlightCrewActive {
            flight_id: Set(flight.id),
            crew_id: Set(*crew_id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(ApiResponse::success(
        "Flight created",
        Flight {
            id: flight.id,
            route: flight.route_id,
            airplane: flight.airplane_id,
            departure_time: flight.departure_time.with_timezone(&Utc),
            arrival_time: flight.arrival_time.with_timezone(&Utc),
            crew: crew_ids,
        },
        Some(Meta::empty()),
    ))
}

/// List-shape items for a known set of flights, keyed by flight id. Used by
/// the order listing to embed each ticket's flight.
pub(crate) async fn load_flight_list_items(
    conn: &DatabaseConnection,
    flight_ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, FlightListItem>> {
    let flights = Flights::find()
        .filter(FlightCol::Id.is_in(flight_ids))
        .all(conn)
        .await?;
    let items = assemble_flight_list(conn, flights).await?;
    Ok(items.into_iter().map(|item| (item.id, item)).collect())
}

/// Builds list-shape flights: related rows are fetched in batches keyed by
/// id, then availability is computed from capacity minus booked tickets.
async fn assemble_flight_list(
    conn: &DatabaseConnection,
    flights: Vec<FlightModel>,
) -> AppResult<Vec<FlightListItem>> {
    if flights.is_empty() {
        return Ok(Vec::new());
    }
    let flight_ids: Vec<Uuid> = flights.iter().map(|flight| flight.id).collect();

    let routes = routes_by_id(conn, flights.iter().map(|flight| flight.route_id).collect()).await?;
    let airport_ids: Vec<Uuid> = routes
        .values()
        .flat_map(|route| [route.source_id, route.destination_id])
        .collect();
    let airports = airports_by_id(conn, airport_ids).await?;
    let airplanes =
        airplanes_by_id(conn, flights.iter().map(|flight| flight.airplane_id).collect()).await?;
    let crew_names = crew_names_by_flight(conn, &flight_ids).await?;
    let booked = booked_tickets_by_flight(conn, &flight_ids).await?;

    flights
        .into_iter()
        .map(|flight| {
            let route = routes.get(&flight.route_id).ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!("flight {} references missing route", flight.id))
            })?;
            let airplane = airplanes.get(&flight.airplane_id).ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "flight {} references missing airplane",
                    flight.id
                ))
            })?;
            let booked_count = booked.get(&flight.id).copied().unwrap_or(0);

            Ok(FlightListItem {
                id: flight.id,
                route: route_display(route, &airports)?,
                airplane: airplane.name.clone(),
                airplane_image: airplane.image.as_deref().map(media::media_url),
                departure_time: flight.departure_time.with_timezone(&Utc),
                arrival_time: flight.arrival_time.with_timezone(&Utc),
                crew: crew_names.get(&flight.id).cloned().unwrap_or_default(),
                tickets_available: i64::from(airplane.capacity()) - booked_count,
            })
        })
        .collect()
}

async fn routes_by_id(
    conn: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, RouteModel>> {
    let routes = Routes::find()
        .filter(RouteCol::Id.is_in(dedup(ids)))
        .all(conn)
        .await?;
    Ok(routes.into_iter().map(|route| (route.id, route)).collect())
}

async fn airports_by_id(
    conn: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, AirportModel>> {
    let airports = Airports::find()
        .filter(AirportCol::Id.is_in(dedup(ids)))
        .all(conn)
        .await?;
    Ok(airports
        .into_iter()
        .map(|airport| (airport.id, airport))
        .collect())
}

async fn airplanes_by_id(
    conn: &DatabaseConnection,
    ids: Vec<Uuid>,
) -> AppResult<HashMap<Uuid, AirplaneModel>> {
    let airplanes = Airplanes::find()
        .filter(AirplaneCol::Id.is_in(dedup(ids)))
        .all(conn)
        .await?;
    Ok(airplanes
        .into_iter()
        .map(|airplane| (airplane.id, airplane))
        .collect())
}

/// Crew full names per flight, sorted for a stable serialization order.
async fn crew_names_by_flight(
    conn: &DatabaseConnection,
    flight_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, Vec<String>>> {
    let assignments = FlightCrew::find()
        .filter(FlightCrewCol::FlightId.is_in(flight_ids.to_vec()))
        .all(conn)
        .await?;

    let crew_ids: Vec<Uuid> = assignments.iter().map(|a| a.crew_id).collect();
    let crews: HashMap<Uuid, String> = Crews::find()
        .filter(CrewCol::Id.is_in(dedup(crew_ids)))
        .all(conn)
        .await?
        .into_iter()
        .map(|member| (member.id, member.full_name()))
        .collect();

    let mut by_flight: HashMap<Uuid, Vec<String>> = HashMap::new();
    for assignment in assignments {
        if let Some(name) = crews.get(&assignment.crew_id) {
            by_flight
                .entry(assignment.flight_id)
                .or_default()
                .push(name.clone());
        }
    }
    for names in by_flight.values_mut() {
        names.sort();
    }
    Ok(by_flight)
}

/// Booked ticket counts, one grouped aggregate query for the whole batch.
async fn booked_tickets_by_flight(
    conn: &DatabaseConnection,
    flight_ids: &[Uuid],
) -> AppResult<HashMap<Uuid, i64>> {
    let counts: Vec<(Uuid, i64)> = Tickets::find()
        .select_only()
        .column(TicketCol::FlightId)
        .column_as(TicketCol::Id.count(), "booked")
        .filter(TicketCol::FlightId.is_in(flight_ids.to_vec()))
        .group_by(TicketCol::FlightId)
        .into_tuple()
        .all(conn)
        .await?;
    Ok(counts.into_iter().collect())
}

fn route_display(
    route: &RouteModel,
    airports: &HashMap<Uuid, AirportModel>,
) -> AppResult<String> {
    let source = airports.get(&route.source_id).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("route {} references missing airport", route.id))
    })?;
    let destination = airports.get(&route.destination_id).ok_or_else(|| {
        AppError::Internal(anyhow::anyhow!("route {} references missing airport", route.id))
    })?;
    Ok(format!("{} - {}", source.name, destination.name))
}

fn dedup(mut ids: Vec<Uuid>) -> Vec<Uuid> {
    ids.sort_unstable();
    ids.dedup();
    ids
}
