use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::flights::{CreateFlightRequest, FlightDetail, FlightList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Flight,
    response::ApiResponse,
    routes::params::FlightFilterQuery,
    services::flight_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_flights).post(create_flight))
        .route("/{id}", get(get_flight))
}

#[utoipa::path(
    get,
    path = "/api/flights",
    params(
        ("departure_time" = Option<String>, Query, description = "Filter by departure date (ex. ?departure_time=2023-12-12)"),
        ("arrival_time" = Option<String>, Query, description = "Filter by arrival date (ex. ?arrival_time=2023-12-12)"),
    ),
    responses(
        (status = 200, description = "List flights with seat availability", body = ApiResponse<FlightList>),
        (status = 400, description = "Malformed filter date"),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Flights"
)]
pub async fn list_flights(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<FlightFilterQuery>,
) -> AppResult<Json<ApiResponse<FlightList>>> {
    let resp = flight_service::list_flights(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/flights/{id}",
    params(
        ("id" = Uuid, Path, description = "Flight ID")
    ),
    responses(
        (status = 200, description = "Flight detail with taken places", body = ApiResponse<FlightDetail>),
        (status = 404, description = "Flight not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Flights"
)]
pub async fn get_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<FlightDetail>>> {
    let resp = flight_service::get_flight(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/flights",
    request_body = CreateFlightRequest,
    responses(
        (status = 201, description = "Create flight", body = ApiResponse<Flight>),
        (status = 400, description = "Unknown route, airplane or crew reference"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Flights"
)]
pub async fn create_flight(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateFlightRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Flight>>)> {
    let resp = flight_service::create_flight(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
