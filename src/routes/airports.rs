use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::airports::{AirportList, CreateAirportRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Airport,
    response::ApiResponse,
    services::airport_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_airports).post(create_airport))
}

#[utoipa::path(
    get,
    path = "/api/airports",
    responses(
        (status = 200, description = "List airports", body = ApiResponse<AirportList>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airports"
)]
pub async fn list_airports(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AirportList>>> {
    let resp = airport_service::list_airports(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airports",
    request_body = CreateAirportRequest,
    responses(
        (status = 201, description = "Create airport", body = ApiResponse<Airport>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airports"
)]
pub async fn create_airport(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirportRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airport>>)> {
    let resp = airport_service::create_airport(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
