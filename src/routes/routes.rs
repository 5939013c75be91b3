use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::routes::{CreateRouteRequest, RouteList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Route,
    response::ApiResponse,
    routes::params::RouteFilterQuery,
    services::route_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_routes).post(create_route))
}

#[utoipa::path(
    get,
    path = "/api/routes",
    params(
        ("source" = Option<String>, Query, description = "Filter by source airport name (ex. ?source=atlanta)"),
        ("destination" = Option<String>, Query, description = "Filter by destination airport name (ex. ?destination=atlanta)"),
    ),
    responses(
        (status = 200, description = "List routes", body = ApiResponse<RouteList>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn list_routes(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<RouteFilterQuery>,
) -> AppResult<Json<ApiResponse<RouteList>>> {
    let resp = route_service::list_routes(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/routes",
    request_body = CreateRouteRequest,
    responses(
        (status = 201, description = "Create route", body = ApiResponse<Route>),
        (status = 400, description = "Unknown airport reference"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Routes"
)]
pub async fn create_route(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateRouteRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Route>>)> {
    let resp = route_service::create_route(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
