use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::airplane_types::{AirplaneTypeList, CreateAirplaneTypeRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::AirplaneType,
    response::ApiResponse,
    services::airplane_type_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_airplane_types).post(create_airplane_type))
}

#[utoipa::path(
    get,
    path = "/api/airplane_types",
    responses(
        (status = 200, description = "List airplane types", body = ApiResponse<AirplaneTypeList>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplane types"
)]
pub async fn list_airplane_types(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AirplaneTypeList>>> {
    let resp = airplane_type_service::list_airplane_types(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplane_types",
    request_body = CreateAirplaneTypeRequest,
    responses(
        (status = 201, description = "Create airplane type", body = ApiResponse<AirplaneType>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplane types"
)]
pub async fn create_airplane_type(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirplaneTypeRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<AirplaneType>>)> {
    let resp = airplane_type_service::create_airplane_type(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
