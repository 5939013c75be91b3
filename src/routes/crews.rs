use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::{
    dto::crews::{CreateCrewRequest, CrewList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Crew,
    response::ApiResponse,
    services::crew_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_crews).post(create_crew))
}

#[utoipa::path(
    get,
    path = "/api/crews",
    responses(
        (status = 200, description = "List crew members", body = ApiResponse<CrewList>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Crews"
)]
pub async fn list_crews(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CrewList>>> {
    let resp = crew_service::list_crews(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/crews",
    request_body = CreateCrewRequest,
    responses(
        (status = 201, description = "Create crew member", body = ApiResponse<Crew>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Crews"
)]
pub async fn create_crew(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateCrewRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Crew>>)> {
    let resp = crew_service::create_crew(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
