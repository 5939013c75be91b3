use axum::{
    Json, Router,
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use uuid::Uuid;

use crate::{
    dto::airplanes::{AirplaneImage, AirplaneList, CreateAirplaneRequest, UpdateAirplaneRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Airplane,
    response::ApiResponse,
    services::airplane_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_airplanes).post(create_airplane))
        .route("/{id}", put(update_airplane).patch(update_airplane))
        .route("/{id}/upload-image", post(upload_image))
}

#[utoipa::path(
    get,
    path = "/api/airplanes",
    responses(
        (status = 200, description = "List airplanes", body = ApiResponse<AirplaneList>),
        (status = 401, description = "Unauthenticated"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplanes"
)]
pub async fn list_airplanes(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AirplaneList>>> {
    let resp = airplane_service::list_airplanes(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplanes",
    request_body = CreateAirplaneRequest,
    responses(
        (status = 201, description = "Create airplane", body = ApiResponse<Airplane>),
        (status = 400, description = "Unknown airplane type"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplanes"
)]
pub async fn create_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateAirplaneRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Airplane>>)> {
    let resp = airplane_service::create_airplane(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    put,
    path = "/api/airplanes/{id}",
    params(
        ("id" = Uuid, Path, description = "Airplane ID")
    ),
    request_body = UpdateAirplaneRequest,
    responses(
        (status = 200, description = "Update airplane", body = ApiResponse<Airplane>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Airplane not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplanes"
)]
pub async fn update_airplane(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAirplaneRequest>,
) -> AppResult<Json<ApiResponse<Airplane>>> {
    let resp = airplane_service::update_airplane(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/airplanes/{id}/upload-image",
    params(
        ("id" = Uuid, Path, description = "Airplane ID")
    ),
    responses(
        (status = 200, description = "Upload airplane image", body = ApiResponse<AirplaneImage>),
        (status = 400, description = "Unsupported or missing image"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Airplane not found"),
    ),
    security(("bearer_auth" = [])),
    tag = "Airplanes"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<Json<ApiResponse<AirplaneImage>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("Invalid multipart payload".into()))?
    {
        if field.name() == Some("image") {
            let content_type = field
                .content_type()
                .map(str::to_owned)
                .ok_or_else(|| AppError::validation("image", "Missing image content type"))?;
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::BadRequest("Invalid multipart payload".into()))?;

            let resp =
                airplane_service::upload_airplane_image(&state, &user, id, &content_type, &data)
                    .await?;
            return Ok(Json(resp));
        }
    }

    Err(AppError::validation("image", "No image file submitted"))
}
