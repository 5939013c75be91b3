use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::dto::airplanes::{
    AirplaneImage, AirplaneList, AirplaneListItem, CreateAirplaneRequest, UpdateAirplaneRequest,
};
use crate::{
    entity::airplanes::{ActiveModel as AirplaneActive, Column as AirplaneCol, Model as AirplaneModel},
    entity::{AirplaneTypes, Airplanes},
    error::{AppError, AppResult},
    media,
    middleware::auth::AuthUser,
    models::Airplane,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_airplanes(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AirplaneList>> {
    policy::authorize(Resource::Airplanes, Action::List, user)?;

    let rows = Airplanes::find()
        .find_also_related(AirplaneTypes)
        .order_by_asc(AirplaneCol::Name)
        .all(&state.orm)
        .await?;

    let items = rows
        .into_iter()
        .map(|(airplane, airplane_type)| {
            let type_name = airplane_type.ok_or_else(|| {
                AppError::Internal(anyhow::anyhow!(
                    "airplane {} references missing type",
                    airplane.id
                ))
            })?;
            let capacity = airplane.capacity();
            let image = airplane.image.as_deref().map(media::media_url);
            Ok(AirplaneListItem {
                id: airplane.id,
                name: airplane.name,
                rows: airplane.rows,
                seats_in_row: airplane.seats_in_row,
                capacity,
                airplane_type: type_name.name,
                image,
            })
        })
        .collect::<AppResult<Vec<_>>>()?;

    Ok(ApiResponse::success(
        "Airplanes",
        AirplaneList { items },
        None,
    ))
}

pub async fn create_airplane(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneRequest,
) -> AppResult<ApiResponse<Airplane>> {
    policy::authorize(Resource::Airplanes, Action::Create, user)?;

    if AirplaneTypes::find_by_id(payload.airplane_type)
        .one(&state.orm)
        .await?
        .is_none()
    {
        return Err(AppError::validation(
            "airplane_type",
            format!("Unknown airplane type: {}", payload.airplane_type),
        ));
    }

    let airplane = AirplaneActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        rows: Set(payload.rows),
        seats_in_row: Set(payload.seats_in_row),
        airplane_type_id: Set(payload.airplane_type),
        image: Set(None),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Airplane created",
        airplane_from_entity(airplane),
        Some(Meta::empty()),
    ))
}

pub async fn update_airplane(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateAirplaneRequest,
) -> AppResult<ApiResponse<Airplane>> {
    policy::authorize(Resource::Airplanes, Action::Update, user)?;

    let existing = Airplanes::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    if let Some(type_id) = payload.airplane_type {
        if AirplaneTypes::find_by_id(type_id)
            .one(&state.orm)
            .await?
            .is_none()
        {
            return Err(AppError::validation(
                "airplane_type",
                format!("Unknown airplane type: {type_id}"),
            ));
        }
    }

    let mut active: AirplaneActive = existing.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(rows) = payload.rows {
        active.rows = Set(rows);
    }
    if let Some(seats_in_row) = payload.seats_in_row {
        active.seats_in_row = Set(seats_in_row);
    }
    if let Some(type_id) = payload.airplane_type {
        active.airplane_type_id = Set(type_id);
    }

    let airplane = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Updated",
        airplane_from_entity(airplane),
        Some(Meta::empty()),
    ))
}

pub async fn upload_airplane_image(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    content_type: &str,
    data: &[u8],
) -> AppResult<ApiResponse<AirplaneImage>> {
    policy::authorize(Resource::Airplanes, Action::UploadImage, user)?;

    let airplane = Airplanes::find_by_id(id).one(&state.orm).await?;
    let airplane = match airplane {
        Some(a) => a,
        None => return Err(AppError::NotFound),
    };

    let path = media::save_airplane_image(&state.media_root, &airplane.name, content_type, data)
        .await?;

    let mut active: AirplaneActive = airplane.into();
    active.image = Set(Some(path.clone()));
    let airplane = active.update(&state.orm).await?;

    Ok(ApiResponse::success(
        "Image uploaded",
        AirplaneImage {
            id: airplane.id,
            image: Some(media::media_url(&path)),
        },
        Some(Meta::empty()),
    ))
}

fn airplane_from_entity(model: AirplaneModel) -> Airplane {
    let capacity = model.capacity();
    let image = model.image.as_deref().map(media::media_url);
    Airplane {
        id: model.id,
        name: model.name,
        rows: model.rows,
        seats_in_row: model.seats_in_row,
        capacity,
        airplane_type: model.airplane_type_id,
        image,
    }
}
