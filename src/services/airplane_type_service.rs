use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::dto::airplane_types::{AirplaneTypeList, CreateAirplaneTypeRequest};
use crate::{
    entity::AirplaneTypes,
    entity::airplane_types::{
        ActiveModel as AirplaneTypeActive, Column as AirplaneTypeCol, Model as AirplaneTypeModel,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::AirplaneType,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_airplane_types(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AirplaneTypeList>> {
    policy::authorize(Resource::AirplaneTypes, Action::List, user)?;

    let items = AirplaneTypes::find()
        .order_by_asc(AirplaneTypeCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(airplane_type_from_entity)
        .collect();

    Ok(ApiResponse::success(
        "Airplane types",
        AirplaneTypeList { items },
        None,
    ))
}

pub async fn create_airplane_type(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirplaneTypeRequest,
) -> AppResult<ApiResponse<AirplaneType>> {
    policy::authorize(Resource::AirplaneTypes, Action::Create, user)?;

    let airplane_type = AirplaneTypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Airplane type created",
        airplane_type_from_entity(airplane_type),
        Some(Meta::empty()),
    ))
}

fn airplane_type_from_entity(model: AirplaneTypeModel) -> AirplaneType {
    AirplaneType {
        id: model.id,
        name: model.name,
    }
}
