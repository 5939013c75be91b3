use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::dto::airports::{AirportList, CreateAirportRequest};
use crate::{
    entity::airports::{ActiveModel as AirportActive, Column as AirportCol, Model as AirportModel},
    entity::Airports,
    error::AppResult,
    middleware::auth::AuthUser,
    models::Airport,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_airports(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<AirportList>> {
    policy::authorize(Resource::Airports, Action::List, user)?;

    let items = Airports::find()
        .order_by_asc(AirportCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(airport_from_entity)
        .collect();

    Ok(ApiResponse::success("Airports", AirportList { items }, None))
}

pub async fn create_airport(
    state: &AppState,
    user: &AuthUser,
    payload: CreateAirportRequest,
) -> AppResult<ApiResponse<Airport>> {
    policy::authorize(Resource::Airports, Action::Create, user)?;

    let airport = AirportActive {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name),
        closest_big_city: Set(payload.closest_big_city),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Airport created",
        airport_from_entity(airport),
        Some(Meta::empty()),
    ))
}

pub(crate) fn airport_from_entity(model: AirportModel) -> Airport {
    Airport {
        id: model.id,
        name: model.name,
        closest_big_city: model.closest_big_city,
    }
}
