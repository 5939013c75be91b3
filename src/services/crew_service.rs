use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

use crate::dto::crews::{CreateCrewRequest, CrewList};
use crate::{
    entity::Crews,
    entity::crews::{ActiveModel as CrewActive, Column as CrewCol, Model as CrewModel},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Crew,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn list_crews(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CrewList>> {
    policy::authorize(Resource::Crews, Action::List, user)?;

    let items = Crews::find()
        .order_by_asc(CrewCol::LastName)
        .order_by_asc(CrewCol::FirstName)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(crew_from_entity)
        .collect();

    Ok(ApiResponse::success("Crews", CrewList { items }, None))
}

pub async fn create_crew(
    state: &AppState,
    user: &AuthUser,
    payload: CreateCrewRequest,
) -> AppResult<ApiResponse<Crew>> {
    policy::authorize(Resource::Crews, Action::Create, user)?;

    let crew = CrewActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(payload.first_name),
        last_name: Set(payload.last_name),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Crew member created",
        crew_from_entity(crew),
        Some(Meta::empty()),
    ))
}

fn crew_from_entity(model: CrewModel) -> Crew {
    Crew {
        id: model.id,
        first_name: model.first_name,
        last_name: model.last_name,
    }
}
