use std::collections::HashMap;

use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QuerySelect, Set,
};
use uuid::Uuid;

use crate::dto::routes::{CreateRouteRequest, RouteList, RouteListItem};
use crate::{
    entity::airports::{Column as AirportCol, Model as AirportModel},
    entity::routes::{ActiveModel as RouteActive, Column as RouteCol, Model as RouteModel},
    entity::{Airports, Routes},
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::AuthUser,
    models::Route,
    policy::{self, Action, Resource},
    response::{ApiResponse, Meta},
    routes::params::RouteFilterQuery,
    state::AppState,
};

pub async fn list_routes(
    state: &AppState,
    user: &AuthUser,
    query: RouteFilterQuery,
) -> AppResult<ApiResponse<RouteList>> {
    policy::authorize(Resource::Routes, Action::List, user)?;

    let mut condition = Condition::all();

    // Endpoint filters match against airport names, so each one resolves to
    // a set of airport ids first. An empty set means no route can match.
    if let Some(source) = query.source() {
        let ids = airport_ids_matching(&state.orm, source).await?;
        if ids.is_empty() {
            return Ok(ApiResponse::success(
                "Routes",
                RouteList { items: Vec::new() },
                None,
            ));
        }
        condition = condition.add(RouteCol::SourceId.is_in(ids));
    }

    if let Some(destination) = query.destination() {
        let ids = airport_ids_matching(&state.orm, destination).await?;
        if ids.is_empty() {
            return Ok(ApiResponse::success(
                "Routes",
                RouteList { items: Vec::new() },
                None,
            ));
        }
        condition = condition.add(RouteCol::DestinationId.is_in(ids));
    }

    let routes = Routes::find().filter(condition).all(&state.orm).await?;
    let items = assemble_route_list(&state.orm, routes).await?;

    Ok(ApiResponse::success("Routes", RouteList { items }, None))
}

pub async fn create_route(
    state: &AppState,
    user: &AuthUser,
    payload: CreateRouteRequest,
) -> AppResult<ApiResponse<Route>> {
    policy::authorize(Resource::Routes, Action::Create, user)?;

    let mut errors = FieldErrors::new();
    for (field, id) in [("source", payload.source), ("destination", payload.destination)] {
        if Airports::find_by_id(id).one(&state.orm).await?.is_none() {
            errors.insert(field.to_string(), format!("Unknown airport: {id}"));
        }
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    let route = RouteActive {
        id: Set(Uuid::new_v4()),
        source_id: Set(payload.source),
        destination_id: Set(payload.destination),
        distance: Set(payload.distance),
    }
    .insert(&state.orm)
    .await?;

    Ok(ApiResponse::success(
        "Route created",
        route_from_entity(route),
        Some(Meta::empty()),
    ))
}

async fn airport_ids_matching(conn: &DatabaseConnection, needle: &str) -> AppResult<Vec<Uuid>> {
    let pattern = format!("%{}%", needle);
    let ids = Airports::find()
        .select_only()
        .column(AirportCol::Id)
        .filter(Expr::col(AirportCol::Name).ilike(pattern))
        .into_tuple::<Uuid>()
        .all(conn)
        .await?;
    Ok(ids)
}

async fn assemble_route_list(
    conn: &DatabaseConnection,
    routes: Vec<RouteModel>,
) -> AppResult<Vec<RouteListItem>> {
    let mut airport_ids: Vec<Uuid> = routes
        .iter()
        .flat_map(|route| [route.source_id, route.destination_id])
        .collect();
    airport_ids.sort_unstable();
    airport_ids.dedup();

    let airports: HashMap<Uuid, AirportModel> = Airports::find()
        .filter(AirportCol::Id.is_in(airport_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|airport| (airport.id, airport))
        .collect();

    routes
        .into_iter()
        .map(|route| {
            let source = lookup_airport(&airports, route.source_id)?;
            let destination = lookup_airport(&airports, route.destination_id)?;
            Ok(RouteListItem {
                id: route.id,
                source: source.closest_big_city.clone(),
                destination: destination.closest_big_city.clone(),
                distance: route.distance,
            })
        })
        .collect()
}

fn lookup_airport(
    airports: &HashMap<Uuid, AirportModel>,
    id: Uuid,
) -> AppResult<&AirportModel> {
    airports
        .get(&id)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("route references missing airport {id}")))
}

fn route_from_entity(model: RouteModel) -> Route {
    Route {
        id: model.id,
        source: model.source_id,
        destination: model.destination_id,
        distance: model.distance,
    }
}
