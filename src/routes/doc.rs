use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        airplane_types::AirplaneTypeList,
        airplanes::{AirplaneImage, AirplaneList, AirplaneListItem},
        airports::AirportList,
        crews::CrewList,
        flights::{FlightDetail, FlightList, FlightListItem, TakenPlace},
        orders::{OrderList, OrderListItem, TicketListItem},
        routes::{RouteList, RouteListItem},
    },
    models::{Airplane, AirplaneType, Airport, Crew, Flight, Order, Route, Ticket, User},
    response::{ApiResponse, Meta},
    routes::{
        airplane_types, airplanes, airports, auth, crews, flights, health, orders, params,
        routes as route_routes,
    },
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        auth::register,
        airports::list_airports,
        airports::create_airport,
        route_routes::list_routes,
        route_routes::create_route,
        airplane_types::list_airplane_types,
        airplane_types::create_airplane_type,
        airplanes::list_airplanes,
        airplanes::create_airplane,
        airplanes::update_airplane,
        airplanes::upload_image,
        crews::list_crews,
        crews::create_crew,
        flights::list_flights,
        flights::get_flight,
        flights::create_flight,
        orders::list_orders,
        orders::create_order
    ),
    components(
        schemas(
            User,
            Airport,
            Route,
            AirplaneType,
            Airplane,
            Crew,
            Flight,
            Ticket,
            Order,
            AirportList,
            RouteListItem,
            RouteList,
            AirplaneTypeList,
            AirplaneListItem,
            AirplaneList,
            AirplaneImage,
            CrewList,
            FlightListItem,
            FlightList,
            TakenPlace,
            FlightDetail,
            TicketListItem,
            OrderListItem,
            OrderList,
            params::Pagination,
            Meta,
            ApiResponse<Flight>,
            ApiResponse<FlightList>,
            ApiResponse<FlightDetail>,
            ApiResponse<OrderList>,
            ApiResponse<Order>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Airports", description = "Airport endpoints"),
        (name = "Routes", description = "Route endpoints"),
        (name = "Airplane types", description = "Airplane type endpoints"),
        (name = "Airplanes", description = "Airplane endpoints"),
        (name = "Crews", description = "Crew endpoints"),
        (name = "Flights", description = "Flight endpoints"),
        (name = "Orders", description = "Order endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
