use airport_api::{
    db::{create_orm_conn, run_migrations},
    dto::{
        flights::CreateFlightRequest,
        orders::{CreateOrderRequest, CreateTicketRequest},
    },
    entity::{
        airplane_types::ActiveModel as AirplaneTypeActive, airplanes::ActiveModel as AirplaneActive,
        airports::ActiveModel as AirportActive, crews::ActiveModel as CrewActive,
        routes::ActiveModel as RouteActive, users::ActiveModel as UserActive,
    },
    error::AppError,
    middleware::auth::AuthUser,
    routes::params::FlightFilterQuery,
    services::{crew_service, flight_service, order_service},
    state::AppState,
};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

// Integration flow: admin schedules flights, a user books seats, and the
// listing reflects filters, crew and seat availability.
#[tokio::test]
async fn flight_listing_filters_and_availability() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let state = setup_state(&database_url).await?;

    // Every name carries a per-run tag so runs sharing a database stay
    // independent of each other.
    let tag = Uuid::new_v4().simple().to_string();

    let admin = AuthUser {
        user_id: create_user(&state, true, &format!("admin-{tag}@example.com")).await?,
        is_staff: true,
    };
    let user = AuthUser {
        user_id: create_user(&state, false, &format!("user-{tag}@example.com")).await?,
        is_staff: false,
    };

    let alpha = create_airport(&state, &format!("Field Alpha {tag}"), "Alphaville").await?;
    let beta = create_airport(&state, &format!("Field Beta {tag}"), "Betatown").await?;

    let route_id = create_route(&state, alpha, beta, 1200).await?;
    let airplane_type_id = create_airplane_type(&state, &format!("Narrow-body {tag}")).await?;
    // 10 rows of 4 seats: capacity 40.
    let airplane_id =
        create_airplane(&state, &format!("Jet {tag}"), 10, 4, airplane_type_id).await?;

    let earhart = create_crew(&state, "Amelia", "Earhart").await?;
    let lindbergh = create_crew(&state, "Charles", "Lindbergh").await?;

    // Crew reads stay closed to regular users.
    assert!(matches!(
        crew_service::list_crews(&state, &user).await,
        Err(AppError::Forbidden)
    ));

    // Scheduling is an admin operation.
    let request = CreateFlightRequest {
        route: route_id,
        airplane: airplane_id,
        departure_time: "2023-12-12T08:30:00Z".parse::<DateTime<Utc>>()?,
        arrival_time: "2023-12-12T17:45:00Z".parse::<DateTime<Utc>>()?,
        crew: vec![lindbergh, earhart, lindbergh],
    };
    assert!(matches!(
        flight_service::create_flight(&state, &user, clone_flight_request(&request)).await,
        Err(AppError::Forbidden)
    ));

    let created = flight_service::create_flight(&state, &admin, request).await?;
    assert_eq!(created.message, "Flight created");
    let flight = created.data.expect("created flight");
    // Duplicate crew ids collapse, submission order otherwise kept.
    assert_eq!(flight.crew, vec![lindbergh, earhart]);

    let next_day = flight_service::create_flight(
        &state,
        &admin,
        CreateFlightRequest {
            route: route_id,
            airplane: airplane_id,
            departure_time: "2023-12-13T09:00:00Z".parse::<DateTime<Utc>>()?,
            arrival_time: "2023-12-13T18:00:00Z".parse::<DateTime<Utc>>()?,
            crew: vec![earhart],
        },
    )
    .await?
    .data
    .expect("created flight");

    // Book three seats so availability drops below capacity.
    order_service::create_order(
        &state,
        &user,
        CreateOrderRequest {
            tickets: vec![
                CreateTicketRequest { row: 1, seat: 1, flight: flight.id },
                CreateTicketRequest { row: 1, seat: 2, flight: flight.id },
                CreateTicketRequest { row: 2, seat: 1, flight: flight.id },
            ],
        },
    )
    .await?;

    // Departure filter covers exactly the requested day.
    let listed = flight_service::list_flights(
        &state,
        &user,
        FlightFilterQuery {
            departure_time: Some("2023-12-12".into()),
            arrival_time: None,
        },
    )
    .await?
    .data
    .expect("flight list")
    .items;

    let day = NaiveDate::from_ymd_opt(2023, 12, 12).expect("date");
    assert!(
        listed
            .iter()
            .all(|item| item.departure_time.date_naive() == day),
        "departure filter leaked another day into the listing"
    );
    assert!(!listed.iter().any(|item| item.id == next_day.id));

    let item = listed
        .iter()
        .find(|item| item.id == flight.id)
        .expect("scheduled flight in the filtered listing");
    assert_eq!(item.route, format!("Field Alpha {tag} - Field Beta {tag}"));
    assert_eq!(item.airplane, format!("Jet {tag}"));
    assert_eq!(item.crew, vec!["Amelia Earhart", "Charles Lindbergh"]);
    assert_eq!(item.tickets_available, 37);

    // Arrival filter is a lower bound: the 12th drops out, the 13th stays.
    let arrivals = flight_service::list_flights(
        &state,
        &user,
        FlightFilterQuery {
            departure_time: None,
            arrival_time: Some("2023-12-13".into()),
        },
    )
    .await?
    .data
    .expect("flight list")
    .items;
    assert!(!arrivals.iter().any(|item| item.id == flight.id));
    assert!(arrivals.iter().any(|item| item.id == next_day.id));

    // Detail view exposes booked seats in row/seat order and sorted crew.
    let detail = flight_service::get_flight(&state, &user, flight.id)
        .await?
        .data
        .expect("flight detail");
    assert_eq!(detail.crew, vec!["Amelia Earhart", "Charles Lindbergh"]);
    let places: Vec<(i32, i32)> = detail
        .taken_places
        .iter()
        .map(|place| (place.row, place.seat))
        .collect();
    assert_eq!(places, vec![(1, 1), (1, 2), (2, 1)]);

    // Malformed filter dates are client errors, not empty results.
    match flight_service::list_flights(
        &state,
        &user,
        FlightFilterQuery {
            departure_time: Some("12-12-2023".into()),
            arrival_time: None,
        },
    )
    .await
    {
        Err(AppError::Validation(errors)) => {
            assert_eq!(
                errors.get("departure_time").map(String::as_str),
                Some("Date has wrong format: 12-12-2023. Use YYYY-MM-DD.")
            );
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    assert!(matches!(
        flight_service::get_flight(&state, &user, Uuid::new_v4()).await,
        Err(AppError::NotFound)
    ));

    // Scheduling against unknown references reports every bad field.
    match flight_service::create_flight(
        &state,
        &admin,
        CreateFlightRequest {
            route: Uuid::new_v4(),
            airplane: Uuid::new_v4(),
            departure_time: "2023-12-14T09:00:00Z".parse::<DateTime<Utc>>()?,
            arrival_time: "2023-12-14T18:00:00Z".parse::<DateTime<Utc>>()?,
            crew: vec![Uuid::new_v4()],
        },
    )
    .await
    {
        Err(AppError::Validation(errors)) => {
            assert!(errors.contains_key("route"));
            assert!(errors.contains_key("airplane"));
            assert!(errors.contains_key("crew"));
        }
        other => panic!("expected a validation error, got {other:?}"),
    }

    Ok(())
}

fn clone_flight_request(request: &CreateFlightRequest) -> CreateFlightRequest {
    CreateFlightRequest {
        route: request.route,
        airplane: request.airplane,
        departure_time: request.departure_time,
        arrival_time: request.arrival_time,
        crew: request.crew.clone(),
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let orm = create_orm_conn(database_url).await?;
    run_migrations(&orm).await?;
    Ok(AppState {
        orm,
        media_root: std::env::temp_dir(),
    })
}

async fn create_user(state: &AppState, is_staff: bool, email: &str) -> anyhow::Result<Uuid> {
    let user = UserActive {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set("dummy".into()),
        is_staff: Set(is_staff),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(user.id)
}

async fn create_airport(state: &AppState, name: &str, city: &str) -> anyhow::Result<Uuid> {
    let airport = AirportActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        closest_big_city: Set(city.to_string()),
    }
    .insert(&state.orm)
    .await?;
    Ok(airport.id)
}

async fn create_route(
    state: &AppState,
    source_id: Uuid,
    destination_id: Uuid,
    distance: i32,
) -> anyhow::Result<Uuid> {
    let route = RouteActive {
        id: Set(Uuid::new_v4()),
        source_id: Set(source_id),
        destination_id: Set(destination_id),
        distance: Set(distance),
    }
    .insert(&state.orm)
    .await?;
    Ok(route.id)
}

async fn create_airplane_type(state: &AppState, name: &str) -> anyhow::Result<Uuid> {
    let airplane_type = AirplaneTypeActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
    }
    .insert(&state.orm)
    .await?;
    Ok(airplane_type.id)
}

async fn create_airplane(
    state: &AppState,
    name: &str,
    rows: i32,
    seats_in_row: i32,
    airplane_type_id: Uuid,
) -> anyhow::Result<Uuid> {
    let airplane = AirplaneActive {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        rows: Set(rows),
        seats_in_row: Set(seats_in_row),
        airplane_type_id: Set(airplane_type_id),
        image: Set(None),
    }
    .insert(&state.orm)
    .await?;
    Ok(airplane.id)
}

async fn create_crew(state: &AppState, first: &str, last: &str) -> anyhow::Result<Uuid> {
    let member = CrewActive {
        id: Set(Uuid::new_v4()),
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
    }
    .insert(&state.orm)
    .await?;
    Ok(member.id)
}
