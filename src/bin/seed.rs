use airport_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
    entity::{
        AirplaneTypes, Airplanes, Airports, Crews, Flights, Routes, Users, airplane_types,
        airplanes, airports, crews, flight_crew, flights, routes, users,
    },
};
use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use chrono::{DateTime, Utc};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm).await?;

    let admin_id = ensure_user(&orm, "admin@example.com", "admin123", true).await?;
    let user_id = ensure_user(&orm, "user@example.com", "user123", false).await?;
    seed_flights(&orm).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    orm: &DatabaseConnection,
    email: &str,
    password: &str,
    is_staff: bool,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Users::find()
        .filter(users::Column::Email.eq(email))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!(e.to_string()))?
        .to_string();

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(email.to_string()),
        password_hash: Set(password_hash),
        is_staff: Set(is_staff),
        created_at: NotSet,
    }
    .insert(orm)
    .await?;

    println!("Ensured user {email} (staff={is_staff})");
    Ok(user.id)
}

async fn ensure_airport(
    orm: &DatabaseConnection,
    name: &str,
    city: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Airports::find()
        .filter(airports::Column::Name.eq(name))
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }
    let airport = airports::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.to_string()),
        closest_big_city: Set(city.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(airport.id)
}

async fn ensure_route(
    orm: &DatabaseConnection,
    source_id: Uuid,
    destination_id: Uuid,
    distance: i32,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Routes::find()
        .filter(
            Condition::all()
                .add(routes::Column::SourceId.eq(source_id))
                .add(routes::Column::DestinationId.eq(destination_id)),
        )
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }
    let route = routes::ActiveModel {
        id: Set(Uuid::new_v4()),
        source_id: Set(source_id),
        destination_id: Set(destination_id),
        distance: Set(distance),
    }
    .insert(orm)
    .await?;
    Ok(route.id)
}

async fn ensure_crew(
    orm: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
) -> anyhow::Result<Uuid> {
    if let Some(existing) = Crews::find()
        .filter(
            Condition::all()
                .add(crews::Column::FirstName.eq(first_name))
                .add(crews::Column::LastName.eq(last_name)),
        )
        .one(orm)
        .await?
    {
        return Ok(existing.id);
    }
    let member = crews::ActiveModel {
        id: Set(Uuid::new_v4()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
    }
    .insert(orm)
    .await?;
    Ok(member.id)
}

async fn seed_flights(orm: &DatabaseConnection) -> anyhow::Result<()> {
    let atlanta = ensure_airport(orm, "Atlanta-Hartsfield-Jackson", "Atlanta").await?;
    let paris = ensure_airport(orm, "Paris-Charles-de-Gaulle", "Paris").await?;
    let tokyo = ensure_airport(orm, "Tokyo-Haneda", "Tokyo").await?;

    let jet_type = match AirplaneTypes::find()
        .filter(airplane_types::Column::Name.eq("Wide-body jet"))
        .one(orm)
        .await?
    {
        Some(t) => t.id,
        None => {
            airplane_types::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set("Wide-body jet".to_string()),
            }
            .insert(orm)
            .await?
            .id
        }
    };

    let airplane = match Airplanes::find()
        .filter(airplanes::Column::Name.eq("Boeing 777"))
        .one(orm)
        .await?
    {
        Some(p) => p.id,
        None => {
            airplanes::ActiveModel {
                id: Set(Uuid::new_v4()),
                name: Set("Boeing 777".to_string()),
                rows: Set(42),
                seats_in_row: Set(8),
                airplane_type_id: Set(jet_type),
                image: Set(None),
            }
            .insert(orm)
            .await?
            .id
        }
    };

    let atlanta_paris = ensure_route(orm, atlanta, paris, 7015).await?;
    ensure_route(orm, paris, tokyo, 9713).await?;

    let pilot = ensure_crew(orm, "Amelia", "Earhart").await?;
    let copilot = ensure_crew(orm, "Charles", "Lindbergh").await?;

    if Flights::find()
        .filter(flights::Column::RouteId.eq(atlanta_paris))
        .one(orm)
        .await?
        .is_none()
    {
        let departure: DateTime<Utc> = "2025-09-15T08:30:00Z".parse()?;
        let arrival: DateTime<Utc> = "2025-09-15T17:45:00Z".parse()?;
        let flight = flights::ActiveModel {
            id: Set(Uuid::new_v4()),
            route_id: Set(atlanta_paris),
            airplane_id: Set(airplane),
            departure_time: Set(departure.into()),
            arrival_time: Set(arrival.into()),
        }
        .insert(orm)
        .await?;

        for crew_id in [pilot, copilot] {
            flight_crew::ActiveModel {
                flight_id: Set(flight.id),
                crew_id: Set(crew_id),
            }
            .insert(orm)
            .await?;
        }
    }

    println!("Seeded airports, routes, airplane and flight");
    Ok(())
}
