pub mod airplane_types;
pub mod airplanes;
pub mod airports;
pub mod crews;
pub mod flight_crew;
pub mod flights;
pub mod orders;
pub mod routes;
pub mod tickets;
pub mod users;

pub use airplane_types::Entity as AirplaneTypes;
pub use airplanes::Entity as Airplanes;
pub use airports::Entity as Airports;
pub use crews::Entity as Crews;
pub use flight_crew::Entity as FlightCrew;
pub use flights::Entity as Flights;
pub use orders::Entity as Orders;
pub use routes::Entity as Routes;
pub use tickets::Entity as Tickets;
pub use users::Entity as Users;
