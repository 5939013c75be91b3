use sea_orm::entity::prelude::*;

/// Join table attaching crew members to flights.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "flight_crew")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub flight_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub crew_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::flights::Entity",
        from = "Column::FlightId",
        to = "super::flights::Column::Id"
    )]
    Flights,
    #[sea_orm(
        belongs_to = "super::crews::Entity",
        from = "Column::CrewId",
        to = "super::crews::Column::Id"
    )]
    Crews,
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl Related<super::crews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Crews.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
