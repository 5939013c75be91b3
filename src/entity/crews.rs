use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "crews")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::flight_crew::Entity")]
    FlightCrew,
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        super::flight_crew::Relation::Flights.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::flight_crew::Relation::Crews.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
