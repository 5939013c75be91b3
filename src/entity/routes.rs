use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "routes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub source_id: Uuid,
    pub destination_id: Uuid,
    pub distance: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airports::Entity",
        from = "Column::SourceId",
        to = "super::airports::Column::Id"
    )]
    SourceAirport,
    #[sea_orm(
        belongs_to = "super::airports::Entity",
        from = "Column::DestinationId",
        to = "super::airports::Column::Id"
    )]
    DestinationAirport,
    #[sea_orm(has_many = "super::flights::Entity")]
    Flights,
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
