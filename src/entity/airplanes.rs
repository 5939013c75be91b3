use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "airplanes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    pub name: String,
    pub rows: i32,
    pub seats_in_row: i32,
    pub airplane_type_id: Uuid,
    /// Media-relative path of the uploaded image, if any.
    pub image: Option<String>,
}

impl Model {
    /// Seat capacity, derived so it can never drift from the layout.
    pub fn capacity(&self) -> i32 {
        self.rows * self.seats_in_row
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::airplane_types::Entity",
        from = "Column::AirplaneTypeId",
        to = "super::airplane_types::Column::Id"
    )]
    AirplaneTypes,
    #[sea_orm(has_many = "super::flights::Entity")]
    Flights,
}

impl Related<super::airplane_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AirplaneTypes.def()
    }
}

impl Related<super::flights::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Flights.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
