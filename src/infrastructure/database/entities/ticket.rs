//! Ticket entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ticket")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub parking_number: i32,
    pub vehicle_reg_number: String,

    /// Price in smallest currency unit (e.g., cents)
    pub price_cents: i64,

    pub in_time: DateTimeUtc,

    /// Null while the vehicle is parked
    #[sea_orm(nullable)]
    pub out_time: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::parking_spot::Entity",
        from = "Column::ParkingNumber",
        to = "super::parking_spot::Column::ParkingNumber"
    )]
    ParkingSpot,
}

impl Related<super::parking_spot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParkingSpot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
