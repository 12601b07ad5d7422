//! Create ticket table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_parking::Parking;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ticket::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ticket::ParkingNumber).integer().not_null())
                    .col(ColumnDef::new(Ticket::VehicleRegNumber).string().not_null())
                    .col(
                        ColumnDef::new(Ticket::PriceCents)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Ticket::InTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Ticket::OutTime).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_ticket_parking")
                            .from(Ticket::Table, Ticket::ParkingNumber)
                            .to(Parking::Table, Parking::ParkingNumber),
                    )
                    .to_owned(),
            )
            .await?;

        // Create index for vehicle history lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_ticket_vehicle_reg_number")
                    .table(Ticket::Table)
                    .col(Ticket::VehicleRegNumber)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Ticket {
    Table,
    Id,
    ParkingNumber,
    VehicleRegNumber,
    PriceCents,
    InTime,
    OutTime,
}
