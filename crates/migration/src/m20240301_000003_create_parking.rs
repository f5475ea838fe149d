//! Create `parking` table.
//! Keyed by the parking code; `actual_boat_id` is a free-text occupancy marker.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Parking::Table)
                    .if_not_exists()
                    .col(string_len(Parking::ParkingCode, 16).primary_key())
                    .col(integer(Parking::BoatTypeId))
                    .col(string_len_null(Parking::ActualBoatId, 32))
                    .col(integer(Parking::Version).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parking_boat_type")
                            .from(Parking::Table, Parking::BoatTypeId)
                            .to(BoatType::Table, BoatType::BoatTypeId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Parking::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Parking {
    Table,
    ParkingCode,
    BoatTypeId,
    ActualBoatId,
    Version,
}

#[derive(DeriveIden)]
enum BoatType { Table, BoatTypeId }
