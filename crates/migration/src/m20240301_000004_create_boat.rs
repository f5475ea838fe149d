//! Create `boat` table.
//! A boat belongs to one member and one boat type, and may occupy one parking slot.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Boat::Table)
                    .if_not_exists()
                    .col(pk_auto(Boat::BoatId))
                    .col(integer(Boat::MemberId))
                    .col(string_len(Boat::BoatClass, 64))
                    .col(string_len_null(Boat::HullColour, 32))
                    .col(string_len_null(Boat::SailNumber, 32))
                    .col(double(Boat::HullLength))
                    .col(integer(Boat::BoatTypeId))
                    .col(string_len_null(Boat::ParkingCode, 16))
                    .col(integer(Boat::Version).default(0))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_boat_member")
                            .from(Boat::Table, Boat::MemberId)
                            .to(Member::Table, Member::MemberId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_boat_boat_type")
                            .from(Boat::Table, Boat::BoatTypeId)
                            .to(BoatType::Table, BoatType::BoatTypeId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_boat_parking")
                            .from(Boat::Table, Boat::ParkingCode)
                            .to(Parking::Table, Parking::ParkingCode)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Boat::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Boat {
    Table,
    BoatId,
    MemberId,
    BoatClass,
    HullColour,
    SailNumber,
    HullLength,
    BoatTypeId,
    ParkingCode,
    Version,
}

#[derive(DeriveIden)]
enum Member { Table, MemberId }

#[derive(DeriveIden)]
enum BoatType { Table, BoatTypeId }

#[derive(DeriveIden)]
enum Parking { Table, ParkingCode }
