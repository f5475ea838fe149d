use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Boat listing: filtered by member, ordered by class
        manager
            .create_index(
                Index::create()
                    .name("idx_boat_member_class")
                    .table(Boat::Table)
                    .col(Boat::MemberId)
                    .col(Boat::BoatClass)
                    .to_owned(),
            )
            .await?;

        // Anti-join against occupied parking codes
        manager
            .create_index(
                Index::create()
                    .name("idx_boat_parking_code")
                    .table(Boat::Table)
                    .col(Boat::ParkingCode)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_boat_type_name")
                    .table(BoatType::Table)
                    .col(BoatType::Name)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_boat_type_name").table(BoatType::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_boat_parking_code").table(Boat::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_boat_member_class").table(Boat::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Boat { Table, MemberId, BoatClass, ParkingCode }

#[derive(DeriveIden)]
enum BoatType { Table, Name }
