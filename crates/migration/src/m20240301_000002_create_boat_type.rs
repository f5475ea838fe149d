use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BoatType::Table)
                    .if_not_exists()
                    .col(pk_auto(BoatType::BoatTypeId))
                    .col(string_len(BoatType::Name, 64))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(BoatType::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum BoatType {
    Table,
    BoatTypeId,
    Name,
}
