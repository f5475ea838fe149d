//! Create `member` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::MemberId))
                    .col(string_len(Member::FirstName, 64))
                    .col(string_len(Member::LastName, 64))
                    .col(string_len(Member::FullName, 130))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Member::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Member {
    Table,
    MemberId,
    FirstName,
    LastName,
    FullName,
}
