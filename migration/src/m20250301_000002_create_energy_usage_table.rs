use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign key to users: rows outlive account removal.
        manager
            .create_table(
                Table::create()
                    .table(EnergyUsage::Table)
                    .if_not_exists()
                    .col(big_integer(EnergyUsage::TornId))
                    .col(date(EnergyUsage::Date))
                    .col(double(EnergyUsage::Energy).default(0.0))
                    .primary_key(
                        Index::create()
                            .col(EnergyUsage::TornId)
                            .col(EnergyUsage::Date),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(EnergyUsage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum EnergyUsage {
    Table,
    TornId,
    Date,
    Energy,
}
