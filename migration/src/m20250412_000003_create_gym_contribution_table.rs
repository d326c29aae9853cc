use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GymContribution::Table)
                    .if_not_exists()
                    .col(big_integer(GymContribution::TornId))
                    .col(date(GymContribution::Date))
                    .col(big_integer(GymContribution::Strength).default(0))
                    .col(big_integer(GymContribution::Speed).default(0))
                    .col(big_integer(GymContribution::Defense).default(0))
                    .col(big_integer(GymContribution::Dexterity).default(0))
                    .col(big_integer(GymContribution::Total).default(0))
                    .primary_key(
                        Index::create()
                            .col(GymContribution::TornId)
                            .col(GymContribution::Date),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gym_contribution_date")
                    .table(GymContribution::Table)
                    .col(GymContribution::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_gym_contribution_date")
                    .table(GymContribution::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GymContribution::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GymContribution {
    Table,
    TornId,
    Date,
    Strength,
    Speed,
    Defense,
    Dexterity,
    Total,
}
