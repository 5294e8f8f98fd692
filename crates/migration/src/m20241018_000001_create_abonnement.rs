//! Create `abonnement` table.
//!
//! One row per subscription; `subscription_id` is assigned by the store.
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Abonnement::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Abonnement::SubscriptionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Abonnement::CustomerId).big_integer().not_null())
                    .col(ColumnDef::new(Abonnement::VehicleId).big_integer().not_null())
                    .col(ColumnDef::new(Abonnement::Term).integer().not_null())
                    // Decimal text keeps the submitted precision exactly.
                    .col(ColumnDef::new(Abonnement::PricePerMonth).text().not_null())
                    .col(ColumnDef::new(Abonnement::StartMonth).text().not_null())
                    .col(ColumnDef::new(Abonnement::EndMonth).text().not_null())
                    .col(ColumnDef::new(Abonnement::Restance).boolean().not_null())
                    .col(ColumnDef::new(Abonnement::ContractInformation).text().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Abonnement::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Abonnement {
    Table,
    SubscriptionId,
    CustomerId,
    VehicleId,
    Term,
    PricePerMonth,
    StartMonth,
    EndMonth,
    Restance,
    ContractInformation,
}
