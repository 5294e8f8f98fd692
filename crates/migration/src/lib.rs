//! Schema bootstrap for the subscription store.
//! Every migration is written with `if_not_exists` so running the migrator on
//! an existing database file is a no-op.
pub use sea_orm_migration::prelude::*;

mod m20241018_000001_create_abonnement;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20241018_000001_create_abonnement::Migration)]
    }
}
