pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_card;
mod m20240301_000002_create_product;
mod m20240301_000003_create_card_product;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_card::Migration),
            Box::new(m20240301_000002_create_product::Migration),
            // Join table references both, keep it last
            Box::new(m20240301_000003_create_card_product::Migration),
        ]
    }
}
