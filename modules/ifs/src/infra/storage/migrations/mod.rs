use sea_orm_migration::prelude::*;

mod m20250101_000002_create_system_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000002_create_system_tables::Migration)]
    }

    // Separate bookkeeping table; the auth migrator shares the database.
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("seaql_migrations_ifs").into_iden()
    }
}
