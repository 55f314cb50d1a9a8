use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20250101_000001_create_users::Migration)]
    }

    // Each module keeps its own bookkeeping table so migrators can run
    // side by side on one database.
    fn migration_table_name() -> sea_orm::DynIden {
        Alias::new("seaql_migrations_auth").into_iden()
    }
}
