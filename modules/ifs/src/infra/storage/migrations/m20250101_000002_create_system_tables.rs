use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Systems::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Systems::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Systems::UserId)
                            .uuid()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Systems::AbstractionLevel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Systems::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_systems_user")
                            .from(Systems::Table, Systems::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Parts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Parts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Parts::SystemId).uuid().not_null())
                    .col(ColumnDef::new(Parts::Name).string().not_null())
                    .col(ColumnDef::new(Parts::Role).string())
                    .col(ColumnDef::new(Parts::Description).text().not_null())
                    .col(ColumnDef::new(Parts::Feelings).json().not_null())
                    .col(ColumnDef::new(Parts::Beliefs).json().not_null())
                    .col(ColumnDef::new(Parts::Triggers).json().not_null())
                    .col(ColumnDef::new(Parts::Needs).json().not_null())
                    .col(
                        ColumnDef::new(Parts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Parts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_parts_system")
                            .from(Parts::Table, Parts::SystemId)
                            .to(Systems::Table, Systems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_parts_system_id")
                    .table(Parts::Table)
                    .col(Parts::SystemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Relationships::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Relationships::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Relationships::SystemId).uuid().not_null())
                    .col(ColumnDef::new(Relationships::SourceId).uuid().not_null())
                    .col(ColumnDef::new(Relationships::TargetId).uuid().not_null())
                    .col(
                        ColumnDef::new(Relationships::RelationshipType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::Description)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Relationships::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_system")
                            .from(Relationships::Table, Relationships::SystemId)
                            .to(Systems::Table, Systems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_source")
                            .from(Relationships::Table, Relationships::SourceId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_relationships_target")
                            .from(Relationships::Table, Relationships::TargetId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_relationships_system_id")
                    .table(Relationships::Table)
                    .col(Relationships::SystemId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Journals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Journals::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Journals::SystemId).uuid().not_null())
                    .col(ColumnDef::new(Journals::PartId).uuid())
                    .col(ColumnDef::new(Journals::Title).string().not_null())
                    .col(ColumnDef::new(Journals::Content).text().not_null())
                    .col(ColumnDef::new(Journals::Metadata).json())
                    .col(
                        ColumnDef::new(Journals::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journals_system")
                            .from(Journals::Table, Journals::SystemId)
                            .to(Systems::Table, Systems::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_journals_part")
                            .from(Journals::Table, Journals::PartId)
                            .to(Parts::Table, Parts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_journals_system_id")
                    .table(Journals::Table)
                    .col(Journals::SystemId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Journals::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Relationships::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Parts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Systems::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Systems {
    Table,
    Id,
    UserId,
    AbstractionLevel,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Parts {
    Table,
    Id,
    SystemId,
    Name,
    Role,
    Description,
    Feelings,
    Beliefs,
    Triggers,
    Needs,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Relationships {
    Table,
    Id,
    SystemId,
    SourceId,
    TargetId,
    RelationshipType,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Journals {
    Table,
    Id,
    SystemId,
    PartId,
    Title,
    Content,
    Metadata,
    CreatedAt,
}
