//! Migration to create defects table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Defects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Defects::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Defects::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Defects::Description).text().null())
                    .col(
                        ColumnDef::new(Defects::Priority)
                            .integer()
                            .not_null()
                            .default(3),
                    )
                    .col(
                        ColumnDef::new(Defects::Status)
                            .string_len(20)
                            .not_null()
                            .default("new"),
                    )
                    .col(ColumnDef::new(Defects::ProjectId).string().not_null())
                    .col(ColumnDef::new(Defects::AssignedTo).string().null())
                    .col(ColumnDef::new(Defects::CreatedBy).string().null())
                    .col(
                        ColumnDef::new(Defects::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Defects::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_defects_project")
                            .from(Defects::Table, Defects::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_defects_assignee")
                            .from(Defects::Table, Defects::AssignedTo)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_defects_author")
                            .from(Defects::Table, Defects::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_defects_project_id")
                    .table(Defects::Table)
                    .col(Defects::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_defects_status")
                    .table(Defects::Table)
                    .col(Defects::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Defects::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Defects {
    Table,
    Id,
    Title,
    Description,
    Priority,
    Status,
    ProjectId,
    AssignedTo,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Projects {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
