//! Migration to create the role_mappings table.
//!
//! Each row grants a role to a principal (a user, an application or another
//! role). Principal ids are stored as text so any principal kind fits.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleMappings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleMappings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(RoleMappings::PrincipalType)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(RoleMappings::PrincipalId).text().not_null())
                    .col(ColumnDef::new(RoleMappings::RoleId).uuid().not_null())
                    .col(
                        ColumnDef::new(RoleMappings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_mappings_role_id")
                            .from(RoleMappings::Table, RoleMappings::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_mappings_role_id")
                    .table(RoleMappings::Table)
                    .col(RoleMappings::RoleId)
                    .to_owned(),
            )
            .await?;

        // Lookup of all roles granted to a principal
        manager
            .create_index(
                Index::create()
                    .name("idx_role_mappings_principal")
                    .table(RoleMappings::Table)
                    .col(RoleMappings::PrincipalType)
                    .col(RoleMappings::PrincipalId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_role_mappings_principal")
                    .table(RoleMappings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_role_mappings_role_id")
                    .table(RoleMappings::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RoleMappings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleMappings {
    Table,
    Id,
    PrincipalType,
    PrincipalId,
    RoleId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
}
