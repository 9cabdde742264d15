use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create ROLE_ENUM type
        manager
            .create_type(
                Type::create()
                    .as_enum(RoleEnum::Table)
                    .values([RoleEnum::Admin, RoleEnum::Teacher, RoleEnum::Student])
                    .to_owned(),
            )
            .await?;

        // Create USER_STATUS type
        manager
            .create_type(
                Type::create()
                    .as_enum(UserStatus::Table)
                    .values([UserStatus::Active, UserStatus::Inactive, UserStatus::Pending])
                    .to_owned(),
            )
            .await?;

        // Create User table
        manager
            .create_table(
                Table::create()
                    .table(User::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(User::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(User::Name).string().not_null())
                    .col(
                        ColumnDef::new(User::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(User::Email).string().null())
                    .col(ColumnDef::new(User::Password).string().not_null())
                    .col(
                        ColumnDef::new(User::Role)
                            .enumeration(
                                RoleEnum::Table,
                                [RoleEnum::Admin, RoleEnum::Teacher, RoleEnum::Student],
                            )
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(User::Status)
                            .enumeration(
                                UserStatus::Table,
                                [UserStatus::Active, UserStatus::Inactive, UserStatus::Pending],
                            )
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(User::StudentNo).string().null())
                    .col(ColumnDef::new(User::CreatedBy).integer().null())
                    .col(
                        ColumnDef::new(User::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(User::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_created_by")
                            .from_tbl(User::Table)
                            .from_col(User::CreatedBy)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_user_role")
                    .table(User::Table)
                    .col(User::Role)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_user_role")
                    .table(User::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(User::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(UserStatus::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(RoleEnum::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
    Name,
    Username,
    Email,
    Password,
    Role,
    Status,
    StudentNo,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RoleEnum {
    Table,
    Admin,
    Teacher,
    Student,
}

#[derive(DeriveIden)]
enum UserStatus {
    Table,
    Active,
    Inactive,
    Pending,
}
