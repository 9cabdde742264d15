use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StudentParent::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentParent::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentParent::StudentId).integer().not_null())
                    .col(ColumnDef::new(StudentParent::ParentName).string().not_null())
                    .col(
                        ColumnDef::new(StudentParent::Relationship)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentParent::Phone).string().null())
                    .col(ColumnDef::new(StudentParent::Email).string().null())
                    .col(
                        ColumnDef::new(StudentParent::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(StudentParent::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(StudentParent::UpdatedBy).integer().null())
                    .col(
                        ColumnDef::new(StudentParent::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(StudentParent::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_parent_student")
                            .from_tbl(StudentParent::Table)
                            .from_col(StudentParent::StudentId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_parent_student_id")
                    .table(StudentParent::Table)
                    .col(StudentParent::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_student_parent_student_id")
                    .table(StudentParent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(StudentParent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentParent {
    Table,
    Id,
    StudentId,
    ParentName,
    Relationship,
    Phone,
    Email,
    IsPrimary,
    CreatedBy,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
