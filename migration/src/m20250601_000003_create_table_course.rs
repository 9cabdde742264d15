use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Course::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Course::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Course::Name).string().not_null())
                    .col(ColumnDef::new(Course::Description).text().null())
                    .col(ColumnDef::new(Course::Level).string().null())
                    .col(ColumnDef::new(Course::ClassGroupId).integer().not_null())
                    .col(ColumnDef::new(Course::TeacherId).integer().not_null())
                    .col(ColumnDef::new(Course::StartDate).timestamp().not_null())
                    .col(ColumnDef::new(Course::EndDate).timestamp().not_null())
                    .col(
                        ColumnDef::new(Course::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Course::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(Course::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Course::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_class_group")
                            .from_tbl(Course::Table)
                            .from_col(Course::ClassGroupId)
                            .to_tbl(ClassGroup::Table)
                            .to_col(ClassGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_teacher")
                            .from_tbl(Course::Table)
                            .from_col(Course::TeacherId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create indexes
        manager
            .create_index(
                Index::create()
                    .name("idx_course_teacher_id")
                    .table(Course::Table)
                    .col(Course::TeacherId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_status")
                    .table(Course::Table)
                    .col(Course::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_status")
                    .table(Course::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_course_teacher_id")
                    .table(Course::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Course::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
    Name,
    Description,
    Level,
    ClassGroupId,
    TeacherId,
    StartDate,
    EndDate,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ClassGroup {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
