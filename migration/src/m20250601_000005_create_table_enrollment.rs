use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enrollment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Enrollment::CourseId).integer().not_null())
                    .col(ColumnDef::new(Enrollment::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollment::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(ColumnDef::new(Enrollment::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(Enrollment::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_course")
                            .from_tbl(Enrollment::Table)
                            .from_col(Enrollment::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_enrollment_student")
                            .from_tbl(Enrollment::Table)
                            .from_col(Enrollment::StudentId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Deliberately NOT unique: duplicate enrollments for the same pair
        // are current accepted behavior.
        manager
            .create_index(
                Index::create()
                    .name("idx_enrollment_course_student")
                    .table(Enrollment::Table)
                    .col(Enrollment::CourseId)
                    .col(Enrollment::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_enrollment_course_student")
                    .table(Enrollment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Enrollment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Enrollment {
    Table,
    Id,
    CourseId,
    StudentId,
    Status,
    CreatedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
