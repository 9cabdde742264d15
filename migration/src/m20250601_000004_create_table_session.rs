use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Session::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Session::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Session::CourseId).integer().not_null())
                    .col(ColumnDef::new(Session::SessionDate).timestamp().not_null())
                    .col(ColumnDef::new(Session::StartTime).timestamp().not_null())
                    .col(ColumnDef::new(Session::EndTime).timestamp().not_null())
                    .col(ColumnDef::new(Session::TeacherId).integer().not_null())
                    .col(ColumnDef::new(Session::Content).text().null())
                    .col(
                        ColumnDef::new(Session::Status)
                            .string()
                            .not_null()
                            .default("scheduled"),
                    )
                    .col(ColumnDef::new(Session::CreatedBy).integer().not_null())
                    .col(
                        ColumnDef::new(Session::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(Session::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_course")
                            .from_tbl(Session::Table)
                            .from_col(Session::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_session_teacher")
                            .from_tbl(Session::Table)
                            .from_col(Session::TeacherId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Session lists and date-range filters scan by course and date
        manager
            .create_index(
                Index::create()
                    .name("idx_session_course_id")
                    .table(Session::Table)
                    .col(Session::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_session_session_date")
                    .table(Session::Table)
                    .col(Session::SessionDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_session_session_date")
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_session_course_id")
                    .table(Session::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Session::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Id,
    CourseId,
    SessionDate,
    StartTime,
    EndTime,
    TeacherId,
    Content,
    Status,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
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
