use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create ATTENDANCE_STATUS enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(AttendanceStatus::Table)
                    .values([
                        AttendanceStatus::Present,
                        AttendanceStatus::Absent,
                        AttendanceStatus::Late,
                        AttendanceStatus::Excused,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(AttendanceRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::SessionId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::StudentId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::Status)
                            .enumeration(
                                AttendanceStatus::Table,
                                [
                                    AttendanceStatus::Present,
                                    AttendanceStatus::Absent,
                                    AttendanceStatus::Late,
                                    AttendanceStatus::Excused,
                                ],
                            )
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceRecord::Note).text().null())
                    .col(
                        ColumnDef::new(AttendanceRecord::CreatedBy)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(AttendanceRecord::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_session")
                            .from_tbl(AttendanceRecord::Table)
                            .from_col(AttendanceRecord::SessionId)
                            .to_tbl(Session::Table)
                            .to_col(Session::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_attendance_record_student")
                            .from_tbl(AttendanceRecord::Table)
                            .from_col(AttendanceRecord::StudentId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // At most one record per (session, student); the service upserts on
        // this composite.
        manager
            .create_index(
                Index::create()
                    .name("uq_attendance_record_session_student")
                    .table(AttendanceRecord::Table)
                    .col(AttendanceRecord::SessionId)
                    .col(AttendanceRecord::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("uq_attendance_record_session_student")
                    .table(AttendanceRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AttendanceRecord::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(AttendanceStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AttendanceRecord {
    Table,
    Id,
    SessionId,
    StudentId,
    Status,
    Note,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum AttendanceStatus {
    Table,
    Present,
    Absent,
    Late,
    Excused,
}
