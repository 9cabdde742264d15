use crate::extension::postgres::Type;
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create LEAVE_STATUS enum type
        manager
            .create_type(
                Type::create()
                    .as_enum(LeaveStatus::Table)
                    .values([
                        LeaveStatus::Pending,
                        LeaveStatus::Approved,
                        LeaveStatus::Rejected,
                    ])
                    .to_owned(),
            )
            .await?;

        // Create LeaveRequest table
        manager
            .create_table(
                Table::create()
                    .table(LeaveRequest::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequest::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LeaveRequest::StudentId).integer().not_null())
                    .col(ColumnDef::new(LeaveRequest::CourseId).integer().not_null())
                    .col(ColumnDef::new(LeaveRequest::Type).string().not_null())
                    .col(ColumnDef::new(LeaveRequest::Reason).text().not_null())
                    .col(
                        ColumnDef::new(LeaveRequest::Status)
                            .enumeration(
                                LeaveStatus::Table,
                                [
                                    LeaveStatus::Pending,
                                    LeaveStatus::Approved,
                                    LeaveStatus::Rejected,
                                ],
                            )
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(LeaveRequest::ApprovedBy).integer().null())
                    .col(ColumnDef::new(LeaveRequest::ApprovedAt).timestamp().null())
                    .col(ColumnDef::new(LeaveRequest::RejectionReason).text().null())
                    .col(
                        ColumnDef::new(LeaveRequest::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(LeaveRequest::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_student")
                            .from_tbl(LeaveRequest::Table)
                            .from_col(LeaveRequest::StudentId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_course")
                            .from_tbl(LeaveRequest::Table)
                            .from_col(LeaveRequest::CourseId)
                            .to_tbl(Course::Table)
                            .to_col(Course::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create LeaveRequestSession join table
        manager
            .create_table(
                Table::create()
                    .table(LeaveRequestSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LeaveRequestSession::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequestSession::LeaveRequestId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LeaveRequestSession::SessionId)
                            .integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_session_leave_request")
                            .from_tbl(LeaveRequestSession::Table)
                            .from_col(LeaveRequestSession::LeaveRequestId)
                            .to_tbl(LeaveRequest::Table)
                            .to_col(LeaveRequest::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_leave_request_session_session")
                            .from_tbl(LeaveRequestSession::Table)
                            .from_col(LeaveRequestSession::SessionId)
                            .to_tbl(Session::Table)
                            .to_col(Session::Id)
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
                    .name("idx_leave_request_student_id")
                    .table(LeaveRequest::Table)
                    .col(LeaveRequest::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_request_status")
                    .table(LeaveRequest::Table)
                    .col(LeaveRequest::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_leave_request_session_leave_request_id")
                    .table(LeaveRequestSession::Table)
                    .col(LeaveRequestSession::LeaveRequestId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_leave_request_session_leave_request_id")
                    .table(LeaveRequestSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_leave_request_status")
                    .table(LeaveRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_leave_request_student_id")
                    .table(LeaveRequest::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LeaveRequestSession::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(LeaveRequest::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(LeaveStatus::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LeaveRequest {
    Table,
    Id,
    StudentId,
    CourseId,
    Type,
    Reason,
    Status,
    ApprovedBy,
    ApprovedAt,
    RejectionReason,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LeaveRequestSession {
    Table,
    Id,
    LeaveRequestId,
    SessionId,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Course {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Session {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum LeaveStatus {
    Table,
    Pending,
    Approved,
    Rejected,
}
