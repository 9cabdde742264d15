use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClassGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassGroup::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassGroup::Name).string().not_null())
                    .col(ColumnDef::new(ClassGroup::AcademicYear).string().not_null())
                    .col(ColumnDef::new(ClassGroup::Semester).string().not_null())
                    .col(ColumnDef::new(ClassGroup::Status).string().not_null())
                    .col(ColumnDef::new(ClassGroup::Description).text().null())
                    .col(ColumnDef::new(ClassGroup::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(ClassGroup::ClassTeacherId).integer().null())
                    .col(
                        ColumnDef::new(ClassGroup::CreatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .col(
                        ColumnDef::new(ClassGroup::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .extra("DEFAULT CURRENT_TIMESTAMP".to_string()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_group_created_by")
                            .from_tbl(ClassGroup::Table)
                            .from_col(ClassGroup::CreatedBy)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_group_class_teacher")
                            .from_tbl(ClassGroup::Table)
                            .from_col(ClassGroup::ClassTeacherId)
                            .to_tbl(User::Table)
                            .to_col(User::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassGroup::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum ClassGroup {
    Table,
    Id,
    Name,
    AcademicYear,
    Semester,
    Status,
    Description,
    CreatedBy,
    ClassTeacherId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum User {
    Table,
    Id,
}
