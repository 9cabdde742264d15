pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_table_user;
mod m20250601_000002_create_table_class_group;
mod m20250601_000003_create_table_course;
mod m20250601_000004_create_table_session;
mod m20250601_000005_create_table_enrollment;
mod m20250601_000006_create_table_attendance_record;
mod m20250601_000007_create_table_leave_request;
mod m20250601_000008_create_table_student_parent;
mod m20250601_000009_create_table_notification;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_table_user::Migration),
            Box::new(m20250601_000002_create_table_class_group::Migration),
            Box::new(m20250601_000003_create_table_course::Migration),
            Box::new(m20250601_000004_create_table_session::Migration),
            Box::new(m20250601_000005_create_table_enrollment::Migration),
            Box::new(m20250601_000006_create_table_attendance_record::Migration),
            Box::new(m20250601_000007_create_table_leave_request::Migration),
            Box::new(m20250601_000008_create_table_student_parent::Migration),
            Box::new(m20250601_000009_create_table_notification::Migration),
        ]
    }
}
