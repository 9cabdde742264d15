use chrono::Utc;
use sea_orm::sea_query::TableCreateStatement;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema, Set,
};

use crate::entities::sea_orm_active_enums::{RoleEnum, UserStatus};
use crate::entities::{
    attendance_record, class_group, course, enrollment, leave_request, leave_request_session,
    notification, session, student_parent, user,
};

/// In-memory SQLite database with the schema derived from the entities.
pub(crate) async fn setup_test_db() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options)
        .await
        .expect("connect to in-memory sqlite");

    let schema = Schema::new(DbBackend::Sqlite);
    create_table(&db, &schema.create_table_from_entity(user::Entity)).await;
    create_table(&db, &schema.create_table_from_entity(class_group::Entity)).await;
    create_table(&db, &schema.create_table_from_entity(course::Entity)).await;
    create_table(&db, &schema.create_table_from_entity(session::Entity)).await;
    create_table(&db, &schema.create_table_from_entity(enrollment::Entity)).await;
    create_table(
        &db,
        &schema.create_table_from_entity(attendance_record::Entity),
    )
    .await;
    create_table(&db, &schema.create_table_from_entity(leave_request::Entity)).await;
    create_table(
        &db,
        &schema.create_table_from_entity(leave_request_session::Entity),
    )
    .await;
    create_table(&db, &schema.create_table_from_entity(student_parent::Entity)).await;
    create_table(&db, &schema.create_table_from_entity(notification::Entity)).await;

    db
}

async fn create_table(db: &DatabaseConnection, stmt: &TableCreateStatement) {
    let builder = db.get_database_backend();
    db.execute(builder.build(stmt)).await.expect("create table");
}

pub(crate) async fn seed_user(
    db: &DatabaseConnection,
    username: &str,
    role: RoleEnum,
) -> user::Model {
    let now = Utc::now().naive_utc();
    user::ActiveModel {
        name: Set(format!("{username} user")),
        username: Set(username.to_string()),
        email: Set(Some(format!("{username}@example.com"))),
        password: Set("hashed".to_string()),
        role: Set(role),
        status: Set(UserStatus::Active),
        student_no: Set(None),
        created_by: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed user")
}

pub(crate) async fn seed_class_group(db: &DatabaseConnection, created_by: i32) -> class_group::Model {
    let now = Utc::now().naive_utc();
    class_group::ActiveModel {
        name: Set("Class A".to_string()),
        academic_year: Set("2025".to_string()),
        semester: Set("1".to_string()),
        status: Set("active".to_string()),
        description: Set(None),
        created_by: Set(created_by),
        class_teacher_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed class group")
}

pub(crate) async fn seed_course(
    db: &DatabaseConnection,
    class_group_id: i32,
    teacher_id: i32,
    created_by: i32,
) -> course::Model {
    let now = Utc::now().naive_utc();
    course::ActiveModel {
        name: Set("Mathematics 101".to_string()),
        description: Set(Some("Basic Mathematics".to_string())),
        level: Set(None),
        class_group_id: Set(class_group_id),
        teacher_id: Set(teacher_id),
        start_date: Set(now),
        end_date: Set(now),
        status: Set("draft".to_string()),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed course")
}

pub(crate) async fn seed_session(
    db: &DatabaseConnection,
    course_id: i32,
    teacher_id: i32,
    created_by: i32,
) -> session::Model {
    let now = Utc::now().naive_utc();
    session::ActiveModel {
        course_id: Set(course_id),
        session_date: Set(now),
        start_time: Set(now),
        end_time: Set(now),
        teacher_id: Set(teacher_id),
        content: Set(None),
        status: Set("scheduled".to_string()),
        created_by: Set(created_by),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("seed session")
}
