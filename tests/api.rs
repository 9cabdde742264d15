use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use serde_json::{Value, json};
use tower::ServiceExt;

use rollbook::app::{AppState, api_router};
use rollbook::config::JWT_EXPIRY_SECONDS;
use rollbook::entities::sea_orm_active_enums::RoleEnum;
use rollbook::entities::{
    attendance_record, class_group, course, enrollment, leave_request, leave_request_session,
    notification, session, student_parent, user,
};
use rollbook::repositories::{ClassGroupRepository, NewClassGroup, UserRepository};
use rollbook::utils::jwt::JwtManager;

async fn setup() -> (Router, AppState) {
    let mut options = ConnectOptions::new("sqlite::memory:".to_owned());
    options.max_connections(1);
    let db = Database::connect(options).await.expect("connect sqlite");

    let schema = Schema::new(DbBackend::Sqlite);
    let backend = db.get_database_backend();
    db.execute(backend.build(&schema.create_table_from_entity(user::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(class_group::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(course::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(session::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(enrollment::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(attendance_record::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(leave_request::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(leave_request_session::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(student_parent::Entity)))
        .await
        .unwrap();
    db.execute(backend.build(&schema.create_table_from_entity(notification::Entity)))
        .await
        .unwrap();

    let state = AppState {
        db,
        jwt: JwtManager::new("test-secret"),
    };
    let router = api_router().with_state(state.clone());
    (router, state)
}

async fn create_user(
    db: &DatabaseConnection,
    username: &str,
    password: &str,
    role: RoleEnum,
) -> i32 {
    let repo = UserRepository::new(db);
    let hashed = bcrypt::hash(password, 4).unwrap();
    repo.create(
        format!("{username} user"),
        username.to_string(),
        Some(format!("{username}@example.com")),
        hashed,
        role,
        None,
        None,
    )
    .await
    .unwrap()
    .id
}

async fn seed_course(state: &AppState, teacher_id: i32) -> i32 {
    let class_repo = ClassGroupRepository::new(&state.db);
    let group = class_repo
        .create(NewClassGroup {
            name: "Class A".to_string(),
            academic_year: "2025".to_string(),
            semester: "1".to_string(),
            status: "active".to_string(),
            description: None,
            created_by: teacher_id,
            class_teacher_id: Some(teacher_id),
        })
        .await
        .unwrap();

    let course_repo = rollbook::repositories::CourseRepository::new(&state.db);
    course_repo
        .create(rollbook::repositories::NewCourse {
            name: "Mathematics 101".to_string(),
            description: Some("Basic Mathematics".to_string()),
            level: None,
            class_group_id: group.id,
            teacher_id,
            created_by: teacher_id,
            start_date: None,
            end_date: None,
        })
        .await
        .unwrap()
        .id
}

fn token_for(state: &AppState, user_id: i32, username: &str, role: RoleEnum) -> String {
    state
        .jwt
        .create_token(user_id, username, role, JWT_EXPIRY_SECONDS)
        .unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    // Extractor rejections (e.g. invalid enum values) carry plain-text bodies.
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn authed_json_request(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn login_returns_token_and_projected_user() {
    let (router, state) = setup().await;
    create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "teacher", "password": "password123" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
    assert_eq!(body["data"]["user"]["username"], json!("teacher"));
    assert_eq!(body["data"]["user"]["role"], json!("teacher"));
    // The stored hash never leaves the service.
    assert!(body["data"]["user"].get("password").is_none());
}

#[tokio::test]
async fn login_failures_share_one_message_except_inactive_accounts() {
    let (router, state) = setup().await;
    create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;

    let inactive_id = create_user(&state.db, "dormant", "password123", RoleEnum::Student).await;
    let repo = UserRepository::new(&state.db);
    repo.update(
        inactive_id,
        rollbook::repositories::UserUpdate {
            status: Some(rollbook::entities::sea_orm_active_enums::UserStatus::Inactive),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "teacher", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Invalid credentials"));

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "nobody", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Invalid credentials"));

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "dormant", "password": "password123" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], json!("Account is not active"));
}

#[tokio::test]
async fn duplicate_username_is_a_400_and_creates_no_row() {
    let (router, _state) = setup().await;

    let payload = json!({
        "name": "Student User",
        "username": "student",
        "password": "password123",
        "role": "student"
    });

    let (status, _) = send(&router, json_request("POST", "/api/users", payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&router, json_request("POST", "/api/users", payload)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Username already exists"));

    let (_, body) = send(&router, get_request("/api/users?role=student")).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_course_is_a_404_with_error_envelope() {
    let (router, _state) = setup().await;

    let (status, body) = send(&router, get_request("/api/courses/999")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!("Course not found"));
}

#[tokio::test]
async fn course_list_pagination_reports_ceil_total_pages() {
    let (router, state) = setup().await;
    let teacher_id = create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;
    seed_course(&state, teacher_id).await;

    for n in 0..4 {
        let (status, _) = send(
            &router,
            json_request(
                "POST",
                "/api/courses",
                json!({
                    "name": format!("Course {n}"),
                    "teacherId": teacher_id,
                    "classGroupId": 1,
                    "creatorId": teacher_id
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(&router, get_request("/api/courses?page=1&limit=2")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().len() <= 2);
    assert_eq!(body["pagination"]["total"], json!(5));
    assert_eq!(body["pagination"]["limit"], json!(2));
    assert_eq!(body["pagination"]["totalPages"], json!(3));

    // Newly created courses are drafts regardless of input.
    assert!(
        body["data"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["status"] == json!("draft"))
    );
}

#[tokio::test]
async fn marking_attendance_twice_keeps_one_record_with_second_status() {
    let (router, state) = setup().await;
    let teacher_id = create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;
    let student_id = create_user(&state.db, "student", "password123", RoleEnum::Student).await;
    let course_id = seed_course(&state, teacher_id).await;
    let token = token_for(&state, teacher_id, "teacher", RoleEnum::Teacher);

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/sessions",
            json!({
                "courseId": course_id,
                "session_date": "2025-06-01T09:00:00Z",
                "start_time": "2025-06-01T09:00:00Z",
                "end_time": "2025-06-01T10:00:00Z",
                "teacherId": teacher_id,
                "creatorId": teacher_id
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let session_id = body["id"].as_i64().unwrap();

    for status_value in ["present", "late"] {
        let (status, _) = send(
            &router,
            authed_json_request(
                "POST",
                "/api/attendance",
                &token,
                json!({
                    "sessionId": session_id,
                    "studentId": student_id,
                    "status": status_value
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        &router,
        get_request(&format!("/api/attendance?sessionId={session_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let records = body["data"].as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["status"], json!("late"));
    assert_eq!(records[0]["session"]["id"], json!(session_id));
    assert_eq!(body["pagination"]["total"], json!(1));
}

#[tokio::test]
async fn attendance_requires_a_bearer_token() {
    let (router, _state) = setup().await;

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/attendance",
            json!({ "sessionId": 1, "studentId": 1, "status": "present" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn leave_request_covers_sessions_and_review_is_unconditional() {
    let (router, state) = setup().await;
    let teacher_id = create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;
    let student_id = create_user(&state.db, "student", "password123", RoleEnum::Student).await;
    let course_id = seed_course(&state, teacher_id).await;

    let mut session_ids = Vec::new();
    for day in [1, 2] {
        let (_, body) = send(
            &router,
            json_request(
                "POST",
                "/api/sessions",
                json!({
                    "courseId": course_id,
                    "session_date": format!("2025-06-0{day}T09:00:00Z"),
                    "start_time": format!("2025-06-0{day}T09:00:00Z"),
                    "end_time": format!("2025-06-0{day}T10:00:00Z"),
                    "teacherId": teacher_id,
                    "creatorId": teacher_id
                }),
            ),
        )
        .await;
        session_ids.push(body["id"].as_i64().unwrap());
    }

    let (status, body) = send(
        &router,
        json_request(
            "POST",
            "/api/leave",
            json!({
                "studentId": student_id,
                "courseId": course_id,
                "type": "sick",
                "reason": "flu",
                "sessionIds": session_ids
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let leave_id = body["id"].as_i64().unwrap();

    let (_, body) = send(&router, get_request("/api/leave?status=pending")).await;
    let requests = body["data"].as_array().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0]["sessions"].as_array().unwrap().len(), 2);
    assert_eq!(requests[0]["status"], json!("pending"));
    assert_eq!(requests[0]["student"]["id"], json!(student_id));

    let (status, _) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/leave/{leave_id}/status"),
            json!({ "status": "approved", "reviewerId": teacher_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // A second review overwrites the first; prior status is not checked.
    let (status, _) = send(
        &router,
        json_request(
            "PUT",
            &format!("/api/leave/{leave_id}/status"),
            json!({
                "status": "rejected",
                "reviewerId": teacher_id,
                "rejectionReason": "no cover"
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &router,
        get_request(&format!("/api/leave/students/{student_id}")),
    )
    .await;
    let history = body["data"].as_array().unwrap();
    assert_eq!(history[0]["status"], json!("rejected"));
    assert_eq!(history[0]["approved_by"], json!(teacher_id));
    assert!(!history[0]["approved_at"].is_null());
    assert_eq!(history[0]["rejection_reason"], json!("no cover"));
}

#[tokio::test]
async fn unknown_leave_status_value_is_rejected() {
    let (router, state) = setup().await;
    let teacher_id = create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;

    let (status, _) = send(
        &router,
        json_request(
            "PUT",
            "/api/leave/1/status",
            json!({ "status": "maybe", "reviewerId": teacher_id }),
        ),
    )
    .await;
    // serde rejects the unknown enum value before the service runs
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn notification_inbox_is_scoped_to_the_token_user() {
    let (router, state) = setup().await;
    let student_id = create_user(&state.db, "student", "password123", RoleEnum::Student).await;
    let other_id = create_user(&state.db, "other", "password123", RoleEnum::Student).await;
    let token = token_for(&state, student_id, "student", RoleEnum::Student);

    for (user_id, title) in [(student_id, "Yours"), (other_id, "Not yours")] {
        let (status, _) = send(
            &router,
            json_request(
                "POST",
                "/api/notifications",
                json!({
                    "userId": user_id,
                    "title": title,
                    "content": "content",
                    "type": "system"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = send(
        &router,
        authed_json_request("GET", "/api/notifications", &token, json!(null)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let inbox = body["data"].as_array().unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0]["title"], json!("Yours"));

    let (status, _) = send(
        &router,
        authed_json_request("PUT", "/api/notifications/read-all", &token, json!(null)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(
        &router,
        authed_json_request(
            "GET",
            "/api/notifications?unreadOnly=true",
            &token,
            json!(null),
        ),
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn enroll_then_detail_then_unenroll() {
    let (router, state) = setup().await;
    let teacher_id = create_user(&state.db, "teacher", "password123", RoleEnum::Teacher).await;
    let student_id = create_user(&state.db, "student", "password123", RoleEnum::Student).await;
    let course_id = seed_course(&state, teacher_id).await;
    let token = token_for(&state, teacher_id, "teacher", RoleEnum::Teacher);

    let (status, _) = send(
        &router,
        authed_json_request(
            "POST",
            &format!("/api/courses/{course_id}/enroll"),
            &token,
            json!({ "student_ids": [student_id] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, get_request(&format!("/api/courses/{course_id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["teacher_name"], json!("teacher user"));
    let students = body["data"]["students"].as_array().unwrap();
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], json!(student_id));

    let (status, _) = send(
        &router,
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/courses/{course_id}/enroll/{student_id}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&router, get_request(&format!("/api/courses/{course_id}"))).await;
    assert!(body["data"]["students"].as_array().unwrap().is_empty());
}
