use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::{
    AttendanceStatus, LeaveStatus, RoleEnum, UserStatus,
};
use crate::routes;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::route::health,
        crate::routes::auth::route::login,
        crate::routes::users::route::create_user,
        crate::routes::users::route::get_users,
        crate::routes::users::route::update_user,
        crate::routes::users::route::delete_user,
        crate::routes::classes::route::create_class_group,
        crate::routes::classes::route::get_class_groups,
        crate::routes::classes::route::get_class_group_by_id,
        crate::routes::classes::route::update_class_group,
        crate::routes::classes::route::delete_class_group,
        crate::routes::courses::route::get_courses,
        crate::routes::courses::route::create_course,
        crate::routes::courses::route::get_course_by_id,
        crate::routes::courses::route::update_course,
        crate::routes::courses::route::enroll_students,
        crate::routes::courses::route::unenroll_student,
        crate::routes::sessions::route::get_sessions,
        crate::routes::sessions::route::create_session,
        crate::routes::sessions::route::get_session_by_id,
        crate::routes::sessions::route::update_session,
        crate::routes::sessions::route::delete_session,
        crate::routes::attendance::route::get_attendance,
        crate::routes::attendance::route::mark_attendance,
        crate::routes::attendance::route::get_student_attendance,
        crate::routes::leave::route::get_leave_requests,
        crate::routes::leave::route::create_leave_request,
        crate::routes::leave::route::update_leave_status,
        crate::routes::leave::route::get_student_leave_requests,
        crate::routes::notifications::route::get_notifications,
        crate::routes::notifications::route::create_notification,
        crate::routes::notifications::route::mark_notification_read,
        crate::routes::notifications::route::mark_all_notifications_read,
        crate::routes::parents::route::get_parents,
        crate::routes::parents::route::add_parent,
        crate::routes::parents::route::update_parent,
        crate::routes::parents::route::delete_parent,
    ),
    components(schemas(
        RoleEnum,
        UserStatus,
        LeaveStatus,
        AttendanceStatus,
        routes::Pagination,
        routes::IdResponse,
        routes::auth::dto::LoginRequest,
        routes::auth::dto::LoginResponse,
        routes::users::dto::CreateUserRequest,
        routes::users::dto::UpdateUserRequest,
        routes::users::dto::UserResponse,
        routes::users::dto::UserListResponse,
        routes::classes::dto::CreateClassGroupRequest,
        routes::classes::dto::UpdateClassGroupRequest,
        routes::classes::dto::ClassGroupDataResponse,
        routes::classes::dto::ClassGroupListResponse,
        routes::courses::dto::CreateCourseRequest,
        routes::courses::dto::UpdateCourseRequest,
        routes::courses::dto::EnrollRequest,
        routes::courses::dto::CourseListResponse,
        routes::courses::dto::CourseDetailResponse,
        routes::sessions::dto::CreateSessionRequest,
        routes::sessions::dto::UpdateSessionRequest,
        routes::sessions::dto::SessionListResponse,
        routes::sessions::dto::SessionDetailResponse,
        routes::attendance::dto::MarkAttendanceRequest,
        routes::attendance::dto::AttendanceListResponse,
        routes::attendance::dto::StudentAttendanceResponse,
        routes::leave::dto::CreateLeaveRequest,
        routes::leave::dto::UpdateLeaveStatusRequest,
        routes::leave::dto::LeaveListResponse,
        routes::leave::dto::StudentLeaveResponse,
        routes::notifications::dto::CreateNotificationRequest,
        routes::notifications::dto::NotificationListResponse,
        routes::parents::dto::CreateParentRequest,
        routes::parents::dto::UpdateParentRequest,
        routes::parents::dto::ParentListResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Auth", description = "Authentication"),
        (name = "Users", description = "User management"),
        (name = "Classes", description = "Class group management"),
        (name = "Courses", description = "Courses and enrollment"),
        (name = "Sessions", description = "Scheduled course sessions"),
        (name = "Attendance", description = "Attendance records"),
        (name = "Leave", description = "Leave requests and review"),
        (name = "Notifications", description = "User notification inbox"),
        (name = "Parents", description = "Guardian links"),
    )
)]
pub struct ApiDoc;
