pub mod sea_orm_active_enums;

pub mod attendance_record;
pub mod class_group;
pub mod course;
pub mod enrollment;
pub mod leave_request;
pub mod leave_request_session;
pub mod notification;
pub mod session;
pub mod student_parent;
pub mod user;
