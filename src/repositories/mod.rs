use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

pub mod attendance_repository;
pub mod class_group_repository;
pub mod course_repository;
pub mod leave_repository;
pub mod notification_repository;
pub mod parent_repository;
pub mod session_repository;
pub mod user_repository;

pub use attendance_repository::{AttendanceFilters, AttendanceRepository};
pub use class_group_repository::{ClassGroupRepository, ClassGroupUpdate, NewClassGroup};
pub use course_repository::{CourseFilters, CourseRepository, CourseUpdate, NewCourse};
pub use leave_repository::{LeaveFilters, LeaveRepository, LeaveRequestDetail};
pub use notification_repository::NotificationRepository;
pub use parent_repository::{ParentRepository, ParentUpdate};
pub use session_repository::{NewSession, SessionFilters, SessionRepository, SessionUpdate};
pub use user_repository::{UserRepository, UserUpdate};

/// Inclusive day bounds for date-range filters against session dates.
pub(crate) fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

pub(crate) fn day_end(date: NaiveDate) -> NaiveDateTime {
    day_start(date) + Duration::seconds(86_399)
}
