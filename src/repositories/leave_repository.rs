use crate::entities::sea_orm_active_enums::LeaveStatus;
use crate::entities::{leave_request, leave_request_session, session, user};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};

pub struct LeaveRepository {
    db: DatabaseConnection,
}

#[derive(Debug, Default)]
pub struct LeaveFilters {
    pub course_id: Option<i32>,
    pub student_id: Option<i32>,
    pub status: Option<LeaveStatus>,
    pub page: u64,
    pub limit: u64,
}

/// A leave request joined with its student and covered sessions.
pub struct LeaveRequestDetail {
    pub request: leave_request::Model,
    pub student: Option<user::Model>,
    pub sessions: Vec<(leave_request_session::Model, Option<session::Model>)>,
}

impl LeaveRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// Creates the request row and one join row per session id as a single
    /// atomic unit.
    pub async fn create(
        &self,
        student_id: i32,
        course_id: i32,
        leave_type: String,
        reason: String,
        session_ids: Vec<i32>,
    ) -> Result<leave_request::Model> {
        let now = chrono::Utc::now().naive_utc();
        let txn = self.db.begin().await?;

        let request = leave_request::ActiveModel {
            student_id: Set(student_id),
            course_id: Set(course_id),
            r#type: Set(leave_type),
            reason: Set(reason),
            status: Set(LeaveStatus::Pending),
            approved_by: Set(None),
            approved_at: Set(None),
            rejection_reason: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        for session_id in session_ids {
            leave_request_session::ActiveModel {
                leave_request_id: Set(request.id),
                session_id: Set(session_id),
                ..Default::default()
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;
        Ok(request)
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<leave_request::Model>> {
        let found = leave_request::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn find_all_with_pagination(
        &self,
        filters: LeaveFilters,
    ) -> Result<(Vec<LeaveRequestDetail>, u64)> {
        let mut query = leave_request::Entity::find();

        if let Some(course_id) = filters.course_id {
            query = query.filter(leave_request::Column::CourseId.eq(course_id));
        }
        if let Some(student_id) = filters.student_id {
            query = query.filter(leave_request::Column::StudentId.eq(student_id));
        }
        if let Some(status) = filters.status {
            query = query.filter(leave_request::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;

        let offset = (filters.page - 1) * filters.limit;
        let requests = query
            .order_by_desc(leave_request::Column::CreatedAt)
            .limit(filters.limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(requests.len());
        for request in requests {
            details.push(self.load_detail(request).await?);
        }

        Ok((details, total))
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<LeaveRequestDetail>> {
        let requests = leave_request::Entity::find()
            .filter(leave_request::Column::StudentId.eq(student_id))
            .order_by_desc(leave_request::Column::CreatedAt)
            .all(&self.db)
            .await?;

        let mut details = Vec::with_capacity(requests.len());
        for request in requests {
            details.push(self.load_detail(request).await?);
        }
        Ok(details)
    }

    /// Unconditional transition: the prior status is not inspected and the
    /// reviewer/timestamp are stamped on approval and rejection alike.
    pub async fn update_status(
        &self,
        id: i32,
        status: LeaveStatus,
        reviewer_id: i32,
        rejection_reason: Option<String>,
    ) -> Result<Option<leave_request::Model>> {
        let Some(found) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().naive_utc();
        let mut active_request: leave_request::ActiveModel = found.into();
        active_request.status = Set(status);
        active_request.approved_by = Set(Some(reviewer_id));
        active_request.approved_at = Set(Some(now));
        active_request.rejection_reason = Set(rejection_reason);
        active_request.updated_at = Set(now);

        let result = active_request.update(&self.db).await?;
        Ok(Some(result))
    }

    async fn load_detail(&self, request: leave_request::Model) -> Result<LeaveRequestDetail> {
        let student = user::Entity::find_by_id(request.student_id)
            .one(&self.db)
            .await?;

        let sessions = leave_request_session::Entity::find()
            .filter(leave_request_session::Column::LeaveRequestId.eq(request.id))
            .find_also_related(session::Entity)
            .all(&self.db)
            .await?;

        Ok(LeaveRequestDetail {
            request,
            student,
            sessions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_class_group, seed_course, seed_session, seed_user, setup_test_db};

    #[tokio::test]
    async fn create_produces_one_request_and_one_join_row_per_session() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;
        let first = seed_session(&db, course.id, teacher.id, admin.id).await;
        let second = seed_session(&db, course.id, teacher.id, admin.id).await;

        let repo = LeaveRepository::new(&db);
        let request = repo
            .create(
                student.id,
                course.id,
                "sick".to_string(),
                "flu".to_string(),
                vec![first.id, second.id],
            )
            .await
            .unwrap();

        assert_eq!(request.status, LeaveStatus::Pending);

        let (details, total) = repo
            .find_all_with_pagination(LeaveFilters {
                course_id: Some(course.id),
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(details[0].sessions.len(), 2);
        assert_eq!(details[0].student.as_ref().map(|s| s.id), Some(student.id));
    }

    #[tokio::test]
    async fn status_update_stamps_reviewer_regardless_of_prior_state() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;
        let session = seed_session(&db, course.id, teacher.id, admin.id).await;

        let repo = LeaveRepository::new(&db);
        let request = repo
            .create(
                student.id,
                course.id,
                "personal".to_string(),
                "family".to_string(),
                vec![session.id],
            )
            .await
            .unwrap();

        let approved = repo
            .update_status(request.id, LeaveStatus::Approved, teacher.id, None)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(approved.status, LeaveStatus::Approved);
        assert_eq!(approved.approved_by, Some(teacher.id));
        assert!(approved.approved_at.is_some());

        // Re-reviewing an already-approved request is permitted and restamped.
        let rejected = repo
            .update_status(
                request.id,
                LeaveStatus::Rejected,
                admin.id,
                Some("no cover".to_string()),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(rejected.status, LeaveStatus::Rejected);
        assert_eq!(rejected.approved_by, Some(admin.id));
        assert_eq!(rejected.rejection_reason.as_deref(), Some("no cover"));
    }

    #[tokio::test]
    async fn status_update_on_missing_request_returns_none() {
        let db = setup_test_db().await;
        let repo = LeaveRepository::new(&db);

        let result = repo
            .update_status(404, LeaveStatus::Approved, 1, None)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn student_history_filters_by_student() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let first = seed_user(&db, "student1", RoleEnum::Student).await;
        let second = seed_user(&db, "student2", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;
        let session = seed_session(&db, course.id, teacher.id, admin.id).await;

        let repo = LeaveRepository::new(&db);
        repo.create(first.id, course.id, "sick".to_string(), "flu".to_string(), vec![session.id])
            .await
            .unwrap();
        repo.create(
            second.id,
            course.id,
            "personal".to_string(),
            "travel".to_string(),
            vec![],
        )
        .await
        .unwrap();

        let history = repo.find_by_student(first.id).await.unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].request.r#type, "sick");
    }
}
