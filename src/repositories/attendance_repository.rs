use crate::entities::sea_orm_active_enums::AttendanceStatus;
use crate::entities::{attendance_record, session};
use anyhow::Result;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set,
};

use super::{day_end, day_start};

pub struct AttendanceRepository {
    db: DatabaseConnection,
}

#[derive(Debug, Default)]
pub struct AttendanceFilters {
    pub session_id: Option<i32>,
    pub student_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<AttendanceStatus>,
    pub page: u64,
    pub limit: u64,
}

impl AttendanceRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// Upsert keyed on (session_id, student_id). An existing record only has
    /// its status and note replaced; the creator is stamped on insert only.
    pub async fn mark(
        &self,
        session_id: i32,
        student_id: i32,
        status: AttendanceStatus,
        note: Option<String>,
        creator_id: i32,
    ) -> Result<attendance_record::Model> {
        let existing = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .filter(attendance_record::Column::StudentId.eq(student_id))
            .one(&self.db)
            .await?;

        let now = chrono::Utc::now().naive_utc();

        let result = match existing {
            Some(record) => {
                let mut active: attendance_record::ActiveModel = record.into();
                active.status = Set(status);
                active.note = Set(note);
                active.updated_at = Set(now);
                active.update(&self.db).await?
            }
            None => {
                let record = attendance_record::ActiveModel {
                    session_id: Set(session_id),
                    student_id: Set(student_id),
                    status: Set(status),
                    note: Set(note),
                    created_by: Set(creator_id),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                record.insert(&self.db).await?
            }
        };

        Ok(result)
    }

    pub async fn find_with_pagination(
        &self,
        filters: AttendanceFilters,
    ) -> Result<(
        Vec<(attendance_record::Model, Option<session::Model>)>,
        u64,
    )> {
        let mut query = attendance_record::Entity::find().find_also_related(session::Entity);
        let mut count_query = attendance_record::Entity::find()
            .join(JoinType::InnerJoin, attendance_record::Relation::Session.def());

        if let Some(session_id) = filters.session_id {
            query = query.filter(attendance_record::Column::SessionId.eq(session_id));
            count_query = count_query.filter(attendance_record::Column::SessionId.eq(session_id));
        }
        if let Some(student_id) = filters.student_id {
            query = query.filter(attendance_record::Column::StudentId.eq(student_id));
            count_query = count_query.filter(attendance_record::Column::StudentId.eq(student_id));
        }
        if let Some(start_date) = filters.start_date {
            let bound = day_start(start_date);
            query = query.filter(session::Column::SessionDate.gte(bound));
            count_query = count_query.filter(session::Column::SessionDate.gte(bound));
        }
        if let Some(end_date) = filters.end_date {
            let bound = day_end(end_date);
            query = query.filter(session::Column::SessionDate.lte(bound));
            count_query = count_query.filter(session::Column::SessionDate.lte(bound));
        }
        if let Some(status) = filters.status {
            query = query.filter(attendance_record::Column::Status.eq(status.clone()));
            count_query = count_query.filter(attendance_record::Column::Status.eq(status));
        }

        let total = count_query.count(&self.db).await?;

        let offset = (filters.page - 1) * filters.limit;
        let records = query
            .order_by_desc(session::Column::SessionDate)
            .limit(filters.limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok((records, total))
    }

    /// Unpaginated per-student history, newest session first, optionally
    /// narrowed to one course.
    pub async fn find_by_student(
        &self,
        student_id: i32,
        course_id: Option<i32>,
    ) -> Result<Vec<(attendance_record::Model, Option<session::Model>)>> {
        let mut query = attendance_record::Entity::find()
            .find_also_related(session::Entity)
            .filter(attendance_record::Column::StudentId.eq(student_id));

        if let Some(course_id) = course_id {
            query = query.filter(session::Column::CourseId.eq(course_id));
        }

        let records = query
            .order_by_desc(session::Column::SessionDate)
            .all(&self.db)
            .await?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_class_group, seed_course, seed_session, seed_user, setup_test_db};

    #[tokio::test]
    async fn marking_twice_keeps_a_single_record_with_the_second_status() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;
        let session = seed_session(&db, course.id, teacher.id, admin.id).await;

        let repo = AttendanceRepository::new(&db);
        let first = repo
            .mark(session.id, student.id, AttendanceStatus::Present, None, teacher.id)
            .await
            .unwrap();

        let second = repo
            .mark(
                session.id,
                student.id,
                AttendanceStatus::Late,
                Some("overslept".to_string()),
                teacher.id,
            )
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);
        assert_eq!(second.note.as_deref(), Some("overslept"));
        // Creator from the first write survives the upsert.
        assert_eq!(second.created_by, teacher.id);

        let (rows, total) = repo
            .find_with_pagination(AttendanceFilters {
                session_id: Some(session.id),
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].0.status, AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn pagination_respects_the_limit() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;
        let session = seed_session(&db, course.id, teacher.id, admin.id).await;

        let repo = AttendanceRepository::new(&db);
        for n in 0..5 {
            let student = seed_user(&db, &format!("student{n}"), RoleEnum::Student).await;
            repo.mark(session.id, student.id, AttendanceStatus::Present, None, teacher.id)
                .await
                .unwrap();
        }

        let (rows, total) = repo
            .find_with_pagination(AttendanceFilters {
                session_id: Some(session.id),
                page: 1,
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(total, 5);
        assert_eq!(rows.len(), 2);

        let (last_page, _) = repo
            .find_with_pagination(AttendanceFilters {
                session_id: Some(session.id),
                page: 3,
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(last_page.len(), 1);
    }

    #[tokio::test]
    async fn student_history_can_be_narrowed_to_a_course() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;
        let maths = seed_course(&db, group.id, teacher.id, admin.id).await;
        let physics = seed_course(&db, group.id, teacher.id, admin.id).await;
        let maths_session = seed_session(&db, maths.id, teacher.id, admin.id).await;
        let physics_session = seed_session(&db, physics.id, teacher.id, admin.id).await;

        let repo = AttendanceRepository::new(&db);
        repo.mark(maths_session.id, student.id, AttendanceStatus::Present, None, teacher.id)
            .await
            .unwrap();
        repo.mark(physics_session.id, student.id, AttendanceStatus::Absent, None, teacher.id)
            .await
            .unwrap();

        let all = repo.find_by_student(student.id, None).await.unwrap();
        assert_eq!(all.len(), 2);

        let narrowed = repo
            .find_by_student(student.id, Some(physics.id))
            .await
            .unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].0.status, AttendanceStatus::Absent);
        assert_eq!(narrowed[0].1.as_ref().map(|s| s.id), Some(physics_session.id));
    }
}
