use crate::entities::{attendance_record, session, user};
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use super::{day_end, day_start};

pub struct SessionRepository {
    db: DatabaseConnection,
}

pub struct NewSession {
    pub course_id: i32,
    pub session_date: NaiveDateTime,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub teacher_id: i32,
    pub content: Option<String>,
    pub created_by: i32,
}

#[derive(Debug, Default)]
pub struct SessionFilters {
    pub course_id: Option<i32>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: Option<String>,
    pub page: u64,
    pub limit: u64,
}

#[derive(Default)]
pub struct SessionUpdate {
    pub session_date: Option<NaiveDateTime>,
    pub start_time: Option<NaiveDateTime>,
    pub end_time: Option<NaiveDateTime>,
    pub teacher_id: Option<i32>,
    pub content: Option<String>,
    pub status: Option<String>,
}

impl SessionRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// New sessions always start out scheduled.
    pub async fn create(&self, data: NewSession) -> Result<session::Model> {
        let now = chrono::Utc::now().naive_utc();
        let session_model = session::ActiveModel {
            course_id: Set(data.course_id),
            session_date: Set(data.session_date),
            start_time: Set(data.start_time),
            end_time: Set(data.end_time),
            teacher_id: Set(data.teacher_id),
            content: Set(data.content),
            status: Set("scheduled".to_string()),
            created_by: Set(data.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = session_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_all_with_pagination(
        &self,
        filters: SessionFilters,
    ) -> Result<(Vec<session::Model>, u64)> {
        let mut query = session::Entity::find();

        if let Some(course_id) = filters.course_id {
            query = query.filter(session::Column::CourseId.eq(course_id));
        }
        if let Some(start_date) = filters.start_date {
            query = query.filter(session::Column::SessionDate.gte(day_start(start_date)));
        }
        if let Some(end_date) = filters.end_date {
            query = query.filter(session::Column::SessionDate.lte(day_end(end_date)));
        }
        if let Some(status) = filters.status {
            query = query.filter(session::Column::Status.eq(status));
        }

        let total = query.clone().count(&self.db).await?;

        let offset = (filters.page - 1) * filters.limit;
        let sessions = query
            .order_by_asc(session::Column::SessionDate)
            .limit(filters.limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok((sessions, total))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<session::Model>> {
        let found = session::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn attendance_with_students(
        &self,
        session_id: i32,
    ) -> Result<Vec<(attendance_record::Model, Option<user::Model>)>> {
        let rows = attendance_record::Entity::find()
            .filter(attendance_record::Column::SessionId.eq(session_id))
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn update(&self, id: i32, updates: SessionUpdate) -> Result<Option<session::Model>> {
        let Some(found) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_session: session::ActiveModel = found.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(session_date) = updates.session_date {
            active_session.session_date = Set(session_date);
        }
        if let Some(start_time) = updates.start_time {
            active_session.start_time = Set(start_time);
        }
        if let Some(end_time) = updates.end_time {
            active_session.end_time = Set(end_time);
        }
        if let Some(teacher_id) = updates.teacher_id {
            active_session.teacher_id = Set(teacher_id);
        }
        if let Some(content) = updates.content {
            active_session.content = Set(Some(content));
        }
        if let Some(status) = updates.status {
            active_session.status = Set(status);
        }

        active_session.updated_at = Set(now);

        let result = active_session.update(&self.db).await?;
        Ok(Some(result))
    }

    /// Hard delete; dependent attendance records and leave joins go with it
    /// via the store's cascade rules.
    pub async fn delete(&self, id: i32) -> Result<DeleteResult> {
        let result = session::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_class_group, seed_course, seed_user, setup_test_db};
    use chrono::NaiveDate;

    fn at(date: NaiveDate, hour: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn sessions_are_listed_in_date_order_with_pagination() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;

        let repo = SessionRepository::new(&db);
        let dates = [
            NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        ];
        for date in dates {
            repo.create(NewSession {
                course_id: course.id,
                session_date: at(date, 9),
                start_time: at(date, 9),
                end_time: at(date, 10),
                teacher_id: teacher.id,
                content: None,
                created_by: admin.id,
            })
            .await
            .unwrap();
        }

        let (rows, total) = repo
            .find_all_with_pagination(SessionFilters {
                course_id: Some(course.id),
                page: 1,
                limit: 2,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].session_date < rows[1].session_date);
    }

    #[tokio::test]
    async fn date_range_filter_is_inclusive() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;

        let repo = SessionRepository::new(&db);
        for day in 1..=5 {
            let date = NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
            repo.create(NewSession {
                course_id: course.id,
                session_date: at(date, 14),
                start_time: at(date, 14),
                end_time: at(date, 15),
                teacher_id: teacher.id,
                content: None,
                created_by: admin.id,
            })
            .await
            .unwrap();
        }

        let (rows, total) = repo
            .find_all_with_pagination(SessionFilters {
                start_date: NaiveDate::from_ymd_opt(2025, 6, 2),
                end_date: NaiveDate::from_ymd_opt(2025, 6, 4),
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 3);
        assert_eq!(
            rows.first().map(|s| s.session_date.date()),
            NaiveDate::from_ymd_opt(2025, 6, 2)
        );
        assert_eq!(
            rows.last().map(|s| s.session_date.date()),
            NaiveDate::from_ymd_opt(2025, 6, 4)
        );
    }

    #[tokio::test]
    async fn update_and_delete() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;
        let course = seed_course(&db, group.id, teacher.id, admin.id).await;

        let repo = SessionRepository::new(&db);
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let created = repo
            .create(NewSession {
                course_id: course.id,
                session_date: at(date, 9),
                start_time: at(date, 9),
                end_time: at(date, 10),
                teacher_id: teacher.id,
                content: None,
                created_by: admin.id,
            })
            .await
            .unwrap();
        assert_eq!(created.status, "scheduled");

        let updated = repo
            .update(
                created.id,
                SessionUpdate {
                    status: Some("completed".to_string()),
                    content: Some("Fractions".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "completed");
        assert_eq!(updated.content.as_deref(), Some("Fractions"));

        let deleted = repo.delete(created.id).await.unwrap();
        assert_eq!(deleted.rows_affected, 1);
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
