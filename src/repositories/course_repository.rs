use crate::entities::{course, enrollment, session, user};
use anyhow::Result;
use chrono::NaiveDateTime;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

pub struct CourseRepository {
    db: DatabaseConnection,
}

pub struct NewCourse {
    pub name: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub class_group_id: i32,
    pub teacher_id: i32,
    pub created_by: i32,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

#[derive(Debug, Default)]
pub struct CourseFilters {
    pub status: Option<String>,
    pub teacher_id: Option<i32>,
    pub search: Option<String>,
    pub page: u64,
    pub limit: u64,
}

#[derive(Default)]
pub struct CourseUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub level: Option<String>,
    pub teacher_id: Option<i32>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
}

impl CourseRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    /// New courses always start in draft; omitted dates default to now.
    pub async fn create(&self, data: NewCourse) -> Result<course::Model> {
        let now = chrono::Utc::now().naive_utc();
        let course_model = course::ActiveModel {
            name: Set(data.name),
            description: Set(data.description),
            level: Set(data.level),
            class_group_id: Set(data.class_group_id),
            teacher_id: Set(data.teacher_id),
            start_date: Set(data.start_date.unwrap_or(now)),
            end_date: Set(data.end_date.unwrap_or(now)),
            status: Set("draft".to_string()),
            created_by: Set(data.created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = course_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_all_with_pagination(
        &self,
        filters: CourseFilters,
    ) -> Result<(Vec<course::Model>, u64)> {
        let mut query = course::Entity::find();

        if let Some(status) = filters.status {
            query = query.filter(course::Column::Status.eq(status));
        }
        if let Some(teacher_id) = filters.teacher_id {
            query = query.filter(course::Column::TeacherId.eq(teacher_id));
        }
        // Case-insensitive substring match on name OR description.
        if let Some(search) = filters.search {
            let pattern = format!("%{}%", search.to_lowercase());
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            course::Entity,
                            course::Column::Name,
                        ))))
                        .like(pattern.clone()),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col((
                            course::Entity,
                            course::Column::Description,
                        ))))
                        .like(pattern),
                    ),
            );
        }

        let total = query.clone().count(&self.db).await?;

        let offset = (filters.page - 1) * filters.limit;
        let courses = query
            .limit(filters.limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok((courses, total))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<course::Model>> {
        let found = course::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn update(&self, id: i32, updates: CourseUpdate) -> Result<Option<course::Model>> {
        let Some(found) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_course: course::ActiveModel = found.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(name) = updates.name {
            active_course.name = Set(name);
        }
        if let Some(description) = updates.description {
            active_course.description = Set(Some(description));
        }
        if let Some(level) = updates.level {
            active_course.level = Set(Some(level));
        }
        if let Some(teacher_id) = updates.teacher_id {
            active_course.teacher_id = Set(teacher_id);
        }
        if let Some(start_date) = updates.start_date {
            active_course.start_date = Set(start_date);
        }
        if let Some(end_date) = updates.end_date {
            active_course.end_date = Set(end_date);
        }

        active_course.updated_at = Set(now);

        let result = active_course.update(&self.db).await?;
        Ok(Some(result))
    }

    /// Unconditional insert: no duplicate-enrollment guard, two calls for the
    /// same pair leave two rows.
    pub async fn enroll_student(
        &self,
        course_id: i32,
        student_id: i32,
        creator_id: i32,
    ) -> Result<enrollment::Model> {
        let now = chrono::Utc::now().naive_utc();
        let enrollment_model = enrollment::ActiveModel {
            course_id: Set(course_id),
            student_id: Set(student_id),
            status: Set("active".to_string()),
            created_by: Set(creator_id),
            created_at: Set(now),
            ..Default::default()
        };

        let result = enrollment_model.insert(&self.db).await?;
        Ok(result)
    }

    /// Deletes every enrollment row for the pair, 0 or more.
    pub async fn remove_student(&self, course_id: i32, student_id: i32) -> Result<DeleteResult> {
        let result = enrollment::Entity::delete_many()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .filter(enrollment::Column::StudentId.eq(student_id))
            .exec(&self.db)
            .await?;
        Ok(result)
    }

    pub async fn enrollments_with_students(
        &self,
        course_id: i32,
    ) -> Result<Vec<(enrollment::Model, Option<user::Model>)>> {
        let rows = enrollment::Entity::find()
            .filter(enrollment::Column::CourseId.eq(course_id))
            .find_also_related(user::Entity)
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    pub async fn sessions_by_course(&self, course_id: i32) -> Result<Vec<session::Model>> {
        let sessions = session::Entity::find()
            .filter(session::Column::CourseId.eq(course_id))
            .order_by_asc(session::Column::SessionDate)
            .all(&self.db)
            .await?;
        Ok(sessions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_class_group, seed_user, setup_test_db};

    fn new_course(name: &str, description: &str, group: i32, teacher: i32) -> NewCourse {
        NewCourse {
            name: name.to_string(),
            description: Some(description.to_string()),
            level: None,
            class_group_id: group,
            teacher_id: teacher,
            created_by: teacher,
            start_date: None,
            end_date: None,
        }
    }

    #[tokio::test]
    async fn created_course_is_always_a_draft() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;

        let repo = CourseRepository::new(&db);
        let course = repo
            .create(new_course("Algebra", "Linear algebra", group.id, teacher.id))
            .await
            .unwrap();

        assert_eq!(course.status, "draft");
        assert_eq!(course.start_date, course.end_date);
    }

    #[tokio::test]
    async fn search_matches_name_or_description_case_insensitively() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let group = seed_class_group(&db, admin.id).await;

        let repo = CourseRepository::new(&db);
        repo.create(new_course("Algebra", "numbers", group.id, teacher.id))
            .await
            .unwrap();
        repo.create(new_course("History", "ALGEBRAIC structures", group.id, teacher.id))
            .await
            .unwrap();
        repo.create(new_course("Chemistry", "atoms", group.id, teacher.id))
            .await
            .unwrap();

        let (rows, total) = repo
            .find_all_with_pagination(CourseFilters {
                search: Some("algebra".to_string()),
                page: 1,
                limit: 10,
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(total, 2);
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    async fn double_enroll_creates_two_rows_and_remove_deletes_both() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;
        let group = seed_class_group(&db, admin.id).await;

        let repo = CourseRepository::new(&db);
        let course = repo
            .create(new_course("Algebra", "numbers", group.id, teacher.id))
            .await
            .unwrap();

        repo.enroll_student(course.id, student.id, admin.id)
            .await
            .unwrap();
        repo.enroll_student(course.id, student.id, admin.id)
            .await
            .unwrap();

        let rows = repo.enrollments_with_students(course.id).await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1.as_ref().map(|u| u.id), Some(student.id));

        let removed = repo.remove_student(course.id, student.id).await.unwrap();
        assert_eq!(removed.rows_affected, 2);
    }

    #[tokio::test]
    async fn update_missing_course_returns_none() {
        let db = setup_test_db().await;
        let repo = CourseRepository::new(&db);

        let result = repo.update(42, CourseUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }
}
