use crate::entities::class_group;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DeleteResult, EntityTrait, PaginatorTrait, QuerySelect,
    Set,
};

pub struct ClassGroupRepository {
    db: DatabaseConnection,
}

pub struct NewClassGroup {
    pub name: String,
    pub academic_year: String,
    pub semester: String,
    pub status: String,
    pub description: Option<String>,
    pub created_by: i32,
    pub class_teacher_id: Option<i32>,
}

#[derive(Default)]
pub struct ClassGroupUpdate {
    pub name: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub class_teacher_id: Option<i32>,
}

impl ClassGroupRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn create(&self, data: NewClassGroup) -> Result<class_group::Model> {
        let now = chrono::Utc::now().naive_utc();
        let class_group_model = class_group::ActiveModel {
            name: Set(data.name),
            academic_year: Set(data.academic_year),
            semester: Set(data.semester),
            status: Set(data.status),
            description: Set(data.description),
            created_by: Set(data.created_by),
            class_teacher_id: Set(data.class_teacher_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = class_group_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_all_with_pagination(
        &self,
        page: u64,
        limit: u64,
    ) -> Result<(Vec<class_group::Model>, u64)> {
        let total = class_group::Entity::find().count(&self.db).await?;

        let offset = (page - 1) * limit;
        let classes = class_group::Entity::find()
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;

        Ok((classes, total))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<class_group::Model>> {
        let found = class_group::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn update(
        &self,
        id: i32,
        updates: ClassGroupUpdate,
    ) -> Result<Option<class_group::Model>> {
        let Some(found) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_class: class_group::ActiveModel = found.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(name) = updates.name {
            active_class.name = Set(name);
        }
        if let Some(academic_year) = updates.academic_year {
            active_class.academic_year = Set(academic_year);
        }
        if let Some(semester) = updates.semester {
            active_class.semester = Set(semester);
        }
        if let Some(status) = updates.status {
            active_class.status = Set(status);
        }
        if let Some(description) = updates.description {
            active_class.description = Set(Some(description));
        }
        if let Some(class_teacher_id) = updates.class_teacher_id {
            active_class.class_teacher_id = Set(Some(class_teacher_id));
        }

        active_class.updated_at = Set(now);

        let result = active_class.update(&self.db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult> {
        let result = class_group::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_user, setup_test_db};

    fn new_group(name: &str, created_by: i32) -> NewClassGroup {
        NewClassGroup {
            name: name.to_string(),
            academic_year: "2025".to_string(),
            semester: "1".to_string(),
            status: "active".to_string(),
            description: None,
            created_by,
            class_teacher_id: None,
        }
    }

    #[tokio::test]
    async fn pagination_covers_all_rows() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;

        let repo = ClassGroupRepository::new(&db);
        for n in 0..7 {
            repo.create(new_group(&format!("Class {n}"), admin.id))
                .await
                .unwrap();
        }

        let (first_page, total) = repo.find_all_with_pagination(1, 3).await.unwrap();
        assert_eq!(total, 7);
        assert_eq!(first_page.len(), 3);

        let (last_page, _) = repo.find_all_with_pagination(3, 3).await.unwrap();
        assert_eq!(last_page.len(), 1);
    }

    #[tokio::test]
    async fn crud_round_trip() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let teacher = seed_user(&db, "teacher", RoleEnum::Teacher).await;

        let repo = ClassGroupRepository::new(&db);
        let group = repo.create(new_group("Class 1A", admin.id)).await.unwrap();

        let updated = repo
            .update(
                group.id,
                ClassGroupUpdate {
                    status: Some("archived".to_string()),
                    class_teacher_id: Some(teacher.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.status, "archived");
        assert_eq!(updated.class_teacher_id, Some(teacher.id));

        assert!(repo.update(999, ClassGroupUpdate::default()).await.unwrap().is_none());

        let deleted = repo.delete(group.id).await.unwrap();
        assert_eq!(deleted.rows_affected, 1);
        assert!(repo.find_by_id(group.id).await.unwrap().is_none());
    }
}
