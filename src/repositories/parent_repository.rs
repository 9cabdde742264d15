use crate::entities::student_parent;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter, Set,
};

pub struct ParentRepository {
    db: DatabaseConnection,
}

#[derive(Default)]
pub struct ParentUpdate {
    pub parent_name: Option<String>,
    pub relationship: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub is_primary: Option<bool>,
    pub updated_by: Option<i32>,
}

impl ParentRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn add(
        &self,
        student_id: i32,
        parent_name: String,
        relationship: String,
        phone: Option<String>,
        email: Option<String>,
        is_primary: bool,
        created_by: i32,
    ) -> Result<student_parent::Model> {
        let now = chrono::Utc::now().naive_utc();
        let parent_model = student_parent::ActiveModel {
            student_id: Set(student_id),
            parent_name: Set(parent_name),
            relationship: Set(relationship),
            phone: Set(phone),
            email: Set(email),
            is_primary: Set(is_primary),
            created_by: Set(created_by),
            updated_by: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = parent_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<student_parent::Model>> {
        let parents = student_parent::Entity::find()
            .filter(student_parent::Column::StudentId.eq(student_id))
            .all(&self.db)
            .await?;
        Ok(parents)
    }

    pub async fn update(
        &self,
        id: i32,
        updates: ParentUpdate,
    ) -> Result<Option<student_parent::Model>> {
        let Some(found) = student_parent::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active_parent: student_parent::ActiveModel = found.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(parent_name) = updates.parent_name {
            active_parent.parent_name = Set(parent_name);
        }
        if let Some(relationship) = updates.relationship {
            active_parent.relationship = Set(relationship);
        }
        if let Some(phone) = updates.phone {
            active_parent.phone = Set(Some(phone));
        }
        if let Some(email) = updates.email {
            active_parent.email = Set(Some(email));
        }
        if let Some(is_primary) = updates.is_primary {
            active_parent.is_primary = Set(is_primary);
        }
        if let Some(updated_by) = updates.updated_by {
            active_parent.updated_by = Set(Some(updated_by));
        }

        active_parent.updated_at = Set(now);

        let result = active_parent.update(&self.db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult> {
        let result = student_parent::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_user, setup_test_db};

    #[tokio::test]
    async fn guardian_links_round_trip() {
        let db = setup_test_db().await;
        let admin = seed_user(&db, "admin", RoleEnum::Admin).await;
        let student = seed_user(&db, "student", RoleEnum::Student).await;

        let repo = ParentRepository::new(&db);
        let parent = repo
            .add(
                student.id,
                "Jane Doe".to_string(),
                "mother".to_string(),
                Some("0912345678".to_string()),
                None,
                true,
                admin.id,
            )
            .await
            .unwrap();

        assert!(parent.is_primary);
        assert_eq!(parent.created_by, admin.id);

        let listed = repo.find_by_student(student.id).await.unwrap();
        assert_eq!(listed.len(), 1);

        let updated = repo
            .update(
                parent.id,
                ParentUpdate {
                    phone: Some("0999999999".to_string()),
                    updated_by: Some(admin.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.phone.as_deref(), Some("0999999999"));
        assert_eq!(updated.updated_by, Some(admin.id));
        assert_eq!(updated.parent_name, "Jane Doe");

        let deleted = repo.delete(parent.id).await.unwrap();
        assert_eq!(deleted.rows_affected, 1);
        assert!(repo.find_by_student(student.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_missing_link_returns_none() {
        let db = setup_test_db().await;
        let repo = ParentRepository::new(&db);
        let result = repo.update(7, ParentUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }
}
