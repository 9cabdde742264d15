use crate::entities::sea_orm_active_enums::{RoleEnum, UserStatus};
use crate::entities::user;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DeleteResult, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<user::Model>> {
        let found = user::Entity::find_by_id(id).one(&self.db).await?;
        Ok(found)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>> {
        let found = user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    pub async fn find_all(&self, role_filter: Option<RoleEnum>) -> Result<Vec<user::Model>> {
        let mut query = user::Entity::find();

        if let Some(role) = role_filter {
            query = query.filter(user::Column::Role.eq(role));
        }

        let users = query
            .order_by_desc(user::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    /// Insert a new user. `password` is expected to already be hashed.
    pub async fn create(
        &self,
        name: String,
        username: String,
        email: Option<String>,
        password: String,
        role: RoleEnum,
        student_no: Option<String>,
        created_by: Option<i32>,
    ) -> Result<user::Model> {
        let now = chrono::Utc::now().naive_utc();
        let user_model = user::ActiveModel {
            name: Set(name),
            username: Set(username),
            email: Set(email),
            password: Set(password),
            role: Set(role),
            status: Set(UserStatus::Active),
            student_no: Set(student_no),
            created_by: Set(created_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = user_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn update(&self, id: i32, updates: UserUpdate) -> Result<Option<user::Model>> {
        let Some(found) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_user: user::ActiveModel = found.into();
        let now = chrono::Utc::now().naive_utc();

        if let Some(name) = updates.name {
            active_user.name = Set(name);
        }
        if let Some(username) = updates.username {
            active_user.username = Set(username);
        }
        if let Some(email) = updates.email {
            active_user.email = Set(Some(email));
        }
        if let Some(password) = updates.password {
            active_user.password = Set(password);
        }
        if let Some(role) = updates.role {
            active_user.role = Set(role);
        }
        if let Some(status) = updates.status {
            active_user.status = Set(status);
        }
        if let Some(student_no) = updates.student_no {
            active_user.student_no = Set(Some(student_no));
        }

        active_user.updated_at = Set(now);

        let result = active_user.update(&self.db).await?;
        Ok(Some(result))
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult> {
        let result = user::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(result)
    }
}

#[derive(Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<RoleEnum>,
    pub status: Option<UserStatus>,
    pub student_no: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn create_and_find_by_username() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo
            .create(
                "Student User".to_string(),
                "student".to_string(),
                Some("student@example.com".to_string()),
                "hashed".to_string(),
                RoleEnum::Student,
                Some("S12345".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(created.status, UserStatus::Active);

        let found = repo.find_by_username("student").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.student_no.as_deref(), Some("S12345"));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_by_the_store() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        repo.create(
            "First".to_string(),
            "taken".to_string(),
            None,
            "hashed".to_string(),
            RoleEnum::Teacher,
            None,
            None,
        )
        .await
        .unwrap();

        let second = repo
            .create(
                "Second".to_string(),
                "taken".to_string(),
                None,
                "hashed".to_string(),
                RoleEnum::Teacher,
                None,
                None,
            )
            .await;
        assert!(second.is_err());

        let rows = repo.find_all(Some(RoleEnum::Teacher)).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn find_all_filters_by_role() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        for (username, role) in [
            ("admin1", RoleEnum::Admin),
            ("teacher1", RoleEnum::Teacher),
            ("student1", RoleEnum::Student),
            ("student2", RoleEnum::Student),
        ] {
            repo.create(
                username.to_string(),
                username.to_string(),
                None,
                "hashed".to_string(),
                role,
                None,
                None,
            )
            .await
            .unwrap();
        }

        let students = repo.find_all(Some(RoleEnum::Student)).await.unwrap();
        assert_eq!(students.len(), 2);

        let everyone = repo.find_all(None).await.unwrap();
        assert_eq!(everyone.len(), 4);
    }

    #[tokio::test]
    async fn update_only_touches_supplied_fields() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo
            .create(
                "Old Name".to_string(),
                "someone".to_string(),
                Some("old@example.com".to_string()),
                "old-hash".to_string(),
                RoleEnum::Student,
                None,
                None,
            )
            .await
            .unwrap();

        let updated = repo
            .update(
                created.id,
                UserUpdate {
                    name: Some("New Name".to_string()),
                    status: Some(UserStatus::Inactive),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "New Name");
        assert_eq!(updated.status, UserStatus::Inactive);
        assert_eq!(updated.password, "old-hash");
        assert_eq!(updated.email.as_deref(), Some("old@example.com"));
    }

    #[tokio::test]
    async fn update_missing_user_returns_none() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let result = repo.update(999, UserUpdate::default()).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let db = setup_test_db().await;
        let repo = UserRepository::new(&db);

        let created = repo
            .create(
                "Gone".to_string(),
                "gone".to_string(),
                None,
                "hashed".to_string(),
                RoleEnum::Student,
                None,
                None,
            )
            .await
            .unwrap();

        let result = repo.delete(created.id).await.unwrap();
        assert_eq!(result.rows_affected, 1);
        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
    }
}
