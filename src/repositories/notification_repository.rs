use crate::entities::notification;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

pub struct NotificationRepository {
    db: DatabaseConnection,
}

impl NotificationRepository {
    pub fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    pub async fn create(
        &self,
        user_id: i32,
        title: String,
        content: String,
        kind: String,
    ) -> Result<notification::Model> {
        let now = chrono::Utc::now().naive_utc();
        let notification_model = notification::ActiveModel {
            user_id: Set(user_id),
            title: Set(title),
            content: Set(content),
            r#type: Set(kind),
            is_read: Set(false),
            read_at: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        let result = notification_model.insert(&self.db).await?;
        Ok(result)
    }

    pub async fn find_by_user(
        &self,
        user_id: i32,
        unread_only: bool,
    ) -> Result<Vec<notification::Model>> {
        let mut query =
            notification::Entity::find().filter(notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(notification::Column::IsRead.eq(false));
        }

        let notifications = query
            .order_by_desc(notification::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(notifications)
    }

    pub async fn mark_as_read(&self, id: i32) -> Result<Option<notification::Model>> {
        let Some(found) = notification::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let now = chrono::Utc::now().naive_utc();
        let mut active: notification::ActiveModel = found.into();
        active.is_read = Set(true);
        active.read_at = Set(Some(now));

        let result = active.update(&self.db).await?;
        Ok(Some(result))
    }

    /// One batch update for every unread row, all stamped with the same
    /// read timestamp.
    pub async fn mark_all_as_read(&self, user_id: i32) -> Result<u64> {
        let now = chrono::Utc::now().naive_utc();
        let result = notification::Entity::update_many()
            .set(notification::ActiveModel {
                is_read: Set(true),
                read_at: Set(Some(now)),
                ..Default::default()
            })
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::sea_orm_active_enums::RoleEnum;
    use crate::test_utils::{seed_user, setup_test_db};

    #[tokio::test]
    async fn inbox_lists_newest_first_and_unread_filter_works() {
        let db = setup_test_db().await;
        let user = seed_user(&db, "student", RoleEnum::Student).await;

        let repo = NotificationRepository::new(&db);
        let first = repo
            .create(
                user.id,
                "Welcome".to_string(),
                "Hello".to_string(),
                "system".to_string(),
            )
            .await
            .unwrap();
        repo.create(
            user.id,
            "Reminder".to_string(),
            "Class tomorrow".to_string(),
            "course".to_string(),
        )
        .await
        .unwrap();

        repo.mark_as_read(first.id).await.unwrap().unwrap();

        let all = repo.find_by_user(user.id, false).await.unwrap();
        assert_eq!(all.len(), 2);

        let unread = repo.find_by_user(user.id, true).await.unwrap();
        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].title, "Reminder");
    }

    #[tokio::test]
    async fn mark_all_as_read_updates_every_unread_row() {
        let db = setup_test_db().await;
        let user = seed_user(&db, "student", RoleEnum::Student).await;
        let other = seed_user(&db, "other", RoleEnum::Student).await;

        let repo = NotificationRepository::new(&db);
        for n in 0..3 {
            repo.create(
                user.id,
                format!("Notice {n}"),
                "content".to_string(),
                "system".to_string(),
            )
            .await
            .unwrap();
        }
        repo.create(
            other.id,
            "Not yours".to_string(),
            "content".to_string(),
            "system".to_string(),
        )
        .await
        .unwrap();

        let updated = repo.mark_all_as_read(user.id).await.unwrap();
        assert_eq!(updated, 3);

        let unread = repo.find_by_user(user.id, true).await.unwrap();
        assert!(unread.is_empty());

        // All rows from the batch share one read timestamp.
        let all = repo.find_by_user(user.id, false).await.unwrap();
        let stamps: Vec<_> = all.iter().filter_map(|n| n.read_at).collect();
        assert_eq!(stamps.len(), 3);
        assert!(stamps.windows(2).all(|w| w[0] == w[1]));

        // Someone else's inbox is untouched.
        let other_unread = repo.find_by_user(other.id, true).await.unwrap();
        assert_eq!(other_unread.len(), 1);
    }

    #[tokio::test]
    async fn mark_as_read_on_missing_notification_returns_none() {
        let db = setup_test_db().await;
        let repo = NotificationRepository::new(&db);
        assert!(repo.mark_as_read(99).await.unwrap().is_none());
    }
}
