use anyhow::{Context, Result};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::config::APP_CONFIG;
use crate::entities::sea_orm_active_enums::RoleEnum;
use crate::entities::user;
use crate::repositories::UserRepository;

/// Seeds the default admin account on startup if it does not exist yet.
pub async fn initialize_admin_user(db: &DatabaseConnection) -> Result<()> {
    let admin_username: &str = &APP_CONFIG.admin_username;

    let existing_admin = user::Entity::find()
        .filter(user::Column::Username.eq(admin_username))
        .one(db)
        .await
        .context("Failed to check existing admin")?;

    if existing_admin.is_some() {
        tracing::info!("Admin user already exists, skipping initialization");
        return Ok(());
    }

    tracing::info!("Creating default admin user...");

    let hashed_password = bcrypt::hash(&APP_CONFIG.admin_password, bcrypt::DEFAULT_COST)
        .context("Failed to hash admin password")?;

    let user_repo = UserRepository::new(db);
    user_repo
        .create(
            "System Administrator".to_string(),
            admin_username.to_string(),
            Some(APP_CONFIG.admin_email.clone()),
            hashed_password,
            RoleEnum::Admin,
            None,
            None,
        )
        .await
        .context("Failed to insert admin user")?;

    tracing::info!("Admin user created successfully");
    tracing::info!("  Username: {}", admin_username);
    tracing::warn!("Please change the default password after first login!");

    Ok(())
}
