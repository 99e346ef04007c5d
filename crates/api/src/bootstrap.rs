//! First-run setup of the admin account.

use regelwerk_db::models::user::CreateUser;
use regelwerk_db::repositories::UserRepo;
use regelwerk_db::DbPool;

use crate::auth::password::{hash_password, validate_password_strength, MIN_PASSWORD_LENGTH};
use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Create the configured admin account if no account exists yet.
///
/// Returns `true` if an account was created. Does nothing once any user
/// exists, so changing `ADMIN_PASSWORD` later has no effect.
pub async fn ensure_admin(pool: &DbPool, config: &ServerConfig) -> AppResult<bool> {
    let Some(admin) = &config.admin else {
        return Ok(false);
    };

    if UserRepo::count(pool).await? > 0 {
        tracing::debug!("Admin bootstrap skipped, users already exist");
        return Ok(false);
    }

    validate_password_strength(&admin.password, MIN_PASSWORD_LENGTH)
        .map_err(|e| AppError::BadRequest(format!("ADMIN_PASSWORD rejected: {e}")))?;

    let password_hash = hash_password(&admin.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let user = UserRepo::create(
        pool,
        &CreateUser {
            email: admin.email.trim().to_lowercase(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "Admin account created");
    Ok(true)
}
