use std::sync::Arc;

use crate::api::payload::SignupRequest;
use crate::database::models::{normalize_role, AppUser, NewAppUser, ROLE_ADMIN, SUPERADMIN_USERNAME};
use crate::database::repository::UserRepository;
use crate::error::ApiError;
use crate::middleware::RequestContext;

/// Signup rules and admin user management
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Create the immutable superadmin account if it does not exist yet.
    /// Returns true when the account was created by this call.
    #[tracing::instrument(skip(self), ret, err)]
    pub async fn seed_superadmin(&self) -> Result<bool, ApiError> {
        if self.users.find_by_username(SUPERADMIN_USERNAME).await?.is_some() {
            tracing::debug!("Superadmin already present");
            return Ok(false);
        }

        self.users.insert(NewAppUser::superadmin()).await?;
        tracing::info!("Superadmin seeded");
        Ok(true)
    }

    /// Register a user. Anonymous callers may not request the admin role;
    /// authenticated callers may only if they are the superadmin.
    #[tracing::instrument(skip_all, fields(username = ?request.username, role = ?request.role), err)]
    pub async fn create_user(&self, ctx: &RequestContext, request: SignupRequest) -> Result<AppUser, ApiError> {
        let username = request.username.unwrap_or_default();
        let password = request.password.unwrap_or_default();
        let role = normalize_role(request.role.as_deref().unwrap_or_default());

        match ctx.username() {
            None => {
                if role == ROLE_ADMIN {
                    return Err(ApiError::runtime("Only superadmin can create admin accounts"));
                }
            }
            Some(caller) => {
                let creator = self
                    .users
                    .find_by_username(caller)
                    .await?
                    .ok_or_else(|| ApiError::runtime("Creator not found"))?;

                if role == ROLE_ADMIN && creator.username != SUPERADMIN_USERNAME {
                    return Err(ApiError::runtime("Only superadmin can create other admins"));
                }
            }
        }

        let user = self.users.insert(NewAppUser::new(username, password, role)).await?;
        tracing::info!("User '{}' created '{}' with {}", ctx.actor(), user.username, user.role);
        Ok(user)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_all_users(&self) -> Result<Vec<AppUser>, ApiError> {
        let users = self.users.find_all().await?;
        tracing::debug!("Found {} users", users.len());
        Ok(users)
    }

    #[tracing::instrument(skip(self), err)]
    pub async fn get_user_by_id(&self, id: i64) -> Result<AppUser, ApiError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("User with id {} not found", id)))?;
        tracing::debug!("Found user '{}'", user.username);
        Ok(user)
    }

    /// Immutable accounts are refused; a missing id is a no-op.
    #[tracing::instrument(skip(self, ctx), err)]
    pub async fn delete_user(&self, ctx: &RequestContext, id: i64) -> Result<(), ApiError> {
        let Some(user) = self.users.find_by_id(id).await? else {
            tracing::warn!("Tried to delete non-existent user: {}", id);
            return Ok(());
        };
        if user.is_immutable {
            return Err(ApiError::runtime("Cannot delete superadmin"));
        }

        self.users.delete_by_id(id).await?;
        tracing::info!("User '{}' deleted user with ID: {}", ctx.actor(), id);
        Ok(())
    }
}
