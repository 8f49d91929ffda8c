//! Profile domain service.
//!
//! Implements the [`ProfileQuery`] and [`ProfileCommand`] driving ports over a
//! [`ProfileRepository`]. The service validates payloads, turns missing rows
//! into `NotFound`, and maps repository failures onto domain error codes
//! without discarding their kind.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, error};

use crate::domain::ports::{
    ProfileCommand, ProfileQuery, ProfileRepository, ProfileRepositoryError,
};
use crate::domain::{
    Error, NewProfile, Profile, ProfileDetails, ProfileUpdate, ProfileUpsert,
    ProfileValidationError, ProfileWithUser, ProfileWithUsername, UserId,
};

/// Profile service implementing the driving ports.
#[derive(Clone)]
pub struct ProfileService<R> {
    repository: Arc<R>,
}

impl<R> ProfileService<R> {
    /// Create a service backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

/// NotFound for a user without a profile, shared with the fixture query.
pub(crate) fn profile_not_found(user_id: &UserId) -> Error {
    Error::not_found(format!("profile for user with id {user_id} not found")).with_details(json!({
        "userId": user_id.get(),
        "code": "profile_not_found",
    }))
}

fn map_validation_error(err: &ProfileValidationError) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": err.field().as_str(),
        "code": err.code(),
    }))
}

fn validate_details(details: &ProfileDetails) -> Result<(), Error> {
    details.validate().map_err(|err| map_validation_error(&err))
}

fn map_repository_error(error: ProfileRepositoryError) -> Error {
    match error {
        ProfileRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("profile repository unavailable: {message}"))
        }
        ProfileRepositoryError::Query { message } => {
            Error::internal(format!("profile repository error: {message}"))
        }
        ProfileRepositoryError::UnknownUser { user_id } => {
            Error::not_found(format!("user with id {user_id} not found")).with_details(json!({
                "userId": user_id,
                "code": "user_not_found",
            }))
        }
        ProfileRepositoryError::DuplicateProfile { user_id } => {
            Error::conflict(format!("user with id {user_id} already has a profile"))
                .with_details(json!({
                    "userId": user_id,
                    "code": "profile_exists",
                }))
        }
        ProfileRepositoryError::UsernameTaken { username } => {
            Error::conflict("username is already taken").with_details(json!({
                "field": "username",
                "value": username,
                "code": "username_taken",
            }))
        }
    }
}

#[async_trait]
impl<R> ProfileQuery for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn list_profiles(&self) -> Result<Vec<Profile>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(map_repository_error)
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileWithUsername, Error> {
        self.repository
            .find_by_user_id(user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| profile_not_found(user_id))
    }
}

#[async_trait]
impl<R> ProfileCommand for ProfileService<R>
where
    R: ProfileRepository,
{
    async fn create_profile(&self, profile: NewProfile) -> Result<ProfileWithUser, Error> {
        validate_details(&profile.details)?;
        let created = self
            .repository
            .insert(&profile)
            .await
            .map_err(map_repository_error)?;
        debug!(user_id = %profile.user_id, profile_id = created.profile.id, "profile created");
        Ok(created)
    }

    async fn upsert_profile(&self, upsert: ProfileUpsert) -> Result<ProfileWithUsername, Error> {
        validate_details(&upsert.details)?;
        self.repository.upsert(&upsert).await.map_err(|err| {
            error!(user_id = %upsert.user_id, error = %err, "profile upsert failed");
            map_repository_error(err)
        })
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<ProfileWithUser, Error> {
        validate_details(&update.details)?;
        self.repository
            .update(&user_id, &update)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| profile_not_found(&user_id))
    }

    async fn remove_profile(&self, user_id: UserId) -> Result<Profile, Error> {
        let removed = self
            .repository
            .delete_by_user_id(&user_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| profile_not_found(&user_id))?;
        debug!(user_id = %user_id, profile_id = removed.id, "profile removed");
        Ok(removed)
    }
}
