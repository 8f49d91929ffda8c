//! Driving port for profile mutations.

use async_trait::async_trait;

use crate::domain::{
    Error, NewProfile, Profile, ProfileUpdate, ProfileUpsert, ProfileWithUser,
    ProfileWithUsername, UserId,
};

/// Use-case port for creating, updating and deleting profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Create a profile for an existing user.
    async fn create_profile(&self, profile: NewProfile) -> Result<ProfileWithUser, Error>;

    /// Create the profile or update it when the user already has one.
    async fn upsert_profile(&self, upsert: ProfileUpsert) -> Result<ProfileWithUsername, Error>;

    /// Partially update an existing profile.
    async fn update_profile(
        &self,
        user_id: UserId,
        update: ProfileUpdate,
    ) -> Result<ProfileWithUser, Error>;

    /// Delete the profile of `user_id` and return it.
    async fn remove_profile(&self, user_id: UserId) -> Result<Profile, Error>;
}

/// Command used when no database is configured: every mutation is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileCommand;

fn storage_unavailable() -> Error {
    Error::service_unavailable("profile storage is not configured")
}

#[async_trait]
impl ProfileCommand for FixtureProfileCommand {
    async fn create_profile(&self, _profile: NewProfile) -> Result<ProfileWithUser, Error> {
        Err(storage_unavailable())
    }

    async fn upsert_profile(&self, _upsert: ProfileUpsert) -> Result<ProfileWithUsername, Error> {
        Err(storage_unavailable())
    }

    async fn update_profile(
        &self,
        _user_id: UserId,
        _update: ProfileUpdate,
    ) -> Result<ProfileWithUser, Error> {
        Err(storage_unavailable())
    }

    async fn remove_profile(&self, _user_id: UserId) -> Result<Profile, Error> {
        Err(storage_unavailable())
    }
}
