//! Driving port for profile reads.
//!
//! HTTP handlers depend on this trait rather than on the repository so they
//! stay testable without a database.

use async_trait::async_trait;

use crate::domain::profile_service::profile_not_found;
use crate::domain::{Error, Profile, ProfileWithUsername, UserId};

/// Use-case port for reading profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileQuery: Send + Sync {
    /// All profiles, unfiltered.
    async fn list_profiles(&self) -> Result<Vec<Profile>, Error>;

    /// Profile of `user_id` with the owner's username.
    ///
    /// Fails with `NotFound` when the user has no profile.
    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileWithUsername, Error>;
}

/// Query used when no database is configured: nothing is stored.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureProfileQuery;

#[async_trait]
impl ProfileQuery for FixtureProfileQuery {
    async fn list_profiles(&self) -> Result<Vec<Profile>, Error> {
        Ok(Vec::new())
    }

    async fn fetch_profile(&self, user_id: &UserId) -> Result<ProfileWithUsername, Error> {
        Err(profile_not_found(user_id))
    }
}
