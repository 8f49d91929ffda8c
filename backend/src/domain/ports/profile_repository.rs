//! Driven port for profile persistence.
//!
//! Adapters translate store-level failures into
//! [`ProfileRepositoryError`] variants so the domain can tell a missing user
//! apart from a duplicate profile or an unreachable database.

use async_trait::async_trait;

use crate::domain::{
    NewProfile, Profile, ProfileUpdate, ProfileUpsert, ProfileWithUser, ProfileWithUsername,
    UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile repository adapters.
    pub enum ProfileRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "profile repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "profile repository query failed: {message}",
        /// The referenced user does not exist.
        UnknownUser { user_id: i32 } =>
            "user {user_id} does not exist",
        /// The user already owns a profile.
        DuplicateProfile { user_id: i32 } =>
            "user {user_id} already has a profile",
        /// Another user already holds the requested username.
        UsernameTaken { username: String } =>
            "username {username} is already taken",
    }
}

/// Port for profile storage keyed by owning user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Every stored profile in ascending id order.
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError>;

    /// Profile of `user_id` joined with the owner's username.
    ///
    /// Returns `None` when the user has no profile.
    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfileWithUsername>, ProfileRepositoryError>;

    /// Insert a profile for an existing user.
    ///
    /// Fails with [`ProfileRepositoryError::UnknownUser`] when the user row
    /// is missing and [`ProfileRepositoryError::DuplicateProfile`] when the
    /// user already has a profile.
    async fn insert(&self, profile: &NewProfile)
    -> Result<ProfileWithUser, ProfileRepositoryError>;

    /// Create the profile or update it in place, atomically.
    ///
    /// On the update branch the owner's username is rewritten when
    /// `upsert.username` is set.
    async fn upsert(
        &self,
        upsert: &ProfileUpsert,
    ) -> Result<ProfileWithUsername, ProfileRepositoryError>;

    /// Apply a partial update.
    ///
    /// Returns `None` when the user has no profile; nothing is written then.
    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<ProfileWithUser>, ProfileRepositoryError>;

    /// Delete the profile of `user_id`, returning the removed row.
    async fn delete_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError>;
}
