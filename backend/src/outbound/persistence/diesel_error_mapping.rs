//! Diesel error mapping for the profile repository.
//!
//! Constraint violations are recognised by constraint name (as created by
//! the migrations) so a missing user, a second profile and a taken username
//! surface as distinct repository errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::{debug, warn};

use crate::domain::ports::ProfileRepositoryError;

use super::pool::PoolError;

/// `profiles.user_id` references `users.id`.
pub(crate) const PROFILE_USER_FKEY: &str = "profiles_user_id_fkey";
/// At most one profile per user.
pub(crate) const PROFILE_USER_KEY: &str = "profiles_user_id_key";
/// Usernames are unique.
pub(crate) const USERNAME_KEY: &str = "users_username_key";

/// Constraint a write tripped over, when it is one the domain cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Violation {
    UnknownUser,
    DuplicateProfile,
    UsernameTaken,
}

/// Identify a known constraint violation.
pub(crate) fn violation(error: &DieselError) -> Option<Violation> {
    let DieselError::DatabaseError(kind, info) = error else {
        return None;
    };
    match (kind, info.constraint_name()) {
        (DatabaseErrorKind::ForeignKeyViolation, Some(PROFILE_USER_FKEY)) => {
            Some(Violation::UnknownUser)
        }
        (DatabaseErrorKind::UniqueViolation, Some(PROFILE_USER_KEY)) => {
            Some(Violation::DuplicateProfile)
        }
        (DatabaseErrorKind::UniqueViolation, Some(USERNAME_KEY)) => Some(Violation::UsernameTaken),
        (
            DatabaseErrorKind::ForeignKeyViolation | DatabaseErrorKind::UniqueViolation,
            constraint_name,
        ) => {
            warn!(
                ?kind,
                constraint_name = ?constraint_name,
                "unrecognised constraint violation"
            );
            None
        }
        _ => None,
    }
}

pub(crate) fn map_pool_error(error: PoolError) -> ProfileRepositoryError {
    ProfileRepositoryError::connection(error.message())
}

/// Map Diesel errors that carry no domain meaning.
pub(crate) fn map_diesel_error(error: DieselError) -> ProfileRepositoryError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => ProfileRepositoryError::query("record not found"),
        DieselError::QueryBuilderError(_) => ProfileRepositoryError::query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _)
        | DieselError::BrokenTransactionManager => {
            ProfileRepositoryError::connection("database connection error")
        }
        _ => ProfileRepositoryError::query("database error"),
    }
}

/// Map a failed write, translating known violations.
///
/// `user_id` and `username` describe what the write tried to store.
pub(crate) fn map_write_error(
    error: DieselError,
    user_id: i32,
    username: Option<&str>,
) -> ProfileRepositoryError {
    match violation(&error) {
        Some(Violation::UnknownUser) => ProfileRepositoryError::unknown_user(user_id),
        Some(Violation::DuplicateProfile) => ProfileRepositoryError::duplicate_profile(user_id),
        Some(Violation::UsernameTaken) => {
            ProfileRepositoryError::username_taken(username.unwrap_or_default())
        }
        None => map_diesel_error(error),
    }
}
