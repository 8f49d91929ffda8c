//! User identity as seen by the profile service.
//!
//! Users are owned by the account subsystem; profiles only reference them by
//! [`UserId`] and project their [`Username`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Maximum number of characters allowed in a username.
pub const USERNAME_MAX: usize = 64;

/// Validation errors for user identity values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Identifier was zero or negative.
    #[error("user id must be a positive integer")]
    NonPositiveId,
    /// Identifier could not be parsed as an integer.
    #[error("user id must be a positive integer")]
    InvalidId,
    /// Username was empty once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`] characters.
    #[error("username must be at most {max} characters")]
    UsernameTooLong {
        /// Configured maximum.
        max: usize,
    },
    /// Username contained control characters.
    #[error("username must not contain control characters")]
    UsernameInvalidCharacters,
}

/// Positive integer identifier of a user row.
///
/// # Examples
/// ```
/// use profile_service::domain::UserId;
///
/// let id = UserId::new(5).expect("positive id");
/// assert_eq!(id.get(), 5);
/// assert!(UserId::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct UserId(i32);

impl UserId {
    /// Validate and construct a [`UserId`].
    pub fn new(id: i32) -> Result<Self, UserValidationError> {
        if id <= 0 {
            return Err(UserValidationError::NonPositiveId);
        }
        Ok(Self(id))
    }

    /// Raw integer value.
    #[must_use]
    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for UserId {
    type Error = UserValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for i32 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s
            .parse::<i32>()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(raw)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login handle of a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding whitespace.
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = username.into();
        let username = raw.trim();
        if username.is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        if username.chars().any(char::is_control) {
            return Err(UserValidationError::UsernameInvalidCharacters);
        }
        Ok(Self(username.to_owned()))
    }

    /// Borrow the username.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// User record owning a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier.
    pub id: UserId,
    /// Current username.
    pub username: Username,
}

impl User {
    /// Build a user from validated parts.
    #[must_use]
    pub fn new(id: UserId, username: Username) -> Self {
        Self { id, username }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(-4)]
    fn user_id_rejects_non_positive_values(#[case] raw: i32) {
        assert_eq!(UserId::new(raw), Err(UserValidationError::NonPositiveId));
    }

    #[rstest]
    #[case("5", Ok(5))]
    #[case("abc", Err(UserValidationError::InvalidId))]
    #[case("-1", Err(UserValidationError::NonPositiveId))]
    #[case("", Err(UserValidationError::InvalidId))]
    fn user_id_parses_path_segments(
        #[case] raw: &str,
        #[case] expected: Result<i32, UserValidationError>,
    ) {
        assert_eq!(raw.parse::<UserId>().map(UserId::get), expected);
    }

    #[rstest]
    #[case("   ", UserValidationError::EmptyUsername)]
    #[case("bad\nname", UserValidationError::UsernameInvalidCharacters)]
    fn username_rejects_invalid_values(#[case] raw: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(raw), Err(expected));
    }

    #[rstest]
    fn username_is_stored_trimmed() {
        let username = Username::new("  ada ").expect("valid username");
        assert_eq!(username.as_str(), "ada");
    }

    #[rstest]
    fn username_rejects_overlong_values() {
        let raw = "a".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(raw),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    fn user_id_deserialisation_validates() {
        assert!(serde_json::from_str::<UserId>("0").is_err());
        let id: UserId = serde_json::from_str("42").expect("valid id");
        assert_eq!(id.get(), 42);
    }
}
