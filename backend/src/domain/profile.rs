//! Profile aggregate and the payloads used to change it.
//!
//! A profile belongs to exactly one user (unique `user_id`). Every contact
//! field is optional; in change payloads `None` means "leave as is".

use std::fmt;

use chrono::{DateTime, Utc};

use super::{User, UserId, Username};

/// Maximum number of characters stored in any optional profile field.
pub const PROFILE_FIELD_MAX: usize = 255;

/// Optional profile field names, rendered in their wire (camelCase) form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Email,
    Gender,
    Address,
    Pincode,
    City,
    State,
    Country,
}

impl ProfileField {
    /// Wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Gender => "gender",
            Self::Address => "address",
            Self::Pincode => "pincode",
            Self::City => "city",
            Self::State => "state",
            Self::Country => "country",
        }
    }
}

impl fmt::Display for ProfileField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for profile field values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileValidationError {
    /// Email did not look like `local@domain`.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// A field exceeded [`PROFILE_FIELD_MAX`] characters.
    #[error("{field} must be at most {max} characters")]
    FieldTooLong {
        /// Offending field.
        field: ProfileField,
        /// Configured maximum.
        max: usize,
    },
}

impl ProfileValidationError {
    /// Field the error refers to.
    #[must_use]
    pub fn field(&self) -> ProfileField {
        match self {
            Self::InvalidEmail => ProfileField::Email,
            Self::FieldTooLong { field, .. } => *field,
        }
    }

    /// Machine-readable reason.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidEmail => "invalid_email",
            Self::FieldTooLong { .. } => "field_too_long",
        }
    }
}

/// Optional contact and address details of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileDetails {
    pub email: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl ProfileDetails {
    fn fields(&self) -> [(ProfileField, Option<&str>); 7] {
        [
            (ProfileField::Email, self.email.as_deref()),
            (ProfileField::Gender, self.gender.as_deref()),
            (ProfileField::Address, self.address.as_deref()),
            (ProfileField::Pincode, self.pincode.as_deref()),
            (ProfileField::City, self.city.as_deref()),
            (ProfileField::State, self.state.as_deref()),
            (ProfileField::Country, self.country.as_deref()),
        ]
    }

    /// Check length limits and the email shape.
    ///
    /// # Examples
    /// ```
    /// use profile_service::domain::{ProfileDetails, ProfileValidationError};
    ///
    /// let details = ProfileDetails {
    ///     email: Some("not-an-address".to_owned()),
    ///     ..ProfileDetails::default()
    /// };
    /// assert_eq!(details.validate(), Err(ProfileValidationError::InvalidEmail));
    /// ```
    pub fn validate(&self) -> Result<(), ProfileValidationError> {
        for (field, value) in self.fields() {
            let Some(value) = value else { continue };
            if value.chars().count() > PROFILE_FIELD_MAX {
                return Err(ProfileValidationError::FieldTooLong {
                    field,
                    max: PROFILE_FIELD_MAX,
                });
            }
        }
        match self.email.as_deref() {
            Some(email) if !is_plausible_email(email) => Err(ProfileValidationError::InvalidEmail),
            _ => Ok(()),
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

/// Stored profile row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Surrogate key assigned by the store.
    pub id: i32,
    /// Owning user (unique).
    pub user_id: UserId,
    pub details: ProfileDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile with only the owner's username projected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWithUsername {
    pub profile: Profile,
    pub username: Username,
}

/// Profile with the full owning user attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileWithUser {
    pub profile: Profile,
    pub user: User,
}

/// Payload for creating a profile for an existing user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProfile {
    pub user_id: UserId,
    pub details: ProfileDetails,
}

/// Payload for the create-or-update operation keyed on `user_id`.
///
/// `username` is applied to the owning user only when the profile already
/// exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpsert {
    pub user_id: UserId,
    pub username: Option<Username>,
    pub details: ProfileDetails,
}

/// Partial update of an existing profile.
///
/// Unset detail fields keep their stored value; the owning user is only
/// touched when `username` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub username: Option<Username>,
    pub details: ProfileDetails,
}
