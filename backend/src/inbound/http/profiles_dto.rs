//! Request and response payloads for the profile endpoints.
//!
//! Payloads are camelCase JSON. Absent or `null` detail fields in a request
//! mean "leave unchanged"; clearing a stored value is not expressible.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, NewProfile, Profile, ProfileDetails, ProfileUpdate, ProfileUpsert, ProfileWithUser,
    ProfileWithUsername, User,
};
use crate::inbound::http::validation::{parse_optional_username, user_id_from_body};

/// Optional contact and address fields shared by every profile payload.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileFieldsPayload {
    #[schema(example = "a@x.com")]
    pub email: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    #[schema(example = "411001")]
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
}

impl From<ProfileFieldsPayload> for ProfileDetails {
    fn from(value: ProfileFieldsPayload) -> Self {
        Self {
            email: value.email,
            gender: value.gender,
            address: value.address,
            pincode: value.pincode,
            city: value.city,
            state: value.state,
            country: value.country,
        }
    }
}

impl From<ProfileDetails> for ProfileFieldsPayload {
    fn from(value: ProfileDetails) -> Self {
        Self {
            email: value.email,
            gender: value.gender,
            address: value.address,
            pincode: value.pincode,
            city: value.city,
            state: value.state,
            country: value.country,
        }
    }
}

/// Body of `POST /profiles` and `PUT /profiles`.
///
/// `username` is only honoured by `PUT` when the profile already exists.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfileRequest {
    #[schema(example = 5)]
    pub user_id: i32,
    pub username: Option<String>,
    #[serde(flatten)]
    pub fields: ProfileFieldsPayload,
}

impl CreateProfileRequest {
    pub(crate) fn into_new_profile(self) -> Result<NewProfile, Error> {
        Ok(NewProfile {
            user_id: user_id_from_body(self.user_id)?,
            details: self.fields.into(),
        })
    }

    pub(crate) fn into_upsert(self) -> Result<ProfileUpsert, Error> {
        Ok(ProfileUpsert {
            user_id: user_id_from_body(self.user_id)?,
            username: parse_optional_username(self.username)?,
            details: self.fields.into(),
        })
    }
}

/// Body of `PATCH /profiles/{userId}`.
#[derive(Debug, Default, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub username: Option<String>,
    #[serde(flatten)]
    pub fields: ProfileFieldsPayload,
}

impl TryFrom<UpdateProfileRequest> for ProfileUpdate {
    type Error = Error;

    fn try_from(value: UpdateProfileRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: parse_optional_username(value.username)?,
            details: value.fields.into(),
        })
    }
}

/// Stored profile as returned by the API.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: i32,
    pub user_id: i32,
    #[serde(flatten)]
    pub fields: ProfileFieldsPayload,
    #[schema(example = "2026-01-01T00:00:00+00:00")]
    pub created_at: String,
    pub updated_at: String,
}

impl From<Profile> for ProfileResponse {
    fn from(value: Profile) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id.get(),
            fields: value.details.into(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Owner projection carrying only the username.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileOwnerNameResponse {
    #[schema(example = "ada")]
    pub username: String,
}

/// Owner projection carrying id and username.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileOwnerResponse {
    pub id: i32,
    pub username: String,
}

impl From<User> for ProfileOwnerResponse {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            username: value.username.into(),
        }
    }
}

/// Profile with the owner's username.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileWithUsernameResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub user: ProfileOwnerNameResponse,
}

impl From<ProfileWithUsername> for ProfileWithUsernameResponse {
    fn from(value: ProfileWithUsername) -> Self {
        Self {
            profile: value.profile.into(),
            user: ProfileOwnerNameResponse {
                username: value.username.into(),
            },
        }
    }
}

/// Profile with the full owning user.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ProfileWithUserResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub user: ProfileOwnerResponse,
}

impl From<ProfileWithUser> for ProfileWithUserResponse {
    fn from(value: ProfileWithUser) -> Self {
        Self {
            profile: value.profile.into(),
            user: value.user.into(),
        }
    }
}
