//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::ProfileDetails;

use super::schema::{profiles, users};

/// Projection of the users table needed by profile reads.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
}

/// Row struct for reading from the profiles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: i32,
    pub user_id: i32,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub address: Option<String>,
    pub pincode: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating profile rows.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = profiles)]
pub(crate) struct NewProfileRow<'a> {
    pub user_id: i32,
    pub email: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub address: Option<&'a str>,
    pub pincode: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub country: Option<&'a str>,
}

impl<'a> NewProfileRow<'a> {
    pub(crate) fn new(user_id: i32, details: &'a ProfileDetails) -> Self {
        Self {
            user_id,
            email: details.email.as_deref(),
            gender: details.gender.as_deref(),
            address: details.address.as_deref(),
            pincode: details.pincode.as_deref(),
            city: details.city.as_deref(),
            state: details.state.as_deref(),
            country: details.country.as_deref(),
        }
    }
}

/// Partial profile update.
///
/// Diesel skips `None` fields, and `updated_at` is always set so the
/// changeset is never empty.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
pub(crate) struct ProfileChangeset<'a> {
    pub email: Option<&'a str>,
    pub gender: Option<&'a str>,
    pub address: Option<&'a str>,
    pub pincode: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub country: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> ProfileChangeset<'a> {
    pub(crate) fn new(details: &'a ProfileDetails, updated_at: DateTime<Utc>) -> Self {
        Self {
            email: details.email.as_deref(),
            gender: details.gender.as_deref(),
            address: details.address.as_deref(),
            pincode: details.pincode.as_deref(),
            city: details.city.as_deref(),
            state: details.state.as_deref(),
            country: details.country.as_deref(),
            updated_at,
        }
    }
}
