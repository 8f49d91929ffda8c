//! Domain primitives, aggregates and services.
//!
//! Purpose: Define strongly typed profile and user entities used by the API
//! and persistence layers, plus the ports and service that tie them
//! together. Types validate on construction so adapters never hold an
//! invalid identifier or an oversized field.
//!
//! Public surface:
//! - Error (alias to `error::Error`): API error response payload.
//! - ErrorCode (alias to `error::ErrorCode`): stable error identifier.
//! - User, UserId, Username: identity of the profile owner.
//! - Profile and its change payloads (`NewProfile`, `ProfileUpsert`,
//!   `ProfileUpdate`).
//! - ProfileService: implementation of the driving ports.

pub mod error;
pub mod ports;
pub mod profile;
mod profile_service;
pub mod trace_id;
pub mod user;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::profile::{
    NewProfile, PROFILE_FIELD_MAX, Profile, ProfileDetails, ProfileField, ProfileUpdate,
    ProfileUpsert, ProfileValidationError, ProfileWithUser, ProfileWithUsername,
};
pub use self::profile_service::ProfileService;
pub use self::trace_id::TraceId;
pub use self::user::{USERNAME_MAX, User, UserId, UserValidationError, Username};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use profile_service::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::not_found("no such profile"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
