//! Profile HTTP handlers.
//!
//! ```text
//! GET    /api/v1/profiles
//! GET    /api/v1/profiles/{userId}
//! POST   /api/v1/profiles
//! PUT    /api/v1/profiles
//! PATCH  /api/v1/profiles/{userId}
//! DELETE /api/v1/profiles/{userId}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};

use crate::domain::ProfileUpdate;
use crate::inbound::http::ApiResult;
use crate::inbound::http::profiles_dto::{
    CreateProfileRequest, ProfileResponse, ProfileWithUserResponse, ProfileWithUsernameResponse,
    UpdateProfileRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_user_id;

/// List every profile.
#[utoipa::path(
    get,
    path = "/api/v1/profiles",
    responses(
        (status = 200, description = "All profiles", body = [ProfileResponse]),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "listProfiles"
)]
#[get("/profiles")]
pub async fn list_profiles(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ProfileResponse>>> {
    let profiles = state.profiles_query.list_profiles().await?;
    Ok(web::Json(
        profiles.into_iter().map(ProfileResponse::from).collect(),
    ))
}

/// Fetch the profile of one user together with the username.
#[utoipa::path(
    get,
    path = "/api/v1/profiles/{userId}",
    params(("userId" = i32, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Profile", body = ProfileWithUsernameResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 404, description = "No profile for this user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "getProfile"
)]
#[get("/profiles/{user_id}")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileWithUsernameResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let profile = state.profiles_query.fetch_profile(&user_id).await?;
    Ok(web::Json(ProfileWithUsernameResponse::from(profile)))
}

/// Create a profile for an existing user.
#[utoipa::path(
    post,
    path = "/api/v1/profiles",
    request_body = CreateProfileRequest,
    responses(
        (status = 201, description = "Created profile", body = ProfileWithUserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "User already has a profile", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "createProfile"
)]
#[post("/profiles")]
pub async fn create_profile(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProfileRequest>,
) -> ApiResult<HttpResponse> {
    let profile = payload.into_inner().into_new_profile()?;
    let created = state.profiles.create_profile(profile).await?;
    Ok(HttpResponse::Created().json(ProfileWithUserResponse::from(created)))
}

/// Create the profile, or update it and optionally rename the owner.
#[utoipa::path(
    put,
    path = "/api/v1/profiles",
    request_body = CreateProfileRequest,
    description = "Atomic create-or-update keyed on userId. `username` renames the owner only \
                   when the profile already exists.",
    responses(
        (status = 200, description = "Stored profile", body = ProfileWithUsernameResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Unknown user", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "upsertProfile"
)]
#[put("/profiles")]
pub async fn upsert_profile(
    state: web::Data<HttpState>,
    payload: web::Json<CreateProfileRequest>,
) -> ApiResult<web::Json<ProfileWithUsernameResponse>> {
    let upsert = payload.into_inner().into_upsert()?;
    let stored = state.profiles.upsert_profile(upsert).await?;
    Ok(web::Json(ProfileWithUsernameResponse::from(stored)))
}

/// Partially update a profile.
#[utoipa::path(
    patch,
    path = "/api/v1/profiles/{userId}",
    params(("userId" = i32, Path, description = "Owning user id")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated profile", body = ProfileWithUserResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "No profile for this user", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "updateProfile"
)]
#[patch("/profiles/{user_id}")]
pub async fn update_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateProfileRequest>,
) -> ApiResult<web::Json<ProfileWithUserResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let update = ProfileUpdate::try_from(payload.into_inner())?;
    let updated = state.profiles.update_profile(user_id, update).await?;
    Ok(web::Json(ProfileWithUserResponse::from(updated)))
}

/// Delete a profile and return what was removed.
#[utoipa::path(
    delete,
    path = "/api/v1/profiles/{userId}",
    params(("userId" = i32, Path, description = "Owning user id")),
    responses(
        (status = 200, description = "Deleted profile", body = ProfileResponse),
        (status = 400, description = "Invalid user id", body = ErrorSchema),
        (status = 404, description = "No profile for this user", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["profiles"],
    operation_id = "removeProfile"
)]
#[delete("/profiles/{user_id}")]
pub async fn remove_profile(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = parse_user_id(&path.into_inner())?;
    let removed = state.profiles.remove_profile(user_id).await?;
    Ok(web::Json(ProfileResponse::from(removed)))
}

#[cfg(test)]
#[path = "profiles_tests.rs"]
mod tests;
