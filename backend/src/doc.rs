//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers the profile endpoints, the health probes, and the
//! error schema wrappers from [`crate::inbound::http::schemas`]. The document
//! backs Swagger UI in debug builds and is exported by the `openapi-dump`
//! binary.

use utoipa::OpenApi;

use crate::inbound::http::profiles_dto::{
    CreateProfileRequest, ProfileFieldsPayload, ProfileOwnerNameResponse, ProfileOwnerResponse,
    ProfileResponse, ProfileWithUserResponse, ProfileWithUsernameResponse, UpdateProfileRequest,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Profile service API",
        description = "CRUD and upsert operations over user profiles, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::profiles::list_profiles,
        crate::inbound::http::profiles::get_profile,
        crate::inbound::http::profiles::create_profile,
        crate::inbound::http::profiles::upsert_profile,
        crate::inbound::http::profiles::update_profile,
        crate::inbound::http::profiles::remove_profile,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        CreateProfileRequest,
        UpdateProfileRequest,
        ProfileFieldsPayload,
        ProfileResponse,
        ProfileOwnerNameResponse,
        ProfileOwnerResponse,
        ProfileWithUsernameResponse,
        ProfileWithUserResponse,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "profiles", description = "Operations on user profiles"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn error_schema_is_registered() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get(ERROR_SCHEMA_NAME).expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
    }

    #[test]
    fn profile_paths_are_documented() {
        let doc = ApiDoc::openapi();
        let paths = &doc.paths.paths;
        for path in [
            "/api/v1/profiles",
            "/api/v1/profiles/{userId}",
            "/health/ready",
            "/health/live",
        ] {
            assert!(paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn document_serialises() {
        let json = ApiDoc::openapi()
            .to_pretty_json()
            .expect("OpenAPI serialises");
        assert!(json.contains("upsertProfile"));
    }
}
