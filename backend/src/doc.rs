//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every account and health endpoint, the request and
//! response bodies they exchange, and the bearer token security scheme
//! issued by `POST /user/sign`. Swagger UI serves it in debug builds.

use crate::domain::{DomainError, ErrorCode, Role};
use crate::inbound::http::users::{
    AdminProfileResponse, CreateAdminBody, CreateCustomerBody, CreatedAccountResponse,
    ForceUpdateAdminBody, SignInRequest, SignInResponse, UpdateAdminInfoBody, UpdatePasswordBody,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer token security scheme.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Session token issued by POST /user/sign."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Editfolio account API",
        description = "Account lifecycle for customers, admins and super admins."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::users::sign_in,
        crate::inbound::http::users::create_customer,
        crate::inbound::http::users::create_admin,
        crate::inbound::http::users::update_admin_password,
        crate::inbound::http::users::current_admin,
        crate::inbound::http::users::update_admin_info,
        crate::inbound::http::users::force_update_admin,
        crate::inbound::http::users::delete_customer,
        crate::inbound::http::users::delete_admin,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        DomainError,
        ErrorCode,
        Role,
        SignInRequest,
        SignInResponse,
        CreateCustomerBody,
        CreateAdminBody,
        CreatedAccountResponse,
        UpdatePasswordBody,
        UpdateAdminInfoBody,
        ForceUpdateAdminBody,
        AdminProfileResponse,
    )),
    tags(
        (name = "users", description = "Account lifecycle operations"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
