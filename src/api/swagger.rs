use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "User Service API",
        version = "1.0.0",
        description = "Minimal user-management API.\n\n**Authentication:** every `/api/users` endpoint requires a bearer token. Mutating endpoints additionally require the admin role.",
    ),
    paths(
        // Users
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::create_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,

        // Health & Metrics
        crate::api::health::health_check,
        crate::api::metrics::get_metrics,
    ),
    components(
        schemas(
            // Users
            crate::models::user::User,
            crate::models::user::CreateUserRequest,
            crate::models::user::UpdateUserRequest,

            // Health
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "User record management. Reads require authentication; create, update and delete require the admin role."),
        (name = "Health", description = "Health check and request counters for monitoring service status."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .description(Some("Enter the API bearer token"))
                        .build(),
                ),
            );
        }
    }
}
