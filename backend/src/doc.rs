//! OpenAPI documentation configuration.
//!
//! Registers every REST endpoint and the shared schemas. The generated
//! specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{LoginBody, SignupBody};
use crate::inbound::http::draft::{CreateTeamBody, PlayerBody};
use crate::inbound::http::users::{
    BudgetBody, ChangePasswordBody, EmailChangeBody, ProfileBody, UpdateProfileBody,
};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Fantaleague backend API",
        description = "School fantasy league: accounts, profiles, and the team draft."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::signup,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_profile,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::request_email_change,
        crate::inbound::http::users::verify_email_change,
        crate::inbound::http::users::user_budget,
        crate::inbound::http::draft::list_players,
        crate::inbound::http::draft::create_team,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SignupBody,
        LoginBody,
        ProfileBody,
        UpdateProfileBody,
        ChangePasswordBody,
        EmailChangeBody,
        BudgetBody,
        PlayerBody,
        CreateTeamBody,
    )),
    tags(
        (name = "auth", description = "Signup, login, and logout"),
        (name = "me", description = "Authenticated profile operations"),
        (name = "draft", description = "Player catalog and team creation"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
