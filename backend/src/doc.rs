//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! schema wrappers that describe domain JSON without coupling domain types to
//! utoipa, and the session cookie security scheme. Swagger UI serves it in
//! debug builds.

use crate::inbound::http::invites::CreateInviteRequest;
use crate::inbound::http::schemas::{
    AccountSchema, AccountSummarySchema, ErrorCodeSchema, ErrorSchema, TeamInviteSchema,
    TeamSchema,
};
use crate::inbound::http::teams::{CreateTeamRequest, EditRosterRequest};
use crate::inbound::http::users::CreateUserRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

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
                "Signed session cookie carrying the acting user id.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Team roster API",
        description = "Teams, rosters, invites and verified user accounts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::teams::create_team,
        crate::inbound::http::teams::search_teams,
        crate::inbound::http::teams::teams_by_user,
        crate::inbound::http::teams::edit_roster,
        crate::inbound::http::invites::create_invite,
        crate::inbound::http::invites::invites_by_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::search_users,
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TeamSchema,
        TeamInviteSchema,
        AccountSchema,
        AccountSummarySchema,
        ErrorSchema,
        ErrorCodeSchema,
        CreateTeamRequest,
        EditRosterRequest,
        CreateInviteRequest,
        CreateUserRequest
    )),
    tags(
        (name = "teams", description = "Teams and roster membership"),
        (name = "invites", description = "Captain-issued team invites"),
        (name = "users", description = "Account registration and search"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
