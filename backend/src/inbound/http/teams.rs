//! Team and roster API handlers.
//!
//! ```text
//! POST /team {"name":"Alpha"}
//! GET /team/search/Al/0
//! GET /team/by-user/7
//! PUT /team {"action":"add","teamId":3,"invitee":9}
//! ```
//!
//! Writes act as the session user. `userId` in a roster edit body is
//! accepted and ignored.

use actix_web::{HttpResponse, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, RosterAction, RosterEdit, Team, TeamName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::render::render_json;
use crate::inbound::http::schemas::{ErrorSchema, TeamSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    INVITEE, TEAM_ID, USER_ID, invalid_action, parse_search_page, parse_user_id,
    team_field_error, team_id_from_raw, user_id_from_raw,
};

/// Request body for `POST /team`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTeamRequest {
    pub name: String,
}

/// Request body for `PUT /team`.
///
/// Example JSON:
/// `{"action":"remove","teamId":3}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditRosterRequest {
    /// `add` or `remove`.
    pub action: String,
    pub team_id: i64,
    /// The user to add; must be the caller.
    #[serde(default)]
    pub invitee: Option<i64>,
    /// Ignored; the session names the caller.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl TryFrom<EditRosterRequest> for RosterEdit {
    type Error = Error;

    fn try_from(value: EditRosterRequest) -> Result<Self, Self::Error> {
        let action = value
            .action
            .parse::<RosterAction>()
            .map_err(|_| invalid_action(&value.action))?;
        let team_id = team_id_from_raw(value.team_id, TEAM_ID)?;
        let requested_member = value
            .invitee
            .map(|raw| user_id_from_raw(raw, INVITEE))
            .transpose()?;
        Ok(Self {
            action,
            team_id,
            requested_member,
        })
    }
}

/// Create a team captained by the session user.
///
/// The captain is placed on the roster in the same write.
#[utoipa::path(
    post,
    path = "/team",
    request_body = CreateTeamRequest,
    responses(
        (status = 200, description = "Team created", body = TeamSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 404, description = "Captain account not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "createTeam"
)]
#[post("/team")]
pub async fn create_team(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateTeamRequest>,
) -> ApiResult<web::Json<Team>> {
    let acting_user = session.require_user_id()?;
    let name = TeamName::new(payload.into_inner().name).map_err(team_field_error)?;
    let team = state.teams.create_team(name, acting_user).await?;
    Ok(web::Json(team))
}

/// Search teams by name prefix, ten per page.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use team_roster::inbound::http::teams::search_teams;
///
/// let app = App::new().service(search_teams);
/// ```
#[utoipa::path(
    get,
    path = "/team/search/{value}/{offset}",
    params(
        ("value" = String, Path, description = "Case-sensitive name prefix; may be empty"),
        ("offset" = u32, Path, description = "Number of matches to skip")
    ),
    responses(
        (status = 200, description = "Matching teams ordered by id", body = [TeamSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Response could not be rendered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "searchTeams",
    security([])
)]
#[get("/team/search/{value:[^/]*}/{offset}")]
pub async fn search_teams(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (value, offset) = path.into_inner();
    let page = parse_search_page(value, &offset)?;
    let teams = state.teams_query.search_teams(page).await?;
    render_json(&teams)
}

/// List the teams whose roster includes a user.
#[utoipa::path(
    get,
    path = "/team/by-user/{userID}",
    params(("userID" = i64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Teams the user belongs to", body = [TeamSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Response could not be rendered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "teamsByUser",
    security([])
)]
#[get("/team/by-user/{userID}")]
pub async fn teams_by_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path.into_inner(), USER_ID)?;
    let teams = state.teams_query.teams_for_user(user_id).await?;
    render_json(&teams)
}

/// Join or leave a team as the session user.
///
/// `add` requires `invitee` to equal the caller. `remove` always removes the
/// caller, and is refused for the captain.
#[utoipa::path(
    put,
    path = "/team",
    request_body = EditRosterRequest,
    responses(
        (status = 200, description = "Team after the edit", body = TeamSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Not the intended user", body = ErrorSchema),
        (status = 404, description = "Team not found", body = ErrorSchema),
        (status = 409, description = "Captain cannot leave or already a member", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["teams"],
    operation_id = "editRoster"
)]
#[put("/team")]
pub async fn edit_roster(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<EditRosterRequest>,
) -> ApiResult<web::Json<Team>> {
    let acting_user = session.require_user_id()?;
    let edit = RosterEdit::try_from(payload.into_inner())?;
    let team = state.teams.edit_roster(edit, acting_user).await?;
    Ok(web::Json(team))
}

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;
