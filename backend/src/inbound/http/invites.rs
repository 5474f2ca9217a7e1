//! Team invite API handlers.
//!
//! ```text
//! POST /team/invite {"teamId":3,"invitee":9}
//! GET /team/invite/by-user/9
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::TeamInvite;
use crate::inbound::http::ApiResult;
use crate::inbound::http::render::render_json;
use crate::inbound::http::schemas::{ErrorSchema, TeamInviteSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    INVITEE, TEAM_ID, USER_ID, parse_user_id, team_id_from_raw, user_id_from_raw,
};

/// Request body for `POST /team/invite`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub team_id: i64,
    pub invitee: i64,
}

/// Invite a user to a team captained by the session user.
#[utoipa::path(
    post,
    path = "/team/invite",
    request_body = CreateInviteRequest,
    responses(
        (status = 200, description = "Invite stored", body = TeamInviteSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Login required", body = ErrorSchema),
        (status = 403, description = "Only the captain can invite", body = ErrorSchema),
        (status = 404, description = "Team or invitee not found", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "createInvite"
)]
#[post("/team/invite")]
pub async fn create_invite(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateInviteRequest>,
) -> ApiResult<web::Json<TeamInvite>> {
    let acting_user = session.require_user_id()?;
    let CreateInviteRequest { team_id, invitee } = payload.into_inner();
    let team_id = team_id_from_raw(team_id, TEAM_ID)?;
    let invitee = user_id_from_raw(invitee, INVITEE)?;
    let invite = state
        .teams
        .create_invite(team_id, invitee, acting_user)
        .await?;
    Ok(web::Json(invite))
}

/// List pending invites addressed to a user, with team names.
#[utoipa::path(
    get,
    path = "/team/invite/by-user/{userID}",
    params(("userID" = i64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Invites for the user", body = [TeamInviteSchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Response could not be rendered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["invites"],
    operation_id = "invitesByUser",
    security([])
)]
#[get("/team/invite/by-user/{userID}")]
pub async fn invites_by_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let user_id = parse_user_id(&path.into_inner(), USER_ID)?;
    let invites = state.teams_query.invites_for_user(user_id).await?;
    render_json(&invites)
}
