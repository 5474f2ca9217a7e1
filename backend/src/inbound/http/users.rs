//! User API handlers.
//!
//! ```text
//! POST /user {"username":"faker","password":"hunter22","email":"f@t1.gg","summonerName":"Faker","code":"abc"}
//! GET /user/search/fa/0
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AccountRegistration;
use crate::domain::{Account, Email, Error, Password, SummonerClaim, Username};
use crate::inbound::http::ApiResult;
use crate::inbound::http::render::render_json;
use crate::inbound::http::schemas::{AccountSchema, AccountSummarySchema, ErrorSchema};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{account_field_error, parse_search_page, password_error};

/// Registration body for `POST /user`.
///
/// Example JSON:
/// `{"username":"faker","password":"hunter22","email":"f@t1.gg","summonerName":"Faker","code":"abc"}`
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    /// In-game display name to verify.
    pub summoner_name: String,
    /// One-time code the player set on their game client.
    pub code: String,
}

impl TryFrom<CreateUserRequest> for AccountRegistration {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let CreateUserRequest {
            username,
            password,
            email,
            summoner_name,
            code,
        } = value;
        Ok(Self {
            username: Username::new(username).map_err(account_field_error)?,
            password: Password::new(password).map_err(password_error)?,
            email: Email::new(email).map_err(account_field_error)?,
            claim: SummonerClaim::new(summoner_name, code).map_err(account_field_error)?,
        })
    }
}

/// Register an account after verifying the summoner claim.
///
/// Nothing is stored when verification fails. On success the session cookie
/// is issued for the new account.
#[utoipa::path(
    post,
    path = "/user",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Account created", body = AccountSchema,
            headers(("Set-Cookie" = String, description = "Session cookie for the new account"))),
        (status = 400, description = "Invalid request or verification failed", body = ErrorSchema),
        (status = 409, description = "Username already taken", body = ErrorSchema),
        (status = 502, description = "Identity provider unavailable", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/user")]
pub async fn create_user(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<web::Json<Account>> {
    let registration = AccountRegistration::try_from(payload.into_inner())?;
    let account = state.accounts.register(registration).await?;
    session.persist_user(account.id())?;
    Ok(web::Json(account))
}

/// Search accounts by username prefix, ten per page.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use team_roster::inbound::http::users::search_users;
///
/// let app = App::new().service(search_users);
/// ```
#[utoipa::path(
    get,
    path = "/user/search/{value}/{offset}",
    params(
        ("value" = String, Path, description = "Case-sensitive username prefix; may be empty"),
        ("offset" = u32, Path, description = "Number of matches to skip")
    ),
    responses(
        (status = 200, description = "Matching accounts ordered by id", body = [AccountSummarySchema]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 422, description = "Response could not be rendered", body = ErrorSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "searchUsers",
    security([])
)]
#[get("/user/search/{value:[^/]*}/{offset}")]
pub async fn search_users(
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (value, offset) = path.into_inner();
    let page = parse_search_page(value, &offset)?;
    let accounts = state.accounts_query.search_accounts(page).await?;
    render_json(&accounts)
}

#[cfg(test)]
mod tests;
