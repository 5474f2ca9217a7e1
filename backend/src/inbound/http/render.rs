//! JSON rendering and body-parsing helpers shared by the HTTP handlers.
//!
//! List responses are serialised here rather than through `web::Json` so a
//! serialisation failure surfaces as `render_failed` (422) with the usual
//! error envelope instead of a bare 500.

use actix_web::error::JsonPayloadError;
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;
use crate::inbound::http::ApiResult;

/// Serialise `value` into a `200 OK` JSON response.
///
/// # Examples
/// ```
/// use team_roster::inbound::http::render::render_json;
///
/// let response = render_json(&vec!["Alpha", "Bravo"]).expect("renders");
/// assert!(response.status().is_success());
/// ```
pub fn render_json<T>(value: &T) -> ApiResult<HttpResponse>
where
    T: Serialize + ?Sized,
{
    let body = serde_json::to_vec(value)
        .map_err(|err| Error::render_failed(format!("failed to render response: {err}")))?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .body(body))
}

fn payload_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request("request body is not valid JSON for this operation")
        .with_details(json!({ "code": "invalid_body", "reason": err.to_string() }))
        .into()
}

/// JSON extractor configuration that reports malformed bodies with the
/// shared error envelope.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(payload_error)
}
