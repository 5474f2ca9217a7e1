//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration. Each wrapper mirrors the
//! JSON its domain type serialises to.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// No session user accompanies the request.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The session user may not perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The action would break a roster rule.
    #[schema(rename = "policy_violation")]
    PolicyViolation,
    /// A referenced record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[schema(rename = "conflict")]
    Conflict,
    /// The identity provider rejected the verification code.
    #[schema(rename = "verification_failed")]
    VerificationFailed,
    /// The identity provider could not be reached.
    #[schema(rename = "verification_unavailable")]
    VerificationUnavailable,
    /// The response could not be serialised.
    #[schema(rename = "render_failed")]
    RenderFailed,
    /// The store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "policy_violation")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "captain cannot leave team")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Team`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Team)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TeamSchema {
    #[schema(rename = "teamId", example = 3)]
    team_id: i64,
    #[schema(example = "Alpha")]
    name: String,
    /// Account id of the captain, always on the roster.
    #[schema(example = 7)]
    captain: i64,
}

/// OpenAPI schema for [`crate::domain::TeamInvite`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TeamInvite)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TeamInviteSchema {
    #[schema(rename = "teamId", example = 3)]
    team_id: i64,
    #[schema(example = 9)]
    invitee: i64,
    /// Present on reads.
    #[schema(rename = "teamName", example = "Alpha")]
    team_name: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Account`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Account)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccountSchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "faker")]
    username: String,
    #[schema(example = "faker@t1.gg")]
    email: String,
    /// Verified game account id.
    #[schema(rename = "summonerId", example = 4242)]
    summoner_id: i64,
}

/// OpenAPI schema for [`crate::domain::AccountSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::AccountSummary)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct AccountSummarySchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = "faker")]
    username: String,
    #[schema(rename = "summonerId", example = 4242)]
    summoner_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn error_code_schema_lists_every_code() {
        let schema_json = schema_to_json::<ErrorCodeSchema>();
        for code in [
            "invalid_request",
            "unauthorized",
            "forbidden",
            "policy_violation",
            "not_found",
            "conflict",
            "verification_failed",
            "verification_unavailable",
            "render_failed",
            "service_unavailable",
            "internal_error",
        ] {
            assert!(schema_json.contains(code), "missing {code}");
        }
    }

    #[rstest]
    #[case(ErrorSchema::name(), "crate.domain.Error")]
    #[case(TeamSchema::name(), "crate.domain.Team")]
    #[case(TeamInviteSchema::name(), "crate.domain.TeamInvite")]
    #[case(AccountSchema::name(), "crate.domain.Account")]
    #[case(AccountSummarySchema::name(), "crate.domain.AccountSummary")]
    fn schemas_are_named_after_domain_types(
        #[case] name: std::borrow::Cow<'static, str>,
        #[case] expected: &str,
    ) {
        // utoipa replaces :: with . in schema names
        assert_eq!(name, expected);
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let team = schema_to_json::<TeamSchema>();
        assert!(team.contains("teamId"), "team schema should use teamId");
        let account = schema_to_json::<AccountSchema>();
        assert!(account.contains("summonerId"));
        let error = schema_to_json::<ErrorSchema>();
        assert!(error.contains("traceId"));
    }
}
