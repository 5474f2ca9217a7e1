//! Domain-level error type.
//!
//! Errors are transport agnostic: each carries a stable [`ErrorCode`], a
//! human-readable message, optional structured details and the trace id of
//! the request that produced it. The HTTP adapter decides how a code maps to
//! a status line.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::TraceId;

/// Stable machine-readable failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Malformed or missing input; no domain logic was reached.
    InvalidRequest,
    /// No acting identity accompanies the request.
    Unauthorized,
    /// The acting identity may not perform the requested operation.
    Forbidden,
    /// The operation would break a roster invariant.
    PolicyViolation,
    /// A referenced record does not exist.
    NotFound,
    /// The store rejected the write because of a uniqueness constraint.
    Conflict,
    /// The identity provider rejected the supplied proof.
    VerificationFailed,
    /// The identity provider could not be reached.
    VerificationUnavailable,
    /// The response could not be serialised.
    RenderFailed,
    /// The store is temporarily unreachable.
    ServiceUnavailable,
    /// Any other failure; the message is redacted at the edge.
    InternalError,
}

/// Failure surfaced to callers of the domain services.
///
/// ## Invariants
/// - `message` is non-empty once trimmed.
///
/// # Examples
/// ```
/// use team_roster::domain::{Error, ErrorCode};
///
/// let err = Error::policy_violation("captain cannot leave team");
/// assert_eq!(err.code(), ErrorCode::PolicyViolation);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "ErrorDto", into = "ErrorDto")]
pub struct Error {
    code: ErrorCode,
    message: String,
    details: Option<Value>,
    trace_id: Option<String>,
}

/// Raised when an [`Error`] would be built with a blank message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("error message must not be empty")]
pub struct EmptyErrorMessage;

impl Error {
    /// Build an error, capturing the current trace id when one is in scope.
    ///
    /// Blank messages are replaced by the code's snake-case name so an error
    /// can always be produced.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            fallback_message(code).to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Fallible constructor rejecting blank messages.
    pub fn try_new(code: ErrorCode, message: impl Into<String>) -> Result<Self, EmptyErrorMessage> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(EmptyErrorMessage);
        }
        Ok(Self::new(code, message))
    }

    /// Stable machine-readable code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured context for clients, if any.
    #[must_use]
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace id of the request that raised the error.
    #[must_use]
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Attach structured details.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Override the captured trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::Unauthorized`].
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Shorthand for [`ErrorCode::Forbidden`].
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// Shorthand for [`ErrorCode::PolicyViolation`].
    pub fn policy_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PolicyViolation, message)
    }

    /// Shorthand for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Shorthand for [`ErrorCode::Conflict`].
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Shorthand for [`ErrorCode::VerificationFailed`].
    pub fn verification_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VerificationFailed, message)
    }

    /// Shorthand for [`ErrorCode::VerificationUnavailable`].
    pub fn verification_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::VerificationUnavailable, message)
    }

    /// Shorthand for [`ErrorCode::RenderFailed`].
    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::RenderFailed, message)
    }

    /// Shorthand for [`ErrorCode::ServiceUnavailable`].
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

fn fallback_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "invalid request",
        ErrorCode::Unauthorized => "unauthorized",
        ErrorCode::Forbidden => "forbidden",
        ErrorCode::PolicyViolation => "policy violation",
        ErrorCode::NotFound => "not found",
        ErrorCode::Conflict => "conflict",
        ErrorCode::VerificationFailed => "verification failed",
        ErrorCode::VerificationUnavailable => "verification unavailable",
        ErrorCode::RenderFailed => "render failed",
        ErrorCode::ServiceUnavailable => "service unavailable",
        ErrorCode::InternalError => "internal error",
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for Error {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorDto {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl From<Error> for ErrorDto {
    fn from(value: Error) -> Self {
        let Error {
            code,
            message,
            details,
            trace_id,
        } = value;
        Self {
            code,
            message,
            details,
            trace_id,
        }
    }
}

impl TryFrom<ErrorDto> for Error {
    type Error = EmptyErrorMessage;

    fn try_from(value: ErrorDto) -> Result<Self, Self::Error> {
        let ErrorDto {
            code,
            message,
            details,
            trace_id,
        } = value;
        if message.trim().is_empty() {
            return Err(EmptyErrorMessage);
        }
        Ok(Self {
            code,
            message,
            details,
            trace_id,
        })
    }
}
