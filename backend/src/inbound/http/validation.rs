//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection is `invalid_request` with `{field, code}` details, plus
//! the offending `value` when echoing it back is safe.

use serde_json::json;

use crate::domain::{
    AccountValidationError, Error, IdValidationError, PasswordError, SearchPage,
    SearchValidationError, TeamId, TeamValidationError, UserId,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    InvalidId,
    InvalidOffset,
    InvalidAction,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::InvalidOffset => "invalid_offset",
            ErrorCode::InvalidAction => "invalid_action",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("userID");
pub(crate) const TEAM_ID: FieldName = FieldName::new("teamId");
pub(crate) const INVITEE: FieldName = FieldName::new("invitee");
pub(crate) const OFFSET: FieldName = FieldName::new("offset");
pub(crate) const ACTION: FieldName = FieldName::new("action");

fn with_value(field: FieldName, code: ErrorCode, message: String, value: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "value": value,
        "code": code.as_str(),
    }))
}

fn without_value(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn id_message(field: FieldName, err: IdValidationError) -> String {
    format!("{}: {err}", field.as_str())
}

pub(crate) fn parse_user_id(raw: &str, field: FieldName) -> Result<UserId, Error> {
    raw.parse::<UserId>()
        .map_err(|err| with_value(field, ErrorCode::InvalidId, id_message(field, err), raw))
}

pub(crate) fn user_id_from_raw(raw: i64, field: FieldName) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|err| {
        with_value(
            field,
            ErrorCode::InvalidId,
            id_message(field, err),
            &raw.to_string(),
        )
    })
}

pub(crate) fn team_id_from_raw(raw: i64, field: FieldName) -> Result<TeamId, Error> {
    TeamId::new(raw).map_err(|err| {
        with_value(
            field,
            ErrorCode::InvalidId,
            id_message(field, err),
            &raw.to_string(),
        )
    })
}

/// Parse the `{value}/{offset}` pair shared by the search routes.
pub(crate) fn parse_search_page(prefix: String, raw_offset: &str) -> Result<SearchPage, Error> {
    SearchPage::parse(prefix, raw_offset).map_err(|err: SearchValidationError| {
        with_value(OFFSET, ErrorCode::InvalidOffset, err.to_string(), raw_offset)
    })
}

pub(crate) fn invalid_action(raw: &str) -> Error {
    with_value(
        ACTION,
        ErrorCode::InvalidAction,
        "action is not valid".to_owned(),
        raw,
    )
}

pub(crate) fn team_field_error(err: TeamValidationError) -> Error {
    without_value(FieldName::new("name"), ErrorCode::InvalidValue, err.to_string())
}

pub(crate) fn account_field_error(err: AccountValidationError) -> Error {
    let field = match &err {
        AccountValidationError::EmptyUsername
        | AccountValidationError::UsernameLength { .. }
        | AccountValidationError::UsernameInvalidCharacters => "username",
        AccountValidationError::InvalidEmail | AccountValidationError::EmailTooLong { .. } => {
            "email"
        }
        AccountValidationError::EmptySummonerName => "summonerName",
        AccountValidationError::EmptyVerificationCode => "code",
    };
    without_value(FieldName::new(field), ErrorCode::InvalidValue, err.to_string())
}

/// Passwords are never echoed back.
pub(crate) fn password_error(err: PasswordError) -> Error {
    without_value(
        FieldName::new("password"),
        ErrorCode::InvalidValue,
        err.to_string(),
    )
}
