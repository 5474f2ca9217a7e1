//! Reqwest-backed identity verifier for the Riot platform API.
//!
//! Verification is two lookups: resolve the summoner by display name, then
//! read the third-party code the player saved in their client and compare it
//! with the code supplied at sign-up.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use super::dto::{SummonerDto, ThirdPartyCodeDto};
use crate::domain::ports::{IdentityVerificationError, IdentityVerifier};
use crate::domain::{SummonerClaim, SummonerId};

const RIOT_TOKEN_HEADER: &str = "X-Riot-Token";

/// Identity verifier that queries one Riot platform host.
pub struct RiotHttpVerifier {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl RiotHttpVerifier {
    /// Build a verifier using a reqwest client with an explicit request timeout.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use std::time::Duration;
    /// use reqwest::Url;
    /// use team_roster::outbound::identity::RiotHttpVerifier;
    ///
    /// let base = Url::parse("https://na1.api.riotgames.com").expect("valid URL");
    /// let verifier = RiotHttpVerifier::new(base, "RGAPI-key", Duration::from_secs(5));
    /// assert!(verifier.is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
        })
    }

    async fn fetch(&self, url: Url) -> Result<(StatusCode, Vec<u8>), IdentityVerificationError> {
        let response = self
            .client
            .get(url)
            .header(RIOT_TOKEN_HEADER, self.api_key.as_str())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body.to_vec()))
    }

    async fn resolve_summoner(&self, name: &str) -> Result<SummonerId, IdentityVerificationError> {
        let url = endpoint(
            &self.base_url,
            &["lol", "summoner", "v3", "summoners", "by-name", name],
        )?;
        let (status, body) = self.fetch(url).await?;
        if !status.is_success() {
            return Err(map_status_error(status, &body, || {
                IdentityVerificationError::unknown_summoner(name)
            }));
        }
        parse_summoner(&body)
    }

    async fn third_party_code(
        &self,
        summoner_id: SummonerId,
    ) -> Result<String, IdentityVerificationError> {
        let id = summoner_id.to_string();
        let url = endpoint(
            &self.base_url,
            &["lol", "platform", "v3", "third-party-code", "by-summoner", &id],
        )?;
        let (status, body) = self.fetch(url).await?;
        if !status.is_success() {
            return Err(map_status_error(
                status,
                &body,
                IdentityVerificationError::code_mismatch,
            ));
        }
        parse_code(&body)
    }
}

#[async_trait]
impl IdentityVerifier for RiotHttpVerifier {
    async fn verify(&self, claim: &SummonerClaim) -> Result<SummonerId, IdentityVerificationError> {
        let summoner_id = self.resolve_summoner(claim.summoner_name()).await?;
        let stored = self.third_party_code(summoner_id).await?;
        if stored != claim.code() {
            debug!(%summoner_id, "third-party code differs from supplied code");
            return Err(IdentityVerificationError::code_mismatch());
        }
        Ok(summoner_id)
    }
}

/// Append `segments` to the base URL, percent-encoding each one.
fn endpoint(base: &Url, segments: &[&str]) -> Result<Url, IdentityVerificationError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            IdentityVerificationError::unavailable(format!("base URL {base} cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_summoner(body: &[u8]) -> Result<SummonerId, IdentityVerificationError> {
    let decoded: SummonerDto = serde_json::from_slice(body).map_err(|error| {
        IdentityVerificationError::decode(format!("invalid summoner payload: {error}"))
    })?;
    Ok(decoded.into_summoner_id())
}

fn parse_code(body: &[u8]) -> Result<String, IdentityVerificationError> {
    serde_json::from_slice::<ThirdPartyCodeDto>(body).map_err(|error| {
        IdentityVerificationError::decode(format!("invalid third-party code payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> IdentityVerificationError {
    if error.is_timeout() {
        IdentityVerificationError::unavailable(format!("request timed out: {error}"))
    } else {
        IdentityVerificationError::unavailable(error.to_string())
    }
}

/// Not-found style statuses mean the claim is wrong; everything else means
/// the provider could not answer.
fn map_status_error(
    status: StatusCode,
    body: &[u8],
    rejected: impl FnOnce() -> IdentityVerificationError,
) -> IdentityVerificationError {
    match status {
        StatusCode::NOT_FOUND | StatusCode::BAD_REQUEST => rejected(),
        _ => {
            let preview = body_preview(body);
            let message = if preview.is_empty() {
                format!("status {}", status.as_u16())
            } else {
                format!("status {}: {}", status.as_u16(), preview)
            };
            IdentityVerificationError::unavailable(message)
        }
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 120;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "riot_http_verifier_tests.rs"]
mod tests;
