//! DTOs for decoding Riot platform responses.

use serde::Deserialize;

use crate::domain::SummonerId;

/// `GET /lol/summoner/v3/summoners/by-name/{name}` body; only the id matters.
#[derive(Debug, Deserialize)]
pub(super) struct SummonerDto {
    pub(super) id: i64,
}

impl SummonerDto {
    pub(super) fn into_summoner_id(self) -> SummonerId {
        SummonerId::new(self.id)
    }
}

/// The third-party code endpoint answers with a bare JSON string.
pub(super) type ThirdPartyCodeDto = String;
