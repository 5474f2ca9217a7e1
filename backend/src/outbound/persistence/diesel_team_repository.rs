//! PostgreSQL-backed team repository.
//!
//! Roster mutations and invite issuance lock the team row first (`FOR
//! UPDATE` when the captain check guards a delete, `FOR SHARE` otherwise)
//! so the captain check and the write commit together.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{InviteIssue, TeamRepository, TeamRepositoryError};
use crate::domain::{NewTeam, RosterMutation, SearchPage, Team, TeamId, TeamInvite, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{InviteWithTeamRow, NewTeamInviteRow, NewTeamRow, RosterRow, TeamRow};
use super::pool::{DbPool, PoolError};
use super::schema::{roster, team, team_invite};

/// Diesel-backed implementation of [`TeamRepository`].
#[derive(Clone)]
pub struct DieselTeamRepository {
    pool: DbPool,
}

impl DieselTeamRepository {
    /// Create a repository over the shared pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use team_roster::outbound::persistence::{DbPool, DieselTeamRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/roster")).await?;
    /// let repository = DieselTeamRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> TeamRepositoryError {
    TeamRepositoryError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> TeamRepositoryError {
    match classify_diesel_error(error) {
        DieselFailure::Connection(message) => TeamRepositoryError::connection(message),
        DieselFailure::UniqueViolation(constraint) => TeamRepositoryError::duplicate(constraint),
        DieselFailure::ForeignKeyViolation(constraint) => {
            TeamRepositoryError::missing_reference(constraint)
        }
        DieselFailure::Query(message) => TeamRepositoryError::query(message),
    }
}

fn team_from_row(row: TeamRow) -> Result<Team, TeamRepositoryError> {
    Team::try_from(row).map_err(TeamRepositoryError::query)
}

fn teams_from_rows(rows: Vec<TeamRow>) -> Result<Vec<Team>, TeamRepositoryError> {
    rows.into_iter().map(team_from_row).collect()
}

#[async_trait]
impl TeamRepository for DieselTeamRepository {
    async fn create_team(&self, new_team: &NewTeam) -> Result<Team, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTeamRow {
            name: new_team.name.as_ref(),
            captain: new_team.captain.get(),
        };

        let created = conn
            .transaction(|conn| {
                async move {
                    let created: TeamRow = diesel::insert_into(team::table)
                        .values(&row)
                        .returning(TeamRow::as_returning())
                        .get_result(conn)
                        .await?;

                    diesel::insert_into(roster::table)
                        .values(&RosterRow {
                            team_id: created.id,
                            user_id: created.captain,
                        })
                        .execute(conn)
                        .await?;

                    Ok(created)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        team_from_row(created)
    }

    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<TeamRow> = team::table
            .find(team_id.get())
            .select(TeamRow::as_select())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(team_from_row).transpose()
    }

    async fn is_captain(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<bool, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::select(diesel::dsl::exists(
            team::table
                .filter(team::id.eq(team_id.get()))
                .filter(team::captain.eq(user_id.get())),
        ))
        .get_result(&mut conn)
        .await
        .map_err(map_diesel_error)
    }

    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = RosterRow {
            team_id: team_id.get(),
            user_id: user_id.get(),
        };

        conn.transaction(|conn| {
            async move {
                let locked: Option<i64> = team::table
                    .find(row.team_id)
                    .select(team::id)
                    .for_share()
                    .get_result(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(RosterMutation::TeamMissing);
                }

                diesel::insert_into(roster::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(RosterMutation::Joined)
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn remove_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (team_key, user_key) = (team_id.get(), user_id.get());

        conn.transaction(|conn| {
            async move {
                let captain: Option<i64> = team::table
                    .find(team_key)
                    .select(team::captain)
                    .for_update()
                    .get_result(conn)
                    .await
                    .optional()?;
                let Some(captain) = captain else {
                    return Ok(RosterMutation::TeamMissing);
                };
                if captain == user_key {
                    return Ok(RosterMutation::CaptainProtected);
                }

                let deleted = diesel::delete(
                    roster::table
                        .filter(roster::team_id.eq(team_key))
                        .filter(roster::user_id.eq(user_key)),
                )
                .execute(conn)
                .await?;
                Ok(if deleted == 0 {
                    RosterMutation::NotMember
                } else {
                    RosterMutation::Left
                })
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn create_invite(
        &self,
        team_id: TeamId,
        invitee: UserId,
        issued_by: UserId,
    ) -> Result<InviteIssue, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewTeamInviteRow {
            team_id: team_id.get(),
            invitee: invitee.get(),
        };
        let issuer = issued_by.get();

        conn.transaction(|conn| {
            async move {
                let captain: Option<i64> = team::table
                    .find(row.team_id)
                    .select(team::captain)
                    .for_share()
                    .get_result(conn)
                    .await
                    .optional()?;
                match captain {
                    None => return Ok(InviteIssue::TeamMissing),
                    Some(captain) if captain != issuer => return Ok(InviteIssue::NotCaptain),
                    Some(_) => {}
                }

                diesel::insert_into(team_invite::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(InviteIssue::Issued(TeamInvite::new(team_id, invitee)))
            }
            .scope_boxed()
        })
        .await
        .map_err(map_diesel_error)
    }

    async fn search_by_name(&self, page: &SearchPage) -> Result<Vec<Team>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TeamRow> = team::table
            .filter(team::name.like(page.like_pattern()))
            .select(TeamRow::as_select())
            .order_by(team::id.asc())
            .limit(page.limit())
            .offset(page.offset())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        teams_from_rows(rows)
    }

    async fn teams_for_member(&self, user_id: UserId) -> Result<Vec<Team>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<TeamRow> = team::table
            .inner_join(roster::table)
            .filter(roster::user_id.eq(user_id.get()))
            .select(TeamRow::as_select())
            .order_by(team::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        teams_from_rows(rows)
    }

    async fn invites_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TeamInvite>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<InviteWithTeamRow> = team_invite::table
            .inner_join(team::table)
            .filter(team_invite::invitee.eq(user_id.get()))
            .select((team_invite::team_id, team_invite::invitee, team::name))
            .order_by(team_invite::id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| TeamInvite::try_from(row).map_err(TeamRepositoryError::query))
            .collect()
    }

    async fn roster(&self, team_id: TeamId) -> Result<Vec<UserId>, TeamRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let members: Vec<i64> = roster::table
            .filter(roster::team_id.eq(team_id.get()))
            .select(roster::user_id)
            .order_by(roster::user_id.asc())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        members
            .into_iter()
            .map(|raw| {
                UserId::new(raw)
                    .map_err(|err| TeamRepositoryError::query(format!("roster.user_id: {err}")))
            })
            .collect()
    }
}
