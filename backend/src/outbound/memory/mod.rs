//! Process-local store implementing the account and team repository ports.
//!
//! Used when no database URL is configured and by the integration tests.
//! Password hashes are not retained. Every port call holds the table lock
//! for its whole duration, so check-then-act sequences are as atomic here as
//! under a PostgreSQL row lock. Constraint names mirror the migration.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    AccountRepository, AccountRepositoryError, InviteIssue, TeamRepository, TeamRepositoryError,
};
use crate::domain::{
    Account, AccountSummary, NewAccount, NewTeam, RosterMutation, SearchPage, Team, TeamId,
    TeamInvite, UserId,
};

#[derive(Debug, Default)]
struct Tables {
    accounts: BTreeMap<i64, Account>,
    teams: BTreeMap<i64, Team>,
    roster: BTreeSet<(i64, i64)>,
    invites: Vec<(TeamId, UserId)>,
    next_account_id: i64,
    next_team_id: i64,
}

impl Tables {
    fn allocate_account_id(&mut self) -> i64 {
        self.next_account_id += 1;
        self.next_account_id
    }

    fn allocate_team_id(&mut self) -> i64 {
        self.next_team_id += 1;
        self.next_team_id
    }

    fn account_exists(&self, user_id: UserId) -> bool {
        self.accounts.contains_key(&user_id.get())
    }
}

/// In-memory implementation of [`TeamRepository`] and [`AccountRepository`].
///
/// Clones share the same tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRosterStore {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryRosterStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn id_error(column: &str, err: impl std::fmt::Display) -> String {
    format!("{column}: {err}")
}

#[async_trait]
impl AccountRepository for InMemoryRosterStore {
    async fn create(&self, new_account: &NewAccount) -> Result<Account, AccountRepositoryError> {
        let mut tables = self.tables.lock().await;
        let taken = tables
            .accounts
            .values()
            .any(|account| account.username() == &new_account.username);
        if taken {
            return Err(AccountRepositoryError::duplicate("account_username_key"));
        }

        let raw_id = tables.allocate_account_id();
        let id = UserId::new(raw_id)
            .map_err(|err| AccountRepositoryError::query(id_error("account.id", err)))?;
        let account = Account::new(
            id,
            new_account.username.clone(),
            new_account.email.clone(),
            new_account.summoner_id,
        );
        tables.accounts.insert(raw_id, account.clone());
        Ok(account)
    }

    async fn search_by_username(
        &self,
        page: &SearchPage,
    ) -> Result<Vec<AccountSummary>, AccountRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .accounts
            .values()
            .filter(|account| page.matches(account.username().as_ref()))
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .cloned()
            .map(AccountSummary::from)
            .collect())
    }
}

#[async_trait]
impl TeamRepository for InMemoryRosterStore {
    async fn create_team(&self, new_team: &NewTeam) -> Result<Team, TeamRepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.account_exists(new_team.captain) {
            return Err(TeamRepositoryError::missing_reference("team_captain_fkey"));
        }

        let raw_id = tables.allocate_team_id();
        let id = TeamId::new(raw_id)
            .map_err(|err| TeamRepositoryError::query(id_error("team.id", err)))?;
        let team = Team::new(id, new_team.name.clone(), new_team.captain);
        tables.teams.insert(raw_id, team.clone());
        tables.roster.insert((raw_id, new_team.captain.get()));
        Ok(team)
    }

    async fn find_team(&self, team_id: TeamId) -> Result<Option<Team>, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables.teams.get(&team_id.get()).cloned())
    }

    async fn is_captain(
        &self,
        user_id: UserId,
        team_id: TeamId,
    ) -> Result<bool, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .teams
            .get(&team_id.get())
            .is_some_and(|team| team.is_captained_by(user_id)))
    }

    async fn add_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError> {
        let mut tables = self.tables.lock().await;
        if !tables.teams.contains_key(&team_id.get()) {
            return Ok(RosterMutation::TeamMissing);
        }
        if !tables.account_exists(user_id) {
            return Err(TeamRepositoryError::missing_reference("roster_user_id_fkey"));
        }
        if !tables.roster.insert((team_id.get(), user_id.get())) {
            return Err(TeamRepositoryError::duplicate("roster_pkey"));
        }
        Ok(RosterMutation::Joined)
    }

    async fn remove_member(
        &self,
        team_id: TeamId,
        user_id: UserId,
    ) -> Result<RosterMutation, TeamRepositoryError> {
        let mut tables = self.tables.lock().await;
        let Some(team) = tables.teams.get(&team_id.get()) else {
            return Ok(RosterMutation::TeamMissing);
        };
        if team.is_captained_by(user_id) {
            return Ok(RosterMutation::CaptainProtected);
        }
        Ok(if tables.roster.remove(&(team_id.get(), user_id.get())) {
            RosterMutation::Left
        } else {
            RosterMutation::NotMember
        })
    }

    async fn create_invite(
        &self,
        team_id: TeamId,
        invitee: UserId,
        issued_by: UserId,
    ) -> Result<InviteIssue, TeamRepositoryError> {
        let mut tables = self.tables.lock().await;
        match tables.teams.get(&team_id.get()) {
            None => return Ok(InviteIssue::TeamMissing),
            Some(team) if !team.is_captained_by(issued_by) => return Ok(InviteIssue::NotCaptain),
            Some(_) => {}
        }
        if !tables.account_exists(invitee) {
            return Err(TeamRepositoryError::missing_reference(
                "team_invite_invitee_fkey",
            ));
        }
        tables.invites.push((team_id, invitee));
        Ok(InviteIssue::Issued(TeamInvite::new(team_id, invitee)))
    }

    async fn search_by_name(&self, page: &SearchPage) -> Result<Vec<Team>, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .teams
            .values()
            .filter(|team| page.matches(team.name().as_ref()))
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn teams_for_member(&self, user_id: UserId) -> Result<Vec<Team>, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .teams
            .values()
            .filter(|team| tables.roster.contains(&(team.id().get(), user_id.get())))
            .cloned()
            .collect())
    }

    async fn invites_for_user(
        &self,
        user_id: UserId,
    ) -> Result<Vec<TeamInvite>, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        tables
            .invites
            .iter()
            .filter(|(_, invitee)| *invitee == user_id)
            .map(|&(team_id, invitee)| {
                let team = tables.teams.get(&team_id.get()).ok_or_else(|| {
                    TeamRepositoryError::query(format!("invite references missing team {team_id}"))
                })?;
                Ok(TeamInvite::new(team_id, invitee).with_team_name(team.name().clone()))
            })
            .collect()
    }

    async fn roster(&self, team_id: TeamId) -> Result<Vec<UserId>, TeamRepositoryError> {
        let tables = self.tables.lock().await;
        tables
            .roster
            .range((team_id.get(), i64::MIN)..=(team_id.get(), i64::MAX))
            .map(|&(_, user)| {
                UserId::new(user)
                    .map_err(|err| TeamRepositoryError::query(id_error("roster.user_id", err)))
            })
            .collect()
    }
}
