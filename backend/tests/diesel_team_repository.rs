//! Integration tests for `DieselTeamRepository` against embedded PostgreSQL.
//!
//! Each check-then-act port call must commit or roll back as a unit, so these
//! tests inspect the tables directly after each call.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use team_roster::domain::ports::{InviteIssue, TeamRepository, TeamRepositoryError};
use team_roster::domain::{NewTeam, RosterMutation, TeamName, UserId};
use team_roster::outbound::persistence::{
    DbPool, DieselTeamRepository, PoolConfig, run_pending_migrations,
};
use tokio::runtime::Runtime;

#[path = "support/pg_embed.rs"]
mod pg_embed;

use pg_embed::{format_postgres_error, handle_cluster_setup_failure, reset_database, test_cluster};

const TEST_DB: &str = "diesel_team_repository_test";

struct TestContext {
    runtime: Runtime,
    _cluster: TestCluster,
    repository: DieselTeamRepository,
    database_url: String,
    captain: UserId,
    player: UserId,
}

impl TestContext {
    fn client(&self) -> Client {
        Client::connect(&self.database_url, NoTls).expect("connect to test database")
    }

    fn count(&self, sql: &str) -> i64 {
        self.client()
            .query_one(sql, &[])
            .expect("count query")
            .get(0)
    }

    fn new_team(&self, name: &str) -> NewTeam {
        NewTeam {
            name: TeamName::new(name).expect("valid team name"),
            captain: self.captain,
        }
    }
}

fn seed_account(client: &mut Client, username: &str, summoner_id: i64) -> Result<UserId, String> {
    let row = client
        .query_one(
            concat!(
                "INSERT INTO account (username, password, email, summoner_id) ",
                "VALUES ($1, 'digest', $2, $3) RETURNING id"
            ),
            &[&username, &format!("{username}@example.com"), &summoner_id],
        )
        .map_err(|err| format_postgres_error(&err))?;
    UserId::new(row.get(0)).map_err(|err| err.to_string())
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    reset_database(&cluster, TEST_DB)?;
    let database_url = cluster.connection().database_url(TEST_DB);
    run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let mut client =
        Client::connect(&database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let captain = seed_account(&mut client, "captain", 101)?;
    let player = seed_account(&mut client, "player", 202)?;

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        _cluster: cluster,
        repository: DieselTeamRepository::new(pool),
        database_url,
        captain,
        player,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[rstest]
fn creating_a_team_rosters_its_captain(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: creating_a_team_rosters_its_captain skipped");
        return;
    };
    let repository = context.repository.clone();
    let new_team = context.new_team("Alpha");

    let team = context
        .runtime
        .block_on(async { repository.create_team(&new_team).await })
        .expect("create team");
    assert_eq!(team.name().as_ref(), "Alpha");
    assert_eq!(team.captain(), context.captain);

    let roster = context
        .runtime
        .block_on(async { repository.roster(team.id()).await })
        .expect("load roster");
    assert_eq!(roster, vec![context.captain]);

    let teams = context
        .runtime
        .block_on(async { repository.teams_for_member(context.captain).await })
        .expect("teams for captain");
    assert_eq!(teams, vec![team]);
}

#[rstest]
fn failed_roster_insert_leaves_no_team_behind(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: failed_roster_insert_leaves_no_team_behind skipped");
        return;
    };
    context
        .client()
        .batch_execute("ALTER TABLE roster ADD CONSTRAINT roster_rejects_all CHECK (user_id < 0)")
        .expect("install failing roster constraint");
    let repository = context.repository.clone();
    let new_team = context.new_team("Ghosts");

    let error = context
        .runtime
        .block_on(async { repository.create_team(&new_team).await })
        .expect_err("roster insert should fail");

    assert!(matches!(error, TeamRepositoryError::Query { .. }));
    assert_eq!(context.count("SELECT count(*) FROM team"), 0);
    assert_eq!(context.count("SELECT count(*) FROM roster"), 0);
}

#[rstest]
fn captains_cannot_be_removed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: captains_cannot_be_removed skipped");
        return;
    };
    let repository = context.repository.clone();
    let new_team = context.new_team("Alpha");

    let outcome = context.runtime.block_on(async {
        let team = repository.create_team(&new_team).await?;
        repository.remove_member(team.id(), context.captain).await
    });

    assert_eq!(outcome.expect("remove call"), RosterMutation::CaptainProtected);
    assert_eq!(context.count("SELECT count(*) FROM roster"), 1);
}

#[rstest]
fn non_captain_invites_write_nothing(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: non_captain_invites_write_nothing skipped");
        return;
    };
    let repository = context.repository.clone();
    let new_team = context.new_team("Alpha");

    let (issue, invites) = context
        .runtime
        .block_on(async {
            let team = repository.create_team(&new_team).await?;
            let issue = repository
                .create_invite(team.id(), context.player, context.player)
                .await?;
            let invites = repository.invites_for_user(context.player).await?;
            Ok::<_, TeamRepositoryError>((issue, invites))
        })
        .expect("invite calls");

    assert_eq!(issue, InviteIssue::NotCaptain);
    assert!(invites.is_empty());
    assert_eq!(context.count("SELECT count(*) FROM team_invite"), 0);
}

#[rstest]
fn captain_invites_carry_the_team_name(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: captain_invites_carry_the_team_name skipped");
        return;
    };
    let repository = context.repository.clone();
    let new_team = context.new_team("Alpha");

    let (issue, invites) = context
        .runtime
        .block_on(async {
            let team = repository.create_team(&new_team).await?;
            let issue = repository
                .create_invite(team.id(), context.player, context.captain)
                .await?;
            let invites = repository.invites_for_user(context.player).await?;
            Ok::<_, TeamRepositoryError>((issue, invites))
        })
        .expect("invite calls");

    assert!(matches!(issue, InviteIssue::Issued(_)));
    let [invite] = invites.as_slice() else {
        panic!("expected one invite, got {invites:?}");
    };
    assert_eq!(invite.invitee(), context.player);
    assert_eq!(
        invite.team_name().map(AsRef::<str>::as_ref),
        Some("Alpha")
    );
}

#[rstest]
fn joining_twice_reports_a_duplicate(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: joining_twice_reports_a_duplicate skipped");
        return;
    };
    let repository = context.repository.clone();
    let new_team = context.new_team("Alpha");

    let (first, second) = context.runtime.block_on(async {
        let team = repository
            .create_team(&new_team)
            .await
            .expect("create team");
        let first = repository.add_member(team.id(), context.player).await;
        let second = repository.add_member(team.id(), context.player).await;
        (first, second)
    });

    assert_eq!(first.expect("first join"), RosterMutation::Joined);
    assert!(matches!(second, Err(TeamRepositoryError::Duplicate { .. })));
    assert_eq!(context.count("SELECT count(*) FROM roster"), 2);
}
