//! Integration tests for `DieselProfileRepository` against embedded PostgreSQL.
//!
//! Every context owns its own cluster and a freshly migrated database seeded
//! with one user.

use pg_embedded_setup_unpriv::TestCluster;
use profile_service::domain::ports::{ProfileRepository, ProfileRepositoryError};
use profile_service::domain::{
    NewProfile, ProfileDetails, ProfileUpdate, ProfileUpsert, UserId, Username,
};
use profile_service::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::embedded_postgres::stored_username;
use support::pg_embed::test_cluster;
use support::{fresh_database, handle_cluster_setup_failure, seed_user};

struct TestContext {
    runtime: Runtime,
    repository: DieselProfileRepository,
    database_url: String,
    user_id: UserId,
    _cluster: TestCluster,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let database_url = fresh_database(&cluster)?;
    let raw_id = seed_user(&database_url, "ada")?;
    let user_id = UserId::new(raw_id).map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselProfileRepository::new(pool),
        database_url,
        user_id,
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(context) => Some(context),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn details(email: &str) -> ProfileDetails {
    ProfileDetails {
        email: Some(email.to_owned()),
        city: Some("Pune".to_owned()),
        ..ProfileDetails::default()
    }
}

#[rstest]
fn insert_then_find_projects_username(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_then_find_projects_username skipped");
        return;
    };
    let repository = context.repository.clone();
    let user_id = context.user_id;

    let created = context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id,
            details: details("a@x.com"),
        }))
        .expect("insert succeeds");
    assert_eq!(created.user.id, user_id);
    assert_eq!(created.user.username.as_str(), "ada");

    let found = context
        .runtime
        .block_on(repository.find_by_user_id(&user_id))
        .expect("query succeeds")
        .expect("profile exists");
    assert_eq!(found.profile, created.profile);
    assert_eq!(found.username.as_str(), "ada");

    let all = context
        .runtime
        .block_on(repository.list_all())
        .expect("list succeeds");
    assert_eq!(all.len(), 1);
}

#[rstest]
fn insert_reports_unknown_user_and_duplicates(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: insert_reports_unknown_user_and_duplicates skipped");
        return;
    };
    let repository = context.repository.clone();

    let stranger = UserId::new(9_999).expect("positive id");
    let unknown = context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id: stranger,
            details: ProfileDetails::default(),
        }))
        .expect_err("no such user");
    assert_eq!(unknown, ProfileRepositoryError::unknown_user(9_999_i32));

    let profile = NewProfile {
        user_id: context.user_id,
        details: details("a@x.com"),
    };
    context
        .runtime
        .block_on(repository.insert(&profile))
        .expect("first insert");
    let duplicate = context
        .runtime
        .block_on(repository.insert(&profile))
        .expect_err("second insert");
    assert_eq!(
        duplicate,
        ProfileRepositoryError::duplicate_profile(context.user_id.get())
    );
}

#[rstest]
fn upsert_inserts_then_updates_and_renames(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_inserts_then_updates_and_renames skipped");
        return;
    };
    let repository = context.repository.clone();
    let user_id = context.user_id;

    let first = context
        .runtime
        .block_on(repository.upsert(&ProfileUpsert {
            user_id,
            username: None,
            details: details("a@x.com"),
        }))
        .expect("insert branch");
    assert_eq!(first.username.as_str(), "ada");

    let second = context
        .runtime
        .block_on(repository.upsert(&ProfileUpsert {
            user_id,
            username: Some(Username::new("lovelace").expect("valid username")),
            details: details("b@x.com"),
        }))
        .expect("update branch");
    assert_eq!(second.profile.id, first.profile.id);
    assert_eq!(second.profile.details.email.as_deref(), Some("b@x.com"));
    assert_eq!(second.username.as_str(), "lovelace");
    assert_eq!(
        stored_username(&context.database_url, user_id.get()).expect("read back"),
        "lovelace"
    );
}

#[rstest]
fn upsert_reports_taken_username(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_reports_taken_username skipped");
        return;
    };
    seed_user(&context.database_url, "grace").expect("second user");
    let repository = context.repository.clone();
    let user_id = context.user_id;

    context
        .runtime
        .block_on(repository.upsert(&ProfileUpsert {
            user_id,
            username: None,
            details: ProfileDetails::default(),
        }))
        .expect("insert branch");
    let error = context
        .runtime
        .block_on(repository.upsert(&ProfileUpsert {
            user_id,
            username: Some(Username::new("grace").expect("valid username")),
            details: ProfileDetails::default(),
        }))
        .expect_err("username belongs to someone else");

    assert_eq!(error, ProfileRepositoryError::username_taken("grace"));
    assert_eq!(
        stored_username(&context.database_url, user_id.get()).expect("read back"),
        "ada"
    );
}

#[rstest]
fn update_keeps_unset_fields(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_keeps_unset_fields skipped");
        return;
    };
    let repository = context.repository.clone();
    let user_id = context.user_id;

    let missing = context
        .runtime
        .block_on(repository.update(&user_id, &ProfileUpdate::default()))
        .expect("query succeeds");
    assert!(missing.is_none());

    context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id,
            details: details("a@x.com"),
        }))
        .expect("insert");
    let updated = context
        .runtime
        .block_on(repository.update(
            &user_id,
            &ProfileUpdate {
                username: None,
                details: ProfileDetails {
                    country: Some("IN".to_owned()),
                    ..ProfileDetails::default()
                },
            },
        ))
        .expect("update succeeds")
        .expect("profile exists");

    assert_eq!(updated.profile.details.email.as_deref(), Some("a@x.com"));
    assert_eq!(updated.profile.details.city.as_deref(), Some("Pune"));
    assert_eq!(updated.profile.details.country.as_deref(), Some("IN"));
    assert_eq!(updated.user.username.as_str(), "ada");
    assert!(updated.profile.updated_at >= updated.profile.created_at);
}

#[rstest]
fn delete_returns_row_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: delete_returns_row_once skipped");
        return;
    };
    let repository = context.repository.clone();
    let user_id = context.user_id;

    let created = context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id,
            details: details("a@x.com"),
        }))
        .expect("insert");
    let removed = context
        .runtime
        .block_on(repository.delete_by_user_id(&user_id))
        .expect("delete succeeds");
    assert_eq!(removed, Some(created.profile));

    let again = context
        .runtime
        .block_on(repository.delete_by_user_id(&user_id))
        .expect("delete succeeds");
    assert!(again.is_none());
}

#[rstest]
fn concurrent_first_upserts_both_succeed(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: concurrent_first_upserts_both_succeed skipped");
        return;
    };

    for round in 0..10 {
        let raw_id = seed_user(&context.database_url, &format!("racer-{round}"))
            .expect("seed racing user");
        let user_id = UserId::new(raw_id).expect("positive id");
        let upsert = ProfileUpsert {
            user_id,
            username: None,
            details: details("race@x.com"),
        };
        let left = context.repository.clone();
        let right = context.repository.clone();

        let (first, second) = context.runtime.block_on(async {
            let left_upsert = upsert.clone();
            let right_upsert = upsert.clone();
            let left_task = tokio::spawn(async move { left.upsert(&left_upsert).await });
            let right_task = tokio::spawn(async move { right.upsert(&right_upsert).await });
            (
                left_task.await.expect("left task joins"),
                right_task.await.expect("right task joins"),
            )
        });

        let first = first.expect("first upsert succeeds");
        let second = second.expect("second upsert succeeds");
        assert_eq!(first.profile.id, second.profile.id, "round {round}");
    }
}

#[rstest]
fn upsert_for_unknown_user_reports_unknown_user(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: upsert_for_unknown_user_reports_unknown_user skipped");
        return;
    };
    let repository = context.repository.clone();

    let error = context
        .runtime
        .block_on(repository.upsert(&ProfileUpsert {
            user_id: UserId::new(9_999).expect("positive id"),
            username: None,
            details: details("a@x.com"),
        }))
        .expect_err("no such user");

    assert_eq!(error, ProfileRepositoryError::unknown_user(9_999_i32));
}

#[rstest]
fn update_with_username_renames_owner(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_with_username_renames_owner skipped");
        return;
    };
    let repository = context.repository.clone();
    let user_id = context.user_id;

    context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id,
            details: details("a@x.com"),
        }))
        .expect("insert");
    let updated = context
        .runtime
        .block_on(repository.update(
            &user_id,
            &ProfileUpdate {
                username: Some(Username::new("lovelace").expect("valid username")),
                details: ProfileDetails::default(),
            },
        ))
        .expect("update succeeds")
        .expect("profile exists");

    assert_eq!(updated.user.username.as_str(), "lovelace");
    assert_eq!(
        stored_username(&context.database_url, user_id.get()).expect("read back"),
        "lovelace"
    );
}

#[rstest]
fn update_with_taken_username_rolls_back(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: update_with_taken_username_rolls_back skipped");
        return;
    };
    seed_user(&context.database_url, "grace").expect("second user");
    let repository = context.repository.clone();
    let user_id = context.user_id;

    context
        .runtime
        .block_on(repository.insert(&NewProfile {
            user_id,
            details: details("a@x.com"),
        }))
        .expect("insert");
    let error = context
        .runtime
        .block_on(repository.update(
            &user_id,
            &ProfileUpdate {
                username: Some(Username::new("grace").expect("valid username")),
                details: email_only_details("b@x.com"),
            },
        ))
        .expect_err("username belongs to someone else");
    assert_eq!(error, ProfileRepositoryError::username_taken("grace"));

    let stored = context
        .runtime
        .block_on(repository.find_by_user_id(&user_id))
        .expect("query succeeds")
        .expect("profile exists");
    assert_eq!(stored.profile.details.email.as_deref(), Some("a@x.com"));
    assert_eq!(stored.username.as_str(), "ada");
}

fn email_only_details(email: &str) -> ProfileDetails {
    ProfileDetails {
        email: Some(email.to_owned()),
        ..ProfileDetails::default()
    }
}
