//! Database provisioning on top of an embedded cluster.
//!
//! Every test gets its own database with the embedded migrations applied,
//! so suites never observe each other's rows.

use pg_embedded_setup_unpriv::TestCluster;
use postgres::{Client, NoTls};
use profile_service::outbound::persistence::run_pending_migrations;
use uuid::Uuid;

use super::format_postgres_error;

/// Create an empty database, migrate it, and return its URL.
pub fn fresh_database(cluster: &TestCluster) -> Result<String, String> {
    let connection = cluster.connection();
    let name = format!("profiles_{}", Uuid::new_v4().simple());

    let mut admin = Client::connect(&connection.database_url("postgres"), NoTls)
        .map_err(|err| format_postgres_error(&err))?;
    admin
        .batch_execute(&format!("CREATE DATABASE \"{name}\""))
        .map_err(|err| format_postgres_error(&err))?;

    let url = connection.database_url(&name);
    run_pending_migrations(&url).map_err(|err| err.to_string())?;
    Ok(url)
}

/// Insert a user row and return its generated id.
pub fn seed_user(url: &str, username: &str) -> Result<i32, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one(
            "INSERT INTO users (username) VALUES ($1) RETURNING id",
            &[&username],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Read a username straight from the table, bypassing the adapter.
pub fn stored_username(url: &str, user_id: i32) -> Result<String, String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    let row = client
        .query_one("SELECT username FROM users WHERE id = $1", &[&user_id])
        .map_err(|err| format_postgres_error(&err))?;
    Ok(row.get(0))
}

/// Insert a user row with a fixed id.
pub fn seed_user_with_id(url: &str, user_id: i32, username: &str) -> Result<(), String> {
    let mut client = Client::connect(url, NoTls).map_err(|err| format_postgres_error(&err))?;
    client
        .execute(
            "INSERT INTO users (id, username) VALUES ($1, $2)",
            &[&user_id, &username],
        )
        .map_err(|err| format_postgres_error(&err))?;
    Ok(())
}
