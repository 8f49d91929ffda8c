//! PostgreSQL-backed `ProfileRepository` implementation using Diesel ORM.
//!
//! Reads join `profiles` with `users` to project the owner. Upsert and
//! partial update run in a single transaction so the profile row and the
//! owner's username change together. Upsert inserts with
//! `ON CONFLICT (user_id) DO NOTHING` and falls back to an update, which keeps
//! concurrent first-time upserts for one user from failing on the unique key.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ProfileRepository, ProfileRepositoryError};
use crate::domain::{
    NewProfile, Profile, ProfileDetails, ProfileUpdate, ProfileUpsert, ProfileWithUser,
    ProfileWithUsername, User, UserId, Username,
};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error, map_write_error};
use super::models::{NewProfileRow, ProfileChangeset, ProfileRow, UserRow};
use super::pool::DbPool;
use super::schema::{profiles, users};

/// Diesel-backed implementation of the `ProfileRepository` port.
///
/// # Examples
/// ```no_run
/// use profile_service::outbound::persistence::{DbPool, DieselProfileRepository, PoolConfig};
///
/// # async fn build() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = DbPool::new(PoolConfig::new("postgres://localhost/profiles")).await?;
/// let repository = DieselProfileRepository::new(pool);
/// # let _ = repository;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DieselProfileRepository {
    pool: DbPool,
}

impl DieselProfileRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside a transaction body.
#[derive(Debug)]
enum TxError {
    Diesel(diesel::result::Error),
    Repository(ProfileRepositoryError),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl TxError {
    fn into_repository_error(self, user_id: i32, username: Option<&str>) -> ProfileRepositoryError {
        match self {
            Self::Diesel(error) => map_write_error(error, user_id, username),
            Self::Repository(error) => error,
        }
    }
}

fn corrupt_row(what: &str, raw: impl std::fmt::Display) -> ProfileRepositoryError {
    ProfileRepositoryError::query(format!("stored {what} is invalid: {raw}"))
}

fn row_to_profile(row: ProfileRow) -> Result<Profile, ProfileRepositoryError> {
    let ProfileRow {
        id,
        user_id,
        email,
        gender,
        address,
        pincode,
        city,
        state,
        country,
        created_at,
        updated_at,
    } = row;
    Ok(Profile {
        id,
        user_id: UserId::new(user_id).map_err(|_| corrupt_row("user id", user_id))?,
        details: ProfileDetails {
            email,
            gender,
            address,
            pincode,
            city,
            state,
            country,
        },
        created_at,
        updated_at,
    })
}

fn to_username(raw: String) -> Result<Username, ProfileRepositoryError> {
    Username::new(raw.clone()).map_err(|_| corrupt_row("username", raw))
}

fn row_to_user(row: UserRow) -> Result<User, ProfileRepositoryError> {
    let id = UserId::new(row.id).map_err(|_| corrupt_row("user id", row.id))?;
    Ok(User::new(id, to_username(row.username)?))
}

async fn load_user(conn: &mut AsyncPgConnection, user_id: i32) -> Result<UserRow, TxError> {
    users::table
        .find(user_id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()?
        .ok_or_else(|| TxError::Repository(ProfileRepositoryError::unknown_user(user_id)))
}

async fn rename_user(
    conn: &mut AsyncPgConnection,
    user_id: i32,
    username: &str,
) -> Result<(), TxError> {
    let now = Utc::now();
    diesel::update(users::table.find(user_id))
        .set((users::username.eq(username), users::updated_at.eq(now)))
        .execute(conn)
        .await?;
    Ok(())
}

#[async_trait]
impl ProfileRepository for DieselProfileRepository {
    async fn list_all(&self) -> Result<Vec<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<ProfileRow> = profiles::table
            .order(profiles::id.asc())
            .select(ProfileRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_profile).collect()
    }

    async fn find_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<ProfileWithUsername>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let found: Option<(ProfileRow, String)> = profiles::table
            .inner_join(users::table)
            .filter(profiles::user_id.eq(user_id.get()))
            .select((ProfileRow::as_select(), users::username))
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        found
            .map(|(row, username)| {
                Ok::<_, ProfileRepositoryError>(ProfileWithUsername {
                    profile: row_to_profile(row)?,
                    username: to_username(username)?,
                })
            })
            .transpose()
    }

    async fn insert(
        &self,
        profile: &NewProfile,
    ) -> Result<ProfileWithUser, ProfileRepositoryError> {
        let user_id = profile.user_id.get();
        let new_row = NewProfileRow::new(user_id, &profile.details);
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (row, owner) = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let row: ProfileRow = diesel::insert_into(profiles::table)
                        .values(&new_row)
                        .returning(ProfileRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let owner = load_user(conn, user_id).await?;
                    Ok((row, owner))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| err.into_repository_error(user_id, None))?;

        debug!(user_id, profile_id = row.id, "profile row inserted");
        Ok(ProfileWithUser {
            profile: row_to_profile(row)?,
            user: row_to_user(owner)?,
        })
    }

    async fn upsert(
        &self,
        upsert: &ProfileUpsert,
    ) -> Result<ProfileWithUsername, ProfileRepositoryError> {
        let user_id = upsert.user_id.get();
        let username = upsert.username.as_ref().map(Username::as_str);
        let new_row = NewProfileRow::new(user_id, &upsert.details);
        let changeset = ProfileChangeset::new(&upsert.details, Utc::now());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (row, owner) = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let inserted: Option<ProfileRow> = diesel::insert_into(profiles::table)
                        .values(&new_row)
                        .on_conflict(profiles::user_id)
                        .do_nothing()
                        .returning(ProfileRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()?;

                    // A concurrent first insert that won the race shows up
                    // here as a conflict, so both callers end on the update.
                    let row = match inserted {
                        Some(row) => row,
                        None => {
                            if let Some(name) = username {
                                rename_user(conn, user_id, name).await?;
                            }
                            diesel::update(profiles::table.filter(profiles::user_id.eq(user_id)))
                                .set(&changeset)
                                .returning(ProfileRow::as_returning())
                                .get_result(conn)
                                .await?
                        }
                    };
                    let owner = load_user(conn, user_id).await?;
                    Ok((row, owner))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| err.into_repository_error(user_id, username))?;

        Ok(ProfileWithUsername {
            profile: row_to_profile(row)?,
            username: to_username(owner.username)?,
        })
    }

    async fn update(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<Option<ProfileWithUser>, ProfileRepositoryError> {
        let user_id = user_id.get();
        let username = update.username.as_ref().map(Username::as_str);
        let changeset = ProfileChangeset::new(&update.details, Utc::now());
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = conn
            .transaction::<_, TxError, _>(|conn| {
                async move {
                    let row: Option<ProfileRow> =
                        diesel::update(profiles::table.filter(profiles::user_id.eq(user_id)))
                            .set(&changeset)
                            .returning(ProfileRow::as_returning())
                            .get_result(conn)
                            .await
                            .optional()?;
                    let Some(row) = row else {
                        return Ok(None);
                    };
                    if let Some(name) = username {
                        rename_user(conn, user_id, name).await?;
                    }
                    let owner = load_user(conn, user_id).await?;
                    Ok(Some((row, owner)))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| err.into_repository_error(user_id, username))?;

        updated
            .map(|(row, owner)| {
                Ok::<_, ProfileRepositoryError>(ProfileWithUser {
                    profile: row_to_profile(row)?,
                    user: row_to_user(owner)?,
                })
            })
            .transpose()
    }

    async fn delete_by_user_id(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Profile>, ProfileRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let removed: Option<ProfileRow> =
            diesel::delete(profiles::table.filter(profiles::user_id.eq(user_id.get())))
                .returning(ProfileRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;

        removed.map(row_to_profile).transpose()
    }
}
