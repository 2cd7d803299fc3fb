use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgConnection, PgPool};
use uuid::Uuid;

use crate::error::{Result, StorageError};
use crate::models::{Client, User};

const USER_COLUMNS: &str =
    "id, username, first_name, last_name, email, password_hash, is_superuser, created";

pub const MESSAGE_DUPLICATE_USERNAME: &str = "A user with that username already exists.";
pub const MESSAGE_UNKNOWN_USER: &str = "Invalid pk - user does not exist.";

/// Fields of a user about to be registered
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub is_superuser: bool,
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    user_id: Uuid,
    username: String,
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
    is_superuser: bool,
    user_created: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            id: row.id,
            created: row.created,
            modified: row.modified,
            user: User {
                id: row.user_id,
                username: row.username,
                first_name: row.first_name,
                last_name: row.last_name,
                email: row.email,
                password_hash: row.password_hash,
                is_superuser: row.is_superuser,
                created: row.user_created,
            },
        }
    }
}

/// Users and the client profiles attached to them
pub struct ClientRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ClientRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_user_by_username(&self, username: &str) -> Result<User> {
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE username = $1"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> Result<User> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)",
        )
        .bind(username)
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Creates a user together with its client profile
    pub async fn register(&self, new_user: NewUser) -> Result<Client> {
        let mut tx = self.pool.begin().await?;
        let user = insert_user(&mut *tx, new_user).await?;

        let client = Client::new(user);
        client.check()?;

        sqlx::query(
            "INSERT INTO client (id, user_id, created, modified) VALUES ($1, $2, $3, $4)",
        )
        .bind(client.id)
        .bind(client.user.id)
        .bind(client.created)
        .bind(client.modified)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            StorageError::from(e)
                .classify("client with this user already exists.", MESSAGE_UNKNOWN_USER)
        })?;

        tx.commit().await?;

        tracing::info!(username = %client.username(), "Registered client");
        Ok(client)
    }

    /// Creates a superuser account; superusers carry no client profile
    pub async fn create_superuser(&self, mut new_user: NewUser) -> Result<User> {
        new_user.is_superuser = true;
        let mut conn = self.pool.acquire().await?;
        insert_user(&mut *conn, new_user).await
    }

    pub async fn find_by_user(&self, user_id: Uuid) -> Result<Client> {
        let row = sqlx::query_as::<_, ClientRow>(
            "SELECT c.id, c.created, c.modified,
                    u.id AS user_id, u.username, u.first_name, u.last_name, u.email,
                    u.password_hash, u.is_superuser, u.created AS user_created
             FROM client c
             JOIN users u ON u.id = c.user_id
             WHERE c.user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(Client::from(row))
    }

    /// Persist a client's timestamps after the generic checks
    pub async fn save(&self, client: &Client) -> Result<()> {
        client.check()?;

        let result = sqlx::query("UPDATE client SET created = $2, modified = $3 WHERE id = $1")
            .bind(client.id)
            .bind(client.created)
            .bind(client.modified)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

async fn insert_user(conn: &mut PgConnection, new_user: NewUser) -> Result<User> {
    sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, username, first_name, last_name, email, password_hash, is_superuser)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING {USER_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(new_user.username)
    .bind(new_user.first_name)
    .bind(new_user.last_name)
    .bind(new_user.email)
    .bind(new_user.password_hash)
    .bind(new_user.is_superuser)
    .fetch_one(&mut *conn)
    .await
    .map_err(|e| StorageError::from(e).classify(MESSAGE_DUPLICATE_USERNAME, MESSAGE_UNKNOWN_USER))
}
