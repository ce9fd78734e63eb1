use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, FromRow, SqlitePool};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Feed {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub url: String,
    pub user_id: Uuid,
}

/// A feed row joined with the name of the user who added it.
#[derive(Debug, Clone, FromRow)]
pub struct FeedWithUser {
    pub name: String,
    pub url: String,
    pub user_name: String,
}

pub struct Database {
    pool: SqlitePool,
}

impl Database {
    pub async fn new(database_url: &str) -> sqlx::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> sqlx::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BLOB PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                name TEXT NOT NULL UNIQUE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS feeds (
                id BLOB PRIMARY KEY,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                name TEXT NOT NULL,
                url TEXT NOT NULL UNIQUE,
                user_id BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn create_user(
        &self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        name: &str,
    ) -> sqlx::Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, created_at, updated_at, name)
            VALUES (?, ?, ?, ?)
            RETURNING id, created_at, updated_at, name
            "#,
        )
        .bind(id)
        .bind(created_at)
        .bind(updated_at)
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        debug!(user = %user.name, id = %user.id, "created user");
        Ok(user)
    }

    pub async fn get_user(&self, name: &str) -> sqlx::Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, name FROM users WHERE name = ?",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    pub async fn get_users(&self) -> sqlx::Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, created_at, updated_at, name FROM users ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(users)
    }

    /// Removes every user. Their feeds go with them through the foreign key cascade.
    pub async fn delete_all_users(&self) -> sqlx::Result<u64> {
        let result = sqlx::query("DELETE FROM users")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn create_feed(
        &self,
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        name: &str,
        url: &str,
        user_id: Uuid,
    ) -> sqlx::Result<Feed> {
        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (id, created_at, updated_at, name, url, user_id)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id, created_at, updated_at, name, url, user_id
            "#,
        )
        .bind(id)
        .bind(created_at)
        .bind(updated_at)
        .bind(name)
        .bind(url)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(feed = %feed.name, url = %feed.url, "created feed");
        Ok(feed)
    }

    pub async fn get_feeds(&self) -> sqlx::Result<Vec<FeedWithUser>> {
        let feeds = sqlx::query_as::<_, FeedWithUser>(
            r#"
            SELECT feeds.name, feeds.url, users.name AS user_name
            FROM feeds
            JOIN users ON users.id = feeds.user_id
            ORDER BY feeds.created_at, feeds.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(feeds)
    }
}
