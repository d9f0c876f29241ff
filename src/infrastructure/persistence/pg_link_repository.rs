//! PostgreSQL implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, StoreError};

/// PostgreSQL repository for link storage.
///
/// Slug uniqueness is enforced by the `links_slug_key` constraint and click
/// counts are updated in place with `click_count = click_count + 1`.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LinkRow {
    slug: String,
    destination: String,
    owner_id: Option<String>,
    click_count: i64,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(
            row.slug,
            row.destination,
            row.owner_id,
            row.click_count,
            row.created_at,
        )
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, slug: &str) -> Result<bool, StoreError> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM links WHERE slug = $1)")
                .bind(slug)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn insert(&self, new_link: NewLink) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO links (slug, destination, owner_id, click_count)
            VALUES ($1, $2, $3, 0)
            "#,
        )
        .bind(&new_link.slug)
        .bind(&new_link.destination)
        .bind(&new_link.owner)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn get_destination(&self, slug: &str) -> Result<Option<String>, StoreError> {
        let destination =
            sqlx::query_scalar::<_, String>("SELECT destination FROM links WHERE slug = $1")
                .bind(slug)
                .fetch_optional(self.pool.as_ref())
                .await?;

        Ok(destination)
    }

    async fn increment_clicks(&self, slug: &str) -> Result<(), StoreError> {
        sqlx::query("UPDATE links SET click_count = click_count + 1 WHERE slug = $1")
            .bind(slug)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn list(
        &self,
        owner: Option<String>,
        limit: Option<i64>,
    ) -> Result<Vec<Link>, StoreError> {
        let rows = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT slug, destination, owner_id, click_count, created_at
            FROM links
            WHERE ($1::TEXT IS NULL OR owner_id = $1)
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(owner)
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, slug: &str, owner: Option<String>) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
            DELETE FROM links
            WHERE slug = $1 AND ($2::TEXT IS NULL OR owner_id = $2)
            "#,
        )
        .bind(slug)
        .bind(owner)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
