//! PostgreSQL implementation of ContentRepository.

use crate::domain::content::{Content, ContentType};
use crate::domain::foundation::{ContentId, DomainError, ErrorCode, Timestamp, UserId};
use crate::ports::ContentRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQL implementation of the ContentRepository port.
pub struct PostgresContentRepository {
    pool: PgPool,
}

impl PostgresContentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ContentRow {
    id: Uuid,
    owner_id: String,
    title: String,
    description: String,
    content_type: String,
    price_cents: i64,
    file_path: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContentRow> for Content {
    type Error = DomainError;

    fn try_from(row: ContentRow) -> Result<Self, Self::Error> {
        let content_type: ContentType = row.content_type.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid content_type value: {}", row.content_type),
            )
        })?;
        let owner_id = UserId::new(row.owner_id).map_err(|e| {
            DomainError::new(ErrorCode::DatabaseError, format!("Invalid owner_id: {}", e))
        })?;

        Ok(Content::reconstitute(
            ContentId::from_uuid(row.id),
            owner_id,
            row.title,
            row.description,
            content_type,
            row.price_cents,
            row.file_path,
            Timestamp::from_datetime(row.created_at),
            Timestamp::from_datetime(row.updated_at),
        ))
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, owner_id, title, description, content_type, price_cents, file_path,
           created_at, updated_at
    FROM contents
"#;

fn not_found(id: &ContentId) -> DomainError {
    DomainError::new(
        ErrorCode::ContentNotFound,
        format!("Content not found: {}", id),
    )
}

#[async_trait]
impl ContentRepository for PostgresContentRepository {
    async fn save(&self, content: &Content) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO contents (
                id, owner_id, title, description, content_type, price_cents, file_path,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(content.id.as_uuid())
        .bind(content.owner_id().as_str())
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.content_type.as_str())
        .bind(content.price_cents)
        .bind(&content.file_path)
        .bind(content.created_at.as_datetime())
        .bind(content.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save content: {}", e)))?;

        Ok(())
    }

    async fn update(&self, content: &Content) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE contents SET
                title = $2,
                description = $3,
                price_cents = $4,
                updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(content.id.as_uuid())
        .bind(&content.title)
        .bind(&content.description)
        .bind(content.price_cents)
        .bind(content.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update content: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(&content.id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &ContentId) -> Result<Option<Content>, DomainError> {
        let row: Option<ContentRow> = sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to fetch content: {}", e)))?;

        row.map(Content::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Content>, DomainError> {
        let rows: Vec<ContentRow> = sqlx::query_as(&format!(
            "{} WHERE owner_id = $1 ORDER BY created_at DESC",
            SELECT_COLUMNS
        ))
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list content: {}", e)))?;

        rows.into_iter().map(Content::try_from).collect()
    }

    async fn delete(&self, id: &ContentId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete content: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}
