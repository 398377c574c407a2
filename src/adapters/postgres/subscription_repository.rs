//! PostgreSQL implementation of SubscriptionRepository.
//!
//! The one-active-per-user rule is enforced by the partial unique index
//! `subscriptions_one_active_per_user`; a violation surfaces as
//! `ErrorCode::SubscriptionExists`.

use crate::domain::foundation::{DomainError, ErrorCode, SubscriptionId, Timestamp, UserId};
use crate::domain::subscription::{PlanType, Subscription, SubscriptionStatus};
use crate::ports::SubscriptionRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

const ONE_ACTIVE_PER_USER: &str = "subscriptions_one_active_per_user";

/// PostgreSQL implementation of the SubscriptionRepository port.
pub struct PostgresSubscriptionRepository {
    pool: PgPool,
}

impl PostgresSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscription.
#[derive(Debug, sqlx::FromRow)]
struct SubscriptionRow {
    id: Uuid,
    user_id: String,
    plan_type: String,
    status: String,
    start_date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SubscriptionRow> for Subscription {
    type Error = DomainError;

    fn try_from(row: SubscriptionRow) -> Result<Self, Self::Error> {
        let plan: PlanType = row.plan_type.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid plan_type value: {}", row.plan_type),
            )
        })?;
        let status: SubscriptionStatus = row.status.parse().map_err(|_| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Invalid status value: {}", row.status),
            )
        })?;

        Ok(Subscription {
            id: SubscriptionId::from_uuid(row.id),
            user_id: UserId::new(row.user_id).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid user_id: {}", e))
            })?,
            plan,
            status,
            start_date: Timestamp::from_datetime(row.start_date),
            end_date: row.end_date.map(Timestamp::from_datetime),
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

const SELECT_COLUMNS: &str = r#"
    SELECT id, user_id, plan_type, status, start_date, end_date, created_at, updated_at
    FROM subscriptions
"#;

fn not_found(id: &SubscriptionId) -> DomainError {
    DomainError::new(
        ErrorCode::SubscriptionNotFound,
        format!("Subscription not found: {}", id),
    )
}

#[async_trait]
impl SubscriptionRepository for PostgresSubscriptionRepository {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscriptions (
                id, user_id, plan_type, status, start_date, end_date, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(subscription.id.as_uuid())
        .bind(subscription.user_id.as_str())
        .bind(subscription.plan.as_str())
        .bind(subscription.status.as_str())
        .bind(subscription.start_date.as_datetime())
        .bind(subscription.end_date.map(|d| *d.as_datetime()))
        .bind(subscription.created_at.as_datetime())
        .bind(subscription.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ONE_ACTIVE_PER_USER) {
                    return DomainError::new(
                        ErrorCode::SubscriptionExists,
                        format!(
                            "User {} already has an active subscription",
                            subscription.user_id
                        ),
                    );
                }
            }
            DomainError::database(format!("Failed to save subscription: {}", e))
        })?;

        Ok(())
    }

    async fn update_status(
        &self,
        id: &SubscriptionId,
        status: SubscriptionStatus,
        updated_at: Timestamp,
    ) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscriptions SET status = $2, updated_at = $3
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .bind(status.as_str())
        .bind(updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some(ONE_ACTIVE_PER_USER) {
                    return DomainError::new(
                        ErrorCode::SubscriptionExists,
                        "User already has an active subscription",
                    );
                }
            }
            DomainError::database(format!("Failed to update subscription status: {}", e))
        })?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &SubscriptionId) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> =
            sqlx::query_as(&format!("{} WHERE id = $1", SELECT_COLUMNS))
                .bind(id.as_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to fetch subscription: {}", e)))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn find_latest_active_by_user(
        &self,
        user_id: &UserId,
    ) -> Result<Option<Subscription>, DomainError> {
        let row: Option<SubscriptionRow> = sqlx::query_as(&format!(
            "{} WHERE user_id = $1 AND status = 'active' ORDER BY created_at DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch subscription: {}", e)))?;

        row.map(Subscription::try_from).transpose()
    }

    async fn list_expired(&self, as_of: Timestamp) -> Result<Vec<Subscription>, DomainError> {
        let rows: Vec<SubscriptionRow> = sqlx::query_as(&format!(
            "{} WHERE status = 'active' AND end_date IS NOT NULL AND end_date <= $1 ORDER BY end_date",
            SELECT_COLUMNS
        ))
        .bind(as_of.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::database(format!("Failed to list expired subscriptions: {}", e))
        })?;

        rows.into_iter().map(Subscription::try_from).collect()
    }

    async fn delete(&self, id: &SubscriptionId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM subscriptions WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete subscription: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(plan_type: &str, status: &str) -> SubscriptionRow {
        let now = Utc::now();
        SubscriptionRow {
            id: Uuid::new_v4(),
            user_id: "user-1".to_string(),
            plan_type: plan_type.to_string(),
            status: status.to_string(),
            start_date: now,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn row_converts_to_subscription() {
        let sub = Subscription::try_from(row("premium", "expired")).unwrap();
        assert_eq!(sub.plan, PlanType::Premium);
        assert_eq!(sub.status, SubscriptionStatus::Expired);
        assert_eq!(sub.user_id.as_str(), "user-1");
        assert!(sub.end_date.is_none());
    }

    #[test]
    fn unknown_status_is_a_database_error() {
        let err = Subscription::try_from(row("basic", "paused")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }

    #[test]
    fn unknown_plan_is_a_database_error() {
        let err = Subscription::try_from(row("gold", "active")).unwrap_err();
        assert_eq!(err.code, ErrorCode::DatabaseError);
    }
}
