//! Repository for the `notifications` and `notification_params` tables.

use std::collections::HashMap;

use notify_core::selector::ReadSelector;
use notify_core::types::{DbId, Params};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::notification::{CreateNotification, Notification, NotificationParam};

/// Column list for `notifications` queries.
const COLUMNS: &str = "id, app_id, user_id, href, icon, content, is_read, created_at";

/// Listing order: unread first, newest first within each group. `id` breaks
/// ties between rows written in the same transaction.
const LIST_ORDER: &str = "is_read ASC, created_at DESC, id DESC";

/// Provides persistence operations for notifications and their parameters.
pub struct NotificationRepo;

impl NotificationRepo {
    /// Insert a notification and all of its parameters, returning the new ID.
    ///
    /// Runs in a single transaction: if any parameter insert fails, the
    /// notification row is rolled back with it.
    pub async fn create(pool: &PgPool, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let id: DbId = sqlx::query_scalar(
            "INSERT INTO notifications (app_id, user_id, href, icon, content) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING id",
        )
        .bind(&input.app_id)
        .bind(&input.user_id)
        .bind(&input.href)
        .bind(&input.icon)
        .bind(&input.content)
        .fetch_one(&mut *tx)
        .await?;

        Self::insert_params_inner(&mut tx, id, &input.params).await?;

        tx.commit().await?;
        Ok(id)
    }

    /// Write parameter rows inside an open transaction.
    ///
    /// A repeated key overwrites the earlier value.
    async fn insert_params_inner(
        tx: &mut Transaction<'_, Postgres>,
        notification_id: DbId,
        params: &Params,
    ) -> Result<(), sqlx::Error> {
        for (key, value) in params {
            sqlx::query(
                "INSERT INTO notification_params (notification_id, key, value) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (notification_id, key) DO UPDATE SET value = EXCLUDED.value",
            )
            .bind(notification_id)
            .bind(key)
            .bind(value)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }

    /// Get the number of unread notifications for a user.
    pub async fn unread_count(pool: &PgPool, user_id: &str) -> Result<i64, sqlx::Error> {
        let count: Option<i64> = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = false",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(count.unwrap_or(0))
    }

    /// List notifications for a user, unread first and newest first.
    ///
    /// `limit` is applied only when it is positive; otherwise every
    /// notification is returned.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        // `LIMIT NULL` means no limit in PostgreSQL.
        let limit = limit.filter(|n| *n > 0);
        let query = format!(
            "SELECT {COLUMNS} FROM notifications \
             WHERE user_id = $1 \
             ORDER BY {LIST_ORDER} \
             LIMIT $2"
        );
        sqlx::query_as::<_, Notification>(&query)
            .bind(user_id)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a notification by ID, scoped to its owner.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Notification>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notifications WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Notification>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// All parameters of one notification. Empty if it has none.
    pub async fn list_params(pool: &PgPool, notification_id: DbId) -> Result<Params, sqlx::Error> {
        let rows: Vec<(String, String)> = sqlx::query_as(
            "SELECT key, value FROM notification_params WHERE notification_id = $1",
        )
        .bind(notification_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().collect())
    }

    /// Parameters for several notifications in one round trip, grouped by
    /// notification ID. Notifications without parameters are absent from
    /// the map.
    pub async fn list_params_for_many(
        pool: &PgPool,
        notification_ids: &[DbId],
    ) -> Result<HashMap<DbId, Params>, sqlx::Error> {
        if notification_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rows = sqlx::query_as::<_, NotificationParam>(
            "SELECT notification_id, key, value FROM notification_params \
             WHERE notification_id = ANY($1)",
        )
        .bind(notification_ids)
        .fetch_all(pool)
        .await?;

        let mut grouped: HashMap<DbId, Params> = HashMap::new();
        for row in rows {
            grouped
                .entry(row.notification_id)
                .or_default()
                .insert(row.key, row.value);
        }
        Ok(grouped)
    }

    /// Set the read flag on the user's notifications matched by `selector`.
    ///
    /// For [`ReadSelector::ById`] returns `true` only if exactly one row
    /// matched; the other selectors return `true` once the update has run.
    pub async fn set_read(
        pool: &PgPool,
        user_id: &str,
        read: bool,
        selector: &ReadSelector,
    ) -> Result<bool, sqlx::Error> {
        let result = match selector {
            ReadSelector::All => {
                sqlx::query("UPDATE notifications SET is_read = $1 WHERE user_id = $2")
                    .bind(read)
                    .bind(user_id)
                    .execute(pool)
                    .await?
            }
            ReadSelector::ById(id) => {
                sqlx::query(
                    "UPDATE notifications SET is_read = $1 \
                     WHERE id = $2 AND user_id = $3",
                )
                .bind(read)
                .bind(*id)
                .bind(user_id)
                .execute(pool)
                .await?
            }
            ReadSelector::ByApp(app_id) => {
                sqlx::query(
                    "UPDATE notifications SET is_read = $1 \
                     WHERE user_id = $2 AND app_id = $3",
                )
                .bind(read)
                .bind(user_id)
                .bind(app_id)
                .execute(pool)
                .await?
            }
        };

        tracing::debug!(
            user_id,
            read,
            ?selector,
            rows = result.rows_affected(),
            "Updated notification read state"
        );

        Ok(match selector {
            ReadSelector::ById(_) => result.rows_affected() == 1,
            ReadSelector::All | ReadSelector::ByApp(_) => true,
        })
    }
}
