//! The persistence seam used by [`NotificationService`](crate::NotificationService).

use std::collections::HashMap;

use async_trait::async_trait;
use notify_core::selector::ReadSelector;
use notify_core::types::{DbId, Params};
use notify_db::models::notification::{CreateNotification, Notification};
use notify_db::repositories::NotificationRepo;
use notify_db::DbPool;

#[cfg(test)]
pub(crate) mod memory;

/// Storage operations the notification service relies on.
///
/// `insert` must be atomic: either the notification and all of its
/// parameters become visible, or nothing does.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification with its parameters. Returns the new ID.
    async fn insert(&self, input: &CreateNotification) -> Result<DbId, sqlx::Error>;

    async fn unread_count(&self, user_id: &str) -> Result<i64, sqlx::Error>;

    /// The user's notifications, unread first then newest first.
    async fn list_for_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error>;

    async fn find_by_id(
        &self,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Notification>, sqlx::Error>;

    async fn params(&self, notification_id: DbId) -> Result<Params, sqlx::Error>;

    /// Parameters for many notifications, keyed by notification ID.
    async fn params_for_many(
        &self,
        notification_ids: &[DbId],
    ) -> Result<HashMap<DbId, Params>, sqlx::Error>;

    /// Update the read flag. See [`NotificationRepo::set_read`] for the
    /// meaning of the returned flag.
    async fn set_read(
        &self,
        user_id: &str,
        read: bool,
        selector: &ReadSelector,
    ) -> Result<bool, sqlx::Error>;
}

/// [`NotificationStore`] backed by the Postgres repositories.
#[derive(Debug, Clone)]
pub struct PgNotificationStore {
    pool: DbPool,
}

impl PgNotificationStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for PgNotificationStore {
    async fn insert(&self, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        NotificationRepo::create(&self.pool, input).await
    }

    async fn unread_count(&self, user_id: &str) -> Result<i64, sqlx::Error> {
        NotificationRepo::unread_count(&self.pool, user_id).await
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        NotificationRepo::list_for_user(&self.pool, user_id, limit).await
    }

    async fn find_by_id(
        &self,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Notification>, sqlx::Error> {
        NotificationRepo::find_by_id(&self.pool, id, user_id).await
    }

    async fn params(&self, notification_id: DbId) -> Result<Params, sqlx::Error> {
        NotificationRepo::list_params(&self.pool, notification_id).await
    }

    async fn params_for_many(
        &self,
        notification_ids: &[DbId],
    ) -> Result<HashMap<DbId, Params>, sqlx::Error> {
        NotificationRepo::list_params_for_many(&self.pool, notification_ids).await
    }

    async fn set_read(
        &self,
        user_id: &str,
        read: bool,
        selector: &ReadSelector,
    ) -> Result<bool, sqlx::Error> {
        NotificationRepo::set_read(&self.pool, user_id, read, selector).await
    }
}
