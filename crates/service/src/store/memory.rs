//! In-memory [`NotificationStore`] for service tests.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use notify_core::selector::ReadSelector;
use notify_core::types::{DbId, Params, Timestamp};
use notify_db::models::notification::{CreateNotification, Notification};

use super::NotificationStore;

#[derive(Default)]
struct Tables {
    next_id: DbId,
    notifications: Vec<Notification>,
    params: HashMap<DbId, Params>,
}

/// Keeps rows in memory. Inserts stage the notification and its parameters
/// and only publish them when nothing failed, like a committed transaction.
#[derive(Default)]
pub(crate) struct MemoryStore {
    tables: Mutex<Tables>,
    fail_params: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    /// Make every insert that carries parameters fail while writing them.
    pub(crate) fn fail_param_writes(&self, fail: bool) {
        self.fail_params.store(fail, Ordering::SeqCst);
    }

    /// Make every read and read-state update fail.
    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn set_created_at(&self, id: DbId, at: Timestamp) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(row) = tables.notifications.iter_mut().find(|n| n.id == id) {
            row.created_at = at;
        }
    }

    pub(crate) fn is_read(&self, id: DbId) -> Option<bool> {
        let tables = self.tables.lock().unwrap();
        tables
            .notifications
            .iter()
            .find(|n| n.id == id)
            .map(|n| n.is_read)
    }

    pub(crate) fn row_count(&self) -> usize {
        self.tables.lock().unwrap().notifications.len()
    }

    fn check_reads(&self) -> Result<(), sqlx::Error> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn insert(&self, input: &CreateNotification) -> Result<DbId, sqlx::Error> {
        let mut tables = self.tables.lock().unwrap();
        let id = tables.next_id + 1;
        let row = Notification {
            id,
            app_id: input.app_id.clone(),
            user_id: input.user_id.clone(),
            href: input.href.clone(),
            icon: input.icon.clone(),
            content: input.content.clone(),
            is_read: false,
            created_at: chrono::Utc::now(),
        };
        if !input.params.is_empty() && self.fail_params.load(Ordering::SeqCst) {
            return Err(sqlx::Error::Protocol("forced parameter failure".to_string()));
        }
        tables.next_id = id;
        tables.notifications.push(row);
        if !input.params.is_empty() {
            tables.params.insert(id, input.params.clone());
        }
        Ok(id)
    }

    async fn unread_count(&self, user_id: &str) -> Result<i64, sqlx::Error> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        let count = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id && !n.is_read)
            .count();
        Ok(count as i64)
    }

    async fn list_for_user(
        &self,
        user_id: &str,
        limit: Option<i64>,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        let mut rows: Vec<Notification> = tables
            .notifications
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        rows.sort_by_key(|n| (n.is_read, Reverse(n.created_at), Reverse(n.id)));
        if let Some(limit) = limit.filter(|n| *n > 0) {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn find_by_id(
        &self,
        id: DbId,
        user_id: &str,
    ) -> Result<Option<Notification>, sqlx::Error> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .notifications
            .iter()
            .find(|n| n.id == id && n.user_id == user_id)
            .cloned())
    }

    async fn params(&self, notification_id: DbId) -> Result<Params, sqlx::Error> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .params
            .get(&notification_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn params_for_many(
        &self,
        notification_ids: &[DbId],
    ) -> Result<HashMap<DbId, Params>, sqlx::Error> {
        self.check_reads()?;
        let tables = self.tables.lock().unwrap();
        Ok(notification_ids
            .iter()
            .filter_map(|id| tables.params.get(id).map(|p| (*id, p.clone())))
            .collect())
    }

    async fn set_read(
        &self,
        user_id: &str,
        read: bool,
        selector: &ReadSelector,
    ) -> Result<bool, sqlx::Error> {
        self.check_reads()?;
        let mut tables = self.tables.lock().unwrap();
        let mut matched = 0;
        for row in tables.notifications.iter_mut().filter(|n| n.user_id == user_id) {
            let hit = match selector {
                ReadSelector::All => true,
                ReadSelector::ById(id) => row.id == *id,
                ReadSelector::ByApp(app_id) => row.app_id == *app_id,
            };
            if hit {
                row.is_read = read;
                matched += 1;
            }
        }
        Ok(match selector {
            ReadSelector::ById(_) => matched == 1,
            ReadSelector::All | ReadSelector::ByApp(_) => true,
        })
    }
}
