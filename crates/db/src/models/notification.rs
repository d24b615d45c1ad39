//! Notification entity models and DTOs.

use notify_core::types::{DbId, Params, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `notifications` table.
///
/// `content` is the stored template, placeholders unresolved.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: DbId,
    pub app_id: String,
    pub user_id: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    pub content: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

/// A row from the `notification_params` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct NotificationParam {
    pub notification_id: DbId,
    pub key: String,
    pub value: String,
}

/// DTO for inserting a notification together with its parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNotification {
    pub app_id: String,
    pub user_id: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    /// Already-sanitized template content.
    pub content: String,
    #[serde(default)]
    pub params: Params,
}
