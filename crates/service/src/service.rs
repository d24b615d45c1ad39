//! The notification service facade.

use std::sync::Arc;

use notify_core::error::CoreError;
use notify_core::identity::Caller;
use notify_core::l10n::Translator;
use notify_core::sanitize::sanitize;
use notify_core::selector::ReadSelector;
use notify_core::template::render;
use notify_core::types::{DbId, Params, Timestamp};
use notify_db::models::notification::{CreateNotification, Notification};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};
use crate::store::NotificationStore;

/// A notification to be sent, as supplied by the sending app.
///
/// `message` may contain inline markup (see
/// [`ALLOWED_TAGS`](notify_core::sanitize::ALLOWED_TAGS)) and `{key}`
/// placeholders resolved from `params` at display time.
#[derive(Debug, Clone, Deserialize)]
pub struct NewNotification {
    pub app_id: String,
    pub user_id: String,
    pub message: String,
    #[serde(default)]
    pub params: Params,
    pub href: Option<String>,
    pub icon: Option<String>,
}

impl NewNotification {
    pub fn new(
        app_id: impl Into<String>,
        user_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            app_id: app_id.into(),
            user_id: user_id.into(),
            message: message.into(),
            params: Params::new(),
            href: None,
            icon: None,
        }
    }

    /// Add a placeholder value. A repeated key replaces the earlier value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }
}

/// A stored notification with its content rendered for display.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedNotification {
    pub id: DbId,
    pub app_id: String,
    pub href: Option<String>,
    pub icon: Option<String>,
    /// Localized template with placeholders substituted.
    pub content: String,
    /// The raw parameter values, for clients that need structured data.
    pub params: Params,
    pub is_read: bool,
    pub created_at: Timestamp,
}

impl RenderedNotification {
    fn from_row(row: Notification, content: String, params: Params) -> Self {
        Self {
            id: row.id,
            app_id: row.app_id,
            href: row.href,
            icon: row.icon,
            content,
            params,
            is_read: row.is_read,
            created_at: row.created_at,
        }
    }
}

/// Per-user notification operations.
///
/// Writes flow through the sanitizer into the store; reads flow from the
/// store through the template renderer.
pub struct NotificationService<S> {
    store: S,
    translator: Arc<dyn Translator>,
}

impl<S: NotificationStore> NotificationService<S> {
    pub fn new(store: S, translator: Arc<dyn Translator>) -> Self {
        Self { store, translator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Number of unread notifications of the caller; 0 when anonymous.
    pub async fn unread_count(&self, caller: &Caller) -> ServiceResult<i64> {
        let Some(user_id) = caller.user_id() else {
            return Ok(0);
        };
        let count = self
            .store
            .unread_count(user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, user_id, "Could not count unread notifications")
            })?;
        Ok(count)
    }

    /// Send a notification to `input.user_id`, returning its ID.
    ///
    /// The caller must be authenticated. The message is sanitized before it
    /// is stored; the notification and its parameters are written atomically.
    pub async fn send(&self, caller: &Caller, input: &NewNotification) -> ServiceResult<DbId> {
        if !caller.is_authenticated() {
            return Err(CoreError::Unauthorized(
                "Sending notifications requires an authenticated caller".to_string(),
            )
            .into());
        }
        if input.app_id.trim().is_empty() {
            return Err(CoreError::Validation("app_id must not be empty".to_string()).into());
        }
        if input.user_id.trim().is_empty() {
            return Err(CoreError::Validation("user_id must not be empty".to_string()).into());
        }

        let create = CreateNotification {
            app_id: input.app_id.clone(),
            user_id: input.user_id.clone(),
            href: input.href.clone(),
            icon: input.icon.clone(),
            content: sanitize(&input.message),
            params: input.params.clone(),
        };

        match self.store.insert(&create).await {
            Ok(id) => {
                tracing::debug!(
                    id,
                    app_id = %create.app_id,
                    user_id = %create.user_id,
                    "Notification sent"
                );
                Ok(id)
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    app_id = %create.app_id,
                    user_id = %create.user_id,
                    "Could not send notification"
                );
                Err(ServiceError::Persistence(e))
            }
        }
    }

    /// The caller's notifications, rendered, unread first then newest first.
    ///
    /// `limit` caps the result when positive. Anonymous callers get an empty
    /// list.
    pub async fn list(
        &self,
        caller: &Caller,
        limit: Option<i64>,
    ) -> ServiceResult<Vec<RenderedNotification>> {
        let Some(user_id) = caller.user_id() else {
            return Ok(Vec::new());
        };

        let rows = self
            .store
            .list_for_user(user_id, limit)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, user_id, "Could not list notifications")
            })?;

        let ids: Vec<DbId> = rows.iter().map(|n| n.id).collect();
        let mut params = self
            .store
            .params_for_many(&ids)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, user_id, "Could not load notification parameters")
            })?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let row_params = params.remove(&row.id).unwrap_or_default();
                let content = render(
                    self.translator.as_ref(),
                    &row.app_id,
                    &row.content,
                    &row_params,
                );
                RenderedNotification::from_row(row, content, row_params)
            })
            .collect())
    }

    /// Set the read flag on the caller's notifications matched by `selector`.
    ///
    /// Returns `false` for anonymous callers and for a [`ReadSelector::ById`]
    /// that does not name one of the caller's notifications.
    pub async fn mark_read(
        &self,
        caller: &Caller,
        selector: &ReadSelector,
        read: bool,
    ) -> ServiceResult<bool> {
        let Some(user_id) = caller.user_id() else {
            return Ok(false);
        };
        let updated = self
            .store
            .set_read(user_id, read, selector)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, user_id, ?selector, "Could not update read state")
            })?;
        Ok(updated)
    }

    /// [`mark_read`](Self::mark_read) for an untyped selector from an outer
    /// layer. Inputs that are neither absent, an id, nor an app id yield
    /// `false` without touching the store.
    pub async fn mark_read_raw(
        &self,
        caller: &Caller,
        raw: Option<&str>,
        read: bool,
    ) -> ServiceResult<bool> {
        match ReadSelector::from_raw(raw) {
            Some(selector) => self.mark_read(caller, &selector, read).await,
            None => {
                tracing::debug!(?raw, "Rejected read selector");
                Ok(false)
            }
        }
    }

    /// Raw placeholder values of one of the caller's notifications.
    ///
    /// `None` when the caller is anonymous or does not own the notification.
    pub async fn params(&self, caller: &Caller, id: DbId) -> ServiceResult<Option<Params>> {
        let Some(user_id) = caller.user_id() else {
            return Ok(None);
        };
        let owned = self
            .store
            .find_by_id(id, user_id)
            .await
            .inspect_err(|e| {
                tracing::error!(error = %e, id, user_id, "Could not look up notification")
            })?;
        if owned.is_none() {
            return Ok(None);
        }
        let params = self.store.params(id).await.inspect_err(|e| {
            tracing::error!(error = %e, id, user_id, "Could not load notification parameters")
        })?;
        Ok(Some(params))
    }
}
