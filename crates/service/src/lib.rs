//! Caller-facing notification operations.
//!
//! [`NotificationService`] composes the sanitizer, the store and the template
//! renderer. Every operation takes the [`Caller`](notify_core::identity::Caller)
//! explicitly; anonymous callers get an empty result (or, for `send`, an
//! error) without touching the store.

pub mod error;
pub mod service;
pub mod store;

pub use error::{ServiceError, ServiceResult};
pub use service::{NewNotification, NotificationService, RenderedNotification};
pub use store::{NotificationStore, PgNotificationStore};
