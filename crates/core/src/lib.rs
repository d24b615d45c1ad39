//! Domain building blocks for per-user notifications.
//!
//! - [`sanitize`] strips markup outside the inline formatting allow-list.
//! - [`template`] renders stored templates with their parameters.
//! - [`l10n`] is the seam to the localization engine.
//! - [`identity`] and [`selector`] carry the caller and read-update target.

pub mod error;
pub mod identity;
pub mod l10n;
pub mod sanitize;
pub mod selector;
pub mod template;
pub mod types;
