/// Notification primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Raw placeholder parameters for one notification, keyed by placeholder name.
///
/// Ordered so that template substitution is deterministic.
pub type Params = std::collections::BTreeMap<String, String>;
