/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Stable public identifier exposed in URLs and payloads.
pub type PublicId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
