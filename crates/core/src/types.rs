/// Primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are stored and returned in UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
