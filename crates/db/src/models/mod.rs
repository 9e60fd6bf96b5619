pub mod edge;
pub mod suspension;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
