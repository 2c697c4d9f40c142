/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Scheduling fields (`start_date`, `deadline`) are calendar dates with no
/// time-of-day component.
pub type Date = chrono::NaiveDate;
