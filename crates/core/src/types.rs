/// Stories and pipeline jobs are identified by UUID v4.
pub type StoryId = uuid::Uuid;

/// Pipeline job identifier.
pub type JobId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
