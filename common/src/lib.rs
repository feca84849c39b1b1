pub mod job;
pub mod view;

pub use job::{Job, JobCreate, JobUpdate};
pub use view::{describe_notification_status, describe_status, filter_jobs,
               order_by_next_run, paginate, JobMetrics, Page, RunStatus, Severity};

// Backend defaults shared by every front-end command
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
