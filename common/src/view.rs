//! Pure view-model for job list screens.
//!
//! Every function here derives display state from an already-fetched job
//! list; none of them touch the network, a clock, or the input. The
//! current instant is always an explicit parameter so derivations stay
//! deterministic under test.

use crate::job::Job;
use chrono::{DateTime, Utc};
use std::fmt;

/// One page of a filtered job list.
#[derive(Debug, Clone)]
pub struct Page<'a> {
    pub jobs: Vec<&'a Job>,
    pub page_count: usize,
}

/// Keep the jobs whose title contains `search` (case-insensitive) or
/// whose decimal id contains it. An empty `search` keeps everything.
/// Relative order is preserved.
pub fn filter_jobs<'a>(jobs: &'a [Job], search: &str) -> Vec<&'a Job> {
    if search.is_empty() {
        return jobs.iter().collect();
    }
    let needle = search.to_lowercase();
    jobs.iter()
        .filter(|job| {
            job.title.to_lowercase().contains(&needle) || job.id.to_string().contains(&needle)
        })
        .collect()
}

/// Slice out the 1-based `page` from a filtered list.
///
/// `page_count` is at least 1 even for an empty list. A `page` past the
/// last one yields an empty slice; callers are expected to clamp into
/// `1..=page_count` before rendering. A zero `page` or `page_size` is a
/// caller bug, not a runtime condition.
pub fn paginate<'a>(filtered: &[&'a Job], page: usize, page_size: usize) -> Page<'a> {
    assert!(page >= 1, "page is 1-based");
    assert!(page_size >= 1, "page_size must be positive");

    let page_count = filtered.len().div_ceil(page_size).max(1);
    let jobs = filtered
        .iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .copied()
        .collect();
    Page { jobs, page_count }
}

/// Run-status of a job relative to an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Completed,
    Pending,
    InProgress,
    StartsIn { hours: i64, minutes: i64 },
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunStatus::Completed => write!(f, "Completed"),
            RunStatus::Pending => write!(f, "Pending"),
            RunStatus::InProgress => write!(f, "In Progress"),
            RunStatus::StartsIn { hours, minutes } => {
                write!(f, "Starts in {}h {}m", hours, minutes)
            }
        }
    }
}

/// First matching rule wins: completed, then no next run, then a next
/// run that is due, then a countdown floored to whole hours and minutes.
pub fn describe_status(job: &Job, now: DateTime<Utc>) -> RunStatus {
    if job.is_completed {
        return RunStatus::Completed;
    }
    let next_run = match job.next_run {
        Some(t) => t,
        None => return RunStatus::Pending,
    };
    if next_run <= now {
        return RunStatus::InProgress;
    }
    let millis = next_run.signed_duration_since(now).num_milliseconds();
    RunStatus::StartsIn {
        hours: millis / 3_600_000,
        minutes: (millis % 3_600_000) / 60_000,
    }
}

/// Presentation severity for the notification feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Running,
    Success,
    Error,
}

/// Label and severity for the notification feed. Absent and unrecognized
/// status strings both get the pending treatment.
pub fn describe_notification_status(job: &Job) -> (&'static str, Severity) {
    match job.status.as_deref() {
        Some("running") => ("Running", Severity::Running),
        Some("completed") => ("Completed", Severity::Success),
        Some("failed") => ("Failed", Severity::Error),
        _ => ("Pending", Severity::Info),
    }
}

/// Order jobs by next run, soonest first. Jobs with no next run sort
/// last; ties keep their original order.
pub fn order_by_next_run(jobs: &[Job]) -> Vec<&Job> {
    let mut ordered: Vec<&Job> = jobs.iter().collect();
    ordered.sort_by_key(|job| (job.next_run.is_none(), job.next_run));
    ordered
}

/// Counts backing the dashboard metric cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JobMetrics {
    pub total: usize,
    pub completed: usize,
}

impl JobMetrics {
    pub fn from_jobs(jobs: &[Job]) -> Self {
        Self {
            total: jobs.len(),
            completed: jobs.iter().filter(|job| job.is_completed).count(),
        }
    }
}
