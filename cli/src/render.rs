use anyhow::Result;
use chrono::{DateTime, Utc};
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use common::{
    describe_notification_status, describe_status, Job, JobMetrics, RunStatus, Severity,
};

fn timestamp(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(t) => t.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => "-".to_string(),
    }
}

fn base_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

/// The full job table, one row per job on the current page.
pub fn job_table(jobs: &[&Job]) -> Table {
    let mut table = base_table(vec![
        "ID",
        "Title",
        "Description",
        "Interval",
        "Completed",
        "Last Run",
        "Next Run",
        "Created",
        "Updated",
    ]);
    for job in jobs {
        table.add_row(vec![
            Cell::new(job.id),
            Cell::new(&job.title),
            Cell::new(&job.description),
            Cell::new(&job.schedule_interval),
            Cell::new(if job.is_completed { "yes" } else { "no" }),
            Cell::new(timestamp(job.last_run)),
            Cell::new(timestamp(job.next_run)),
            Cell::new(timestamp(Some(job.created_at))),
            Cell::new(timestamp(Some(job.updated_at))),
        ]);
    }
    table
}

/// The "Recent Jobs" view: identity, description and a colored run-status
/// badge derived from `describe_status`.
pub fn recent_table(jobs: &[&Job], now: DateTime<Utc>) -> Table {
    let mut table = base_table(vec!["Job", "Description", "Status"]);
    for job in jobs {
        let status = describe_status(job, now);
        let color = match status {
            RunStatus::Completed => Color::Green,
            RunStatus::Pending => Color::Red,
            RunStatus::InProgress | RunStatus::StartsIn { .. } => Color::Yellow,
        };
        table.add_row(vec![
            Cell::new(format!("{} (#{})", job.title, job.id)),
            Cell::new(&job.description),
            Cell::new(status.to_string()).fg(color),
        ]);
    }
    table
}

/// Metric cards as a two-row table.
pub fn metrics_cards(metrics: &JobMetrics) -> Table {
    let mut table = base_table(vec!["Metric", "Count"]);
    table.add_row(vec![Cell::new("Total Jobs"), Cell::new(metrics.total)]);
    table.add_row(vec![
        Cell::new("Completed Jobs"),
        Cell::new(metrics.completed),
    ]);
    table
}

/// Notification feed: jobs come pre-sorted by next run.
pub fn notification_feed(jobs: &[&Job]) -> Table {
    let mut table = base_table(vec!["Job", "Status", "Scheduled At"]);
    for job in jobs {
        let (label, severity) = describe_notification_status(job);
        let color = match severity {
            Severity::Info => Color::DarkYellow,
            Severity::Running => Color::Blue,
            Severity::Success => Color::Green,
            Severity::Error => Color::Red,
        };
        table.add_row(vec![
            Cell::new(&job.title),
            Cell::new(label).fg(color),
            Cell::new(timestamp(job.next_run)),
        ]);
    }
    table
}

/// CSV export of the filtered list. Missing timestamps become empty
/// fields rather than the "-" used on screen.
pub fn write_csv<W: std::io::Write>(jobs: &[&Job], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "id",
        "title",
        "description",
        "schedule_interval",
        "is_completed",
        "last_run",
        "next_run",
        "created_at",
        "updated_at",
    ])?;
    for job in jobs {
        wtr.write_record([
            job.id.to_string(),
            job.title.clone(),
            job.description.clone(),
            job.schedule_interval.clone(),
            job.is_completed.to_string(),
            job.last_run.map(|t| timestamp(Some(t))).unwrap_or_default(),
            job.next_run.map(|t| timestamp(Some(t))).unwrap_or_default(),
            timestamp(Some(job.created_at)),
            timestamp(Some(job.updated_at)),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Detail block for a single job.
pub fn print_job_detail(job: &Job) {
    println!("Job Details:");
    println!("  ID:          {}", job.id);
    println!("  Title:       {}", job.title);
    println!("  Description: {}", job.description);
    println!("  Interval:    {}", job.schedule_interval);
    println!("  Completed:   {}", job.is_completed);
    println!("  Last Run:    {}", timestamp(job.last_run));
    println!("  Next Run:    {}", timestamp(job.next_run));
    println!("  Created:     {}", timestamp(Some(job.created_at)));
    println!("  Updated:     {}", timestamp(Some(job.updated_at)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn job(id: i64, title: &str) -> Job {
        let created = Utc.with_ymd_and_hms(2025, 8, 1, 9, 0, 0).unwrap();
        Job {
            id,
            title: title.to_string(),
            description: "desc".to_string(),
            schedule_interval: "0 2 * * *".to_string(),
            is_completed: false,
            last_run: None,
            next_run: None,
            created_at: created,
            updated_at: created,
            status: None,
        }
    }

    #[test]
    fn job_table_renders_placeholder_for_missing_runs() {
        let j = job(1, "Backup");
        let rendered = job_table(&[&j]).to_string();
        assert!(rendered.contains("Backup"));
        assert!(rendered.contains('-'));
    }

    #[test]
    fn recent_table_shows_countdown_label() {
        let now = Utc.with_ymd_and_hms(2025, 8, 6, 12, 0, 0).unwrap();
        let mut j = job(1, "Backup");
        j.next_run = Some(now + Duration::minutes(90));
        let rendered = recent_table(&[&j], now).to_string();
        assert!(rendered.contains("Starts in 1h 30m"));
    }

    #[test]
    fn csv_export_has_a_header_and_one_row_per_job() {
        let jobs = [job(1, "Backup"), job(2, "Report")];
        let refs: Vec<&Job> = jobs.iter().collect();
        let mut out = Vec::new();
        write_csv(&refs, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().starts_with("id,title"));
        assert!(text.contains("Report"));
    }
}
