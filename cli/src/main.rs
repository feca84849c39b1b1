mod client;
mod config;
mod render;

use anyhow::{bail, ensure, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use client::ApiClient;
use common::{filter_jobs, order_by_next_run, paginate, JobCreate, JobMetrics, JobUpdate};
use config::Config;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Terminal dashboard for the schedule API", long_about = None)]
struct Cli {
    /// Backend base URL (overrides the config file)
    #[arg(long, global = true)]
    url: Option<String>,
    /// Path to a YAML or TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List jobs in a searchable, paginated table
    List {
        /// Match against job titles and ids
        #[arg(short, long, default_value = "")]
        search: String,
        /// 1-based page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        /// Jobs per page (overrides the config file)
        #[arg(long)]
        page_size: Option<usize>,
        /// Output format; csv and json export the whole filtered set
        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,
    },
    /// Show jobs with their current run status
    Recent {
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Create a new job
    Add {
        #[arg(short, long)]
        title: String,
        #[arg(short, long)]
        description: String,
        /// Cron-like schedule interval, passed to the backend verbatim
        #[arg(short, long)]
        interval: String,
    },
    /// Update fields of an existing job
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        interval: Option<String>,
    },
    /// Delete a job
    Remove { id: i64 },
    /// Show details for one job
    Get { id: i64 },
    /// Show job totals
    Metrics,
    /// Show upcoming jobs as a notification feed
    Notifications,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Csv,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_ref())?;
    if let Some(url) = cli.url {
        config.api.base_url = url;
    }
    let client = ApiClient::new(
        &config.api.base_url,
        Duration::from_secs(config.api.timeout_secs),
    )?;

    match cli.command {
        Commands::List {
            search,
            page,
            page_size,
            format,
        } => {
            let page_size = page_size.unwrap_or(config.display.page_size);
            ensure!(page >= 1, "--page is 1-based");
            ensure!(page_size >= 1, "--page-size must be greater than zero");

            let jobs = client.list_jobs().await?;
            let filtered = filter_jobs(&jobs, &search);
            match format {
                Format::Table if filtered.is_empty() => println!("No jobs found."),
                Format::Table => {
                    let mut view = paginate(&filtered, page, page_size);
                    let shown = if page > view.page_count {
                        view = paginate(&filtered, view.page_count, page_size);
                        view.page_count
                    } else {
                        page
                    };
                    println!("{}", render::job_table(&view.jobs));
                    println!(
                        "Page {} of {} ({} jobs)",
                        shown,
                        view.page_count,
                        filtered.len()
                    );
                }
                Format::Csv => render::write_csv(&filtered, std::io::stdout())?,
                Format::Json => println!("{}", serde_json::to_string_pretty(&filtered)?),
            }
        }
        Commands::Recent { search } => {
            let jobs = client.list_jobs().await?;
            let filtered = filter_jobs(&jobs, &search);
            if filtered.is_empty() {
                println!("No jobs found.");
            } else {
                println!("{}", render::recent_table(&filtered, Utc::now()));
            }
        }
        Commands::Add {
            title,
            description,
            interval,
        } => {
            let job = client
                .create_job(&JobCreate {
                    title,
                    description,
                    schedule_interval: interval,
                })
                .await?;
            println!("Created job {} ({})", job.id, job.title);
        }
        Commands::Update {
            id,
            title,
            description,
            interval,
        } => {
            let req = JobUpdate {
                title,
                description,
                schedule_interval: interval,
            };
            if req.is_empty() {
                bail!("nothing to update: pass at least one of --title, --description, --interval");
            }
            let job = client.update_job(id, &req).await?;
            println!("Updated job {} ({})", job.id, job.title);
        }
        Commands::Remove { id } => {
            client.delete_job(id).await?;
            println!("Removed job {}", id);
        }
        Commands::Get { id } => {
            let job = client.get_job(id).await?;
            render::print_job_detail(&job);
        }
        Commands::Metrics => {
            let jobs = client.list_jobs().await?;
            println!("{}", render::metrics_cards(&JobMetrics::from_jobs(&jobs)));
        }
        Commands::Notifications => {
            let jobs = client.list_jobs().await?;
            if jobs.is_empty() {
                println!("No scheduled jobs");
            } else {
                println!("{}", render::notification_feed(&order_by_next_run(&jobs)));
            }
        }
    }

    Ok(())
}
