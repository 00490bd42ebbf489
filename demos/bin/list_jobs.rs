//! List jobs, following the pagination cursor from the caller side.

use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use ionq_client::{Context, JobStatus, ListJobsRequest};

use ionq_demos::{ConnectionArgs, init_logging, print_header, print_result, print_section};

#[derive(Parser, Debug)]
#[command(name = "list-jobs")]
#[command(about = "List IonQ jobs with optional filters")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Only these job ids (repeatable)
    #[arg(long = "id")]
    ids: Vec<String>,

    /// Only jobs with this status
    #[arg(long)]
    status: Option<String>,

    /// Page size
    #[arg(short, long)]
    limit: Option<u32>,

    /// Start from this cursor
    #[arg(long)]
    next: Option<String>,

    /// Follow the cursor until the last page
    #[arg(long)]
    all: bool,

    /// Upper bound on pages fetched with --all
    #[arg(long, default_value = "10")]
    max_pages: usize,

    /// Per-request deadline in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.connection.verbose);

    print_header("IonQ Jobs");

    let client = args.connection.client()?;
    let mut request = ListJobsRequest::new().with_ids(args.ids.iter().cloned());
    request.status = args.status.as_deref().map(JobStatus::from);
    request.limit = args.limit;
    request.next = args.next.clone();

    let mut total = 0usize;
    for page in 1..=args.max_pages {
        let ctx = Context::with_timeout(Duration::from_secs(args.timeout));
        let resp = client.list_jobs(&ctx, &request).await?;
        if !resp.is_success() {
            bail!("list jobs returned HTTP {}", resp.status);
        }

        print_section(&format!("Page {page}"));
        for job in &resp.response.jobs {
            let status = job.status.as_ref().map_or("-", JobStatus::as_str);
            let target = job.target.as_deref().unwrap_or("-");
            print_result(&job.id, format!("{status:<10} {target}"));
        }
        total += resp.response.jobs.len();

        match resp.response.next_cursor() {
            Some(cursor) if args.all => request.next = Some(cursor.to_string()),
            Some(cursor) => {
                print_result("Next cursor", cursor);
                break;
            }
            None => break,
        }
    }

    print_section("Summary");
    print_result("Jobs listed", total);
    Ok(())
}
