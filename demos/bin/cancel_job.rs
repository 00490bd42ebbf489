//! Cancel a job and report the status the service ends up with.

use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use ionq_client::{Context, DeleteManyJobsRequest};

use ionq_demos::{
    ConnectionArgs, init_logging, print_header, print_result, print_section, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "cancel-job")]
#[command(about = "Cancel IonQ jobs, optionally deleting them")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Job ids to cancel
    #[arg(required = true)]
    ids: Vec<String>,

    /// Delete the jobs after cancelling
    #[arg(long)]
    delete: bool,

    /// Per-request deadline in seconds
    #[arg(long, default_value = "30")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.connection.verbose);

    print_header("IonQ Cancel Job");

    let client = args.connection.client()?;
    let ctx = Context::with_timeout(Duration::from_secs(args.timeout));

    print_section("Cancel");
    for id in &args.ids {
        let resp = client.cancel_job(&ctx, id).await?;
        let status = resp
            .response
            .status
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| format!("HTTP {}", resp.status));
        print_result(id, status);
    }

    print_section("Status");
    for id in &args.ids {
        let resp = client.get_job(&ctx, id).await?;
        if !resp.is_success() {
            bail!("get job {} returned HTTP {}", id, resp.status);
        }
        let status = resp.response.status.map(|s| s.to_string()).unwrap_or_default();
        print_result(id, status);
    }

    if args.delete {
        print_section("Delete");
        let (http_status, job_status) = match args.ids.as_slice() {
            [single] => {
                let resp = client.delete_job(&ctx, single).await?;
                (resp.status, resp.response.status)
            }
            many => {
                let resp = client
                    .delete_many_jobs(&ctx, &DeleteManyJobsRequest::new(many.iter().cloned()))
                    .await?;
                (resp.status, resp.response.status)
            }
        };
        if !(200..300).contains(&http_status) {
            bail!("delete returned HTTP {}", http_status);
        }
        print_success(&format!(
            "{} job(s) {}",
            args.ids.len(),
            job_status.map(|s| s.to_string()).unwrap_or_else(|| "deleted".into())
        ));
    }

    Ok(())
}
