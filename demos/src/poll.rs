//! Caller-side polling of a job until it reaches a terminal status.

use std::time::{Duration, Instant};

use ionq_client::{Context, IonqClient, IonqError, Job};
use thiserror::Error;
use tracing::{debug, info};

/// Why polling stopped without a terminal job.
#[derive(Debug, Error)]
pub enum PollError {
    /// The overall deadline passed first.
    #[error("Timeout waiting for job {job_id} after {waited:?}")]
    Timeout { job_id: String, waited: Duration },

    /// The service answered with a non-2xx status.
    #[error("Unexpected HTTP status {status} for job {job_id}")]
    Status { job_id: String, status: u16 },

    /// Transport or decoding failure.
    #[error(transparent)]
    Client(#[from] IonqError),
}

/// Fetch `job_id` every `interval` until its status is terminal.
///
/// Gives up with [`PollError::Timeout`] once `timeout` has elapsed; there is
/// no retry on a failed request. A zero `interval` polls back to back.
pub async fn poll_until_terminal(
    client: &IonqClient,
    job_id: &str,
    interval: Duration,
    timeout: Duration,
) -> Result<Job, PollError> {
    let started = Instant::now();
    let ctx = Context::with_timeout(timeout);
    let timed_out = || PollError::Timeout {
        job_id: job_id.to_string(),
        waited: started.elapsed(),
    };

    loop {
        let resp = match client.get_job(&ctx, job_id).await {
            Ok(resp) => resp,
            Err(IonqError::DeadlineExceeded) => return Err(timed_out()),
            Err(e) => return Err(e.into()),
        };

        if !resp.is_success() {
            return Err(PollError::Status {
                job_id: job_id.to_string(),
                status: resp.status,
            });
        }

        let job = resp.response;
        match &job.status {
            Some(status) if status.is_terminal() => {
                info!("Job {} reached {}", job_id, status);
                return Ok(job);
            }
            status => debug!("Job {} is {:?}, polling again", job_id, status),
        }

        let left = ctx.remaining().unwrap_or(Duration::MAX);
        if left.is_zero() {
            return Err(timed_out());
        }
        tokio::time::sleep(left.min(interval)).await;
    }
}
