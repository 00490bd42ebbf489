//! Client for the IonQ Quantum Cloud job API
//!
//! This crate wraps the versioned `jobs` REST endpoints of IonQ
//! (`https://api.ionq.co/v0.3`): submit circuits, poll their status, read
//! output distributions, list, cancel and delete jobs.
//!
//! # Endpoints
//!
//! | Operation                          | Method + path                  |
//! |------------------------------------|--------------------------------|
//! | [`IonqClient::list_jobs`]          | `GET /jobs`                    |
//! | [`IonqClient::create_job`]         | `POST /jobs`                   |
//! | [`IonqClient::delete_many_jobs`]   | `DELETE /jobs`                 |
//! | [`IonqClient::get_job`]            | `GET /jobs/{id}`               |
//! | [`IonqClient::delete_job`]         | `DELETE /jobs/{id}`            |
//! | [`IonqClient::cancel_job`]         | `PUT /jobs/{id}/status/cancel` |
//! | [`IonqClient::get_job_output`]     | `GET /jobs/{id}/results`       |
//!
//! # Authentication
//!
//! Every request carries `Authorization: apiKey <key>`. The key can be passed
//! explicitly or read from the environment:
//!
//! ```bash
//! export IONQ_API_KEY="your-ionq-api-key"
//! export IONQ_ENDPOINT="https://api.ionq.co/v0.3"  # optional
//! ```
//!
//! # Status codes
//!
//! Operations return `Err` only for local failures: transport errors,
//! malformed JSON, an expired or cancelled [`Context`]. A 4xx/5xx answer is an
//! `Ok(ApiResponse)` with the status code and the decoded body; use
//! [`ApiResponse::is_success`] and [`ApiResponse::remote_error`] to inspect it.
//!
//! # Example
//!
//! ```ignore
//! use std::time::Duration;
//! use ionq_client::{CircuitInput, Context, CreateJobRequest, IonqClient, JobInput, NoiseInput};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = IonqClient::from_env()?;
//!     let ctx = Context::with_timeout(Duration::from_secs(30));
//!
//!     let input = JobInput::new(2)
//!         .push(CircuitInput::new("h").with_target(0))
//!         .push(CircuitInput::new("cnot").with_control(0).with_target(1));
//!     let request = CreateJobRequest::new(input)
//!         .with_target("simulator")
//!         .with_shots(1000)
//!         .with_noise(NoiseInput::model("ideal"));
//!
//!     let created = client.create_job(&ctx, &request).await?;
//!     println!("{} -> {:?}", created.status, created.response.id);
//!     Ok(())
//! }
//! ```
//!
//! No polling, retry or pagination loop is built in; the `demos` crate shows
//! the caller-side versions of each.

mod client;
mod config;
mod context;
mod error;
mod jobs;
mod response;
mod types;

pub use client::IonqClient;
pub use config::{API_KEY_ENV, ClientConfig, DEFAULT_ENDPOINT, ENDPOINT_ENV};
pub use context::{CancelHandle, Context};
pub use error::{IonqError, IonqResult};
pub use jobs::JOBS_PATH;
pub use response::{ApiResponse, RemoteError};
pub use types::{
    CancelJobResponse, CircuitInput, CreateJobRequest, CreateJobResponse, DeleteJobResponse,
    DeleteManyJobsRequest, DeleteManyJobsResponse, ErrorMitigationInput, GateCounts, Job,
    JobFailure, JobInput, JobOutput, JobStatus, JobWarning, ListJobsRequest, ListJobsResponse,
    NoiseInput,
};
