//! IonQ Demo Suite
//!
//! Small programs showing how a caller drives the IonQ job client:
//!
//! - **create-small-job**: submit a Hadamard or Bell circuit, poll until it
//!   finishes, check the output distribution
//! - **list-jobs**: filter jobs and walk the `next` cursor page by page
//! - **cancel-job**: cancel a job, optionally delete it afterwards
//!
//! The client itself has no polling or pagination loop. The loops here are
//! the caller-side conventions: fixed poll interval, overall deadline, and a
//! bounded number of pages.
//!
//! ```ignore
//! use std::time::Duration;
//! use ionq_demos::poll::poll_until_terminal;
//!
//! let job = poll_until_terminal(&client, &job_id, Duration::from_secs(5), Duration::from_secs(60)).await?;
//! ```

pub mod circuits;
pub mod poll;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use ionq_client::{ClientConfig, DEFAULT_ENDPOINT, IonqClient, IonqResult};
use tracing_subscriber::EnvFilter;

/// Endpoint and credentials shared by every demo binary.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// IonQ API key
    #[arg(long, env = "IONQ_API_KEY", hide_env_values = true)]
    pub api_key: String,

    /// Versioned API endpoint
    #[arg(long, env = "IONQ_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ConnectionArgs {
    /// Build a client from the parsed arguments.
    pub fn client(&self) -> IonqResult<IonqClient> {
        IonqClient::with_config(ClientConfig::new(&self.api_key).with_endpoint(&self.endpoint))
    }
}

/// Install the `tracing` subscriber.
pub fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Spinner shown while waiting on the service.
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("!").yellow().bold(), message);
}
