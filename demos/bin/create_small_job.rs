//! Submit a small job and wait for its output.
//!
//! Applies a Hadamard to every qubit (or prepares a Bell pair) on the
//! simulator with the `ideal` noise model, polls until the job is terminal,
//! then checks the output against the ideal distribution.

use std::time::Duration;

use anyhow::{Context as _, bail};
use clap::Parser;
use ionq_client::{Context, CreateJobRequest, NoiseInput};
use tracing::info;

use ionq_demos::circuits::{DemoCircuit, MAX_DEMO_QUBITS, state_count};
use ionq_demos::poll::poll_until_terminal;
use ionq_demos::{
    ConnectionArgs, create_spinner, init_logging, print_header, print_result, print_section,
    print_success, print_warning,
};

#[derive(Parser, Debug)]
#[command(name = "create-small-job")]
#[command(about = "Submit a small circuit and poll until it completes")]
struct Args {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Circuit to submit
    #[arg(short, long, value_enum, default_value = "hadamard")]
    circuit: DemoCircuit,

    /// Number of qubits (Hadamard only)
    #[arg(
        short = 'n',
        long,
        default_value = "3",
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DEMO_QUBITS))
    )]
    qubits: u32,

    /// Number of shots
    #[arg(short, long, default_value = "1000")]
    shots: u32,

    /// Target backend
    #[arg(short, long, default_value = "simulator")]
    target: String,

    /// Noise model
    #[arg(long, default_value = "ideal")]
    noise: String,

    /// Seconds between status checks
    #[arg(long, default_value = "5", value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Overall deadline in seconds
    #[arg(long, default_value = "60")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.connection.verbose);

    print_header("IonQ Small Job Demo");

    let client = args.connection.client()?;
    let ctx = Context::with_timeout(Duration::from_secs(args.timeout));

    print_section("Submission");
    let qubits = args.circuit.qubits(args.qubits);
    let request = CreateJobRequest::new(args.circuit.build(qubits))
        .with_name(format!("{:?}-{}", args.circuit, qubits).to_lowercase())
        .with_shots(args.shots)
        .with_target(&args.target)
        .with_noise(NoiseInput::model(&args.noise));

    let created = client
        .create_job(&ctx, &request)
        .await
        .context("error creating job")?;
    if !created.is_success() {
        let detail = created
            .remote_error()
            .and_then(|e| e.message.clone())
            .unwrap_or_default();
        bail!("create job returned HTTP {}: {}", created.status, detail);
    }

    let job_id = created.response.id;
    print_result("Job", &job_id);
    print_result("Target", &args.target);
    print_result("Shots", args.shots);
    info!("Submitted job {}", job_id);

    print_section("Execution");
    let spinner = create_spinner(&format!("waiting for {job_id}"));
    spinner.enable_steady_tick(Duration::from_millis(120));
    let remaining = ctx.remaining().unwrap_or_default();
    let job = poll_until_terminal(
        &client,
        &job_id,
        Duration::from_secs(args.interval),
        remaining,
    )
    .await;
    spinner.finish_and_clear();
    let job = job?;

    let status = job.status.clone().map(|s| s.to_string()).unwrap_or_default();
    print_result("Status", &status);
    if let Some(ms) = job.execution_time {
        print_result("Execution time", format!("{ms} ms"));
    }
    if !job.is_completed() {
        bail!(
            "job {} ended as {}: {}",
            job_id,
            status,
            job.failure_message().unwrap_or("no failure message")
        );
    }

    print_section("Output");
    let output = client
        .get_job_output(&ctx, &job_id)
        .await
        .context("error getting job output")?;
    if !output.is_success() {
        bail!("get output returned HTTP {}", output.status);
    }

    let distribution = output.response;
    let mut states: Vec<(&str, f32)> = distribution.iter().collect();
    states.sort_by_key(|(k, _)| k.parse::<u64>().unwrap_or(u64::MAX));
    for (state, p) in &states {
        print_result(&format!("|{state}⟩"), format!("{p:.4}"));
    }
    print_result("Total", format!("{:.4}", distribution.total()));

    let Some(states) = state_count(qubits) else {
        bail!("{qubits} qubits is too wide to check state by state");
    };
    let off: Vec<u64> = (0..states)
        .filter(|&i| {
            let expected = args.circuit.expected_probability(qubits, i);
            (distribution.probability(i) - expected).abs() > 1e-3
        })
        .collect();
    if off.is_empty() {
        print_success(&format!("ideal {:?} distribution over {states} states", args.circuit));
    } else {
        print_warning(&format!("{} states deviate from the ideal distribution", off.len()));
    }

    Ok(())
}
