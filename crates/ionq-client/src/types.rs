//! Request and response types for the `jobs` API.
//!
//! Optional wire fields are `Option`s (or empty collections) and are left
//! off the JSON body when unset. The service treats an omitted field
//! differently from an explicit zero, so `None` and `Some(0)` are distinct.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Job status
// ---------------------------------------------------------------------------

/// Lifecycle status of a job, as reported by the service.
///
/// ```text
///   submitted ──→ ready ──→ running ──→ completed
///                   │          │
///                   │          ├──→ failed
///                   └──────────┴──→ canceled
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum JobStatus {
    /// Accepted, not yet queued.
    Submitted,
    /// Queued for execution.
    Ready,
    /// Executing on the target.
    Running,
    /// Finished; results are available.
    Completed,
    /// Execution failed; see [`Job::failure`].
    Failed,
    /// Cancelled by the owner.
    Canceled,
    /// Deleted by the owner.
    Deleted,
    /// Any status string this client does not know about.
    Other(String),
}

impl JobStatus {
    /// The wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Submitted => "submitted",
            JobStatus::Ready => "ready",
            JobStatus::Running => "running",
            JobStatus::Completed => "completed",
            JobStatus::Failed => "failed",
            JobStatus::Canceled => "canceled",
            JobStatus::Deleted => "deleted",
            JobStatus::Other(s) => s,
        }
    }

    /// No further transitions happen from this status.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Completed | JobStatus::Failed | JobStatus::Canceled | JobStatus::Deleted
        )
    }

    /// Still waiting for or undergoing execution.
    pub fn is_pending(&self) -> bool {
        matches!(
            self,
            JobStatus::Submitted | JobStatus::Ready | JobStatus::Running
        )
    }

    /// Finished with results.
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Completed)
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "submitted" => JobStatus::Submitted,
            "ready" => JobStatus::Ready,
            "running" => JobStatus::Running,
            "completed" => JobStatus::Completed,
            "failed" => JobStatus::Failed,
            // The service has used both spellings.
            "canceled" | "cancelled" => JobStatus::Canceled,
            "deleted" => JobStatus::Deleted,
            _ => JobStatus::Other(s),
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        JobStatus::from(s.to_string())
    }
}

impl From<JobStatus> for String {
    fn from(status: JobStatus) -> Self {
        match status {
            JobStatus::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Shared value objects
// ---------------------------------------------------------------------------

/// Noise model applied by a simulator target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoiseInput {
    /// Model name, e.g. `"ideal"`, `"aria-1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Seed for the noisy simulation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<i64>,
}

impl NoiseInput {
    /// A named noise model without a seed.
    pub fn model(model: impl Into<String>) -> Self {
        Self {
            model: Some(model.into()),
            seed: None,
        }
    }

    /// Fix the simulation seed.
    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Error-mitigation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorMitigationInput {
    /// Request debiasing of the returned distribution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debias: Option<bool>,
}

impl ErrorMitigationInput {
    /// Turn debiasing on or off explicitly.
    pub fn debias(enabled: bool) -> Self {
        Self {
            debias: Some(enabled),
        }
    }
}

// ---------------------------------------------------------------------------
// Circuit input
// ---------------------------------------------------------------------------

/// One gate of a circuit in `ionq.circuit.v0` format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircuitInput {
    /// Gate name, e.g. `"h"`, `"cnot"`, `"rz"`.
    pub gate: String,
    /// Single target qubit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<u32>,
    /// Multiple target qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<u32>,
    /// Single control qubit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<u32>,
    /// Multiple control qubits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub controls: Vec<u32>,
    /// Rotation angle in radians.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
}

impl CircuitInput {
    /// A gate with no operands yet.
    pub fn new(gate: impl Into<String>) -> Self {
        Self {
            gate: gate.into(),
            ..Default::default()
        }
    }

    /// Set the single target qubit.
    pub fn with_target(mut self, qubit: u32) -> Self {
        self.target = Some(qubit);
        self
    }

    /// Set the target qubits.
    pub fn with_targets(mut self, qubits: impl IntoIterator<Item = u32>) -> Self {
        self.targets = qubits.into_iter().collect();
        self
    }

    /// Set the single control qubit.
    pub fn with_control(mut self, qubit: u32) -> Self {
        self.control = Some(qubit);
        self
    }

    /// Set the control qubits.
    pub fn with_controls(mut self, qubits: impl IntoIterator<Item = u32>) -> Self {
        self.controls = qubits.into_iter().collect();
        self
    }

    /// Set the rotation angle in radians.
    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation = Some(radians);
        self
    }

    /// Every qubit index this gate touches.
    pub fn qubits(&self) -> impl Iterator<Item = u32> + '_ {
        self.target
            .iter()
            .chain(self.targets.iter())
            .chain(self.control.iter())
            .chain(self.controls.iter())
            .copied()
    }
}

/// The program a job executes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobInput {
    /// Number of qubits the circuit uses. Always sent.
    pub qubits: u32,
    /// Input format, e.g. `"ionq.circuit.v0"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Gate set, e.g. `"qis"` or `"native"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gateset: Option<String>,
    /// Gates in execution order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub circuit: Vec<CircuitInput>,
}

impl JobInput {
    /// Input format for the JSON circuit representation.
    pub const CIRCUIT_V0: &'static str = "ionq.circuit.v0";

    /// An empty `ionq.circuit.v0` program over `qubits` qubits.
    pub fn new(qubits: u32) -> Self {
        Self {
            qubits,
            format: Some(Self::CIRCUIT_V0.to_string()),
            gateset: None,
            circuit: Vec::new(),
        }
    }

    /// Override the input format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Select the gate set.
    pub fn with_gateset(mut self, gateset: impl Into<String>) -> Self {
        self.gateset = Some(gateset.into());
        self
    }

    /// Append a gate.
    pub fn push(mut self, gate: CircuitInput) -> Self {
        self.circuit.push(gate);
        self
    }

    /// Highest qubit index referenced by the circuit.
    pub fn max_qubit_index(&self) -> Option<u32> {
        self.circuit.iter().flat_map(CircuitInput::qubits).max()
    }
}

// ---------------------------------------------------------------------------
// Job record
// ---------------------------------------------------------------------------

/// Gate counts of the submitted circuit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateCounts {
    /// Single-qubit gates.
    #[serde(rename = "1q", default, skip_serializing_if = "Option::is_none")]
    pub one_qubit: Option<u64>,
    /// Two-qubit gates.
    #[serde(rename = "2q", default, skip_serializing_if = "Option::is_none")]
    pub two_qubit: Option<u64>,
}

/// Why a job failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobFailure {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Non-fatal warnings attached to a job.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobWarning {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<String>,
}

/// A job as known to the service.
///
/// Read-only from the client's side: the service creates and updates it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
    /// Backend, e.g. `"simulator"`, `"qpu.aria-1"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseInput>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_mitigation: Option<ErrorMitigationInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate_counts: Option<GateCounts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qubits: Option<u32>,
    /// Estimated or billed cost in USD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_usd: Option<f64>,
    /// Submission time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<u64>,
    /// Execution start, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<u64>,
    /// Completion time, unix seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<u64>,
    /// Execution duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<u64>,
    /// Predicted execution duration in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicted_execution_time: Option<u64>,
    /// Ids of child jobs (multi-circuit submissions).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<JobFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<JobWarning>,
    /// Number of circuits in the job.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub circuits: Option<u32>,
}

impl Job {
    /// Whether the job has reached a terminal status.
    pub fn is_terminal(&self) -> bool {
        self.status.as_ref().is_some_and(JobStatus::is_terminal)
    }

    /// Whether the job completed and has results.
    pub fn is_completed(&self) -> bool {
        self.status.as_ref().is_some_and(JobStatus::is_success)
    }

    /// Failure message, if the job failed.
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_ref().and_then(|f| f.error.as_deref())
    }
}

// ---------------------------------------------------------------------------
// Operation payloads
// ---------------------------------------------------------------------------

/// Filters for `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListJobsRequest {
    /// Restrict to these ids; sent as one `id` parameter per entry.
    pub ids: Vec<String>,
    pub status: Option<JobStatus>,
    /// Page size.
    pub limit: Option<u32>,
    /// Cursor returned by the previous page.
    pub next: Option<String>,
}

impl ListJobsRequest {
    /// No filters: the first page of all jobs.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to these job ids.
    pub fn with_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Only jobs in this status.
    pub fn with_status(mut self, status: impl Into<JobStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Continue from a previous page's cursor.
    pub fn with_next(mut self, cursor: impl Into<String>) -> Self {
        self.next = Some(cursor.into());
        self
    }

    /// Query parameters in wire order: every `id`, then `status`, `limit`, `next`.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs: Vec<(&'static str, String)> =
            self.ids.iter().map(|id| ("id", id.clone())).collect();
        if let Some(status) = &self.status {
            pairs.push(("status", status.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(next) = &self.next {
            pairs.push(("next", next.clone()));
        }
        pairs
    }
}

/// One page of `GET /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListJobsResponse {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<Job>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl ListJobsResponse {
    /// Cursor for the following page, `None` on the last page.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next.as_deref().filter(|c| !c.is_empty())
    }
}

/// Body of `POST /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    /// Number of shots; `None` leaves the service default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shots: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub noise: Option<NoiseInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<JobInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_mitigation: Option<ErrorMitigationInput>,
}

impl CreateJobRequest {
    /// A request carrying `input` and nothing else.
    pub fn new(input: JobInput) -> Self {
        Self {
            input: Some(input),
            ..Default::default()
        }
    }

    /// Human-readable job name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Number of shots; unset means the service default.
    pub fn with_shots(mut self, shots: u32) -> Self {
        self.shots = Some(shots);
        self
    }

    /// Backend to run on, e.g. `"simulator"`.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Simulator noise settings.
    pub fn with_noise(mut self, noise: NoiseInput) -> Self {
        self.noise = Some(noise);
        self
    }

    /// Error-mitigation settings.
    pub fn with_error_mitigation(mut self, mitigation: ErrorMitigationInput) -> Self {
        self.error_mitigation = Some(mitigation);
        self
    }
}

/// Response of `POST /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateJobResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Response of `DELETE /jobs/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteJobResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Response of `PUT /jobs/{id}/status/cancel`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CancelJobResponse {
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

/// Body of `DELETE /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteManyJobsRequest {
    pub ids: Vec<String>,
}

impl DeleteManyJobsRequest {
    /// Delete every job in `ids`.
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response of `DELETE /jobs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteManyJobsResponse {
    #[serde(default)]
    pub ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<JobStatus>,
}

// ---------------------------------------------------------------------------
// Job output
// ---------------------------------------------------------------------------

/// Probability distribution returned by `GET /jobs/{id}/results`.
///
/// Keys are basis-state indices as decimal strings (`"0"` .. `"2^n - 1"`);
/// states with zero probability are usually absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobOutput(HashMap<String, f32>);

impl JobOutput {
    /// Probability of basis state `index` (zero when absent).
    pub fn probability(&self, index: u64) -> f32 {
        self.0.get(&index.to_string()).copied().unwrap_or(0.0)
    }

    /// Sum of all probabilities; 1.0 for an ideal run, up to float error.
    pub fn total(&self) -> f32 {
        self.0.values().sum()
    }

    /// The most probable basis state. Keys that are not integers are skipped.
    pub fn most_likely(&self) -> Option<(u64, f32)> {
        self.0
            .iter()
            .filter_map(|(k, p)| k.parse::<u64>().ok().map(|i| (i, *p)))
            .max_by(|a, b| a.1.total_cmp(&b.1).then(b.0.cmp(&a.0)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.0.iter().map(|(k, p)| (k.as_str(), *p))
    }

    pub fn as_map(&self) -> &HashMap<String, f32> {
        &self.0
    }

    pub fn into_inner(self) -> HashMap<String, f32> {
        self.0
    }
}

impl From<HashMap<String, f32>> for JobOutput {
    fn from(map: HashMap<String, f32>) -> Self {
        Self(map)
    }
}
