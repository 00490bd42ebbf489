//! Circuits used by the demos.

use clap::ValueEnum;
use ionq_client::{CircuitInput, JobInput};

/// Largest register the demos will submit and check state by state.
pub const MAX_DEMO_QUBITS: u32 = 16;

/// Circuit selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoCircuit {
    /// Hadamard on every qubit.
    Hadamard,
    /// Two-qubit Bell pair.
    Bell,
}

impl DemoCircuit {
    /// Register width actually used; a Bell pair is always two qubits.
    pub fn qubits(self, requested: u32) -> u32 {
        match self {
            Self::Hadamard => requested,
            Self::Bell => 2,
        }
    }

    pub fn build(self, qubits: u32) -> JobInput {
        match self {
            Self::Hadamard => hadamard_circuit(qubits),
            Self::Bell => bell_circuit(),
        }
    }

    /// Ideal probability of measuring basis state `state`.
    pub fn expected_probability(self, qubits: u32, state: u64) -> f32 {
        match self {
            Self::Hadamard => uniform_probability(qubits),
            Self::Bell if state == 0 || state == 3 => 0.5,
            Self::Bell => 0.0,
        }
    }
}

/// A Hadamard on every qubit: uniform distribution over `2^n` basis states.
pub fn hadamard_circuit(qubits: u32) -> JobInput {
    (0..qubits).fold(JobInput::new(qubits), |input, q| {
        input.push(CircuitInput::new("h").with_target(q))
    })
}

/// Two-qubit Bell pair: `|00⟩` and `|11⟩` with probability 1/2 each.
pub fn bell_circuit() -> JobInput {
    JobInput::new(2)
        .push(CircuitInput::new("h").with_target(0))
        .push(CircuitInput::new("cnot").with_control(0).with_target(1))
}

/// Expected probability of each basis state for [`hadamard_circuit`].
pub fn uniform_probability(qubits: u32) -> f32 {
    0.5f32.powi(i32::try_from(qubits).unwrap_or(i32::MAX))
}

/// Number of basis states of a `qubits`-wide register, if it fits in a `u64`.
pub fn state_count(qubits: u32) -> Option<u64> {
    1u64.checked_shl(qubits)
}
