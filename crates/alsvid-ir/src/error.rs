//! Error types for the IR crate.

use thiserror::Error;

/// Errors that can occur in IR operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// Qubit index outside the circuit.
    #[error("Qubit {index} out of range for {num_qubits}-qubit ansatz")]
    QubitOutOfRange {
        /// The offending qubit index.
        index: usize,
        /// Number of qubits in the ansatz.
        num_qubits: usize,
    },

    /// Two-qubit gate addressing a single qubit.
    #[error("Control and target must differ, both are qubit {0}")]
    ControlEqualsTarget(usize),

    /// Character that is not a Pauli label.
    #[error("Invalid Pauli label '{0}', expected one of I, X, Y, Z")]
    InvalidPauli(char),

    /// Pauli word with no qubits.
    #[error("Pauli word must cover at least one qubit")]
    EmptyPauli,

    /// Operator with no terms.
    #[error("Operator has no terms")]
    EmptyOperator,

    /// Pauli words of different widths in one operator.
    #[error("Pauli word width mismatch: expected {expected}, got {got}")]
    WidthMismatch {
        /// Width of the first word.
        expected: usize,
        /// Width of the offending word.
        got: usize,
    },

    /// Matrix that cannot be expressed over the Pauli basis.
    #[error("Cannot convert matrix to a Pauli sum: {0}")]
    NotPauliDecomposable(String),
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
