//! Alsvid circuit and observable types.
//!
//! This crate provides the typed payloads the Alsvid runtime client
//! submits to a hosted quantum program:
//!
//! - [`Ansatz`]: parameterized circuit templates used as trial
//!   wavefunctions, with the [`Ansatz::real_amplitudes`] and
//!   [`Ansatz::efficient_su2`] hardware-efficient builders
//! - [`PauliSumOp`] / [`SparsePauliOp`]: qubit observables in the
//!   Pauli-sum form the program consumes
//! - [`Observable`]: the operator argument surface, normalized into
//!   canonical form at the dispatch boundary
//!
//! # Example: Building a Submission Payload
//!
//! ```
//! use alsvid_ir::{Ansatz, Observable, SparsePauliOp};
//!
//! // Trial wavefunction over 3 qubits, one entangling repetition.
//! let ansatz = Ansatz::real_amplitudes(3, 1);
//! assert_eq!(ansatz.num_parameters(), 6);
//!
//! // Z ⊗ I ⊗ Z observable.
//! let operator = SparsePauliOp::from_list(&[("ZIZ", 1.0)])?;
//! let normalized = Observable::from(operator).to_pauli_sum()?;
//! assert_eq!(normalized.num_qubits(), 3);
//! # Ok::<(), alsvid_ir::IrError>(())
//! ```

pub mod ansatz;
pub mod error;
pub mod observable;
pub mod operator;

pub use ansatz::{Angle, Ansatz, AnsatzGate};
pub use error::{IrError, IrResult};
pub use observable::Observable;
pub use operator::{Pauli, PauliString, PauliSumOp, SparsePauliOp};
