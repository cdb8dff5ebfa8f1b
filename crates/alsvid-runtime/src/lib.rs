//! Alsvid runtime client
//!
//! This crate provides a client for variational-eigensolver programs
//! hosted by a remote quantum runtime service. The client validates and
//! packages submission parameters, dispatches them under the fixed
//! program id `vqe`, and decodes the result. The variational loop,
//! circuit execution, and error mitigation all run inside the hosted
//! program.
//!
//! # Overview
//!
//! - [`VqeProgram`] holds and validates the submission parameters
//!   (ansatz, optimizer, initial point, shots, mitigation, callback)
//!   and performs one remote invocation per call.
//! - [`Provider`] / [`Backend`] model the account entry point and the
//!   execution target. A provider must expose a [`RuntimeService`] to
//!   be accepted.
//! - [`RuntimeService`] / [`RuntimeJob`] are the seam to the remote
//!   service; the wire protocol behind them is owned by the provider's
//!   client library.
//!
//! # Example: Submitting a Computation
//!
//! ```ignore
//! use alsvid_ir::{Ansatz, Observable, SparsePauliOp};
//! use alsvid_runtime::VqeProgram;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut vqe = VqeProgram::new(Ansatz::real_amplitudes(3, 1));
//!     vqe.set_optimizer("SPSA")?;
//!     vqe.set_provider(provider)?;
//!     vqe.set_backend(backend);
//!     vqe.set_callback(|count, _params, mean, _std| {
//!         println!("iteration {count}: energy ≈ {mean}");
//!     });
//!
//!     let operator = Observable::from(SparsePauliOp::from_list(&[("ZIZ", 1.0)])?);
//!     let result = vqe.compute_minimum_eigenvalue(&operator, None).await?;
//!     println!("minimum eigenvalue: {}", result.eigenvalue);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Implementing a Provider
//!
//! ```ignore
//! use alsvid_runtime::{
//!     InterimCallback, Provider, RuntimeJob, RuntimeOptions, RuntimeResult, RuntimeService,
//! };
//! use async_trait::async_trait;
//! use serde_json::Value;
//!
//! struct MyProvider {
//!     runtime: MyRuntime,
//! }
//!
//! impl Provider for MyProvider {
//!     fn name(&self) -> &str { "my_provider" }
//!
//!     fn runtime(&self) -> Option<&dyn RuntimeService> {
//!         Some(&self.runtime)
//!     }
//! }
//!
//! struct MyRuntime;
//!
//! #[async_trait]
//! impl RuntimeService for MyRuntime {
//!     async fn run(
//!         &self,
//!         program_id: &str,
//!         inputs: Value,
//!         options: RuntimeOptions,
//!         callback: Option<InterimCallback>,
//!     ) -> RuntimeResult<Box<dyn RuntimeJob>> {
//!         // Hand the bundle to the service's transport.
//!         # todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod inputs;
pub mod optimizer;
pub mod program;
pub mod provider;
pub mod result;
pub mod service;

pub use error::{RuntimeError, RuntimeResult};
pub use inputs::{InitialPoint, IterationUpdate, RuntimeOptions, VqeInputs};
pub use optimizer::Optimizer;
pub use program::{EvaluationCallback, PROGRAM_ID, VqeProgram};
pub use provider::{Backend, Provider};
pub use result::VqeResult;
pub use service::{InterimCallback, RuntimeJob, RuntimeService};
