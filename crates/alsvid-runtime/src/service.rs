//! Remote execution surface.
//!
//! The wire protocol behind these traits is owned by the provider's
//! client library; this crate only defines the seam it is reached
//! through. One submission is one [`RuntimeService::run`] call followed
//! by awaiting [`RuntimeJob::result`]; no retry, backoff, or
//! cancellation is layered on here.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::RuntimeResult;
use crate::inputs::RuntimeOptions;

/// Interim-result callback in the service's native shape: the job id
/// plus the raw positional payload of one optimizer iteration.
///
/// An `Err` from the callback is a delivery failure the service surfaces
/// to the submitter.
pub type InterimCallback = Box<dyn Fn(&str, &Value) -> RuntimeResult<()> + Send + Sync>;

/// A hosted-program execution service.
#[async_trait]
pub trait RuntimeService: Send + Sync {
    /// Submit the named program with the given inputs and options.
    ///
    /// Returns a handle to the remote job. The `callback`, when given,
    /// is invoked by the service for each interim result the program
    /// publishes.
    async fn run(
        &self,
        program_id: &str,
        inputs: Value,
        options: RuntimeOptions,
        callback: Option<InterimCallback>,
    ) -> RuntimeResult<Box<dyn RuntimeJob>>;
}

/// Handle to a submitted runtime job.
#[async_trait]
pub trait RuntimeJob: Send + Sync {
    /// Identifier assigned by the service.
    fn job_id(&self) -> &str;

    /// Wait for the job to finish and return its raw result payload.
    async fn result(&self) -> RuntimeResult<Value>;
}
