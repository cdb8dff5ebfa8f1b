//! Provider and backend traits.
//!
//! A [`Provider`] is the account-level entry point to a quantum
//! computing service; a [`Backend`] is one execution target it hosts.
//! The client only forwards the backend name in the dispatch options.
//! Queueing, calibration, and transpilation are provider business and
//! stay behind the [`RuntimeService`](crate::service::RuntimeService)
//! seam.

use crate::service::RuntimeService;

/// An execution target hosted by a provider.
pub trait Backend: Send + Sync {
    /// Name of the backend, as the provider's runtime addresses it.
    fn name(&self) -> &str;
}

/// An account-level entry point to a quantum computing service.
pub trait Provider: Send + Sync {
    /// Human-readable provider name.
    fn name(&self) -> &str;

    /// The provider's runtime service, if it exposes one.
    ///
    /// Returning `None` marks the provider as unable to run hosted
    /// programs;
    /// [`VqeProgram::set_provider`](crate::program::VqeProgram::set_provider)
    /// rejects such providers at assignment time.
    fn runtime(&self) -> Option<&dyn RuntimeService>;
}
