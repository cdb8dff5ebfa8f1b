//! The VQE program client: configuration, validation, dispatch.

use std::sync::Arc;

use ndarray::Array1;
use serde_json::{Map, Value};
use tracing::{debug, info};

use alsvid_ir::{Ansatz, Observable, PauliSumOp};

use crate::error::{RuntimeError, RuntimeResult};
use crate::inputs::{InitialPoint, IterationUpdate, RuntimeOptions, VqeInputs};
use crate::optimizer::Optimizer;
use crate::provider::{Backend, Provider};
use crate::result::VqeResult;
use crate::service::InterimCallback;

/// Identifier of the hosted program this client drives.
pub const PROGRAM_ID: &str = "vqe";

const DEFAULT_SHOTS: u32 = 1024;

/// Caller-facing progress callback.
///
/// Invoked once per optimizer iteration with the evaluation count, the
/// parameter vector, the estimated mean, and the estimated standard
/// deviation.
pub type EvaluationCallback = Arc<dyn Fn(usize, &Array1<f64>, f64, f64) + Send + Sync>;

/// Client for the hosted `vqe` runtime program.
///
/// Holds the submission parameters, validates them, and performs one
/// remote invocation per [`compute_minimum_eigenvalue`] call. The
/// variational loop itself runs inside the hosted program; this object
/// is a settings holder and dispatcher.
///
/// [`compute_minimum_eigenvalue`]: VqeProgram::compute_minimum_eigenvalue
///
/// # Example
///
/// ```ignore
/// use alsvid_ir::{Ansatz, Observable, SparsePauliOp};
/// use alsvid_runtime::VqeProgram;
///
/// let mut vqe = VqeProgram::new(Ansatz::real_amplitudes(3, 1));
/// vqe.set_optimizer("QN-SPSA")?;
/// vqe.set_provider(provider)?;
/// vqe.set_backend(backend);
///
/// let operator = Observable::from(SparsePauliOp::from_list(&[("ZIZ", 1.0)])?);
/// let result = vqe.compute_minimum_eigenvalue(&operator, None).await?;
/// println!("ground state energy ≈ {}", result.eigenvalue);
/// ```
pub struct VqeProgram {
    ansatz: Ansatz,
    optimizer: Optimizer,
    optimizer_settings: Map<String, Value>,
    initial_point: InitialPoint,
    provider: Option<Arc<dyn Provider>>,
    backend: Option<Arc<dyn Backend>>,
    shots: u32,
    readout_error_mitigation: bool,
    callback: Option<EvaluationCallback>,
}

impl VqeProgram {
    /// Create a client with defaults: SPSA, no optimizer settings, a
    /// random initial point, 1024 shots, readout error mitigation on.
    pub fn new(ansatz: Ansatz) -> Self {
        Self {
            ansatz,
            optimizer: Optimizer::Spsa,
            optimizer_settings: Map::new(),
            initial_point: InitialPoint::Random,
            provider: None,
            backend: None,
            shots: DEFAULT_SHOTS,
            readout_error_mitigation: true,
            callback: None,
        }
    }

    /// The fixed program identifier submissions run under.
    pub fn program_id(&self) -> &'static str {
        PROGRAM_ID
    }

    /// The trial wavefunction template.
    pub fn ansatz(&self) -> &Ansatz {
        &self.ansatz
    }

    /// Replace the trial wavefunction template.
    pub fn set_ansatz(&mut self, ansatz: Ansatz) {
        self.ansatz = ansatz;
    }

    /// The selected optimizer.
    pub fn optimizer(&self) -> Optimizer {
        self.optimizer
    }

    /// Select the optimizer by wire name.
    ///
    /// # Errors
    ///
    /// Names outside `SPSA` / `QN-SPSA` are rejected with
    /// [`RuntimeError::UnsupportedOptimizer`].
    pub fn set_optimizer(&mut self, name: &str) -> RuntimeResult<()> {
        self.optimizer = name.parse()?;
        Ok(())
    }

    /// The optimizer settings.
    pub fn optimizer_settings(&self) -> &Map<String, Value> {
        &self.optimizer_settings
    }

    /// Replace the optimizer settings.
    ///
    /// Keys are checked against the selected optimizer's allow-list at
    /// dispatch time, so settings and optimizer can be assigned in
    /// either order.
    pub fn set_optimizer_settings(&mut self, settings: Map<String, Value>) {
        self.optimizer_settings = settings;
    }

    /// The initial point, or the random sentinel.
    pub fn initial_point(&self) -> &InitialPoint {
        &self.initial_point
    }

    /// Start the optimizer from the given parameter values.
    pub fn set_initial_point(&mut self, point: Array1<f64>) {
        self.initial_point = InitialPoint::Explicit(point);
    }

    /// Let the program draw a random starting vector.
    pub fn clear_initial_point(&mut self) {
        self.initial_point = InitialPoint::Random;
    }

    /// The provider, if set.
    pub fn provider(&self) -> Option<&dyn Provider> {
        self.provider.as_deref()
    }

    /// Set the provider.
    ///
    /// # Errors
    ///
    /// Rejected with [`RuntimeError::InvalidProvider`] unless the
    /// provider exposes a runtime service.
    pub fn set_provider(&mut self, provider: Arc<dyn Provider>) -> RuntimeResult<()> {
        if provider.runtime().is_none() {
            return Err(RuntimeError::InvalidProvider);
        }
        self.provider = Some(provider);
        Ok(())
    }

    /// The backend, if set.
    pub fn backend(&self) -> Option<&dyn Backend> {
        self.backend.as_deref()
    }

    /// Set the execution target.
    pub fn set_backend(&mut self, backend: Arc<dyn Backend>) {
        self.backend = Some(backend);
    }

    /// Shots per circuit evaluation.
    pub fn shots(&self) -> u32 {
        self.shots
    }

    /// Set the shots per circuit evaluation.
    pub fn set_shots(&mut self, shots: u32) {
        self.shots = shots;
    }

    /// Whether the program applies readout error mitigation.
    pub fn readout_error_mitigation(&self) -> bool {
        self.readout_error_mitigation
    }

    /// Toggle readout error mitigation.
    pub fn set_readout_error_mitigation(&mut self, enabled: bool) {
        self.readout_error_mitigation = enabled;
    }

    /// The registered progress callback, if any.
    pub fn callback(&self) -> Option<&EvaluationCallback> {
        self.callback.as_ref()
    }

    /// Register a progress callback.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: Fn(usize, &Array1<f64>, f64, f64) + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
    }

    /// Remove the progress callback.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    /// Adapt the caller callback to the service's native signature.
    fn wrap_callback(&self) -> Option<InterimCallback> {
        let callback = self.callback.clone()?;
        Some(Box::new(move |_job_id, payload| {
            let update = IterationUpdate::from_payload(payload)?;
            callback(update.eval_count, &update.parameters, update.mean, update.std);
            Ok(())
        }))
    }

    /// Call the hosted program to approximate the ground state of
    /// `operator`.
    ///
    /// `aux_operators` are evaluated at the approximate eigenstate and
    /// their expectation values returned with the result. The call
    /// completes when the remote job finishes; service-side failures
    /// propagate unchanged.
    ///
    /// # Errors
    ///
    /// - [`RuntimeError::MissingBackend`] / [`RuntimeError::MissingProvider`]
    ///   when dispatch preconditions are unmet
    /// - [`RuntimeError::InvalidOperator`] when an operator cannot be
    ///   normalized into a Pauli sum
    /// - [`RuntimeError::UnsupportedSettings`] when the optimizer
    ///   settings violate the allow-list
    pub async fn compute_minimum_eigenvalue(
        &self,
        operator: &Observable,
        aux_operators: Option<&[Observable]>,
    ) -> RuntimeResult<VqeResult> {
        let backend = self.backend.as_ref().ok_or(RuntimeError::MissingBackend)?;
        let provider = self.provider.as_ref().ok_or(RuntimeError::MissingProvider)?;

        let operator = operator.to_pauli_sum()?;
        let aux_operators = aux_operators
            .map(|ops| {
                ops.iter()
                    .map(Observable::to_pauli_sum)
                    .collect::<Result<Vec<PauliSumOp>, _>>()
            })
            .transpose()?;

        self.optimizer.validate_settings(&self.optimizer_settings)?;

        let inputs = VqeInputs {
            operator,
            aux_operators,
            ansatz: self.ansatz.clone(),
            optimizer: self.optimizer,
            optimizer_params: self.optimizer_settings.clone(),
            initial_point: self.initial_point.clone(),
            shots: self.shots,
            readout_error_mitigation: self.readout_error_mitigation,
        };
        let options = RuntimeOptions {
            backend_name: backend.name().to_string(),
        };

        // set_provider guarantees the runtime service is present.
        let runtime = provider.runtime().ok_or(RuntimeError::InvalidProvider)?;

        let inputs = serde_json::to_value(&inputs)?;
        debug!("input bundle: {inputs}");
        info!(
            "submitting {PROGRAM_ID} program to backend {} ({} optimizer, {} shots)",
            options.backend_name, self.optimizer, self.shots
        );

        let job = runtime
            .run(PROGRAM_ID, inputs, options, self.wrap_callback())
            .await?;
        info!("job {} accepted, waiting for result", job.job_id());

        let raw = job.result().await?;
        let result: VqeResult = serde_json::from_value(raw)?;
        info!("job finished, eigenvalue estimate {}", result.eigenvalue);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::RuntimeService;
    use ndarray::array;
    use serde_json::json;
    use std::sync::Mutex;

    struct NamedBackend;

    impl Backend for NamedBackend {
        fn name(&self) -> &str {
            "fake_device"
        }
    }

    /// A provider with no runtime service.
    struct OfflineProvider;

    impl Provider for OfflineProvider {
        fn name(&self) -> &str {
            "offline"
        }

        fn runtime(&self) -> Option<&dyn RuntimeService> {
            None
        }
    }

    fn program() -> VqeProgram {
        VqeProgram::new(Ansatz::real_amplitudes(2, 1))
    }

    #[test]
    fn test_defaults() {
        let vqe = program();
        assert_eq!(vqe.optimizer(), Optimizer::Spsa);
        assert_eq!(vqe.shots(), 1024);
        assert!(vqe.readout_error_mitigation());
        assert_eq!(*vqe.initial_point(), InitialPoint::Random);
        assert!(vqe.provider().is_none());
        assert!(vqe.backend().is_none());
        assert_eq!(vqe.program_id(), "vqe");
    }

    #[test]
    fn test_set_optimizer_validates_at_assignment() {
        let mut vqe = program();
        vqe.set_optimizer("QN-SPSA").unwrap();
        assert_eq!(vqe.optimizer(), Optimizer::QnSpsa);

        let err = vqe.set_optimizer("COBYLA").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedOptimizer(_)));
        // Failed assignment leaves the previous choice in place.
        assert_eq!(vqe.optimizer(), Optimizer::QnSpsa);
    }

    #[test]
    fn test_set_provider_rejects_provider_without_runtime() {
        let mut vqe = program();
        let err = vqe.set_provider(Arc::new(OfflineProvider)).unwrap_err();
        assert!(matches!(err, RuntimeError::InvalidProvider));
        assert!(vqe.provider().is_none());
    }

    #[test]
    fn test_initial_point_set_and_clear() {
        let mut vqe = program();
        vqe.set_initial_point(array![0.1, 0.2]);
        assert!(matches!(vqe.initial_point(), InitialPoint::Explicit(_)));
        vqe.clear_initial_point();
        assert_eq!(*vqe.initial_point(), InitialPoint::Random);
    }

    #[tokio::test]
    async fn test_dispatch_without_backend() {
        let vqe = program();
        let operator = Observable::from(
            alsvid_ir::SparsePauliOp::from_list(&[("ZZ", 1.0)]).unwrap(),
        );
        let err = vqe
            .compute_minimum_eigenvalue(&operator, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingBackend));
    }

    #[tokio::test]
    async fn test_dispatch_without_provider() {
        let mut vqe = program();
        vqe.set_backend(Arc::new(NamedBackend));
        let operator = Observable::from(
            alsvid_ir::SparsePauliOp::from_list(&[("ZZ", 1.0)]).unwrap(),
        );
        let err = vqe
            .compute_minimum_eigenvalue(&operator, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingProvider));
    }

    #[test]
    fn test_wrapped_callback_translates_native_payload() {
        let received: Arc<Mutex<Vec<(usize, Vec<f64>, f64, f64)>>> =
            Arc::new(Mutex::new(vec![]));
        let sink = Arc::clone(&received);

        let mut vqe = program();
        vqe.set_callback(move |count, params, mean, std| {
            sink.lock()
                .unwrap()
                .push((count, params.to_vec(), mean, std));
        });

        let wrapped = vqe.wrap_callback().unwrap();
        wrapped("job-1", &json!([3, [0.0, 1.0], 1.3, 0.2, true])).unwrap();

        let calls = received.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (3, vec![0.0, 1.0], 1.3, 0.2));
    }

    #[test]
    fn test_wrapped_callback_reports_malformed_payload() {
        let mut vqe = program();
        vqe.set_callback(|_, _, _, _| {});

        let wrapped = vqe.wrap_callback().unwrap();
        let err = wrapped("job-1", &json!([3, [0.0], 1.3])).unwrap_err();
        assert!(matches!(err, RuntimeError::CallbackFailed(_)));
    }

    #[test]
    fn test_no_callback_means_no_adapter() {
        let vqe = program();
        assert!(vqe.wrap_callback().is_none());
    }
}
