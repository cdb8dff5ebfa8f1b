//! End-to-end dispatch against a fake runtime provider.
//!
//! The fake service type-checks the input bundle the way the hosted
//! program would, echoes interim results into the registered callback,
//! and hands back a canned result payload.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ndarray::Array1;
use rand::Rng;
use serde_json::{Value, json};

use alsvid_ir::{Ansatz, Observable, SparsePauliOp};
use alsvid_runtime::{
    Backend, InterimCallback, Provider, RuntimeError, RuntimeJob, RuntimeOptions, RuntimeResult,
    RuntimeService, VqeProgram,
};

const FAKE_JOB_ID: &str = "c919jdjlwinoir1a";

struct FakeJob;

#[async_trait]
impl RuntimeJob for FakeJob {
    fn job_id(&self) -> &str {
        FAKE_JOB_ID
    }

    async fn result(&self) -> RuntimeResult<Value> {
        Ok(json!({
            "eigenvalue": -1.274,
            "optimal_point": [0.1, 0.2, 0.3],
            "optimal_value": -1.274,
            "optimizer_evals": 120,
        }))
    }
}

/// Fake runtime service: validates the submission, optionally fires one
/// interim result into the callback, records the input bundle.
struct FakeRuntime {
    captured: Mutex<Option<Value>>,
    interim: Option<Value>,
}

impl FakeRuntime {
    fn new() -> Self {
        Self {
            captured: Mutex::new(None),
            interim: None,
        }
    }

    fn with_interim(payload: Value) -> Self {
        Self {
            captured: Mutex::new(None),
            interim: Some(payload),
        }
    }

    fn captured_inputs(&self) -> Value {
        self.captured
            .lock()
            .unwrap()
            .clone()
            .expect("no job was submitted")
    }
}

fn check(ok: bool, what: &str) -> RuntimeResult<()> {
    if ok {
        Ok(())
    } else {
        Err(RuntimeError::Service(format!(
            "{what} does not have the right type"
        )))
    }
}

#[async_trait]
impl RuntimeService for FakeRuntime {
    async fn run(
        &self,
        program_id: &str,
        inputs: Value,
        options: RuntimeOptions,
        callback: Option<InterimCallback>,
    ) -> RuntimeResult<Box<dyn RuntimeJob>> {
        check(program_id == "vqe", "program_id")?;

        let bundle = inputs
            .as_object()
            .ok_or_else(|| RuntimeError::Service("inputs is not an object".to_string()))?;
        check(bundle["operator"].is_object(), "operator")?;
        check(
            bundle["aux_operators"].is_null() || bundle["aux_operators"].is_array(),
            "aux_operators",
        )?;
        check(bundle["ansatz"].is_object(), "ansatz")?;
        check(
            bundle["initial_point"].is_string() || bundle["initial_point"].is_array(),
            "initial_point",
        )?;
        check(bundle["optimizer"].is_string(), "optimizer")?;
        check(bundle["optimizer_params"].is_object(), "optimizer_params")?;
        check(bundle["shots"].is_u64(), "shots")?;
        check(
            bundle["readout_error_mitigation"].is_boolean(),
            "readout_error_mitigation",
        )?;
        check(!options.backend_name.is_empty(), "backend_name")?;

        if let (Some(callback), Some(payload)) = (&callback, &self.interim) {
            callback(FAKE_JOB_ID, payload)?;
        }

        *self.captured.lock().unwrap() = Some(inputs);
        Ok(Box::new(FakeJob))
    }
}

struct FakeProvider {
    runtime: FakeRuntime,
}

impl Provider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    fn runtime(&self) -> Option<&dyn RuntimeService> {
        Some(&self.runtime)
    }
}

struct FakeBackend;

impl Backend for FakeBackend {
    fn name(&self) -> &str {
        "fake_simulator"
    }
}

fn observable(label: &str) -> Observable {
    Observable::from(SparsePauliOp::from_list(&[(label, 1.0)]).unwrap())
}

fn configured_program(provider: Arc<FakeProvider>) -> VqeProgram {
    let mut vqe = VqeProgram::new(Ansatz::real_amplitudes(3, 1));
    vqe.set_provider(provider).unwrap();
    vqe.set_backend(Arc::new(FakeBackend));
    vqe
}

#[tokio::test]
async fn test_standard_case() {
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::new(),
    });

    let ansatz = Ansatz::real_amplitudes(3, 1);
    let mut rng = rand::thread_rng();
    let initial_point: Array1<f64> = (0..ansatz.num_parameters())
        .map(|_| rng.gen_range(0.0..std::f64::consts::TAU))
        .collect();

    let mut vqe = VqeProgram::new(ansatz);
    vqe.set_optimizer("SPSA").unwrap();
    vqe.set_optimizer_settings([("maxiter".to_string(), json!(100))].into_iter().collect());
    vqe.set_initial_point(initial_point);
    vqe.set_provider(Arc::clone(&provider) as Arc<dyn Provider>).unwrap();
    vqe.set_backend(Arc::new(FakeBackend));

    let result = vqe
        .compute_minimum_eigenvalue(&observable("ZIZ"), None)
        .await
        .unwrap();

    assert_eq!(result.eigenvalue, -1.274);
    assert_eq!(result.optimal_point.unwrap().len(), 3);
    assert_eq!(result.optimizer_evals, Some(120));

    let inputs = provider.runtime.captured_inputs();
    assert!(inputs["initial_point"].is_array());
    assert_eq!(inputs["optimizer"], json!("SPSA"));
    assert_eq!(inputs["optimizer_params"]["maxiter"], json!(100));
    assert_eq!(inputs["shots"], json!(1024));
    assert_eq!(inputs["readout_error_mitigation"], json!(true));
}

#[tokio::test]
async fn test_unset_initial_point_encodes_random() {
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::new(),
    });
    let vqe = configured_program(Arc::clone(&provider));

    vqe.compute_minimum_eigenvalue(&observable("ZZZ"), None)
        .await
        .unwrap();

    let inputs = provider.runtime.captured_inputs();
    assert_eq!(inputs["initial_point"], json!("random"));
}

#[tokio::test]
async fn test_aux_operators_forwarded() {
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::new(),
    });
    let vqe = configured_program(Arc::clone(&provider));

    let aux = [observable("ZII"), observable("IIZ")];
    vqe.compute_minimum_eigenvalue(&observable("ZIZ"), Some(&aux))
        .await
        .unwrap();

    let inputs = provider.runtime.captured_inputs();
    assert_eq!(inputs["aux_operators"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_dispatch_validates_settings() {
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::new(),
    });
    let mut vqe = configured_program(provider);
    vqe.set_optimizer("QN-SPSA").unwrap();
    vqe.set_optimizer_settings(
        [
            ("maxiter".to_string(), json!(100)),
            ("trust_region".to_string(), json!(true)),
        ]
        .into_iter()
        .collect(),
    );

    let err = vqe
        .compute_minimum_eigenvalue(&observable("ZZ"), None)
        .await
        .unwrap_err();
    match err {
        RuntimeError::UnsupportedSettings { optimizer, keys } => {
            assert_eq!(optimizer, "QN-SPSA");
            assert_eq!(keys, ["trust_region"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_callback_round_trip() {
    // Native five-field payload; the caller sees the first four values.
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::with_interim(json!([
            3,
            [0.0, 1.0, 2.0, 3.0, 4.0, 5.0],
            1.3,
            0.2,
            true
        ])),
    });
    let mut vqe = configured_program(Arc::clone(&provider));

    let received: Arc<Mutex<Vec<(usize, Vec<f64>, f64, f64)>>> = Arc::new(Mutex::new(vec![]));
    let sink = Arc::clone(&received);
    vqe.set_callback(move |count, params, mean, std| {
        sink.lock()
            .unwrap()
            .push((count, params.to_vec(), mean, std));
    });

    vqe.compute_minimum_eigenvalue(&observable("ZIZ"), None)
        .await
        .unwrap();

    let calls = received.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        (3, vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 1.3, 0.2)
    );
}

#[tokio::test]
async fn test_malformed_interim_payload_fails_dispatch() {
    // Three fields only: the adapter must refuse, and the failure
    // surfaces through the service.
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::with_interim(json!([3, [0.0], 1.3])),
    });
    let mut vqe = configured_program(provider);
    vqe.set_callback(|_, _, _, _| {});

    let err = vqe
        .compute_minimum_eigenvalue(&observable("ZIZ"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::CallbackFailed(_)));
}

#[tokio::test]
async fn test_no_callback_is_not_invoked() {
    // An interim payload with no registered callback is simply dropped.
    let provider = Arc::new(FakeProvider {
        runtime: FakeRuntime::with_interim(json!([1, [0.0], 0.5, 0.1, true])),
    });
    let vqe = configured_program(Arc::clone(&provider));

    let result = vqe
        .compute_minimum_eigenvalue(&observable("ZIZ"), None)
        .await
        .unwrap();
    assert_eq!(result.eigenvalue, -1.274);
}
