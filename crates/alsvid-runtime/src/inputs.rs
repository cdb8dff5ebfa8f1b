//! Wire-facing input and options bundles.

use ndarray::Array1;
use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use alsvid_ir::{Ansatz, PauliSumOp};

use crate::error::{RuntimeError, RuntimeResult};
use crate::optimizer::Optimizer;

/// Initial parameter values for the optimizer.
///
/// `Random` is the sentinel the hosted program reads as "draw a random
/// starting vector"; it rides on the wire as the string `"random"`,
/// an explicit point as a plain number array.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InitialPoint {
    /// Let the program pick a random starting vector.
    #[default]
    Random,
    /// Start from the given parameter values.
    Explicit(Array1<f64>),
}

impl Serialize for InitialPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            InitialPoint::Random => serializer.serialize_str("random"),
            InitialPoint::Explicit(point) => {
                let mut seq = serializer.serialize_seq(Some(point.len()))?;
                for value in point {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
        }
    }
}

impl From<Array1<f64>> for InitialPoint {
    fn from(point: Array1<f64>) -> Self {
        InitialPoint::Explicit(point)
    }
}

/// Input bundle for the hosted `vqe` program.
///
/// Field names are the program's input keys; the bundle is serialized
/// to JSON as-is at dispatch time.
#[derive(Debug, Clone, Serialize)]
pub struct VqeInputs {
    /// Observable whose minimum eigenvalue is sought.
    pub operator: PauliSumOp,
    /// Operators evaluated at the approximate eigenstate.
    pub aux_operators: Option<Vec<PauliSumOp>>,
    /// Trial wavefunction template.
    pub ansatz: Ansatz,
    /// Classical optimizer driving the loop.
    pub optimizer: Optimizer,
    /// Settings forwarded to the optimizer.
    pub optimizer_params: Map<String, Value>,
    /// Starting point, or the random sentinel.
    pub initial_point: InitialPoint,
    /// Shots per circuit evaluation.
    pub shots: u32,
    /// Whether the program applies readout error mitigation.
    pub readout_error_mitigation: bool,
}

/// Options bundle addressed to the service rather than the program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeOptions {
    /// Name of the execution target.
    pub backend_name: String,
}

/// One optimizer-iteration report in the service's native positional
/// shape: `[eval_count, parameters, mean, std, accepted]`.
///
/// Only the first four fields are consumed by the client; trailing
/// fields are service-defined and ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationUpdate {
    /// Evaluation count so far.
    pub eval_count: usize,
    /// Parameter values the optimizer evaluated.
    pub parameters: Array1<f64>,
    /// Estimated mean at those parameters.
    pub mean: f64,
    /// Estimated standard deviation of the mean.
    pub std: f64,
}

impl IterationUpdate {
    /// Parse the raw interim payload.
    ///
    /// A payload that does not match the positional shape is a
    /// [`RuntimeError::CallbackFailed`].
    pub fn from_payload(payload: &Value) -> RuntimeResult<Self> {
        let malformed = |detail: &str| RuntimeError::CallbackFailed(detail.to_string());

        let fields = payload
            .as_array()
            .ok_or_else(|| malformed("interim payload is not an array"))?;
        if fields.len() < 4 {
            return Err(RuntimeError::CallbackFailed(format!(
                "interim payload has {} fields, expected at least 4",
                fields.len()
            )));
        }

        let eval_count = fields[0]
            .as_u64()
            .ok_or_else(|| malformed("field 0 (eval count) is not an unsigned integer"))?
            as usize;
        let parameters = fields[1]
            .as_array()
            .ok_or_else(|| malformed("field 1 (parameters) is not an array"))?
            .iter()
            .map(|v| v.as_f64())
            .collect::<Option<Vec<f64>>>()
            .ok_or_else(|| malformed("field 1 (parameters) contains a non-numeric entry"))?;
        let mean = fields[2]
            .as_f64()
            .ok_or_else(|| malformed("field 2 (mean) is not a number"))?;
        let std = fields[3]
            .as_f64()
            .ok_or_else(|| malformed("field 3 (std) is not a number"))?;

        Ok(Self {
            eval_count,
            parameters: Array1::from(parameters),
            mean,
            std,
        })
    }
}
