//! Result surface of the hosted program.

use ndarray::Array1;
use serde::{Deserialize, Deserializer};

/// Result of the hosted VQE program.
///
/// The structure is owned by the remote program; the client decodes it
/// and returns it unmodified. Fields added by newer program versions
/// are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct VqeResult {
    /// Minimum eigenvalue estimate.
    pub eigenvalue: f64,
    /// Parameter vector that produced the estimate.
    #[serde(default, deserialize_with = "optional_vector")]
    pub optimal_point: Option<Array1<f64>>,
    /// Cost-function value at the optimal point.
    #[serde(default)]
    pub optimal_value: Option<f64>,
    /// Number of cost-function evaluations the optimizer spent.
    #[serde(default)]
    pub optimizer_evals: Option<u64>,
    /// Wall-clock seconds spent in the optimization loop.
    #[serde(default)]
    pub optimizer_time: Option<f64>,
    /// Expectation values of the auxiliary operators at the optimum.
    #[serde(default)]
    pub aux_operator_eigenvalues: Option<Vec<f64>>,
}

fn optional_vector<'de, D>(deserializer: D) -> Result<Option<Array1<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Option::<Vec<f64>>::deserialize(deserializer)?;
    Ok(values.map(Array1::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_full_result() {
        let raw = json!({
            "eigenvalue": -1.857,
            "optimal_point": [0.1, 0.2, 0.3],
            "optimal_value": -1.857,
            "optimizer_evals": 240,
            "optimizer_time": 12.5,
            "aux_operator_eigenvalues": [2.0, 0.0],
        });
        let result: VqeResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.eigenvalue, -1.857);
        assert_eq!(result.optimal_point.unwrap().len(), 3);
        assert_eq!(result.optimizer_evals, Some(240));
        assert_eq!(result.aux_operator_eigenvalues, Some(vec![2.0, 0.0]));
    }

    #[test]
    fn test_decode_minimal_result() {
        let result: VqeResult = serde_json::from_value(json!({"eigenvalue": 0.5})).unwrap();
        assert_eq!(result.eigenvalue, 0.5);
        assert!(result.optimal_point.is_none());
        assert!(result.optimal_value.is_none());
    }

    #[test]
    fn test_decode_ignores_unknown_fields() {
        let raw = json!({
            "eigenvalue": -0.25,
            "eigenstate": {"00": 0.7, "11": 0.7},
        });
        let result: VqeResult = serde_json::from_value(raw).unwrap();
        assert_eq!(result.eigenvalue, -0.25);
    }
}
