//! Optimizer identity and settings validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{RuntimeError, RuntimeResult};

/// Settings the SPSA family accepts. QN-SPSA drops the trust-region and
/// second-order switches, which only apply to plain SPSA.
const SPSA_SETTINGS: &[&str] = &[
    "maxiter",
    "blocking",
    "allowed_increase",
    "trust_region",
    "learning_rate",
    "perturbation",
    "resamplings",
    "last_avg",
    "second_order",
    "hessian_delay",
    "regularization",
    "initial_hessian",
];

const QN_SPSA_EXCLUDED: &[&str] = &["trust_region", "second_order"];

/// Classical optimizers the hosted program supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Optimizer {
    /// Simultaneous perturbation stochastic approximation.
    #[serde(rename = "SPSA")]
    Spsa,
    /// Quantum-natural SPSA.
    #[serde(rename = "QN-SPSA")]
    QnSpsa,
}

impl Optimizer {
    /// Wire name of the optimizer.
    pub fn as_str(self) -> &'static str {
        match self {
            Optimizer::Spsa => "SPSA",
            Optimizer::QnSpsa => "QN-SPSA",
        }
    }

    /// Setting keys this optimizer accepts.
    pub fn allowed_settings(self) -> Vec<&'static str> {
        match self {
            Optimizer::Spsa => SPSA_SETTINGS.to_vec(),
            Optimizer::QnSpsa => SPSA_SETTINGS
                .iter()
                .copied()
                .filter(|key| !QN_SPSA_EXCLUDED.contains(key))
                .collect(),
        }
    }

    /// Check a settings map against this optimizer's allow-list.
    ///
    /// Offending keys are reported sorted so the message is stable.
    pub fn validate_settings(self, settings: &Map<String, Value>) -> RuntimeResult<()> {
        let allowed = self.allowed_settings();
        let mut unsupported: Vec<String> = settings
            .keys()
            .filter(|key| !allowed.contains(&key.as_str()))
            .cloned()
            .collect();
        if unsupported.is_empty() {
            return Ok(());
        }
        unsupported.sort();
        Err(RuntimeError::UnsupportedSettings {
            optimizer: self.as_str().to_string(),
            keys: unsupported,
        })
    }
}

impl FromStr for Optimizer {
    type Err = RuntimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SPSA" => Ok(Optimizer::Spsa),
            "QN-SPSA" => Ok(Optimizer::QnSpsa),
            other => Err(RuntimeError::UnsupportedOptimizer(other.to_string())),
        }
    }
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
