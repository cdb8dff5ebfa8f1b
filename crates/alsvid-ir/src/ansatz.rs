//! Parameterized ansatz circuit templates.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};

/// A gate angle: either a concrete value or a reference to one of the
/// free variational parameters θ[k] bound on the execution side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Angle {
    /// Concrete angle in radians.
    Fixed(f64),
    /// Index into the variational parameter vector.
    Theta(usize),
}

impl Angle {
    /// Check whether the angle is a free parameter.
    pub fn is_free(&self) -> bool {
        matches!(self, Angle::Theta(_))
    }
}

/// Gate alphabet for hardware-efficient ansatz templates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate", rename_all = "lowercase")]
pub enum AnsatzGate {
    /// Rotation around X.
    Rx {
        /// Target qubit.
        qubit: usize,
        /// Rotation angle.
        angle: Angle,
    },
    /// Rotation around Y.
    Ry {
        /// Target qubit.
        qubit: usize,
        /// Rotation angle.
        angle: Angle,
    },
    /// Rotation around Z.
    Rz {
        /// Target qubit.
        qubit: usize,
        /// Rotation angle.
        angle: Angle,
    },
    /// Controlled-X entangler.
    Cx {
        /// Control qubit.
        control: usize,
        /// Target qubit.
        target: usize,
    },
}

/// A named parameterized circuit template used as the trial wavefunction.
///
/// Parameter slots are dense: a gate referencing θ[k] declares slots
/// `0..=k`, and [`Ansatz::num_parameters`] reports how many values the
/// execution side must bind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ansatz {
    name: String,
    num_qubits: usize,
    gates: Vec<AnsatzGate>,
    num_parameters: usize,
}

impl Ansatz {
    /// Create an empty ansatz over `num_qubits` qubits.
    pub fn new(name: impl Into<String>, num_qubits: usize) -> Self {
        Self {
            name: name.into(),
            num_qubits,
            gates: vec![],
            num_parameters: 0,
        }
    }

    /// Name of the template.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of qubits the template acts on.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of free variational parameters.
    pub fn num_parameters(&self) -> usize {
        self.num_parameters
    }

    /// Gates in application order.
    pub fn gates(&self) -> &[AnsatzGate] {
        &self.gates
    }

    /// Append a gate, checking qubit bounds.
    pub fn push(&mut self, gate: AnsatzGate) -> IrResult<&mut Self> {
        match gate {
            AnsatzGate::Rx { qubit, angle }
            | AnsatzGate::Ry { qubit, angle }
            | AnsatzGate::Rz { qubit, angle } => {
                self.check_qubit(qubit)?;
                self.track_angle(angle);
            }
            AnsatzGate::Cx { control, target } => {
                self.check_qubit(control)?;
                self.check_qubit(target)?;
                if control == target {
                    return Err(IrError::ControlEqualsTarget(control));
                }
            }
        }
        self.gates.push(gate);
        Ok(self)
    }

    /// Apply an Rx rotation.
    pub fn rx(&mut self, qubit: usize, angle: Angle) -> IrResult<&mut Self> {
        self.push(AnsatzGate::Rx { qubit, angle })
    }

    /// Apply an Ry rotation.
    pub fn ry(&mut self, qubit: usize, angle: Angle) -> IrResult<&mut Self> {
        self.push(AnsatzGate::Ry { qubit, angle })
    }

    /// Apply an Rz rotation.
    pub fn rz(&mut self, qubit: usize, angle: Angle) -> IrResult<&mut Self> {
        self.push(AnsatzGate::Rz { qubit, angle })
    }

    /// Apply a CX entangler.
    pub fn cx(&mut self, control: usize, target: usize) -> IrResult<&mut Self> {
        self.push(AnsatzGate::Cx { control, target })
    }

    fn check_qubit(&self, index: usize) -> IrResult<()> {
        if index >= self.num_qubits {
            return Err(IrError::QubitOutOfRange {
                index,
                num_qubits: self.num_qubits,
            });
        }
        Ok(())
    }

    fn track_angle(&mut self, angle: Angle) {
        if let Angle::Theta(k) = angle {
            self.num_parameters = self.num_parameters.max(k + 1);
        }
    }

    /// RealAmplitudes template: `reps + 1` layers of Ry rotations with a
    /// linear CX entangling chain between them.
    ///
    /// Has `(reps + 1) * num_qubits` free parameters.
    pub fn real_amplitudes(num_qubits: usize, reps: usize) -> Self {
        let mut gates = Vec::new();
        let mut next_theta = 0;
        for layer in 0..=reps {
            for qubit in 0..num_qubits {
                gates.push(AnsatzGate::Ry {
                    qubit,
                    angle: Angle::Theta(next_theta),
                });
                next_theta += 1;
            }
            if layer < reps {
                for qubit in 0..num_qubits.saturating_sub(1) {
                    gates.push(AnsatzGate::Cx {
                        control: qubit,
                        target: qubit + 1,
                    });
                }
            }
        }
        Self {
            name: "real_amplitudes".to_string(),
            num_qubits,
            gates,
            num_parameters: next_theta,
        }
    }

    /// EfficientSU2 template: `reps + 1` layers of Ry and Rz rotations
    /// with a linear CX entangling chain between them.
    ///
    /// Has `2 * (reps + 1) * num_qubits` free parameters.
    pub fn efficient_su2(num_qubits: usize, reps: usize) -> Self {
        let mut gates = Vec::new();
        let mut next_theta = 0;
        for layer in 0..=reps {
            for qubit in 0..num_qubits {
                gates.push(AnsatzGate::Ry {
                    qubit,
                    angle: Angle::Theta(next_theta),
                });
                next_theta += 1;
            }
            for qubit in 0..num_qubits {
                gates.push(AnsatzGate::Rz {
                    qubit,
                    angle: Angle::Theta(next_theta),
                });
                next_theta += 1;
            }
            if layer < reps {
                for qubit in 0..num_qubits.saturating_sub(1) {
                    gates.push(AnsatzGate::Cx {
                        control: qubit,
                        target: qubit + 1,
                    });
                }
            }
        }
        Self {
            name: "efficient_su2".to_string(),
            num_qubits,
            gates,
            num_parameters: next_theta,
        }
    }
}
