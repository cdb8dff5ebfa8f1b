//! Pauli-sum operators in the algebraic form the runtime program expects.

use std::fmt;
use std::str::FromStr;

use num_complex::Complex64;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{IrError, IrResult};

/// Single-qubit Pauli label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Parse a single Pauli label character.
    pub fn from_char(c: char) -> IrResult<Self> {
        match c {
            'I' => Ok(Pauli::I),
            'X' => Ok(Pauli::X),
            'Y' => Ok(Pauli::Y),
            'Z' => Ok(Pauli::Z),
            other => Err(IrError::InvalidPauli(other)),
        }
    }

    /// Label character of this Pauli.
    pub fn as_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }
}

/// A fixed-width word of Pauli labels, e.g. `ZIZ`.
///
/// The leftmost label acts on the highest-index qubit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct PauliString(Vec<Pauli>);

impl PauliString {
    /// Build from individual labels.
    pub fn new(paulis: Vec<Pauli>) -> Self {
        Self(paulis)
    }

    /// The all-identity word of the given width.
    pub fn identity(width: usize) -> Self {
        Self(vec![Pauli::I; width])
    }

    /// Number of qubits the word covers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the word covers no qubits.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Labels in string order.
    pub fn paulis(&self) -> &[Pauli] {
        &self.0
    }
}

impl FromStr for PauliString {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars().map(Pauli::from_char).collect::<IrResult<Vec<_>>>().map(Self)
    }
}

impl fmt::Display for PauliString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for p in &self.0 {
            write!(f, "{}", p.as_char())?;
        }
        Ok(())
    }
}

impl From<PauliString> for String {
    fn from(s: PauliString) -> Self {
        s.to_string()
    }
}

impl<'de> Deserialize<'de> for PauliString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}

/// A weighted sum of Pauli words, all of the same width.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SparsePauliOp {
    terms: Vec<(PauliString, Complex64)>,
}

impl SparsePauliOp {
    /// Build from weighted terms.
    ///
    /// Requires at least one term; all words must have the same nonzero
    /// width.
    pub fn new(terms: Vec<(PauliString, Complex64)>) -> IrResult<Self> {
        let width = terms.first().ok_or(IrError::EmptyOperator)?.0.len();
        if width == 0 {
            return Err(IrError::EmptyPauli);
        }
        for (word, _) in &terms {
            if word.len() != width {
                return Err(IrError::WidthMismatch {
                    expected: width,
                    got: word.len(),
                });
            }
        }
        Ok(Self { terms })
    }

    /// Build from `(label, real coefficient)` pairs, e.g. `("ZIZ", 1.0)`.
    pub fn from_list(list: &[(&str, f64)]) -> IrResult<Self> {
        let terms = list
            .iter()
            .map(|(label, coeff)| Ok((label.parse()?, Complex64::new(*coeff, 0.0))))
            .collect::<IrResult<Vec<_>>>()?;
        Self::new(terms)
    }

    /// Number of qubits the operator acts on.
    pub fn num_qubits(&self) -> usize {
        self.terms[0].0.len()
    }

    /// Weighted terms of the operator.
    pub fn terms(&self) -> &[(PauliString, Complex64)] {
        &self.terms
    }
}

impl<'de> Deserialize<'de> for SparsePauliOp {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let terms = Vec::<(PauliString, Complex64)>::deserialize(deserializer)?;
        Self::new(terms).map_err(serde::de::Error::custom)
    }
}

/// Canonical algebraic form consumed by the runtime program: a sparse
/// Pauli operator scaled by a global coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PauliSumOp {
    primitive: SparsePauliOp,
    coeff: Complex64,
}

impl PauliSumOp {
    /// Wrap a sparse operator with unit coefficient.
    pub fn new(primitive: SparsePauliOp) -> Self {
        Self::with_coeff(primitive, Complex64::new(1.0, 0.0))
    }

    /// Wrap a sparse operator with an explicit global coefficient.
    pub fn with_coeff(primitive: SparsePauliOp, coeff: Complex64) -> Self {
        Self { primitive, coeff }
    }

    /// Number of qubits the operator acts on.
    pub fn num_qubits(&self) -> usize {
        self.primitive.num_qubits()
    }

    /// The underlying sparse operator.
    pub fn primitive(&self) -> &SparsePauliOp {
        &self.primitive
    }

    /// The global coefficient.
    pub fn coeff(&self) -> Complex64 {
        self.coeff
    }
}

impl From<SparsePauliOp> for PauliSumOp {
    fn from(primitive: SparsePauliOp) -> Self {
        Self::new(primitive)
    }
}
