//! Operator argument surface and normalization into [`PauliSumOp`].

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};
use crate::operator::{Pauli, PauliString, PauliSumOp, SparsePauliOp};

/// Coefficients below this magnitude are dropped from a decomposition.
const COEFF_EPS: f64 = 1e-12;

/// The operator forms accepted by the client.
///
/// The runtime program consumes [`PauliSumOp`]; the other variants are
/// normalized with [`Observable::to_pauli_sum`] before dispatch.
#[derive(Debug, Clone)]
pub enum Observable {
    /// Already in canonical form.
    PauliSum(PauliSumOp),
    /// Bare sparse operator, wrapped with unit coefficient.
    Sparse(SparsePauliOp),
    /// Dense matrix, decomposed over the Pauli basis.
    Matrix(Array2<Complex64>),
}

impl Observable {
    /// Normalize into the canonical Pauli-sum form.
    ///
    /// # Errors
    ///
    /// Fails for matrices that are not square with a power-of-two
    /// dimension of at least 2, and for matrices that decompose to
    /// nothing (the zero matrix).
    pub fn to_pauli_sum(&self) -> IrResult<PauliSumOp> {
        match self {
            Observable::PauliSum(op) => Ok(op.clone()),
            Observable::Sparse(op) => Ok(PauliSumOp::new(op.clone())),
            Observable::Matrix(matrix) => decompose(matrix),
        }
    }
}

impl From<PauliSumOp> for Observable {
    fn from(op: PauliSumOp) -> Self {
        Observable::PauliSum(op)
    }
}

impl From<SparsePauliOp> for Observable {
    fn from(op: SparsePauliOp) -> Self {
        Observable::Sparse(op)
    }
}

impl From<Array2<Complex64>> for Observable {
    fn from(matrix: Array2<Complex64>) -> Self {
        Observable::Matrix(matrix)
    }
}

/// Decompose a dense matrix over the Pauli basis.
///
/// For each width-n Pauli word P, the weight is tr(P·M) / 2^n. The scan
/// is exponential in the qubit count; the observables this client
/// submits are small.
fn decompose(matrix: &Array2<Complex64>) -> IrResult<PauliSumOp> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(IrError::NotPauliDecomposable(format!(
            "matrix is {rows}x{cols}, not square"
        )));
    }
    if rows < 2 || !rows.is_power_of_two() {
        return Err(IrError::NotPauliDecomposable(format!(
            "dimension {rows} is not a power of two >= 2"
        )));
    }
    let num_qubits = rows.trailing_zeros() as usize;

    let mut terms = Vec::new();
    for word in pauli_words(num_qubits) {
        let basis = word_matrix(&word);
        // Paulis are Hermitian, so tr(P·M) needs no adjoint.
        let mut trace = Complex64::new(0.0, 0.0);
        for i in 0..rows {
            for k in 0..rows {
                trace += basis[[i, k]] * matrix[[k, i]];
            }
        }
        let coeff = trace / rows as f64;
        if coeff.norm() > COEFF_EPS {
            terms.push((word, coeff));
        }
    }
    if terms.is_empty() {
        return Err(IrError::EmptyOperator);
    }
    SparsePauliOp::new(terms).map(PauliSumOp::new)
}

/// All Pauli words of the given width, in lexicographic I < X < Y < Z
/// order.
fn pauli_words(width: usize) -> Vec<PauliString> {
    let count = 4usize.pow(width as u32);
    let mut words = Vec::with_capacity(count);
    for index in 0..count {
        let mut word = Vec::with_capacity(width);
        for position in (0..width).rev() {
            word.push(match (index >> (2 * position)) & 3 {
                0 => Pauli::I,
                1 => Pauli::X,
                2 => Pauli::Y,
                _ => Pauli::Z,
            });
        }
        words.push(PauliString::new(word));
    }
    words
}

/// Dense matrix of a Pauli word. The leftmost label is the most
/// significant tensor factor.
fn word_matrix(word: &PauliString) -> Array2<Complex64> {
    let paulis = word.paulis();
    let mut matrix = pauli_matrix(paulis[0]);
    for &p in &paulis[1..] {
        matrix = kron(&matrix, &pauli_matrix(p));
    }
    matrix
}

fn pauli_matrix(pauli: Pauli) -> Array2<Complex64> {
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let i = Complex64::new(0.0, 1.0);
    match pauli {
        Pauli::I => ndarray::array![[one, zero], [zero, one]],
        Pauli::X => ndarray::array![[zero, one], [one, zero]],
        Pauli::Y => ndarray::array![[zero, -i], [i, zero]],
        Pauli::Z => ndarray::array![[one, zero], [zero, -one]],
    }
}

fn kron(a: &Array2<Complex64>, b: &Array2<Complex64>) -> Array2<Complex64> {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    let mut out = Array2::zeros((ar * br, ac * bc));
    for i in 0..ar {
        for j in 0..ac {
            for k in 0..br {
                for l in 0..bc {
                    out[[i * br + k, j * bc + l]] = a[[i, j]] * b[[k, l]];
                }
            }
        }
    }
    out
}
