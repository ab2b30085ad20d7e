//! Statevector simulation engine.
//!
//! Amplitude index bit `k` holds qubit `k`. Every gate is either a 2x2
//! matrix applied to one target under a (possibly empty) control mask, or a
//! controlled swap.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use qpipe_ir::{GateKind, Instruction, InstructionKind, StandardGate};
use rand::Rng;

type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self { amplitudes }
    }

    /// Apply an instruction to the statevector.
    ///
    /// Measurements and barriers leave the state alone: sampling happens once
    /// at the end. Custom gates are treated as identity. A reset measures its
    /// qubit, drawing the branch from `rng`, and flips a |1⟩ outcome to |0⟩.
    pub fn apply<R: Rng>(&mut self, instruction: &Instruction, rng: &mut R) {
        let qubits: Vec<usize> = instruction.qubits.iter().map(|q| q.0 as usize).collect();
        match &instruction.kind {
            InstructionKind::Gate(gate) => match &gate.kind {
                GateKind::Standard(g) => self.apply_standard_gate(g, &qubits),
                GateKind::Custom(_) => {}
            },
            InstructionKind::Reset => self.reset(qubits[0], rng.r#gen::<f64>()),
            InstructionKind::Measure | InstructionKind::Barrier => {}
        }
    }

    fn apply_standard_gate(&mut self, gate: &StandardGate, qubits: &[usize]) {
        match gate {
            StandardGate::CX => self.apply_controlled(mask(&qubits[..1]), qubits[1], &pauli_x()),
            StandardGate::CY => self.apply_controlled(mask(&qubits[..1]), qubits[1], &pauli_y()),
            StandardGate::CZ => self.apply_controlled(mask(&qubits[..1]), qubits[1], &pauli_z()),
            StandardGate::CH => self.apply_controlled(mask(&qubits[..1]), qubits[1], &hadamard()),
            StandardGate::CRz(t) => self.apply_controlled(mask(&qubits[..1]), qubits[1], &rz(*t)),
            StandardGate::CP(t) => self.apply_controlled(mask(&qubits[..1]), qubits[1], &phase(*t)),
            StandardGate::CCX => self.apply_controlled(mask(&qubits[..2]), qubits[2], &pauli_x()),
            StandardGate::Swap => self.apply_swap(0, qubits[0], qubits[1]),
            StandardGate::CSwap => self.apply_swap(mask(&qubits[..1]), qubits[1], qubits[2]),
            single => {
                if let Some(m) = single_qubit_matrix(single) {
                    self.apply_controlled(0, qubits[0], &m);
                }
            }
        }
    }

    /// Apply `m` to `target` on every basis state whose `controls` bits are set.
    fn apply_controlled(&mut self, controls: usize, target: usize, m: &Matrix2) {
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if i & tgt_mask == 0 && i & controls == controls {
                let j = i | tgt_mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    fn apply_swap(&mut self, controls: usize, q1: usize, q2: usize) {
        let mask1 = 1 << q1;
        let mask2 = 1 << q2;
        for i in 0..self.amplitudes.len() {
            if i & controls == controls && i & mask1 != 0 && i & mask2 == 0 {
                let j = (i & !mask1) | mask2;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Return `qubit` to |0⟩.
    ///
    /// The qubit collapses to |1⟩ when `r < P(1)` and to |0⟩ otherwise, with
    /// the rest of the register collapsing along with it. `r` must lie in
    /// `[0, 1)`.
    fn reset(&mut self, qubit: usize, r: f64) {
        const EPS: f64 = 1e-12;
        let bit = 1 << qubit;
        let p1: f64 = self
            .amplitudes
            .iter()
            .enumerate()
            .filter(|(i, _)| i & bit != 0)
            .map(|(_, a)| a.norm_sqr())
            .sum();

        let collapse_to_one = if p1 < EPS {
            false
        } else if p1 > 1.0 - EPS {
            true
        } else {
            r < p1
        };
        let norm = (if collapse_to_one { p1 } else { 1.0 - p1 }).sqrt();

        for (i, amp) in self.amplitudes.iter_mut().enumerate() {
            if (i & bit != 0) == collapse_to_one {
                *amp /= norm;
            } else {
                *amp = ZERO;
            }
        }
        if collapse_to_one {
            self.apply_controlled(0, qubit, &pauli_x());
        }
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }
}

/// Bitstring of basis state `outcome` over `num_qubits` qubits, qubit 0 first.
pub fn bitstring(outcome: usize, num_qubits: usize) -> String {
    (0..num_qubits)
        .map(|q| if (outcome >> q) & 1 == 1 { '1' } else { '0' })
        .collect()
}

fn mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |acc, q| acc | (1 << q))
}

fn pauli_x() -> Matrix2 {
    [[ZERO, ONE], [ONE, ZERO]]
}

fn pauli_y() -> Matrix2 {
    [[ZERO, -I], [I, ZERO]]
}

fn pauli_z() -> Matrix2 {
    [[ONE, ZERO], [ZERO, -ONE]]
}

fn hadamard() -> Matrix2 {
    let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
    [[h, h], [h, -h]]
}

fn phase(theta: f64) -> Matrix2 {
    [[ONE, ZERO], [ZERO, Complex64::from_polar(1.0, theta)]]
}

fn rz(theta: f64) -> Matrix2 {
    [
        [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
        [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
    ]
}

fn u(theta: f64, phi: f64, lambda: f64) -> Matrix2 {
    let c = Complex64::new((theta / 2.0).cos(), 0.0);
    let s = Complex64::new((theta / 2.0).sin(), 0.0);
    [
        [c, -Complex64::from_polar(1.0, lambda) * s],
        [
            Complex64::from_polar(1.0, phi) * s,
            Complex64::from_polar(1.0, phi + lambda) * c,
        ],
    ]
}

fn single_qubit_matrix(gate: &StandardGate) -> Option<Matrix2> {
    let m = match gate {
        StandardGate::I => [[ONE, ZERO], [ZERO, ONE]],
        StandardGate::X => pauli_x(),
        StandardGate::Y => pauli_y(),
        StandardGate::Z => pauli_z(),
        StandardGate::H => hadamard(),
        StandardGate::S => phase(PI / 2.0),
        StandardGate::Sdg => phase(-PI / 2.0),
        StandardGate::T => phase(PI / 4.0),
        StandardGate::Tdg => phase(-PI / 4.0),
        StandardGate::SX => {
            let p = Complex64::new(0.5, 0.5);
            let q = Complex64::new(0.5, -0.5);
            [[p, q], [q, p]]
        }
        StandardGate::Rx(t) => {
            let c = Complex64::new((t / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(t / 2.0).sin());
            [[c, s], [s, c]]
        }
        StandardGate::Ry(t) => u(*t, 0.0, 0.0),
        StandardGate::Rz(t) => rz(*t),
        StandardGate::P(t) => phase(*t),
        StandardGate::U(theta, phi, lambda) => u(*theta, *phi, *lambda),
        _ => return None,
    };
    Some(m)
}
