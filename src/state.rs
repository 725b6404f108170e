//! Single-qubit state vector and the fixed gate catalog
//!
//! The state is two complex amplitudes `(a0, a1)` with `|a0|^2 + |a1|^2 = 1`.
//! Gates are closed-set descriptors applied as a 2x2 matrix-vector multiply;
//! no renormalization happens afterward, so floating drift accumulates slowly
//! and is accepted rather than corrected.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

/// Tolerance for the normalization invariant `|a0|^2 + |a1|^2 = 1`.
pub const NORM_TOLERANCE: f64 = 1e-6;

/// Rotation step bound to the x/y/z keys (uppercase negates it).
pub const ROTATION_STEP: f64 = PI / 6.0;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);
const NEG_I: Complex64 = Complex64::new(0.0, -1.0);
const NEG_ONE: Complex64 = Complex64::new(-1.0, 0.0);

/// A pure single-qubit state `a0|0> + a1|1>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QubitState {
    pub a0: Complex64,
    pub a1: Complex64,
}

impl Default for QubitState {
    fn default() -> Self {
        Self::zero()
    }
}

impl QubitState {
    /// The computational |0> state, where every session starts.
    pub fn zero() -> Self {
        Self { a0: ONE, a1: ZERO }
    }

    /// `|a0|^2 + |a1|^2`, which a well-formed state keeps at 1.
    pub fn norm_sqr(&self) -> f64 {
        self.a0.norm_sqr() + self.a1.norm_sqr()
    }

    /// Whether the normalization invariant holds within [`NORM_TOLERANCE`].
    pub fn is_normalized(&self) -> bool {
        (self.norm_sqr() - 1.0).abs() < NORM_TOLERANCE
    }

    /// Apply a gate, returning the new state `U * self`.
    ///
    /// Fails only when a rotation gate carries a non-finite angle; the
    /// parameterless gates cannot fail.
    pub fn apply(&self, gate: Gate) -> Result<QubitState, String> {
        let u = gate.matrix()?;
        Ok(QubitState {
            a0: u[0][0] * self.a0 + u[0][1] * self.a1,
            a1: u[1][0] * self.a0 + u[1][1] * self.a1,
        })
    }

    /// Bloch-sphere angles `(theta, phi)` with theta in [0, pi] and
    /// phi in [0, 2*pi).
    ///
    /// Uses the reference mapping `theta = 2*acos(Re(a0))`, which discards any
    /// phase carried by `a0`. That is a known caveat of the mapping (it assumes
    /// a global-phase convention keeping `a0` real) and is preserved on
    /// purpose; only the acos argument is clamped to [-1, 1] so accumulated
    /// drift cannot turn into NaN.
    pub fn bloch_angles(&self) -> (f64, f64) {
        let theta = 2.0 * self.a0.re.clamp(-1.0, 1.0).acos();
        let mut phi = self.a1.arg();
        if phi < 0.0 {
            phi += 2.0 * PI;
        }
        (theta, phi)
    }

    /// Cartesian Bloch vector `[x, y, z]` from Pauli expectation values.
    ///
    /// `x = 2*Re(conj(a0)*a1)`, `y = 2*Im(conj(a0)*a1)`,
    /// `z = |a0|^2 - |a1|^2`. This is what a sphere view would plot; the core
    /// only supplies the numbers.
    pub fn bloch_vector(&self) -> [f64; 3] {
        let cross = self.a0.conj() * self.a1;
        [
            2.0 * cross.re,
            2.0 * cross.im,
            self.a0.norm_sqr() - self.a1.norm_sqr(),
        ]
    }
}

/// The fixed gate catalog. Rotations carry their angle in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gate {
    H,
    X,
    Y,
    Z,
    Rx(f64),
    Ry(f64),
    Rz(f64),
}

impl Gate {
    /// The canonical 2x2 unitary for this gate.
    ///
    /// Rejects non-finite rotation angles; everything else always succeeds.
    pub fn matrix(&self) -> Result<[[Complex64; 2]; 2], String> {
        let m = match *self {
            Gate::H => {
                let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
                [[h, h], [h, -h]]
            }
            Gate::X => [[ZERO, ONE], [ONE, ZERO]],
            Gate::Y => [[ZERO, NEG_I], [I, ZERO]],
            Gate::Z => [[ONE, ZERO], [ZERO, NEG_ONE]],
            Gate::Rx(theta) => {
                let theta = check_angle(theta)?;
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new(0.0, -(theta / 2.0).sin());
                [[c, s], [s, c]]
            }
            Gate::Ry(theta) => {
                let theta = check_angle(theta)?;
                let c = Complex64::new((theta / 2.0).cos(), 0.0);
                let s = Complex64::new((theta / 2.0).sin(), 0.0);
                [[c, -s], [s, c]]
            }
            Gate::Rz(theta) => {
                let theta = check_angle(theta)?;
                let phase = Complex64::new(0.0, theta / 2.0);
                [[(-phase).exp(), ZERO], [ZERO, phase.exp()]]
            }
        };
        Ok(m)
    }

    /// Short display name, e.g. for logging and the live readout.
    pub fn name(&self) -> &'static str {
        match self {
            Gate::H => "H",
            Gate::X => "X",
            Gate::Y => "Y",
            Gate::Z => "Z",
            Gate::Rx(_) => "RX",
            Gate::Ry(_) => "RY",
            Gate::Rz(_) => "RZ",
        }
    }
}

fn check_angle(theta: f64) -> Result<f64, String> {
    if theta.is_finite() {
        Ok(theta)
    } else {
        Err(format!("non-finite rotation angle: {theta}"))
    }
}
