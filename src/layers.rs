//! Layer abstraction and the dense weight-matrix layer.
use crate::error::{NnError, Result, Side};
use rand::{Rng, RngCore};
use std::fmt;

/// Matrix type, indexed `[input][output]`.
pub type Matrix = Vec<Vec<f32>>;

/// A stage of a feedforward model.
pub trait Layer: fmt::Debug + Send + Sync {
    /// `(fan_in, fan_out)`.
    fn shape(&self) -> (usize, usize);

    /// Randomly initialize every parameter of the layer.
    fn init_weights(&mut self, rng: &mut dyn RngCore);

    /// Accumulate the layer's weighted sums onto `output` and return it.
    fn try_forward<'a>(&self, input: &[f32], output: &'a mut [f32]) -> Result<&'a mut [f32]>;

    /// Like [`Layer::try_forward`], but a shape mismatch is a caller bug and panics.
    fn forward<'a>(&self, input: &[f32], output: &'a mut [f32]) -> &'a mut [f32] {
        match self.try_forward(input, output) {
            Ok(out) => out,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Xavier (Glorot) uniform bound: `sqrt(6 / (fan_in + fan_out))`.
pub fn xavier_bound(fan_in: usize, fan_out: usize) -> f32 {
    (6.0 / (fan_in as f32 + fan_out as f32)).sqrt()
}

/// A fully-connected layer. There is no bias term; the model holds one bias per layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DenseLayer {
    weights: Matrix,
}

impl DenseLayer {
    /// Create a zero-weight layer. Panics if either dimension is zero.
    pub fn new(fan_in: usize, fan_out: usize) -> Self {
        if fan_in == 0 || fan_out == 0 {
            panic!("{}", NnError::ZeroDimension { fan_in, fan_out });
        }
        Self {
            weights: vec![vec![0.0; fan_out]; fan_in],
        }
    }

    /// Wrap an explicit `[fan_in][fan_out]` matrix, rejecting empty or ragged input.
    pub fn from_weights(weights: Matrix) -> Result<Self> {
        let fan_in = weights.len();
        let fan_out = weights.first().map_or(0, Vec::len);
        if fan_in == 0 || fan_out == 0 {
            return Err(NnError::ZeroDimension { fan_in, fan_out });
        }
        if let Some((row, r)) = weights.iter().enumerate().find(|(_, r)| r.len() != fan_out) {
            return Err(NnError::RaggedMatrix {
                row,
                expected: fan_out,
                actual: r.len(),
            });
        }
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &[Vec<f32>] {
        &self.weights
    }

    /// Mutable rows. Rows are exposed as slices so the shape cannot change.
    pub fn weights_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        self.weights.iter_mut().map(Vec::as_mut_slice)
    }
}

impl Layer for DenseLayer {
    fn shape(&self) -> (usize, usize) {
        (self.weights.len(), self.weights[0].len())
    }

    /// Symmetric uniform init in `[-bound, bound)` with the Xavier bound.
    fn init_weights(&mut self, rng: &mut dyn RngCore) {
        let (fan_in, fan_out) = self.shape();
        let bound = xavier_bound(fan_in, fan_out);
        for row in &mut self.weights {
            for w in row.iter_mut() {
                *w = (2.0 * rng.gen::<f32>() - 1.0) * bound;
            }
        }
    }

    /// `output[j] += sum_i input[i] * w[i][j]`. The output is not cleared first.
    fn try_forward<'a>(&self, input: &[f32], output: &'a mut [f32]) -> Result<&'a mut [f32]> {
        let (fan_in, fan_out) = self.shape();
        if input.len() != fan_in {
            return Err(NnError::ShapeMismatch {
                side: Side::Input,
                expected: fan_in,
                actual: input.len(),
            });
        }
        if output.len() != fan_out {
            return Err(NnError::ShapeMismatch {
                side: Side::Output,
                expected: fan_out,
                actual: output.len(),
            });
        }
        for (row, &x) in self.weights.iter().zip(input) {
            for (o, &w) in output.iter_mut().zip(row) {
                *o += w * x;
            }
        }
        Ok(output)
    }
}
