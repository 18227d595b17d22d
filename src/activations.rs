//! Activation functions applied elementwise after each layer, plus softmax.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Trait for activation functions.
///
/// Note the derivative conventions differ between variants: [`LeakyReLU`]
/// takes the pre-activation value, while [`Sigmoid`] takes the already
/// activated output. Callers evaluating derivatives must pass the right one.
pub trait Activation: fmt::Debug + Send + Sync {
    fn apply(&self, x: f32) -> f32;
    fn derivative(&self, x: f32) -> f32;
    fn apply_in_place(&self, xs: &mut [f32]) {
        for x in xs {
            *x = self.apply(*x);
        }
    }
}

/// Identity: x
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl Activation for Identity {
    fn apply(&self, x: f32) -> f32 {
        x
    }
    fn derivative(&self, _x: f32) -> f32 {
        1.0
    }
}

/// LeakyReLU: x if x >= 0 else x / 64
#[derive(Debug, Clone, Copy, Default)]
pub struct LeakyReLU;

impl LeakyReLU {
    pub const SLOPE: f32 = 1.0 / 64.0;
}

impl Activation for LeakyReLU {
    fn apply(&self, x: f32) -> f32 {
        if x < 0.0 { x * Self::SLOPE } else { x }
    }
    /// `x` is the pre-activation value.
    fn derivative(&self, x: f32) -> f32 {
        if x < 0.0 { Self::SLOPE } else { 1.0 }
    }
}

/// Sigmoid: 1 / (1 + exp(-x))
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmoid;

impl Activation for Sigmoid {
    fn apply(&self, x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }
    /// `x` is the activated output `sigmoid(z)`, not `z`.
    fn derivative(&self, x: f32) -> f32 {
        x * (1.0 - x)
    }
}

/// Sum of `exp(x)` over the slice.
pub fn softmax_denominator(xs: &[f32]) -> f32 {
    xs.iter().map(|x| x.exp()).sum()
}

/// Softmax in place: each `x` becomes `exp(x) / sum(exp(xs))`.
///
/// No max subtraction is done, so large inputs overflow to NaN.
pub fn softmax(xs: &mut [f32]) {
    let denom = softmax_denominator(xs);
    for x in xs.iter_mut() {
        *x = x.exp() / denom;
    }
}

/// Serializable activation kinds, used by model configs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivationKind {
    Identity,
    #[serde(rename = "leaky_relu")]
    LeakyReLU,
    Sigmoid,
}

impl ActivationKind {
    pub fn to_arc(self) -> Arc<dyn Activation + Send + Sync> {
        match self {
            ActivationKind::Identity => Arc::new(Identity),
            ActivationKind::LeakyReLU => Arc::new(LeakyReLU),
            ActivationKind::Sigmoid => Arc::new(Sigmoid),
        }
    }
}
