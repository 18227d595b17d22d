//! Feedforward model: layers chained with a per-layer bias and activation.
use crate::activations::Activation;
use crate::error::{NnError, Result};
use crate::layers::{DenseLayer, Layer};
use rand::{Rng, RngCore};
use rand_distr::StandardNormal;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Ordered stages of (layer, bias, activation), stored as parallel vectors.
///
/// Consecutive layers must compose (`fan_out` of one equals `fan_in` of the
/// next). This is not checked when adding layers; a mismatch panics during
/// [`Model::forward`].
#[derive(Debug)]
pub struct Model<L = DenseLayer> {
    layers: Vec<L>,
    biases: Vec<f32>,
    activations: Vec<Arc<dyn Activation + Send + Sync>>,
}

impl<L> Default for Model<L> {
    fn default() -> Self {
        Self {
            layers: Vec::new(),
            biases: Vec::new(),
            activations: Vec::new(),
        }
    }
}

impl<L: Layer> Model<L> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a stage. Its bias starts at zero.
    pub fn add_layer(&mut self, layer: L, activation: Arc<dyn Activation + Send + Sync>) {
        self.layers.push(layer);
        self.biases.push(0.0);
        self.activations.push(activation);
    }

    /// `(fan_in of the first layer, fan_out of the last)`.
    pub fn try_shape(&self) -> Result<(usize, usize)> {
        match (self.layers.first(), self.layers.last()) {
            (Some(first), Some(last)) => Ok((first.shape().0, last.shape().1)),
            _ => Err(NnError::EmptyModel),
        }
    }

    /// Panics on an empty model.
    pub fn shape(&self) -> (usize, usize) {
        match self.try_shape() {
            Ok(shape) => shape,
            Err(err) => panic!("{err}"),
        }
    }

    /// Draw every bias from `N(0, 1) / 64` in layer order, then initialize each
    /// layer's weights in layer order. The draw order is fixed so a seeded `rng`
    /// reproduces the same model.
    pub fn init_weights(&mut self, rng: &mut dyn RngCore) {
        for b in &mut self.biases {
            *b = rng.sample::<f64, _>(StandardNormal) as f32 / 64.0;
        }
        for layer in &mut self.layers {
            layer.init_weights(rng);
        }
        debug!(stages = self.layers.len(), "initialized model parameters");
    }

    /// Propagate `input` through every stage and return the output.
    ///
    /// Both buffers are consumed: `input` is reused as scratch for later
    /// stages and the returned vector may be backed by either buffer's storage.
    /// Only the capacity of `scratch` is reused; its contents are ignored, unlike
    /// [`Layer::forward`], which accumulates onto the output it is given.
    ///
    /// Panics on an empty model or when consecutive stages do not compose.
    pub fn forward(&self, input: Vec<f32>, scratch: Vec<f32>) -> Vec<f32> {
        self.forward_buffers(input, scratch).0
    }

    /// Like [`Model::forward`], but also hands back the other buffer as
    /// `(output, spare)` so both allocations can be reused on the next call.
    ///
    /// The two buffers swap input/output roles after every stage. Before a
    /// stage runs, its output buffer is resized to the stage's `fan_out`
    /// (reusing capacity) and zeroed; after it, `act(x + bias)` is applied in place.
    pub fn forward_buffers(&self, mut input: Vec<f32>, mut output: Vec<f32>) -> (Vec<f32>, Vec<f32>) {
        if self.layers.is_empty() {
            panic!("{}", NnError::EmptyModel);
        }
        let stages = self.layers.iter().zip(&self.biases).zip(&self.activations);
        for (i, ((layer, &bias), activation)) in stages.enumerate() {
            if i > 0 {
                std::mem::swap(&mut input, &mut output);
            }
            let (_, fan_out) = layer.shape();
            output.clear();
            output.resize(fan_out, 0.0);
            for x in layer.forward(&input, &mut output).iter_mut() {
                *x = activation.apply(*x + bias);
            }
        }
        (output, input)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[L] {
        &self.layers
    }

    pub fn biases(&self) -> &[f32] {
        &self.biases
    }

    pub fn biases_mut(&mut self) -> &mut [f32] {
        &mut self.biases
    }

    pub fn activations(&self) -> &[Arc<dyn Activation + Send + Sync>] {
        &self.activations
    }
}

impl<L: Layer> fmt::Display for Model<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sizes = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            sizes.push(first.shape().0);
        }
        sizes.extend(self.layers.iter().map(|l| l.shape().1));
        write!(f, "Model: {:?}", sizes)
    }
}
