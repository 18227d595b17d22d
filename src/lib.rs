//! A minimal feedforward network evaluation engine: dense layers chained into a
//! model with per-layer bias and activation, plus an 8-bit fixed-point codec for
//! compact parameter storage.
//!
//! - Dense layers with Xavier uniform initialization
//! - Model forward propagation over two reusable buffers
//! - Identity, LeakyReLU and Sigmoid activations, in-place softmax
//! - JSON model configs describing the layer stack

pub mod activations;
pub mod config;
pub mod error;
pub mod fixed8;
pub mod layers;
pub mod network;

pub use activations::{softmax, Activation, ActivationKind, Identity, LeakyReLU, Sigmoid};
pub use config::{LayerConfig, ModelConfig};
pub use error::{NnError, Result, Side};
pub use fixed8::Fixed8;
pub use layers::{xavier_bound, DenseLayer, Layer, Matrix};
pub use network::Model;
