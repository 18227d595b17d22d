//! Error types for layer and model construction and evaluation.
use std::fmt;
use thiserror::Error;

/// Which buffer of a forward call disagreed with the layer's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Input,
    Output,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Input => f.write_str("input"),
            Side::Output => f.write_str("output"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NnError {
    #[error("shape mismatch: {side} length {actual}, expected {expected}")]
    ShapeMismatch {
        side: Side,
        expected: usize,
        actual: usize,
    },

    #[error("model has no layers")]
    EmptyModel,

    #[error("layer dimensions must be non-zero, got ({fan_in}, {fan_out})")]
    ZeroDimension { fan_in: usize, fan_out: usize },

    #[error("ragged weight matrix: row {row} has {actual} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("layer {index} produces {fan_out} features but the next layer expects {next_fan_in}")]
    Incompatible {
        index: usize,
        fan_out: usize,
        next_fan_in: usize,
    },
}

pub type Result<T> = std::result::Result<T, NnError>;
