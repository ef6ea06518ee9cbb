use polars::prelude::PolarsError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, HeterogeneityError>;

#[derive(Error, Debug)]
pub enum HeterogeneityError {
    #[error("Weight and grade arrays must be same length (weights: {weights}, grades: {grades})")]
    LengthMismatch { weights: usize, grades: usize },

    #[error("Degenerate input: {0}")]
    DegenerateInput(&'static str),

    #[error("Invalid fraction at index {index} (weight: {weight}, grade: {grade})")]
    InvalidFraction {
        index: usize,
        weight: f64,
        grade: f64,
    },

    #[error("Grouping {0} has no resources to render")]
    EmptyGrouping(String),

    #[error("Panel {index} out of range for figure with {len} panels")]
    PanelOutOfRange { index: usize, len: usize },

    #[error("Table error: {0}")]
    Table(#[from] PolarsError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Serialization error: {0}")]
    Config(#[from] serde_json::Error),
}
