use thiserror::Error;

#[derive(Debug, Error)]
pub enum TspError {
    #[error("distance matrix has no nodes")]
    EmptyMatrix,
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("negative weight {weight} on edge {from} -> {to}")]
    NegativeWeight { from: usize, to: usize, weight: f64 },
    #[error("weight on edge {from} -> {to} is not a number")]
    InvalidWeight { from: usize, to: usize },
    #[error("start node {start} is out of range for {nodes} nodes")]
    StartOutOfRange { start: usize, nodes: usize },
    #[error("node {node} is out of range for {nodes} nodes")]
    NodeOutOfRange { node: usize, nodes: usize },
    #[error("edge probability {0} is not in [0, 1]")]
    InvalidDensity(f64),
    #[error("maximum edge weight must be at least 1")]
    ZeroMaxWeight,
    #[error("instance has {found} names for {expected} nodes")]
    LabelCount { expected: usize, found: usize },
    #[error("instance has {found} coordinates for {expected} nodes")]
    CoordinateCount { expected: usize, found: usize },
    #[error("no node is labelled {0:?}")]
    UnknownLabel(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
