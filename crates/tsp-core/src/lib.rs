#![deny(clippy::all)]

pub mod error;
pub mod generate;
pub mod instance;
pub mod matrix;
pub mod state;
pub mod tour;

pub use error::TspError;
pub use generate::random_instance;
pub use instance::{Instance, InstanceFile};
pub use matrix::DistanceMatrix;
pub use state::SearchState;
pub use tour::Tour;
