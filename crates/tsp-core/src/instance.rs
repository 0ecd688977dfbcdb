use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TspError;
use crate::matrix::DistanceMatrix;

fn default_zero_is_no_edge() -> bool {
    true
}

/// On-disk JSON layout of an instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InstanceFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub names: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Vec<(f64, f64)>>,
    /// `null` entries are missing edges.
    pub distances: Vec<Vec<Option<f64>>>,
    /// Treat an off-diagonal `0` like `null`.
    #[serde(default = "default_zero_is_no_edge")]
    pub zero_is_no_edge: bool,
}

/// A validated distance matrix together with node labels and optional
/// plotting coordinates.
#[derive(Clone, Debug)]
pub struct Instance {
    names: Vec<String>,
    coordinates: Option<Vec<(f64, f64)>>,
    matrix: DistanceMatrix,
}

impl Instance {
    /// Instance with index labels ("0", "1", ...).
    pub fn from_matrix(matrix: DistanceMatrix) -> Self {
        let names = (0..matrix.len()).map(|i| i.to_string()).collect();
        Instance {
            names,
            coordinates: None,
            matrix,
        }
    }

    pub fn with_names(mut self, names: Vec<String>) -> Result<Self, TspError> {
        if names.len() != self.matrix.len() {
            return Err(TspError::LabelCount {
                expected: self.matrix.len(),
                found: names.len(),
            });
        }
        self.names = names;
        Ok(self)
    }

    pub fn with_coordinates(mut self, coordinates: Vec<(f64, f64)>) -> Result<Self, TspError> {
        if coordinates.len() != self.matrix.len() {
            return Err(TspError::CoordinateCount {
                expected: self.matrix.len(),
                found: coordinates.len(),
            });
        }
        self.coordinates = Some(coordinates);
        Ok(self)
    }

    pub fn from_file(file: InstanceFile) -> Result<Self, TspError> {
        let rows = if file.zero_is_no_edge {
            file.distances
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|w| w.filter(|&w| w != 0.0))
                        .collect()
                })
                .collect()
        } else {
            file.distances
        };

        let mut instance = Self::from_matrix(DistanceMatrix::from_optional_rows(rows)?);
        if let Some(names) = file.names {
            instance = instance.with_names(names)?;
        }
        if let Some(coordinates) = file.coordinates {
            instance = instance.with_coordinates(coordinates)?;
        }
        Ok(instance)
    }

    pub fn to_file(&self) -> InstanceFile {
        let n = self.matrix.len();
        let distances = (0..n)
            .map(|i| (0..n).map(|j| self.matrix.edge(i, j)).collect())
            .collect();
        InstanceFile {
            names: Some(self.names.clone()),
            coordinates: self.coordinates.clone(),
            distances,
            zero_is_no_edge: false,
        }
    }

    pub fn from_json_str(s: &str) -> Result<Self, TspError> {
        Self::from_file(serde_json::from_str(s)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TspError> {
        Self::from_file(serde_json::from_reader(reader)?)
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, TspError> {
        let file = File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn to_json_string(&self) -> Result<String, TspError> {
        Ok(serde_json::to_string_pretty(&self.to_file())?)
    }

    pub fn matrix(&self) -> &DistanceMatrix {
        &self.matrix
    }

    pub fn len(&self) -> usize {
        self.matrix.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn coordinates(&self) -> Option<&[(f64, f64)]> {
        self.coordinates.as_deref()
    }

    pub fn label(&self, node: usize) -> Option<&str> {
        self.names.get(node).map(String::as_str)
    }

    /// Resolves a node by its label, falling back to a numeric index.
    pub fn resolve_node(&self, name: &str) -> Result<usize, TspError> {
        if let Some(node) = self.names.iter().position(|n| n == name) {
            return Ok(node);
        }
        match name.trim().parse::<usize>() {
            Ok(node) => {
                self.matrix.check_node(node)?;
                Ok(node)
            }
            Err(_) => Err(TspError::UnknownLabel(name.to_string())),
        }
    }

    /// "A -> B -> C -> A" for the tour `[A, B, C]`.
    pub fn format_path(&self, nodes: &[usize]) -> Result<String, TspError> {
        let mut labels = nodes
            .iter()
            .map(|&node| {
                self.label(node).ok_or(TspError::NodeOutOfRange {
                    node,
                    nodes: self.len(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if labels.len() > 1 {
            labels.push(labels[0]);
        }
        Ok(labels.join(" -> "))
    }
}
