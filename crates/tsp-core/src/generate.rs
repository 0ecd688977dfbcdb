use log::debug;
use rand::Rng;

use crate::error::TspError;
use crate::instance::Instance;
use crate::matrix::DistanceMatrix;

/// Random symmetric instance: each unordered pair is joined with probability
/// `edge_probability` by an integer weight drawn from `1..=max_weight`.
pub fn random_instance(
    rng: &mut impl Rng,
    n: usize,
    edge_probability: f64,
    max_weight: u32,
) -> Result<Instance, TspError> {
    if n == 0 {
        return Err(TspError::EmptyMatrix);
    }
    if !(0.0..=1.0).contains(&edge_probability) {
        return Err(TspError::InvalidDensity(edge_probability));
    }
    if max_weight == 0 {
        return Err(TspError::ZeroMaxWeight);
    }
    let p = edge_probability;

    let mut rows = vec![vec![None; n]; n];
    let mut edges = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            if rng.gen_bool(p) {
                let w = f64::from(rng.gen_range(1..=max_weight));
                rows[i][j] = Some(w);
                rows[j][i] = Some(w);
                edges += 1;
            }
        }
    }

    debug!("generated random instance: {n} nodes, {edges} edges");

    let matrix = DistanceMatrix::from_optional_rows(rows)?;
    Ok(Instance::from_matrix(matrix))
}
