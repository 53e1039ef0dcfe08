use std::collections::BTreeSet;

/// Scores the ruggedness of one subgraph of a landscape.
pub trait RuggednessEstimator {
    fn ruggedness(&self, subgraph: &[(String, f64)]) -> f64;
}

/// Roughness-to-slope ratio of an additive per-position fit.
///
/// Each position is one-hot encoded against the first residue (in byte
/// order) seen at that position. Positions that never vary contribute no
/// columns.
#[derive(Debug, Clone, Copy)]
pub struct RoughnessToSlope {
    pub ridge: f64,
}

impl Default for RoughnessToSlope {
    fn default() -> Self {
        Self { ridge: 1e-8 }
    }
}

impl RuggednessEstimator for RoughnessToSlope {
    fn ruggedness(&self, subgraph: &[(String, f64)]) -> f64 {
        if subgraph.len() < 2 {
            return f64::NAN;
        }
        let design = additive_design(subgraph);
        let n_coef = design.first().map_or(0, Vec::len);
        let y: Vec<f64> = subgraph.iter().map(|(_, score)| *score).collect();

        let Some(beta) = fit_least_squares(&design, &y, self.ridge) else {
            return f64::NAN;
        };

        let sse: f64 = design
            .iter()
            .zip(&y)
            .map(|(row, target)| {
                let predicted: f64 = row.iter().zip(&beta).map(|(x, b)| x * b).sum();
                (target - predicted).powi(2)
            })
            .sum();
        let roughness = (sse / y.len() as f64).sqrt();

        if n_coef < 2 {
            return f64::NAN;
        }
        let slope = beta[1..].iter().map(|b| b.abs()).sum::<f64>() / (n_coef - 1) as f64;
        if slope == 0.0 || !slope.is_finite() {
            return f64::NAN;
        }
        roughness / slope
    }
}

/// Intercept column followed by one indicator per non-reference residue
/// at every position.
fn additive_design(subgraph: &[(String, f64)]) -> Vec<Vec<f64>> {
    let seq_len = subgraph
        .iter()
        .map(|(seq, _)| seq.len())
        .min()
        .unwrap_or(0);

    let mut columns: Vec<(usize, u8)> = Vec::new();
    for pos in 0..seq_len {
        let residues: BTreeSet<u8> = subgraph.iter().map(|(seq, _)| seq.as_bytes()[pos]).collect();
        columns.extend(residues.into_iter().skip(1).map(|aa| (pos, aa)));
    }

    subgraph
        .iter()
        .map(|(seq, _)| {
            let bytes = seq.as_bytes();
            let mut row = Vec::with_capacity(columns.len() + 1);
            row.push(1.0);
            row.extend(
                columns
                    .iter()
                    .map(|(pos, aa)| if bytes[*pos] == *aa { 1.0 } else { 0.0 }),
            );
            row
        })
        .collect()
}

/// Solves the ridge-regularized normal equations by Gaussian elimination
/// with partial pivoting.
fn fit_least_squares(design: &[Vec<f64>], y: &[f64], ridge: f64) -> Option<Vec<f64>> {
    let k = design.first()?.len();
    let mut a = vec![vec![0.0; k + 1]; k];
    for (row, target) in design.iter().zip(y) {
        for i in 0..k {
            for j in 0..k {
                a[i][j] += row[i] * row[j];
            }
            a[i][k] += row[i] * target;
        }
    }
    for (i, eq) in a.iter_mut().enumerate() {
        eq[i] += ridge;
    }

    for col in 0..k {
        let pivot = (col..k).max_by(|&l, &r| a[l][col].abs().total_cmp(&a[r][col].abs()))?;
        if a[pivot][col].abs() < f64::EPSILON * 1e-3 {
            return None;
        }
        a.swap(col, pivot);
        for row in (col + 1)..k {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for c in col..=k {
                a[row][c] -= factor * a[col][c];
            }
        }
    }

    let mut beta = vec![0.0; k];
    for row in (0..k).rev() {
        let tail: f64 = ((row + 1)..k).map(|c| a[row][c] * beta[c]).sum();
        beta[row] = (a[row][k] - tail) / a[row][row];
    }
    Some(beta)
}

#[cfg(test)]
#[path = "../../tests/src_inline/ruggedness/estimator.rs"]
mod tests;
