//! Public assignment entry points.

use nalgebra::DMatrix;

use crate::internal::munkres::Munkres;
use crate::utils::{rows_to_dmatrix, validate_cost_matrix, validate_dmatrix};
use crate::Result;

/// Represents a match between a row index and column index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub row_idx: usize,
    pub col_idx: usize,
}

/// Result of a thresholded linear sum assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentResult {
    /// Kept (row, col) pairs, in solver output order
    pub assignments: Vec<Assignment>,
    /// Indices of rows that were not matched
    pub unmatched_rows: Vec<usize>,
    /// Indices of columns that were not matched
    pub unmatched_cols: Vec<usize>,
}

/// Solve the rectangular linear assignment problem.
///
/// Returns exactly `min(rows, cols)` pairs with distinct rows and distinct
/// columns, minimizing the summed cost. Among equal-cost optima, the one
/// reached by row-major scanning is returned, so repeated calls agree.
///
/// Pairs are ordered by row. When the matrix has more rows than columns they
/// are ordered by column instead.
///
/// # Errors
/// `Error::InvalidInput` if the matrix is empty or jagged, or holds a NaN or
/// infinite value. Nothing is solved in that case.
///
/// # Example
/// ```rust
/// let pairs = munkres_rs::solve(&[vec![1.0, 2.0, 3.0], vec![2.0, 4.0, 6.0]]).unwrap();
/// assert_eq!(pairs, vec![(0, 1), (1, 0)]);
/// ```
pub fn solve(matrix: &[Vec<f64>]) -> Result<Vec<(usize, usize)>> {
    validate_cost_matrix(matrix)?;
    Ok(Munkres::new(&rows_to_dmatrix(matrix)).solve())
}

/// Same as [`solve`], for an `nalgebra` matrix.
pub fn solve_matrix(matrix: &DMatrix<f64>) -> Result<Vec<(usize, usize)>> {
    validate_dmatrix(matrix)?;
    Ok(Munkres::new(matrix).solve())
}

/// Solve, then drop pairs costing more than `max_cost`.
///
/// The optimal assignment is computed on the full matrix first; the
/// threshold only filters it. Rows and columns left without a kept pair are
/// reported as unmatched, in ascending order.
///
/// # Arguments
/// * `cost_matrix` - cost[i][j] is the cost of assigning row i to column j
/// * `max_cost` - pairs with cost > max_cost are rejected
pub fn linear_sum_assignment(cost_matrix: &[Vec<f64>], max_cost: f64) -> Result<AssignmentResult> {
    let pairs = solve(cost_matrix)?;
    let num_rows = cost_matrix.len();
    let num_cols = cost_matrix[0].len();

    let assignments: Vec<Assignment> = pairs
        .into_iter()
        .filter(|&(row, col)| cost_matrix[row][col] <= max_cost)
        .map(|(row_idx, col_idx)| Assignment { row_idx, col_idx })
        .collect();

    let matched_rows: Vec<usize> = assignments.iter().map(|a| a.row_idx).collect();
    let matched_cols: Vec<usize> = assignments.iter().map(|a| a.col_idx).collect();

    Ok(AssignmentResult {
        unmatched_rows: get_unmatched(num_rows, &matched_rows),
        unmatched_cols: get_unmatched(num_cols, &matched_cols),
        assignments,
    })
}

/// Get unmatched indices from a match result.
pub fn get_unmatched(total: usize, matched: &[usize]) -> Vec<usize> {
    let mut is_matched = vec![false; total];
    for &idx in matched {
        if idx < total {
            is_matched[idx] = true;
        }
    }
    (0..total).filter(|&i| !is_matched[i]).collect()
}
