//! Utility functions for cost matrices.

use nalgebra::DMatrix;
use crate::{InputError, Result};

/// Validate that a matrix is non-empty, rectangular and finite.
///
/// Checks run in order: row count, first row length, then each row's length
/// and values in row-major order. The first failure is reported.
pub fn validate_cost_matrix(matrix: &[Vec<f64>]) -> Result<()> {
    let first = matrix.first().ok_or(InputError::NoRows)?;
    let expected = first.len();
    if expected == 0 {
        return Err(InputError::NoColumns.into());
    }

    for (row, values) in matrix.iter().enumerate() {
        if values.len() != expected {
            return Err(InputError::JaggedRow {
                row,
                expected,
                got: values.len(),
            }
            .into());
        }
        check_finite(row, values.iter().copied())?;
    }

    Ok(())
}

/// Validate an `nalgebra` cost matrix: at least one row and column, all values finite.
pub fn validate_dmatrix(matrix: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows == 0 {
        return Err(InputError::NoRows.into());
    }
    if cols == 0 {
        return Err(InputError::NoColumns.into());
    }

    for row in 0..rows {
        check_finite(row, matrix.row(row).iter().copied())?;
    }

    Ok(())
}

fn check_finite(row: usize, values: impl Iterator<Item = f64>) -> Result<()> {
    for (col, value) in values.enumerate() {
        if !value.is_finite() {
            return Err(InputError::NonFinite { row, col, value }.into());
        }
    }
    Ok(())
}

/// Convert validated row slices into a matrix.
pub fn rows_to_dmatrix(matrix: &[Vec<f64>]) -> DMatrix<f64> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    DMatrix::from_fn(rows, cols, |i, j| matrix[i][j])
}

/// Sum of the costs at the given (row, col) pairs.
///
/// Pairs outside the matrix contribute nothing.
pub fn assignment_cost(matrix: &[Vec<f64>], pairs: &[(usize, usize)]) -> f64 {
    pairs
        .iter()
        .filter_map(|&(row, col)| matrix.get(row).and_then(|r| r.get(col)))
        .sum()
}
