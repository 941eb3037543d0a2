//! Per-cell zero markings used by the Munkres state machine.

use nalgebra::DMatrix;

/// Marking of a single cell of the working matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroMark {
    #[default]
    None,
    /// Zero selected as part of the current candidate assignment.
    Starred,
    /// Zero found while searching for an augmenting path.
    Primed,
}

/// Grid of marks, same shape as the working matrix.
pub type MarkGrid = DMatrix<ZeroMark>;

/// Create an unmarked grid of the given shape.
pub fn empty_grid(rows: usize, cols: usize) -> MarkGrid {
    DMatrix::from_element(rows, cols, ZeroMark::None)
}

/// First column in `row` carrying `mark`.
pub fn find_in_row(grid: &MarkGrid, row: usize, mark: ZeroMark) -> Option<usize> {
    (0..grid.ncols()).find(|&col| grid[(row, col)] == mark)
}

/// First row in `col` carrying `mark`.
pub fn find_in_col(grid: &MarkGrid, col: usize, mark: ZeroMark) -> Option<usize> {
    (0..grid.nrows()).find(|&row| grid[(row, col)] == mark)
}

/// Reset every primed cell to unmarked. Stars are left alone.
pub fn erase_primes(grid: &mut MarkGrid) {
    for mark in grid.iter_mut() {
        if *mark == ZeroMark::Primed {
            *mark = ZeroMark::None;
        }
    }
}

/// Flip the marks along an augmenting path: stars are removed, primes become stars.
pub fn flip_path(grid: &mut MarkGrid, path: &[(usize, usize)]) {
    for &(row, col) in path {
        let cell = &mut grid[(row, col)];
        *cell = match *cell {
            ZeroMark::Starred => ZeroMark::None,
            ZeroMark::Primed => ZeroMark::Starred,
            ZeroMark::None => ZeroMark::None,
        };
    }
}
