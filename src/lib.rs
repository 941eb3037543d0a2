//! # Munkres - Linear Assignment Solver
//!
//! Kuhn-Munkres (Hungarian) method for the rectangular linear assignment
//! problem: given an m x n matrix of costs, pick min(m, n) (row, column) pairs,
//! each row and each column used at most once, with the smallest total cost.
//!
//! ## Features
//!
//! - Rectangular matrices in either orientation
//! - Deterministic results (row-major tie-break between equal-cost optima)
//! - `nalgebra` matrix input
//! - Threshold-based association with unmatched rows/columns, for
//!   tracker-to-detection style matching
//!
//! ## Example
//!
//! ```rust
//! use munkres_rs::solve;
//!
//! let costs = vec![
//!     vec![4.0, 1.0, 3.0],
//!     vec![2.0, 0.0, 5.0],
//!     vec![3.0, 2.0, 2.0],
//! ];
//! let pairs = solve(&costs).unwrap();
//! assert_eq!(pairs, vec![(0, 1), (1, 0), (2, 2)]);
//! ```

// Internal modules
pub(crate) mod internal;

// Public modules
pub mod matching;
pub mod utils;

// Re-exports for convenience
pub use matching::{
    get_unmatched, linear_sum_assignment, solve, solve_matrix, Assignment, AssignmentResult,
};
pub use utils::assignment_cost;

// Error types
pub use crate::error::{Error, InputError, Result};

mod error {
    use thiserror::Error;

    /// Errors that can occur while solving an assignment problem.
    ///
    /// Valid input always converges, so the only failure is rejected input.
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum Error {
        #[error("Invalid input: {0}")]
        InvalidInput(#[from] InputError),
    }

    /// Reason a cost matrix was rejected.
    #[derive(Error, Debug, Clone, PartialEq)]
    pub enum InputError {
        #[error("cost matrix has no rows")]
        NoRows,

        #[error("cost matrix has no columns")]
        NoColumns,

        #[error("row {row} has {got} columns, expected {expected}")]
        JaggedRow {
            row: usize,
            expected: usize,
            got: usize,
        },

        #[error("non-finite cost {value} at ({row}, {col})")]
        NonFinite { row: usize, col: usize, value: f64 },
    }

    /// Result type for assignment operations
    pub type Result<T> = std::result::Result<T, Error>;
}
