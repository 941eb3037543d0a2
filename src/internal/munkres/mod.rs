//! Kuhn-Munkres (Hungarian) method as an explicit state machine.
//!
//! The solver owns a working copy of the cost matrix, a grid of zero
//! markings and one cover flag per row and column. Each step mutates that
//! state and names the step to run next:
//!
//! ```text
//! Reduce -> Star -> Cover -> Prime -> Augment -> Cover
//!                            Prime -> Minimize -> Prime
//!                   Cover -> Done
//! ```
//!
//! The working matrix always has at least as many columns as rows. Taller
//! inputs are transposed on the way in and the result indices are swapped
//! back on the way out.
//!
//! Costs whose spread would overflow `f64` during the cycle are scaled down
//! by a power of two first. A positive scale keeps the optimal assignment.
//!
//! All scans run in row-major order. That order is the tie-break between
//! equal-cost optimal assignments, so it must not change.

mod marks;
mod steps;

use log::{debug, trace};
use nalgebra::DMatrix;

use marks::{empty_grid, MarkGrid, ZeroMark};

/// State of the Munkres cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Subtract each row's minimum.
    Reduce,
    /// Greedily star independent zeros.
    Star,
    /// Cover starred columns and test for completion.
    Cover,
    /// Prime uncovered zeros looking for an augmenting seed.
    Prime,
    /// Augment along the path seeded by the primed zero at `(row, col)`.
    Augment { row: usize, col: usize },
    /// Shift costs to create a new uncovered zero.
    Minimize,
    Done,
}

/// Counters collected over one solve, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    pub augmentations: usize,
    pub minimizations: usize,
}

/// Working state of a single solve.
#[derive(Debug)]
pub struct Munkres {
    costs: DMatrix<f64>,
    marks: MarkGrid,
    row_covered: Vec<bool>,
    col_covered: Vec<bool>,
    transposed: bool,
    stats: SolveStats,
}

impl Munkres {
    /// Set up a solver for an already validated cost matrix.
    ///
    /// If the matrix has fewer columns than rows it is transposed so the
    /// working copy satisfies `rows <= cols`.
    pub fn new(costs: &DMatrix<f64>) -> Self {
        let transposed = costs.ncols() < costs.nrows();
        let mut costs = if transposed {
            costs.transpose()
        } else {
            costs.clone()
        };

        let scale = working_scale(&costs);
        if scale != 1.0 {
            debug!("munkres: scaling costs by {} to keep them finite", scale);
            costs *= scale;
        }
        let (rows, cols) = costs.shape();

        Self {
            costs,
            marks: empty_grid(rows, cols),
            row_covered: vec![false; rows],
            col_covered: vec![false; cols],
            transposed,
            stats: SolveStats::default(),
        }
    }

    /// Run the state machine to completion and return the assignment in the
    /// caller's orientation.
    pub fn solve(mut self) -> Vec<(usize, usize)> {
        let mut step = Step::Reduce;
        while step != Step::Done {
            let next = self.advance(step);
            trace!("munkres: {:?} -> {:?}", step, next);
            step = next;
        }

        debug!(
            "munkres: solved {}x{} (transposed: {}), {} augmentations, {} minimizations",
            self.rows(),
            self.cols(),
            self.transposed,
            self.stats.augmentations,
            self.stats.minimizations,
        );

        self.assignment()
    }

    /// Dispatch one step.
    fn advance(&mut self, step: Step) -> Step {
        match step {
            Step::Reduce => self.reduce_rows(),
            Step::Star => self.star_zeros(),
            Step::Cover => self.cover_starred_columns(),
            Step::Prime => self.prime_zeros(),
            Step::Augment { row, col } => self.augment_path(row, col),
            Step::Minimize => self.minimize(),
            Step::Done => Step::Done,
        }
    }

    /// Read the starred zeros out of the marking grid, one per working row.
    fn assignment(&self) -> Vec<(usize, usize)> {
        (0..self.rows())
            .filter_map(|row| {
                marks::find_in_row(&self.marks, row, ZeroMark::Starred).map(|col| {
                    if self.transposed {
                        (col, row)
                    } else {
                        (row, col)
                    }
                })
            })
            .collect()
    }

    fn rows(&self) -> usize {
        self.costs.nrows()
    }

    fn cols(&self) -> usize {
        self.costs.ncols()
    }

    fn clear_covers(&mut self) {
        self.row_covered.fill(false);
        self.col_covered.fill(false);
    }

    fn is_uncovered(&self, row: usize, col: usize) -> bool {
        !self.row_covered[row] && !self.col_covered[col]
    }
}

/// Power-of-two factor that keeps every working value finite.
///
/// Reduced costs and minimize adjustments stay below
/// `(rows + cols) * (max - min)`; that product is kept under `f64::MAX / 2`.
fn working_scale(costs: &DMatrix<f64>) -> f64 {
    let (lo, hi) = costs
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    // Halved first so the spread itself cannot overflow.
    let half_spread = hi / 2.0 - lo / 2.0;
    let bound = (costs.nrows() + costs.ncols()) as f64;

    let mut scale = 1.0;
    while half_spread * scale * bound >= f64::MAX / 2.0 {
        scale *= 0.5;
    }
    scale
}
