//! The individual steps of the Munkres cycle.
//!
//! Each step mutates the solver state and returns the step to run next.

use log::trace;

use super::marks::{self, ZeroMark};
use super::{Munkres, Step};

impl Munkres {
    /// Subtract the smallest value of each row from every entry of that row.
    ///
    /// Leaves at least one exact zero per row.
    pub(super) fn reduce_rows(&mut self) -> Step {
        for row in 0..self.rows() {
            let smallest = self
                .costs
                .row(row)
                .iter()
                .copied()
                .fold(f64::INFINITY, f64::min);
            for col in 0..self.cols() {
                self.costs[(row, col)] -= smallest;
            }
        }
        Step::Star
    }

    /// Star the first zero of each row whose column holds no star yet.
    ///
    /// Covers are used as scratch here and cleared before returning.
    pub(super) fn star_zeros(&mut self) -> Step {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.costs[(row, col)] == 0.0 && self.is_uncovered(row, col) {
                    self.marks[(row, col)] = ZeroMark::Starred;
                    self.row_covered[row] = true;
                    self.col_covered[col] = true;
                }
            }
        }
        self.clear_covers();
        Step::Cover
    }

    /// Cover every column holding a starred zero.
    ///
    /// Once every row's star sits in its own covered column the assignment
    /// is complete.
    pub(super) fn cover_starred_columns(&mut self) -> Step {
        for col in 0..self.cols() {
            if marks::find_in_col(&self.marks, col, ZeroMark::Starred).is_some() {
                self.col_covered[col] = true;
            }
        }

        let covered = self.col_covered.iter().filter(|&&c| c).count();
        if covered == self.rows() {
            Step::Done
        } else {
            Step::Prime
        }
    }

    /// Prime uncovered zeros until one is found with no star in its row.
    ///
    /// A primed zero sharing a row with a star covers that row and uncovers
    /// the star's column. When no uncovered zero is left the costs must be
    /// adjusted first.
    pub(super) fn prime_zeros(&mut self) -> Step {
        while let Some((row, col)) = self.first_uncovered_zero() {
            self.marks[(row, col)] = ZeroMark::Primed;
            match marks::find_in_row(&self.marks, row, ZeroMark::Starred) {
                Some(star_col) => {
                    self.row_covered[row] = true;
                    self.col_covered[star_col] = false;
                }
                None => return Step::Augment { row, col },
            }
        }
        Step::Minimize
    }

    /// Flip stars and primes along the alternating path that starts at the
    /// primed zero `(row, col)`, then reset covers and primes.
    ///
    /// The path alternates prime, star (same column), prime (same row) and
    /// ends at a prime with no star in its column.
    pub(super) fn augment_path(&mut self, row: usize, col: usize) -> Step {
        let mut path = vec![(row, col)];
        let mut col = col;

        while let Some(star_row) = marks::find_in_col(&self.marks, col, ZeroMark::Starred) {
            path.push((star_row, col));
            // Every starred row on the path also holds a prime.
            match marks::find_in_row(&self.marks, star_row, ZeroMark::Primed) {
                Some(prime_col) => {
                    path.push((star_row, prime_col));
                    col = prime_col;
                }
                None => break,
            }
        }

        trace!("munkres: augmenting path of length {}", path.len());
        marks::flip_path(&mut self.marks, &path);
        self.clear_covers();
        marks::erase_primes(&mut self.marks);
        self.stats.augmentations += 1;
        Step::Cover
    }

    /// Add the smallest uncovered value to covered rows and subtract it from
    /// uncovered columns.
    ///
    /// Applied as a net per-cell change: a covered row in an uncovered column
    /// is untouched. Existing zeros survive and at least one new uncovered
    /// zero appears.
    pub(super) fn minimize(&mut self) -> Step {
        let smallest = self.smallest_uncovered();
        trace!("munkres: minimizing by {}", smallest);

        for row in 0..self.rows() {
            for col in 0..self.cols() {
                match (self.row_covered[row], self.col_covered[col]) {
                    (true, true) => self.costs[(row, col)] += smallest,
                    (false, false) => self.costs[(row, col)] -= smallest,
                    _ => {}
                }
            }
        }
        self.stats.minimizations += 1;
        Step::Prime
    }

    /// First zero, in row-major order, whose row and column are both uncovered.
    fn first_uncovered_zero(&self) -> Option<(usize, usize)> {
        (0..self.rows())
            .filter(|&row| !self.row_covered[row])
            .find_map(|row| {
                (0..self.cols())
                    .find(|&col| !self.col_covered[col] && self.costs[(row, col)] == 0.0)
                    .map(|col| (row, col))
            })
    }

    fn smallest_uncovered(&self) -> f64 {
        let mut smallest = f64::INFINITY;
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                if self.is_uncovered(row, col) {
                    smallest = smallest.min(self.costs[(row, col)]);
                }
            }
        }
        smallest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;

    fn solver(data: &[f64], rows: usize, cols: usize) -> Munkres {
        Munkres::new(&DMatrix::from_row_slice(rows, cols, data))
    }

    #[test]
    #[rustfmt::skip]
    fn test_reduce_rows() {
        let mut m = solver(&[
            4.0, 1.0, 3.0,
            2.0, 0.0, 5.0,
            3.0, 2.0, 2.0,
        ], 3, 3);
        assert_eq!(m.reduce_rows(), Step::Star);
        assert_eq!(m.costs, DMatrix::from_row_slice(3, 3, &[
            3.0, 0.0, 2.0,
            2.0, 0.0, 5.0,
            1.0, 0.0, 0.0,
        ]));
    }

    #[test]
    fn test_reduce_rows_negative_values() {
        let mut m = solver(&[-3.0, -1.0, 2.0], 1, 3);
        m.reduce_rows();
        assert_eq!(m.costs, DMatrix::from_row_slice(1, 3, &[0.0, 2.0, 5.0]));
    }

    #[test]
    #[rustfmt::skip]
    fn test_star_zeros_row_major() {
        let mut m = solver(&[
            0.0, 0.0, 1.0,
            0.0, 1.0, 0.0,
            1.0, 0.0, 0.0,
        ], 3, 3);
        assert_eq!(m.star_zeros(), Step::Cover);

        assert_eq!(m.marks[(0, 0)], ZeroMark::Starred);
        assert_eq!(m.marks[(0, 1)], ZeroMark::None);
        assert_eq!(m.marks[(1, 0)], ZeroMark::None);
        assert_eq!(m.marks[(1, 2)], ZeroMark::Starred);
        assert_eq!(m.marks[(2, 1)], ZeroMark::Starred);
        assert_eq!(m.marks[(2, 2)], ZeroMark::None);

        // Scratch covers are released.
        assert!(m.row_covered.iter().all(|&c| !c));
        assert!(m.col_covered.iter().all(|&c| !c));
    }

    #[test]
    fn test_cover_done_when_every_row_starred() {
        let mut m = solver(&[0.0, 1.0, 1.0, 0.0], 2, 2);
        m.star_zeros();
        assert_eq!(m.cover_starred_columns(), Step::Done);
        assert_eq!(m.col_covered, vec![true, true]);
    }

    #[test]
    fn test_cover_goes_to_prime_when_incomplete() {
        let mut m = solver(&[0.0, 1.0, 0.0, 1.0], 2, 2);
        m.star_zeros();
        assert_eq!(m.cover_starred_columns(), Step::Prime);
        assert_eq!(m.col_covered, vec![true, false]);
    }

    #[test]
    fn test_prime_without_uncovered_zero_minimizes() {
        let mut m = solver(&[0.0, 1.0, 0.0, 1.0], 2, 2);
        m.star_zeros();
        m.cover_starred_columns();
        assert_eq!(m.prime_zeros(), Step::Minimize);
    }

    #[test]
    #[rustfmt::skip]
    fn test_prime_covers_row_and_uncovers_star_column() {
        // Star at (0,0). Prime at (0,1) shares its row, so row 0 is covered
        // and column 0 reopened; then (1,0) is a prime with no star in its row.
        let mut m = solver(&[
            0.0, 0.0,
            0.0, 1.0,
        ], 2, 2);
        m.star_zeros();
        m.cover_starred_columns();
        assert_eq!(m.prime_zeros(), Step::Augment { row: 1, col: 0 });
        assert_eq!(m.marks[(0, 1)], ZeroMark::Primed);
        assert_eq!(m.marks[(1, 0)], ZeroMark::Primed);
        assert!(m.row_covered[0]);
        assert!(!m.col_covered[0]);
    }

    #[test]
    #[rustfmt::skip]
    fn test_augment_path_flips_marks() {
        let mut m = solver(&[
            0.0, 0.0,
            0.0, 1.0,
        ], 2, 2);
        m.star_zeros();
        m.cover_starred_columns();
        let next = m.prime_zeros();
        let Step::Augment { row, col } = next else {
            panic!("expected augmentation, got {:?}", next);
        };

        assert_eq!(m.augment_path(row, col), Step::Cover);
        assert_eq!(m.marks[(0, 0)], ZeroMark::None);
        assert_eq!(m.marks[(0, 1)], ZeroMark::Starred);
        assert_eq!(m.marks[(1, 0)], ZeroMark::Starred);
        assert!(m.row_covered.iter().all(|&c| !c));
        assert!(m.col_covered.iter().all(|&c| !c));
        assert_eq!(m.stats.augmentations, 1);

        assert_eq!(m.cover_starred_columns(), Step::Done);
    }

    #[test]
    #[rustfmt::skip]
    fn test_minimize_net_change() {
        let mut m = solver(&[
            0.0, 3.0, 4.0,
            0.0, 2.0, 5.0,
        ], 2, 3);
        m.row_covered = vec![true, false];
        m.col_covered = vec![true, false, false];

        assert_eq!(m.minimize(), Step::Prime);
        // Smallest uncovered is 2.0 at (1,1).
        assert_eq!(m.costs, DMatrix::from_row_slice(2, 3, &[
            2.0, 3.0, 4.0,
            0.0, 0.0, 3.0,
        ]));
        assert_eq!(m.stats.minimizations, 1);
    }

    #[test]
    #[rustfmt::skip]
    fn test_first_uncovered_zero_skips_covered() {
        let mut m = solver(&[
            0.0, 0.0,
            1.0, 0.0,
        ], 2, 2);
        assert_eq!(m.first_uncovered_zero(), Some((0, 0)));
        m.col_covered[0] = true;
        assert_eq!(m.first_uncovered_zero(), Some((0, 1)));
        m.row_covered[0] = true;
        assert_eq!(m.first_uncovered_zero(), Some((1, 1)));
        m.col_covered[1] = true;
        assert_eq!(m.first_uncovered_zero(), None);
    }
}
