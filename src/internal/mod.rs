//! Internal solver machinery.
//!
//! - munkres: Kuhn-Munkres state machine over an `nalgebra` working matrix

pub mod munkres;
