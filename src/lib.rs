//! Brute force solver for the Countdown numbers game.
//!
//! Every full binary tree shape with one leaf per input number is
//! enumerated, and for every shape all assignments of the operators `+`,
//! `-`, `*`, `/`, `^` and "ignore" to its internal nodes are tried against
//! every permutation of the numbers. The shapes are searched in parallel,
//! all tasks reporting to one shared best solution.
//!
//! ```no_run
//! use countdown::{enumerate_shapes, Search};
//!
//! let numbers = [25, 50, 75, 100, 3, 6];
//! let shapes = enumerate_shapes(numbers.len())?;
//! let solution = Search::new().run(&shapes, &numbers, 952)?;
//! println!("{} = {}", solution.explain(), solution.value);
//! # Ok::<(), countdown::Error>(())
//! ```

pub mod error;
pub mod expr;
pub mod render;
pub mod search;
pub mod shapes;
pub mod tree;

pub use error::{Error, Result};
pub use expr::{evaluate, explain, Operator};
pub use render::{diagram, Report};
pub use search::{search_shape, BestSolution, Search, Solution};
pub use shapes::{enumerate_shapes, Shape};
pub use tree::Tree;

/// The largest number of input numbers supported.
///
/// The search space grows as `6^(n-1) * n! * Catalan(n-1)`, so this is far
/// beyond anything that finishes in practice; it bounds the evaluation
/// stacks.
pub const MAX_NUMBERS: usize = 10;
