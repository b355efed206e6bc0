// # Paint Shop: Color Sequencing with Minimal Switches
//
// Assigns white or black to each car of an ordered sequence so that every car
// type receives a prescribed number of each color, while keeping the number of
// adjacent color switches small.
//
// Three routes are provided: a greedy single pass (`greedy`), the exact
// constrained quadratic 0/1 program (`formulation`), and its penalty reduction
// to an unconstrained QUBO (`qubo`) for annealers and other binary-quadratic
// solvers. Everything scores through `evaluate`, so heuristic and external
// results are directly comparable.

/// Sequences of typed items.
pub mod instance;

/// Per-type color demand and its validation.
pub mod demand;

/// The greedy assignor.
pub mod greedy;

/// Colorings, switch counting and scoring.
pub mod evaluate;

/// The exact constrained formulation.
pub mod formulation;

/// Penalty reduction of the exact formulation to a QUBO.
pub mod qubo;

/// Interfaces to external solvers, and a brute-force one for small instances.
pub mod solver;

/// Random instance generators.
pub mod generate;

/// Named built-in instances.
pub mod problems;

/// Reading jobs from JSON or token input.
pub mod io;

/// A trait for conveniently updating a value to its minimum.
pub trait SetMin {
    /// If `v` is less than `self`, updates `self` to `v` and returns `true`.
    /// Otherwise, returns `false`.
    fn setmin(&mut self, v: Self) -> bool;
}
impl<T> SetMin for T
where
    T: PartialOrd,
{
    fn setmin(&mut self, v: T) -> bool {
        *self > v && {
            *self = v;
            true
        }
    }
}

/// A macro for convenient initialization of vectors, including nested vectors for multi-dimensional arrays.
///
/// # Examples
///
/// ```
/// use paintshop::mat;
/// // A simple vector
/// let v1 = mat![1, 2, 3];
///
/// // A 2x3 matrix initialized with zeros
/// let m1 = mat![0; 2; 3];
/// assert_eq!(m1, vec![vec![0, 0, 0], vec![0, 0, 0]]);
/// ```
#[macro_export]
macro_rules! mat {
    ($($e:expr),*) => { vec![$($e),*] };
    ($($e:expr,)*) => { vec![$($e),*] };
    ($e:expr; $d:expr) => { vec![$e; $d] };
    ($e:expr; $d:expr $(; $ds:expr)+) => { vec![mat![$e $(; $ds)*]; $d] };
}
