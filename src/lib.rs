pub mod alternative;
pub mod criteria;
pub mod ideal;
pub mod matrix;
pub mod num;
pub mod problem;
pub mod ranking;

pub use arrayvec::ArrayVec;

pub use crate::alternative::Alternative;
pub use crate::criteria::{Criterion, Impact, Weight, WeightVector};
pub use crate::ideal::IdealSolution;
pub use crate::matrix::{Accumulate, Compress, DecisionMatrix};
pub use crate::num::{Normalized, Value};
pub use crate::problem::{Choice, Problem};
pub use crate::ranking::{Stage, Topsis};

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("at least one alternative must be registered")]
    EmptyAlternativeSet,
    #[error("no compressible decision matrix accumulator configured")]
    MissingAccumulatorCapability,
    #[error("weight vector must be configured")]
    MissingWeightVector,
    #[error("profit and loss ideal solutions could not be seeded")]
    MissingIdealSolution,
    #[error("alternative {alternative} has {found} criteria, expected {expected}")]
    CriteriaMismatch {
        alternative: usize,
        expected: usize,
        found: usize,
    },
    #[error("alternatives must be ranked before selecting from them")]
    NotRanked,
    #[error("invalid weight {0}, expected a finite non-negative number")]
    InvalidWeight(f64),
    #[error("alternative {alternative} has a non-finite value for criterion {criterion}")]
    NonFiniteValue { alternative: usize, criterion: usize },
}
