use ordered_float::NotNan;
use serde::{Deserialize, Serialize};

use crate::Error;

/// A finite, non-negative f64 value
#[derive(Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Weight(NotNan<f64>);

impl Weight {
    pub const ONE: Self = Self(unsafe { NotNan::new_unchecked(1.0) });

    pub fn new(value: f64) -> Option<Self> {
        let value = NotNan::new(value).ok()?;
        if value.is_sign_negative() || !value.is_finite() {
            return None;
        }
        Some(Self(value))
    }

    pub fn as_f64(&self) -> f64 {
        self.0.into_inner()
    }
}

impl TryFrom<f64> for Weight {
    type Error = Error;
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(Error::InvalidWeight(value))
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.as_f64()
    }
}

impl std::fmt::Debug for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether larger values of a criterion are preferred (benefit, "profit") or smaller values are
/// preferred (cost, "loss").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Benefit,
    Cost,
}

impl Impact {
    /// Returns true if `candidate` is strictly more favorable than `current` for this orientation.
    /// Ties are not improvements, so the first value seen is retained.
    pub fn improves(&self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Benefit => candidate > current,
            Self::Cost => candidate < current,
        }
    }

    /// Returns true if `candidate` is strictly less favorable than `current` for this orientation.
    pub fn worsens(&self, candidate: f64, current: f64) -> bool {
        match self {
            Self::Benefit => candidate < current,
            Self::Cost => candidate > current,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    #[serde(default)]
    pub name: String,
    pub weight: Weight,
    pub impact: Impact,
}

impl Criterion {
    pub fn benefit(weight: Weight) -> Self {
        Self {
            name: String::new(),
            weight,
            impact: Impact::Benefit,
        }
    }

    pub fn cost(weight: Weight) -> Self {
        Self {
            name: String::new(),
            weight,
            impact: Impact::Cost,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Per-criterion weights and orientations, indexed by criterion position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WeightVector(Vec<Criterion>);

impl WeightVector {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self(criteria)
    }

    /// Build a weight vector where every criterion is a benefit criterion.
    pub fn benefits(weights: &[f64]) -> Result<Self, Error> {
        weights
            .iter()
            .map(|&w| Weight::try_from(w).map(Criterion::benefit))
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn weight(&self, criterion: usize) -> Weight {
        self.0[criterion].weight
    }

    pub fn impact(&self, criterion: usize) -> Impact {
        self.0[criterion].impact
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.0
    }
}

impl FromIterator<Criterion> for WeightVector {
    fn from_iter<I: IntoIterator<Item = Criterion>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
