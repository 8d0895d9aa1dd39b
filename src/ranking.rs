use arrayvec::ArrayVec;

use crate::{Alternative, Compress, DecisionMatrix, Error, IdealSolution, Value, WeightVector};

/// Pipeline stages, in the order `Topsis::process` moves through them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Uninitialized,
    Validated,
    DataCollected,
    MatrixBuilt,
    WeightedBuilt,
    IdealExtracted,
    DistancesComputed,
    Ranked,
}

/// Ranks a set of alternatives by their relative closeness to the ideal solution.
///
/// The accumulator and weight vector must be set before calling [`Topsis::process`]. After a
/// successful run, [`Topsis::alternatives`] is sorted by ascending closeness, so the best
/// alternative is last. Calling `process` again recomputes every derived value from the raw data
/// and yields the same ranking.
#[derive(Clone, Debug)]
pub struct Topsis<V = f64, A = DecisionMatrix> {
    alternatives: Vec<Alternative<V>>,
    accumulator: Option<A>,
    weights: Option<WeightVector>,
    profit: Option<IdealSolution>,
    loss: Option<IdealSolution>,
    stage: Stage,
}

impl<V, A> Default for Topsis<V, A> {
    fn default() -> Self {
        Self {
            alternatives: Vec::new(),
            accumulator: None,
            weights: None,
            profit: None,
            loss: None,
            stage: Stage::Uninitialized,
        }
    }
}

impl<V: Value, A: Compress> Topsis<V, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_alternative(&mut self, mut alternative: Alternative<V>) {
        alternative.set_index(self.alternatives.len());
        self.alternatives.push(alternative);
        self.stage = Stage::Uninitialized;
    }

    pub fn alternatives(&self) -> &[Alternative<V>] {
        &self.alternatives
    }

    pub fn accumulator(&self) -> Option<&A> {
        self.accumulator.as_ref()
    }

    pub fn set_accumulator(&mut self, accumulator: A) {
        self.accumulator = Some(accumulator);
        self.stage = Stage::Uninitialized;
    }

    pub fn weights(&self) -> Option<&WeightVector> {
        self.weights.as_ref()
    }

    pub fn set_weights(&mut self, weights: WeightVector) {
        self.weights = Some(weights);
        self.stage = Stage::Uninitialized;
    }

    pub fn profit(&self) -> Option<&IdealSolution> {
        self.profit.as_ref()
    }

    pub fn loss(&self) -> Option<&IdealSolution> {
        self.loss.as_ref()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn process(&mut self) -> Result<(), Error> {
        self.stage = Stage::Uninitialized;
        self.profit = None;
        self.loss = None;
        for alternative in &mut self.alternatives {
            alternative.clear_derived();
        }
        self.validate()?;
        self.collect_data()?;
        self.calculate()?;
        self.sort();
        Ok(())
    }

    fn validate(&mut self) -> Result<(), Error> {
        if self.alternatives.is_empty() {
            tracing::warn!("no alternatives registered");
            return Err(Error::EmptyAlternativeSet);
        }
        if self.accumulator.is_none() {
            tracing::warn!("no decision matrix accumulator configured");
            return Err(Error::MissingAccumulatorCapability);
        }
        let weights = self.weights.as_ref().ok_or_else(|| {
            tracing::warn!("no weight vector configured");
            Error::MissingWeightVector
        })?;
        if let Some(alternative) = self
            .alternatives
            .iter()
            .find(|a| a.criteria() != weights.len())
        {
            tracing::warn!(
                index = alternative.index(),
                criteria = alternative.criteria(),
                weights = weights.len(),
                "criteria count does not match weight vector"
            );
            return Err(Error::CriteriaMismatch {
                alternative: alternative.index(),
                expected: weights.len(),
                found: alternative.criteria(),
            });
        }
        for alternative in &self.alternatives {
            if let Some(criterion) = alternative.non_finite_criterion() {
                tracing::warn!(
                    index = alternative.index(),
                    criterion,
                    "alternative has a non-finite value"
                );
                return Err(Error::NonFiniteValue {
                    alternative: alternative.index(),
                    criterion,
                });
            }
        }
        self.stage = Stage::Validated;
        tracing::debug!(
            alternatives = self.alternatives.len(),
            criteria = weights.len(),
            "validated"
        );
        Ok(())
    }

    fn collect_data(&mut self) -> Result<(), Error> {
        let accumulator = self
            .accumulator
            .as_mut()
            .ok_or(Error::MissingAccumulatorCapability)?;
        let criteria = self.weights.as_ref().map(|w| w.len()).unwrap_or_default();
        accumulator.reset(self.alternatives.len(), criteria);
        for alternative in &self.alternatives {
            alternative.collect_data(accumulator);
        }
        accumulator.compress()?;
        self.stage = Stage::DataCollected;
        tracing::debug!("decision matrix compressed");
        Ok(())
    }

    fn calculate(&mut self) -> Result<(), Error> {
        let accumulator = self
            .accumulator
            .as_ref()
            .ok_or(Error::MissingAccumulatorCapability)?;
        let weights = self.weights.as_ref().ok_or(Error::MissingWeightVector)?;

        for alternative in &mut self.alternatives {
            alternative.calculate_decision_matrix(accumulator);
        }
        self.stage = Stage::MatrixBuilt;

        for alternative in &mut self.alternatives {
            alternative.calculate_weighted_decision_matrix(weights);
        }
        self.stage = Stage::WeightedBuilt;

        let seed = self.alternatives.first();
        let (mut profit, mut loss) = match (
            seed.and_then(|a| a.adapt_weighted_decision_matrix()),
            seed.and_then(|a| a.adapt_weighted_decision_matrix()),
        ) {
            (Some(profit), Some(loss)) => (profit, loss),
            _ => {
                tracing::warn!("failed to seed ideal solutions");
                return Err(Error::MissingIdealSolution);
            }
        };
        for alternative in &self.alternatives {
            alternative.update_profit(&mut profit, weights);
            alternative.update_loss(&mut loss, weights);
        }
        self.stage = Stage::IdealExtracted;
        tracing::debug!(profit = ?profit.values(), loss = ?loss.values(), "ideal solutions");

        for alternative in &mut self.alternatives {
            alternative.calculate_profit_distance(&profit);
            alternative.calculate_loss_distance(&loss);
        }
        self.profit = Some(profit);
        self.loss = Some(loss);
        self.stage = Stage::DistancesComputed;

        for alternative in &mut self.alternatives {
            alternative.calculate_preference();
        }
        Ok(())
    }

    fn sort(&mut self) {
        let mut sort = permutation::sort_by(&self.alternatives[..], |a, b| a.rank_cmp(b));
        sort.apply_slice_in_place(&mut self.alternatives);
        self.stage = Stage::Ranked;
        tracing::debug!("alternatives ranked");
    }

    /// Returns the alternative with the highest closeness.
    ///
    /// Only the first and last alternatives are compared, without scanning the whole set. That is
    /// correct only on a ranked sequence, so this returns [`Error::NotRanked`] unless the last
    /// `process` succeeded and no alternative, weight vector or accumulator has changed since.
    pub fn best_alternative(&self) -> Result<&Alternative<V>, Error> {
        let (first, last) = match (self.alternatives.first(), self.alternatives.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::EmptyAlternativeSet),
        };
        if self.stage != Stage::Ranked {
            return Err(Error::NotRanked);
        }
        Ok(if first.rank_cmp(last).is_gt() {
            first
        } else {
            last
        })
    }

    /// Up to `LIMIT` of the highest ranked alternatives, best first.
    pub fn shortlist<const LIMIT: usize>(&self) -> Result<ArrayVec<&Alternative<V>, LIMIT>, Error> {
        if self.alternatives.is_empty() {
            return Err(Error::EmptyAlternativeSet);
        }
        if self.stage != Stage::Ranked {
            return Err(Error::NotRanked);
        }
        Ok(self.alternatives.iter().rev().take(LIMIT).collect())
    }
}

#[cfg(test)]
mod test {
    use super::{Stage, Topsis};
    use crate::{Alternative, DecisionMatrix, Error, WeightVector};
    use arrayvec::ArrayVec;

    fn engine(values: &[f64]) -> Topsis {
        let mut topsis = Topsis::new();
        topsis.set_accumulator(DecisionMatrix::default());
        topsis.set_weights(WeightVector::benefits(&[1.0]).unwrap());
        for value in values {
            topsis.add_alternative(Alternative::new(vec![*value]));
        }
        topsis
    }

    #[test]
    fn empty_alternative_set() {
        let mut topsis = engine(&[]);
        assert_eq!(topsis.process(), Err(Error::EmptyAlternativeSet));
        assert_eq!(topsis.stage(), Stage::Uninitialized);
        assert_eq!(
            topsis.best_alternative().err(),
            Some(Error::EmptyAlternativeSet)
        );
    }

    #[test]
    fn missing_accumulator() {
        let mut topsis: Topsis = Topsis::new();
        topsis.set_weights(WeightVector::benefits(&[1.0]).unwrap());
        topsis.add_alternative(Alternative::new(vec![1.0]));
        assert_eq!(topsis.process(), Err(Error::MissingAccumulatorCapability));
    }

    #[test]
    fn missing_weight_vector() {
        let mut topsis: Topsis = Topsis::new();
        topsis.set_accumulator(DecisionMatrix::default());
        topsis.add_alternative(Alternative::new(vec![1.0]));
        assert_eq!(topsis.process(), Err(Error::MissingWeightVector));
    }

    #[test]
    fn criteria_mismatch() {
        let mut topsis = engine(&[1.0]);
        topsis.add_alternative(Alternative::new(vec![1.0, 2.0]));
        assert_eq!(
            topsis.process(),
            Err(Error::CriteriaMismatch {
                alternative: 1,
                expected: 1,
                found: 2,
            })
        );
    }

    #[test]
    fn non_finite_value() {
        let mut topsis = engine(&[1.0, f64::NAN]);
        assert_eq!(
            topsis.process(),
            Err(Error::NonFiniteValue {
                alternative: 1,
                criterion: 0,
            })
        );
        let mut topsis = engine(&[f64::INFINITY]);
        assert_eq!(
            topsis.process(),
            Err(Error::NonFiniteValue {
                alternative: 0,
                criterion: 0,
            })
        );
    }

    #[test]
    fn failed_rerun_clears_previous_results() {
        let mut topsis = engine(&[1.0, 3.0]);
        topsis.process().unwrap();
        assert!(topsis.profit().is_some());

        topsis.set_weights(WeightVector::benefits(&[1.0, 1.0]).unwrap());
        assert!(matches!(
            topsis.process(),
            Err(Error::CriteriaMismatch { .. })
        ));
        assert_eq!(topsis.stage(), Stage::Uninitialized);
        assert!(topsis.profit().is_none());
        assert!(topsis.loss().is_none());
        assert!(topsis.alternatives().iter().all(|a| a.closeness().is_none()));
        assert!(topsis.alternatives().iter().all(|a| a.weighted().is_empty()));
    }

    #[test]
    fn best_requires_ranking() {
        let mut topsis = engine(&[1.0, 3.0]);
        assert_eq!(topsis.best_alternative().err(), Some(Error::NotRanked));
        topsis.process().unwrap();
        assert_eq!(topsis.stage(), Stage::Ranked);
        assert_eq!(topsis.best_alternative().unwrap().index(), 1);

        topsis.add_alternative(Alternative::new(vec![2.0]));
        assert_eq!(topsis.best_alternative().err(), Some(Error::NotRanked));
        assert_eq!(topsis.shortlist::<2>().err(), Some(Error::NotRanked));
    }

    #[test]
    fn sort_is_stable() {
        let mut topsis = engine(&[2.0, 1.0, 2.0, 1.0]);
        topsis.process().unwrap();
        let order: Vec<usize> = topsis.alternatives().iter().map(|a| a.index()).collect();
        assert_eq!(order, vec![1, 3, 0, 2]);
        assert_eq!(topsis.best_alternative().unwrap().index(), 2);
    }

    #[test]
    fn shortlist() {
        let mut topsis = engine(&[2.0, 5.0, 1.0, 4.0]);
        topsis.process().unwrap();
        let shortlist: ArrayVec<_, 2> = topsis.shortlist().unwrap();
        let indices: Vec<usize> = shortlist.iter().map(|a| a.index()).collect();
        assert_eq!(indices, vec![1, 3]);
        let everything: ArrayVec<_, 8> = topsis.shortlist().unwrap();
        assert_eq!(everything.len(), 4);
    }

    #[test]
    fn single_alternative_is_degenerate() {
        let mut topsis = engine(&[3.0]);
        topsis.process().unwrap();
        let best = topsis.best_alternative().unwrap();
        assert_eq!(best.profit_distance(), 0.0);
        assert_eq!(best.loss_distance(), 0.0);
        assert_eq!(best.closeness(), None);
    }
}
