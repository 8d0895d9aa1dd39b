use std::cmp::Ordering;

use crate::{Accumulate, IdealSolution, Normalized, Value, WeightVector};

/// One candidate under evaluation. Raw values are supplied by the caller; every other field is
/// derived by the ranking engine, in pipeline order.
#[derive(Clone, Debug)]
pub struct Alternative<V = f64> {
    name: String,
    index: usize,
    raw: Vec<V>,
    normalized: Vec<f64>,
    weighted: Vec<f64>,
    profit_distance: f64,
    loss_distance: f64,
    closeness: Option<Normalized>,
}

impl<V: Value> Alternative<V> {
    pub fn new(raw: Vec<V>) -> Self {
        Self {
            name: String::new(),
            index: 0,
            raw,
            normalized: Vec::new(),
            weighted: Vec::new(),
            profit_distance: 0.0,
            loss_distance: 0.0,
            closeness: None,
        }
    }

    pub fn named(name: impl Into<String>, raw: Vec<V>) -> Self {
        Self {
            name: name.into(),
            ..Self::new(raw)
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of this alternative in registration order.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &[V] {
        &self.raw
    }

    pub fn normalized(&self) -> &[f64] {
        &self.normalized
    }

    pub fn weighted(&self) -> &[f64] {
        &self.weighted
    }

    pub fn profit_distance(&self) -> f64 {
        self.profit_distance
    }

    pub fn loss_distance(&self) -> f64 {
        self.loss_distance
    }

    /// Relative closeness to the ideal solution, where higher is better. `None` before ranking, or
    /// when the alternative coincides with both ideal solutions so the coefficient is 0/0.
    pub fn closeness(&self) -> Option<Normalized> {
        self.closeness
    }

    pub fn criteria(&self) -> usize {
        self.raw.len()
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Index of the first criterion whose raw value is NaN or infinite.
    pub(crate) fn non_finite_criterion(&self) -> Option<usize> {
        self.raw.iter().position(|value| !value.get().is_finite())
    }

    pub(crate) fn clear_derived(&mut self) {
        self.normalized.clear();
        self.weighted.clear();
        self.profit_distance = 0.0;
        self.loss_distance = 0.0;
        self.closeness = None;
    }

    pub(crate) fn collect_data<A: Accumulate>(&self, accumulator: &mut A) {
        for (criterion, value) in self.raw.iter().enumerate() {
            accumulator.record(self.index, criterion, value.get());
        }
    }

    pub(crate) fn calculate_decision_matrix<A: Accumulate>(&mut self, accumulator: &A) {
        self.normalized = (0..self.raw.len())
            .map(|criterion| accumulator.value(self.index, criterion))
            .collect();
    }

    pub(crate) fn calculate_weighted_decision_matrix(&mut self, weights: &WeightVector) {
        self.weighted = self
            .normalized
            .iter()
            .enumerate()
            .map(|(criterion, x)| x * weights.weight(criterion).as_f64())
            .collect();
    }

    pub(crate) fn adapt_weighted_decision_matrix(&self) -> Option<IdealSolution> {
        if self.weighted.is_empty() && !self.raw.is_empty() {
            return None;
        }
        Some(IdealSolution::new(self.weighted.clone()))
    }

    pub(crate) fn update_profit(&self, profit: &mut IdealSolution, weights: &WeightVector) {
        for (criterion, &x) in self.weighted.iter().enumerate() {
            if weights.impact(criterion).improves(x, profit.get(criterion)) {
                profit.set(criterion, x);
            }
        }
    }

    pub(crate) fn update_loss(&self, loss: &mut IdealSolution, weights: &WeightVector) {
        for (criterion, &x) in self.weighted.iter().enumerate() {
            if weights.impact(criterion).worsens(x, loss.get(criterion)) {
                loss.set(criterion, x);
            }
        }
    }

    pub(crate) fn calculate_profit_distance(&mut self, profit: &IdealSolution) {
        self.profit_distance = profit.distance(&self.weighted);
    }

    pub(crate) fn calculate_loss_distance(&mut self, loss: &IdealSolution) {
        self.loss_distance = loss.distance(&self.weighted);
    }

    pub(crate) fn calculate_preference(&mut self) {
        let total = self.profit_distance + self.loss_distance;
        self.closeness = Normalized::new(self.loss_distance / total);
        if self.closeness.is_none() {
            tracing::debug!(
                index = self.index,
                "alternative matches both ideal solutions, closeness undefined"
            );
        }
    }

    /// Total order by closeness, ascending. Alternatives without a coefficient order before all
    /// others.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.closeness.cmp(&other.closeness)
    }
}
