/// The per-criterion extremal weighted values an alternative is measured against. The profit
/// instance holds the most favorable value of every criterion, the loss instance the least.
#[derive(Clone, Debug, PartialEq)]
pub struct IdealSolution(Vec<f64>);

impl IdealSolution {
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, criterion: usize) -> f64 {
        self.0[criterion]
    }

    pub fn set(&mut self, criterion: usize, value: f64) {
        self.0[criterion] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Euclidean distance between `values` and this ideal solution.
    pub fn distance(&self, values: &[f64]) -> f64 {
        debug_assert_eq!(values.len(), self.0.len());
        values
            .iter()
            .zip(&self.0)
            .fold(0.0_f64, |distance, (x, ideal)| distance.hypot(x - ideal))
    }
}
