use crate::Error;

/// Storage for the raw decision matrix, filled one value at a time by the alternatives.
pub trait Accumulate {
    /// Discard any previous contents and size the matrix for the given shape.
    fn reset(&mut self, alternatives: usize, criteria: usize);
    fn record(&mut self, alternative: usize, criterion: usize, value: f64);
    fn value(&self, alternative: usize, criterion: usize) -> f64;
}

/// An accumulator that can normalize its columns in place. Weighting reads the compressed matrix,
/// so the ranking engine only accepts accumulators with this capability.
pub trait Compress: Accumulate {
    /// Fails with [`Error::EmptyAlternativeSet`] if no alternative has been accumulated.
    fn compress(&mut self) -> Result<(), Error>;
}

/// Column-oriented decision matrix using vector normalization: every value is divided by the
/// euclidean norm of its criterion column.
#[derive(Clone, Debug, Default)]
pub struct DecisionMatrix {
    columns: Vec<Vec<f64>>,
    alternatives: usize,
    compressed: bool,
}

impl DecisionMatrix {
    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn alternatives(&self) -> usize {
        self.alternatives
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }
}

impl Accumulate for DecisionMatrix {
    fn reset(&mut self, alternatives: usize, criteria: usize) {
        self.columns = vec![vec![0.0; alternatives]; criteria];
        self.alternatives = alternatives;
        self.compressed = false;
    }

    fn record(&mut self, alternative: usize, criterion: usize, value: f64) {
        debug_assert!(!self.compressed);
        if self.columns.len() <= criterion {
            let rows = self.alternatives;
            self.columns.resize_with(criterion + 1, || vec![0.0; rows]);
        }
        self.alternatives = self.alternatives.max(alternative + 1);
        let column = &mut self.columns[criterion];
        if column.len() <= alternative {
            column.resize(alternative + 1, 0.0);
        }
        column[alternative] = value;
    }

    fn value(&self, alternative: usize, criterion: usize) -> f64 {
        self.columns
            .get(criterion)
            .and_then(|column| column.get(alternative))
            .copied()
            .unwrap_or(0.0)
    }
}

impl Compress for DecisionMatrix {
    fn compress(&mut self) -> Result<(), Error> {
        if self.alternatives == 0 {
            tracing::warn!("cannot compress a decision matrix without alternatives");
            return Err(Error::EmptyAlternativeSet);
        }
        if self.compressed {
            tracing::warn!("decision matrix already compressed");
            return Ok(());
        }
        for column in &mut self.columns {
            // Scale by the largest magnitude first so squaring neither overflows nor underflows.
            let scale = column.iter().fold(0.0_f64, |max, x| max.max(x.abs()));
            // An all-zero column carries no information and stays zero.
            if scale == 0.0 {
                continue;
            }
            let norm = column
                .iter()
                .map(|x| (x / scale).powi(2))
                .sum::<f64>()
                .sqrt();
            for x in column.iter_mut() {
                *x = (*x / scale) / norm;
            }
        }
        self.compressed = true;
        Ok(())
    }
}
