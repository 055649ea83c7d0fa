use crate::backend::Backend;
use crate::dtype::DType;
use crate::tensor::{Dim1, Dim2, ITensor};
use log::info;
use std::fmt::{Display, Formatter};

pub trait Scorer<B: Backend> {
    fn process_batch(&mut self, backend: &B, output: &B::Tensor<Dim2>, label: &B::Tensor<Dim1>);
}

pub struct NoOpScorer;

impl<B: Backend> Scorer<B> for NoOpScorer {
    #[inline]
    fn process_batch(&mut self, _backend: &B, _output: &B::Tensor<Dim2>, _label: &B::Tensor<Dim1>) {}
}

/// Accumulates match/non-match predictions of a pair scorer.
///
/// A pair is predicted to match when its score is greater than the threshold.
pub struct PairScorer<B: Backend> {
    counts: [usize; 4],
    threshold: B::DType,
    count: usize,
}

impl<B: Backend> PairScorer<B> {
    pub fn new() -> Self {
        Self::with_threshold(B::DType::ZERO)
    }

    pub fn with_threshold(threshold: B::DType) -> Self {
        PairScorer {
            counts: [0; 4],
            threshold,
            count: 0,
        }
    }

    pub fn reset(&mut self) {
        self.counts = [0; 4];
        self.count = 0;
    }

    pub fn report(&self) -> PairReport {
        let [true_negatives, false_positives, false_negatives, true_positives] = self.counts;
        let report = PairReport {
            count: self.count,
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
        };
        info!("{report}");
        report
    }
}

impl<B: Backend> Default for PairScorer<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Scorer<B> for PairScorer<B> {
    fn process_batch(&mut self, backend: &B, output: &B::Tensor<Dim2>, label: &B::Tensor<Dim1>) {
        self.count += output.len();
        let counts = backend.pair_confusion(output, label, self.threshold);
        for (total, c) in self.counts.iter_mut().zip(counts) {
            *total += c;
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PairReport {
    pub count: usize,
    pub true_positives: usize,
    pub false_positives: usize,
    pub true_negatives: usize,
    pub false_negatives: usize,
}

impl PairReport {
    pub fn correct(&self) -> usize {
        self.true_positives + self.true_negatives
    }

    pub fn accuracy(&self) -> f64 {
        ratio(self.correct(), self.count)
    }

    pub fn error_rate(&self) -> f64 {
        ratio(self.count - self.correct(), self.count)
    }

    /// Fraction of non-matching pairs predicted to match.
    pub fn false_positive_rate(&self) -> f64 {
        ratio(self.false_positives, self.false_positives + self.true_negatives)
    }

    /// Fraction of matching pairs predicted to match.
    pub fn recall(&self) -> f64 {
        ratio(self.true_positives, self.true_positives + self.false_negatives)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

impl Display for PairReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let Self {
            count,
            true_positives,
            false_positives,
            true_negatives,
            false_negatives,
        } = self;
        writeln!(f, "Confusion Matrix: [[{true_negatives}, {false_positives}], [{false_negatives}, {true_positives}]]")?;
        write!(
            f,
            "Error rate: {:.2}% ({}/{count}), FPR: {:.2}%, recall: {:.2}%",
            self.error_rate() * 100.0,
            count - self.correct(),
            self.false_positive_rate() * 100.0,
            self.recall() * 100.0,
        )
    }
}
