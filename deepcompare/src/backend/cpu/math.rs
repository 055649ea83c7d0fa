use crate::dtype::DType;
use std::iter::zip;

#[inline]
fn is_match<T: DType>(label: T) -> bool {
    label > T::ZERO
}

/// Writes `1 - label * x` for every score `x` of one sample.
pub fn hinge_margin_row<T: DType>(label: T, data: &[T], output: &mut [T]) {
    debug_assert_eq!(data.len(), output.len());
    for (o, &x) in zip(output, data) {
        *o = T::ONE - label * x;
    }
}

/// Writes the margin subgradient of one sample given its forward output.
pub fn hinge_error_row<T: DType>(label: T, output: &[T], error: &mut [T]) {
    debug_assert_eq!(output.len(), error.len());
    let slope = if is_match(label) { T::ZERO - T::ONE } else { T::ONE };
    for (e, &y) in zip(error, output) {
        // a margin of exactly zero keeps the slope
        *e = if y < T::ZERO { T::ZERO } else { slope };
    }
}

/// Returns the (expected, predicted) confusion cell of a scored pair.
#[inline]
pub fn pair_confusion_cell<T: DType>(label: T, score: T, threshold: T) -> (usize, usize) {
    (is_match(label) as usize, (score > threshold) as usize)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_margin_row() {
        let mut out = [0.0f32; 3];
        hinge_margin_row(1.0, &[2.0, -1.0, 0.0], &mut out);
        assert_eq!(out, [-1.0, 2.0, 1.0]);
        hinge_margin_row(-1.0, &[0.5, -2.0, 0.0], &mut out);
        assert_eq!(out, [1.5, -1.0, 1.0]);
    }

    #[test]
    fn test_error_row() {
        let mut err = [9.0f64; 4];
        hinge_error_row(1.0, &[2.0, 0.0, -0.5, 1e-12], &mut err);
        assert_eq!(err, [-1.0, -1.0, 0.0, -1.0]);
        hinge_error_row(-1.0, &[2.0, 0.0, -0.5, 1e-12], &mut err);
        assert_eq!(err, [1.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_error_row_zero_label_is_non_match() {
        let mut err = [0.0f32; 2];
        hinge_error_row(0.0, &[1.0, -1.0], &mut err);
        assert_eq!(err, [1.0, 0.0]);
    }

    #[test]
    fn test_confusion_cell() {
        assert_eq!(pair_confusion_cell(1.0f32, 0.3, 0.0), (1, 1));
        assert_eq!(pair_confusion_cell(1.0f32, 0.0, 0.0), (1, 0));
        assert_eq!(pair_confusion_cell(-1.0f32, 0.3, 0.0), (0, 1));
        assert_eq!(pair_confusion_cell(-1.0f32, -2.0, 0.0), (0, 0));
    }
}
