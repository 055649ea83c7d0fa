use super::*;
use crate::tensor;
use crate::util::bench::get_pair_batch;
use std::iter::zip;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

macro_rules! impl_tests {
    ($mod_name: ident, $ty:ty) => {
        mod $mod_name {
            use super::*;

            fn column(values: &[$ty]) -> Tensor2<$ty> {
                Tensor2::from_column(values.to_vec())
            }

            #[test]
            fn test_forward_is_one_minus_label_times_score() {
                let data = column(&[2.0, -1.0, 0.5, 0.0, -3.25]);
                let label: Tensor1<$ty> = tensor![1.0, 1.0, -1.0, -1.0, -1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.dims(), &Dim2(5, 1));
                assert_eq!(outputs.as_ref(), &[-1.0, 2.0, 1.5, 1.0, -2.25]);
            }

            #[test]
            fn test_scenario_satisfied_match() {
                let data = column(&[2.0]);
                let label: Tensor1<$ty> = tensor![1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.as_ref(), &[-1.0]);
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.as_ref(), &[0.0]);
            }

            #[test]
            fn test_scenario_violated_match() {
                let data = column(&[-1.0]);
                let label: Tensor1<$ty> = tensor![1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.as_ref(), &[2.0]);
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.as_ref(), &[-1.0]);
            }

            #[test]
            fn test_scenario_violated_non_match() {
                let data = column(&[0.5]);
                let label: Tensor1<$ty> = tensor![-1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.as_ref(), &[1.5]);
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.as_ref(), &[1.0]);
            }

            #[test]
            fn test_zero_margin_keeps_slope() {
                // 1 - 1 * 1 == 0 and 1 - (-1) * (-1) == 0
                let data = column(&[1.0, -1.0]);
                let label: Tensor1<$ty> = tensor![1.0, -1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.as_ref(), &[0.0, 0.0]);
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.as_ref(), &[-1.0, 1.0]);
            }

            #[test]
            fn test_gradient_rule_on_random_batch() {
                let (data, label) = get_pair_batch::<$ty>(257, 0x5eed);
                let outputs = pairwise_hinge(&data, &label).unwrap();
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                for ((&y, &g), &l) in zip(zip(&outputs, &grad), &label) {
                    let expected = if y < 0.0 {
                        0.0
                    } else if l > 0.0 {
                        -1.0
                    } else {
                        1.0
                    };
                    assert_eq!(g, expected, "y={y} l={l}");
                }
            }

            #[test]
            fn test_forward_is_idempotent() {
                let (data, label) = get_pair_batch::<$ty>(64, 0xfeed);
                let first = pairwise_hinge(&data, &label).unwrap();
                let second = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(first, second);
            }

            #[test]
            fn test_label_broadcast_over_columns() {
                let data: Tensor2<$ty> = tensor![[2.0, -2.0, 0.0], [1.0, 4.0, -0.5]];
                let label: Tensor1<$ty> = tensor![-1.0, 1.0];
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert_eq!(outputs.as_ref(), &[3.0, -1.0, 1.0, 0.0, -3.0, 1.5]);
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.as_ref(), &[1.0, 0.0, 1.0, -1.0, 0.0, -1.0]);
            }

            #[test]
            fn test_batch_size_mismatch_fails() {
                let (data, _) = get_pair_batch::<$ty>(10, 1);
                let (_, label) = get_pair_batch::<$ty>(8, 2);
                let err = pairwise_hinge(&data, &label).unwrap_err();
                assert_eq!(
                    err,
                    Error::ShapeMismatch {
                        expected: vec![10],
                        actual: vec![8],
                        operation: "PairwiseHingeLoss forward",
                    }
                );
                let outputs = Tensor2::<$ty>::zeroed(Dim2(10, 1));
                assert!(matches!(
                    pairwise_hinge_grad(&data, &label, &outputs),
                    Err(Error::ShapeMismatch { .. })
                ));
            }

            #[test]
            fn test_empty_batch() {
                let data = Tensor2::<$ty>::zeroed(Dim2(0, 1));
                let label = Tensor1::<$ty>::zeroed(Dim1(0));
                let outputs = pairwise_hinge(&data, &label).unwrap();
                assert!(outputs.is_empty());
                let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
                assert_eq!(grad.dims(), &Dim2(0, 1));
            }
        }
    };
}

impl_tests!(tests_f32, f32);
impl_tests!(tests_f64, f64);

#[test]
fn test_naming_contract() {
    let op = PairwiseHingeLoss::new();
    assert_eq!(op.arguments(), &["data", "label"]);
    assert_eq!(op.outputs(), &["outputs"]);
    assert_eq!(op.argument_index("label"), Some(1));
    assert_eq!(op.output_index("outputs"), Some(0));
    assert_eq!(op.argument_index("loss_label"), None);
}

#[test]
fn test_infer_shape() {
    init_logger();
    let mut op = PairwiseHingeLoss::new();
    let shapes = op.infer_shape(&[vec![50, 1]]).unwrap();
    assert_eq!(shapes.arguments, vec![vec![50, 1], vec![50]]);
    assert_eq!(shapes.outputs, vec![vec![50, 1]]);

    let shapes = op.infer_shape(&[vec![8, 3], vec![8]]).unwrap();
    assert_eq!(shapes.arguments, vec![vec![8, 3], vec![8]]);
    assert_eq!(shapes.outputs, vec![vec![8, 3]]);

    // unknown label shape
    let shapes = op.infer_shape(&[vec![8, 3], vec![]]).unwrap();
    assert_eq!(shapes.arguments[1], vec![8]);
}

#[test]
fn test_infer_shape_is_repeatable() {
    init_logger();
    let mut op = PairwiseHingeLoss::new();
    let first = op.infer_shape(&[vec![16, 1]]).unwrap();
    let second = op.infer_shape(&[vec![16, 1], vec![16]]).unwrap();
    assert_eq!(first, second);
    let other = op.infer_shape(&[vec![4, 1]]).unwrap();
    assert_eq!(other.outputs, vec![vec![4, 1]]);
    let again = op.infer_shape(&[vec![16, 1]]).unwrap();
    assert_eq!(first, again);
}

#[test]
fn test_infer_shape_errors() {
    init_logger();
    let mut op = PairwiseHingeLoss::new();
    assert_eq!(
        op.infer_shape(&[]),
        Err(Error::MissingInput {
            name: "data",
            operation: "PairwiseHingeLoss infer_shape",
        })
    );
    assert!(matches!(
        op.infer_shape(&[vec![2, 64, 64]]),
        Err(Error::RankMismatch { expected: 2, actual: 3, .. })
    ));
    assert!(matches!(
        op.infer_shape(&[vec![10, 1], vec![10, 1]]),
        Err(Error::RankMismatch { expected: 1, actual: 2, .. })
    ));
    assert_eq!(
        op.infer_shape(&[vec![10, 1], vec![8]]),
        Err(Error::ShapeMismatch {
            expected: vec![10],
            actual: vec![8],
            operation: "PairwiseHingeLoss infer_shape",
        })
    );
}

#[test]
fn test_operator_writes_in_place() {
    init_logger();
    let backend = CpuBackend::<f32>::new(32);
    let op = PairwiseHingeLoss::new();
    let (data, label) = get_pair_batch::<f32>(32, 7);
    let (mut outputs, mut data_grad) = op.new_buffers(&backend, *data.dims());
    outputs.fill(f32::NAN);
    data_grad.fill(f32::NAN);

    op.forward(&backend, &data, &label, &mut outputs).unwrap();
    op.backward(&backend, &data, &label, &outputs, &mut data_grad).unwrap();

    assert_eq!(outputs, pairwise_hinge(&data, &label).unwrap());
    assert_eq!(data_grad, pairwise_hinge_grad(&data, &label, &outputs).unwrap());
}

#[test]
fn test_operator_rejects_mismatched_buffers() {
    init_logger();
    let backend = CpuBackend::<f32>::new(16);
    let op = PairwiseHingeLoss::new();
    let (data, label) = get_pair_batch::<f32>(16, 9);
    let mut outputs = backend.new_tensor_exact(Dim2(15, 1));
    outputs.fill(5.0);
    let err = op.forward(&backend, &data, &label, &mut outputs).unwrap_err();
    assert_eq!(
        err,
        Error::ShapeMismatch {
            expected: vec![16, 1],
            actual: vec![15, 1],
            operation: "PairwiseHingeLoss forward outputs",
        }
    );
    // nothing was written
    assert!(outputs.as_ref().iter().all(|&v| v == 5.0));

    let outputs = pairwise_hinge(&data, &label).unwrap();
    let mut data_grad = backend.new_tensor_exact(Dim2(16, 2));
    assert!(matches!(
        op.backward(&backend, &data, &label, &outputs, &mut data_grad),
        Err(Error::ShapeMismatch { operation: "PairwiseHingeLoss backward data_grad", .. })
    ));
}

#[test]
fn test_shape_mismatch_message() {
    let err = Error::shape_mismatch(vec![10], vec![8], "PairwiseHingeLoss forward");
    assert_eq!(
        err.to_string(),
        "Shape mismatch: expected [10], got [8] during operation PairwiseHingeLoss forward"
    );
}

#[cfg(feature = "approx")]
#[test]
fn test_margins_match_reference_within_epsilon() {
    use crate::tensor::TensorBase;
    use approx::assert_abs_diff_eq;
    let (data, label) = get_pair_batch::<f32>(100, 21);
    let reference: Vec<f32> = zip(&data, &label)
        .map(|(&x, &l)| (1.0 - l as f64 * x as f64) as f32)
        .collect();
    let reference = Tensor2::from_vec(reference, *data.dims());
    let outputs = pairwise_hinge(&data, &label).unwrap();
    assert_abs_diff_eq!(outputs, reference, epsilon = 1e-6);
    assert_abs_diff_eq!(outputs.view(), reference, epsilon = 1e-6);
}

#[cfg(feature = "half")]
#[test]
fn test_half_scenarios() {
    use half::f16;
    let h = |v: &[f32]| -> Vec<f16> { v.iter().map(|&x| f16::from_f32(x)).collect() };
    let data = Tensor2::from_column(h(&[2.0, -1.0, 0.5, 1.0]));
    let label = Tensor1::from_vec_1d(h(&[1.0, 1.0, -1.0, 1.0]));
    let outputs = pairwise_hinge(&data, &label).unwrap();
    assert_eq!(outputs.as_ref(), h(&[-1.0, 2.0, 1.5, 0.0]).as_slice());
    let grad = pairwise_hinge_grad(&data, &label, &outputs).unwrap();
    assert_eq!(grad.as_ref(), h(&[0.0, -1.0, 1.0, -1.0]).as_slice());
}
