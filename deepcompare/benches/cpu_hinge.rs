#[macro_use]
extern crate bencher;

use bencher::Bencher;
use deepcompare::backend::{CpuBackend, TensorOps};
use deepcompare::loss::PairwiseHingeLoss;
use deepcompare::tensor::ITensor;
use deepcompare::util::bench::*;

macro_rules! impl_bench_forward {
    ($name:ident, $ty:ty, $size:expr) => {
        fn $name(bench: &mut Bencher) {
            let backend = CpuBackend::<$ty>::new($size);
            let op = PairwiseHingeLoss::new();
            let (data, label) = get_bench_batch::<$ty>($size);
            let mut outputs = backend.new_tensor_exact(*data.dims());
            bench.iter(|| op.forward(&backend, &data, &label, &mut outputs))
        }
    };
}

macro_rules! impl_bench_backward {
    ($name:ident, $ty:ty, $size:expr) => {
        fn $name(bench: &mut Bencher) {
            let backend = CpuBackend::<$ty>::new($size);
            let op = PairwiseHingeLoss::new();
            let (data, label) = get_bench_batch::<$ty>($size);
            let (mut outputs, mut data_grad) = op.new_buffers(&backend, *data.dims());
            op.forward(&backend, &data, &label, &mut outputs).unwrap();
            bench.iter(|| op.backward(&backend, &data, &label, &outputs, &mut data_grad))
        }
    };
}

impl_bench_forward!(cpu_f32_forward_lg, f32, SIZE_LG);
impl_bench_forward!(cpu_f32_forward_md, f32, SIZE_MD);
impl_bench_forward!(cpu_f32_forward_sm, f32, SIZE_SM);
impl_bench_backward!(cpu_f32_backward_lg, f32, SIZE_LG);
impl_bench_backward!(cpu_f32_backward_md, f32, SIZE_MD);
impl_bench_backward!(cpu_f32_backward_sm, f32, SIZE_SM);
benchmark_group!(
    cpu_f32,
    cpu_f32_forward_lg,
    cpu_f32_forward_md,
    cpu_f32_forward_sm,
    cpu_f32_backward_lg,
    cpu_f32_backward_md,
    cpu_f32_backward_sm
);

impl_bench_forward!(cpu_f64_forward_lg, f64, SIZE_LG);
impl_bench_forward!(cpu_f64_forward_md, f64, SIZE_MD);
impl_bench_forward!(cpu_f64_forward_sm, f64, SIZE_SM);
impl_bench_backward!(cpu_f64_backward_lg, f64, SIZE_LG);
impl_bench_backward!(cpu_f64_backward_md, f64, SIZE_MD);
impl_bench_backward!(cpu_f64_backward_sm, f64, SIZE_SM);
benchmark_group!(
    cpu_f64,
    cpu_f64_forward_lg,
    cpu_f64_forward_md,
    cpu_f64_forward_sm,
    cpu_f64_backward_lg,
    cpu_f64_backward_md,
    cpu_f64_backward_sm
);

benchmark_main!(cpu_f32, cpu_f64);
