use crate::dtype::DType;
use crate::tensor::{Dim1, Dim2, Tensor1, Tensor2};
use rand::prelude::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

pub const SIZE_LG: usize = 65536;
pub const SIZE_MD: usize = 4096;
pub const SIZE_SM: usize = 128;
const SEED: u64 = 0x8371943;

/// Draws a batch of normally distributed pair scores with random `±1` labels.
pub fn get_pair_batch<T>(size: usize, seed: u64) -> (Tensor2<T>, Tensor1<T>)
where
    T: DType,
    StandardNormal: Distribution<T>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let data = Tensor2::from_distribution(&mut rng, StandardNormal, Dim2(size, 1));
    let labels: Vec<T> = (0..size)
        .map(|_| if rng.gen_bool(0.5) { T::ONE } else { T::ZERO - T::ONE })
        .collect();
    (data, Tensor1::from_vec(labels, Dim1(size)))
}

pub fn get_bench_batch<T>(size: usize) -> (Tensor2<T>, Tensor1<T>)
where
    T: DType,
    StandardNormal: Distribution<T>,
{
    get_pair_batch(size, SEED)
}
