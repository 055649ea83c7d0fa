use deepcompare::dtype::DType;
use deepcompare::tensor::{Dim1, Dim2, ITensor, Tensor1, Tensor2};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

/// Batches of pair features with `+1`/`-1` labels.
pub struct PairData<D: DType> {
    pub train: Vec<(Tensor2<D>, Tensor1<D>)>,
    pub test: Vec<(Tensor2<D>, Tensor1<D>)>,
}

impl<D: DType> PairData<D> {
    pub fn num_features(&self) -> usize {
        self.train.first().map_or(0, |(x, _)| x.dims().cols())
    }
}

/// Generates synthetic patch pairs.
///
/// A matching pair is a patch and a noisy copy of it, a non-matching pair two
/// independent patches. Each pair is described by `2 * patch_size` features:
/// the element-wise product followed by the element-wise absolute difference.
pub fn generate_pair_data<D: DType, R: Rng>(
    rng: &mut R,
    train_samples: usize,
    test_samples: usize,
    batch_size: usize,
    patch_size: usize,
    noise: f64,
) -> PairData<D> {
    let (trn_feat, trn_lbl) = generate_pairs(rng, train_samples, patch_size, noise);
    let (tst_feat, tst_lbl) = generate_pairs(rng, test_samples, patch_size, noise);
    PairData {
        train: get_batches(&trn_feat, &trn_lbl, 2 * patch_size, batch_size),
        test: get_batches(&tst_feat, &tst_lbl, 2 * patch_size, batch_size),
    }
}

fn generate_pairs<R: Rng>(rng: &mut R, samples: usize, patch_size: usize, noise: f64) -> (Vec<f64>, Vec<f64>) {
    let mut features = Vec::with_capacity(samples * 2 * patch_size);
    let mut labels = Vec::with_capacity(samples);
    let sample = |rng: &mut R| -> f64 { StandardNormal.sample(rng) };
    for _ in 0..samples {
        let is_match = rng.gen_bool(0.5);
        let a: Vec<f64> = (0..patch_size).map(|_| sample(rng)).collect();
        let b: Vec<f64> = if is_match {
            a.iter().map(|&v| v + noise * sample(rng)).collect()
        } else {
            (0..patch_size).map(|_| sample(rng)).collect()
        };
        features.extend(a.iter().zip(&b).map(|(&u, &v)| u * v));
        features.extend(a.iter().zip(&b).map(|(&u, &v)| (u - v).abs()));
        labels.push(if is_match { 1.0 } else { -1.0 });
    }
    (features, labels)
}

fn get_batches<D: DType>(
    features: &[f64],
    labels: &[f64],
    sample_size: usize,
    batch_size: usize,
) -> Vec<(Tensor2<D>, Tensor1<D>)> {
    assert_eq!(features.len(), labels.len() * sample_size);
    features
        .chunks(sample_size * batch_size)
        .zip(labels.chunks(batch_size))
        .map(|(f_chunk, l_chunk)| {
            let num_samples = l_chunk.len();
            let f: Vec<D> = f_chunk.iter().map(|&x| D::from_f64(x)).collect();
            let l: Vec<D> = l_chunk.iter().map(|&x| D::from_f64(x)).collect();
            (
                Tensor2::from_vec(f, Dim2(num_samples, sample_size)),
                Tensor1::from_vec(l, Dim1(num_samples)),
            )
        })
        .collect()
}
