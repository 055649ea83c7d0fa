use deepcompare::Result;
use deepcompare::backend::{CpuBackend, TensorOps};
use deepcompare::config::LossConfig;
use deepcompare::loss::PairwiseHingeLoss;
use deepcompare::op::Operator;
use deepcompare::scoring::Scorer;
use deepcompare::tensor::{Dim2, ITensor, Tensor2, TensorBase};
use deepcompare_examples::util::{PairData, generate_pair_data};
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::iter::zip;
use std::time::Instant;

const MAX_BATCH_SIZE: usize = 64;
const PATCH_SIZE: usize = 16;
const LEARNING_RATE: f32 = 0.05;

/// Scores a pair as a weighted sum of its features.
struct LinearScorer {
    weights: Vec<f32>,
    bias: f32,
}

impl LinearScorer {
    fn new(num_features: usize) -> Self {
        LinearScorer {
            weights: vec![0.0; num_features],
            bias: 0.0,
        }
    }

    fn score(&self, features: &Tensor2<f32>, scores: &mut Tensor2<f32>) {
        for (row, s) in zip(features.iter_major_axis(), scores.as_mut()) {
            let dot: f32 = zip(row.as_ref(), &self.weights).map(|(&f, &w)| f * w).sum();
            *s = dot + self.bias;
        }
    }

    fn step(&mut self, features: &Tensor2<f32>, data_grad: &Tensor2<f32>, rate: f32) {
        for (row, &g) in zip(features.iter_major_axis(), data_grad.as_ref()) {
            if g == 0.0 {
                continue;
            }
            for (w, &f) in zip(&mut self.weights, row.as_ref()) {
                *w -= rate * g * f;
            }
            self.bias -= rate * g;
        }
    }
}

pub fn main() -> Result<()> {
    env_logger::init();

    let config = LossConfig {
        max_batch_size: MAX_BATCH_SIZE,
        ..Default::default()
    };
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(0xdc0de);
    let PairData { mut train, test } =
        generate_pair_data::<f32, _>(&mut rng, 20_000, 2_000, MAX_BATCH_SIZE, PATCH_SIZE, 0.5);

    let backend: CpuBackend<f32> = config.backend();
    let mut op = PairwiseHingeLoss::new();
    let shapes = op.infer_shape(&[vec![MAX_BATCH_SIZE, 1]])?;
    info!("{}: arguments {:?}, outputs {:?}", op.name(), shapes.arguments, shapes.outputs);

    let mut model = LinearScorer::new(2 * PATCH_SIZE);
    let mut scores = backend.new_tensor_batch_sized(Dim2(MAX_BATCH_SIZE, 1));
    let (mut outputs, mut data_grad) = op.new_buffers(&backend, Dim2(MAX_BATCH_SIZE, 1));

    let max_epochs = 20;
    let start = Instant::now();
    for epoch in 0..max_epochs {
        train.shuffle(&mut rng);
        let mut total = 0.0;
        for (features, label) in &train {
            let n = label.len();
            backend.resize_tensor_major(&mut scores, n);
            backend.resize_tensor_major(&mut outputs, n);
            backend.resize_tensor_major(&mut data_grad, n);

            model.score(features, &mut scores);
            op.forward(&backend, &scores, label, &mut outputs)?;
            if let Some(margin) = config.reduction.apply(&backend, &outputs) {
                total += margin;
            }
            op.backward(&backend, &scores, label, &outputs, &mut data_grad)?;
            let scale = config.reduction.grad_scale::<f32>(n);
            model.step(features, &data_grad, LEARNING_RATE * scale);
        }
        debug!("epoch {epoch}: {} margin {}", config.reduction, total / train.len() as f32);
    }
    let elapsed = start.elapsed();
    println!(
        "Training time for {max_epochs} epochs and batch size {MAX_BATCH_SIZE}: {} sec",
        elapsed.as_secs_f32()
    );

    let mut scorer = config.scorer::<f32>();
    for (features, label) in &test {
        backend.resize_tensor_major(&mut scores, label.len());
        model.score(features, &mut scores);
        scorer.process_batch(&backend, &scores, label);
    }
    println!("{}", scorer.report());
    Ok(())
}
