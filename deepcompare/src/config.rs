use crate::backend::CpuBackend;
use crate::dtype::DType;
use crate::error::{Error, Result};
use crate::reduction::Reduction;
use crate::scoring::PairScorer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serde")]
use std::path::Path;

/// Settings of a training loop built around [`crate::loss::PairwiseHingeLoss`].
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct LossConfig {
    pub reduction: Reduction,
    pub max_batch_size: usize,
    /// Scores above this value are predicted to be matching pairs.
    pub match_threshold: f64,
}

impl Default for LossConfig {
    fn default() -> Self {
        LossConfig {
            reduction: Reduction::Mean,
            max_batch_size: 64,
            match_threshold: 0.0,
        }
    }
}

impl LossConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_batch_size == 0 {
            return Err(Error::Config("max_batch_size must be greater than 0".to_string()));
        }
        if !self.match_threshold.is_finite() {
            return Err(Error::Config(format!(
                "match_threshold must be finite, got {}",
                self.match_threshold
            )));
        }
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LossConfig = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    #[cfg(feature = "serde")]
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        log::debug!("loading loss config from {}", path.display());
        Self::from_json_str(&json)
    }

    #[cfg(feature = "serde")]
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn backend<DT: DType>(&self) -> CpuBackend<DT> {
        CpuBackend::new(self.max_batch_size)
    }

    pub fn scorer<DT: DType>(&self) -> PairScorer<CpuBackend<DT>> {
        PairScorer::with_threshold(DT::from_f64(self.match_threshold))
    }
}
