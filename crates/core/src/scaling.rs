//! Zero-mean / unit-variance feature scaling.

use crate::error::CoreError;
use crate::types::FeatureVector;

/// Per-feature mean and scale fitted over a full dataset.
///
/// Uses the population variance. A feature with zero variance keeps a scale
/// of `1.0`, so it is centred but not stretched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StandardScaler {
    pub mean: FeatureVector,
    pub scale: FeatureVector,
}

impl StandardScaler {
    pub fn fit(samples: &[FeatureVector]) -> Result<Self, CoreError> {
        if samples.is_empty() {
            return Err(CoreError::Validation(
                "cannot fit a scaler on an empty sample set".to_string(),
            ));
        }

        let n = samples.len() as f64;
        let mut mean = [0.0; 2];
        let mut scale = [1.0; 2];

        for j in 0..mean.len() {
            mean[j] = samples.iter().map(|s| s[j]).sum::<f64>() / n;
            let var = samples.iter().map(|s| (s[j] - mean[j]).powi(2)).sum::<f64>() / n;
            let std = var.sqrt();
            if std > f64::EPSILON {
                scale[j] = std;
            }
        }

        Ok(Self { mean, scale })
    }

    pub fn transform(&self, samples: &[FeatureVector]) -> Vec<FeatureVector> {
        samples
            .iter()
            .map(|s| {
                [
                    (s[0] - self.mean[0]) / self.scale[0],
                    (s[1] - self.mean[1]) / self.scale[1],
                ]
            })
            .collect()
    }

    pub fn fit_transform(samples: &[FeatureVector]) -> Result<Vec<FeatureVector>, CoreError> {
        Ok(Self::fit(samples)?.transform(samples))
    }
}
