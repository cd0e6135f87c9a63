use crate::error::ConfigError;

/// Per-label weights, positionally aligned with the label columns of the
/// score table.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelWeights {
    values: Vec<f64>,
    total: f64,
}

impl LabelWeights {
    pub fn new(values: Vec<f64>) -> Result<Self, ConfigError> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteWeight { index, value });
            }
        }
        let total: f64 = values.iter().sum();
        if !(total > 0.0) {
            return Err(ConfigError::NonPositiveTotalWeight(total));
        }
        Ok(Self { values, total })
    }

    pub fn uniform(n_labels: usize) -> Result<Self, ConfigError> {
        Self::new(vec![1.0; n_labels])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn check_columns(&self, n_columns: usize) -> Result<(), ConfigError> {
        if self.values.len() != n_columns {
            return Err(ConfigError::WeightCountMismatch {
                weights: self.values.len(),
                columns: n_columns,
            });
        }
        Ok(())
    }
}
