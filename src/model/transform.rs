use crate::error::ConfigError;

/// Per-label remapping applied to raw probabilities before weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreTransform {
    Identity,
    /// Symmetric power-law curve around 0.5 with shape `k`.
    Gain { k: f64 },
}

impl ScoreTransform {
    pub fn from_gain_k(gain_k: Option<f64>) -> Result<Self, ConfigError> {
        match gain_k {
            None => Ok(Self::Identity),
            Some(k) if k.is_finite() && k > 0.0 => Ok(Self::Gain { k }),
            Some(k) => Err(ConfigError::InvalidGain(k)),
        }
    }

    /// Maps a raw score into [0, 1]. Non-finite input stays NaN.
    #[inline]
    pub fn apply(&self, x: f64) -> f64 {
        if !x.is_finite() {
            return f64::NAN;
        }
        let x = clip01(x);
        match *self {
            Self::Identity => x,
            Self::Gain { k } => gain(x, k),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Identity => "identity".to_string(),
            Self::Gain { k } => format!("gain(k={k})"),
        }
    }
}

/// gain(0)=0, gain(0.5)=0.5, gain(1)=1; k=1 is the identity.
#[inline]
pub fn gain(x: f64, k: f64) -> f64 {
    let a = 0.5 * (2.0 * x.min(1.0 - x)).powf(k);
    if x < 0.5 { a } else { 1.0 - a }
}

#[inline]
pub fn clip01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/transform.rs"]
mod tests;
