//! Playback speed multipliers

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// The fixed set of supported playback speeds.
///
/// Anything outside this set cannot be represented, so the controller never
/// has to validate a speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    Half,
    #[default]
    Normal,
    OneAndHalf,
    Double,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeedError {
    #[error("unsupported playback speed {0} (expected 0.5, 1, 1.5 or 2)")]
    Unsupported(f64),

    #[error("invalid playback speed `{0}`")]
    Invalid(String),
}

impl Speed {
    /// All speeds, slowest first
    pub const ALL: [Speed; 4] = [Speed::Half, Speed::Normal, Speed::OneAndHalf, Speed::Double];

    /// Multiplier as `numerator / denominator`
    fn ratio(self) -> (u32, u32) {
        match self {
            Speed::Half => (1, 2),
            Speed::Normal => (1, 1),
            Speed::OneAndHalf => (3, 2),
            Speed::Double => (2, 1),
        }
    }

    pub fn multiplier(self) -> f64 {
        let (num, den) = self.ratio();
        f64::from(num) / f64::from(den)
    }

    /// Wall-clock wait for a step of nominal length `duration` at this speed.
    ///
    /// Computed with integer arithmetic so `3000ms` at `2x` is exactly `1500ms`.
    pub fn scale(self, duration: Duration) -> Duration {
        let (num, den) = self.ratio();
        duration * den / num
    }

    /// Next faster speed, saturating at the fastest
    pub fn faster(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(1);
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Next slower speed, saturating at the slowest
    pub fn slower(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(1);
        Self::ALL[idx.saturating_sub(1)]
    }
}

impl TryFrom<f64> for Speed {
    type Error = SpeedError;

    fn try_from(multiplier: f64) -> Result<Self, Self::Error> {
        Speed::ALL
            .into_iter()
            .find(|s| (s.multiplier() - multiplier).abs() < 1e-9)
            .ok_or(SpeedError::Unsupported(multiplier))
    }
}

impl FromStr for Speed {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed
            .strip_suffix('x')
            .or_else(|| trimmed.strip_suffix('X'))
            .unwrap_or(trimmed);
        let multiplier: f64 = number
            .parse()
            .map_err(|_| SpeedError::Invalid(s.to_string()))?;
        Speed::try_from(multiplier)
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speed::Half => write!(f, "0.5x"),
            Speed::Normal => write!(f, "1x"),
            Speed::OneAndHalf => write!(f, "1.5x"),
            Speed::Double => write!(f, "2x"),
        }
    }
}
