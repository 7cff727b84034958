use crate::state::SourceState;

/// Population std-dev of a one-hot distribution over three channels.
const MAX_STD_DEV: f32 = 0.471;
/// Imbalance at or below this leaves sigma untouched.
const COMPENSATION_THRESHOLD: f32 = 0.20;
const MIN_COMPENSATED_SIGMA: f32 = 0.35;
const MAX_COMPENSATED_SIGMA: f32 = 0.48;

/// Outcome of [`adaptive_sigma`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AdaptiveSigma {
    /// Sigma to render with.
    pub sigma: f32,
    /// Imbalance score in `[0, 1]`.
    pub imbalance: f32,
    /// True when `sigma` was raised above the base value.
    pub compensating: bool,
}

/// How unevenly strength is spread across the three sources, in `[0, 1]`.
///
/// 0 for equal channels (or an all-zero state), ~1 for a single lit channel.
pub fn imbalance_score(state: &SourceState) -> f32 {
    let s = state.clamped();
    let total = s.r + s.g + s.b;
    if total <= 0.0 {
        return 0.0;
    }

    let shares = [s.r / total, s.g / total, s.b / total];
    let mean = shares.iter().sum::<f32>() / 3.0;
    let variance = shares.iter().map(|v| (v - mean).powi(2)).sum::<f32>() / 3.0;

    (variance.sqrt() / MAX_STD_DEV).clamp(0.0, 1.0)
}

/// Widens `base_sigma` for imbalanced states so the field stays legible.
///
/// Above the threshold the required sigma rises linearly from 0.35 to 0.48;
/// the base is kept if it is already wider.
pub fn adaptive_sigma(base_sigma: f32, state: &SourceState) -> AdaptiveSigma {
    let imbalance = imbalance_score(state);

    if imbalance <= COMPENSATION_THRESHOLD {
        return AdaptiveSigma { sigma: base_sigma, imbalance, compensating: false };
    }

    let factor = (imbalance - COMPENSATION_THRESHOLD) / (1.0 - COMPENSATION_THRESHOLD);
    let required = MIN_COMPENSATED_SIGMA + (MAX_COMPENSATED_SIGMA - MIN_COMPENSATED_SIGMA) * factor;

    if base_sigma >= required {
        AdaptiveSigma { sigma: base_sigma, imbalance, compensating: false }
    } else {
        AdaptiveSigma { sigma: required, imbalance, compensating: true }
    }
}
