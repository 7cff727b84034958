use crate::paint::Channel;
use crate::state::{CalibrationPoint, SourceState};

/// Calibration channels below this are treated as absent.
const MIN_DIVISOR: f32 = 0.01;

/// Rescales `state` so that `calibration` maps to equal channel weights.
///
/// The state is clamped to `[0, 1]` first. Each channel is multiplied by
/// `max_cal / cal[c]`; when the state equals the calibration every channel
/// comes out as `max_cal`, which renders neutral at the centroid.
pub fn normalize_state(state: &SourceState, calibration: &CalibrationPoint) -> [f32; 3] {
    let state = state.clamped();
    let max_cal = calibration.max_channel();

    Channel::ALL.map(|ch| {
        let cal = calibration.get(ch);
        if cal < MIN_DIVISOR {
            state.get(ch) * max_cal
        } else {
            state.get(ch) * (max_cal / cal)
        }
    })
}
