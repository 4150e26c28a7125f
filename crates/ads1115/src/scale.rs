use crate::config::GainRange;

/// Convert a raw conversion result to volts for the given gain range.
///
/// `gain` must be the range the sample was converted with. Nothing here can
/// detect a mismatch, a stale gain silently produces a wrong voltage.
pub fn scale(raw: i16, gain: GainRange) -> f32 {
    raw as f32 * gain.lsb_volts()
}
