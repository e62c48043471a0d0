use super::ControlPoint;

/// Timing-related info about this control point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TimingPoint {
    pub time: f64,
    pub beat_len: f64,
    pub meter: i32,
}

impl TimingPoint {
    pub const DEFAULT_BEAT_LEN: f64 = 1000.0;
    pub const DEFAULT_METER: i32 = 4;

    pub const DEFAULT_BPM: f64 = 60_000.0 / Self::DEFAULT_BEAT_LEN;

    pub fn new(time: f64, beat_len: f64, meter: i32) -> Self {
        Self {
            time,
            beat_len: beat_len.clamp(6.0, 60_000.0),
            meter,
        }
    }

    pub fn bpm(&self) -> f64 {
        60_000.0 / self.beat_len
    }
}

impl Default for TimingPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            beat_len: Self::DEFAULT_BEAT_LEN,
            meter: Self::DEFAULT_METER,
        }
    }
}

impl ControlPoint for TimingPoint {
    fn time(&self) -> f64 {
        self.time
    }
}
