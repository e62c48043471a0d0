use super::ControlPoint;

/// Difficulty-related info about this control point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DifficultyPoint {
    pub time: f64,
    /// Slider velocity multiplier.
    pub speed_multiplier: f64,
    /// Whether slider ticks are generated while this point is active.
    ///
    /// Charts abusing non-finite slider velocities disable it.
    pub generate_ticks: bool,
}

impl DifficultyPoint {
    pub const DEFAULT_SPEED_MULTIPLIER: f64 = 1.0;
    pub const DEFAULT_GENERATE_TICKS: bool = true;

    pub fn new(time: f64, beat_len: f64) -> Self {
        let speed_multiplier = if beat_len < 0.0 {
            (100.0 / -beat_len).clamp(0.1, 10.0)
        } else {
            Self::DEFAULT_SPEED_MULTIPLIER
        };

        Self {
            time,
            speed_multiplier,
            generate_ticks: !beat_len.is_nan(),
        }
    }

    /// Multiplier on the beat length derived from the inherited-BPM encoding.
    pub fn bpm_multiplier(&self) -> f64 {
        let slider_velocity_as_beat_len = -100.0 / self.speed_multiplier;

        if slider_velocity_as_beat_len < 0.0 {
            f64::from(((-slider_velocity_as_beat_len) as f32).clamp(10.0, 1000.0)) / 100.0
        } else {
            1.0
        }
    }
}

impl Default for DifficultyPoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            speed_multiplier: Self::DEFAULT_SPEED_MULTIPLIER,
            generate_ticks: Self::DEFAULT_GENERATE_TICKS,
        }
    }
}

impl ControlPoint for DifficultyPoint {
    fn time(&self) -> f64 {
        self.time
    }
}
