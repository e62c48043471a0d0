use crate::model::mods::GameMods;

use super::performance::OsuPerformance;

/// Star rating of an osu!standard chart together with its components.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuDifficultyAttributes {
    /// Mods used for the calculation.
    pub mods: GameMods,
    /// Aim rating, slider paths included.
    pub aim: f64,
    /// Aim rating without sliders divided by [`aim`](Self::aim).
    pub slider_factor: f64,
    /// Tapping rating.
    pub speed: f64,
    /// Weighted amount of objects that contribute to speed.
    pub speed_note_count: f64,
    /// Flashlight rating; computed regardless of mods.
    pub flashlight: f64,
    /// Approach rate after mods and speed changes.
    pub ar: f64,
    /// Overall difficulty after mods and speed changes.
    pub od: f64,
    /// Drain rate after mods.
    pub hp: f64,
    pub n_circles: u32,
    pub n_sliders: u32,
    pub n_spinners: u32,
    pub stars: f64,
    /// Combo of a full combo play, slider ticks included.
    pub max_combo: u32,
}

impl OsuDifficultyAttributes {
    pub const fn max_combo(&self) -> u32 {
        self.max_combo
    }

    /// Circles, sliders, and spinners combined.
    pub const fn n_objects(&self) -> u32 {
        self.n_circles + self.n_sliders + self.n_spinners
    }

    /// Start a performance calculation on these attributes.
    pub fn performance(self) -> OsuPerformance {
        OsuPerformance::new(self)
    }
}

/// Difficulty attributes of a chart up to some point in time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimedDifficultyAttributes {
    /// End time in milliseconds of the last object that was included.
    pub time: f64,
    pub attributes: OsuDifficultyAttributes,
}

/// Performance of a play on an osu!standard chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OsuPerformanceAttributes {
    /// Difficulty the performance is based on.
    pub difficulty: OsuDifficultyAttributes,
    /// Weighted sum of all components.
    pub pp: f64,
    pub pp_acc: f64,
    pub pp_aim: f64,
    /// Zero unless the play uses flashlight.
    pub pp_flashlight: f64,
    pub pp_speed: f64,
    /// Misses plus estimated slider breaks.
    pub effective_miss_count: f64,
}

impl OsuPerformanceAttributes {
    pub const fn stars(&self) -> f64 {
        self.difficulty.stars
    }

    pub const fn pp(&self) -> f64 {
        self.pp
    }

    pub const fn max_combo(&self) -> u32 {
        self.difficulty.max_combo
    }
}

impl From<OsuPerformanceAttributes> for OsuDifficultyAttributes {
    fn from(attributes: OsuPerformanceAttributes) -> Self {
        attributes.difficulty
    }
}
