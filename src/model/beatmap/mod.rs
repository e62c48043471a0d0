use crate::model::{control_point::ControlPoints, hit_object::HitObject};

pub use self::sections::{
    BeatmapColours, BeatmapDifficulty, BeatmapEvents, BeatmapGeneral, BeatmapMetadata,
    BreakPeriod, Colour, ComboColour,
};

pub(crate) use self::sections::{
    ar_from_preempt, great_hit_window_from_od, od_from_great_hit_window, preempt_from_ar,
};

pub(crate) mod processor;
mod sections;

/// A parsed chart.
///
/// Hit objects are sorted by start time. Modifiers are applied on a clone,
/// the parsed chart is never mutated by calculations.
#[derive(Clone, Debug, PartialEq)]
pub struct Beatmap {
    /// Format version of the `.osu` file.
    pub version: i32,
    pub general: BeatmapGeneral,
    pub metadata: BeatmapMetadata,
    pub difficulty: BeatmapDifficulty,
    pub events: BeatmapEvents,
    pub colours: BeatmapColours,
    pub control_points: ControlPoints,
    pub hit_objects: Vec<HitObject>,
    /// Lowercase hex MD5 of the file's content.
    pub md5: String,
}

impl Beatmap {
    pub const DEFAULT_VERSION: i32 = 14;

    /// Time offset applied to every parsed time.
    ///
    /// Format version 4 and lower are off by 24ms.
    pub const fn offset(&self) -> f64 {
        if self.version < 5 {
            24.0
        } else {
            0.0
        }
    }

    /// The maximum achievable combo.
    pub fn max_combo(&self) -> usize {
        self.hit_objects.iter().map(HitObject::max_combo).sum()
    }

    pub fn n_circles(&self) -> usize {
        self.hit_objects.iter().filter(|h| h.is_circle()).count()
    }

    pub fn n_sliders(&self) -> usize {
        self.hit_objects.iter().filter(|h| h.is_slider()).count()
    }

    pub fn n_spinners(&self) -> usize {
        self.hit_objects.iter().filter(|h| h.is_spinner()).count()
    }

    /// Recompute every object's defaults and stacking.
    pub fn process(&mut self) {
        processor::apply_defaults(self);
        processor::apply_stacking(self);
    }
}

impl Default for Beatmap {
    fn default() -> Self {
        Self {
            version: Self::DEFAULT_VERSION,
            general: BeatmapGeneral::default(),
            metadata: BeatmapMetadata::default(),
            difficulty: BeatmapDifficulty::default(),
            events: BeatmapEvents::default(),
            colours: BeatmapColours::default(),
            control_points: ControlPoints::default(),
            hit_objects: Vec::new(),
            md5: String::new(),
        }
    }
}
