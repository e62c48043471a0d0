use crate::model::control_point::SampleBank;

/// Contents of the `[General]` section.
#[derive(Clone, Debug, PartialEq)]
pub struct BeatmapGeneral {
    pub audio_file: String,
    pub audio_lead_in: f64,
    /// Milliseconds into the song where the preview starts, `-1` if unset.
    pub preview_time: i32,
    pub countdown: bool,
    pub sample_bank: SampleBank,
    pub sample_volume: i32,
    pub stack_leniency: f32,
    /// Game mode index; only `0` is supported.
    pub mode: u8,
    pub letterbox_in_breaks: bool,
    pub special_style: bool,
    pub widescreen_storyboard: bool,
}

impl Default for BeatmapGeneral {
    fn default() -> Self {
        Self {
            audio_file: String::new(),
            audio_lead_in: 0.0,
            preview_time: -1,
            countdown: true,
            sample_bank: SampleBank::Normal,
            sample_volume: 100,
            stack_leniency: 0.7,
            mode: 0,
            letterbox_in_breaks: false,
            special_style: false,
            widescreen_storyboard: false,
        }
    }
}

/// Contents of the `[Metadata]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BeatmapMetadata {
    pub title: String,
    pub title_unicode: String,
    pub artist: String,
    pub artist_unicode: String,
    pub creator: String,
    pub version: String,
    pub source: String,
    pub tags: Vec<String>,
    pub beatmap_id: i32,
    pub beatmap_set_id: i32,
}

/// Contents of the `[Difficulty]` section.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeatmapDifficulty {
    pub hp: f32,
    pub cs: f32,
    pub od: f32,
    pub ar: f32,
    pub slider_multiplier: f32,
    pub slider_tick_rate: f32,
}

impl BeatmapDifficulty {
    pub(crate) const PREEMPT_MIN: f64 = 1800.0;
    pub(crate) const PREEMPT_MID: f64 = 1200.0;
    pub(crate) const PREEMPT_MAX: f64 = 450.0;

    pub(crate) const GREAT_MIN: f64 = 80.0;
    pub(crate) const GREAT_MID: f64 = 50.0;
    pub(crate) const GREAT_MAX: f64 = 20.0;

    /// Time in milliseconds an object is visible before its start time.
    pub fn preempt(&self) -> f64 {
        preempt_from_ar(f64::from(self.ar))
    }

    /// Hit window of a great hit in milliseconds.
    pub fn great_hit_window(&self) -> f64 {
        difficulty_range(
            f64::from(self.od),
            Self::GREAT_MIN,
            Self::GREAT_MID,
            Self::GREAT_MAX,
        )
    }
}

impl Default for BeatmapDifficulty {
    fn default() -> Self {
        Self {
            hp: 5.0,
            cs: 5.0,
            od: 5.0,
            ar: 5.0,
            slider_multiplier: 1.4,
            slider_tick_rate: 1.0,
        }
    }
}

pub(crate) fn preempt_from_ar(ar: f64) -> f64 {
    difficulty_range(
        ar,
        BeatmapDifficulty::PREEMPT_MIN,
        BeatmapDifficulty::PREEMPT_MID,
        BeatmapDifficulty::PREEMPT_MAX,
    )
}

/// Inverse of [`preempt_from_ar`].
pub(crate) fn ar_from_preempt(preempt: f64) -> f64 {
    if preempt > BeatmapDifficulty::PREEMPT_MID {
        (BeatmapDifficulty::PREEMPT_MIN - preempt) / 120.0
    } else {
        (BeatmapDifficulty::PREEMPT_MID - preempt) / 150.0 + 5.0
    }
}

/// Inverse of the great hit window conversion.
pub(crate) fn od_from_great_hit_window(hit_window: f64) -> f64 {
    (BeatmapDifficulty::GREAT_MIN - hit_window) / 6.0
}

pub(crate) fn great_hit_window_from_od(od: f64) -> f64 {
    difficulty_range(
        od,
        BeatmapDifficulty::GREAT_MIN,
        BeatmapDifficulty::GREAT_MID,
        BeatmapDifficulty::GREAT_MAX,
    )
}

pub(crate) fn difficulty_range(difficulty: f64, min: f64, mid: f64, max: f64) -> f64 {
    if difficulty > 5.0 {
        mid + (max - mid) * (difficulty - 5.0) / 5.0
    } else if difficulty < 5.0 {
        mid - (mid - min) * (5.0 - difficulty) / 5.0
    } else {
        mid
    }
}

/// A period without hit objects.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BreakPeriod {
    pub start_time: f64,
    pub end_time: f64,
}

impl BreakPeriod {
    /// The end time is never earlier than the start time.
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            start_time,
            end_time: end_time.max(start_time),
        }
    }

    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Contents of the `[Events]` section that are relevant outside of storyboards.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BeatmapEvents {
    pub background_file: Option<String>,
    pub video_file: Option<String>,
    pub video_start_time: f64,
    pub breaks: Vec<BreakPeriod>,
    pub background_colour: Option<Colour>,
}

/// An RGBA colour.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// A combo colour together with its `ComboN` index.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ComboColour {
    pub index: i32,
    pub colour: Colour,
}

/// Contents of the `[Colours]` section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BeatmapColours {
    /// Sorted by index.
    pub combo_colours: Vec<ComboColour>,
    pub slider_border: Option<Colour>,
}
