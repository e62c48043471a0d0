use std::borrow::Cow;

use crate::{
    model::{
        beatmap::{
            ar_from_preempt, great_hit_window_from_od, od_from_great_hit_window, preempt_from_ar,
            Beatmap, BeatmapDifficulty,
        },
        hit_object::HitObject,
        mods::{apply_parameters, DifficultyParameters, GameMods, Mod},
    },
    osu::{
        attributes::{OsuDifficultyAttributes, TimedDifficultyAttributes},
        performance::PERFORMANCE_BASE_MULTIPLIER,
    },
};

use self::{
    object::{ObjectSettings, OsuDifficultyObject},
    scaling_factor::ScalingFactor,
    skills::{OsuSkills, StrainSkill},
};

pub(crate) mod object;
pub(crate) mod scaling_factor;
pub(crate) mod skills;

const DIFFICULTY_MULTIPLIER: f64 = 0.0675;
const HD_FADE_IN_DURATION_MULTIPLIER: f64 = 0.4;

/// Difficulty calculator on osu!standard charts.
///
/// # Example
///
/// ```
/// use beatmap_pp::{Beatmap, DifficultyParameters, GameMods, Mod, OsuDifficulty};
///
/// # /*
/// let map: Beatmap = ...
/// # */
/// # let map = Beatmap::default();
///
/// let attrs = OsuDifficulty::new(&map)
///     .params(DifficultyParameters::new().mods(GameMods::NONE.with(Mod::Hidden)))
///     .calculate();
///
/// println!("Stars: {}", attrs.stars);
/// ```
#[derive(Clone, Debug)]
#[must_use]
pub struct OsuDifficulty<'map> {
    map: &'map Beatmap,
    params: Option<DifficultyParameters>,
}

impl<'map> OsuDifficulty<'map> {
    /// Create a new difficulty calculator for the given chart.
    pub const fn new(map: &'map Beatmap) -> Self {
        Self { map, params: None }
    }

    /// Specify mods, speed, and approach rate.
    ///
    /// Without parameters, the chart is used as is.
    pub const fn params(mut self, params: DifficultyParameters) -> Self {
        self.params = Some(params);

        self
    }

    /// Specify mods while keeping previously given parameters.
    pub fn mods(mut self, mods: GameMods) -> Self {
        self.params = Some(self.params.unwrap_or_default().mods(mods));

        self
    }

    /// Calculate the difficulty attributes of the whole chart.
    pub fn calculate(&self) -> OsuDifficultyAttributes {
        calculate_difficulty(self.map, self.params.as_ref())
    }

    /// Calculate difficulty attributes after each hit object.
    pub fn calculate_timed(&self) -> Vec<TimedDifficultyAttributes> {
        calculate_timed_difficulty(self.map, self.params.as_ref())
    }
}

/// Calculate the difficulty attributes of a chart.
pub fn calculate_difficulty(
    map: &Beatmap,
    params: Option<&DifficultyParameters>,
) -> OsuDifficultyAttributes {
    let map = prepare_map(map, params);
    let setup = DifficultySetup::new(&map, params);
    let diff_objects = setup.difficulty_objects(&map.hit_objects);

    let mut skills = setup.skills();

    for curr in diff_objects.iter() {
        skills.process(curr, &diff_objects);
    }

    let counts = ObjectCounts::from_map(&map);

    setup.attributes(&map.difficulty, &skills, &counts)
}

/// Calculate difficulty attributes after each hit object.
///
/// The first entry contains the attributes of the first object on its own,
/// every further entry includes one more object.
pub fn calculate_timed_difficulty(
    map: &Beatmap,
    params: Option<&DifficultyParameters>,
) -> Vec<TimedDifficultyAttributes> {
    let map = prepare_map(map, params);

    let Some(first) = map.hit_objects.first() else {
        return Vec::new();
    };

    let setup = DifficultySetup::new(&map, params);
    let diff_objects = setup.difficulty_objects(&map.hit_objects);

    let mut skills = setup.skills();
    let mut counts = ObjectCounts::default();
    let mut attributes = Vec::with_capacity(map.hit_objects.len());

    counts.add(first);

    attributes.push(TimedDifficultyAttributes {
        time: first.end_time(),
        attributes: setup.attributes(&map.difficulty, &skills, &counts),
    });

    for curr in diff_objects.iter() {
        skills.process(curr, &diff_objects);
        counts.add(curr.base);

        attributes.push(TimedDifficultyAttributes {
            time: curr.end_time * setup.clock_rate,
            attributes: setup.attributes(&map.difficulty, &skills, &counts),
        });
    }

    attributes
}

/// Apply the parameters on a copy of the chart or borrow it unchanged.
fn prepare_map<'map>(
    map: &'map Beatmap,
    params: Option<&DifficultyParameters>,
) -> Cow<'map, Beatmap> {
    match params {
        Some(params) => Cow::Owned(apply_parameters(map, params)),
        None => Cow::Borrowed(map),
    }
}

/// Values that stay the same throughout a calculation.
struct DifficultySetup {
    mods: GameMods,
    clock_rate: f64,
    forced_ar: bool,
    scaling_factor: ScalingFactor,
    great_window: f64,
    time_preempt: f64,
    time_fade_in: f64,
}

impl DifficultySetup {
    fn new(map: &Beatmap, params: Option<&DifficultyParameters>) -> Self {
        let mods = params.map_or(GameMods::NONE, DifficultyParameters::get_mods);
        let clock_rate = params.map_or(1.0, |params| f64::from(params.total_speed_multiplier()));
        let forced_ar = params.is_some_and(DifficultyParameters::is_forced_ar);

        let great_window = great_hit_window_from_od(f64::from(map.difficulty.od)) / clock_rate;

        // A forced approach rate applies to real time rather than chart time
        let mut time_preempt = preempt_from_ar(f64::from(map.difficulty.ar));

        if forced_ar {
            time_preempt *= clock_rate;
        }

        let time_fade_in = if mods.contains(Mod::Hidden) {
            time_preempt * HD_FADE_IN_DURATION_MULTIPLIER
        } else {
            400.0 * (time_preempt / BeatmapDifficulty::PREEMPT_MAX).min(1.0)
        };

        Self {
            mods,
            clock_rate,
            forced_ar,
            scaling_factor: ScalingFactor::new(map.difficulty.cs),
            great_window,
            time_preempt,
            time_fade_in,
        }
    }

    fn difficulty_objects<'a>(&self, hit_objects: &'a [HitObject]) -> Vec<OsuDifficultyObject<'a>> {
        let settings = ObjectSettings {
            clock_rate: self.clock_rate,
            scaling_factor: &self.scaling_factor,
            time_preempt: self.time_preempt,
            time_fade_in: self.time_fade_in,
        };

        OsuDifficultyObject::create(hit_objects, &settings)
    }

    fn skills(&self) -> OsuSkills {
        OsuSkills::new(
            self.great_window,
            self.mods.contains(Mod::Hidden),
            &self.scaling_factor,
        )
    }

    fn attributes(
        &self,
        difficulty: &BeatmapDifficulty,
        skills: &OsuSkills,
        counts: &ObjectCounts,
    ) -> OsuDifficultyAttributes {
        let mut aim_rating = rating(skills.aim.difficulty_value());
        let aim_rating_no_sliders = rating(skills.aim_no_sliders.difficulty_value());
        let mut speed_rating = rating(skills.speed.difficulty_value());
        let speed_note_count = skills.speed.relevant_note_count();
        let mut flashlight_rating = rating(skills.flashlight.difficulty_value());

        let slider_factor = if aim_rating > 0.0 {
            aim_rating_no_sliders / aim_rating
        } else {
            1.0
        };

        if self.mods.contains(Mod::Relax) {
            aim_rating *= 0.9;
            speed_rating = 0.0;
            flashlight_rating *= 0.7;
        }

        let base_aim_performance = base_performance(aim_rating);
        let base_speed_performance = base_performance(speed_rating);

        let base_flashlight_performance = if self.mods.contains(Mod::Flashlight) {
            flashlight_rating * flashlight_rating * 25.0
        } else {
            0.0
        };

        let base_performance = (base_aim_performance.powf(1.1)
            + base_speed_performance.powf(1.1)
            + base_flashlight_performance.powf(1.1))
        .powf(1.0 / 1.1);

        // The base terms never drop below 1e-5 so a chart without any strain
        // is checked separately
        let has_strain =
            aim_rating > 0.0 || speed_rating > 0.0 || base_flashlight_performance > 0.0;

        let stars = if has_strain && base_performance > 1e-5 {
            PERFORMANCE_BASE_MULTIPLIER.cbrt()
                * 0.027
                * ((100_000.0 / 2.0_f64.powf(1.0 / 1.1) * base_performance).cbrt() + 4.0)
        } else {
            0.0
        };

        let mut preempt = preempt_from_ar(f64::from(difficulty.ar));

        if !self.forced_ar {
            preempt /= self.clock_rate;
        }

        let great_window = great_hit_window_from_od(f64::from(difficulty.od)) / self.clock_rate;

        OsuDifficultyAttributes {
            mods: self.mods,
            aim: aim_rating,
            slider_factor,
            speed: speed_rating,
            speed_note_count,
            flashlight: flashlight_rating,
            ar: ar_from_preempt(preempt),
            od: od_from_great_hit_window(great_window),
            hp: f64::from(difficulty.hp),
            n_circles: counts.n_circles,
            n_sliders: counts.n_sliders,
            n_spinners: counts.n_spinners,
            stars,
            max_combo: counts.max_combo,
        }
    }
}

#[derive(Default)]
struct ObjectCounts {
    n_circles: u32,
    n_sliders: u32,
    n_spinners: u32,
    max_combo: u32,
}

impl ObjectCounts {
    fn from_map(map: &Beatmap) -> Self {
        map.hit_objects.iter().fold(Self::default(), |mut counts, h| {
            counts.add(h);

            counts
        })
    }

    fn add(&mut self, h: &HitObject) {
        if h.is_circle() {
            self.n_circles += 1;
        } else if h.is_slider() {
            self.n_sliders += 1;
        } else {
            self.n_spinners += 1;
        }

        self.max_combo += h.max_combo() as u32;
    }
}

fn rating(difficulty_value: f64) -> f64 {
    difficulty_value.sqrt() * DIFFICULTY_MULTIPLIER
}

fn base_performance(rating: f64) -> f64 {
    (5.0 * (rating / DIFFICULTY_MULTIPLIER).max(1.0) - 4.0).powi(3) / 100_000.0
}
