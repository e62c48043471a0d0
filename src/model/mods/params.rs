use crate::model::{
    beatmap::{processor, Beatmap},
    hit_object::HitObject,
};

use super::{GameMods, Mod};

/// Settings of a difficulty calculation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[must_use]
pub struct DifficultyParameters {
    pub(crate) mods: GameMods,
    pub(crate) custom_speed_multiplier: f32,
    pub(crate) forced_ar: Option<f32>,
}

impl DifficultyParameters {
    /// Circle size at which the object radius approaches zero, minus a bit.
    const MAX_CS: f32 = 12.13;
    const MAX_FORCED_AR: f32 = 12.5;

    pub const fn new() -> Self {
        Self {
            mods: GameMods::NONE,
            custom_speed_multiplier: 1.0,
            forced_ar: None,
        }
    }

    /// Specify the mods.
    pub const fn mods(self, mods: GameMods) -> Self {
        Self { mods, ..self }
    }

    /// Specify a speed multiplier on top of the one of speed changing mods.
    pub const fn custom_speed_multiplier(self, custom_speed_multiplier: f32) -> Self {
        Self {
            custom_speed_multiplier,
            ..self
        }
    }

    /// Override the approach rate regardless of mods and speed.
    ///
    /// The value is clamped to `0.0..=12.5`.
    pub fn forced_ar(self, ar: f32) -> Self {
        Self {
            forced_ar: Some(ar.clamp(0.0, Self::MAX_FORCED_AR)),
            ..self
        }
    }

    pub const fn get_mods(&self) -> GameMods {
        self.mods
    }

    pub const fn get_custom_speed_multiplier(&self) -> f32 {
        self.custom_speed_multiplier
    }

    pub const fn get_forced_ar(&self) -> Option<f32> {
        self.forced_ar
    }

    pub const fn is_forced_ar(&self) -> bool {
        self.forced_ar.is_some()
    }

    /// Speed multiplier of mods and custom speed combined.
    pub fn total_speed_multiplier(&self) -> f32 {
        self.custom_speed_multiplier * self.mods.clock_rate()
    }
}

impl Default for DifficultyParameters {
    fn default() -> Self {
        Self::new()
    }
}

/// Clone the chart and apply the mods of `params` to it.
///
/// Difficulty adjustments come first, then adjustments depending on the
/// settings, then per-object adjustments. Objects are restacked if the
/// approach rate changed.
pub(crate) fn apply_parameters(map: &Beatmap, params: &DifficultyParameters) -> Beatmap {
    let mut map = map.clone();
    let mods = params.mods;
    let initial_ar = map.difficulty.ar;
    let initial_cs = map.difficulty.cs;

    let difficulty = &mut map.difficulty;

    for m in mods.iter().filter_map(Mod::as_difficulty_mod) {
        m.apply_to_difficulty(difficulty);
    }

    for m in mods.iter().filter_map(Mod::as_difficulty_with_settings_mod) {
        m.apply_to_difficulty_with_settings(difficulty, mods, params);
    }

    difficulty.cs = difficulty.cs.min(DifficultyParameters::MAX_CS);
    difficulty.ar = params.forced_ar.unwrap_or(difficulty.ar.min(10.0));
    difficulty.od = difficulty.od.min(10.0);
    difficulty.hp = difficulty.hp.min(10.0);

    for m in mods.iter().filter_map(Mod::as_hit_object_mod) {
        for h in map.hit_objects.iter_mut() {
            m.apply_to_hit_object(h);
        }
    }

    if map.difficulty.cs != initial_cs {
        let scale = HitObject::scale_from_cs(map.difficulty.cs);

        for h in map.hit_objects.iter_mut() {
            h.scale = scale;
        }
    }

    if map.difficulty.ar != initial_ar {
        log_debug!(
            from = initial_ar,
            to = map.difficulty.ar,
            "approach rate changed, restacking"
        );

        processor::apply_stacking(&mut map);
    }

    map
}

#[cfg(test)]
mod tests {
    use crate::model::{
        hit_object::{HitObject, HitObjectKind},
        pos2::Pos2,
    };

    use super::*;

    fn map(ar: f32, cs: f32) -> Beatmap {
        let mut map = Beatmap::default();
        map.difficulty.ar = ar;
        map.difficulty.cs = cs;
        map.difficulty.od = 8.0;
        map.hit_objects = vec![HitObject::new(0.0, Pos2::new(100.0, 100.0), HitObjectKind::Circle)];
        map.process();

        map
    }

    fn params(mods: &str) -> DifficultyParameters {
        DifficultyParameters::new().mods(mods.parse().unwrap())
    }

    #[test]
    fn hard_rock_caps_at_ten() {
        let adjusted = apply_parameters(&map(9.0, 4.0), &params("HR"));

        assert_eq!(adjusted.difficulty.ar, 10.0);
        assert_eq!(adjusted.difficulty.od, 10.0);
        assert_eq!(adjusted.difficulty.cs, 5.0);
        assert_eq!(adjusted.hit_objects[0].pos, Pos2::new(100.0, 284.0));
    }

    #[test]
    fn circle_size_mods_accumulate() {
        let adjusted = apply_parameters(&map(9.0, 4.0), &params("EZSC"));
        assert_eq!(adjusted.difficulty.cs, 7.0);

        let capped = apply_parameters(&map(9.0, 10.0), &params("HRSC"));
        assert_eq!(capped.difficulty.cs, 12.13);
    }

    #[test]
    fn really_easy_approach_rate() {
        let adjusted = apply_parameters(&map(8.0, 4.0), &params("RE"));
        assert_eq!(adjusted.difficulty.ar, 7.5);

        let with_easy = apply_parameters(&map(8.0, 4.0), &params("EZRE"));
        assert_eq!(with_easy.difficulty.ar, 7.0);

        let with_speed = apply_parameters(
            &map(8.0, 4.0),
            &params("RE").custom_speed_multiplier(1.25),
        );
        assert_eq!(with_speed.difficulty.ar, 7.25);
    }

    #[test]
    fn forced_ar_wins() {
        let adjusted = apply_parameters(&map(8.0, 4.0), &params("HREZ").forced_ar(11.0));
        assert_eq!(adjusted.difficulty.ar, 11.0);

        let clamped = DifficultyParameters::new().forced_ar(20.0);
        assert_eq!(clamped.get_forced_ar(), Some(12.5));
    }

    #[test]
    fn original_is_untouched() {
        let original = map(9.0, 4.0);
        let _ = apply_parameters(&original, &params("HRDT"));

        assert_eq!(original.difficulty.ar, 9.0);
        assert_eq!(original.hit_objects[0].pos, Pos2::new(100.0, 100.0));
    }

    #[test]
    fn total_speed() {
        assert_eq!(params("DT").total_speed_multiplier(), 1.5);
        assert_eq!(
            params("HT").custom_speed_multiplier(2.0).total_speed_multiplier(),
            1.5
        );
    }
}
