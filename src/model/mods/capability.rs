use crate::model::{beatmap::BeatmapDifficulty, hit_object::HitObject};

use super::{DifficultyParameters, GameMods, Mod};

/// A mod that adjusts difficulty settings on its own.
pub(crate) trait ApplicableToDifficulty {
    fn apply_to_difficulty(&self, difficulty: &mut BeatmapDifficulty);
}

/// A mod whose difficulty adjustment depends on the other mods or on the
/// calculation parameters.
pub(crate) trait ApplicableToDifficultyWithSettings {
    fn apply_to_difficulty_with_settings(
        &self,
        difficulty: &mut BeatmapDifficulty,
        mods: GameMods,
        params: &DifficultyParameters,
    );
}

/// A mod that modifies individual hit objects.
pub(crate) trait ApplicableToHitObject {
    fn apply_to_hit_object(&self, h: &mut HitObject);
}

pub(crate) struct HardRock;
pub(crate) struct Easy;
pub(crate) struct ReallyEasy;
pub(crate) struct SmallCircle;

impl ApplicableToDifficulty for HardRock {
    fn apply_to_difficulty(&self, difficulty: &mut BeatmapDifficulty) {
        difficulty.cs += 1.0;
        difficulty.ar *= 1.4;
        difficulty.od *= 1.4;
        difficulty.hp *= 1.4;
    }
}

impl ApplicableToHitObject for HardRock {
    fn apply_to_hit_object(&self, h: &mut HitObject) {
        h.reflect_vertically();
    }
}

impl ApplicableToDifficulty for Easy {
    fn apply_to_difficulty(&self, difficulty: &mut BeatmapDifficulty) {
        difficulty.cs -= 1.0;
        difficulty.ar /= 2.0;
        difficulty.od /= 2.0;
        difficulty.hp /= 2.0;
    }
}

impl ApplicableToDifficulty for ReallyEasy {
    fn apply_to_difficulty(&self, difficulty: &mut BeatmapDifficulty) {
        difficulty.cs -= 1.0;
        difficulty.od /= 2.0;
        difficulty.hp /= 2.0;
    }
}

impl ApplicableToDifficultyWithSettings for ReallyEasy {
    fn apply_to_difficulty_with_settings(
        &self,
        difficulty: &mut BeatmapDifficulty,
        mods: GameMods,
        params: &DifficultyParameters,
    ) {
        let mut ar = difficulty.ar;

        if mods.contains(Mod::Easy) {
            ar *= 2.0;
            ar -= 0.5;
        }

        ar -= 0.5;
        ar -= params.custom_speed_multiplier - 1.0;

        difficulty.ar = ar;
    }
}

impl ApplicableToDifficulty for SmallCircle {
    fn apply_to_difficulty(&self, difficulty: &mut BeatmapDifficulty) {
        difficulty.cs += 4.0;
    }
}

impl Mod {
    pub(crate) fn as_difficulty_mod(self) -> Option<&'static dyn ApplicableToDifficulty> {
        match self {
            Self::HardRock => Some(&HardRock),
            Self::Easy => Some(&Easy),
            Self::ReallyEasy => Some(&ReallyEasy),
            Self::SmallCircle => Some(&SmallCircle),
            _ => None,
        }
    }

    pub(crate) fn as_difficulty_with_settings_mod(
        self,
    ) -> Option<&'static dyn ApplicableToDifficultyWithSettings> {
        match self {
            Self::ReallyEasy => Some(&ReallyEasy),
            _ => None,
        }
    }

    pub(crate) fn as_hit_object_mod(self) -> Option<&'static dyn ApplicableToHitObject> {
        match self {
            Self::HardRock => Some(&HardRock),
            _ => None,
        }
    }
}
