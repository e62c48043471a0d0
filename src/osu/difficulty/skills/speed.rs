use crate::osu::difficulty::object::OsuDifficultyObject;

use super::{
    rhythm,
    strain::{strain_decay, OsuStrainSkill, StrainSections, StrainSkill},
};

const SKILL_MULTIPLIER: f64 = 1375.0;
const STRAIN_DECAY_BASE: f64 = 0.3;

/// Skill to tap objects in quick succession.
#[derive(Clone, Debug)]
pub(crate) struct Speed {
    curr_strain: f64,
    curr_rhythm: f64,
    great_window: f64,
    object_strains: Vec<f64>,
    sections: StrainSections,
}

impl Speed {
    pub(crate) fn new(great_window: f64) -> Self {
        Self {
            curr_strain: 0.0,
            curr_rhythm: 0.0,
            great_window,
            object_strains: Vec::new(),
            sections: StrainSections::default(),
        }
    }

    /// Amount of objects weighted by how hard they are to tap.
    pub(crate) fn relevant_note_count(&self) -> f64 {
        let max_strain = self.object_strains.iter().copied().fold(0.0, f64::max);

        if max_strain <= 0.0 {
            return 0.0;
        }

        self.object_strains
            .iter()
            .map(|strain| (1.0 + (-(strain / max_strain * 12.0 - 6.0)).exp()).recip())
            .sum()
    }
}

impl StrainSkill for Speed {
    fn sections(&self) -> &StrainSections {
        &self.sections
    }

    fn sections_mut(&mut self) -> &mut StrainSections {
        &mut self.sections
    }

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        self.curr_strain *= strain_decay(curr.strain_time, STRAIN_DECAY_BASE);
        self.curr_strain += SpeedEvaluator::evaluate_diff_of(curr, diff_objects, self.great_window)
            * SKILL_MULTIPLIER;

        self.curr_rhythm = rhythm::evaluate_diff_of(curr, diff_objects, self.great_window);

        let total_strain = self.curr_strain * self.curr_rhythm;
        self.object_strains.push(total_strain);

        total_strain
    }

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
    ) -> f64 {
        let prev_start_time = curr
            .previous(0, diff_objects)
            .map_or(0.0, |prev| prev.start_time);

        self.curr_strain
            * self.curr_rhythm
            * strain_decay(time - prev_start_time, STRAIN_DECAY_BASE)
    }

    fn difficulty_value(&self) -> f64 {
        self.osu_difficulty_value()
    }
}

impl OsuStrainSkill for Speed {
    const REDUCED_SECTION_COUNT: usize = 5;
    const DIFFICULTY_MULTIPLIER: f64 = 1.04;
}

struct SpeedEvaluator;

impl SpeedEvaluator {
    const SINGLE_SPACING_THRESHOLD: f64 = 125.0;
    // ~200 bpm 1/4
    const MIN_SPEED_BONUS: f64 = 75.0;
    const SPEED_BALANCING_FACTOR: f64 = 40.0;

    fn evaluate_diff_of(
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
        great_window: f64,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let prev = curr.previous(0, diff_objects);
        let great_window_full = great_window * 2.0;

        let mut strain_time = curr.strain_time;

        // Doubles that can be doubletapped are easier
        let doubletapness = curr.next(0, diff_objects).map_or(1.0, |next| {
            let curr_delta_time = curr.delta_time.max(1.0);
            let next_delta_time = next.delta_time.max(1.0);
            let delta_diff = (next_delta_time - curr_delta_time).abs();
            let speed_ratio = curr_delta_time / curr_delta_time.max(delta_diff);
            let window_ratio = (curr_delta_time / great_window_full).min(1.0).powi(2);

            speed_ratio.powf(1.0 - window_ratio)
        });

        // Cap the delta time to the great hit window
        strain_time /= ((strain_time / great_window_full) / 0.93).clamp(0.92, 1.0);

        let speed_bonus = if strain_time < Self::MIN_SPEED_BONUS {
            let base = (Self::MIN_SPEED_BONUS - strain_time) / Self::SPEED_BALANCING_FACTOR;

            1.0 + 0.75 * base * base
        } else {
            1.0
        };

        let travel_dist = prev.map_or(0.0, |prev| prev.travel_dist);
        let dist = Self::SINGLE_SPACING_THRESHOLD.min(travel_dist + curr.min_jump_dist);

        (speed_bonus + speed_bonus * (dist / Self::SINGLE_SPACING_THRESHOLD).powf(3.5))
            * doubletapness
            / strain_time
    }
}
