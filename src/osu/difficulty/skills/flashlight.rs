use crate::{model::hit_object::HitObjectKind, osu::difficulty::object::OsuDifficultyObject};

use super::strain::{strain_decay, OsuStrainSkill, StrainSections, StrainSkill};

const SKILL_MULTIPLIER: f64 = 0.052;
const STRAIN_DECAY_BASE: f64 = 0.15;

/// Skill to memorize and hit objects while only a small area around the
/// cursor is visible.
#[derive(Clone, Debug)]
pub(crate) struct Flashlight {
    curr_strain: f64,
    hidden: bool,
    scaling_factor: f64,
    sections: StrainSections,
}

impl Flashlight {
    pub(crate) fn new(hidden: bool, radius: f64) -> Self {
        Self {
            curr_strain: 0.0,
            hidden,
            scaling_factor: 52.0 / radius,
            sections: StrainSections::default(),
        }
    }
}

impl StrainSkill for Flashlight {
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
        self.curr_strain *= strain_decay(curr.delta_time, STRAIN_DECAY_BASE);
        self.curr_strain += FlashlightEvaluator::evaluate_diff_of(
            curr,
            diff_objects,
            self.hidden,
            self.scaling_factor,
        ) * SKILL_MULTIPLIER;

        self.curr_strain
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

        self.curr_strain * strain_decay(time - prev_start_time, STRAIN_DECAY_BASE)
    }

    /// Plain sum of all peaks since flashlight doesn't weigh its sections.
    fn difficulty_value(&self) -> f64 {
        self.sections.curr_strain_peaks().into_iter().sum::<f64>() * Self::DIFFICULTY_MULTIPLIER
    }
}

impl OsuStrainSkill for Flashlight {}

struct FlashlightEvaluator;

impl FlashlightEvaluator {
    const MAX_OPACITY_BONUS: f64 = 0.4;
    const HIDDEN_BONUS: f64 = 0.2;

    const MIN_VELOCITY: f64 = 0.5;
    const SLIDER_MULTIPLIER: f64 = 1.3;

    const MIN_ANGLE_MULTIPLIER: f64 = 0.2;

    /// How many previous objects are considered.
    const HISTORY_LEN: usize = 10;

    fn evaluate_diff_of(
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
        hidden: bool,
        scaling_factor: f64,
    ) -> f64 {
        if curr.base.is_spinner() {
            return 0.0;
        }

        let mut small_dist_nerf = 1.0;
        let mut cumulative_strain_time = 0.0;
        let mut angle_repeat_count = 0.0;
        let mut result = 0.0;

        let mut last_obj = curr;

        // Walks backwards in time
        for i in 0..curr.idx.min(Self::HISTORY_LEN) {
            let Some(curr_obj) = curr.previous(i, diff_objects) else {
                break;
            };

            if !curr_obj.base.is_spinner() {
                let jump_dist =
                    f64::from((curr.base.stacked_pos() - curr_obj.base.stacked_end_pos()).length());

                cumulative_strain_time += last_obj.strain_time;

                // Objects within the flashlight radius are easy to see
                if i == 0 {
                    small_dist_nerf = (jump_dist / 75.0).min(1.0);
                }

                // Only the first object of a stack counts
                let stack_nerf = ((curr_obj.lazy_jump_dist / scaling_factor) / 25.0).min(1.0);

                let opacity_bonus = 1.0
                    + Self::MAX_OPACITY_BONUS
                        * (1.0 - curr.opacity_at(curr_obj.base.start_time, hidden));

                result += stack_nerf * opacity_bonus * scaling_factor * jump_dist
                    / cumulative_strain_time;

                if let (Some(curr_obj_angle), Some(curr_angle)) = (curr_obj.angle, curr.angle) {
                    // Older objects weigh less
                    if (curr_obj_angle - curr_angle).abs() < 0.02 {
                        angle_repeat_count += (1.0 - 0.1 * i as f64).max(0.0);
                    }
                }
            }

            last_obj = curr_obj;
        }

        result = (small_dist_nerf * result).powi(2);

        // No approach circles
        if hidden {
            result *= 1.0 + Self::HIDDEN_BONUS;
        }

        // Repeated angles are easier to memorize
        result *= Self::MIN_ANGLE_MULTIPLIER
            + (1.0 - Self::MIN_ANGLE_MULTIPLIER) / (angle_repeat_count + 1.0);

        if let HitObjectKind::Slider(ref slider) = curr.base.kind {
            // True travel distance independent of circle size
            let pixel_travel_dist = curr.travel_dist / scaling_factor;

            let mut slider_bonus = (pixel_travel_dist / curr.travel_time - Self::MIN_VELOCITY)
                .max(0.0)
                .sqrt();

            // Longer sliders require more memorisation
            slider_bonus *= pixel_travel_dist;

            let repeat_count = slider.repeat_count();

            if repeat_count > 0 {
                slider_bonus /= (repeat_count + 1) as f64;
            }

            result += slider_bonus * Self::SLIDER_MULTIPLIER;
        }

        result
    }
}
