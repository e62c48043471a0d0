use std::f64::consts::{FRAC_PI_2, PI};

use crate::osu::difficulty::object::OsuDifficultyObject;

use super::strain::{strain_decay, OsuStrainSkill, StrainSections, StrainSkill};

const SKILL_MULTIPLIER: f64 = 23.55;
const STRAIN_DECAY_BASE: f64 = 0.15;

/// Skill to aim at the objects, optionally including slider paths.
#[derive(Clone, Debug)]
pub(crate) struct Aim {
    with_sliders: bool,
    curr_strain: f64,
    sections: StrainSections,
}

impl Aim {
    pub(crate) fn new(with_sliders: bool) -> Self {
        Self {
            with_sliders,
            curr_strain: 0.0,
            sections: StrainSections::default(),
        }
    }
}

impl StrainSkill for Aim {
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
        self.curr_strain +=
            AimEvaluator::evaluate_diff_of(curr, diff_objects, self.with_sliders) * SKILL_MULTIPLIER;

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

    fn difficulty_value(&self) -> f64 {
        self.osu_difficulty_value()
    }
}

impl OsuStrainSkill for Aim {}

struct AimEvaluator;

impl AimEvaluator {
    const WIDE_ANGLE_MULTIPLIER: f64 = 1.5;
    const ACUTE_ANGLE_MULTIPLIER: f64 = 1.95;
    const SLIDER_MULTIPLIER: f64 = 1.35;
    const VELOCITY_CHANGE_MULTIPLIER: f64 = 0.75;

    fn evaluate_diff_of(
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
        with_sliders: bool,
    ) -> f64 {
        let Some((last_last, last)) = curr
            .previous(1, diff_objects)
            .zip(curr.previous(0, diff_objects))
        else {
            return 0.0;
        };

        if curr.base.is_spinner() || last.base.is_spinner() {
            return 0.0;
        }

        // Base velocity as if the last object was a circle
        let mut curr_vel = curr.lazy_jump_dist / curr.strain_time;

        // Extend the velocity through the last slider into the current object
        if last.base.is_slider() && with_sliders {
            let travel_vel = last.travel_dist / last.travel_time;
            let movement_vel = curr.min_jump_dist / curr.min_jump_time;

            curr_vel = curr_vel.max(movement_vel + travel_vel);
        }

        let mut prev_vel = last.lazy_jump_dist / last.strain_time;

        if last_last.base.is_slider() && with_sliders {
            let travel_vel = last_last.travel_dist / last_last.travel_time;
            let movement_vel = last.min_jump_dist / last.min_jump_time;

            prev_vel = prev_vel.max(movement_vel + travel_vel);
        }

        let mut wide_angle_bonus = 0.0;
        let mut acute_angle_bonus = 0.0;
        let mut slider_bonus = 0.0;
        let mut vel_change_bonus = 0.0;

        let mut aim_strain = curr_vel;

        let similar_rhythm = curr.strain_time.max(last.strain_time)
            < 1.25 * curr.strain_time.min(last.strain_time);

        if similar_rhythm {
            if let (Some(curr_angle), Some(last_angle), Some(last_last_angle)) =
                (curr.angle, last.angle, last_last.angle)
            {
                let angle_bonus = curr_vel.min(prev_vel);

                wide_angle_bonus = Self::calc_wide_angle_bonus(curr_angle);
                acute_angle_bonus = Self::calc_acute_angle_bonus(curr_angle);

                // Acute angles only matter beyond 300 bpm 1/2
                if curr.strain_time > 100.0 {
                    acute_angle_bonus = 0.0;
                } else {
                    let rhythm_scale =
                        (FRAC_PI_2 * ((100.0 - curr.strain_time) / 25.0).min(1.0)).sin();
                    let dist_scale = (FRAC_PI_2
                        * (curr.lazy_jump_dist.clamp(50.0, 100.0) - 50.0)
                        / 50.0)
                        .sin();

                    acute_angle_bonus *= Self::calc_acute_angle_bonus(last_angle)
                        * angle_bonus.min(125.0 / curr.strain_time)
                        * rhythm_scale
                        * rhythm_scale
                        * dist_scale
                        * dist_scale;
                }

                // Repeated wide angles are penalized less the more acute the last angle
                wide_angle_bonus *= angle_bonus
                    * (1.0 - wide_angle_bonus.min(Self::calc_wide_angle_bonus(last_angle).powi(3)));

                // Repeated acute angles are penalized less the more obtuse the angle before
                acute_angle_bonus *= 0.5
                    + 0.5
                        * (1.0
                            - acute_angle_bonus
                                .min(Self::calc_acute_angle_bonus(last_last_angle).powi(3)));
            }
        }

        if prev_vel.max(curr_vel).abs() > f64::EPSILON {
            // Average velocities over whole objects
            prev_vel = (last.lazy_jump_dist + last_last.travel_dist) / last.strain_time;
            curr_vel = (curr.lazy_jump_dist + last.travel_dist) / curr.strain_time;

            let vel_diff = (prev_vel - curr_vel).abs();
            let dist_ratio = (FRAC_PI_2 * vel_diff / prev_vel.max(curr_vel))
                .sin()
                .powi(2);

            let overlap_vel_buff =
                (125.0 / curr.strain_time.min(last.strain_time)).min(vel_diff);

            vel_change_bonus = overlap_vel_buff * dist_ratio;

            let rhythm_ratio = curr.strain_time.min(last.strain_time)
                / curr.strain_time.max(last.strain_time);
            vel_change_bonus *= rhythm_ratio * rhythm_ratio;
        }

        if last.base.is_slider() {
            slider_bonus = last.travel_dist / last.travel_time;
        }

        aim_strain += (acute_angle_bonus * Self::ACUTE_ANGLE_MULTIPLIER).max(
            wide_angle_bonus * Self::WIDE_ANGLE_MULTIPLIER
                + vel_change_bonus * Self::VELOCITY_CHANGE_MULTIPLIER,
        );

        if with_sliders {
            aim_strain += slider_bonus * Self::SLIDER_MULTIPLIER;
        }

        aim_strain
    }

    fn calc_wide_angle_bonus(angle: f64) -> f64 {
        let clamped = angle.clamp(PI / 6.0, 5.0 / 6.0 * PI);

        (3.0 / 4.0 * (clamped - PI / 6.0)).sin().powi(2)
    }

    fn calc_acute_angle_bonus(angle: f64) -> f64 {
        1.0 - Self::calc_wide_angle_bonus(angle)
    }
}
