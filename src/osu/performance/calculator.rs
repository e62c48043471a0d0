use crate::{
    model::mods::{GameMods, Mod},
    osu::{OsuDifficultyAttributes, OsuPerformanceAttributes, OsuScoreState},
};

/// Scales the final pp value.
pub(crate) const PERFORMANCE_BASE_MULTIPLIER: f64 = 1.14;

pub(super) struct OsuPerformanceCalculator {
    attrs: OsuDifficultyAttributes,
    mods: GameMods,
    acc: f64,
    state: OsuScoreState,
    effective_miss_count: f64,
}

impl OsuPerformanceCalculator {
    pub(super) fn new(attrs: OsuDifficultyAttributes, mods: GameMods, state: OsuScoreState) -> Self {
        let total_hits = attrs.n_objects();

        let acc = if total_hits == 0 {
            0.0
        } else {
            f64::from(6 * state.n300 + 2 * state.n100 + state.n50) / f64::from(6 * total_hits)
        };

        let effective_miss_count = calculate_effective_misses(&attrs, &state);

        Self {
            attrs,
            mods,
            acc,
            state,
            effective_miss_count,
        }
    }

    pub(super) fn calculate(mut self) -> OsuPerformanceAttributes {
        let total_hits = self.attrs.n_objects();

        if total_hits == 0 {
            return OsuPerformanceAttributes {
                difficulty: self.attrs,
                ..Default::default()
            };
        }

        let total_hits = f64::from(total_hits);

        let mut multiplier = PERFORMANCE_BASE_MULTIPLIER;

        if self.mods.contains(Mod::NoFail) {
            multiplier *= (1.0 - 0.02 * self.effective_miss_count).max(0.9);
        }

        if self.mods.contains(Mod::Relax) {
            let od = self.attrs.od;

            // The great hit window closes at OD 13.33
            let (n100_mult, n50_mult) = if od > 0.0 {
                (
                    (1.0 - (od / 13.33).powf(1.8)).max(0.0),
                    (1.0 - (od / 13.33).powf(5.0)).max(0.0),
                )
            } else {
                (1.0, 1.0)
            };

            // Ok and meh hits on relax are likely combo breaks
            self.effective_miss_count = (self.effective_miss_count
                + f64::from(self.state.n100) * n100_mult
                + f64::from(self.state.n50) * n50_mult)
                .min(total_hits);
        }

        let aim_value = self.compute_aim_value(total_hits);
        let speed_value = self.compute_speed_value(total_hits);
        let acc_value = self.compute_accuracy_value();
        let flashlight_value = self.compute_flashlight_value(total_hits);

        let pp = (aim_value.powf(1.1)
            + speed_value.powf(1.1)
            + acc_value.powf(1.1)
            + flashlight_value.powf(1.1))
        .powf(1.0 / 1.1)
            * multiplier;

        OsuPerformanceAttributes {
            difficulty: self.attrs,
            pp,
            pp_acc: acc_value,
            pp_aim: aim_value,
            pp_flashlight: flashlight_value,
            pp_speed: speed_value,
            effective_miss_count: self.effective_miss_count,
        }
    }

    fn compute_aim_value(&self, total_hits: f64) -> f64 {
        let mut aim_value = difficulty_to_performance(self.attrs.aim);

        let len_bonus = length_bonus(total_hits);
        aim_value *= len_bonus;

        // Any amount of misses reduces the value by at least 3%
        if self.effective_miss_count > 0.0 {
            aim_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count);
        }

        aim_value *= self.combo_scaling_factor();

        let ar = self.attrs.ar;

        if !self.mods.contains(Mod::Relax) {
            let ar_factor = if ar > 10.33 {
                0.3 * (ar - 10.33)
            } else if ar < 8.0 {
                0.05 * (8.0 - ar)
            } else {
                0.0
            };

            aim_value *= 1.0 + ar_factor * len_bonus;
        }

        // Lower approach rates are harder to aim with hidden
        if self.mods.contains(Mod::Hidden) {
            aim_value *= 1.0 + 0.04 * (12.0 - ar);
        }

        // Assume 15% of sliders are difficult
        let estimate_diff_sliders = f64::from(self.attrs.n_sliders) * 0.15;

        if estimate_diff_sliders > 0.0 {
            let n_imperfect = self.state.n100 + self.state.n50 + self.state.misses;
            let combo_diff = self.attrs.max_combo.saturating_sub(self.state.max_combo);

            let estimate_slider_ends_dropped =
                f64::from(n_imperfect.min(combo_diff)).clamp(0.0, estimate_diff_sliders);

            let slider_factor = self.attrs.slider_factor;

            let slider_nerf_factor = (1.0 - slider_factor)
                * (1.0 - estimate_slider_ends_dropped / estimate_diff_sliders).powi(3)
                + slider_factor;

            aim_value *= slider_nerf_factor;
        }

        aim_value *= self.acc;
        aim_value *= 0.98 + self.attrs.od * self.attrs.od / 2500.0;

        aim_value
    }

    fn compute_speed_value(&self, total_hits: f64) -> f64 {
        if self.mods.contains(Mod::Relax) {
            return 0.0;
        }

        let mut speed_value = difficulty_to_performance(self.attrs.speed);

        let len_bonus = length_bonus(total_hits);
        speed_value *= len_bonus;

        if self.effective_miss_count > 0.0 {
            speed_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count.powf(0.875));
        }

        speed_value *= self.combo_scaling_factor();

        let ar = self.attrs.ar;

        if ar > 10.33 {
            speed_value *= 1.0 + 0.3 * (ar - 10.33) * len_bonus;
        }

        if self.mods.contains(Mod::Hidden) {
            speed_value *= 1.0 + 0.04 * (12.0 - ar);
        }

        // Accuracy on the notes relevant for speed, assuming the worst case
        let speed_note_count = self.attrs.speed_note_count;
        let n300 = f64::from(self.state.n300);
        let n100 = f64::from(self.state.n100);
        let n50 = f64::from(self.state.n50);

        let relevant_total_diff = total_hits - speed_note_count;
        let relevant_n300 = (n300 - relevant_total_diff).max(0.0);
        let relevant_n100 = (n100 - (relevant_total_diff - n300).max(0.0)).max(0.0);
        let relevant_n50 = (n50 - (relevant_total_diff - n300 - n100).max(0.0)).max(0.0);

        let relevant_acc = if speed_note_count == 0.0 {
            0.0
        } else {
            (relevant_n300 * 6.0 + relevant_n100 * 2.0 + relevant_n50) / (speed_note_count * 6.0)
        };

        let od = self.attrs.od;

        speed_value *= (0.95 + od * od / 750.0)
            * ((self.acc + relevant_acc) / 2.0).powf((14.5 - od.max(8.0)) / 2.0);

        // Many 50s indicate double-tapping
        speed_value *= 0.99_f64.powf((n50 - total_hits / 500.0).max(0.0));

        speed_value
    }

    fn compute_accuracy_value(&self) -> f64 {
        if self.mods.contains(Mod::Relax) {
            return 0.0;
        }

        // Only circles are considered since they're the only objects with a timing window
        let n_circles = self.attrs.n_circles;
        let total_hits = self.attrs.n_objects();

        let better_acc_percentage = if n_circles > 0 {
            let n300 = f64::from(self.state.n300) - f64::from(total_hits - n_circles);
            let numerator = n300 * 6.0 + f64::from(self.state.n100 * 2 + self.state.n50);

            (numerator / f64::from(n_circles * 6)).max(0.0)
        } else {
            0.0
        };

        let mut acc_value =
            1.52163_f64.powf(self.attrs.od) * better_acc_percentage.powi(24) * 2.83;

        // Long maps with many circles are harder to keep accurate
        acc_value *= (f64::from(n_circles) / 1000.0).powf(0.3).min(1.15);

        if self.mods.contains(Mod::Hidden) {
            acc_value *= 1.08;
        }

        if self.mods.contains(Mod::Flashlight) {
            acc_value *= 1.02;
        }

        acc_value
    }

    fn compute_flashlight_value(&self, total_hits: f64) -> f64 {
        if !self.mods.contains(Mod::Flashlight) {
            return 0.0;
        }

        let mut flashlight_value = self.attrs.flashlight * self.attrs.flashlight * 25.0;

        if self.effective_miss_count > 0.0 {
            flashlight_value *= 0.97
                * (1.0 - (self.effective_miss_count / total_hits).powf(0.775))
                    .powf(self.effective_miss_count.powf(0.875));
        }

        flashlight_value *= self.combo_scaling_factor();

        // Short maps show a larger share of the smaller flashlight radii
        flashlight_value *= 0.7
            + 0.1 * (total_hits / 200.0).min(1.0)
            + if total_hits > 200.0 {
                0.2 * ((total_hits - 200.0) / 200.0).min(1.0)
            } else {
                0.0
            };

        flashlight_value *= 0.5 + self.acc / 2.0;
        flashlight_value *= 0.98 + self.attrs.od * self.attrs.od / 2500.0;

        flashlight_value
    }

    fn combo_scaling_factor(&self) -> f64 {
        if self.attrs.max_combo == 0 {
            0.0
        } else {
            (f64::from(self.state.max_combo) / f64::from(self.attrs.max_combo))
                .powf(0.8)
                .min(1.0)
        }
    }
}

/// Misses plus an estimation of slider breaks based on the combo.
pub(super) fn calculate_effective_misses(
    attrs: &OsuDifficultyAttributes,
    state: &OsuScoreState,
) -> f64 {
    let mut combo_based_miss_count = 0.0;

    if attrs.n_sliders > 0 {
        let full_combo_threshold = f64::from(attrs.max_combo) - 0.1 * f64::from(attrs.n_sliders);

        if f64::from(state.max_combo) < full_combo_threshold {
            // At most as many breaks as non-perfect hits
            combo_based_miss_count = (full_combo_threshold / f64::from(state.max_combo.max(1)))
                .min(f64::from(state.n100 + state.n50 + state.misses));
        }
    }

    combo_based_miss_count.max(f64::from(state.misses))
}

fn difficulty_to_performance(difficulty: f64) -> f64 {
    (5.0 * (difficulty / 0.0675).max(1.0) - 4.0).powi(3) / 100_000.0
}

fn length_bonus(total_hits: f64) -> f64 {
    0.95 + 0.4 * (total_hits / 2000.0).min(1.0)
        + if total_hits > 2000.0 {
            (total_hits / 2000.0).log10() * 0.5
        } else {
            0.0
        }
}
