use crate::{
    model::mods::GameMods,
    osu::{
        attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
        score_state::{accuracy, OsuScoreState},
    },
};

use self::calculator::{calculate_effective_misses, OsuPerformanceCalculator};

pub(crate) use self::calculator::PERFORMANCE_BASE_MULTIPLIER;

mod calculator;

/// Performance calculator on osu!standard charts.
///
/// Without any hit results, a perfect play is assumed.
///
/// # Example
///
/// ```
/// use beatmap_pp::{OsuDifficultyAttributes, OsuPerformance};
///
/// # /*
/// let attrs: OsuDifficultyAttributes = ...
/// # */
/// # let attrs = OsuDifficultyAttributes::default();
///
/// let perf = OsuPerformance::new(attrs)
///     .accuracy(98.5)
///     .misses(1)
///     .combo(400)
///     .calculate();
///
/// println!("PP: {}", perf.pp);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub struct OsuPerformance {
    attrs: OsuDifficultyAttributes,
    mods: Option<GameMods>,
    acc: Option<f64>,
    combo: Option<u32>,
    n300: Option<u32>,
    n100: Option<u32>,
    n50: Option<u32>,
    misses: Option<u32>,
}

impl OsuPerformance {
    /// Create a new performance calculator from the result of a difficulty
    /// calculation.
    pub const fn new(attrs: OsuDifficultyAttributes) -> Self {
        Self {
            attrs,
            mods: None,
            acc: None,
            combo: None,
            n300: None,
            n100: None,
            n50: None,
            misses: None,
        }
    }

    /// Specify the mods of the play.
    ///
    /// Defaults to the mods of the difficulty attributes. Mods that affect
    /// difficulty should match those of the attributes.
    pub const fn mods(mut self, mods: GameMods) -> Self {
        self.mods = Some(mods);

        self
    }

    /// Specify the max combo of the play.
    pub const fn combo(mut self, combo: u32) -> Self {
        self.combo = Some(combo);

        self
    }

    /// Specify the amount of 300s of a play.
    pub const fn n300(mut self, n300: u32) -> Self {
        self.n300 = Some(n300);

        self
    }

    /// Specify the amount of 100s of a play.
    pub const fn n100(mut self, n100: u32) -> Self {
        self.n100 = Some(n100);

        self
    }

    /// Specify the amount of 50s of a play.
    pub const fn n50(mut self, n50: u32) -> Self {
        self.n50 = Some(n50);

        self
    }

    /// Specify the amount of misses of a play.
    pub const fn misses(mut self, misses: u32) -> Self {
        self.misses = Some(misses);

        self
    }

    /// Provide all hit results and the combo through an [`OsuScoreState`].
    pub const fn state(mut self, state: OsuScoreState) -> Self {
        let OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        } = state;

        self.combo = Some(max_combo);
        self.n300 = Some(n300);
        self.n100 = Some(n100);
        self.n50 = Some(n50);
        self.misses = Some(misses);

        self
    }

    /// Specify the accuracy of a play between `0.0` and `100.0`.
    /// This will be used to generate matching hit results.
    pub fn accuracy(mut self, acc: f64) -> Self {
        self.acc = Some(acc.clamp(0.0, 100.0) / 100.0);

        self
    }

    /// Create the [`OsuScoreState`] that will be used for performance calculation.
    ///
    /// Missing hit results are filled up with the best possible ones that
    /// still match the accuracy, if given.
    pub fn generate_state(&self) -> OsuScoreState {
        let n_objects = self.attrs.n_objects();

        let misses = self.misses.map_or(0, |n| n.min(n_objects));
        let n_remaining = n_objects - misses;

        let mut n300 = self.n300.map_or(0, |n| n.min(n_remaining));
        let mut n100 = self.n100.map_or(0, |n| n.min(n_remaining));
        let mut n50 = self.n50.map_or(0, |n| n.min(n_remaining));

        if let Some(acc) = self.acc {
            let target_total = acc * f64::from(6 * n_objects);

            match (self.n300, self.n100, self.n50) {
                (Some(_), Some(_), Some(_)) => {
                    n300 += n_objects.saturating_sub(n300 + n100 + n50 + misses);
                }
                (Some(_), Some(_), None) => n50 = n_objects.saturating_sub(n300 + n100 + misses),
                (Some(_), None, Some(_)) => n100 = n_objects.saturating_sub(n300 + n50 + misses),
                (None, Some(_), Some(_)) => n300 = n_objects.saturating_sub(n100 + n50 + misses),
                (Some(_), None, None) => {
                    let n_remaining = n_remaining - n300;

                    let raw_n100 = target_total - f64::from(n_remaining + 6 * n300);
                    let (min_n100, max_n100) = candidates(raw_n100, n_remaining);

                    (n100, n50) = closest((min_n100..=max_n100).map(|new100| {
                        let new50 = n_remaining - new100;

                        (accuracy(n300, new100, new50, misses), (new100, new50))
                    }), acc)
                    .unwrap_or((n100, n50));
                }
                (None, Some(_), None) => {
                    let n_remaining = n_remaining - n100;

                    let raw_n300 = (target_total - f64::from(n_remaining + 2 * n100)) / 5.0;
                    let (min_n300, max_n300) = candidates(raw_n300, n_remaining);

                    (n300, n50) = closest((min_n300..=max_n300).map(|new300| {
                        let new50 = n_remaining - new300;

                        (accuracy(new300, n100, new50, misses), (new300, new50))
                    }), acc)
                    .unwrap_or((n300, n50));
                }
                (None, None, Some(_)) => {
                    let n_remaining = n_remaining - n50;

                    let raw_n300 = (target_total + f64::from(2 * misses + n50)
                        - f64::from(2 * n_objects))
                        / 4.0;
                    let (min_n300, max_n300) = candidates(raw_n300, n_remaining);

                    (n300, n100) = closest((min_n300..=max_n300).map(|new300| {
                        let new100 = n_remaining - new300;

                        (accuracy(new300, new100, n50, misses), (new300, new100))
                    }), acc)
                    .unwrap_or((n300, n100));
                }
                (None, None, None) => {
                    // 300s and 100s down to a third of the points, then 100s
                    // and 50s. Every count moves one way as accuracy rises.
                    let raw_n300 = (target_total - f64::from(2 * n_remaining)) / 4.0;

                    if raw_n300 >= 0.0 {
                        n300 = n_remaining.min(raw_n300.round() as u32);
                        n100 = n_remaining - n300;
                        n50 = 0;
                    } else {
                        let raw_n100 = (target_total - f64::from(n_remaining)).max(0.0);

                        n300 = 0;
                        n100 = n_remaining.min(raw_n100.round() as u32);
                        n50 = n_remaining - n100;
                    }
                }
            }
        } else {
            let remaining = n_objects.saturating_sub(n300 + n100 + n50 + misses);

            match (self.n300, self.n100, self.n50) {
                (None, ..) => n300 = remaining,
                (_, None, _) => n100 = remaining,
                (.., None) => n50 = remaining,
                _ => n300 += remaining,
            }
        }

        let max_possible_combo = self.attrs.max_combo.saturating_sub(misses);

        let max_combo = self
            .combo
            .map_or(max_possible_combo, |combo| combo.min(max_possible_combo));

        OsuScoreState {
            max_combo,
            n300,
            n100,
            n50,
            misses,
        }
    }

    /// Calculate all performance related values, including pp and stars.
    pub fn calculate(self) -> OsuPerformanceAttributes {
        let state = self.generate_state();
        let mods = self.mods.unwrap_or(self.attrs.mods);

        log_trace!(
            n300 = state.n300,
            n100 = state.n100,
            n50 = state.n50,
            misses = state.misses,
            combo = state.max_combo,
            "calculating performance"
        );

        OsuPerformanceCalculator::new(self.attrs, mods, state).calculate()
    }

    /// Misses plus an estimation of slider breaks for the current state.
    pub fn effective_miss_count(&self) -> f64 {
        calculate_effective_misses(&self.attrs, &self.generate_state())
    }
}

impl From<OsuDifficultyAttributes> for OsuPerformance {
    fn from(attrs: OsuDifficultyAttributes) -> Self {
        Self::new(attrs)
    }
}

impl From<OsuPerformanceAttributes> for OsuPerformance {
    fn from(attrs: OsuPerformanceAttributes) -> Self {
        Self::new(attrs.difficulty)
    }
}

/// Lower and upper integer bounds around `raw`, capped at `max`.
fn candidates(raw: f64, max: u32) -> (u32, u32) {
    let raw = raw.max(0.0);

    (max.min(raw.floor() as u32), max.min(raw.ceil() as u32))
}

/// The hit results whose accuracy is closest to `acc`, preferring earlier ones.
fn closest<T>(fits: impl Iterator<Item = (f64, T)>, acc: f64) -> Option<T> {
    let mut best: Option<(f64, T)> = None;

    for (fit_acc, fit) in fits {
        let dist = (acc - fit_acc).abs();

        if best.as_ref().map_or(true, |(best_dist, _)| dist < *best_dist) {
            best = Some((dist, fit));
        }
    }

    best.map(|(_, fit)| fit)
}
