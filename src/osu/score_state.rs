/// Hit results and combo of a play.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct OsuScoreState {
    /// Highest combo reached during the play, at most the chart's max combo.
    pub max_combo: u32,
    pub n300: u32,
    pub n100: u32,
    pub n50: u32,
    pub misses: u32,
}

impl OsuScoreState {
    pub const fn new() -> Self {
        Self {
            max_combo: 0,
            n300: 0,
            n100: 0,
            n50: 0,
            misses: 0,
        }
    }

    /// All judged objects, misses included.
    pub const fn total_hits(&self) -> u32 {
        self.n300 + self.n100 + self.n50 + self.misses
    }

    /// Accuracy between `0.0` and `1.0`.
    pub fn accuracy(&self) -> f64 {
        accuracy(self.n300, self.n100, self.n50, self.misses)
    }
}

pub(crate) fn accuracy(n300: u32, n100: u32, n50: u32, misses: u32) -> f64 {
    let total_hits = n300 + n100 + n50 + misses;

    if total_hits == 0 {
        return 0.0;
    }

    let numerator = 6 * n300 + 2 * n100 + n50;
    let denominator = 6 * total_hits;

    f64::from(numerator) / f64::from(denominator)
}
