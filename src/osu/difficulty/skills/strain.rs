use crate::osu::difficulty::object::OsuDifficultyObject;

pub(crate) const SECTION_LEN: f64 = 400.0;

pub(crate) fn strain_decay(ms: f64, strain_decay_base: f64) -> f64 {
    strain_decay_base.powf(ms / 1000.0)
}

/// Peak strains of fixed-length time sections.
#[derive(Clone, Debug, Default)]
pub(crate) struct StrainSections {
    peaks: Vec<f64>,
    curr_section_peak: f64,
    curr_section_end: f64,
}

impl StrainSections {
    /// All saved peaks plus the one of the section in progress.
    pub(crate) fn curr_strain_peaks(&self) -> Vec<f64> {
        let mut peaks = Vec::with_capacity(self.peaks.len() + 1);
        peaks.extend_from_slice(&self.peaks);
        peaks.push(self.curr_section_peak);

        peaks
    }
}

pub(crate) trait StrainSkill {
    const DECAY_WEIGHT: f64 = 0.9;

    fn sections(&self) -> &StrainSections;
    fn sections_mut(&mut self) -> &mut StrainSections;

    fn strain_value_at(
        &mut self,
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
    ) -> f64;

    fn calculate_initial_strain(
        &self,
        time: f64,
        curr: &OsuDifficultyObject<'_>,
        diff_objects: &[OsuDifficultyObject<'_>],
    ) -> f64;

    fn difficulty_value(&self) -> f64;

    fn process(&mut self, curr: &OsuDifficultyObject<'_>, diff_objects: &[OsuDifficultyObject<'_>]) {
        // The first object doesn't generate a strain so the first section ends right after it
        if curr.idx == 0 {
            self.sections_mut().curr_section_end =
                (curr.start_time / SECTION_LEN).ceil() * SECTION_LEN;
        }

        while curr.start_time > self.sections().curr_section_end {
            let section_end = self.sections().curr_section_end;
            let initial_strain = self.calculate_initial_strain(section_end, curr, diff_objects);

            let sections = self.sections_mut();
            sections.peaks.push(sections.curr_section_peak);
            sections.curr_section_peak = initial_strain;
            sections.curr_section_end += SECTION_LEN;

            // A zero peak can't decay further so skip ahead
            if sections.curr_section_peak <= f64::EPSILON
                && curr.start_time > sections.curr_section_end
            {
                let remaining_time = curr.start_time - sections.curr_section_end;
                let remaining_sections = (remaining_time / SECTION_LEN).ceil();
                sections.curr_section_end += remaining_sections * SECTION_LEN;
            }
        }

        let strain = self.strain_value_at(curr, diff_objects);
        let sections = self.sections_mut();
        sections.curr_section_peak = sections.curr_section_peak.max(strain);
    }
}

pub(crate) trait OsuStrainSkill: StrainSkill {
    const REDUCED_SECTION_COUNT: usize = 10;
    const REDUCED_STRAIN_BASELINE: f64 = 0.75;
    const DIFFICULTY_MULTIPLIER: f64 = 1.06;

    fn osu_difficulty_value(&self) -> f64 {
        let peaks = self.sections().curr_strain_peaks();

        weighted_peak_sum(
            peaks,
            Self::REDUCED_SECTION_COUNT,
            Self::REDUCED_STRAIN_BASELINE,
            Self::DECAY_WEIGHT,
        ) * Self::DIFFICULTY_MULTIPLIER
    }
}

/// Scale down the highest peaks, then sum up all peaks with geometrically
/// decreasing weights from highest to lowest.
fn weighted_peak_sum(
    mut peaks: Vec<f64>,
    reduced_section_count: usize,
    reduced_strain_baseline: f64,
    decay_weight: f64,
) -> f64 {
    // Empty sections don't contribute
    peaks.retain(|&peak| peak > 0.0);
    peaks.sort_unstable_by(|a, b| b.total_cmp(a));

    for (i, strain) in peaks.iter_mut().take(reduced_section_count).enumerate() {
        let clamped = (i as f64 / reduced_section_count as f64).clamp(0.0, 1.0);
        let scale = lerp(1.0, 10.0, clamped).log10();
        *strain *= lerp(reduced_strain_baseline, 1.0, scale);
    }

    peaks.sort_unstable_by(|a, b| b.total_cmp(a));

    let mut difficulty = 0.0;
    let mut weight = 1.0;

    for strain in peaks {
        difficulty += strain * weight;
        weight *= decay_weight;
    }

    difficulty
}

pub(crate) fn lerp(start: f64, end: f64, amount: f64) -> f64 {
    start + (end - start) * amount
}
