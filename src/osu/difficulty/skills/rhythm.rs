use std::f64::consts::PI;

use crate::osu::difficulty::object::OsuDifficultyObject;

const HISTORY_TIME_MAX: f64 = 5000.0;
const HISTORY_OBJECTS_MAX: usize = 32;
const RHYTHM_MULTIPLIER: f64 = 0.75;
const MAX_ISLAND_SIZE: usize = 7;

/// Multiplier in `[1, ∞)` for the rhythmic complexity of the notes leading
/// up to `curr`.
pub(crate) fn evaluate_diff_of(
    curr: &OsuDifficultyObject<'_>,
    diff_objects: &[OsuDifficultyObject<'_>],
    great_window: f64,
) -> f64 {
    if curr.base.is_spinner() {
        return 0.0;
    }

    let mut prev_island_size = 0;
    let mut rhythm_complexity_sum = 0.0;
    let mut island_size = 1;
    let mut start_ratio = 0.0;
    let mut first_delta_switch = false;

    let historical_note_count = curr.idx.min(HISTORY_OBJECTS_MAX);

    let mut rhythm_start = 0;

    while rhythm_start + 2 < historical_note_count
        && curr
            .previous(rhythm_start, diff_objects)
            .is_some_and(|prev| curr.start_time - prev.start_time < HISTORY_TIME_MAX)
    {
        rhythm_start += 1;
    }

    for i in (1..=rhythm_start).rev() {
        let (Some(curr_obj), Some(prev_obj), Some(last_obj)) = (
            curr.previous(i - 1, diff_objects),
            curr.previous(i, diff_objects),
            curr.previous(i + 1, diff_objects),
        ) else {
            break;
        };

        // Scales from 0 in the past to 1 for now, limited either by time or by object count
        let curr_historical_decay = ((HISTORY_TIME_MAX - (curr.start_time - curr_obj.start_time))
            / HISTORY_TIME_MAX)
            .min((historical_note_count - i) as f64 / historical_note_count as f64);

        let curr_delta = curr_obj.strain_time;
        let prev_delta = prev_obj.strain_time;
        let last_delta = last_obj.strain_time;

        let delta_ratio = prev_delta.min(curr_delta) / prev_delta.max(curr_delta);
        let curr_ratio = 1.0 + 6.0 * (PI / delta_ratio).sin().powi(2).min(0.5);

        let window_penalty = (((prev_delta - curr_delta).abs() - great_window * 0.6)
            / (great_window * 0.6))
            .clamp(0.0, 1.0);

        let mut effective_ratio = window_penalty * curr_ratio;

        if first_delta_switch {
            if prev_delta <= 1.25 * curr_delta && prev_delta * 1.25 >= curr_delta {
                // Island keeps growing
                if island_size < MAX_ISLAND_SIZE {
                    island_size += 1;
                }
            } else {
                // Speed changes into a slider
                if curr_obj.base.is_slider() {
                    effective_ratio /= 8.0;
                }

                // Speed changes out of a slider
                if prev_obj.base.is_slider() {
                    effective_ratio /= 4.0;
                }

                // Same island size as before, e.g. triplet to triplet
                if prev_island_size == island_size {
                    effective_ratio /= 4.0;
                }

                // Same island parity as before, e.g. 2 to 4
                if prev_island_size % 2 == island_size % 2 {
                    effective_ratio /= 2.0;
                }

                // Speed already increased one note ago
                if last_delta > prev_delta + 10.0 && prev_delta > curr_delta + 10.0 {
                    effective_ratio /= 8.0;
                }

                rhythm_complexity_sum += (effective_ratio * start_ratio).sqrt()
                    * curr_historical_decay
                    * ((4 + island_size) as f64).sqrt()
                    / 2.0
                    * ((4 + prev_island_size) as f64).sqrt()
                    / 2.0;

                start_ratio = effective_ratio;
                prev_island_size = island_size;

                // Slowing down ends the island
                if prev_delta * 1.25 < curr_delta {
                    first_delta_switch = false;
                }

                island_size = 1;
            }
        } else if prev_delta > 1.25 * curr_delta {
            // Speeding up starts an island
            first_delta_switch = true;
            start_ratio = effective_ratio;
            island_size = 1;
        }
    }

    (4.0 + rhythm_complexity_sum * RHYTHM_MULTIPLIER).sqrt() / 2.0
}
