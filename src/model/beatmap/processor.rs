use crate::model::hit_object::{HitObject, HitObjectKind};

use super::Beatmap;

const STACK_DISTANCE: f32 = 3.0;

/// Compute velocity, ticks, samples, and scale of every hit object.
pub(crate) fn apply_defaults(map: &mut Beatmap) {
    for h in map.hit_objects.iter_mut() {
        h.apply_defaults(&map.control_points, &map.difficulty);
    }
}

/// Recompute stack heights from scratch.
///
/// Idempotent for the same approach rate, stack leniency, and objects.
pub(crate) fn apply_stacking(map: &mut Beatmap) {
    for h in map.hit_objects.iter_mut() {
        h.stack_height = 0;
    }

    let stack_threshold = map.difficulty.preempt() * f64::from(map.general.stack_leniency);

    if map.version >= 6 {
        stacking(&mut map.hit_objects, stack_threshold);
    } else {
        old_stacking(&mut map.hit_objects, stack_threshold);
    }
}

fn stacking(hit_objects: &mut [HitObject], stack_threshold: f64) {
    let Some(end_idx) = hit_objects.len().checked_sub(1) else {
        return;
    };

    for i in (1..=end_idx).rev() {
        let mut n = i;
        let mut obj_i_idx = i;

        // Objects that already received a stack height were handled by a
        // later object's pass.
        if hit_objects[obj_i_idx].stack_height != 0 || hit_objects[obj_i_idx].is_spinner() {
            continue;
        }

        if hit_objects[obj_i_idx].is_circle() {
            while let Some(prev) = n.checked_sub(1) {
                n = prev;

                if hit_objects[n].is_spinner() {
                    continue;
                }

                if hit_objects[obj_i_idx].start_time - hit_objects[n].end_time() > stack_threshold
                {
                    break;
                }

                // Circles under the end of a slider are stacked downwards
                let n_end_pos = hit_objects[n].end_pos();

                if hit_objects[n].is_slider()
                    && n_end_pos.distance(hit_objects[obj_i_idx].pos) < STACK_DISTANCE
                {
                    let offset =
                        hit_objects[obj_i_idx].stack_height - hit_objects[n].stack_height + 1;

                    for j in n + 1..=i {
                        if n_end_pos.distance(hit_objects[j].pos) < STACK_DISTANCE {
                            hit_objects[j].stack_height -= offset;
                        }
                    }

                    // The slider itself is handled in the outer loop
                    break;
                }

                if hit_objects[n].pos.distance(hit_objects[obj_i_idx].pos) < STACK_DISTANCE {
                    hit_objects[n].stack_height = hit_objects[obj_i_idx].stack_height + 1;
                    obj_i_idx = n;
                }
            }
        } else if hit_objects[obj_i_idx].is_slider() {
            // From the first slider of a stack on, stacking is always upwards
            while let Some(prev) = n.checked_sub(1) {
                n = prev;

                if hit_objects[n].is_spinner() {
                    continue;
                }

                if hit_objects[obj_i_idx].start_time - hit_objects[n].start_time > stack_threshold
                {
                    break;
                }

                if hit_objects[n].end_pos().distance(hit_objects[obj_i_idx].pos) < STACK_DISTANCE {
                    hit_objects[n].stack_height = hit_objects[obj_i_idx].stack_height + 1;
                    obj_i_idx = n;
                }
            }
        }
    }
}

/// Stacking for format versions below 6.
fn old_stacking(hit_objects: &mut [HitObject], stack_threshold: f64) {
    for i in 0..hit_objects.len() {
        if hit_objects[i].stack_height != 0 && !hit_objects[i].is_slider() {
            continue;
        }

        let mut start_time = hit_objects[i].end_time();

        // The end of the path rather than the end of the slider
        let path_end_pos = match hit_objects[i].kind {
            HitObjectKind::Slider(ref slider) => hit_objects[i].pos + slider.path().position_at(1.0),
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => hit_objects[i].pos,
        };

        let mut slider_stack = 0;

        for j in i + 1..hit_objects.len() {
            if hit_objects[j].start_time - stack_threshold > start_time {
                break;
            }

            // Compares against `start_time` rather than `end_time` of `j`
            // since the legacy client didn't compute the inner object's end.
            if hit_objects[j].pos.distance(hit_objects[i].pos) < STACK_DISTANCE {
                hit_objects[i].stack_height += 1;
                start_time = hit_objects[j].start_time;
            } else if hit_objects[j].pos.distance(path_end_pos) < STACK_DISTANCE {
                slider_stack += 1;
                hit_objects[j].stack_height -= slider_stack;
                start_time = hit_objects[j].start_time;
            }
        }
    }
}
