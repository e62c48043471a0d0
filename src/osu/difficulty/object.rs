use crate::model::{
    hit_object::{HitObject, HitObjectKind, Slider},
    pos2::Pos2,
};

use super::scaling_factor::ScalingFactor;

const HD_FADE_OUT_DURATION_MULTIPLIER: f64 = 0.3;

/// The path a cursor takes when lazily following a slider.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct LazySlider {
    /// Stacked end position of the cursor.
    pub end_pos: Pos2,
    pub travel_dist: f32,
    pub travel_time: f64,
}

impl LazySlider {
    pub(crate) fn new(h: &HitObject, slider: &Slider, radius: f64) -> Self {
        let nested = slider.nested_objects();
        let stacked_pos = h.stacked_pos();

        let travel_time = nested.last().map_or(0.0, |tail| tail.time);

        let mut end_time_min = travel_time / slider.span_duration();

        if !end_time_min.is_finite() {
            end_time_min = 0.0;
        } else if end_time_min % 2.0 >= 1.0 {
            end_time_min = 1.0 - end_time_min % 1.0;
        } else {
            end_time_min %= 1.0;
        }

        let mut lazy = Self {
            end_pos: stacked_pos + slider.path().position_at(end_time_min),
            travel_dist: 0.0,
            travel_time,
        };

        let mut curr_cursor_pos = stacked_pos;
        let scaling_factor = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS) / radius;

        for (i, curr_movement_obj) in nested.iter().enumerate().skip(1) {
            let is_last = i == nested.len() - 1;

            let mut curr_movement = stacked_pos + curr_movement_obj.pos - curr_cursor_pos;
            let mut curr_movement_len = scaling_factor * f64::from(curr_movement.length());

            let mut required_movement = f64::from(OsuDifficultyObject::ASSUMED_SLIDER_RADIUS);

            if is_last {
                let lazy_movement = lazy.end_pos - curr_cursor_pos;

                if lazy_movement.length() < curr_movement.length() {
                    curr_movement = lazy_movement;
                }

                curr_movement_len = scaling_factor * f64::from(curr_movement.length());
            } else if curr_movement_obj.is_repeat() {
                required_movement = f64::from(OsuDifficultyObject::NORMALIZED_RADIUS);
            }

            if curr_movement_len > required_movement {
                let factor = (curr_movement_len - required_movement) / curr_movement_len;
                curr_cursor_pos += curr_movement * factor as f32;
                curr_movement_len *= factor;
                lazy.travel_dist += curr_movement_len as f32;
            }

            if is_last {
                lazy.end_pos = curr_cursor_pos;
            }
        }

        // Bonus for repeat sliders
        lazy.travel_dist *= ((1.0 + slider.repeat_count() as f64 / 2.5).powf(1.0 / 2.5)) as f32;

        lazy
    }
}

/// A hit object together with information about its predecessors.
///
/// Difficulty objects are stored in one slice and refer to each other by index.
pub(crate) struct OsuDifficultyObject<'a> {
    pub idx: usize,
    pub base: &'a HitObject,
    pub lazy_slider: Option<LazySlider>,
    pub start_time: f64,
    pub end_time: f64,
    pub delta_time: f64,
    pub strain_time: f64,

    pub lazy_jump_dist: f64,
    pub min_jump_dist: f64,
    pub min_jump_time: f64,
    pub travel_dist: f64,
    pub travel_time: f64,
    pub angle: Option<f64>,

    time_preempt: f64,
    time_fade_in: f64,
}

/// Values shared by all difficulty objects of a calculation.
pub(crate) struct ObjectSettings<'s> {
    pub clock_rate: f64,
    pub scaling_factor: &'s ScalingFactor,
    /// Preempt in the chart's time, i.e. not adjusted by the clock rate.
    pub time_preempt: f64,
    pub time_fade_in: f64,
}

impl<'a> OsuDifficultyObject<'a> {
    pub const NORMALIZED_RADIUS: i32 = 50;
    pub const NORMALIZED_DIAMETER: i32 = Self::NORMALIZED_RADIUS * 2;

    pub const MIN_DELTA_TIME: f64 = 25.0;
    const MAX_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 2.4;
    const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 1.8;

    /// One difficulty object for every hit object but the first.
    pub(crate) fn create(hit_objects: &'a [HitObject], settings: &ObjectSettings<'_>) -> Vec<Self> {
        let lazy_sliders: Vec<_> = hit_objects
            .iter()
            .map(|h| match h.kind {
                HitObjectKind::Slider(ref slider) => Some(LazySlider::new(
                    h,
                    slider,
                    settings.scaling_factor.radius,
                )),
                HitObjectKind::Circle | HitObjectKind::Spinner(_) => None,
            })
            .collect();

        (1..hit_objects.len())
            .map(|i| {
                let last_last = i
                    .checked_sub(2)
                    .map(|j| (&hit_objects[j], lazy_sliders[j]));

                Self::new(
                    (&hit_objects[i], lazy_sliders[i]),
                    (&hit_objects[i - 1], lazy_sliders[i - 1]),
                    last_last,
                    i - 1,
                    settings,
                )
            })
            .collect()
    }

    fn new(
        (hit_object, lazy_slider): (&'a HitObject, Option<LazySlider>),
        last: (&HitObject, Option<LazySlider>),
        last_last: Option<(&HitObject, Option<LazySlider>)>,
        idx: usize,
        settings: &ObjectSettings<'_>,
    ) -> Self {
        let clock_rate = settings.clock_rate;
        let delta_time = (hit_object.start_time - last.0.start_time) / clock_rate;
        let strain_time = delta_time.max(Self::MIN_DELTA_TIME);

        let mut this = Self {
            idx,
            base: hit_object,
            lazy_slider,
            start_time: hit_object.start_time / clock_rate,
            end_time: hit_object.end_time() / clock_rate,
            delta_time,
            strain_time,
            lazy_jump_dist: 0.0,
            min_jump_dist: 0.0,
            min_jump_time: 0.0,
            travel_dist: 0.0,
            travel_time: 0.0,
            angle: None,
            time_preempt: settings.time_preempt,
            time_fade_in: settings.time_fade_in,
        };

        this.set_distances(last, last_last, clock_rate, settings.scaling_factor);

        this
    }

    /// The difficulty object `backwards_idx + 1` steps before this one.
    pub(crate) fn previous<'o>(&self, backwards_idx: usize, objects: &'o [Self]) -> Option<&'o Self> {
        self.idx
            .checked_sub(backwards_idx + 1)
            .and_then(|idx| objects.get(idx))
    }

    /// The difficulty object `forwards_idx + 1` steps after this one.
    pub(crate) fn next<'o>(&self, forwards_idx: usize, objects: &'o [Self]) -> Option<&'o Self> {
        objects.get(self.idx + forwards_idx + 1)
    }

    /// How visible this object is at the given time of the chart.
    pub(crate) fn opacity_at(&self, time: f64, hidden: bool) -> f64 {
        if time > self.base.start_time {
            // Consider a hit object as being invisible once its start time passed
            return 0.0;
        }

        let fade_in_start_time = self.base.start_time - self.time_preempt;
        let fade_in_duration = self.time_fade_in;
        let fade_in = ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0);

        if hidden {
            let fade_out_start_time = self.base.start_time - self.time_preempt + self.time_fade_in;
            let fade_out_duration = self.time_preempt * HD_FADE_OUT_DURATION_MULTIPLIER;

            fade_in.min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            fade_in
        }
    }

    fn set_distances(
        &mut self,
        (last_object, last_lazy): (&HitObject, Option<LazySlider>),
        last_last: Option<(&HitObject, Option<LazySlider>)>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) {
        if let Some(ref lazy) = self.lazy_slider {
            self.travel_dist = f64::from(lazy.travel_dist);
            self.travel_time = (lazy.travel_time / clock_rate).max(Self::MIN_DELTA_TIME);
        }

        if self.base.is_spinner() || last_object.is_spinner() {
            return;
        }

        let scaling_factor = scaling_factor.factor;
        let last_cursor_pos = end_cursor_pos(last_object, last_lazy);

        self.lazy_jump_dist = f64::from(
            (self.base.stacked_pos() * scaling_factor - last_cursor_pos * scaling_factor).length(),
        );
        self.min_jump_time = self.strain_time;
        self.min_jump_dist = self.lazy_jump_dist;

        if let Some(ref last_lazy) = last_lazy {
            let last_travel_time = (last_lazy.travel_time / clock_rate).max(Self::MIN_DELTA_TIME);
            self.min_jump_time = (self.strain_time - last_travel_time).max(Self::MIN_DELTA_TIME);

            let tail_jump_dist =
                (last_object.stacked_end_pos() - self.base.stacked_pos()).length() * scaling_factor;

            let diff = f64::from(Self::MAX_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS);
            let min = f64::from(tail_jump_dist - Self::MAX_SLIDER_RADIUS);
            self.min_jump_dist = (self.lazy_jump_dist - diff).min(min).max(0.0);
        }

        if let Some((last_last_object, last_last_lazy)) = last_last {
            if last_last_object.is_spinner() {
                return;
            }

            let last_last_cursor_pos = end_cursor_pos(last_last_object, last_last_lazy);

            let v1 = last_last_cursor_pos - last_object.stacked_pos();
            let v2 = self.base.stacked_pos() - last_cursor_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some(f64::from(det).atan2(f64::from(dot)).abs());
        }
    }
}

fn end_cursor_pos(h: &HitObject, lazy: Option<LazySlider>) -> Pos2 {
    lazy.map_or_else(|| h.stacked_pos(), |lazy| lazy.end_pos)
}
