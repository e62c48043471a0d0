use std::sync::OnceLock;

use crate::model::{
    beatmap::BeatmapDifficulty,
    control_point::ControlPoints,
    path::SliderPath,
    pos2::Pos2,
};

use super::{
    nested::{NestedObject, NestedObjectKind},
    sample::HitSampleInfo,
    HasDuration,
};

/// A slider's expanded state.
///
/// Nested objects and the end position are computed lazily and cached; every
/// setter touching the path, velocity, or repeat count drops both caches.
#[derive(Clone, Debug, PartialEq)]
pub struct Slider {
    path: SliderPath,
    repeat_count: usize,
    velocity: f64,
    tick_distance: f64,
    tick_distance_multiplier: f64,
    generate_ticks: bool,
    /// Samples per node: the head, each repeat, then the tail.
    pub node_samples: Vec<Vec<HitSampleInfo>>,
    nested: OnceLock<Vec<NestedObject>>,
    end_offset: OnceLock<Pos2>,
}

impl Slider {
    pub const LEGACY_LAST_TICK_OFFSET: f64 = 36.0;
    pub const BASE_SCORING_DISTANCE: f64 = 100.0;
    /// Node samples look up sample points this far past the node's time.
    pub const CONTROL_POINT_LENIENCY: f64 = 5.0;

    /// Sliders longer than this don't generate ticks.
    const MAX_LEN: f64 = 100_000.0;

    /// Create a new slider. A negative repeat count is treated as zero.
    pub fn new(path: SliderPath, repeat_count: i32, node_samples: Vec<Vec<HitSampleInfo>>) -> Self {
        Self {
            path,
            repeat_count: repeat_count.max(0) as usize,
            velocity: 1.0,
            tick_distance: 0.0,
            tick_distance_multiplier: 1.0,
            generate_ticks: true,
            node_samples,
            nested: OnceLock::new(),
            end_offset: OnceLock::new(),
        }
    }

    pub const fn path(&self) -> &SliderPath {
        &self.path
    }

    pub fn set_path(&mut self, path: SliderPath) {
        self.path = path;
        self.invalidate();
    }

    pub const fn repeat_count(&self) -> usize {
        self.repeat_count
    }

    pub fn set_repeat_count(&mut self, repeat_count: i32) {
        self.repeat_count = repeat_count.max(0) as usize;
        self.invalidate();
    }

    pub const fn span_count(&self) -> usize {
        self.repeat_count + 1
    }

    /// Path distance travelled per millisecond.
    pub const fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: f64) {
        self.velocity = velocity;
        self.invalidate();
    }

    /// Distance between two ticks; infinite if ticks are disabled.
    pub const fn tick_distance(&self) -> f64 {
        self.tick_distance
    }

    pub const fn tick_distance_multiplier(&self) -> f64 {
        self.tick_distance_multiplier
    }

    /// Prior to format version 8, speed multipliers did not adjust the tick
    /// count over the same distance.
    pub fn set_tick_distance_multiplier(&mut self, multiplier: f64) {
        self.tick_distance_multiplier = multiplier;
        self.invalidate();
    }

    pub const fn generate_ticks(&self) -> bool {
        self.generate_ticks
    }

    pub fn span_duration(&self) -> f64 {
        self.duration() / self.span_count() as f64
    }

    /// Derive velocity and tick spacing from the control points active at
    /// `start_time`.
    pub fn apply_defaults(
        &mut self,
        start_time: f64,
        control_points: &ControlPoints,
        difficulty: &BeatmapDifficulty,
    ) {
        let timing_point = control_points.timing.point_at(start_time);
        let difficulty_point = control_points.difficulty.point_at(start_time);

        let velocity = Self::BASE_SCORING_DISTANCE * f64::from(difficulty.slider_multiplier)
            / (timing_point.beat_len * difficulty_point.bpm_multiplier());

        // Not computed as `BASE_SCORING_DISTANCE * slider_multiplier` so that
        // floating point errors stay the same as in the legacy client.
        let scoring_dist = velocity * timing_point.beat_len;

        self.generate_ticks = difficulty_point.generate_ticks;

        self.tick_distance = if self.generate_ticks {
            scoring_dist / f64::from(difficulty.slider_tick_rate) * self.tick_distance_multiplier
        } else {
            f64::INFINITY
        };

        self.set_velocity(velocity);
    }

    /// Head, ticks, repeats, and tail, sorted by time.
    pub fn nested_objects(&self) -> &[NestedObject] {
        self.nested.get_or_init(|| self.create_nested_objects())
    }

    /// The slider's end position relative to its start position, accounting
    /// for the direction of the final span.
    pub fn end_offset(&self) -> Pos2 {
        *self.end_offset.get_or_init(|| {
            let progress = if self.repeat_count % 2 == 0 { 1.0 } else { 0.0 };

            self.path.position_at(progress)
        })
    }

    fn invalidate(&mut self) {
        self.nested.take();
        self.end_offset.take();
    }

    fn create_nested_objects(&self) -> Vec<NestedObject> {
        let span_count = self.span_count();
        let duration = self.duration();
        let span_duration = duration / span_count as f64;

        let mut nested = Vec::with_capacity(2 + self.repeat_count);
        nested.push(NestedObject::new(
            NestedObjectKind::Head,
            0.0,
            Pos2::zero(),
            0,
            0.0,
        ));

        let len = self.path.dist().min(Self::MAX_LEN);
        let tick_distance = self.tick_distance.clamp(0.0, len);
        let with_ticks = self.generate_ticks && tick_distance > 0.0;
        let min_dist_from_end = self.velocity * 10.0;

        for span in 0..span_count {
            let span_start_time = span as f64 * span_duration;
            let reversed = span % 2 == 1;

            if with_ticks {
                let first_tick = nested.len();
                let mut d = tick_distance;

                while d <= len && d < len - min_dist_from_end {
                    // Ticks are always placed from the path's start so that
                    // repeat spans share their positions.
                    let dist_progress = d / len;
                    let time_progress = if reversed {
                        1.0 - dist_progress
                    } else {
                        dist_progress
                    };

                    nested.push(NestedObject::new(
                        NestedObjectKind::Tick,
                        span_start_time + time_progress * span_duration,
                        self.path.position_at(dist_progress),
                        span,
                        span_start_time,
                    ));

                    d += tick_distance;
                }

                if reversed {
                    nested[first_tick..].reverse();
                }
            }

            if span < span_count - 1 {
                let progress = ((span + 1) % 2) as f64;

                nested.push(NestedObject::new(
                    NestedObjectKind::Repeat,
                    span_start_time + span_duration,
                    self.path.position_at(progress),
                    span,
                    span_start_time,
                ));
            }
        }

        let final_span_idx = self.repeat_count;
        let final_span_start_time = final_span_idx as f64 * span_duration;
        let final_span_end_time = (duration / 2.0)
            .max(final_span_start_time + span_duration - Self::LEGACY_LAST_TICK_OFFSET);

        nested.push(NestedObject::new(
            NestedObjectKind::Tail,
            final_span_end_time,
            self.end_offset(),
            final_span_idx,
            final_span_start_time,
        ));

        nested.sort_by(|a, b| a.time.total_cmp(&b.time));

        nested
    }
}

impl HasDuration for Slider {
    fn duration(&self) -> f64 {
        let duration = self.span_count() as f64 * self.path.dist() / self.velocity;

        if duration.is_finite() {
            duration.max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{
        control_point::{DifficultyPoint, TimingPoint},
        path::{PathControlPoint, PathType},
    };

    use super::*;

    fn straight_slider(len: f32, repeats: i32) -> Slider {
        let points = vec![
            PathControlPoint::with_type(Pos2::zero(), PathType::Linear),
            PathControlPoint::new(Pos2::new(len, 0.0)),
        ];

        Slider::new(SliderPath::new(points, Some(f64::from(len))), repeats, Vec::new())
    }

    fn defaults(slider: &mut Slider, beat_len: f64, tick_rate: f32) {
        let mut control_points = ControlPoints::default();
        control_points
            .timing
            .add(TimingPoint::new(0.0, beat_len, 4));

        let difficulty = BeatmapDifficulty {
            slider_multiplier: 1.0,
            slider_tick_rate: tick_rate,
            ..Default::default()
        };

        slider.apply_defaults(0.0, &control_points, &difficulty);
    }

    #[test]
    fn velocity_and_duration() {
        let mut slider = straight_slider(200.0, 0);
        defaults(&mut slider, 500.0, 1.0);

        assert!((slider.velocity() - 0.2).abs() < 1e-9);
        assert!((slider.duration() - 1000.0).abs() < 1e-6);
        assert!((slider.tick_distance() - 100.0).abs() < 1e-6);
    }

    #[test]
    fn ticks_stop_before_the_end_margin() {
        let mut slider = straight_slider(200.0, 0);
        defaults(&mut slider, 500.0, 4.0);

        // Tick spacing 25, margin 0.2 * 10 = 2 => ticks at 25..=175
        let ticks: Vec<_> = slider
            .nested_objects()
            .iter()
            .filter(|nested| nested.is_tick())
            .collect();

        assert_eq!(ticks.len(), 7);
        assert!((ticks[6].pos.x - 175.0).abs() < 1e-3);
        assert!(ticks
            .iter()
            .all(|tick| f64::from(tick.pos.x) < 200.0 - slider.velocity() * 10.0));
    }

    #[test]
    fn tail_uses_legacy_offset() {
        let mut slider = straight_slider(200.0, 0);
        defaults(&mut slider, 500.0, 1.0);

        let tail = slider.nested_objects().last().copied().unwrap();

        assert!(tail.is_tail());
        assert!((tail.time - (1000.0 - 36.0)).abs() < 1e-9);
    }

    #[test]
    fn short_slider_tail_at_half_duration() {
        let mut slider = straight_slider(10.0, 0);
        defaults(&mut slider, 500.0, 1.0);

        // Duration 50ms: max(25, 50 - 36) = 25
        let tail = slider.nested_objects().last().copied().unwrap();
        assert!((tail.time - 25.0).abs() < 1e-9);
    }

    #[test]
    fn repeats_and_reversed_ticks() {
        let mut slider = straight_slider(200.0, 2);
        defaults(&mut slider, 500.0, 1.0);

        let nested = slider.nested_objects();
        let kinds: Vec<_> = nested.iter().map(|nested| nested.kind).collect();

        assert_eq!(
            kinds,
            [
                NestedObjectKind::Head,
                NestedObjectKind::Tick,
                NestedObjectKind::Repeat,
                NestedObjectKind::Tick,
                NestedObjectKind::Repeat,
                NestedObjectKind::Tick,
                NestedObjectKind::Tail,
            ]
        );

        assert!(nested.windows(2).all(|w| w[0].time <= w[1].time));

        // The first repeat sits at the path's end, the second back at its start
        assert!((nested[2].pos.x - 200.0).abs() < 1e-3);
        assert!(nested[4].pos.x.abs() < 1e-3);
        assert_eq!(slider.end_offset(), nested[6].pos);
    }

    #[test]
    fn disabled_ticks() {
        let mut slider = straight_slider(200.0, 1);

        let mut control_points = ControlPoints::default();
        control_points.timing.add(TimingPoint::new(0.0, 500.0, 4));
        control_points
            .difficulty
            .add(DifficultyPoint::new(0.0, f64::NAN));

        slider.apply_defaults(0.0, &control_points, &BeatmapDifficulty::default());

        assert!(slider.tick_distance().is_infinite());
        assert!(slider.nested_objects().iter().all(|nested| !nested.is_tick()));
        assert_eq!(slider.nested_objects().len(), 3);
    }

    #[test]
    fn setters_invalidate_cache() {
        let mut slider = straight_slider(200.0, 0);
        defaults(&mut slider, 500.0, 1.0);

        assert_eq!(slider.nested_objects().len(), 3);

        slider.set_repeat_count(1);
        assert_eq!(slider.nested_objects().len(), 5);
        assert!(slider.end_offset().x.abs() < 1e-3);

        slider.set_repeat_count(-5);
        assert_eq!(slider.repeat_count(), 0);
        assert_eq!(slider.nested_objects().len(), 3);
    }
}
