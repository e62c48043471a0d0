use std::cmp::Ordering;

use crate::util::sorted_vec::SortedVec;

pub use self::{
    difficulty::DifficultyPoint,
    effect::EffectPoint,
    sample::{SampleBank, SamplePoint},
    timing::TimingPoint,
};

mod difficulty;
mod effect;
mod sample;
mod timing;

/// A timestamped setting change which applies from its time until the next
/// point of the same kind.
pub trait ControlPoint: Copy + Default {
    /// The time at which this control point takes effect.
    fn time(&self) -> f64;

    /// Combine `newer` into `self` when both share the same time.
    ///
    /// The newer point replaces the older one unless a point kind says otherwise.
    fn merge(&mut self, newer: Self) {
        *self = newer;
    }
}

/// Time-ordered sequence of control points of a single kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPointTimeline<T> {
    points: SortedVec<T>,
}

impl<T: ControlPoint> ControlPointTimeline<T> {
    /// Create an empty timeline.
    pub fn new() -> Self {
        Self {
            points: SortedVec::new(|a: &T, b: &T| {
                a.time().partial_cmp(&b.time()).unwrap_or(Ordering::Equal)
            }),
        }
    }

    /// Insert a control point, keeping the timeline sorted.
    ///
    /// A point sharing its time with an existing point is merged into it.
    pub fn add(&mut self, point: T) {
        self.points.push_with(point, T::merge);
    }

    /// The control point that is active at the given time.
    ///
    /// That is the last point whose time is at most `time`, or the first point
    /// if `time` precedes all of them. An empty timeline yields the default point.
    pub fn point_at(&self, time: f64) -> T {
        let idx = match self.points.find_by(|probe| probe.time().total_cmp(&time)) {
            Ok(i) => i,
            Err(i) => i.saturating_sub(1),
        };

        self.points.get(idx).copied().unwrap_or_default()
    }

    /// All control points in order.
    pub fn points(&self) -> &[T] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl<T: ControlPoint> Default for ControlPointTimeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The four control point timelines of a chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControlPoints {
    pub timing: ControlPointTimeline<TimingPoint>,
    pub difficulty: ControlPointTimeline<DifficultyPoint>,
    pub effect: ControlPointTimeline<EffectPoint>,
    pub sample: ControlPointTimeline<SamplePoint>,
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn empty_timeline_yields_default() {
        let timeline = ControlPointTimeline::<TimingPoint>::new();

        assert_eq!(timeline.point_at(500.0), TimingPoint::default());
    }

    #[test]
    fn lookup_before_first_point() {
        let mut timeline = ControlPointTimeline::new();
        timeline.add(TimingPoint::new(1000.0, 500.0, 4));
        timeline.add(TimingPoint::new(2000.0, 250.0, 3));

        assert_eq!(timeline.point_at(0.0).time, 1000.0);
        assert_eq!(timeline.point_at(1999.0).beat_len, 500.0);
        assert_eq!(timeline.point_at(2000.0).meter, 3);
    }

    #[test]
    fn last_parsed_wins() {
        let mut timeline = ControlPointTimeline::new();
        timeline.add(TimingPoint::new(0.0, 500.0, 4));
        timeline.add(TimingPoint::new(0.0, 300.0, 4));

        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline.point_at(10.0).beat_len, 300.0);
    }

    proptest! {
        #[test]
        fn lookup_brackets(
            times in prop::collection::vec(0_i32..100_000, 1..40),
            query in -1000_i32..110_000,
        ) {
            let mut timeline = ControlPointTimeline::new();

            for &time in times.iter() {
                timeline.add(EffectPoint::new(f64::from(time), time % 2 == 0));
            }

            let points = timeline.points();
            let first = points[0];
            let last = points[points.len() - 1];
            let query = f64::from(query);
            let found = timeline.point_at(query);

            prop_assert!(points.windows(2).all(|w| w[0].time < w[1].time));

            if query < first.time {
                prop_assert_eq!(found, first);
            } else if query >= last.time {
                prop_assert_eq!(found, last);
            } else {
                prop_assert!(found.time <= query);
                let next = points.iter().find(|p| p.time > found.time);
                prop_assert!(next.map_or(true, |next| next.time > query));
            }
        }
    }
}
