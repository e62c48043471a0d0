use crate::model::{
    beatmap::BeatmapDifficulty,
    control_point::ControlPoints,
    pos2::Pos2,
};

pub use self::{
    nested::{NestedObject, NestedObjectKind},
    sample::{HitSampleInfo, HitSoundType, SampleBankInfo, SampleName},
    slider::Slider,
};

mod nested;
mod sample;
mod slider;

/// Playfield height; vertical reflections happen along its center line.
pub(crate) const PLAYFIELD_HEIGHT: f32 = 384.0;

/// Capability of hit objects that span a period of time.
pub trait HasDuration {
    /// Duration in milliseconds.
    fn duration(&self) -> f64;
}

/// A circle, slider, or spinner of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct HitObject {
    pub start_time: f64,
    pub pos: Pos2,
    pub new_combo: bool,
    /// Amount of combo colours to skip.
    pub combo_offset: u8,
    pub samples: Vec<HitSampleInfo>,
    /// Scale derived from circle size, set by the beatmap processor.
    pub scale: f32,
    /// Set by the beatmap processor.
    pub stack_height: i32,
    pub kind: HitObjectKind,
}

/// Type-specific data of a [`HitObject`].
#[derive(Clone, Debug, PartialEq)]
pub enum HitObjectKind {
    Circle,
    Slider(Slider),
    Spinner(Spinner),
}

/// A spinner only stores its length.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Spinner {
    pub duration: f64,
}

impl HasDuration for Spinner {
    fn duration(&self) -> f64 {
        self.duration
    }
}

impl HitObject {
    pub const OBJECT_RADIUS: f32 = 64.0;

    pub fn new(start_time: f64, pos: Pos2, kind: HitObjectKind) -> Self {
        Self {
            start_time,
            pos,
            new_combo: false,
            combo_offset: 0,
            samples: Vec::new(),
            scale: 1.0,
            stack_height: 0,
            kind,
        }
    }

    /// Scale of an object for the given circle size.
    pub fn scale_from_cs(cs: f32) -> f32 {
        (1.0 - 0.7 * (cs - 5.0) / 5.0) / 2.0
    }

    pub fn radius(&self) -> f64 {
        f64::from(Self::OBJECT_RADIUS * self.scale)
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, HitObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, HitObjectKind::Slider(_))
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, HitObjectKind::Spinner(_))
    }

    pub fn duration(&self) -> f64 {
        match self.kind {
            HitObjectKind::Circle => 0.0,
            HitObjectKind::Slider(ref slider) => slider.duration(),
            HitObjectKind::Spinner(ref spinner) => spinner.duration(),
        }
    }

    pub fn end_time(&self) -> f64 {
        self.start_time + self.duration()
    }

    /// Position at the end of the object, without stacking.
    pub fn end_pos(&self) -> Pos2 {
        match self.kind {
            HitObjectKind::Slider(ref slider) => self.pos + slider.end_offset(),
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => self.pos,
        }
    }

    pub fn stack_offset(&self) -> Pos2 {
        let offset = self.stack_height as f32 * self.scale * -6.4;

        Pos2::new(offset, offset)
    }

    pub fn stacked_pos(&self) -> Pos2 {
        self.pos + self.stack_offset()
    }

    pub fn stacked_end_pos(&self) -> Pos2 {
        self.end_pos() + self.stack_offset()
    }

    /// Amount of combo this object contributes.
    pub fn max_combo(&self) -> usize {
        match self.kind {
            HitObjectKind::Slider(ref slider) => slider.nested_objects().len(),
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => 1,
        }
    }

    /// Compute the values that depend on the chart's control points and
    /// difficulty settings.
    pub fn apply_defaults(&mut self, control_points: &ControlPoints, difficulty: &BeatmapDifficulty) {
        let sample_point = control_points.sample.point_at(self.start_time);

        for sample in self.samples.iter_mut() {
            sample_point.apply_to(sample);
        }

        if let HitObjectKind::Slider(ref mut slider) = self.kind {
            slider.apply_defaults(self.start_time, control_points, difficulty);

            // Node samples follow the sample point active at each node
            let span_duration = slider.span_duration();

            for (i, node) in slider.node_samples.iter_mut().enumerate() {
                let time = self.start_time + i as f64 * span_duration + Slider::CONTROL_POINT_LENIENCY;
                let node_point = control_points.sample.point_at(time);

                for sample in node.iter_mut() {
                    node_point.apply_to(sample);
                }
            }
        }

        self.scale = Self::scale_from_cs(difficulty.cs);
    }

    /// Mirror the object along the horizontal center line of the playfield.
    pub fn reflect_vertically(&mut self) {
        self.pos.y = PLAYFIELD_HEIGHT - self.pos.y;

        if let HitObjectKind::Slider(ref mut slider) = self.kind {
            let flipped = slider.path().flipped_vertically();
            slider.set_path(flipped);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::path::{PathControlPoint, PathType, SliderPath};

    use super::*;

    #[test]
    fn scale_of_default_cs() {
        let scale = HitObject::scale_from_cs(5.0);

        assert!((scale - 0.5).abs() < 1e-6);
        assert!(HitObject::scale_from_cs(4.0) > scale);
    }

    #[test]
    fn stack_offset_moves_up_left() {
        let mut h = HitObject::new(0.0, Pos2::new(100.0, 100.0), HitObjectKind::Circle);
        h.scale = 0.5;
        h.stack_height = 2;

        let stacked = h.stacked_pos();
        assert!((stacked.x - 93.6).abs() < 1e-4 && (stacked.y - 93.6).abs() < 1e-4);
    }

    #[test]
    fn reflection_flips_slider_path() {
        let path = SliderPath::new(
            vec![
                PathControlPoint::with_type(Pos2::zero(), PathType::Linear),
                PathControlPoint::new(Pos2::new(0.0, 50.0)),
            ],
            None,
        );

        let slider = Slider::new(path, 0, Vec::new());
        let mut h = HitObject::new(0.0, Pos2::new(10.0, 100.0), HitObjectKind::Slider(slider));

        h.reflect_vertically();

        assert_eq!(h.pos, Pos2::new(10.0, 284.0));
        assert_eq!(h.end_pos(), Pos2::new(10.0, 234.0));
    }
}
