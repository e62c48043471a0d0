use crate::model::pos2::Pos2;

/// The kind of a slider's sub-object.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NestedObjectKind {
    Head,
    Tick,
    Repeat,
    Tail,
}

/// A sub-object generated from a slider's path.
///
/// Time and position are relative to the slider's start time and position.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NestedObject {
    pub kind: NestedObjectKind,
    pub time: f64,
    pub pos: Pos2,
    /// Index of the span this object belongs to.
    pub span_idx: usize,
    /// Start time of that span, relative to the slider start.
    pub span_start_time: f64,
}

impl NestedObject {
    pub(crate) const fn new(
        kind: NestedObjectKind,
        time: f64,
        pos: Pos2,
        span_idx: usize,
        span_start_time: f64,
    ) -> Self {
        Self {
            kind,
            time,
            pos,
            span_idx,
            span_start_time,
        }
    }

    pub const fn is_tick(&self) -> bool {
        matches!(self.kind, NestedObjectKind::Tick)
    }

    pub const fn is_repeat(&self) -> bool {
        matches!(self.kind, NestedObjectKind::Repeat)
    }

    pub const fn is_tail(&self) -> bool {
        matches!(self.kind, NestedObjectKind::Tail)
    }
}
