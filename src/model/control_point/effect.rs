use super::ControlPoint;

/// Effect-related info about this control point.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EffectPoint {
    pub time: f64,
    pub kiai: bool,
}

impl EffectPoint {
    pub const DEFAULT_KIAI: bool = false;

    pub const fn new(time: f64, kiai: bool) -> Self {
        Self { time, kiai }
    }
}

impl ControlPoint for EffectPoint {
    fn time(&self) -> f64 {
        self.time
    }
}
