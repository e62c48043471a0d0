use std::str::FromStr;

use crate::model::hit_object::HitSampleInfo;

use super::ControlPoint;

/// Sample set of a hit sound.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SampleBank {
    #[default]
    None,
    Normal,
    Soft,
    Drum,
}

impl SampleBank {
    pub const fn from_index(idx: i32) -> Self {
        match idx {
            1 => Self::Normal,
            2 => Self::Soft,
            3 => Self::Drum,
            _ => Self::None,
        }
    }
}

impl FromStr for SampleBank {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "None" => Ok(Self::None),
            "Normal" => Ok(Self::Normal),
            "Soft" => Ok(Self::Soft),
            "Drum" => Ok(Self::Drum),
            _ => s.parse().map(Self::from_index).map_err(|_| ()),
        }
    }
}

/// Sample-related info about this control point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SamplePoint {
    pub time: f64,
    pub bank: SampleBank,
    pub volume: i32,
    pub custom_index: i32,
}

impl SamplePoint {
    pub const DEFAULT_VOLUME: i32 = 100;

    pub const fn new(time: f64, bank: SampleBank, volume: i32, custom_index: i32) -> Self {
        Self {
            time,
            bank,
            volume,
            custom_index,
        }
    }

    /// Fill the unset fields of `sample` with the settings of this point.
    pub fn apply_to(&self, sample: &mut HitSampleInfo) {
        if sample.bank == SampleBank::None {
            sample.bank = self.bank;
        }

        if sample.volume <= 0 {
            sample.volume = self.volume;
        }

        if sample.custom_index <= 0 {
            sample.custom_index = self.custom_index;
        }
    }
}

impl Default for SamplePoint {
    fn default() -> Self {
        Self {
            time: 0.0,
            bank: SampleBank::Normal,
            volume: Self::DEFAULT_VOLUME,
            custom_index: 0,
        }
    }
}

impl ControlPoint for SamplePoint {
    fn time(&self) -> f64 {
        self.time
    }

    // Settings accumulate so that unset fields of a later line at the same
    // time do not erase earlier ones.
    fn merge(&mut self, newer: Self) {
        if newer.bank != SampleBank::None {
            self.bank = newer.bank;
        }

        if newer.volume > 0 {
            self.volume = newer.volume;
        }

        if newer.custom_index > 0 {
            self.custom_index = newer.custom_index;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::model::control_point::ControlPointTimeline;

    use super::*;

    #[test]
    fn same_time_points_accumulate() {
        let mut timeline = ControlPointTimeline::new();
        timeline.add(SamplePoint::new(100.0, SampleBank::Soft, 60, 0));
        timeline.add(SamplePoint::new(100.0, SampleBank::None, 0, 2));

        let point = timeline.point_at(100.0);

        assert_eq!(timeline.len(), 1);
        assert_eq!(point.bank, SampleBank::Soft);
        assert_eq!(point.volume, 60);
        assert_eq!(point.custom_index, 2);
    }

    #[test]
    fn lookup_returns_whole_points() {
        let mut timeline = ControlPointTimeline::new();
        timeline.add(SamplePoint::new(0.0, SampleBank::Normal, 80, 0));
        timeline.add(SamplePoint::new(1500.5, SampleBank::Drum, 40, 1));

        assert_eq!(
            timeline.point_at(1000.0),
            SamplePoint::new(0.0, SampleBank::Normal, 80, 0)
        );
        assert_eq!(
            timeline.point_at(2000.0),
            SamplePoint::new(1500.5, SampleBank::Drum, 40, 1)
        );
        assert_ne!(timeline.point_at(2000.0), SamplePoint::default());
    }
}
