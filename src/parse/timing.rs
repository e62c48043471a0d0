use crate::model::control_point::{
    ControlPoints, DifficultyPoint, EffectPoint, SampleBank, SamplePoint, TimingPoint,
};

use super::{
    section::{parse_finite, parse_num},
    ParseBeatmapError,
};

const KIAI_FLAG: i32 = 1 << 0;

/// Parse a line of the `[TimingPoints]` section.
///
/// `time,beatLength,meter,sampleSet,sampleIndex,volume,uninherited,effects`
/// where everything after the beat length is optional.
pub(crate) fn parse_timing_point(
    control_points: &mut ControlPoints,
    line: &str,
    offset: f64,
    default_bank: SampleBank,
    default_volume: i32,
) -> Result<(), ParseBeatmapError> {
    let mut split = line.split(',');

    let (Some(time), Some(beat_len)) = (split.next(), split.next()) else {
        return Err(ParseBeatmapError::InvalidTimingPointLine);
    };

    let time = parse_finite(time)? + offset;

    // NaN is allowed, it disables slider ticks
    let beat_len: f64 = parse_num(beat_len)?;

    if beat_len.is_infinite() {
        return Err(ParseBeatmapError::NonFinite);
    }

    let meter = match split.next() {
        Some(meter) if !meter.trim().is_empty() => parse_num(meter)?,
        _ => TimingPoint::DEFAULT_METER,
    };

    let bank = match split.next() {
        Some(bank) => SampleBank::from_index(parse_num(bank)?),
        None => default_bank,
    };

    let custom_index = split.next().map(parse_num).transpose()?.unwrap_or(0);
    let volume = split
        .next()
        .map(parse_num)
        .transpose()?
        .unwrap_or(default_volume);

    let uninherited = match split.next() {
        Some(flag) => parse_num::<i32>(flag)? == 1,
        None => true,
    };

    let effects = split.next().map(parse_num::<i32>).transpose()?.unwrap_or(0);

    if uninherited {
        if beat_len.is_nan() {
            return Err(ParseBeatmapError::NonFinite);
        }

        control_points
            .timing
            .add(TimingPoint::new(time, beat_len, meter));
    }

    control_points
        .difficulty
        .add(DifficultyPoint::new(time, beat_len));

    control_points
        .effect
        .add(EffectPoint::new(time, effects & KIAI_FLAG != 0));

    let bank = if bank == SampleBank::None {
        default_bank
    } else {
        bank
    };

    control_points
        .sample
        .add(SamplePoint::new(time, bank, volume, custom_index));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> ControlPoints {
        let mut control_points = ControlPoints::default();
        parse_timing_point(&mut control_points, line, 0.0, SampleBank::Normal, 100).unwrap();

        control_points
    }

    #[test]
    fn uninherited_point() {
        let control_points = parse("500,300,4,2,1,60,1,1");

        let timing = control_points.timing.point_at(500.0);
        assert_eq!(timing.beat_len, 300.0);
        assert_eq!(timing.meter, 4);

        let sample = control_points.sample.point_at(500.0);
        assert_eq!(sample.bank, SampleBank::Soft);
        assert_eq!(sample.volume, 60);
        assert_eq!(sample.custom_index, 1);

        assert!(control_points.effect.point_at(500.0).kiai);
        assert_eq!(control_points.difficulty.point_at(500.0).speed_multiplier, 1.0);
    }

    #[test]
    fn inherited_point() {
        let control_points = parse("1000,-50,4,1,0,100,0,0");

        assert!(control_points.timing.is_empty());
        assert_eq!(control_points.difficulty.point_at(1000.0).speed_multiplier, 2.0);
    }

    #[test]
    fn minimal_line() {
        let control_points = parse("0,500");

        assert_eq!(control_points.timing.len(), 1);
        assert_eq!(control_points.timing.point_at(0.0).meter, 4);
    }

    #[test]
    fn nan_beat_len_disables_ticks() {
        let control_points = parse("0,NaN,4,1,0,100,0,0");

        assert!(!control_points.difficulty.point_at(0.0).generate_ticks);
    }

    #[test]
    fn missing_beat_len_is_an_error() {
        let mut control_points = ControlPoints::default();
        let res = parse_timing_point(&mut control_points, "100", 0.0, SampleBank::Normal, 100);

        assert!(matches!(res, Err(ParseBeatmapError::InvalidTimingPointLine)));
    }
}
