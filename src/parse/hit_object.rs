use crate::{
    model::{
        beatmap::Beatmap,
        control_point::SampleBank,
        hit_object::{
            HitObject, HitObjectKind, HitSampleInfo, HitSoundType, SampleBankInfo, Slider, Spinner,
        },
        path::{PathControlPoint, PathType, SliderPath},
        pos2::Pos2,
    },
    util::float_ext::FloatExt,
};

use super::{
    section::{parse_finite, parse_num},
    ParseBeatmapError,
};

const CIRCLE_FLAG: i32 = 1 << 0;
const SLIDER_FLAG: i32 = 1 << 1;
const NEW_COMBO_FLAG: i32 = 1 << 2;
const SPINNER_FLAG: i32 = 1 << 3;
const COMBO_OFFSET_SHIFT: i32 = 4;
const COMBO_OFFSET_MASK: i32 = 0b111;

const MAX_REPEAT_COUNT: i32 = 9000;

/// Parse a line of the `[HitObjects]` section.
///
/// `x,y,time,type,hitSound,objectParams,hitSample`
pub(crate) fn parse_hit_object(map: &Beatmap, line: &str) -> Result<HitObject, ParseBeatmapError> {
    let split: Vec<&str> = line.split(',').map(str::trim).collect();

    if split.len() < 4 {
        return Err(ParseBeatmapError::InvalidHitObjectLine);
    }

    let x = parse_finite(split[0])? as f32;
    let y = parse_finite(split[1])? as f32;
    let pos = Pos2::new(x, y);

    let start_time = parse_finite(split[2])? + map.offset();
    let type_flags: i32 = parse_num(split[3])?;

    let sound_type = match split.get(4) {
        Some(sound) if !sound.is_empty() => HitSoundType::from(parse_num::<u8>(sound)?),
        _ => HitSoundType::from(HitSoundType::NONE),
    };

    let (kind, bank_field) = if type_flags & CIRCLE_FLAG != 0 {
        (HitObjectKind::Circle, split.get(5))
    } else if type_flags & SLIDER_FLAG != 0 {
        let slider = parse_slider(map, &split, pos, sound_type, start_time)?;

        (HitObjectKind::Slider(slider), split.get(10))
    } else if type_flags & SPINNER_FLAG != 0 {
        let end_time = split
            .get(5)
            .ok_or(ParseBeatmapError::MissingField("end time"))?;

        let end_time = parse_finite(end_time)? + map.offset();
        let spinner = Spinner {
            duration: (end_time - start_time).max(0.0),
        };

        (HitObjectKind::Spinner(spinner), split.get(6))
    } else {
        return Err(ParseBeatmapError::UnknownHitObjectType);
    };

    let bank_info = parse_bank_info(bank_field.copied())?;

    let mut h = HitObject::new(start_time, pos, kind);
    h.new_combo = type_flags & NEW_COMBO_FLAG != 0;
    h.combo_offset = ((type_flags >> COMBO_OFFSET_SHIFT) & COMBO_OFFSET_MASK) as u8;
    h.samples = bank_info.convert_sound_type(sound_type);

    // Spinners always start a new combo
    if h.is_spinner() {
        h.new_combo = true;
    }

    Ok(h)
}

fn parse_bank_info(field: Option<&str>) -> Result<SampleBankInfo, ParseBeatmapError> {
    match field {
        Some(field) if !field.is_empty() => {
            SampleBankInfo::parse(field).ok_or(ParseBeatmapError::SampleBank)
        }
        _ => Ok(SampleBankInfo::default()),
    }
}

fn parse_slider(
    map: &Beatmap,
    split: &[&str],
    pos: Pos2,
    sound_type: HitSoundType,
    start_time: f64,
) -> Result<Slider, ParseBeatmapError> {
    if split.len() < 8 {
        return Err(ParseBeatmapError::InvalidHitObjectLine);
    }

    let slides: i32 = parse_num(split[6])?;

    if slides > MAX_REPEAT_COUNT {
        return Err(ParseBeatmapError::InvalidRepeatCount);
    } else if slides < 0 {
        return Err(ParseBeatmapError::InvalidHitObjectLine);
    }

    // The first slide is not a repeat
    let repeat_count = (slides - 1).max(0);

    let len: f64 = parse_num(split[7])?;

    if len.is_nan() {
        return Err(ParseBeatmapError::NonFinite);
    }

    // Zero or negative lengths mean the path is not truncated
    let expected_dist = Some(len.max(0.0)).filter(|&len| len.not_eq(0.0));

    let control_points = parse_control_points(split[5], pos, map.version)?;
    let path = SliderPath::new(control_points, expected_dist);

    let node_samples = parse_node_samples(split, sound_type, repeat_count as usize + 2)?;

    let mut slider = Slider::new(path, repeat_count, node_samples);

    // Prior to v8, speed multipliers don't adjust for how many ticks are
    // generated over the same distance.
    if map.version < 8 {
        let speed_multiplier = map.control_points.difficulty.point_at(start_time).speed_multiplier;
        slider.set_tick_distance_multiplier(speed_multiplier.recip());
    }

    Ok(slider)
}

/// Parse `T|x:y|x:y|...` into control points relative to the slider position.
fn parse_control_points(
    curve: &str,
    pos: Pos2,
    version: i32,
) -> Result<Vec<PathControlPoint>, ParseBeatmapError> {
    let mut tokens = curve.split('|');

    let mut path_type: PathType = tokens
        .next()
        .and_then(|token| token.get(..1))
        .ok_or(ParseBeatmapError::InvalidCurveType)?
        .parse()
        .map_err(|_| ParseBeatmapError::InvalidCurveType)?;

    let mut points = vec![Pos2::zero()];

    for token in tokens {
        let (x, y) = token
            .split_once(':')
            .ok_or(ParseBeatmapError::InvalidHitObjectLine)?;

        let point = Pos2::new(parse_finite(x)? as f32, parse_finite(y)? as f32);
        points.push(point - pos);
    }

    if version <= 6 && points.len() >= 2 {
        if path_type == PathType::Linear {
            path_type = PathType::Bezier;
        }

        if points.len() == 2 && points[1] == points[0] {
            path_type = PathType::Linear;
        }
    }

    if path_type == PathType::PerfectCurve {
        if let [a, b, c] = points.as_slice() {
            if is_linear(*a, *b, *c) {
                path_type = PathType::Linear;
            }
        } else {
            path_type = PathType::Bezier;
        }
    }

    let control_points = points
        .into_iter()
        .enumerate()
        .map(|(i, point)| {
            if i == 0 {
                PathControlPoint::with_type(point, path_type)
            } else {
                PathControlPoint::new(point)
            }
        })
        .collect();

    Ok(control_points)
}

fn is_linear(p0: Pos2, p1: Pos2, p2: Pos2) -> bool {
    FloatExt::eq(
        (p1.y - p0.y) * (p2.x - p0.x),
        (p1.x - p0.x) * (p2.y - p0.y),
    )
}

/// Samples for the head, every repeat, and the tail.
fn parse_node_samples(
    split: &[&str],
    sound_type: HitSoundType,
    node_count: usize,
) -> Result<Vec<Vec<HitSampleInfo>>, ParseBeatmapError> {
    let bank_info = parse_bank_info(split.get(10).copied())?;

    let mut node_sounds = vec![sound_type; node_count];

    if let Some(sounds) = split.get(8).filter(|s| !s.is_empty()) {
        for (node, sound) in node_sounds.iter_mut().zip(sounds.split('|')) {
            *node = HitSoundType::from(parse_num::<u8>(sound)?);
        }
    }

    let mut node_banks = vec![bank_info.clone(); node_count];

    if let Some(sets) = split.get(9).filter(|s| !s.is_empty()) {
        for (node, set) in node_banks.iter_mut().zip(sets.split('|')) {
            let mut bank_info = bank_info.clone();
            let (normal, addition) = set.split_once(':').unwrap_or((set, ""));

            // Only the normal and addition banks can be overridden per node
            if let Some(normal) = parse_bank(normal)? {
                bank_info.normal = normal;
                bank_info.addition = normal;
            }

            if let Some(addition) = parse_bank(addition)? {
                bank_info.addition = addition;
            }

            *node = bank_info;
        }
    }

    let samples = node_banks
        .iter()
        .zip(node_sounds)
        .map(|(bank_info, sound)| bank_info.convert_sound_type(sound))
        .collect();

    Ok(samples)
}

fn parse_bank(s: &str) -> Result<Option<SampleBank>, ParseBeatmapError> {
    if s.is_empty() {
        return Ok(None);
    }

    let bank = s.parse().map_err(|_| ParseBeatmapError::SampleBank)?;

    Ok(Some(bank).filter(|&bank| bank != SampleBank::None))
}
