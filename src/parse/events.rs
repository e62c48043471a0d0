use crate::model::beatmap::{BeatmapColours, BeatmapEvents, BreakPeriod, Colour, ComboColour};

use super::{
    section::{parse_finite, parse_num, split_key_value},
    ParseBeatmapError,
};

/// Parse a line of the `[Events]` section. Storyboard lines are ignored.
pub(crate) fn parse_event(
    events: &mut BeatmapEvents,
    line: &str,
    offset: f64,
) -> Result<(), ParseBeatmapError> {
    let split: Vec<_> = line.split(',').map(str::trim).collect();

    let event_type = split.first().copied().unwrap_or_default();

    match (event_type, split.as_slice()) {
        ("0", [_, _, filename, ..]) => {
            events.background_file = Some(unquote(filename).to_owned());
        }
        ("1" | "Video", [_, start_time, filename, ..]) => {
            events.video_start_time = parse_finite(start_time)?;
            events.video_file = Some(unquote(filename).to_owned());
        }
        ("2" | "Break", [_, start_time, end_time, ..]) => {
            let start_time = parse_finite(start_time)? + offset;
            let end_time = parse_finite(end_time)? + offset;

            events.breaks.push(BreakPeriod::new(start_time, end_time));
        }
        ("3", [_, _, r, g, b, ..]) => {
            let colour = Colour::new(parse_num(r)?, parse_num(g)?, parse_num(b)?, 255);
            events.background_colour = Some(colour);
        }
        ("0" | "1" | "Video" | "2" | "Break" | "3", _) => {
            return Err(ParseBeatmapError::InvalidEventLine)
        }
        _ => {}
    }

    Ok(())
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(s)
}

/// Parse a line of the `[Colours]` section.
pub(crate) fn parse_colour(
    colours: &mut BeatmapColours,
    line: &str,
) -> Result<(), ParseBeatmapError> {
    let (key, value) = split_key_value(line)?;

    let components: Vec<_> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let colour = match components.as_slice() {
        [r, g, b] => Colour::new(parse_num(r)?, parse_num(g)?, parse_num(b)?, 255),
        [r, g, b, a] => Colour::new(parse_num(r)?, parse_num(g)?, parse_num(b)?, parse_num(a)?),
        _ => return Err(ParseBeatmapError::InvalidColour),
    };

    if let Some(index) = key.strip_prefix("Combo") {
        let index = index
            .trim()
            .parse()
            .unwrap_or(colours.combo_colours.len() as i32 + 1);

        colours.combo_colours.push(ComboColour { index, colour });
        colours.combo_colours.sort_by_key(|combo| combo.index);
    } else if key.starts_with("SliderBorder") {
        colours.slider_border = Some(colour);
    }

    Ok(())
}
