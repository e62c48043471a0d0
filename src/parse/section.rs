use std::str::FromStr;

use crate::model::{
    beatmap::{BeatmapDifficulty, BeatmapGeneral, BeatmapMetadata},
    control_point::SampleBank,
};

use super::ParseBeatmapError;

/// A `[Section]` of an `.osu` file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Section {
    General,
    Editor,
    Metadata,
    Difficulty,
    Events,
    TimingPoints,
    Colours,
    HitObjects,
    /// A section without relevant content.
    Unknown,
}

impl Section {
    pub(crate) fn from_header(name: &str) -> Self {
        match name {
            "General" => Self::General,
            "Editor" => Self::Editor,
            "Metadata" => Self::Metadata,
            "Difficulty" => Self::Difficulty,
            "Events" => Self::Events,
            "TimingPoints" => Self::TimingPoints,
            "Colours" => Self::Colours,
            "HitObjects" => Self::HitObjects,
            _ => Self::Unknown,
        }
    }
}

/// Split `Key: Value` or `Key:Value`.
pub(crate) fn split_key_value(line: &str) -> Result<(&str, &str), ParseBeatmapError> {
    let (key, value) = line
        .split_once(':')
        .ok_or(ParseBeatmapError::BadKeyValue)?;

    Ok((key.trim_end(), value.trim()))
}

pub(crate) fn parse_num<T>(value: &str) -> Result<T, ParseBeatmapError>
where
    T: FromStr,
    ParseBeatmapError: From<T::Err>,
{
    value.trim().parse().map_err(ParseBeatmapError::from)
}

pub(crate) fn parse_finite(value: &str) -> Result<f64, ParseBeatmapError> {
    let n: f64 = parse_num(value)?;

    if n.is_finite() {
        Ok(n)
    } else {
        Err(ParseBeatmapError::NonFinite)
    }
}

fn parse_bool(value: &str) -> Result<bool, ParseBeatmapError> {
    match value {
        "0" => Ok(false),
        "1" => Ok(true),
        _ => Err(ParseBeatmapError::Bool),
    }
}

pub(crate) fn parse_general(
    general: &mut BeatmapGeneral,
    line: &str,
) -> Result<(), ParseBeatmapError> {
    let (key, value) = split_key_value(line)?;

    match key {
        "AudioFilename" => general.audio_file = value.to_owned(),
        "AudioLeadIn" => general.audio_lead_in = parse_finite(value)?,
        "PreviewTime" => general.preview_time = parse_num(value)?,
        "Countdown" => general.countdown = parse_num::<i32>(value)? > 0,
        "SampleSet" => {
            general.sample_bank =
                SampleBank::from_str(value).map_err(|_| ParseBeatmapError::SampleBank)?
        }
        "SampleVolume" => general.sample_volume = parse_num(value)?,
        "StackLeniency" => general.stack_leniency = parse_num(value)?,
        "Mode" => general.mode = parse_num(value)?,
        "LetterboxInBreaks" => general.letterbox_in_breaks = parse_bool(value)?,
        "SpecialStyle" => general.special_style = parse_bool(value)?,
        "WidescreenStoryboard" => general.widescreen_storyboard = parse_bool(value)?,
        _ => {}
    }

    Ok(())
}

pub(crate) fn parse_metadata(
    metadata: &mut BeatmapMetadata,
    line: &str,
) -> Result<(), ParseBeatmapError> {
    let (key, value) = split_key_value(line)?;

    match key {
        "Title" => metadata.title = value.to_owned(),
        "TitleUnicode" => metadata.title_unicode = value.to_owned(),
        "Artist" => metadata.artist = value.to_owned(),
        "ArtistUnicode" => metadata.artist_unicode = value.to_owned(),
        "Creator" => metadata.creator = value.to_owned(),
        "Version" => metadata.version = value.to_owned(),
        "Source" => metadata.source = value.to_owned(),
        "Tags" => metadata.tags = value.split_whitespace().map(str::to_owned).collect(),
        "BeatmapID" => metadata.beatmap_id = parse_num(value)?,
        "BeatmapSetID" => metadata.beatmap_set_id = parse_num(value)?,
        _ => {}
    }

    Ok(())
}

/// Returns whether the line specified the approach rate.
pub(crate) fn parse_difficulty(
    difficulty: &mut BeatmapDifficulty,
    line: &str,
) -> Result<bool, ParseBeatmapError> {
    let (key, value) = split_key_value(line)?;

    let field = match key {
        "HPDrainRate" => &mut difficulty.hp,
        "CircleSize" => &mut difficulty.cs,
        "OverallDifficulty" => &mut difficulty.od,
        "ApproachRate" => &mut difficulty.ar,
        "SliderMultiplier" => &mut difficulty.slider_multiplier,
        "SliderTickRate" => &mut difficulty.slider_tick_rate,
        _ => return Ok(false),
    };

    let parsed: f32 = parse_num(value)?;

    if !parsed.is_finite() {
        return Err(ParseBeatmapError::NonFinite);
    }

    *field = parsed;

    Ok(key == "ApproachRate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_value_with_and_without_space() {
        assert_eq!(split_key_value("Mode: 0").unwrap(), ("Mode", "0"));
        assert_eq!(split_key_value("Mode:0").unwrap(), ("Mode", "0"));
        assert_eq!(
            split_key_value("AudioFilename: a:b.mp3").unwrap(),
            ("AudioFilename", "a:b.mp3")
        );
        assert!(split_key_value("nothing").is_err());
    }

    #[test]
    fn difficulty_fields() {
        let mut difficulty = BeatmapDifficulty::default();

        assert!(!parse_difficulty(&mut difficulty, "CircleSize:4.2").unwrap());
        assert!(parse_difficulty(&mut difficulty, "ApproachRate: 9").unwrap());
        assert!(parse_difficulty(&mut difficulty, "SliderMultiplier:nan").is_err());

        assert_eq!(difficulty.cs, 4.2);
        assert_eq!(difficulty.ar, 9.0);
        assert_eq!(difficulty.slider_multiplier, 1.4);
    }

    #[test]
    fn metadata_tags() {
        let mut metadata = BeatmapMetadata::default();
        parse_metadata(&mut metadata, "Tags:a  b c").unwrap();

        assert_eq!(metadata.tags, ["a", "b", "c"]);
    }
}
