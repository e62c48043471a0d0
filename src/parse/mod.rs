use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use crate::model::beatmap::Beatmap;

pub use self::error::{ParseBeatmapError, ParseError, ParseResult};

use self::{
    events::{parse_colour, parse_event},
    hit_object::parse_hit_object,
    reader::FileReader,
    section::{parse_difficulty, parse_general, parse_metadata, Section},
    timing::parse_timing_point,
};

mod error;
mod events;
mod hit_object;
mod reader;
mod section;
mod timing;

pub(crate) const OSU_FILE_HEADER: &str = "osu file format v";

/// Options for parsing a [`Beatmap`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    skip_hit_objects: bool,
}

impl ParseOptions {
    pub const fn new() -> Self {
        Self {
            skip_hit_objects: false,
        }
    }

    /// Ignore the `[HitObjects]` section, e.g. when only metadata is of interest.
    pub const fn skip_hit_objects(mut self, skip_hit_objects: bool) -> Self {
        self.skip_hit_objects = skip_hit_objects;

        self
    }

    pub const fn get_skip_hit_objects(&self) -> bool {
        self.skip_hit_objects
    }
}

/// Whether the parser should keep going.
enum Flow {
    Continue,
    /// The chart targets a game mode other than osu!standard.
    UnsupportedMode,
}

/// Parsing state that persists between lines.
struct Decoder {
    map: Beatmap,
    options: ParseOptions,
    section: Option<Section>,
    has_approach_rate: bool,
}

impl Decoder {
    fn new(options: ParseOptions) -> Self {
        Self {
            map: Beatmap::default(),
            options,
            section: None,
            has_approach_rate: false,
        }
    }

    /// The first line has to be the header.
    fn header(&mut self, line: &str) -> ParseResult<()> {
        let line = line.trim_start_matches('\u{feff}').trim();

        let version = line
            .strip_prefix(OSU_FILE_HEADER)
            .ok_or(ParseError::IncorrectFileHeader)?;

        let digits = version
            .find(|c: char| !c.is_ascii_digit())
            .map_or(version, |end| &version[..end]);

        self.map.version = digits.parse().map_err(|_| ParseError::InvalidVersion)?;

        Ok(())
    }

    fn line(&mut self, line: &str) -> Flow {
        // Indented lines belong to storyboard commands
        if line.starts_with(' ') || line.starts_with('_') {
            return Flow::Continue;
        }

        let line = line.trim();

        if line.is_empty() || line.starts_with("//") {
            return Flow::Continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            self.section = Some(Section::from_header(name));

            return Flow::Continue;
        }

        let Some(section) = self.section else {
            return Flow::Continue;
        };

        let map = &mut self.map;
        let offset = map.offset();

        let res = match section {
            Section::General => {
                let res = parse_general(&mut map.general, line);

                if map.general.mode != 0 {
                    log_debug!(
                        mode = map.general.mode,
                        "Chart is not an osu!standard chart, skipping"
                    );

                    return Flow::UnsupportedMode;
                }

                res
            }
            Section::Metadata => parse_metadata(&mut map.metadata, line),
            Section::Difficulty => match parse_difficulty(&mut map.difficulty, line) {
                Ok(has_ar) => {
                    self.has_approach_rate |= has_ar;

                    Ok(())
                }
                Err(err) => Err(err),
            },
            Section::Events => parse_event(&mut map.events, line, offset),
            Section::TimingPoints => parse_timing_point(
                &mut map.control_points,
                line,
                offset,
                map.general.sample_bank,
                map.general.sample_volume,
            ),
            Section::Colours => {
                if let Err(err) = parse_colour(&mut map.colours, line) {
                    log_error!(line, error = %err, "Failed to parse colour");
                }

                Ok(())
            }
            Section::HitObjects if self.options.skip_hit_objects => Ok(()),
            Section::HitObjects => match parse_hit_object(map, line) {
                Ok(h) => {
                    map.hit_objects.push(h);

                    Ok(())
                }
                Err(err) => Err(err),
            },
            Section::Editor | Section::Unknown => Ok(()),
        };

        if let Err(err) = res {
            log_warn!(?section, line, error = %err, "Failed to parse line");
        }

        Flow::Continue
    }

    fn finish(mut self, md5: String) -> Beatmap {
        let map = &mut self.map;

        if !self.has_approach_rate {
            map.difficulty.ar = map.difficulty.od;
        }

        // Stable sort to keep the file order of simultaneous objects
        map.hit_objects
            .sort_by(|a, b| a.start_time.total_cmp(&b.start_time));

        map.process();
        map.md5 = md5;

        self.map
    }
}

macro_rules! decode {
    ( $input:expr, $options:expr, |$reader:ident| $next_line:expr ) => {{
        let mut $reader = FileReader::new($input);
        let mut decoder = Decoder::new($options);

        if !$next_line? {
            return Err(ParseError::IncorrectFileHeader);
        }

        decoder.header(&$reader.line())?;

        while $next_line? {
            if let Flow::UnsupportedMode = decoder.line(&$reader.line()) {
                return Ok(None);
            }
        }

        Ok(Some(decoder.finish($reader.md5())))
    }};
}

impl Beatmap {
    /// Parse a chart from the given reader.
    ///
    /// The first line has to be the `osu file format v<N>` header.
    /// Returns `Ok(None)` if the chart is not an osu!standard chart.
    pub fn parse<R: Read>(input: R) -> ParseResult<Option<Self>> {
        Self::parse_with_options(input, ParseOptions::default())
    }

    pub fn parse_with_options<R: Read>(
        input: R,
        options: ParseOptions,
    ) -> ParseResult<Option<Self>> {
        let input = BufReader::new(input);

        decode!(input, options, |reader| reader.next_line())
    }

    /// Parse a chart from the content of a `.osu` file.
    pub fn from_bytes(bytes: &[u8]) -> ParseResult<Option<Self>> {
        let options = ParseOptions::default();

        decode!(bytes, options, |reader| reader.next_line())
    }

    /// Read and parse the `.osu` file at the given path.
    pub fn from_path(path: impl AsRef<Path>) -> ParseResult<Option<Self>> {
        let file = File::open(path)?;

        Self::parse(file)
    }
}

#[cfg(feature = "async_tokio")]
impl Beatmap {
    /// Parse a chart from an async reader.
    pub async fn parse_tokio<R>(input: R, options: ParseOptions) -> ParseResult<Option<Self>>
    where
        R: tokio::io::AsyncRead + Unpin,
    {
        let input = tokio::io::BufReader::new(input);

        decode!(input, options, |reader| reader.next_line_tokio().await)
    }

    /// Read and parse the `.osu` file at the given path.
    pub async fn from_path_tokio(path: impl AsRef<Path>) -> ParseResult<Option<Self>> {
        let file = tokio::fs::File::open(path).await?;

        Self::parse_tokio(file, ParseOptions::default()).await
    }
}

#[cfg(feature = "async_std")]
impl Beatmap {
    /// Parse a chart from an async reader.
    pub async fn parse_async_std<R>(input: R, options: ParseOptions) -> ParseResult<Option<Self>>
    where
        R: async_std::io::Read + Unpin,
    {
        let input = async_std::io::BufReader::new(input);

        decode!(input, options, |reader| reader.next_line_async_std().await)
    }

    /// Read and parse the `.osu` file at the given path.
    pub async fn from_path_async_std(
        path: impl AsRef<async_std::path::Path>,
    ) -> ParseResult<Option<Self>> {
        let file = async_std::fs::File::open(path).await?;

        Self::parse_async_std(file, ParseOptions::default()).await
    }
}

#[cfg(test)]
mod tests {
    use crate::model::{beatmap::BreakPeriod, hit_object::HitObjectKind};

    use super::*;

    const CHART: &str = "\u{feff}osu file format v14

[General]
StackLeniency: 0.5
Mode: 0

[Metadata]
Title:Test
Tags:a b

[Difficulty]
HPDrainRate:4
CircleSize:4
OverallDifficulty:8
SliderMultiplier:1.4
SliderTickRate:1

[Events]
2,1000,500

[TimingPoints]
0,500,4,2,0,60,1,0

[Colours]
Combo1 : 255,0,0
Combo2 : 1,2

[HitObjects]
256,192,2000,1,0,0:0:0:0:
100,100,1000,2,0,L|300:100,1,200
this is not a hit object
";

    fn parse(content: &str) -> ParseResult<Option<Beatmap>> {
        Beatmap::from_bytes(content.as_bytes())
    }

    #[test]
    fn full_chart() {
        let map = parse(CHART).unwrap().unwrap();

        assert_eq!(map.version, 14);
        assert_eq!(map.general.stack_leniency, 0.5);
        assert_eq!(map.metadata.title, "Test");
        assert_eq!(map.difficulty.cs, 4.0);
        // Missing approach rate falls back to overall difficulty
        assert_eq!(map.difficulty.ar, 8.0);
        assert_eq!(map.events.breaks, [BreakPeriod::new(1000.0, 1000.0)]);
        assert_eq!(map.colours.combo_colours.len(), 1);

        assert_eq!(map.hit_objects.len(), 2);
        assert!(matches!(map.hit_objects[0].kind, HitObjectKind::Slider(_)));
        assert_eq!(map.hit_objects[1].start_time, 2000.0);

        assert_eq!(map.md5.len(), 32);
    }

    #[test]
    fn skip_hit_objects() {
        let options = ParseOptions::new().skip_hit_objects(true);
        let map = Beatmap::parse_with_options(CHART.as_bytes(), options)
            .unwrap()
            .unwrap();

        assert!(map.hit_objects.is_empty());
        assert_eq!(map.metadata.tags, ["a", "b"]);
    }

    #[test]
    fn unsupported_mode() {
        let content = "osu file format v14\n[General]\nMode: 3\n[HitObjects]\n0,0,0,1,0\n";

        assert!(parse(content).unwrap().is_none());
    }

    #[test]
    fn header() {
        assert!(matches!(
            parse("[General]\nMode: 0"),
            Err(ParseError::IncorrectFileHeader)
        ));
        assert!(matches!(
            parse("osu file format vX"),
            Err(ParseError::InvalidVersion)
        ));
        assert!(matches!(parse(""), Err(ParseError::IncorrectFileHeader)));

        let map = parse("\u{feff}osu file format v3\n").unwrap().unwrap();
        assert_eq!(map.version, 3);
    }

    #[test]
    fn header_must_be_the_first_line() {
        assert!(matches!(
            parse("\nosu file format v14\n[General]\nMode: 0\n"),
            Err(ParseError::IncorrectFileHeader)
        ));
        assert!(matches!(
            parse("// comment\nosu file format v14\n"),
            Err(ParseError::IncorrectFileHeader)
        ));
    }

    #[test]
    fn legacy_offset() {
        let content = "osu file format v4\n[HitObjects]\n0,0,100,1,0\n";
        let map = parse(content).unwrap().unwrap();

        assert_eq!(map.hit_objects[0].start_time, 124.0);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Beatmap::from_path("./this/file/does/not/exist.osu"),
            Err(ParseError::Io(_))
        ));
    }
}
