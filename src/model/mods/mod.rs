use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

pub use self::params::DifficultyParameters;

pub(crate) use self::params::apply_parameters;

mod capability;
mod params;

/// A gameplay modifier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Mod {
    NoFail = 0,
    Easy = 1,
    Hidden = 2,
    HardRock = 3,
    SuddenDeath = 4,
    DoubleTime = 5,
    Relax = 6,
    HalfTime = 7,
    Nightcore = 8,
    Flashlight = 9,
    Autoplay = 10,
    Perfect = 11,
    Autopilot = 12,
    ScoreV2 = 13,
    Precise = 14,
    ReallyEasy = 15,
    SmallCircle = 16,
    SpeedUp = 17,
}

impl Mod {
    pub const ALL: [Self; 18] = [
        Self::NoFail,
        Self::Easy,
        Self::Hidden,
        Self::HardRock,
        Self::SuddenDeath,
        Self::DoubleTime,
        Self::Relax,
        Self::HalfTime,
        Self::Nightcore,
        Self::Flashlight,
        Self::Autoplay,
        Self::Perfect,
        Self::Autopilot,
        Self::ScoreV2,
        Self::Precise,
        Self::ReallyEasy,
        Self::SmallCircle,
        Self::SpeedUp,
    ];

    pub const fn bits(self) -> u32 {
        1 << self as u8
    }

    pub const fn acronym(self) -> &'static str {
        match self {
            Self::NoFail => "NF",
            Self::Easy => "EZ",
            Self::Hidden => "HD",
            Self::HardRock => "HR",
            Self::SuddenDeath => "SD",
            Self::DoubleTime => "DT",
            Self::Relax => "RX",
            Self::HalfTime => "HT",
            Self::Nightcore => "NC",
            Self::Flashlight => "FL",
            Self::Autoplay => "AT",
            Self::Perfect => "PF",
            Self::Autopilot => "AP",
            Self::ScoreV2 => "V2",
            Self::Precise => "PR",
            Self::ReallyEasy => "RE",
            Self::SmallCircle => "SC",
            Self::SpeedUp => "SU",
        }
    }

    /// Single-character code used by legacy score and replay formats.
    pub const fn legacy_char(self) -> char {
        match self {
            Self::NoFail => 'n',
            Self::Easy => 'e',
            Self::Hidden => 'h',
            Self::HardRock => 'r',
            Self::SuddenDeath => 'u',
            Self::DoubleTime => 'd',
            Self::Relax => 'x',
            Self::HalfTime => 't',
            Self::Nightcore => 'c',
            Self::Flashlight => 'i',
            Self::Autoplay => 'a',
            Self::Perfect => 'f',
            Self::Autopilot => 'p',
            Self::ScoreV2 => 'v',
            Self::Precise => 's',
            Self::ReallyEasy => 'l',
            Self::SmallCircle => 'm',
            Self::SpeedUp => 'b',
        }
    }

    pub fn from_acronym(acronym: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.acronym().eq_ignore_ascii_case(acronym))
    }

    pub fn from_legacy_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.legacy_char() == c)
    }
}

impl Display for Mod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.acronym())
    }
}

/// A set of [`Mod`]s.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameMods(u32);

impl GameMods {
    pub const NONE: Self = Self(0);

    /// Mods whose presence changes difficulty attributes.
    pub const DIFFICULTY_AFFECTING: Self = Self(
        Mod::DoubleTime.bits()
            | Mod::HalfTime.bits()
            | Mod::Nightcore.bits()
            | Mod::SmallCircle.bits()
            | Mod::Relax.bits()
            | Mod::Easy.bits()
            | Mod::ReallyEasy.bits()
            | Mod::HardRock.bits()
            | Mod::Hidden.bits()
            | Mod::Flashlight.bits()
            | Mod::SpeedUp.bits(),
    );

    const ALL_BITS: u32 = (1 << Mod::ALL.len()) - 1;

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Unknown bits are dropped.
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL_BITS)
    }

    pub const fn contains(self, m: Mod) -> bool {
        self.0 & m.bits() != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub const fn with(self, m: Mod) -> Self {
        Self(self.0 | m.bits())
    }

    pub fn insert(&mut self, m: Mod) {
        self.0 |= m.bits();
    }

    pub fn remove(&mut self, m: Mod) {
        self.0 &= !m.bits();
    }

    /// Only the mods that may affect difficulty attributes.
    #[must_use]
    pub const fn difficulty_affecting(self) -> Self {
        Self(self.0 & Self::DIFFICULTY_AFFECTING.0)
    }

    /// Clock rate implied by speed changing mods.
    pub const fn clock_rate(self) -> f32 {
        if self.contains(Mod::DoubleTime) || self.contains(Mod::Nightcore) {
            1.5
        } else if self.contains(Mod::HalfTime) {
            0.75
        } else {
            1.0
        }
    }

    pub fn iter(self) -> impl Iterator<Item = Mod> {
        Mod::ALL.into_iter().filter(move |m| self.contains(*m))
    }

    /// Parse a set of legacy characters, e.g. `"hr"`.
    pub fn from_legacy_chars(s: &str) -> Result<Self, ParseModsError> {
        s.chars().try_fold(Self::NONE, |mods, c| {
            Mod::from_legacy_char(c)
                .map(|m| mods.with(m))
                .ok_or(ParseModsError::UnknownChar(c))
        })
    }
}

impl From<Mod> for GameMods {
    fn from(m: Mod) -> Self {
        Self(m.bits())
    }
}

impl FromIterator<Mod> for GameMods {
    fn from_iter<I: IntoIterator<Item = Mod>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

/// Failed to parse [`GameMods`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseModsError {
    #[error("unknown mod acronym `{0}`")]
    UnknownAcronym(String),
    #[error("unknown mod character `{0}`")]
    UnknownChar(char),
    #[error("mod acronyms must consist of pairs of ascii characters")]
    OddLength,
}

impl FromStr for GameMods {
    type Err = ParseModsError;

    /// Parse concatenated acronyms such as `"HDDT"`; `"NM"` and the empty
    /// string denote no mods.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.eq_ignore_ascii_case("NM") {
            return Ok(Self::NONE);
        }

        if !s.is_ascii() || s.len() % 2 != 0 {
            return Err(ParseModsError::OddLength);
        }

        (0..s.len()).step_by(2).try_fold(Self::NONE, |mods, i| {
            let acronym = &s[i..i + 2];

            Mod::from_acronym(acronym)
                .map(|m| mods.with(m))
                .ok_or_else(|| ParseModsError::UnknownAcronym(acronym.to_owned()))
        })
    }
}

impl Display for GameMods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        if self.is_empty() {
            return f.write_str("NM");
        }

        for m in self.iter() {
            f.write_str(m.acronym())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_acronyms() {
        let mods: GameMods = "HDdt".parse().unwrap();

        assert!(mods.contains(Mod::Hidden));
        assert!(mods.contains(Mod::DoubleTime));
        assert_eq!(mods.len(), 2);
        assert_eq!(mods.to_string(), "HDDT");
        assert_eq!("NM".parse::<GameMods>(), Ok(GameMods::NONE));
        assert_eq!(
            "HDX".parse::<GameMods>(),
            Err(ParseModsError::OddLength)
        );
        assert_eq!(
            "HDZZ".parse::<GameMods>(),
            Err(ParseModsError::UnknownAcronym("ZZ".to_owned()))
        );
    }

    #[test]
    fn parse_legacy_chars() {
        let mods = GameMods::from_legacy_chars("rdl").unwrap();

        assert_eq!(
            mods,
            [Mod::HardRock, Mod::DoubleTime, Mod::ReallyEasy]
                .into_iter()
                .collect::<GameMods>()
        );
        assert_eq!(
            GameMods::from_legacy_chars("rz"),
            Err(ParseModsError::UnknownChar('z'))
        );
    }

    #[test]
    fn difficulty_affecting_subset() {
        let mods: GameMods = "NFHDV2SD".parse().unwrap();

        assert_eq!(mods.difficulty_affecting(), GameMods::from(Mod::Hidden));
    }

    #[test]
    fn clock_rates() {
        assert_eq!(GameMods::from(Mod::Nightcore).clock_rate(), 1.5);
        assert_eq!(GameMods::from(Mod::HalfTime).clock_rate(), 0.75);
        assert_eq!(GameMods::from(Mod::SpeedUp).clock_rate(), 1.0);
    }
}
