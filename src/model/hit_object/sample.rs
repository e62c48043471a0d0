use std::str::FromStr;

use crate::model::control_point::SampleBank;

/// Bitflags of the hit sounds played by a hit object.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct HitSoundType(u8);

impl HitSoundType {
    pub const NONE: u8 = 0;
    pub const NORMAL: u8 = 1 << 0;
    pub const WHISTLE: u8 = 1 << 1;
    pub const FINISH: u8 = 1 << 2;
    pub const CLAP: u8 = 1 << 3;

    pub const fn has_flag(self, flag: u8) -> bool {
        self.0 & flag != 0
    }

    pub const fn bits(self) -> u8 {
        self.0
    }
}

impl From<u8> for HitSoundType {
    fn from(bits: u8) -> Self {
        Self(bits)
    }
}

/// Which sound a [`HitSampleInfo`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SampleName {
    Normal,
    Whistle,
    Finish,
    Clap,
}

/// A single sound played when a hit object, or one of its nodes, is hit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HitSampleInfo {
    pub name: SampleName,
    pub bank: SampleBank,
    /// A value of 0 means the volume of the active sample control point applies.
    pub volume: i32,
    /// A value of 0 means the index of the active sample control point applies.
    pub custom_index: i32,
    /// Custom sample file overriding the bank sounds.
    pub filename: Option<String>,
}

impl HitSampleInfo {
    pub const fn new(name: SampleName, bank: SampleBank, custom_index: i32, volume: i32) -> Self {
        Self {
            name,
            bank,
            volume,
            custom_index,
            filename: None,
        }
    }
}

/// The `normal:addition:index:volume:filename` bank suffix of a hit object line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleBankInfo {
    pub normal: SampleBank,
    pub addition: SampleBank,
    pub custom_index: i32,
    pub volume: i32,
    pub filename: Option<String>,
}

impl SampleBankInfo {
    /// Parse the bank suffix. Missing trailing fields keep their defaults.
    pub fn parse(s: &str) -> Option<Self> {
        let mut info = Self::default();
        let mut split = s.split(':');

        if let Some(normal) = split.next().filter(|s| !s.is_empty()) {
            info.normal = SampleBank::from_str(normal).ok()?;
            info.addition = info.normal;
        }

        if let Some(addition) = split.next().filter(|s| !s.is_empty()) {
            let addition = SampleBank::from_str(addition).ok()?;

            if addition != SampleBank::None {
                info.addition = addition;
            }
        }

        if let Some(idx) = split.next().filter(|s| !s.is_empty()) {
            info.custom_index = idx.parse().ok()?;
        }

        if let Some(volume) = split.next().filter(|s| !s.is_empty()) {
            info.volume = volume.parse().ok()?;
        }

        info.filename = split
            .next()
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Some(info)
    }

    /// Expand a hit sound type into the samples it plays.
    pub fn convert_sound_type(&self, sound_type: HitSoundType) -> Vec<HitSampleInfo> {
        if let Some(ref filename) = self.filename {
            let mut sample =
                HitSampleInfo::new(SampleName::Normal, SampleBank::None, 1, self.volume);
            sample.filename = Some(filename.clone());

            return vec![sample];
        }

        let mut samples = vec![HitSampleInfo::new(
            SampleName::Normal,
            self.normal,
            self.custom_index,
            self.volume,
        )];

        let additions = [
            (HitSoundType::FINISH, SampleName::Finish),
            (HitSoundType::WHISTLE, SampleName::Whistle),
            (HitSoundType::CLAP, SampleName::Clap),
        ];

        for (flag, name) in additions {
            if sound_type.has_flag(flag) {
                samples.push(HitSampleInfo::new(
                    name,
                    self.addition,
                    self.custom_index,
                    self.volume,
                ));
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bank_info_defaults_addition_to_normal() {
        let info = SampleBankInfo::parse("2:0:1:70:").unwrap();

        assert_eq!(info.normal, SampleBank::Soft);
        assert_eq!(info.addition, SampleBank::Soft);
        assert_eq!(info.custom_index, 1);
        assert_eq!(info.volume, 70);
        assert_eq!(info.filename, None);
    }

    #[test]
    fn sound_type_expansion() {
        let info = SampleBankInfo::parse("1:3").unwrap();
        let sound = HitSoundType::from(HitSoundType::WHISTLE | HitSoundType::CLAP);
        let samples = info.convert_sound_type(sound);

        let names: Vec<_> = samples.iter().map(|sample| sample.name).collect();
        assert_eq!(names, [SampleName::Normal, SampleName::Whistle, SampleName::Clap]);
        assert_eq!(samples[1].bank, SampleBank::Drum);
    }
}
