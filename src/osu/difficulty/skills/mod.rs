use crate::osu::difficulty::{object::OsuDifficultyObject, scaling_factor::ScalingFactor};

pub(crate) use self::{
    aim::Aim,
    flashlight::Flashlight,
    speed::Speed,
    strain::StrainSkill,
};

mod aim;
mod flashlight;
mod rhythm;
mod speed;
mod strain;

/// All skills of a difficulty calculation.
#[derive(Clone, Debug)]
pub(crate) struct OsuSkills {
    pub aim: Aim,
    pub aim_no_sliders: Aim,
    pub speed: Speed,
    pub flashlight: Flashlight,
}

impl OsuSkills {
    pub(crate) fn new(great_window: f64, hidden: bool, scaling_factor: &ScalingFactor) -> Self {
        Self {
            aim: Aim::new(true),
            aim_no_sliders: Aim::new(false),
            speed: Speed::new(great_window),
            flashlight: Flashlight::new(hidden, scaling_factor.radius),
        }
    }

    pub(crate) fn process(&mut self, curr: &OsuDifficultyObject<'_>, diff_objects: &[OsuDifficultyObject<'_>]) {
        self.aim.process(curr, diff_objects);
        self.aim_no_sliders.process(curr, diff_objects);
        self.speed.process(curr, diff_objects);
        self.flashlight.process(curr, diff_objects);
    }
}
