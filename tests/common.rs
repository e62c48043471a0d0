#![allow(unused)]

use beatmap_pp::Beatmap;

pub use self::paths::*;

/// Paths to .osu files
mod paths {
    pub const JUMPS: &str = "./resources/jumps.osu";
    pub const STACKS: &str = "./resources/stacks.osu";
    pub const TICKS: &str = "./resources/ticks.osu";
}

pub fn test_map(path: &str) -> Beatmap {
    Beatmap::from_path(path)
        .unwrap()
        .expect("resource charts are osu!standard charts")
}

#[track_caller]
pub fn assert_approx(a: f64, b: f64, epsilon: f64) {
    assert!((a - b).abs() < epsilon, "{a} != {b} (epsilon {epsilon})");
}
