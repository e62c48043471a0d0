/// Chart aggregate and its sections.
pub mod beatmap;

/// Timing, difficulty, effect, and sample control points.
pub mod control_point;

/// Circles, sliders, spinners, and slider sub-objects.
pub mod hit_object;

/// Gameplay modifiers.
pub mod mods;

/// Slider path geometry.
pub mod path;

pub mod pos2;
