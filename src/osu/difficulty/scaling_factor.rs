use crate::model::hit_object::HitObject;

use super::object::OsuDifficultyObject;

/// Fields around the scaling of hit objects.
///
/// All objects share the same scale so it's only stored once.
pub(crate) struct ScalingFactor {
    /// `NORMALIZED_RADIUS / radius` and then adjusted if `radius < 30`
    pub factor: f32,
    pub radius: f64,
}

impl ScalingFactor {
    pub(crate) fn new(cs: f32) -> Self {
        let scale = HitObject::scale_from_cs(cs);
        let radius = f64::from(HitObject::OBJECT_RADIUS * scale);
        let factor = OsuDifficultyObject::NORMALIZED_RADIUS as f32 / radius as f32;

        // Small circles are harder to aim at
        let factor_with_small_circle_bonus = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius as f32).min(5.0) / 50.0)
        } else {
            factor
        };

        Self {
            factor: factor_with_small_circle_bonus,
            radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_circle_bonus() {
        let regular = ScalingFactor::new(4.0);
        assert!((regular.factor - 50.0 / regular.radius as f32).abs() < 1e-5);

        let tiny = ScalingFactor::new(10.0);
        assert!(tiny.radius < 30.0);
        assert!(tiny.factor > 50.0 / tiny.radius as f32);
    }
}
