//! In-memory memoization of difficulty attributes.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, MutexGuard},
};

use crate::{
    model::{beatmap::Beatmap, mods::DifficultyParameters},
    osu::{
        calculate_difficulty, calculate_timed_difficulty, OsuDifficultyAttributes,
        TimedDifficultyAttributes,
    },
};

/// Identifies a calculation by the chart's content and the parts of the
/// parameters that affect difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct CacheKey {
    md5: String,
    mods: u32,
    speed_multiplier: u32,
    forced_ar: Option<u32>,
}

impl CacheKey {
    fn new(map: &Beatmap, params: Option<&DifficultyParameters>) -> Self {
        let params = params.copied().unwrap_or_default();

        Self {
            md5: map.md5.clone(),
            mods: params.get_mods().difficulty_affecting().bits(),
            speed_multiplier: params.total_speed_multiplier().to_bits(),
            forced_ar: params.get_forced_ar().map(f32::to_bits),
        }
    }
}

/// Thread-safe cache of difficulty attributes.
///
/// Charts are identified by [`Beatmap::md5`] so they must come from the
/// parser, or have their hash set otherwise. Two threads missing the same key
/// at once may both compute the attributes; the last one stored wins.
#[derive(Debug, Default)]
pub struct DifficultyCache {
    attributes: Mutex<HashMap<CacheKey, OsuDifficultyAttributes>>,
    timed: Mutex<HashMap<CacheKey, Arc<[TimedDifficultyAttributes]>>>,
}

impl DifficultyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached attributes for the chart and parameters, if any.
    pub fn get(
        &self,
        map: &Beatmap,
        params: Option<&DifficultyParameters>,
    ) -> Option<OsuDifficultyAttributes> {
        let key = CacheKey::new(map, params);

        lock(&self.attributes).get(&key).cloned()
    }

    /// The cached attributes or, on a miss, freshly calculated ones which are
    /// then stored.
    pub fn get_or_compute(
        &self,
        map: &Beatmap,
        params: Option<&DifficultyParameters>,
    ) -> OsuDifficultyAttributes {
        let key = CacheKey::new(map, params);

        if let Some(attrs) = lock(&self.attributes).get(&key) {
            log_trace!(md5 = %key.md5, mods = key.mods, "difficulty cache hit");

            return attrs.clone();
        }

        log_debug!(md5 = %key.md5, mods = key.mods, "difficulty cache miss");

        // The lock is not held during the calculation
        let attrs = calculate_difficulty(map, params);
        lock(&self.attributes).insert(key, attrs.clone());

        attrs
    }

    /// The cached timed attributes for the chart and parameters, if any.
    pub fn get_timed(
        &self,
        map: &Beatmap,
        params: Option<&DifficultyParameters>,
    ) -> Option<Arc<[TimedDifficultyAttributes]>> {
        let key = CacheKey::new(map, params);

        lock(&self.timed).get(&key).cloned()
    }

    /// The cached timed attributes or, on a miss, freshly calculated ones
    /// which are then stored.
    pub fn get_or_compute_timed(
        &self,
        map: &Beatmap,
        params: Option<&DifficultyParameters>,
    ) -> Arc<[TimedDifficultyAttributes]> {
        let key = CacheKey::new(map, params);

        if let Some(attrs) = lock(&self.timed).get(&key) {
            log_trace!(md5 = %key.md5, mods = key.mods, "timed difficulty cache hit");

            return Arc::clone(attrs);
        }

        log_debug!(md5 = %key.md5, mods = key.mods, "timed difficulty cache miss");

        let attrs: Arc<[_]> = calculate_timed_difficulty(map, params).into();
        lock(&self.timed).insert(key, Arc::clone(&attrs));

        attrs
    }

    /// Remove all entries.
    pub fn clear(&self) {
        lock(&self.attributes).clear();
        lock(&self.timed).clear();
    }

    /// Amount of cached entries, timed ones included.
    pub fn len(&self) -> usize {
        lock(&self.attributes).len() + lock(&self.timed).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// A panic while holding the lock can't leave a map in an invalid state
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use crate::model::{
        hit_object::{HitObject, HitObjectKind},
        mods::{GameMods, Mod},
        pos2::Pos2,
    };

    use super::*;

    fn map() -> Beatmap {
        let mut map = Beatmap::default();
        map.md5 = String::from("0123456789abcdef0123456789abcdef");

        map.hit_objects = (0..20)
            .map(|i| {
                let pos = Pos2::new((i % 4) as f32 * 100.0, 100.0);

                HitObject::new(f64::from(i) * 200.0, pos, HitObjectKind::Circle)
            })
            .collect();

        map.process();

        map
    }

    #[test]
    fn non_difficulty_mods_share_entries() {
        let cache = DifficultyCache::new();
        let map = map();

        let hd = DifficultyParameters::new().mods(GameMods::NONE.with(Mod::Hidden));
        let hd_nf = DifficultyParameters::new()
            .mods(GameMods::NONE.with(Mod::Hidden).with(Mod::NoFail));

        assert!(cache.get(&map, Some(&hd)).is_none());

        let computed = cache.get_or_compute(&map, Some(&hd));
        let cached = cache.get(&map, Some(&hd_nf));

        assert_eq!(cached, Some(computed));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn speed_and_ar_are_part_of_the_key() {
        let cache = DifficultyCache::new();
        let map = map();

        cache.get_or_compute(&map, None);

        let faster = DifficultyParameters::new().custom_speed_multiplier(1.2);
        let forced = DifficultyParameters::new().forced_ar(9.0);

        assert!(cache.get(&map, Some(&faster)).is_none());
        assert!(cache.get(&map, Some(&forced)).is_none());
        assert!(cache.get(&map, Some(&DifficultyParameters::new())).is_some());
    }

    #[test]
    fn timed_entries() {
        let cache = DifficultyCache::new();
        let map = map();

        let timed = cache.get_or_compute_timed(&map, None);

        assert_eq!(timed.len(), 20);
        assert!(Arc::ptr_eq(&timed, &cache.get_or_compute_timed(&map, None)));
        assert!(cache.get(&map, None).is_none());

        cache.clear();
        assert!(cache.is_empty());
    }
}
