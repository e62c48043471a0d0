use beatmap_pp::{
    calculate_difficulty,
    model::hit_object::{HitObjectKind, NestedObjectKind},
    Beatmap, DifficultyParameters, GameMods, Mod, OsuDifficulty,
};

use crate::common::{assert_approx, test_map, JUMPS, TICKS};

mod common;

fn calculate(map: &Beatmap, mods: GameMods) -> beatmap_pp::OsuDifficultyAttributes {
    OsuDifficulty::new(map).mods(mods).calculate()
}

#[test]
fn nomod() {
    let map = test_map(JUMPS);
    let attrs = calculate(&map, GameMods::NONE);

    assert_eq!(attrs.n_circles, 22);
    assert_eq!(attrs.n_sliders, 2);
    assert_eq!(attrs.n_spinners, 1);
    assert_eq!(attrs.max_combo, 31);
    assert_eq!(attrs.mods, GameMods::NONE);

    assert!(attrs.stars > 0.0);
    assert!(attrs.aim > 0.0);
    assert!(attrs.speed > 0.0);
    assert!(attrs.slider_factor > 0.0 && attrs.slider_factor <= 1.0);
    assert!(attrs.speed_note_count > 0.0);

    assert_approx(attrs.ar, 9.0, 1e-4);
    assert_approx(attrs.od, 8.0, 1e-4);
    assert_approx(attrs.hp, 5.0, 1e-6);
}

#[test]
fn no_params_matches_default_params() {
    let map = test_map(JUMPS);

    let without = calculate_difficulty(&map, None);
    let with = calculate_difficulty(&map, Some(&DifficultyParameters::new()));

    assert_eq!(without, with);
}

#[test]
fn hard_rock() {
    let map = test_map(JUMPS);

    let nomod = calculate(&map, GameMods::NONE);
    let hr = calculate(&map, GameMods::NONE.with(Mod::HardRock));

    assert_approx(hr.ar, 10.0, 1e-4);
    assert_approx(hr.od, 10.0, 1e-4);
    assert!(hr.stars > nomod.stars);

    // The parsed chart stays untouched
    assert_eq!(map.difficulty.cs, 4.0);
    assert_eq!(map.difficulty.ar, 9.0);
}

#[test]
fn easy_lowers_stars() {
    let map = test_map(JUMPS);

    let nomod = calculate(&map, GameMods::NONE);
    let ez = calculate(&map, GameMods::NONE.with(Mod::Easy));

    assert!(ez.stars < nomod.stars);
    assert_approx(ez.ar, 4.5, 1e-4);
}

#[test]
fn double_time() {
    let map = test_map(JUMPS);

    let nomod = calculate(&map, GameMods::NONE);
    let dt = calculate(&map, GameMods::NONE.with(Mod::DoubleTime));
    let ht = calculate(&map, GameMods::NONE.with(Mod::HalfTime));

    assert!(dt.stars > nomod.stars);
    assert!(ht.stars < nomod.stars);

    // Preempt 600ms at 1.5x speed
    assert_approx(dt.ar, 5.0 + 800.0 / 150.0, 1e-4);
    assert_eq!(dt.max_combo, nomod.max_combo);
}

#[test]
fn custom_speed_matches_double_time() {
    let map = test_map(JUMPS);

    let dt = calculate(&map, GameMods::NONE.with(Mod::DoubleTime));
    let custom = OsuDifficulty::new(&map)
        .params(DifficultyParameters::new().custom_speed_multiplier(1.5))
        .calculate();

    assert_eq!(custom.stars, dt.stars);
    assert_eq!(custom.ar, dt.ar);
}

#[test]
fn forced_ar_ignores_speed() {
    let map = test_map(JUMPS);

    let params = DifficultyParameters::new()
        .mods(GameMods::NONE.with(Mod::DoubleTime).with(Mod::HardRock))
        .forced_ar(8.0);

    let attrs = OsuDifficulty::new(&map).params(params).calculate();

    assert_approx(attrs.ar, 8.0, 1e-4);
}

#[test]
fn flashlight_only_counts_with_the_mod() {
    let map = test_map(JUMPS);

    let nomod = calculate(&map, GameMods::NONE);
    let hd = calculate(&map, GameMods::NONE.with(Mod::Hidden));
    let fl = calculate(&map, GameMods::NONE.with(Mod::Flashlight));

    assert_eq!(hd.stars, nomod.stars);
    assert!(fl.flashlight > 0.0);
    assert!(fl.stars > nomod.stars);
}

#[test]
fn mods_without_difficulty_impact() {
    let map = test_map(JUMPS);

    let nomod = calculate(&map, GameMods::NONE);
    let nf = calculate(&map, GameMods::NONE.with(Mod::NoFail).with(Mod::ScoreV2));

    assert_eq!(nf.stars, nomod.stars);
    assert_eq!(nf.aim, nomod.aim);
    assert_eq!(nf.speed, nomod.speed);
}

#[test]
fn timed_attributes() {
    let map = test_map(JUMPS);
    let mods = GameMods::NONE.with(Mod::HardRock);

    let full = calculate(&map, mods);
    let timed = OsuDifficulty::new(&map).mods(mods).calculate_timed();

    assert_eq!(timed.len(), map.hit_objects.len());

    assert!(timed.windows(2).all(|pair| {
        let [a, b] = pair else { unreachable!() };

        a.time <= b.time && a.attributes.max_combo <= b.attributes.max_combo
    }));

    let last = timed.last().unwrap();
    assert_approx(last.attributes.stars, full.stars, 1e-10);
    assert_eq!(last.attributes.max_combo, full.max_combo);
    assert_eq!(last.attributes.n_sliders, 2);
}

#[test]
fn max_combo_counts_nested_objects() {
    let map = test_map(TICKS);

    let mut combo = 0;
    let mut n_ticks = 0;

    for h in map.hit_objects.iter() {
        match h.kind {
            HitObjectKind::Circle | HitObjectKind::Spinner(_) => combo += 1,
            HitObjectKind::Slider(ref slider) => {
                let nested = slider.nested_objects();

                let count = |kind: NestedObjectKind| {
                    nested.iter().filter(|n| n.kind == kind).count()
                };

                assert_eq!(count(NestedObjectKind::Head), 1);
                assert_eq!(count(NestedObjectKind::Tail), 1);
                assert_eq!(count(NestedObjectKind::Repeat), slider.repeat_count());

                n_ticks += count(NestedObjectKind::Tick);
                combo += nested.len();
            }
        }
    }

    assert_eq!(map.n_sliders(), 5);
    assert_eq!(map.n_spinners(), 1);
    assert!(n_ticks > 0);
    assert_eq!(map.max_combo(), combo);

    let clock_mods = [
        GameMods::NONE,
        GameMods::NONE.with(Mod::DoubleTime),
        GameMods::NONE.with(Mod::HalfTime),
        GameMods::NONE.with(Mod::Nightcore).with(Mod::HardRock),
    ];

    for mods in clock_mods {
        let attrs = calculate(&map, mods);

        assert_eq!(attrs.max_combo as usize, combo, "{mods:?}");
    }

    let custom = OsuDifficulty::new(&map)
        .params(DifficultyParameters::new().custom_speed_multiplier(1.25))
        .calculate();

    assert_eq!(custom.max_combo as usize, combo);
}
