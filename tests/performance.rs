use beatmap_pp::{
    GameMods, Mod, OsuDifficulty, OsuDifficultyAttributes, OsuPerformance, OsuScoreState,
};
use proptest::prelude::*;

use crate::common::{test_map, JUMPS};

mod common;

fn attrs(mods: GameMods) -> OsuDifficultyAttributes {
    OsuDifficulty::new(&test_map(JUMPS)).mods(mods).calculate()
}

#[test]
fn perfect_play() {
    let attrs = attrs(GameMods::NONE);
    let perf = attrs.clone().performance().calculate();

    assert!(perf.pp > 0.0);
    assert!(perf.pp_aim > 0.0);
    assert!(perf.pp_speed > 0.0);
    assert!(perf.pp_acc > 0.0);
    assert_eq!(perf.pp_flashlight, 0.0);
    assert_eq!(perf.effective_miss_count, 0.0);
    assert_eq!(perf.difficulty, attrs);
}

#[test]
fn explicit_state_matches_defaults() {
    let attrs = attrs(GameMods::NONE);

    let state = OsuScoreState {
        max_combo: 31,
        n300: 25,
        n100: 0,
        n50: 0,
        misses: 0,
    };

    let implicit = OsuPerformance::new(attrs.clone()).calculate();
    let explicit = OsuPerformance::new(attrs).state(state).calculate();

    assert_eq!(implicit, explicit);
}

#[test]
fn combo_breaks_count_as_misses() {
    let attrs = attrs(GameMods::NONE);

    let perf = OsuPerformance::new(attrs)
        .combo(10)
        .n300(24)
        .n100(1)
        .calculate();

    assert!(perf.effective_miss_count > 0.0);
    assert!(perf.effective_miss_count <= 1.0);
}

#[test]
fn hidden_and_flashlight_bonus() {
    let nomod = attrs(GameMods::NONE).performance().calculate();
    let hd = attrs(GameMods::NONE.with(Mod::Hidden))
        .performance()
        .calculate();
    let fl = attrs(GameMods::NONE.with(Mod::Flashlight))
        .performance()
        .calculate();

    assert!(hd.pp > nomod.pp);
    assert!(fl.pp_flashlight > 0.0);
    assert!(fl.pp > nomod.pp);
}

#[test]
fn relax_has_no_speed_or_accuracy() {
    let perf = attrs(GameMods::NONE.with(Mod::Relax))
        .performance()
        .calculate();

    assert_eq!(perf.pp_speed, 0.0);
    assert_eq!(perf.pp_acc, 0.0);
    assert!(perf.pp_aim > 0.0);
}

#[test]
fn lower_accuracy_lowers_pp() {
    let attrs = attrs(GameMods::NONE);

    let ss = OsuPerformance::new(attrs.clone()).accuracy(100.0).calculate();
    let lower = OsuPerformance::new(attrs).accuracy(95.0).calculate();

    assert_eq!(lower.difficulty.max_combo, ss.difficulty.max_combo);
    assert!(lower.pp_acc < ss.pp_acc);
    assert!(lower.pp < ss.pp);
}

#[test]
fn no_fail_penalty() {
    let attrs = attrs(GameMods::NONE);

    let nomod = OsuPerformance::new(attrs.clone()).misses(1).calculate();
    let nf = OsuPerformance::new(attrs)
        .mods(GameMods::NONE.with(Mod::NoFail))
        .misses(1)
        .calculate();

    assert!(nf.pp < nomod.pp);
    assert!(nf.pp >= nomod.pp * 0.9 - 1e-9);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn more_misses_never_increase_pp(misses in 0_u32..24) {
        let attrs = attrs(GameMods::NONE);

        let fewer = OsuPerformance::new(attrs.clone()).misses(misses).calculate();
        let more = OsuPerformance::new(attrs).misses(misses + 1).calculate();

        prop_assert!(more.pp <= fewer.pp);
    }

    #[test]
    fn higher_accuracy_never_decreases_pp(
        a in 0.0_f64..=100.0,
        b in 0.0_f64..=100.0,
        misses in 0_u32..5,
        combo in 1_u32..=31,
    ) {
        let attrs = attrs(GameMods::NONE);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let pp = |acc: f64| {
            OsuPerformance::new(attrs.clone())
                .accuracy(acc)
                .misses(misses)
                .combo(combo)
                .calculate()
                .pp
        };

        prop_assert!(pp(lo) <= pp(hi));
    }

    #[test]
    fn generated_state_matches_accuracy(acc in 20.0_f64..=100.0) {
        // 25 objects only allow coarse accuracy steps
        let state = OsuPerformance::new(attrs(GameMods::NONE))
            .accuracy(acc)
            .generate_state();

        prop_assert!((state.accuracy() - acc / 100.0).abs() < 0.014);
    }

    #[test]
    fn generated_state_is_consistent(acc in 0.0_f64..=100.0, misses in 0_u32..40) {
        let attrs = attrs(GameMods::NONE);
        let n_objects = attrs.n_objects();

        let state = OsuPerformance::new(attrs)
            .accuracy(acc)
            .misses(misses)
            .generate_state();

        prop_assert_eq!(state.total_hits(), n_objects);
        prop_assert_eq!(state.misses, misses.min(n_objects));
    }
}
