use beatmap_pp::{
    model::{
        beatmap::BreakPeriod,
        control_point::SampleBank,
        hit_object::{HitObjectKind, NestedObjectKind},
        pos2::Pos2,
    },
    Beatmap, ParseError, ParseOptions,
};

use crate::common::{test_map, JUMPS, STACKS};

mod common;

fn assert_jumps(map: &Beatmap) {
    assert_eq!(map.version, 14);
    assert_eq!(map.general.audio_file, "audio.mp3");
    assert_eq!(map.general.preview_time, 1000);
    assert_eq!(map.general.sample_bank, SampleBank::Soft);
    assert!(map.general.widescreen_storyboard);

    assert_eq!(map.metadata.title, "Jumps");
    assert_eq!(map.metadata.version, "Insane");
    assert_eq!(map.metadata.tags, ["jumps", "test"]);
    assert_eq!(map.metadata.beatmap_id, 42);
    assert_eq!(map.metadata.beatmap_set_id, 7);

    assert_eq!(map.difficulty.hp, 5.0);
    assert_eq!(map.difficulty.cs, 4.0);
    assert_eq!(map.difficulty.od, 8.0);
    assert_eq!(map.difficulty.ar, 9.0);
    assert_eq!(map.difficulty.slider_multiplier, 1.4);

    assert_eq!(map.events.background_file.as_deref(), Some("bg.jpg"));
    assert_eq!(map.events.breaks, [BreakPeriod::new(7200.0, 7900.0)]);
    assert_eq!(map.colours.combo_colours.len(), 2);

    assert_eq!(map.control_points.timing.len(), 1);
    assert_eq!(map.control_points.difficulty.len(), 2);
    assert!(map.control_points.effect.point_at(6000.0).kiai);
    assert!(!map.control_points.effect.point_at(1000.0).kiai);

    assert_eq!(map.hit_objects.len(), 25);
    assert_eq!(map.n_circles(), 22);
    assert_eq!(map.n_sliders(), 2);
    assert_eq!(map.n_spinners(), 1);
    assert_eq!(map.max_combo(), 31);
    assert_eq!(map.md5.len(), 32);
}

#[test]
fn parse_jumps() {
    assert_jumps(&test_map(JUMPS));
}

#[test]
fn objects_are_sorted_by_time() {
    let map = test_map(JUMPS);

    assert!(map
        .hit_objects
        .windows(2)
        .all(|pair| pair[0].start_time <= pair[1].start_time));
}

#[test]
fn slider_nested_objects() {
    let map = test_map(JUMPS);

    let HitObjectKind::Slider(ref slider) = map.hit_objects[20].kind else {
        panic!("expected slider");
    };

    assert_eq!(slider.repeat_count(), 1);

    let kinds: Vec<_> = slider.nested_objects().iter().map(|n| n.kind).collect();

    assert_eq!(
        kinds,
        [
            NestedObjectKind::Head,
            NestedObjectKind::Tick,
            NestedObjectKind::Repeat,
            NestedObjectKind::Tick,
            NestedObjectKind::Tail,
        ]
    );

    // The repeat sits at the end of the path, the tail back at the head
    let repeat = slider.nested_objects()[2].pos;
    assert!(repeat.distance(Pos2::new(200.0, 0.0)) < 1e-3);

    let end = map.hit_objects[20].end_pos();
    assert!(end.distance(Pos2::new(100.0, 100.0)) < 1e-3);
}

#[test]
fn same_content_same_hash() {
    let bytes = std::fs::read(JUMPS).unwrap();

    let a = Beatmap::from_bytes(&bytes).unwrap().unwrap();
    let b = test_map(JUMPS);

    assert_eq!(a.md5, b.md5);
    assert_ne!(a.md5, test_map(STACKS).md5);
}

#[test]
fn stacked_circles() {
    let map = test_map(STACKS);

    let heights: Vec<_> = map.hit_objects.iter().map(|h| h.stack_height).collect();
    assert_eq!(heights, [4, 3, 2, 1, 0]);

    let offset = map.hit_objects[0].stack_offset();
    assert!(offset.x < 0.0 && offset.y < 0.0);
}

#[test]
fn metadata_only() {
    let file = std::fs::File::open(JUMPS).unwrap();
    let options = ParseOptions::new().skip_hit_objects(true);

    let map = Beatmap::parse_with_options(file, options).unwrap().unwrap();

    assert!(map.hit_objects.is_empty());
    assert_eq!(map.metadata.title, "Jumps");
}

#[test]
fn other_modes_are_rejected() {
    let content = "osu file format v14\n\n[General]\nMode: 1\n\n[HitObjects]\n256,192,1000,1,0\n";

    assert!(Beatmap::from_bytes(content.as_bytes()).unwrap().is_none());
}

#[test]
fn missing_file() {
    assert!(matches!(
        Beatmap::from_path("./resources/does_not_exist.osu"),
        Err(ParseError::Io(_))
    ));
}

#[test]
fn bad_lines_are_skipped() {
    let content = "osu file format v14
[Difficulty]
CircleSize:four
OverallDifficulty:7
[TimingPoints]
not,a,timing,point
0,500,4,2,0,100,1,0
[HitObjects]
256,192,1000,1,0
256,192,oops,1,0
300,192,1500,1,0
";

    let map = Beatmap::from_bytes(content.as_bytes()).unwrap().unwrap();

    assert_eq!(map.difficulty.cs, 5.0);
    assert_eq!(map.difficulty.od, 7.0);
    assert_eq!(map.control_points.timing.len(), 1);
    assert_eq!(map.hit_objects.len(), 2);
}

#[test]
fn legacy_versions_are_offset() {
    let content = "osu file format v4\n[TimingPoints]\n0,500,4,1,0,100,1,0\n[HitObjects]\n256,192,1000,1,0\n";

    let map = Beatmap::from_bytes(content.as_bytes()).unwrap().unwrap();

    assert_eq!(map.hit_objects[0].start_time, 1024.0);
    assert_eq!(map.control_points.timing.points()[0].time, 24.0);
}

#[cfg(feature = "async_tokio")]
mod async_tokio {
    use tokio::runtime::Builder as RuntimeBuilder;

    use super::*;

    #[test]
    fn parse_jumps() {
        RuntimeBuilder::new_current_thread()
            .build()
            .unwrap()
            .block_on(async {
                let map = Beatmap::from_path_tokio(JUMPS).await.unwrap().unwrap();

                assert_jumps(&map);
                assert_eq!(map.md5, test_map(JUMPS).md5);
            });
    }
}

#[cfg(feature = "async_std")]
mod async_std_reader {
    use super::*;

    #[::async_std::test]
    async fn parse_jumps() {
        let map = Beatmap::from_path_async_std(JUMPS).await.unwrap().unwrap();

        assert_jumps(&map);
        assert_eq!(map.md5, test_map(JUMPS).md5);
    }
}
