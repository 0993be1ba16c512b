//! Demo scene integration tests: run the frame loop on simulated time.

use gamedelay::components::delay::Delay;
use gamedelay::game::{DemoReport, FireLog, run_frames, setup_world, spawn_demo_entities};
use gamedelay::resources::clock::ManualTimeSource;
use gamedelay::resources::democonfig::DemoConfig;
use gamedelay::systems::gamepause::is_paused;

fn count_lines(lines: &[String], needle: &str) -> usize {
    lines.iter().filter(|l| l.contains(needle)).count()
}

#[test]
fn demo_runs_full_scene_with_pause_window() {
    let time = ManualTimeSource::new(0);
    let mut world = setup_world(time.clone());
    let entities = spawn_demo_entities(&mut world, 7);
    let config = DemoConfig::new();

    let report = run_frames(&mut world, &config, |ms| time.advance(ms));

    // 16ms frames over 3000ms; frames starting in [1000, 1500) are paused.
    assert_eq!(
        report,
        DemoReport {
            frames: 188,
            ticks: 157
        }
    );
    assert!(!is_paused(&world));

    let lines = world.resource::<FireLog>().lines.clone();
    assert_eq!(count_lines(&lines, "exploded"), 1);
    assert_eq!(count_lines(&lines, "spawned a minion"), 4);
    assert_eq!(count_lines(&lines, "is done"), 1);
    assert_eq!(count_lines(&lines, "stopped"), 1);
    assert!(count_lines(&lines, "blinked") > 0);

    let stopped_at = lines.iter().position(|l| l.contains("stopped")).unwrap();
    assert!(lines[stopped_at..].iter().all(|l| !l.contains("blinked")));
    let done_at = lines.iter().position(|l| l.contains("is done")).unwrap();
    assert!(lines[done_at..].iter().all(|l| !l.contains("spawned")));

    for entity in [entities.bomb, entities.spawner, entities.blinker] {
        assert!(world.get::<Delay>(entity).unwrap().is_empty());
    }
}

#[test]
fn demo_bomb_waits_out_the_pause() {
    let time = ManualTimeSource::new(0);
    let mut world = setup_world(time.clone());
    spawn_demo_entities(&mut world, 7);
    let mut config = DemoConfig::new();
    config.pause_at_ms = 500;
    config.pause_for_ms = 1000;
    config.run_ms = 1200;

    run_frames(&mut world, &config, |ms| time.advance(ms));

    let lines = world.resource::<FireLog>().lines.clone();
    assert_eq!(count_lines(&lines, "exploded"), 0);
}
