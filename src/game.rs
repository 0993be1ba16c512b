//! Demo scene and frame loop for the `gamedelay` binary.
//!
//! Builds a world with a [`Clock`], spawns a few entities that schedule
//! delayed callbacks, and drives [`delay_tick_system`] frame by frame, with a
//! pause window taken from [`DemoConfig`]. Every callback appends a line to
//! the [`FireLog`] resource and logs it.
//!
//! The scene:
//! - `bomb` – one-shot after 750ms
//! - `spawner` – fires every ~400ms, three repeats, then completes
//! - `blinker` – fires every 250ms forever, until a second delay on the same
//!   entity cancels it after 2000ms

use bevy_ecs::prelude::*;
use fastrand::Rng;
use log::info;
use std::time::Duration;

use crate::components::delay::{DelayCallback, Repeat};
use crate::resources::clock::{Clock, TimeSource};
use crate::resources::democonfig::DemoConfig;
use crate::resources::gamepause::GamePause;
use crate::systems::delay::{DelayExt, delay_tick_system, register_delay_observers};
use crate::systems::gamepause::{game_not_paused, is_paused, set_paused};

/// Lines recorded by the demo callbacks, oldest first.
#[derive(Resource, Debug, Default)]
pub struct FireLog {
    pub lines: Vec<String>,
}

/// Entities spawned by [`spawn_demo_entities`].
#[derive(Debug, Clone, Copy)]
pub struct DemoEntities {
    pub bomb: Entity,
    pub spawner: Entity,
    pub blinker: Entity,
}

/// Summary of a [`run_frames`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DemoReport {
    /// Loop iterations, paused ones included.
    pub frames: u64,
    /// Iterations where the delay tick ran.
    pub ticks: u64,
}

/// Create a world with the clock, pause state and delay observers installed.
pub fn setup_world(source: impl TimeSource + 'static) -> World {
    let mut world = World::new();
    world.insert_resource(Clock::new(source));
    world.insert_resource(GamePause::new());
    world.init_resource::<FireLog>();
    register_delay_observers(&mut world);
    world
}

fn record(world: &mut World, line: String) {
    info!("{}", line);
    world.resource_mut::<FireLog>().lines.push(line);
}

fn now_ms(world: &World) -> u64 {
    Clock::sample(world.get_resource::<Clock>())
}

/// Spawn the demo entities. `seed` jitters the spawner interval.
pub fn spawn_demo_entities(world: &mut World, seed: u64) -> DemoEntities {
    let mut rng = Rng::with_seed(seed);

    let boom = DelayCallback::new(|world, entity| {
        let line = format!("{} bomb {:?} exploded", now_ms(world), entity);
        record(world, line);
    });
    let bomb = world.spawn_empty().delay(boom, 750, 0, None).id();

    let spawn = DelayCallback::new(|world, entity| {
        let line = format!("{} spawner {:?} spawned a minion", now_ms(world), entity);
        record(world, line);
    });
    let spawned_all = DelayCallback::new(|world, entity| {
        let line = format!("{} spawner {:?} is done", now_ms(world), entity);
        record(world, line);
    });
    let spawner = world
        .spawn_empty()
        .delay(spawn, 400 + rng.u64(0..100), 3, Some(spawned_all))
        .id();

    let blink = DelayCallback::new(|world, entity| {
        let line = format!("{} blinker {:?} blinked", now_ms(world), entity);
        record(world, line);
    });
    let stop_blinking = {
        let blink = blink.clone();
        DelayCallback::new(move |world, entity| {
            let line = format!("{} blinker {:?} stopped", now_ms(world), entity);
            record(world, line);
            world.entity_mut(entity).cancel_delay(&blink);
        })
    };
    let blinker = world
        .spawn_empty()
        .delay(blink, 250, Repeat::Forever, None)
        .delay(stop_blinking, 2000, 0, None)
        .id();

    DemoEntities {
        bomb,
        spawner,
        blinker,
    }
}

/// Run the frame loop for `config.run_ms` of loop time.
///
/// `advance` is called after every frame with the frame length; simulated
/// hosts move their manual clock there, realtime hosts sleep.
pub fn run_frames(
    world: &mut World,
    config: &DemoConfig,
    mut advance: impl FnMut(u64),
) -> DemoReport {
    let mut schedule = Schedule::default();
    schedule.add_systems(delay_tick_system.run_if(game_not_paused));

    let frame_ms = config.frame_ms();
    let started = now_ms(world);
    let mut report = DemoReport::default();
    loop {
        let t = now_ms(world).saturating_sub(started);
        if t >= config.run_ms {
            break;
        }
        set_paused(world, config.in_pause_window(t));
        if !is_paused(world) {
            report.ticks += 1;
        }
        schedule.run(world);
        report.frames += 1;
        advance(frame_ms);
    }
    set_paused(world, false);
    info!("Ran {} frames ({} ticked)", report.frames, report.ticks);
    report
}

/// Sleep-based frame pacing for realtime hosts.
pub fn sleep_frame(frame_ms: u64) {
    std::thread::sleep(Duration::from_millis(frame_ms));
}
