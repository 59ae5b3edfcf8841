//! Per-tick simulation step
//!
//! `advance` is the engine: one call is one simulation frame. `start` and
//! `tick` layer the start/jump lifecycle on top of it.

use rand::{Rng, RngCore};

use super::autopilot;
use super::collision::check_collision;
use super::state::{GameEvent, GamePhase, Pipe, World};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Start (or restart after a crash); no-op while running
    pub start: bool,
    /// Jump while running; starts/restarts otherwise
    pub jump: bool,
    /// Demo mode - the autopilot decides jumps
    pub autopilot: bool,
}

/// Begin a session, or replace a finished one with a fresh running world
pub fn start(world: &mut World, now: f64) -> Vec<GameEvent> {
    let event = match world.phase {
        GamePhase::Running => return Vec::new(),
        GamePhase::Idle => GameEvent::Started,
        GamePhase::Over => {
            // Next seed comes from the finished world so replays stay deterministic
            let seed = world.rng.next_u64();
            *world = World::fresh(world.tuning.clone(), seed);
            GameEvent::Restarted
        }
    };

    world.phase = GamePhase::Running;
    world.session_started_at = now;
    world.last_speed_increase_at = now;
    log::info!("Session started (seed {})", world.seed);

    vec![event]
}

/// Apply one frame of input: lifecycle transitions when not running,
/// otherwise a simulation step
pub fn tick(world: &mut World, input: &TickInput, now: f64) -> Vec<GameEvent> {
    if world.phase != GamePhase::Running {
        if input.start || input.jump || input.autopilot {
            return start(world, now);
        }
        return Vec::new();
    }

    let jump = input.jump || (input.autopilot && autopilot::wants_jump(world));
    advance(world, now, jump)
}

/// Advance a running world by one frame. No-op in any other phase.
pub fn advance(world: &mut World, now: f64, jump_requested: bool) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if world.phase != GamePhase::Running {
        return events;
    }

    // Difficulty ramp (wall clock; a clock that runs backwards counts as no time)
    let elapsed = (now - world.last_speed_increase_at).max(0.0);
    if elapsed >= world.tuning.speed_increase_interval_ms
        && world.speed_multiplier < world.tuning.max_speed_multiplier
    {
        world.speed_multiplier = (world.speed_multiplier + world.tuning.speed_increment)
            .min(world.tuning.max_speed_multiplier);
        world.last_speed_increase_at = now;
        log::info!("Speed up: {:.1}x", world.speed_multiplier);
        events.push(GameEvent::SpeedUp {
            multiplier: world.speed_multiplier,
            at: now,
        });
    }

    // Gravity always accumulates; a jump then overrides the velocity outright
    world.bird_velocity_y += world.tuning.gravity * world.speed_multiplier;
    if jump_requested {
        world.bird_velocity_y = world.tuning.jump_strength;
        events.push(GameEvent::Jumped);
    }
    world.bird_y += world.bird_velocity_y;

    if world.frame_count % world.tuning.spawn_interval_frames == 0 {
        let id = spawn_pipe(world);
        events.push(GameEvent::PipeSpawned { id });
    }

    // Scroll, score crossings, drop pipes that left the screen
    let step = world.pipe_step();
    let bird_x = world.tuning.bird_x;
    let width = world.tuning.pipe_width;
    let mut scored = 0;
    for pipe in &mut world.pipes {
        let before = pipe.trailing_edge(width);
        pipe.x -= step;
        if !pipe.passed && before > bird_x && pipe.trailing_edge(width) <= bird_x {
            pipe.passed = true;
            scored += 1;
        }
    }
    world.pipes.retain(|p| p.x > -width);
    for _ in 0..scored {
        world.score += 1;
        log::debug!("Scored: {}", world.score);
        events.push(GameEvent::Scored { score: world.score });
    }

    if let Some(cause) = check_collision(world) {
        world.phase = GamePhase::Over;
        log::info!(
            "Crashed into {:?} - score {}, speed {:.1}x",
            cause,
            world.score,
            world.speed_multiplier
        );
        events.push(GameEvent::Crashed { cause });
        return events;
    }

    world.frame_count += 1;
    events
}

/// Append a pipe at the right edge with a uniformly placed gap
fn spawn_pipe(world: &mut World) -> u32 {
    let min = world.tuning.min_gap_y();
    let max = world.tuning.max_gap_y();
    let gap_y = world.rng.random_range(min..=max);

    let id = world.next_pipe_id();
    world.pipes.push(Pipe {
        id,
        x: world.tuning.world_width,
        gap_y,
        passed: false,
    });
    log::debug!("Spawned pipe {} (gap at {:.0})", id, gap_y);
    id
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::CollisionKind;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_world(tuning: Tuning) -> World {
        let mut world = World::new(tuning, 12345).unwrap();
        start(&mut world, 0.0);
        world
    }

    /// No gravity, no spawning: a world where nothing happens unless a test sets it up
    fn still_tuning() -> Tuning {
        Tuning {
            gravity: 0.0,
            spawn_interval_frames: 100_000,
            ..Default::default()
        }
    }

    #[test]
    fn test_idle_to_running() {
        let mut world = World::new(Tuning::default(), 1).unwrap();
        let events = tick(&mut world, &TickInput::default(), 5.0);
        assert!(events.is_empty());
        assert_eq!(world.phase, GamePhase::Idle);

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut world, &input, 100.0);
        assert_eq!(events, vec![GameEvent::Started]);
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.session_started_at, 100.0);
        assert_eq!(world.last_speed_increase_at, 100.0);
        // The starting press does not also flap
        assert_eq!(world.bird_velocity_y, 0.0);
    }

    #[test]
    fn test_start_is_noop_while_running() {
        let mut world = running_world(Tuning::default());
        advance(&mut world, 10.0, false);
        let before_y = world.bird_y;
        assert!(start(&mut world, 20.0).is_empty());
        assert_eq!(world.bird_y, before_y);
        assert_eq!(world.session_started_at, 0.0);
    }

    #[test]
    fn test_gravity_step() {
        let mut world = running_world(Tuning::default());
        advance(&mut world, 1.0, false);
        assert_eq!(world.bird_velocity_y, 0.5);
        assert_eq!(world.bird_y, 250.5);
    }

    #[test]
    fn test_jump_overrides_velocity() {
        let mut world = running_world(Tuning::default());
        world.bird_velocity_y = 3.0;
        let events = advance(&mut world, 1.0, true);
        assert!(events.contains(&GameEvent::Jumped));
        assert_eq!(world.bird_velocity_y, -9.0);
        assert_eq!(world.bird_y, 241.0);
    }

    #[test]
    fn test_gravity_scaled_by_multiplier() {
        let mut world = running_world(Tuning::default());
        world.speed_multiplier = 2.0;
        advance(&mut world, 1.0, false);
        assert_eq!(world.bird_velocity_y, 1.0);
    }

    #[test]
    fn test_spawn_cadence() {
        let mut world = running_world(Tuning {
            gravity: 0.0,
            ..Default::default()
        });
        let events = advance(&mut world, 0.0, false);
        assert!(events.contains(&GameEvent::PipeSpawned { id: 1 }));
        assert_eq!(world.pipes.len(), 1);
        // Spawned at the right edge, then scrolled with everything else this frame
        assert_eq!(world.pipes[0].x, 597.0);

        let gap_y = world.pipes[0].gap_y;
        assert!((50.0..=270.0).contains(&gap_y));

        for _ in 1..90 {
            let events = advance(&mut world, 0.0, false);
            assert!(!events.iter().any(|e| matches!(e, GameEvent::PipeSpawned { .. })));
        }
        let events = advance(&mut world, 0.0, false);
        assert!(events.contains(&GameEvent::PipeSpawned { id: 2 }));
        assert_eq!(world.pipes.len(), 2);
    }

    #[test]
    fn test_spawns_replay_with_same_seed() {
        let tuning = Tuning {
            gravity: 0.0,
            spawn_interval_frames: 1,
            ..Default::default()
        };
        let mut a = World::new(tuning.clone(), 42).unwrap();
        let mut b = World::new(tuning, 42).unwrap();
        start(&mut a, 0.0);
        start(&mut b, 0.0);
        for _ in 0..10 {
            advance(&mut a, 0.0, false);
            advance(&mut b, 0.0, false);
        }
        let gaps_a: Vec<f32> = a.pipes.iter().map(|p| p.gap_y).collect();
        let gaps_b: Vec<f32> = b.pipes.iter().map(|p| p.gap_y).collect();
        assert_eq!(gaps_a, gaps_b);
    }

    #[test]
    fn test_pipe_removed_once_fully_off_screen() {
        let mut world = running_world(still_tuning());
        world.frame_count = 1;
        // Gap keeps the stationary bird (250..280) safe while the pipe passes
        world.pipes.push(Pipe {
            id: 1,
            x: 600.0,
            gap_y: 200.0,
            passed: false,
        });

        for _ in 0..201 {
            advance(&mut world, 0.0, false);
        }
        assert_eq!(world.pipes.len(), 1);
        assert_eq!(world.pipes[0].x, -3.0);

        for _ in 201..219 {
            advance(&mut world, 0.0, false);
        }
        assert_eq!(world.pipes[0].x, -57.0);

        advance(&mut world, 0.0, false);
        assert!(world.pipes.is_empty(), "x = -60 is fully off screen");

        for _ in 220..221 {
            advance(&mut world, 0.0, false);
        }
        assert!(world.pipes.is_empty());
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_score_exactly_once_per_pipe() {
        let mut world = running_world(still_tuning());
        world.frame_count = 1;
        world.pipes.push(Pipe {
            id: 1,
            x: 600.0,
            gap_y: 200.0,
            passed: false,
        });

        let mut scored_at = Vec::new();
        for frame in 0..230 {
            let events = advance(&mut world, 0.0, false);
            if events.iter().any(|e| matches!(e, GameEvent::Scored { .. })) {
                scored_at.push(frame);
            }
        }
        // Trailing edge 660 - 3 * (frame + 1) first drops to <= 80 (78) at frame 193
        assert_eq!(scored_at, vec![193]);
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_score_counts_exact_landing_on_bird_column() {
        let mut world = running_world(still_tuning());
        world.frame_count = 1;
        // Trailing edge at 83 -> 80 after one step of 3
        world.pipes.push(Pipe {
            id: 1,
            x: 23.0,
            gap_y: 200.0,
            passed: false,
        });
        let events = advance(&mut world, 0.0, false);
        assert!(events.contains(&GameEvent::Scored { score: 1 }));

        let events = advance(&mut world, 0.0, false);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
        assert_eq!(world.score, 1);
    }

    #[test]
    fn test_score_matches_pipes_crossed() {
        // Gap spans the whole height so the bird never crashes
        let mut world = running_world(Tuning {
            gravity: 0.0,
            gap_height: 500.0,
            gap_margin: 0.0,
            ..Default::default()
        });

        let mut spawned = 0;
        for frame in 0..3000 {
            let now = frame as f64 * 1000.0 / 60.0;
            let events = advance(&mut world, now, false);
            spawned += events
                .iter()
                .filter(|e| matches!(e, GameEvent::PipeSpawned { .. }))
                .count();
        }
        assert_eq!(world.phase, GamePhase::Running);
        assert!(world.speed_multiplier > 1.0);

        let bird_x = world.tuning.bird_x;
        let width = world.tuning.pipe_width;
        let removed = spawned - world.pipes.len();
        let crossed_on_screen = world
            .pipes
            .iter()
            .filter(|p| p.trailing_edge(width) <= bird_x)
            .count();
        assert!(removed > 0);
        assert_eq!(world.score as usize, removed + crossed_on_screen);
    }

    #[test]
    fn test_speed_ramp_steps_on_wall_clock() {
        let mut world = running_world(still_tuning());

        advance(&mut world, 9_999.0, false);
        assert_eq!(world.speed_multiplier, 1.0);

        let events = advance(&mut world, 10_000.0, false);
        assert!(events.contains(&GameEvent::SpeedUp {
            multiplier: 1.2,
            at: 10_000.0
        }));
        assert_eq!(world.last_speed_increase_at, 10_000.0);

        // Next step is measured from the last increase
        advance(&mut world, 15_000.0, false);
        assert_eq!(world.speed_multiplier, 1.2);
    }

    #[test]
    fn test_speed_ramp_caps_at_max() {
        let mut world = running_world(still_tuning());
        world.speed_multiplier = 2.4;
        advance(&mut world, 10_000.0, false);
        assert_eq!(world.speed_multiplier, 2.5);

        let events = advance(&mut world, 20_000.0, false);
        assert_eq!(world.speed_multiplier, 2.5);
        assert!(!events.iter().any(|e| matches!(e, GameEvent::SpeedUp { .. })));
        assert_eq!(world.last_speed_increase_at, 10_000.0);
    }

    #[test]
    fn test_backwards_clock_does_not_ramp() {
        let mut world = running_world(still_tuning());
        world.last_speed_increase_at = 50_000.0;
        advance(&mut world, 0.0, false);
        assert_eq!(world.speed_multiplier, 1.0);
        assert_eq!(world.last_speed_increase_at, 50_000.0);
    }

    #[test]
    fn test_crash_freezes_world() {
        let mut world = running_world(Tuning::default());
        world.bird_y = 0.2;
        world.bird_velocity_y = -1.0;

        let events = advance(&mut world, 0.0, false);
        assert!(events.contains(&GameEvent::Crashed {
            cause: CollisionKind::Ceiling
        }));
        assert_eq!(world.phase, GamePhase::Over);
        let frozen_frames = world.frame_count;
        let frozen_y = world.bird_y;
        let frozen_pipes = world.pipes.clone();

        for i in 0..10 {
            assert!(advance(&mut world, 20_000.0 * i as f64, true).is_empty());
        }
        assert_eq!(world.frame_count, frozen_frames);
        assert_eq!(world.bird_y, frozen_y);
        assert_eq!(world.pipes, frozen_pipes);
        assert_eq!(world.speed_multiplier, 1.0);
    }

    #[test]
    fn test_restart_resets_to_fresh_running_world() {
        let mut world = running_world(Tuning::default());
        for _ in 0..5 {
            advance(&mut world, 0.0, false);
        }
        world.score = 4;
        world.speed_multiplier = 1.8;
        world.bird_y = 600.0;
        advance(&mut world, 0.0, false);
        assert_eq!(world.phase, GamePhase::Over);

        let input = TickInput {
            jump: true,
            ..Default::default()
        };
        let events = tick(&mut world, &input, 77.0);
        assert_eq!(events, vec![GameEvent::Restarted]);

        let fresh = World::new(Tuning::default(), world.seed).unwrap();
        assert_eq!(world.phase, GamePhase::Running);
        assert_eq!(world.bird_y, fresh.bird_y);
        assert_eq!(world.bird_velocity_y, 0.0);
        assert!(world.pipes.is_empty());
        assert_eq!(world.frame_count, 0);
        assert_eq!(world.score, 0);
        assert_eq!(world.speed_multiplier, 1.0);
        assert_eq!(world.session_started_at, 77.0);
        assert_eq!(world.last_speed_increase_at, 77.0);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..300)
            .map(|i| TickInput {
                jump: i % 17 == 0,
                ..Default::default()
            })
            .collect();

        let run = || {
            let mut world = World::new(Tuning::default(), 99999).unwrap();
            let mut log = Vec::new();
            for (i, input) in inputs.iter().enumerate() {
                log.extend(tick(&mut world, input, i as f64 * 16.0));
            }
            (world, log)
        };

        let (w1, log1) = run();
        let (w2, log2) = run();
        assert_eq!(log1, log2);
        assert_eq!(w1.frame_count, w2.frame_count);
        assert_eq!(w1.bird_y, w2.bird_y);
        assert_eq!(w1.pipes, w2.pipes);
    }

    proptest! {
        #[test]
        fn prop_speed_multiplier_monotonic_and_capped(
            deltas in prop::collection::vec(0.0f64..4_000.0, 1..200),
        ) {
            let mut world = running_world(still_tuning());
            let mut now = 0.0;
            let mut last = world.speed_multiplier;
            for dt in deltas {
                now += dt;
                advance(&mut world, now, false);
                prop_assert!(world.speed_multiplier >= last);
                prop_assert!(world.speed_multiplier <= world.tuning.max_speed_multiplier);
                last = world.speed_multiplier;
            }
        }

        #[test]
        fn prop_pipes_only_move_left(jumps in prop::collection::vec(any::<bool>(), 1..150)) {
            let mut world = running_world(Tuning {
                spawn_interval_frames: 7,
                ..Default::default()
            });
            for jump in jumps {
                let before: Vec<(u32, f32)> = world.pipes.iter().map(|p| (p.id, p.x)).collect();
                advance(&mut world, 0.0, jump);
                if world.phase != GamePhase::Running {
                    break;
                }
                for (id, x) in before {
                    if let Some(pipe) = world.pipes.iter().find(|p| p.id == id) {
                        prop_assert!(pipe.x < x);
                    }
                }
                prop_assert!(world.pipes.iter().all(|p| p.x > -world.tuning.pipe_width));
            }
        }
    }
}
