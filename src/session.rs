//! Tick driver between the display loop and the simulation
//!
//! Display frames arrive at whatever rate the browser refreshes; the world is
//! advanced at a fixed `SIM_HZ` so motion speed does not depend on the monitor.

use crate::consts::*;
use crate::sim::{FrameView, GameEvent, GamePhase, TickInput, World, tick};
use crate::tuning::{Tuning, TuningError};

/// One play session: the world plus pending input and timestep bookkeeping
pub struct Session {
    world: World,
    /// One-shot commands waiting for the next tick
    input: TickInput,
    autopilot: bool,
    accumulator: f64,
    last_time: Option<f64>,
    /// Events produced by the most recent `frame`
    events: Vec<GameEvent>,
}

impl Session {
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, TuningError> {
        Ok(Self {
            world: World::new(tuning, seed)?,
            input: TickInput::default(),
            autopilot: false,
            accumulator: 0.0,
            last_time: None,
            events: Vec::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn phase(&self) -> GamePhase {
        self.world.phase
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn autopilot(&self) -> bool {
        self.autopilot
    }

    /// Queue a start/restart
    pub fn start(&mut self) {
        self.input.start = true;
    }

    /// Queue a jump (starts or restarts when not running)
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    pub fn toggle_autopilot(&mut self) {
        self.autopilot = !self.autopilot;
        log::info!("Autopilot: {}", self.autopilot);
    }

    /// Forget the last frame time (after the tab was hidden) so the gap is not replayed
    pub fn suspend(&mut self) {
        self.last_time = None;
        self.accumulator = 0.0;
    }

    /// Run the simulation up to `now` and snapshot it for drawing
    pub fn frame(&mut self, now: f64) -> FrameView {
        let dt = match self.last_time {
            Some(last) => (now - last).clamp(0.0, MAX_FRAME_DELTA_MS),
            None => SIM_DT_MS,
        };
        self.last_time = Some(now);
        self.events.clear();

        if self.world.phase != GamePhase::Running {
            // Lifecycle transitions happen on the frame the command arrives
            self.accumulator = 0.0;
            let input = self.take_input();
            self.events.extend(tick(&mut self.world, &input, now));
            return FrameView::capture(&self.world, &self.events);
        }

        self.accumulator += dt;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT_MS && substeps < MAX_SUBSTEPS {
            let input = self.take_input();
            self.events.extend(tick(&mut self.world, &input, now));
            self.accumulator -= SIM_DT_MS;
            substeps += 1;

            if self.world.phase != GamePhase::Running {
                self.accumulator = 0.0;
                break;
            }
        }
        // Drop any backlog the substep cap left behind
        self.accumulator = self.accumulator.min(SIM_DT_MS);

        FrameView::capture(&self.world, &self.events)
    }

    /// Current one-shot input, clearing it for the next tick
    fn take_input(&mut self) -> TickInput {
        let mut input = std::mem::take(&mut self.input);
        input.autopilot = self.autopilot;
        input
    }
}
