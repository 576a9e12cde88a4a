//! Host-side game loop
//!
//! Owns the session and feeds it fixed ticks from a clock. Raw input is queued
//! between frames and translated one event at a time against the live state
//! at the start of the next tick.

use super::clock::Clock;
use super::input::{InputEvent, translate};
use super::scheduler::FixedStep;
use crate::audio::Notifier;
use crate::consts::MAX_SUBSTEPS;
use crate::sim::{Command, GameState, TickInput, tick};

pub struct Runner<C: Clock, N: Notifier> {
    state: GameState,
    clock: C,
    scheduler: FixedStep,
    notifier: N,
    input: TickInput,
    pending: Vec<InputEvent>,
    ticks: u64,
}

impl<C: Clock, N: Notifier> Runner<C, N> {
    /// `step` is the fixed tick interval in seconds
    pub fn new(state: GameState, clock: C, notifier: N, step: f64) -> Self {
        Self {
            state,
            clock,
            scheduler: FixedStep::new(step, MAX_SUBSTEPS),
            notifier,
            input: TickInput::default(),
            pending: Vec::new(),
            ticks: 0,
        }
    }

    /// Let the paddle play by itself
    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Queue a raw input event for the next tick
    pub fn handle_input(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Queue a command directly
    pub fn push_command(&mut self, command: Command) {
        self.input.commands.push(command);
    }

    /// Run however many ticks the clock says are due. Returns the count.
    pub fn frame(&mut self) -> u32 {
        let steps = self.scheduler.advance(self.clock.now());
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Run a single tick immediately
    pub fn step(&mut self) {
        // Each event sees the effect of the one before it
        for event in std::mem::take(&mut self.pending) {
            if let Some(command) = translate(&self.state, event) {
                self.state.apply_command(command);
            }
        }

        let dt = self.scheduler.step() as f32;
        tick(&mut self.state, &self.input, dt);
        self.ticks += 1;

        // Clear one-shot inputs after processing
        self.input.commands.clear();
        self.input.pointer_x = None;

        let events = self.state.drain_events();
        self.notifier.play_events(&events);
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit_requested
    }

    pub fn into_state(self) -> GameState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SoundEffect;
    use crate::consts::SIM_DT;
    use crate::platform::clock::ManualClock;
    use crate::platform::input::{Key, MouseButton};
    use crate::sim::Mode;
    use crate::ui::MenuItem;

    #[derive(Default)]
    struct Recorder(Vec<SoundEffect>);

    impl Notifier for Recorder {
        fn play(&mut self, effect: SoundEffect) {
            self.0.push(effect);
        }
    }

    fn runner() -> Runner<ManualClock, Recorder> {
        Runner::new(
            GameState::new(5),
            ManualClock::new(),
            Recorder::default(),
            f64::from(SIM_DT),
        )
    }

    #[test]
    fn test_frames_follow_clock() {
        let mut runner = runner();
        assert_eq!(runner.frame(), 0);
        runner.clock_mut().advance(0.05);
        assert_eq!(runner.frame(), 3);
        assert_eq!(runner.ticks(), 3);
        assert!(runner.state().clock > 0.04);
    }

    #[test]
    fn test_space_starts_then_releases() {
        let mut runner = runner();
        runner.handle_input(InputEvent::Key(Key::Space));
        runner.step();
        assert_eq!(runner.state().mode, Mode::Playing);
        assert!(runner.state().balls[0].stuck);

        runner.handle_input(InputEvent::Key(Key::Space));
        runner.step();
        assert!(!runner.state().balls[0].stuck);
    }

    #[test]
    fn test_one_shot_commands_clear() {
        let mut runner = runner();
        runner.push_command(Command::StartGame);
        runner.step();
        runner.push_command(Command::TogglePause);
        runner.step();
        assert_eq!(runner.state().mode, Mode::Menu);
        // The toggle must not fire again
        runner.step();
        assert_eq!(runner.state().mode, Mode::Menu);
    }

    #[test]
    fn test_pointer_moves_paddle() {
        let mut runner = runner();
        runner.handle_input(InputEvent::PointerMove { x: 150.0, y: 0.0 });
        runner.step();
        assert!((runner.state().paddle.center_x() - 150.0).abs() < 1e-3);
    }

    #[test]
    fn test_exit_click_requests_quit() {
        let mut runner = runner();
        let (min, size) = MenuItem::Exit.bounds(&runner.state().viewport);
        let center = min + size * 0.5;
        runner.handle_input(InputEvent::Click {
            x: center.x,
            y: center.y,
            button: MouseButton::Left,
        });
        runner.step();
        assert!(runner.should_quit());
    }

    #[test]
    fn test_clicks_translate_in_order() {
        let mut state = GameState::new(5);
        state.apply_command(Command::StartGame);
        state.laser_enabled = true;
        let mut runner = Runner::new(
            state,
            ManualClock::new(),
            Recorder::default(),
            f64::from(SIM_DT),
        );
        assert!(runner.state().balls[0].stuck);

        let click = InputEvent::Click {
            x: 400.0,
            y: 300.0,
            button: MouseButton::Left,
        };
        runner.handle_input(click);
        runner.handle_input(click);
        runner.step();

        // First click releases, second fires
        assert!(!runner.state().balls[0].stuck);
        assert_eq!(runner.state().lasers.len(), 1);
    }

    #[test]
    fn test_queued_input_waits_for_tick() {
        let mut runner = runner();
        runner.handle_input(InputEvent::Key(Key::Space));
        assert_eq!(runner.state().mode, Mode::Menu);
        runner.step();
        assert_eq!(runner.state().mode, Mode::Playing);
        runner.step();
        assert!(runner.state().balls[0].stuck);
    }

    #[test]
    fn test_events_reach_notifier() {
        let mut runner = runner();
        runner.set_autopilot(true);
        runner.push_command(Command::StartGame);
        for _ in 0..600 {
            runner.step();
        }
        assert!(runner.notifier().0.contains(&SoundEffect::Notify));
        assert!(runner.state().events().is_empty());
    }
}
