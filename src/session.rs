//! Session loop and its platform collaborators
//!
//! A session polls input, steps the simulation, draws the frame and waits
//! for the clock, until the player quits or the avatar is defeated.

use std::collections::VecDeque;
use std::thread;
use std::time::{Duration, Instant};

use crate::render::{Renderer, draw_frame};
use crate::settings::Settings;
use crate::sim::{GameState, TickInput, tick};

/// Source of per-frame input (keyboard, script, autopilot)
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Paces the loop to the frame rate
pub trait Clock {
    /// Block until the next tick is due
    fn wait_tick(&mut self);
}

/// Clock that sleeps to hold a fixed number of ticks per second
#[derive(Debug, Clone)]
pub struct FixedRateClock {
    /// None when running as fast as possible
    period: Option<Duration>,
    deadline: Option<Instant>,
    /// Total ticks waited so far
    pub ticks: u64,
}

impl FixedRateClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            period: Some(Duration::from_secs(1) / frame_rate.max(1)),
            deadline: None,
            ticks: 0,
        }
    }

    /// Clock that never sleeps (headless runs and tests)
    pub fn unpaced() -> Self {
        Self {
            period: None,
            deadline: None,
            ticks: 0,
        }
    }
}

impl Clock for FixedRateClock {
    /// Sleep until one period past the previous deadline. A late frame moves
    /// the schedule forward instead of running catch-up frames back to back.
    fn wait_tick(&mut self) {
        self.ticks += 1;
        let Some(period) = self.period else {
            return;
        };

        let now = Instant::now();
        let due = self.deadline.map_or(now + period, |d| d + period);
        if due > now {
            thread::sleep(due - now);
            self.deadline = Some(due);
        } else {
            self.deadline = Some(now);
        }
    }
}

/// Plays back a fixed list of inputs, then asks to quit
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        self.frames.pop_front().unwrap_or(TickInput {
            quit: true,
            ..Default::default()
        })
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Quit request from the input source
    Quit,
    /// Avatar hit by a bomb outside hyper mode
    Defeated,
    /// Frame limit reached (headless runs)
    FrameLimit,
}

/// Loop parameters taken from the settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Clock ticks to linger on the final frame after a defeat
    pub game_over_delay_frames: u32,
    pub max_frames: Option<u64>,
}

impl SessionConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            game_over_delay_frames: settings.game_over_delay_frames,
            max_frames: None,
        }
    }

    pub fn with_max_frames(mut self, max_frames: u64) -> Self {
        self.max_frames = Some(max_frames);
        self
    }
}

/// Summary of a finished session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub frames: u64,
    pub score: u64,
}

/// Run the session loop until quit, defeat or the frame limit
pub fn run_session(
    state: &mut GameState,
    input: &mut impl InputSource,
    renderer: &mut impl Renderer,
    clock: &mut impl Clock,
    config: SessionConfig,
) -> SessionReport {
    log::info!(
        "Session started: seed {}, field {}x{}",
        state.seed,
        state.field.width,
        state.field.height
    );

    let outcome = loop {
        if config.max_frames.is_some_and(|max| state.frame >= max) {
            break SessionOutcome::FrameLimit;
        }

        let frame_input = input.poll(state);
        if frame_input.quit {
            break SessionOutcome::Quit;
        }

        tick(state, &frame_input);
        draw_frame(state, renderer);
        clock.wait_tick();

        if state.is_over() {
            // The sad avatar stays on screen for a moment
            for _ in 0..config.game_over_delay_frames {
                clock.wait_tick();
            }
            break SessionOutcome::Defeated;
        }
    };

    let report = SessionReport {
        outcome,
        frames: state.frame,
        score: state.score.balance(),
    };
    log::info!(
        "Session ended ({:?}) after {} frames with score {}",
        report.outcome,
        report.frames,
        report.score
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{RecordingRenderer, SpriteKind};
    use crate::sim::{Bomb, BombState, Key, Mood, Rect};
    use glam::Vec2;

    fn config() -> SessionConfig {
        SessionConfig {
            game_over_delay_frames: 5,
            max_frames: None,
        }
    }

    #[test]
    fn test_scripted_quit() {
        let mut state = GameState::new(&Settings::default(), 4);
        let mut input = ScriptedInput::new(vec![
            TickInput::default(),
            TickInput::default().press(Key::Fire),
            TickInput::default().press(Key::Quit),
            TickInput::default(),
        ]);
        let mut renderer = RecordingRenderer::new();
        let mut clock = FixedRateClock::unpaced();

        let report = run_session(&mut state, &mut input, &mut renderer, &mut clock, config());

        assert_eq!(report.outcome, SessionOutcome::Quit);
        assert_eq!(report.frames, 2);
        assert_eq!(renderer.frames_presented, 2);
        assert_eq!(clock.ticks, 2);
    }

    #[test]
    fn test_script_exhaustion_quits() {
        let mut state = GameState::new(&Settings::default(), 4);
        let mut input = ScriptedInput::default();
        let report = run_session(
            &mut state,
            &mut input,
            &mut RecordingRenderer::new(),
            &mut FixedRateClock::unpaced(),
            config(),
        );
        assert_eq!(report.outcome, SessionOutcome::Quit);
        assert_eq!(report.frames, 0);
    }

    #[test]
    fn test_defeat_lingers_on_final_frame() {
        let mut state = GameState::new(&Settings::default(), 4);
        let center = state.avatar.rect.center;
        state.bombs.push(Bomb {
            id: 999,
            rect: Rect::from_center(center, Vec2::splat(20.0)),
            vel: Vec2::Y,
            speed: 0.0,
            state: BombState::Active,
            color: 0,
        });
        let mut input = ScriptedInput::new(vec![TickInput::default(); 10]);
        let mut renderer = RecordingRenderer::new();
        let mut clock = FixedRateClock::unpaced();

        let report = run_session(&mut state, &mut input, &mut renderer, &mut clock, config());

        assert_eq!(report.outcome, SessionOutcome::Defeated);
        assert_eq!(renderer.frames_presented, 1);
        assert_eq!(clock.ticks, 1 + 5);
        assert_eq!(
            renderer.count(|k| matches!(k, SpriteKind::Avatar { mood: Mood::Sad, .. })),
            1
        );
    }

    #[test]
    fn test_frame_limit() {
        let mut state = GameState::new(&Settings::default(), 4);
        let mut input = ScriptedInput::new(vec![TickInput::default(); 10]);
        let report = run_session(
            &mut state,
            &mut input,
            &mut RecordingRenderer::new(),
            &mut FixedRateClock::unpaced(),
            config().with_max_frames(3),
        );
        assert_eq!(report.outcome, SessionOutcome::FrameLimit);
        assert_eq!(report.frames, 3);
    }

    #[test]
    fn test_late_frame_does_not_burst() {
        let mut clock = FixedRateClock::new(1000);
        clock.wait_tick();
        // Miss several deadlines, then resume
        thread::sleep(Duration::from_millis(10));
        clock.wait_tick();
        let resumed = Instant::now();
        clock.wait_tick();
        // The next tick waits roughly a full period again
        assert!(resumed.elapsed() >= Duration::from_micros(500));
        assert_eq!(clock.ticks, 3);
    }

    #[test]
    fn test_fixed_rate_clock_period() {
        let clock = FixedRateClock::new(50);
        assert_eq!(clock.period, Some(Duration::from_millis(20)));
        assert_eq!(FixedRateClock::unpaced().period, None);
    }
}
