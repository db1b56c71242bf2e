/// Round sequencing: Playing → GameOver → (Playing | Terminated).
///
/// The controller is the only owner of a `Session`; a restart throws the old
/// one away and builds a fresh one.

use std::time::{Duration, Instant};

use anyhow::Context;
use rand::Rng;

use crate::assets::AssetLoader;
use crate::compute::Session;
use crate::config::GameConfig;
use crate::display::{self, Renderer};
use crate::input::{FrameInput, InputSource};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerState {
    Playing,
    GameOver,
    /// The player asked to leave; the loop stops.
    Terminated,
}

// ── Frame pacing ──────────────────────────────────────────────────────────────

/// Paces the loop to a target frame rate.
pub trait FrameClock {
    /// Block until the next frame at `fps` is due.
    fn wait(&mut self, fps: u32);
}

/// Sleeps away whatever is left of the frame budget since the last call.
#[derive(Debug)]
pub struct FixedRateClock {
    frame_start: Instant,
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
        }
    }
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for FixedRateClock {
    fn wait(&mut self, fps: u32) {
        let frame = Duration::from_secs(1) / fps.max(1);
        let elapsed = self.frame_start.elapsed();
        if elapsed < frame {
            std::thread::sleep(frame - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

// ── Controller ────────────────────────────────────────────────────────────────

pub struct SessionController<G: Rng> {
    config: GameConfig,
    state: ControllerState,
    session: Session,
    rng: G,
    round: u32,
}

impl<G: Rng> SessionController<G> {
    /// Start in `Playing` with a fresh round.
    pub fn new(config: GameConfig, rng: G) -> Self {
        let session = Session::new(&config);
        tracing::info!(round = 1, "round started");
        Self {
            config,
            state: ControllerState::Playing,
            session,
            rng,
            round: 1,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Direct access to the live round, for scripted setups.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Rounds started so far, including the current one.
    pub fn round(&self) -> u32 {
        self.round
    }

    /// Target frame rate for the current state.
    pub fn frame_rate(&self) -> u32 {
        match self.state {
            ControllerState::GameOver => self.config.game_over_fps,
            _ => self.config.fps,
        }
    }

    /// Apply one frame of input and return the resulting state.
    pub fn advance(&mut self, input: &FrameInput) -> ControllerState {
        self.state = match self.state {
            ControllerState::Playing if input.quit => ControllerState::Terminated,
            ControllerState::Playing => {
                if self.session.tick(input, &self.config, &mut self.rng) {
                    ControllerState::Playing
                } else {
                    ControllerState::GameOver
                }
            }
            ControllerState::GameOver if input.quit => ControllerState::Terminated,
            ControllerState::GameOver if input.restart => {
                self.session = Session::new(&self.config);
                self.round += 1;
                tracing::info!(round = self.round, "round restarted");
                ControllerState::Playing
            }
            other => other,
        };
        self.state
    }

    /// Draw the screen for the current state.
    pub fn render<R: Renderer, A: AssetLoader + ?Sized>(
        &self,
        out: &mut R,
        assets: &A,
    ) -> std::io::Result<()> {
        match self.state {
            ControllerState::Playing => {
                display::render_play(out, &self.session, assets, &self.config)
            }
            ControllerState::GameOver => {
                display::render_game_over(out, self.session.score, assets, &self.config)
            }
            ControllerState::Terminated => Ok(()),
        }
    }

    /// Run frames until the player quits.
    pub fn run<I, R, A, C>(
        &mut self,
        input: &mut I,
        out: &mut R,
        assets: &A,
        clock: &mut C,
    ) -> anyhow::Result<()>
    where
        I: InputSource,
        R: Renderer,
        A: AssetLoader + ?Sized,
        C: FrameClock,
    {
        loop {
            let frame = input.poll().context("reading input")?;
            if self.advance(&frame) == ControllerState::Terminated {
                tracing::info!(score = self.session.score, rounds = self.round, "quit");
                return Ok(());
            }
            self.render(out, assets).context("drawing frame")?;
            clock.wait(self.frame_rate());
        }
    }
}
