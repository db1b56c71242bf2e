/// Keyboard input: a per-frame snapshot plus the terminal source that
/// produces it.
///
/// Movement is level-sensitive (is the key held right now?), while fire,
/// restart and quit are edge-triggered (was the key pressed this frame?).

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which movement directions are held. Opposite directions may both be set;
/// they cancel out.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Directions {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

/// Everything the controller needs to know about the keyboard for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub directions: Directions,
    pub fire: bool,
    pub restart: bool,
    pub quit: bool,
}

/// Anything that can report the keyboard state once per frame.
pub trait InputSource {
    fn poll(&mut self) -> anyhow::Result<FrameInput>;
}

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key counts as held if its last press/repeat arrived within this many
/// frames. Covers terminals that never send release events: OS key repeat
/// (>= 15 Hz) refreshes the key well before it expires at 60 FPS.
const HOLD_WINDOW: u64 = 8;

/// Turns a stream of key events into per-frame snapshots.
#[derive(Debug, Default)]
pub struct KeyTracker {
    /// Each held key and the frame it was last seen on.
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    pending: FrameInput,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event into the current frame.
    pub fn record(&mut self, ev: &Event) {
        let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
            return;
        };
        let code = normalize(*code);
        match kind {
            KeyEventKind::Press => {
                // Without release events, OS auto-repeat also arrives as
                // Press; only a key that wasn't already held is an edge.
                let fresh = !self.is_held(&code);
                self.key_frame.insert(code, self.frame);
                if !fresh {
                    return;
                }
                match code {
                    KeyCode::Char(' ') => {
                        self.pending.fire = true;
                        self.pending.restart = true;
                    }
                    KeyCode::Char('r') => self.pending.restart = true,
                    KeyCode::Char('q') | KeyCode::Esc => self.pending.quit = true,
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.pending.quit = true;
                    }
                    _ => {}
                }
            }
            KeyEventKind::Repeat => {
                self.key_frame.insert(code, self.frame);
            }
            KeyEventKind::Release => {
                self.key_frame.remove(&code);
            }
        }
    }

    /// Close the current frame and return its snapshot.
    pub fn finish_frame(&mut self) -> FrameInput {
        let mut input = std::mem::take(&mut self.pending);
        let held = |keys: &[KeyCode]| keys.iter().any(|k| self.is_held(k));
        input.directions = Directions {
            left: held(&[KeyCode::Left, KeyCode::Char('a')]),
            right: held(&[KeyCode::Right, KeyCode::Char('d')]),
            up: held(&[KeyCode::Up, KeyCode::Char('w')]),
            down: held(&[KeyCode::Down, KeyCode::Char('s')]),
        };
        self.frame += 1;
        input
    }

    fn is_held(&self, key: &KeyCode) -> bool {
        self.key_frame
            .get(key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

/// Fold upper-case letters onto lower-case so Shift/Caps Lock don't matter.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

// ── Terminal source ───────────────────────────────────────────────────────────

/// Reads crossterm events on a dedicated thread so the frame loop never
/// blocks on the terminal.
pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    tracker: KeyTracker,
}

impl TerminalInput {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped, program is exiting
                    }
                }
                Err(err) => {
                    tracing::warn!("terminal event read failed: {err}");
                    break;
                }
            }
        });
        Self {
            rx,
            tracker: KeyTracker::new(),
        }
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> anyhow::Result<FrameInput> {
        loop {
            match self.rx.try_recv() {
                Ok(ev) => self.tracker.record(&ev),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    anyhow::bail!("terminal input thread stopped")
                }
            }
        }
        Ok(self.tracker.finish_frame())
    }
}
