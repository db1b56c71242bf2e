//! Fantasy Fighter - a single-screen top-down shooter for the terminal.
//!
//! - `entities`: rectangles and the three entity kinds
//! - `compute`: the per-frame simulation (`Session::tick`)
//! - `controller`: round state machine and frame loop
//! - `display`, `input`, `assets`: collaborators the loop talks to

pub mod assets;
pub mod compute;
pub mod config;
pub mod controller;
pub mod display;
pub mod entities;
pub mod input;

pub use compute::Session;
pub use config::GameConfig;
pub use controller::{ControllerState, SessionController};
