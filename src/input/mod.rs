//! Input handling: turns raw window events into camera commands.
//!
//! The keyboard side tracks the set of held keys so movement applies every
//! frame a key stays down; the mouse side converts absolute cursor
//! positions into per-frame look deltas.

mod keyboard;
mod mouse;

pub use keyboard::{movement_for_key, KeyboardState};
pub use mouse::MouseTracker;
