//! # View State and Input Handling
//!
//! The viewer's only mutable state is a single [`ViewState`]: the cube's translation,
//! Euler rotation, uniform scale, texture-mode flag and drag state. It is owned by the
//! frame loop, mutated by the [`ViewController`] and read by the render engine.
//!
//! ## Controls
//!
//! | Input | Effect |
//! |---|---|
//! | Arrow keys | translate X / Y by 0.1 |
//! | Page Up / Page Down | translate Z by 0.1 |
//! | X / Y / Z | rotate +5° about that axis |
//! | + / - | scale by ±0.1 |
//! | T | toggle texture mode |
//! | R | reset pose and mode |
//! | Left drag | free rotation, 0.5° per pixel |
//! | Wheel | translate Z by 0.5 per notch |
//! | Escape / close | quit |

pub mod controller;
pub mod input;
pub mod state;

pub use controller::{InputOutcome, ViewController};
pub use input::{InputEvent, InputTranslator, Key};
pub use state::ViewState;
