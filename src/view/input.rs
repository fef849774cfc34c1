//! Translation of winit window events into viewer input events
//!
//! The controller only understands [`InputEvent`]; this module is the one place that knows
//! about winit key codes and mouse buttons.

use cgmath::Point2;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    PageUp,
    PageDown,
    X,
    Y,
    Z,
    Plus,
    Minus,
    T,
    R,
}

/// A discrete input event, applied to the view state exactly once
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed(Key),
    /// `position` is `None` when the pointer has not moved inside the window yet
    PointerPressed { position: Option<Point2<f64>> },
    PointerReleased,
    PointerMoved { position: Point2<f64> },
    /// Positive notches scroll up (towards the viewer)
    Wheel { notches: f32 },
    Quit,
}

impl Key {
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        let key = match code {
            KeyCode::ArrowLeft => Key::Left,
            KeyCode::ArrowRight => Key::Right,
            KeyCode::ArrowUp => Key::Up,
            KeyCode::ArrowDown => Key::Down,
            KeyCode::PageUp => Key::PageUp,
            KeyCode::PageDown => Key::PageDown,
            KeyCode::KeyX => Key::X,
            KeyCode::KeyY => Key::Y,
            KeyCode::KeyZ => Key::Z,
            // '+' shares the '=' key on most layouts
            KeyCode::Equal | KeyCode::NumpadAdd => Key::Plus,
            KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
            KeyCode::KeyT => Key::T,
            KeyCode::KeyR => Key::R,
            _ => return None,
        };
        Some(key)
    }
}

/// Tracks the cursor so button presses can carry a position
///
/// winit reports button state and cursor motion as separate events, so the last
/// `CursorMoved` position is remembered here. It is unknown until the first motion
/// and again after the cursor leaves the window.
#[derive(Debug)]
pub struct InputTranslator {
    cursor: Option<Point2<f64>>,
}

impl Default for InputTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl InputTranslator {
    pub fn new() -> Self {
        Self { cursor: None }
    }

    /// Maps a window event to an [`InputEvent`], or `None` if the viewer ignores it
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => Some(InputEvent::Quit),
            WindowEvent::KeyboardInput { event, .. } => Self::translate_key(event),
            WindowEvent::CursorMoved { position, .. } => {
                let position = Point2::new(position.x, position.y);
                self.cursor = Some(position);
                Some(InputEvent::PointerMoved { position })
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => match state {
                ElementState::Pressed => Some(InputEvent::PointerPressed {
                    position: self.cursor,
                }),
                ElementState::Released => Some(InputEvent::PointerReleased),
            },
            WindowEvent::MouseWheel { delta, .. } => {
                let notches = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    // Pixel deltas come from touchpads; each event counts as one notch
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y, .. }) => {
                        if *y == 0.0 {
                            0.0
                        } else {
                            y.signum() as f32
                        }
                    }
                };
                (notches != 0.0).then_some(InputEvent::Wheel { notches })
            }
            _ => None,
        }
    }

    fn translate_key(event: &KeyEvent) -> Option<InputEvent> {
        // One physical press is one step: releases and auto-repeat are dropped
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        if code == KeyCode::Escape {
            return Some(InputEvent::Quit);
        }
        Key::from_key_code(code).map(InputEvent::KeyPressed)
    }
}
