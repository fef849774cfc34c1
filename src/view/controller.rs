//! Fixed-step mapping from input events to view state changes

use log::{debug, trace};

use super::{
    input::{InputEvent, Key},
    state::ViewState,
};

/// What applying an event did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The event has no meaning for the view (e.g. pointer motion without a drag)
    Ignored,
    Changed,
    Quit,
}

/// Maps input events onto view state mutations
///
/// Every step is a fixed constant per event; nothing is scaled by elapsed time.
pub struct ViewController {
    pub translate_step: f32,
    /// Degrees per axis key press
    pub rotate_step: f32,
    pub scale_step: f32,
    /// Degrees per pixel of pointer drag
    pub drag_sensitivity: f32,
    /// Depth change per wheel notch
    pub wheel_step: f32,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            translate_step: 0.1,
            rotate_step: 5.0,
            scale_step: 0.1,
            drag_sensitivity: 0.5,
            wheel_step: 0.5,
        }
    }

    pub fn process_event(&self, event: &InputEvent, state: &mut ViewState) -> InputOutcome {
        match *event {
            InputEvent::Quit => InputOutcome::Quit,
            InputEvent::KeyPressed(key) => {
                self.process_key(key, state);
                InputOutcome::Changed
            }
            InputEvent::PointerPressed { position } => {
                state.begin_drag(position);
                InputOutcome::Changed
            }
            InputEvent::PointerReleased => {
                if !state.is_dragging() {
                    return InputOutcome::Ignored;
                }
                state.end_drag();
                InputOutcome::Changed
            }
            InputEvent::PointerMoved { position } => match state.advance_drag(position) {
                Some((dx, dy)) => {
                    // Vertical motion tilts about X, horizontal motion turns about Y
                    state.rotation.x += dy as f32 * self.drag_sensitivity;
                    state.rotation.y += dx as f32 * self.drag_sensitivity;
                    trace!("Drag rotation now {:?}", state.normalized_rotation());
                    InputOutcome::Changed
                }
                None => InputOutcome::Ignored,
            },
            InputEvent::Wheel { notches } => {
                state.translation.z += notches * self.wheel_step;
                InputOutcome::Changed
            }
        }
    }

    fn process_key(&self, key: Key, state: &mut ViewState) {
        match key {
            Key::Left => state.translation.x -= self.translate_step,
            Key::Right => state.translation.x += self.translate_step,
            Key::Up => state.translation.y += self.translate_step,
            Key::Down => state.translation.y -= self.translate_step,
            Key::PageUp => state.translation.z += self.translate_step,
            Key::PageDown => state.translation.z -= self.translate_step,
            Key::X => state.rotation.x += self.rotate_step,
            Key::Y => state.rotation.y += self.rotate_step,
            Key::Z => state.rotation.z += self.rotate_step,
            Key::Plus => state.scale += self.scale_step,
            Key::Minus => state.scale -= self.scale_step,
            Key::T => {
                state.toggle_texture_mode();
                debug!("Texture mode: {}", state.texture_mode);
            }
            Key::R => {
                state.reset();
                debug!("View reset to baseline");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point2, Vector3};
    use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

    const EPS: f32 = 1e-4;

    fn press(controller: &ViewController, state: &mut ViewState, key: Key, times: usize) {
        for _ in 0..times {
            controller.process_event(&InputEvent::KeyPressed(key), state);
        }
    }

    fn assert_vec_close(actual: Vector3<f32>, expected: Vector3<f32>) {
        assert!(
            (actual.x - expected.x).abs() < EPS
                && (actual.y - expected.y).abs() < EPS
                && (actual.z - expected.z).abs() < EPS,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_translation_keys() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::Left, 3);
        press(&controller, &mut state, Key::Right, 1);
        press(&controller, &mut state, Key::Up, 2);
        press(&controller, &mut state, Key::Down, 5);
        press(&controller, &mut state, Key::PageUp, 4);
        press(&controller, &mut state, Key::PageDown, 1);

        assert_vec_close(state.translation, Vector3::new(-0.2, -0.3, -4.7));
        assert_eq!(state.rotation, Vector3::new(0.0, 0.0, 0.0));
        assert_eq!(state.scale, 1.0);
    }

    #[test]
    fn test_random_translation_sequence_sums_deltas() {
        let controller = ViewController::new();
        let mut rng = StdRng::seed_from_u64(7);
        let keys = [
            (Key::Left, Vector3::new(-0.1, 0.0, 0.0)),
            (Key::Right, Vector3::new(0.1, 0.0, 0.0)),
            (Key::Up, Vector3::new(0.0, 0.1, 0.0)),
            (Key::Down, Vector3::new(0.0, -0.1, 0.0)),
            (Key::PageUp, Vector3::new(0.0, 0.0, 0.1)),
            (Key::PageDown, Vector3::new(0.0, 0.0, -0.1)),
        ];

        let mut sequence: Vec<(Key, Vector3<f32>)> = (0..200)
            .map(|_| keys[rng.random_range(0..keys.len())])
            .collect();
        let expected = sequence
            .iter()
            .fold(Vector3::new(0.0, 0.0, -5.0), |acc, (_, delta)| acc + delta);

        let mut state = ViewState::new();
        for (key, _) in &sequence {
            press(&controller, &mut state, *key, 1);
        }
        assert_vec_close(state.translation, expected);

        // Same events, different order
        sequence.shuffle(&mut rng);
        let mut shuffled = ViewState::new();
        for (key, _) in &sequence {
            press(&controller, &mut shuffled, *key, 1);
        }
        assert_vec_close(shuffled.translation, expected);
    }

    #[test]
    fn test_rotation_keys_accumulate_unbounded() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::X, 80);
        press(&controller, &mut state, Key::Y, 3);
        press(&controller, &mut state, Key::Z, 1);

        assert_eq!(state.rotation, Vector3::new(400.0, 15.0, 5.0));
        assert_eq!(state.normalized_rotation().x, 40.0);
    }

    #[test]
    fn test_scale_has_no_floor() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::Minus, 12);
        assert!((state.scale - -0.2).abs() < EPS);

        press(&controller, &mut state, Key::Plus, 22);
        assert!((state.scale - 2.0).abs() < EPS);
    }

    #[test]
    fn test_texture_toggle_key() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::T, 1);
        assert!(state.texture_mode);
        press(&controller, &mut state, Key::T, 1);
        assert!(!state.texture_mode);
    }

    #[test]
    fn test_reset_key_restores_baseline_after_rotation() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::X, 18);
        assert_eq!(state.rotation.x, 90.0);

        press(&controller, &mut state, Key::R, 1);
        assert_eq!(state, ViewState::new());
    }

    #[test]
    fn test_reset_key_clears_texture_mode() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        press(&controller, &mut state, Key::T, 1);
        press(&controller, &mut state, Key::Plus, 4);
        press(&controller, &mut state, Key::R, 2);
        assert_eq!(state, ViewState::new());
    }

    #[test]
    fn test_drag_rotates() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        let outcomes = [
            InputEvent::PointerPressed {
                position: Some(Point2::new(100.0, 100.0)),
            },
            InputEvent::PointerMoved {
                position: Point2::new(110.0, 115.0),
            },
            InputEvent::PointerReleased,
        ]
        .iter()
        .map(|event| controller.process_event(event, &mut state))
        .collect::<Vec<_>>();

        assert_eq!(outcomes, vec![InputOutcome::Changed; 3]);
        assert_eq!(state.rotation, Vector3::new(7.5, 5.0, 0.0));
        assert_eq!(state.translation, Vector3::new(0.0, 0.0, -5.0));
        assert_eq!(state.scale, 1.0);
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_press_without_known_position_does_not_jump() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        controller.process_event(&InputEvent::PointerPressed { position: None }, &mut state);
        let first = controller.process_event(
            &InputEvent::PointerMoved {
                position: Point2::new(400.0, 300.0),
            },
            &mut state,
        );
        assert_eq!(first, InputOutcome::Changed);
        assert_eq!(state.rotation, Vector3::new(0.0, 0.0, 0.0));

        controller.process_event(
            &InputEvent::PointerMoved {
                position: Point2::new(401.0, 300.0),
            },
            &mut state,
        );
        assert_eq!(state.rotation, Vector3::new(0.0, 0.5, 0.0));
    }

    #[test]
    fn test_motion_without_drag_is_ignored() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        let outcome = controller.process_event(
            &InputEvent::PointerMoved {
                position: Point2::new(50.0, 50.0),
            },
            &mut state,
        );
        assert_eq!(outcome, InputOutcome::Ignored);
        assert_eq!(
            controller.process_event(&InputEvent::PointerReleased, &mut state),
            InputOutcome::Ignored
        );
        assert_eq!(state, ViewState::new());
    }

    #[test]
    fn test_drag_uses_latest_position() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        controller.process_event(
            &InputEvent::PointerPressed {
                position: Some(Point2::new(0.0, 0.0)),
            },
            &mut state,
        );
        for (x, y) in [(4.0, 2.0), (10.0, 6.0), (6.0, 6.0)] {
            controller.process_event(
                &InputEvent::PointerMoved {
                    position: Point2::new(x, y),
                },
                &mut state,
            );
        }
        // Net pointer travel is (6, 6)
        assert_eq!(state.rotation, Vector3::new(3.0, 3.0, 0.0));
    }

    #[test]
    fn test_drag_and_keys_compose_in_any_order() {
        let controller = ViewController::new();
        let mut rng = StdRng::seed_from_u64(42);

        let mut events = vec![InputEvent::KeyPressed(Key::X); 6];
        events.extend(vec![InputEvent::KeyPressed(Key::Y); 4]);

        for _ in 0..20 {
            events.shuffle(&mut rng);
            let split = rng.random_range(0..=events.len());

            let mut state = ViewState::new();
            for event in &events[..split] {
                controller.process_event(event, &mut state);
            }
            controller.process_event(
                &InputEvent::PointerPressed {
                    position: Some(Point2::new(20.0, 20.0)),
                },
                &mut state,
            );
            controller.process_event(
                &InputEvent::PointerMoved {
                    position: Point2::new(30.0, 40.0),
                },
                &mut state,
            );
            controller.process_event(&InputEvent::PointerReleased, &mut state);
            for event in &events[split..] {
                controller.process_event(event, &mut state);
            }

            // keys: x 30, y 20; drag: x += 20 * 0.5, y += 10 * 0.5
            assert_eq!(state.rotation, Vector3::new(40.0, 25.0, 0.0));
        }
    }

    #[test]
    fn test_wheel_is_additive_with_depth_keys() {
        let controller = ViewController::new();
        let mut state = ViewState::new();

        controller.process_event(&InputEvent::Wheel { notches: 1.0 }, &mut state);
        controller.process_event(&InputEvent::Wheel { notches: 1.0 }, &mut state);
        controller.process_event(&InputEvent::Wheel { notches: -1.0 }, &mut state);
        press(&controller, &mut state, Key::PageDown, 2);

        assert!((state.translation.z - -4.7).abs() < EPS);
    }

    #[test]
    fn test_quit() {
        let controller = ViewController::new();
        let mut state = ViewState::new();
        assert_eq!(
            controller.process_event(&InputEvent::Quit, &mut state),
            InputOutcome::Quit
        );
        assert_eq!(state, ViewState::new());
    }
}
