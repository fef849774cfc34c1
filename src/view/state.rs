//! The mutable pose and rendering mode of the viewed object

use cgmath::{Deg, Matrix4, Point2, Vector3};

/// Translation every reset returns to
pub const BASELINE_TRANSLATION: Vector3<f32> = Vector3::new(0.0, 0.0, -5.0);
/// Uniform scale every reset returns to
pub const BASELINE_SCALE: f32 = 1.0;

/// Pose and rendering mode of the cube
///
/// Owned by the frame loop, mutated only by [`super::ViewController`] and read by the
/// render engine once per frame.
///
/// Rotation is stored as three independent Euler angles in degrees and applied in X, Y, Z
/// order. Neither rotation nor scale is bounded: angles accumulate past 360 and scale may
/// reach zero or go negative (which mirrors the cube).
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub translation: Vector3<f32>,
    /// Euler angles in degrees
    pub rotation: Vector3<f32>,
    pub scale: f32,
    pub texture_mode: bool,
    drag: DragState,
}

/// Primary-button drag progress
#[derive(Debug, Clone, Copy, PartialEq)]
enum DragState {
    Idle,
    /// Button is down but the pointer position is not known yet; the first motion
    /// anchors the drag without rotating
    Unanchored,
    /// Pointer position at the last drag update
    Anchored(Point2<f64>),
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Creates the baseline view: cube five units in front of the camera, unrotated,
    /// unit scale, color mode
    pub fn new() -> Self {
        Self {
            translation: BASELINE_TRANSLATION,
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: BASELINE_SCALE,
            texture_mode: false,
            drag: DragState::Idle,
        }
    }

    /// Returns translation, rotation, scale and texture mode to the baseline
    ///
    /// Drag state is input state, not pose, and is left alone.
    pub fn reset(&mut self) {
        self.translation = BASELINE_TRANSLATION;
        self.rotation = Vector3::new(0.0, 0.0, 0.0);
        self.scale = BASELINE_SCALE;
        self.texture_mode = false;
    }

    pub fn toggle_texture_mode(&mut self) {
        self.texture_mode = !self.texture_mode;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag != DragState::Idle
    }

    /// Last recorded pointer position, only while an anchored drag is active
    pub fn last_pointer_position(&self) -> Option<Point2<f64>> {
        match self.drag {
            DragState::Anchored(position) => Some(position),
            DragState::Idle | DragState::Unanchored => None,
        }
    }

    /// Starts a drag at `position`, or unanchored when the pointer position is unknown
    pub(crate) fn begin_drag(&mut self, position: Option<Point2<f64>>) {
        self.drag = match position {
            Some(position) => DragState::Anchored(position),
            None => DragState::Unanchored,
        };
    }

    pub(crate) fn end_drag(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Moves the drag anchor to `position`, returning the pointer delta since the last update
    ///
    /// The first update of an unanchored drag only sets the anchor and reports no motion.
    pub(crate) fn advance_drag(&mut self, position: Point2<f64>) -> Option<(f64, f64)> {
        let delta = match self.drag {
            DragState::Idle => return None,
            DragState::Unanchored => (0.0, 0.0),
            DragState::Anchored(anchor) => (position.x - anchor.x, position.y - anchor.y),
        };
        self.drag = DragState::Anchored(position);
        Some(delta)
    }

    /// Rotation angles folded into [0, 360) for display; orientation is unchanged
    pub fn normalized_rotation(&self) -> Vector3<f32> {
        Vector3::new(
            self.rotation.x.rem_euclid(360.0),
            self.rotation.y.rem_euclid(360.0),
            self.rotation.z.rem_euclid(360.0),
        )
    }

    /// Model matrix `T * Rx * Ry * Rz * S`
    ///
    /// Vertices are scaled first, then rotated about Z, Y and X, then translated.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.translation)
            * Matrix4::from_angle_x(Deg(self.rotation.x))
            * Matrix4::from_angle_y(Deg(self.rotation.y))
            * Matrix4::from_angle_z(Deg(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }
}
