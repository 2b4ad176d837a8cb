//! Everything the render loop reads, in one place.
//!
//! Input handlers and the animation driver mutate a [`SceneState`]; the render
//! loop reads it once per frame. All angles are in degrees.

use glam::IVec2;

use crate::animation::{AnimationFlags, Joint, JointAngles};

/// Camera orientation applied as `Rx(x) * Ry(y) * Rz(z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

/// Model orientation driven by pointer drag.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelAngles {
    pub yaw: f32,
    pub pitch: f32,
}

/// Pointer drag state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// A scalar the control panel can set directly.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slider {
    Head,
    Scapular,
    Wing,
    CameraX,
    CameraY,
    CameraZ,
    Global,
}

impl Slider {
    pub const ALL: [Slider; 7] = [
        Slider::Head,
        Slider::Scapular,
        Slider::Wing,
        Slider::CameraX,
        Slider::CameraY,
        Slider::CameraZ,
        Slider::Global,
    ];

    /// Every slider spans a full turn.
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 360.0;

    pub fn label(self) -> &'static str {
        match self {
            Slider::Head => "head",
            Slider::Scapular => "scapular",
            Slider::Wing => "wing",
            Slider::CameraX => "camera x",
            Slider::CameraY => "camera y",
            Slider::CameraZ => "camera z",
            Slider::Global => "global",
        }
    }

    /// The joint this slider drives, if any.
    pub fn joint(self) -> Option<Joint> {
        match self {
            Slider::Head => Some(Joint::Head),
            Slider::Scapular => Some(Joint::Scapular),
            Slider::Wing => Some(Joint::Wing),
            _ => None,
        }
    }
}

/// The whole mutable scene: joints, animation flags, view angles and drag.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneState {
    pub joints: JointAngles,
    pub flags: AnimationFlags,
    pub camera: CameraAngles,
    pub model: ModelAngles,
    pub global_angle: f32,
    drag: DragState,
    last_pointer: IVec2,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial joint angles.
    pub fn with_joints(mut self, joints: JointAngles) -> Self {
        self.joints = joints;
        self
    }

    /// Initial animation flags.
    pub fn with_flags(mut self, flags: AnimationFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_camera(mut self, camera: CameraAngles) -> Self {
        self.camera = camera;
        self
    }

    pub fn drag(&self) -> DragState {
        self.drag
    }

    pub fn last_pointer(&self) -> IVec2 {
        self.last_pointer
    }

    /// Pointer pressed over the canvas: start dragging from `pos`.
    pub fn press(&mut self, pos: IVec2) {
        self.drag = DragState::Dragging;
        self.last_pointer = pos;
    }

    /// Pointer released.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Pointer left the canvas. Ends a drag like a release does.
    pub fn leave(&mut self) {
        self.release();
    }

    /// Records the pointer and, while dragging, rotates the model by the
    /// movement since the last position. Returns true when a redraw is due.
    ///
    /// Angles wrap with a truncating remainder, so a negative drag keeps a
    /// negative angle in `(-360, 0]`.
    pub fn pointer_moved(&mut self, pos: IVec2) -> bool {
        let delta = pos - self.last_pointer;
        self.last_pointer = pos;

        if self.drag != DragState::Dragging {
            return false;
        }
        self.model.yaw = (self.model.yaw + delta.x as f32) % 360.0;
        self.model.pitch = (self.model.pitch + delta.y as f32) % 360.0;
        true
    }

    pub fn slider_value(&self, slider: Slider) -> f32 {
        match slider {
            Slider::Head => self.joints.head,
            Slider::Scapular => self.joints.scapular,
            Slider::Wing => self.joints.wing,
            Slider::CameraX => self.camera.x,
            Slider::CameraY => self.camera.y,
            Slider::CameraZ => self.camera.z,
            Slider::Global => self.global_angle,
        }
    }

    /// Overwrites the slider's value. Always requests a redraw.
    pub fn set_slider(&mut self, slider: Slider, value: f32) -> bool {
        let target = match slider {
            Slider::Head => &mut self.joints.head,
            Slider::Scapular => &mut self.joints.scapular,
            Slider::Wing => &mut self.joints.wing,
            Slider::CameraX => &mut self.camera.x,
            Slider::CameraY => &mut self.camera.y,
            Slider::CameraZ => &mut self.camera.z,
            Slider::Global => &mut self.global_angle,
        };
        *target = value;
        log::debug!("{} = {value:.1}", slider.label());
        true
    }

    pub fn set_animation(&mut self, joint: Joint, on: bool) {
        self.flags.set(joint, on);
        log::debug!("{} animation {}", joint.label(), if on { "on" } else { "off" });
    }

    /// Flips one joint's animation flag and returns the new value.
    pub fn toggle_animation(&mut self, joint: Joint) -> bool {
        let on = !self.flags.get(joint);
        self.set_animation(joint, on);
        on
    }

    /// Turns every joint's animation on or off at once.
    pub fn set_all_animation(&mut self, on: bool) {
        for joint in Joint::ALL {
            self.set_animation(joint, on);
        }
    }

    /// Zeroes camera, model and global angles. Joints are left alone.
    pub fn reset_view(&mut self) {
        self.camera = CameraAngles::default();
        self.model = ModelAngles::default();
        self.global_angle = 0.0;
    }

    /// Drives flagged joints to their value at `t` seconds. Unflagged joints
    /// keep whatever value they last had, including a stale animated one.
    pub fn advance(&mut self, t: f32) {
        self.joints = self.joints.animated(&self.flags, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn drag_rotates_model() {
        let mut state = SceneState::new();
        state.press(IVec2::new(100, 100));
        assert!(state.pointer_moved(IVec2::new(150, 130)));

        assert_eq!(state.model.yaw, 50.0);
        assert_eq!(state.model.pitch, 30.0);
    }

    #[test]
    fn drag_wraps_at_full_turn() {
        let mut state = SceneState::new();
        state.model.yaw = 350.0;
        state.model.pitch = -350.0;
        state.press(IVec2::ZERO);
        state.pointer_moved(IVec2::new(20, -20));

        assert_eq!(state.model.yaw, 10.0);
        assert_eq!(state.model.pitch, -10.0);
    }

    #[test]
    fn idle_moves_only_track_pointer() {
        let mut state = SceneState::new();
        assert!(!state.pointer_moved(IVec2::new(40, 40)));
        assert_eq!(state.model, ModelAngles::default());
        assert_eq!(state.last_pointer(), IVec2::new(40, 40));
    }

    #[test]
    fn release_and_leave_end_drag() {
        let mut state = SceneState::new();
        state.press(IVec2::ZERO);
        state.release();
        assert_eq!(state.drag(), DragState::Idle);

        state.press(IVec2::ZERO);
        state.leave();
        assert_eq!(state.drag(), DragState::Idle);
        assert!(!state.pointer_moved(IVec2::new(5, 5)));
    }

    // A drag restarts from the press point, not from the last idle move
    #[test]
    fn press_resets_drag_origin() {
        let mut state = SceneState::new();
        state.pointer_moved(IVec2::new(500, 500));
        state.press(IVec2::new(10, 10));
        state.pointer_moved(IVec2::new(12, 10));
        assert_eq!(state.model.yaw, 2.0);
    }

    #[test]
    fn sliders_round_trip_every_target() {
        let mut state = SceneState::new();
        for (i, slider) in Slider::ALL.into_iter().enumerate() {
            assert!(state.set_slider(slider, i as f32 * 10.0));
        }
        assert_eq!(state.joints, JointAngles::new(0.0, 10.0, 20.0));
        assert_eq!(state.camera, CameraAngles { x: 30.0, y: 40.0, z: 50.0 });
        assert_eq!(state.global_angle, 60.0);
        assert_eq!(state.slider_value(Slider::CameraY), 40.0);
    }

    #[test]
    fn advance_drives_flagged_joints_only() {
        let mut state = SceneState::new().with_joints(JointAngles::new(0.0, 7.0, 9.0));
        state.set_animation(Joint::Head, true);
        state.advance(FRAC_PI_4);

        assert!((state.joints.head - 40.0).abs() < 1e-3);
        assert_eq!(state.joints.scapular, 7.0);
        assert_eq!(state.joints.wing, 9.0);
    }

    #[test]
    fn reset_view_keeps_joints() {
        let mut state = SceneState::new().with_joints(JointAngles::new(1.0, 2.0, 3.0));
        state.set_slider(Slider::CameraZ, 45.0);
        state.set_slider(Slider::Global, 90.0);
        state.press(IVec2::ZERO);
        state.pointer_moved(IVec2::new(3, 4));

        state.reset_view();

        assert_eq!(state.camera, CameraAngles::default());
        assert_eq!(state.model, ModelAngles::default());
        assert_eq!(state.global_angle, 0.0);
        assert_eq!(state.joints, JointAngles::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn cleared_flag_keeps_last_animated_angle() {
        let mut state = SceneState::new();
        state.toggle_animation(Joint::Scapular);
        state.advance(FRAC_PI_4);
        let held = state.joints.scapular;

        assert!(!state.toggle_animation(Joint::Scapular));
        state.advance(2.0);
        assert_eq!(state.joints.scapular, held);

        state.set_slider(Slider::Scapular, 5.0);
        assert_eq!(state.joints.scapular, 5.0);
    }
}
