//! The per-frame render loop.
//!
//! One frame binds the view transform, clears color and depth, then assembles
//! and renders the bird from the current [`SceneState`]. The CPU time spent on
//! the clear and the draws is reported back as a [`FrameReport`].

use std::time::{Duration, Instant};

use glam::Mat4;

use crate::animation::FrameTime;
use crate::bird;
use crate::graphics::{ClearBuffers, GraphicsContext};
use crate::state::SceneState;
use crate::transform::{rotate_x, rotate_y, rotate_z};

/// Receives the status line after each frame.
pub trait StatusDisplay {
    fn show_status(&mut self, status: &str);
}

/// Timing for one rendered frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    pub duration: Duration,
    pub fps: f32,
}

impl FrameReport {
    /// Derives the frame rate from the render duration. A zero duration
    /// reports zero fps rather than infinity.
    pub fn new(duration: Duration) -> Self {
        let ms = duration.as_secs_f32() * 1000.0;
        let fps = if ms > 0.0 { 1000.0 / ms } else { 0.0 };
        Self { duration, fps }
    }

    pub fn millis(&self) -> f32 {
        self.duration.as_secs_f32() * 1000.0
    }

    pub fn status_line(&self) -> String {
        format!("Render Time: {:.2} ms, FPS: {:.1}", self.millis(), self.fps)
    }

    /// Logs the status line and hands it to `display`.
    pub fn report_to(&self, display: &mut impl StatusDisplay) {
        let line = self.status_line();
        log::trace!("{line}");
        display.show_status(&line);
    }
}

/// `Ry(global) * camera * model`, camera as `Rx * Ry * Rz` and model as
/// `Rx(pitch) * Ry(yaw)`.
pub fn view_transform(state: &SceneState) -> Mat4 {
    let camera = rotate_x(state.camera.x) * rotate_y(state.camera.y) * rotate_z(state.camera.z);
    let model = rotate_x(state.model.pitch) * rotate_y(state.model.yaw);
    rotate_y(state.global_angle) * camera * model
}

/// Renders one frame of `state` into `ctx`.
pub fn render_frame(state: &SceneState, ctx: &mut impl GraphicsContext) -> FrameReport {
    let start = Instant::now();

    ctx.set_global_transform(view_transform(state));
    ctx.clear(ClearBuffers::ALL);
    bird::render(&state.joints, ctx);

    FrameReport::new(start.elapsed())
}

/// Advances animation to `time.elapsed`, then renders.
pub fn tick(state: &mut SceneState, time: &FrameTime, ctx: &mut impl GraphicsContext) -> FrameReport {
    state.advance(time.elapsed);
    let report = render_frame(state, ctx);
    log::trace!("frame {} at {:.3}s", time.frame_index, time.elapsed);
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::{Joint, JointAngles};
    use crate::graphics::DrawList;
    use crate::state::CameraAngles;
    use std::f32::consts::FRAC_PI_4;

    #[derive(Default)]
    struct Captured(Vec<String>);

    impl StatusDisplay for Captured {
        fn show_status(&mut self, status: &str) {
            self.0.push(status.to_owned());
        }
    }

    #[test]
    fn view_is_camera_times_model() {
        let mut state = SceneState::new().with_camera(CameraAngles {
            x: 10.0,
            y: 20.0,
            z: 30.0,
        });
        state.model.pitch = 5.0;
        state.model.yaw = 15.0;

        let camera = rotate_x(10.0) * rotate_y(20.0) * rotate_z(30.0);
        let model = rotate_x(5.0) * rotate_y(15.0);
        assert!(view_transform(&state).abs_diff_eq(camera * model, 1e-6));
    }

    #[test]
    fn global_angle_applies_outermost() {
        let mut state = SceneState::new();
        state.global_angle = 90.0;
        state.model.pitch = 30.0;
        let expected = rotate_y(90.0) * rotate_x(30.0);
        assert!(view_transform(&state).abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn default_view_is_identity() {
        assert!(view_transform(&SceneState::new()).abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn frame_clears_then_draws_whole_bird() {
        let state = SceneState::new();
        let mut list = DrawList::new();
        // Leftovers from a previous frame must not survive the clear
        list.draw_triangles(&[glam::Vec3::ZERO; 3]);

        render_frame(&state, &mut list);

        assert_eq!(list.cleared(), Some(ClearBuffers::ALL));
        assert_eq!(list.commands().len(), 13);
        assert_eq!(list.global_transform(), view_transform(&state));
    }

    #[test]
    fn tick_animates_before_drawing() {
        let mut state = SceneState::new();
        state.set_animation(Joint::Head, true);

        let mut list = DrawList::new();
        tick(&mut state, &FrameTime::at(FRAC_PI_4), &mut list);

        assert!((state.joints.head - 40.0).abs() < 1e-3);

        let mut expected = DrawList::new();
        bird::render(&state.joints, &mut expected);
        assert_eq!(list.commands(), expected.commands());
    }

    #[test]
    fn repeated_frames_are_identical_without_animation() {
        let mut state = SceneState::new().with_joints(JointAngles::new(10.0, 20.0, 30.0));
        let mut a = DrawList::new();
        let mut b = DrawList::new();
        tick(&mut state, &FrameTime::at(1.0), &mut a);
        tick(&mut state, &FrameTime::at(7.5), &mut b);
        assert_eq!(a.commands(), b.commands());
        assert_eq!(a.vertices(), b.vertices());
    }

    #[test]
    fn status_line_format() {
        let report = FrameReport::new(Duration::from_micros(2500));
        assert_eq!(report.status_line(), "Render Time: 2.50 ms, FPS: 400.0");

        let mut display = Captured::default();
        report.report_to(&mut display);
        assert_eq!(display.0, ["Render Time: 2.50 ms, FPS: 400.0"]);
    }

    #[test]
    fn zero_duration_reports_zero_fps() {
        let report = FrameReport::new(Duration::ZERO);
        assert_eq!(report.fps, 0.0);
        assert_eq!(report.status_line(), "Render Time: 0.00 ms, FPS: 0.0");
    }
}
