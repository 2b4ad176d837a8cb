//! The on-screen control panel.
//!
//! A column of horizontal sliders (head, scapular, wing, camera X/Y/Z, global)
//! above a row of animation toggles (head, scapular, wing). Every slider spans
//! `0..=360` degrees across its track. Widgets are color-coded instead of
//! labeled: joint widgets use the color of the part they move, camera axes are
//! red, green and blue, the global angle is gray.
//!
//! Pressing a slider track jumps the slider to the pointer and captures it
//! until release, so the value keeps following the pointer even outside the
//! track. Presses anywhere on the panel are consumed and never start a model
//! drag.

use glam::Vec2;

use crate::animation::Joint;
use crate::bird::{BODY_BLUE, LIGHT_BLUE, SCAPULAR_BLUE};
use crate::color::Color;
use crate::overlay::{Quads, Rect};
use crate::state::{SceneState, Slider};

const WIDTH: f32 = 160.0;
const PAD: f32 = 8.0;
const ROW_HEIGHT: f32 = 14.0;
const GAP: f32 = 6.0;
const TOGGLE_HEIGHT: f32 = 18.0;
const KNOB_WIDTH: f32 = 4.0;

const PANEL_BG: Color = Color::rgba(0.1, 0.1, 0.1, 0.85);
const PANEL_BORDER: Color = Color::rgba(0.4, 0.4, 0.4, 1.0);

/// A widget on the panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Slider(Slider),
    Toggle(Joint),
}

fn slider_row(slider: Slider) -> usize {
    match slider {
        Slider::Head => 0,
        Slider::Scapular => 1,
        Slider::Wing => 2,
        Slider::CameraX => 3,
        Slider::CameraY => 4,
        Slider::CameraZ => 5,
        Slider::Global => 6,
    }
}

fn toggle_column(joint: Joint) -> usize {
    match joint {
        Joint::Head => 0,
        Joint::Scapular => 1,
        Joint::Wing => 2,
    }
}

fn joint_color(joint: Joint) -> Color {
    match joint {
        Joint::Head => BODY_BLUE,
        Joint::Scapular => SCAPULAR_BLUE,
        Joint::Wing => LIGHT_BLUE,
    }
}

fn slider_color(slider: Slider) -> Color {
    match slider.joint() {
        Some(joint) => joint_color(joint),
        None => match slider {
            Slider::CameraX => Color::rgb(0.85, 0.3, 0.3),
            Slider::CameraY => Color::rgb(0.3, 0.8, 0.4),
            Slider::CameraZ => Color::rgb(0.35, 0.45, 0.95),
            _ => Color::rgb(0.8, 0.8, 0.8),
        },
    }
}

/// Where a value sits along a track, in `[0, 1]`. Values outside the slider
/// range (a scapular swinging below zero) wrap onto it.
fn fraction(value: f32) -> f32 {
    let span = Slider::MAX - Slider::MIN;
    let v = if (Slider::MIN..=Slider::MAX).contains(&value) {
        value
    } else {
        Slider::MIN + (value - Slider::MIN).rem_euclid(span)
    };
    (v - Slider::MIN) / span
}

/// Slider panel state: placement, visibility and the captured slider.
#[derive(Clone, Debug)]
pub struct ControlPanel {
    origin: Vec2,
    visible: bool,
    active: Option<Slider>,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(Vec2::new(10.0, 10.0))
    }
}

impl ControlPanel {
    /// A visible panel with its top-left corner at `origin`.
    pub fn new(origin: Vec2) -> Self {
        Self {
            origin,
            visible: true,
            active: None,
        }
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    /// Shows or hides the panel. Hiding releases a captured slider.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        if !visible {
            self.active = None;
        }
    }

    pub fn toggle_visible(&mut self) -> bool {
        self.set_visible(!self.visible);
        self.visible
    }

    /// The slider currently following the pointer.
    pub fn active(&self) -> Option<Slider> {
        self.active
    }

    pub fn bounds(&self) -> Rect {
        let rows = Slider::ALL.len() as f32;
        let height = PAD + rows * (ROW_HEIGHT + GAP) + TOGGLE_HEIGHT + PAD;
        Rect::new(self.origin.x, self.origin.y, WIDTH, height)
    }

    pub fn slider_rect(&self, slider: Slider) -> Rect {
        let y = self.origin.y + PAD + slider_row(slider) as f32 * (ROW_HEIGHT + GAP);
        Rect::new(self.origin.x + PAD, y, WIDTH - 2.0 * PAD, ROW_HEIGHT)
    }

    pub fn toggle_rect(&self, joint: Joint) -> Rect {
        let columns = Joint::ALL.len() as f32;
        let width = (WIDTH - 2.0 * PAD - (columns - 1.0) * GAP) / columns;
        let x = self.origin.x + PAD + toggle_column(joint) as f32 * (width + GAP);
        let y = self.origin.y + PAD + Slider::ALL.len() as f32 * (ROW_HEIGHT + GAP);
        Rect::new(x, y, width, TOGGLE_HEIGHT)
    }

    /// The widget under `pos`, if the panel is visible.
    pub fn hit(&self, pos: Vec2) -> Option<Control> {
        if !self.visible {
            return None;
        }
        Slider::ALL
            .into_iter()
            .find(|s| self.slider_rect(*s).contains(pos))
            .map(Control::Slider)
            .or_else(|| {
                Joint::ALL
                    .into_iter()
                    .find(|j| self.toggle_rect(*j).contains(pos))
                    .map(Control::Toggle)
            })
    }

    /// The slider value for a pointer at `x` over `slider`'s track, clamped
    /// to the slider range.
    pub fn value_at(&self, slider: Slider, x: f32) -> f32 {
        let track = self.slider_rect(slider);
        let t = ((x - track.x) / track.width).clamp(0.0, 1.0);
        Slider::MIN + t * (Slider::MAX - Slider::MIN)
    }

    /// Handles a pointer press. Returns true when the panel consumed it.
    pub fn press(&mut self, pos: Vec2, state: &mut SceneState) -> bool {
        if !self.visible || !self.bounds().contains(pos) {
            return false;
        }
        match self.hit(pos) {
            Some(Control::Slider(slider)) => {
                self.active = Some(slider);
                state.set_slider(slider, self.value_at(slider, pos.x));
            }
            Some(Control::Toggle(joint)) => {
                state.toggle_animation(joint);
            }
            None => {}
        }
        true
    }

    /// Moves the captured slider, if any. Returns true when a value changed.
    pub fn drag(&mut self, pos: Vec2, state: &mut SceneState) -> bool {
        match self.active {
            Some(slider) => state.set_slider(slider, self.value_at(slider, pos.x)),
            None => false,
        }
    }

    pub fn release(&mut self) {
        self.active = None;
    }

    /// Queues the panel's quads for the current state.
    pub fn draw(&self, state: &SceneState, quads: &mut Quads) {
        if !self.visible {
            return;
        }
        quads.pane(self.bounds(), PANEL_BG, PANEL_BORDER);

        for slider in Slider::ALL {
            let track = self.slider_rect(slider);
            let color = slider_color(slider);
            let filled = fraction(state.slider_value(slider)) * track.width;

            quads.quad(track, color.shade(0.35));
            quads.quad(Rect::new(track.x, track.y, filled, track.height), color);

            let knob_x = (track.x + filled - KNOB_WIDTH / 2.0)
                .clamp(track.x, track.x + track.width - KNOB_WIDTH);
            let knob = Color::WHITE;
            quads.quad(Rect::new(knob_x, track.y, KNOB_WIDTH, track.height), knob);
        }

        for joint in Joint::ALL {
            let rect = self.toggle_rect(joint);
            let color = joint_color(joint);
            if state.flags.get(joint) {
                quads.quad(rect, Color::WHITE);
                quads.quad(rect.inset(2.0), color);
            } else {
                quads.quad(rect, color.shade(0.3));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center(r: Rect) -> Vec2 {
        Vec2::new(r.x + r.width / 2.0, r.y + r.height / 2.0)
    }

    #[test]
    fn widgets_sit_inside_the_panel_without_overlap() {
        let panel = ControlPanel::default();
        let bounds = panel.bounds();
        let mut rects: Vec<Rect> = Slider::ALL.iter().map(|s| panel.slider_rect(*s)).collect();
        rects.extend(Joint::ALL.iter().map(|j| panel.toggle_rect(*j)));

        for (i, r) in rects.iter().enumerate() {
            assert!(bounds.contains(Vec2::new(r.x, r.y)));
            assert!(bounds.contains(Vec2::new(r.x + r.width - 0.5, r.y + r.height - 0.5)));
            for other in &rects[i + 1..] {
                assert!(!other.contains(center(*r)));
            }
        }
    }

    #[test]
    fn hit_finds_each_widget() {
        let panel = ControlPanel::default();
        for slider in Slider::ALL {
            assert_eq!(panel.hit(center(panel.slider_rect(slider))), Some(Control::Slider(slider)));
        }
        for joint in Joint::ALL {
            assert_eq!(panel.hit(center(panel.toggle_rect(joint))), Some(Control::Toggle(joint)));
        }
        assert_eq!(panel.hit(Vec2::new(500.0, 500.0)), None);
    }

    #[test]
    fn press_on_track_jumps_to_pointer() {
        let mut panel = ControlPanel::default();
        let mut state = SceneState::new();
        let track = panel.slider_rect(Slider::CameraY);

        let pos = Vec2::new(track.x + track.width * 0.25, track.y + 1.0);
        assert!(panel.press(pos, &mut state));

        assert!((state.camera.y - 90.0).abs() < 1e-3);
        assert_eq!(panel.active(), Some(Slider::CameraY));
    }

    #[test]
    fn captured_slider_follows_and_clamps() {
        let mut panel = ControlPanel::default();
        let mut state = SceneState::new();
        let track = panel.slider_rect(Slider::Wing);
        panel.press(center(track), &mut state);

        assert!(panel.drag(Vec2::new(track.x + track.width + 200.0, 900.0), &mut state));
        assert_eq!(state.joints.wing, Slider::MAX);
        assert!(panel.drag(Vec2::new(-50.0, 0.0), &mut state));
        assert_eq!(state.joints.wing, Slider::MIN);

        panel.release();
        assert!(!panel.drag(center(track), &mut state));
        assert_eq!(state.joints.wing, Slider::MIN);
    }

    #[test]
    fn toggle_press_flips_animation() {
        let mut panel = ControlPanel::default();
        let mut state = SceneState::new();
        let button = center(panel.toggle_rect(Joint::Scapular));

        assert!(panel.press(button, &mut state));
        assert!(state.flags.scapular);
        assert!(panel.press(button, &mut state));
        assert!(!state.flags.scapular);
        assert_eq!(panel.active(), None);
    }

    #[test]
    fn presses_outside_or_hidden_are_ignored() {
        let mut panel = ControlPanel::default();
        let mut state = SceneState::new();
        assert!(!panel.press(Vec2::new(400.0, 400.0), &mut state));

        let track = center(panel.slider_rect(Slider::Head));
        panel.set_visible(false);
        assert!(!panel.press(track, &mut state));
        assert_eq!(state, SceneState::new());
    }

    #[test]
    fn panel_background_swallows_presses() {
        let mut panel = ControlPanel::default();
        let mut state = SceneState::new();
        let corner = Vec2::new(panel.bounds().x + 1.0, panel.bounds().y + 1.0);
        assert!(panel.press(corner, &mut state));
        assert_eq!(state, SceneState::new());
    }

    #[test]
    fn negative_angles_wrap_onto_track() {
        assert!((fraction(-90.0) - 0.75).abs() < 1e-6);
        assert_eq!(fraction(360.0), 1.0);
        assert_eq!(fraction(0.0), 0.0);
    }

    #[test]
    fn draw_emits_nothing_when_hidden() {
        let mut panel = ControlPanel::default();
        let state = SceneState::new();
        let mut quads = Quads::new();

        panel.draw(&state, &mut quads);
        // pane (5) + 3 per slider + 1 per idle toggle
        assert_eq!(quads.len(), 5 + 3 * Slider::ALL.len() + Joint::ALL.len());

        quads.clear();
        panel.toggle_visible();
        panel.draw(&state, &mut quads);
        assert!(quads.is_empty());
    }
}
