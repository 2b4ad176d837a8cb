//! The articulated bird.
//!
//! [`assemble`] builds the bird as a [`SceneNode`] tree from fixed part
//! geometry and the current [`JointAngles`]:
//!
//! ```text
//! body
//! ├── head ─┬── left eye, left pupil, right eye, right pupil
//! │         └── nose
//! ├── tail
//! ├── left scapular ── left wing
//! ├── right scapular ── right wing
//! └── hat (pyramid, anchored on the head frame)
//! ```
//!
//! Every part is a unit cube (or pyramid) placed by its frame and sized by a
//! render-only scale, so children attach to the parent's frame rather than to
//! its scaled box. Units are model units; rotations are in degrees.

use glam::{Mat4, Vec3};

use crate::animation::JointAngles;
use crate::color::Color;
use crate::graphics::GraphicsContext;
use crate::scene_graph::SceneNode;
use crate::shape::ShapeKind;
use crate::transform::{rotate_x, rotate_z, scale, translate};

pub const BODY_BLUE: Color = Color::rgb(0.114, 0.631, 0.949);
pub const SCAPULAR_BLUE: Color = Color::rgb(0.091, 0.505, 0.759);
pub const LIGHT_BLUE: Color = Color::rgb(0.678, 0.847, 0.902);
pub const NOSE_BROWN: Color = Color::rgb(0.804, 0.522, 0.247);
pub const STRAW: Color = Color::rgb(0.85, 0.75, 0.60);

/// Shoulder attachment on the body frame; the two sides differ only in z.
const SHOULDER: Vec3 = Vec3::new(0.2, 0.08, 0.0);
// Deliberately -0.1, not -0.09: only then do the two boxes mirror about z = 0.1.
const LEFT_SHOULDER_Z: f32 = -0.1;
const RIGHT_SHOULDER_Z: f32 = 0.2;
const SCAPULAR_SIZE: Vec3 = Vec3::new(0.255, 0.06, 0.1);
const WING_SIZE: Vec3 = Vec3::new(0.4, 0.03, 0.2);

/// Named parts of the bird, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Part {
    Body,
    Head,
    LeftEye,
    LeftPupil,
    RightEye,
    RightPupil,
    Nose,
    Tail,
    LeftScapular,
    LeftWing,
    RightScapular,
    RightWing,
    Hat,
}

impl Part {
    pub const ALL: [Part; 13] = [
        Part::Body,
        Part::Head,
        Part::LeftEye,
        Part::LeftPupil,
        Part::RightEye,
        Part::RightPupil,
        Part::Nose,
        Part::Tail,
        Part::LeftScapular,
        Part::LeftWing,
        Part::RightScapular,
        Part::RightWing,
        Part::Hat,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Part::Body => "body",
            Part::Head => "head",
            Part::LeftEye => "left_eye",
            Part::LeftPupil => "left_pupil",
            Part::RightEye => "right_eye",
            Part::RightPupil => "right_pupil",
            Part::Nose => "nose",
            Part::Hat => "hat",
            Part::Tail => "tail",
            Part::LeftScapular => "left_scapular",
            Part::LeftWing => "left_wing",
            Part::RightScapular => "right_scapular",
            Part::RightWing => "right_wing",
        }
    }
}

fn cube(part: Part, frame: Mat4, color: Color, size: Mat4) -> SceneNode {
    SceneNode::new(part.name(), frame).with_visual(ShapeKind::Cube, color, size)
}

/// Left wing hinge: the hinge axis is mirrored, so the left wing rests at
/// 180° and swings against the angle.
pub fn left_wing_rotation(wing: f32) -> f32 {
    180.0 - wing
}

pub fn right_wing_rotation(wing: f32) -> f32 {
    wing
}

fn scapular(part: Part, shoulder_z: f32, angle: f32) -> SceneNode {
    let frame = Mat4::from_translation(SHOULDER.with_z(shoulder_z))
        * rotate_z(angle)
        * translate(-0.05, 0.0, 0.0);
    cube(part, frame, SCAPULAR_BLUE, Mat4::from_scale(SCAPULAR_SIZE))
}

fn head_frame(angle: f32) -> Mat4 {
    translate(-0.15, 0.0, 0.025) * rotate_z(angle)
}

fn head(angle: f32) -> SceneNode {
    let eye = scale(0.09, 0.09, 0.01);
    let pupil = scale(0.04, 0.04, 0.01);
    let nose = scale(0.03, 0.125, 0.15) * translate(-2.83, 0.8, 0.0) * scale(3.83, -0.64, 1.0);

    cube(
        Part::Head,
        head_frame(angle),
        BODY_BLUE,
        scale(0.2, 0.275, 0.15),
    )
    .with_child(cube(Part::LeftEye, translate(0.03, 0.115, -0.01), Color::BLACK, eye))
    .with_child(cube(Part::LeftPupil, translate(0.03, 0.115, -0.02), Color::WHITE, pupil))
    .with_child(cube(Part::RightEye, translate(0.03, 0.115, 0.15), Color::BLACK, eye))
    .with_child(cube(Part::RightPupil, translate(0.03, 0.115, 0.16), Color::WHITE, pupil))
    .with_child(cube(Part::Nose, translate(-0.03, 0.0375, 0.0), NOSE_BROWN, nose))
}

/// The hat sits on the head frame but hangs off the body so it draws last.
fn hat(head_angle: f32) -> SceneNode {
    SceneNode::new(
        Part::Hat.name(),
        head_frame(head_angle) * translate(0.025, 0.27, -0.008),
    )
    .with_visual(
        ShapeKind::Pyramid,
        STRAW,
        scale(0.2 / 1.4, 0.025 / 1.4, 0.225 / 1.4),
    )
}

/// Builds the bird for the given joint angles.
pub fn assemble(angles: &JointAngles) -> SceneNode {
    let left_wing = cube(
        Part::LeftWing,
        translate(0.0, 0.045, -0.002)
            * rotate_x(left_wing_rotation(angles.wing))
            * translate(-0.0375, 0.0, 0.0),
        LIGHT_BLUE,
        Mat4::from_scale(WING_SIZE),
    );
    let right_wing = cube(
        Part::RightWing,
        translate(0.05, 0.015, 0.1)
            * rotate_x(right_wing_rotation(angles.wing))
            * translate(-0.0875, 0.0, 0.0),
        LIGHT_BLUE,
        Mat4::from_scale(WING_SIZE),
    );

    cube(
        Part::Body,
        translate(-0.25, -0.25, 0.0) * rotate_x(0.0),
        BODY_BLUE,
        scale(0.5, 0.2, 0.2),
    )
    .with_child(head(angles.head))
    .with_child(cube(
        Part::Tail,
        translate(0.45, 0.05, 0.05) * rotate_x(0.0),
        LIGHT_BLUE,
        scale(0.15, 0.1, 0.1),
    ))
    .with_child(scapular(Part::LeftScapular, LEFT_SHOULDER_Z, angles.scapular).with_child(left_wing))
    .with_child(
        scapular(Part::RightScapular, RIGHT_SHOULDER_Z, angles.scapular).with_child(right_wing),
    )
    .with_child(hat(angles.head))
}

/// Assembles and renders the bird in draw order.
pub fn render(angles: &JointAngles, ctx: &mut impl GraphicsContext) {
    assemble(angles).render(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::DrawList;

    const EPS: f32 = 1e-5;

    fn rest() -> SceneNode {
        assemble(&JointAngles::default())
    }

    /// Frame of `part` expressed in its parent's frame.
    fn relative(tree: &SceneNode, parent: Part, part: Part) -> Mat4 {
        let p = tree.world_frame(parent.name()).unwrap();
        let c = tree.world_frame(part.name()).unwrap();
        p.inverse() * c
    }

    fn rotation_of(m: Mat4) -> Mat4 {
        let (_, rot, _) = m.to_scale_rotation_translation();
        Mat4::from_quat(rot)
    }

    #[test]
    fn every_part_is_present_in_draw_order() {
        let names: Vec<_> = rest().named_shapes().into_iter().map(|(n, _)| n).collect();
        let expected: Vec<_> = Part::ALL.iter().map(|p| p.name()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn hat_draws_last_on_the_head_frame() {
        for angle in [0.0, 25.0] {
            let tree = assemble(&JointAngles::new(angle, 0.0, 0.0));
            let shapes = tree.named_shapes();
            assert_eq!(shapes.last().map(|(n, _)| *n), Some(Part::Hat.name()));

            let hat = relative(&tree, Part::Head, Part::Hat);
            assert!(hat.abs_diff_eq(translate(0.025, 0.27, -0.008), EPS));
        }
    }

    #[test]
    fn only_the_hat_is_a_pyramid() {
        for (name, shape) in rest().named_shapes() {
            let expected = if name == Part::Hat.name() {
                ShapeKind::Pyramid
            } else {
                ShapeKind::Cube
            };
            assert_eq!(shape.kind, expected, "{name}");
        }
    }

    #[test]
    fn pupils_draw_after_their_eyes() {
        let names: Vec<_> = rest().named_shapes().into_iter().map(|(n, _)| n).collect();
        let pos = |p: Part| names.iter().position(|n| *n == p.name()).unwrap();
        assert!(pos(Part::LeftPupil) == pos(Part::LeftEye) + 1);
        assert!(pos(Part::RightPupil) == pos(Part::RightEye) + 1);
    }

    #[test]
    fn same_angles_same_scene() {
        let angles = JointAngles::new(17.0, -8.0, 42.0);
        assert_eq!(assemble(&angles).shapes(), assemble(&angles).shapes());
    }

    #[test]
    fn body_frame_excludes_body_scale() {
        let tree = rest();
        let body = tree.world_frame(Part::Body.name()).unwrap();
        assert!(body.abs_diff_eq(translate(-0.25, -0.25, 0.0), EPS));

        let head = tree.world_frame(Part::Head.name()).unwrap();
        assert!(head.abs_diff_eq(translate(-0.4, -0.25, 0.025), EPS));
    }

    #[test]
    fn head_rotates_about_z_at_the_neck() {
        let tree = assemble(&JointAngles::new(30.0, 0.0, 0.0));
        let head = relative(&tree, Part::Body, Part::Head);
        let expected = translate(-0.15, 0.0, 0.025) * rotate_z(30.0);
        assert!(head.abs_diff_eq(expected, EPS));
    }

    #[test]
    fn head_angle_carries_face_parts() {
        let still = rest();
        let turned = assemble(&JointAngles::new(40.0, 0.0, 0.0));
        for part in [Part::LeftEye, Part::Nose, Part::Hat] {
            let a = relative(&still, Part::Head, part);
            let b = relative(&turned, Part::Head, part);
            assert!(a.abs_diff_eq(b, EPS), "{part:?} moved relative to head");
            assert_ne!(
                still.shape(part.name()).unwrap().transform,
                turned.shape(part.name()).unwrap().transform
            );
        }
    }

    #[test]
    fn scapulars_mirror_across_body_center_plane() {
        for angle in [0.0, 15.0, -30.0, 90.0] {
            let tree = assemble(&JointAngles::new(0.0, angle, 0.0));
            let body_center = tree.shape(Part::Body.name()).unwrap().center();
            let left = tree.shape(Part::LeftScapular.name()).unwrap().center();
            let right = tree.shape(Part::RightScapular.name()).unwrap().center();

            assert!((left.x - right.x).abs() < EPS);
            assert!((left.y - right.y).abs() < EPS);
            assert!(((left.z - body_center.z) + (right.z - body_center.z)).abs() < EPS);
            assert!((left.z - body_center.z).abs() > 0.1);
        }
    }

    #[test]
    fn scenario_at_rest() {
        let tree = rest();

        let head = relative(&tree, Part::Body, Part::Head);
        assert!(rotation_of(head).abs_diff_eq(Mat4::IDENTITY, EPS));

        for side in [Part::LeftScapular, Part::RightScapular] {
            let frame = relative(&tree, Part::Body, side);
            assert!(rotation_of(frame).abs_diff_eq(Mat4::IDENTITY, EPS));
        }

        let left = relative(&tree, Part::LeftScapular, Part::LeftWing);
        assert!(rotation_of(left).abs_diff_eq(rotate_x(180.0), EPS));

        let right = relative(&tree, Part::RightScapular, Part::RightWing);
        assert!(rotation_of(right).abs_diff_eq(Mat4::IDENTITY, EPS));
    }

    // The two hinges are not mirror images: the left wing rotates by
    // 180 - angle and uses different hinge offsets than the right.
    #[test]
    fn wing_hinges_are_asymmetric() {
        let angles = JointAngles::new(0.0, 0.0, 30.0);
        let tree = assemble(&angles);

        let left = relative(&tree, Part::LeftScapular, Part::LeftWing);
        let right = relative(&tree, Part::RightScapular, Part::RightWing);

        assert!(rotation_of(left).abs_diff_eq(rotate_x(150.0), EPS));
        assert!(rotation_of(right).abs_diff_eq(rotate_x(30.0), EPS));
        assert!(!left.w_axis.abs_diff_eq(right.w_axis, EPS));
    }

    #[test]
    fn wing_follows_scapular() {
        let down = assemble(&JointAngles::new(0.0, 0.0, 10.0));
        let up = assemble(&JointAngles::new(0.0, 25.0, 10.0));
        let a = relative(&down, Part::LeftScapular, Part::LeftWing);
        let b = relative(&up, Part::LeftScapular, Part::LeftWing);
        assert!(a.abs_diff_eq(b, EPS));
        assert_ne!(
            down.world_frame(Part::LeftWing.name()),
            up.world_frame(Part::LeftWing.name())
        );
    }

    #[test]
    fn render_submits_thirteen_shapes() {
        let mut list = DrawList::new();
        render(&JointAngles::default(), &mut list);

        assert_eq!(list.commands().len(), 13);
        assert_eq!(list.triangle_count(), 12 * 12 + 6);
        assert_eq!(list.commands()[0].color, BODY_BLUE);
    }
}
