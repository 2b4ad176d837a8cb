//! Renderable primitives: cubes and pyramids.
//!
//! A [`Shape`] is one colored primitive with its final model transform. Shapes
//! are produced fresh every frame by the scene assembler and dropped after
//! they are rendered.
//!
//! # Geometry
//!
//! Both primitives live in the unit box `[0, 1]^3` with their corner at the
//! origin, so a part's translation places its corner and its scale gives its
//! extent.
//!
//! | Kind    | Triangles | Faces                                   |
//! |---------|-----------|-----------------------------------------|
//! | Cube    | 12        | front, top, right, left, bottom, back   |
//! | Pyramid | 6         | four sloped faces, square base (2 tris) |

use glam::{Mat4, Vec3};

use crate::color::Color;
use crate::graphics::GraphicsContext;

/// Primitive geometry kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Cube,
    Pyramid,
}

#[rustfmt::skip]
const CUBE_TRIANGLES: [Vec3; 36] = [
    // Front (z = 0)
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0),
    // Top (y = 1)
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 1.0, 0.0),
    // Right (x = 1)
    Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(1.0, 1.0, 0.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0),
    // Left (x = 0)
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0),
    // Bottom (y = 0)
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 0.0),
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0),
    // Back (z = 1)
    Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 1.0, 1.0), Vec3::new(0.0, 1.0, 1.0),
];

const APEX: Vec3 = Vec3::new(0.5, 1.0, 0.5);

#[rustfmt::skip]
const PYRAMID_TRIANGLES: [Vec3; 18] = [
    // Front slope
    Vec3::new(0.0, 0.0, 0.0), APEX, Vec3::new(1.0, 0.0, 0.0),
    // Right slope
    Vec3::new(1.0, 0.0, 0.0), APEX, Vec3::new(1.0, 0.0, 1.0),
    // Back slope
    Vec3::new(1.0, 0.0, 1.0), APEX, Vec3::new(0.0, 0.0, 1.0),
    // Left slope
    Vec3::new(0.0, 0.0, 1.0), APEX, Vec3::new(0.0, 0.0, 0.0),
    // Base
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0),
    Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 1.0),
];

impl ShapeKind {
    /// The fixed triangle list for this kind, three vertices per triangle.
    pub fn triangles(self) -> &'static [Vec3] {
        match self {
            ShapeKind::Cube => &CUBE_TRIANGLES,
            ShapeKind::Pyramid => &PYRAMID_TRIANGLES,
        }
    }

    pub fn triangle_count(self) -> usize {
        self.triangles().len() / 3
    }
}

/// One colored primitive with its final model transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: Color,
    pub transform: Mat4,
}

impl Shape {
    pub fn new(kind: ShapeKind, color: Color, transform: Mat4) -> Self {
        Self {
            kind,
            color,
            transform,
        }
    }

    pub fn cube(color: Color, transform: Mat4) -> Self {
        Self::new(ShapeKind::Cube, color, transform)
    }

    pub fn pyramid(color: Color, transform: Mat4) -> Self {
        Self::new(ShapeKind::Pyramid, color, transform)
    }

    /// Upload this shape's uniforms and submit its triangles.
    pub fn render(&self, ctx: &mut impl GraphicsContext) {
        ctx.set_uniforms(self.transform, self.color);
        ctx.draw_triangles(self.kind.triangles());
    }

    /// The shape's `[0, 1]^3` box center in model-parent space.
    pub fn center(&self) -> Vec3 {
        self.transform.transform_point3(Vec3::splat(0.5))
    }
}
