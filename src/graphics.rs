//! The graphics context seam between scene code and the GPU.
//!
//! Shapes never talk to wgpu directly. They upload uniforms and submit
//! triangles through [`GraphicsContext`], which keeps the scene assembler and
//! render loop testable without a device. [`DrawList`] is the recording
//! implementation: it collects one frame's draws on the CPU and
//! [`ShapePass`](crate::shape_pass::ShapePass) uploads and replays it.

use glam::{Mat4, Vec3};

use crate::color::Color;

/// Which buffers a [`GraphicsContext::clear`] call resets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClearBuffers {
    pub color: bool,
    pub depth: bool,
}

impl ClearBuffers {
    pub const ALL: ClearBuffers = ClearBuffers {
        color: true,
        depth: true,
    };
}

/// Operations the scene needs from a renderer.
///
/// Implementations may assume a valid, initialized backend: none of these
/// calls can fail.
pub trait GraphicsContext {
    /// Reset the frame buffers.
    fn clear(&mut self, buffers: ClearBuffers);

    /// Bind the view transform applied to every subsequent draw.
    fn set_global_transform(&mut self, transform: Mat4);

    /// Bind the model transform and flat color for subsequent draws.
    fn set_uniforms(&mut self, model: Mat4, color: Color);

    /// Submit a triangle list (three vertices per triangle) using the bound uniforms.
    fn draw_triangles(&mut self, vertices: &[Vec3]);
}

/// Per-draw uniform snapshot recorded by [`DrawList`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    /// Model transform bound when the draw was submitted.
    pub model: Mat4,
    /// Flat color bound when the draw was submitted.
    pub color: Color,
    /// Range into [`DrawList::vertices`].
    pub first_vertex: u32,
    pub vertex_count: u32,
}

/// A recorded frame: global transform, clear requests, vertices and draws.
#[derive(Debug)]
pub struct DrawList {
    global: Mat4,
    clear: Option<ClearBuffers>,
    model: Mat4,
    color: Color,
    vertices: Vec<Vec3>,
    commands: Vec<DrawCommand>,
}

impl Default for DrawList {
    fn default() -> Self {
        Self {
            global: Mat4::IDENTITY,
            clear: None,
            model: Mat4::IDENTITY,
            color: Color::WHITE,
            vertices: Vec::new(),
            commands: Vec::new(),
        }
    }
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous frame. Bound uniforms return to identity/white.
    pub fn reset(&mut self) {
        self.global = Mat4::IDENTITY;
        self.clear = None;
        self.model = Mat4::IDENTITY;
        self.color = Color::WHITE;
        self.vertices.clear();
        self.commands.clear();
    }

    pub fn global_transform(&self) -> Mat4 {
        self.global
    }

    /// The buffers cleared this frame, if any clear was requested.
    pub fn cleared(&self) -> Option<ClearBuffers> {
        self.clear
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Total triangles recorded this frame.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

impl GraphicsContext for DrawList {
    fn clear(&mut self, buffers: ClearBuffers) {
        // A clear discards anything drawn before it
        self.vertices.clear();
        self.commands.clear();
        self.clear = Some(match self.clear {
            Some(prev) => ClearBuffers {
                color: prev.color || buffers.color,
                depth: prev.depth || buffers.depth,
            },
            None => buffers,
        });
    }

    fn set_global_transform(&mut self, transform: Mat4) {
        self.global = transform;
    }

    fn set_uniforms(&mut self, model: Mat4, color: Color) {
        self.model = model;
        self.color = color;
    }

    fn draw_triangles(&mut self, vertices: &[Vec3]) {
        if vertices.is_empty() {
            return;
        }
        debug_assert!(vertices.len() % 3 == 0, "triangle list length must be a multiple of 3");

        let first_vertex = self.vertices.len() as u32;
        self.vertices.extend_from_slice(vertices);

        // Consecutive draws with the same uniforms collapse into one command
        if let Some(last) = self.commands.last_mut() {
            if last.model == self.model
                && last.color == self.color
                && last.first_vertex + last.vertex_count == first_vertex
            {
                last.vertex_count += vertices.len() as u32;
                return;
            }
        }

        self.commands.push(DrawCommand {
            model: self.model,
            color: self.color,
            first_vertex,
            vertex_count: vertices.len() as u32,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRI: [Vec3; 3] = [Vec3::ZERO, Vec3::X, Vec3::Y];

    #[test]
    fn draws_with_same_uniforms_merge() {
        let mut list = DrawList::new();
        list.set_uniforms(Mat4::IDENTITY, Color::BLACK);
        list.draw_triangles(&TRI);
        list.draw_triangles(&TRI);

        assert_eq!(list.commands().len(), 1);
        assert_eq!(list.commands()[0].vertex_count, 6);
        assert_eq!(list.triangle_count(), 2);
    }

    #[test]
    fn uniform_change_starts_new_command() {
        let mut list = DrawList::new();
        list.set_uniforms(Mat4::IDENTITY, Color::BLACK);
        list.draw_triangles(&TRI);
        list.set_uniforms(Mat4::from_scale(Vec3::splat(2.0)), Color::BLACK);
        list.draw_triangles(&TRI);

        let cmds = list.commands();
        assert_eq!(cmds.len(), 2);
        assert_eq!(cmds[1].first_vertex, 3);
        assert_eq!(cmds[1].model, Mat4::from_scale(Vec3::splat(2.0)));
    }

    #[test]
    fn clear_discards_earlier_draws() {
        let mut list = DrawList::new();
        list.draw_triangles(&TRI);
        list.clear(ClearBuffers::ALL);

        assert!(list.commands().is_empty());
        assert_eq!(list.cleared(), Some(ClearBuffers::ALL));
    }

    #[test]
    fn reset_restores_defaults() {
        let mut list = DrawList::new();
        list.set_global_transform(Mat4::from_rotation_y(1.0));
        list.clear(ClearBuffers::ALL);
        list.draw_triangles(&TRI);
        list.reset();

        assert_eq!(list.global_transform(), Mat4::IDENTITY);
        assert_eq!(list.cleared(), None);
        assert!(list.vertices().is_empty());
    }
}
