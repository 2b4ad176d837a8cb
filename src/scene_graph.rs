//! A small transform tree for articulated models.
//!
//! Each [`SceneNode`] carries two transforms:
//!
//! - `local`: the attachment frame relative to the parent. It propagates to
//!   every child.
//! - `visual.transform`: a render-only transform (usually a scale) applied on
//!   top of the node's world frame when drawing its own shape. It never
//!   reaches the children.
//!
//! Keeping the two apart is what lets a child hang off the parent's frame as
//! it exists at the attachment point, instead of inheriting the parent's box
//! dimensions. World frames compose root to leaf:
//!
//! ```text
//! world(node)  = world(parent) * node.local
//! shape(node)  = world(node)   * node.visual.transform
//! ```
//!
//! Because [`Mat4`] is `Copy`, every frame handed to a child is a value, so a
//! later change to the parent never rewrites an already-built child.

use glam::Mat4;

use crate::color::Color;
use crate::graphics::GraphicsContext;
use crate::shape::{Shape, ShapeKind};

/// The drawable part of a node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Visual {
    pub kind: ShapeKind,
    pub color: Color,
    /// Applied after the node's world frame; does not propagate.
    pub transform: Mat4,
}

/// A node in the transform tree.
#[derive(Clone, Debug)]
pub struct SceneNode {
    name: &'static str,
    local: Mat4,
    visual: Option<Visual>,
    children: Vec<SceneNode>,
}

impl SceneNode {
    /// Creates an invisible node with the given attachment frame.
    pub fn new(name: &'static str, local: Mat4) -> Self {
        Self {
            name,
            local,
            visual: None,
            children: Vec::new(),
        }
    }

    /// Gives the node a shape drawn at `world * transform`.
    pub fn with_visual(mut self, kind: ShapeKind, color: Color, transform: Mat4) -> Self {
        self.visual = Some(Visual {
            kind,
            color,
            transform,
        });
        self
    }

    /// Appends a child; children draw in insertion order.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn local(&self) -> Mat4 {
        self.local
    }

    pub fn local_mut(&mut self) -> &mut Mat4 {
        &mut self.local
    }

    pub fn visual(&self) -> Option<&Visual> {
        self.visual.as_ref()
    }

    pub fn visual_mut(&mut self) -> Option<&mut Visual> {
        self.visual.as_mut()
    }

    /// Depth-first pre-order walk handing each node its world frame.
    pub fn walk(&self, parent: Mat4, f: &mut impl FnMut(&SceneNode, Mat4)) {
        let world = parent * self.local;
        f(self, world);
        for child in &self.children {
            child.walk(world, f);
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn len(&self) -> usize {
        1 + self.children.iter().map(SceneNode::len).sum::<usize>()
    }

    /// Always false; a node tree holds at least its root.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Finds the first node with `name` in pre-order.
    pub fn find(&self, name: &str) -> Option<&SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneNode> {
        if self.name == name {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(name))
    }

    /// World frame of the named node, with this node as the root.
    pub fn world_frame(&self, name: &str) -> Option<Mat4> {
        let mut found = None;
        self.walk(Mat4::IDENTITY, &mut |node, world| {
            if found.is_none() && node.name == name {
                found = Some(world);
            }
        });
        found
    }

    /// The named node's shape with its final transform.
    pub fn shape(&self, name: &str) -> Option<Shape> {
        let mut found = None;
        self.walk(Mat4::IDENTITY, &mut |node, world| {
            if found.is_none() && node.name == name {
                found = node.to_shape(world);
            }
        });
        found
    }

    /// Every visible node's shape, in draw order.
    pub fn shapes(&self) -> Vec<Shape> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(Mat4::IDENTITY, &mut |node, world| {
            if let Some(shape) = node.to_shape(world) {
                out.push(shape);
            }
        });
        out
    }

    /// Like [`shapes`](Self::shapes) but paired with node names.
    pub fn named_shapes(&self) -> Vec<(&'static str, Shape)> {
        let mut out = Vec::with_capacity(self.len());
        self.walk(Mat4::IDENTITY, &mut |node, world| {
            if let Some(shape) = node.to_shape(world) {
                out.push((node.name, shape));
            }
        });
        out
    }

    /// Renders every visible node in draw order.
    pub fn render(&self, ctx: &mut impl GraphicsContext) {
        self.walk(Mat4::IDENTITY, &mut |node, world| {
            if let Some(shape) = node.to_shape(world) {
                shape.render(ctx);
            }
        });
    }

    fn to_shape(&self, world: Mat4) -> Option<Shape> {
        self.visual
            .map(|v| Shape::new(v.kind, v.color, world * v.transform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::DrawList;
    use glam::Vec3;

    fn scale(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_scale(Vec3::new(x, y, z))
    }

    fn offset(x: f32, y: f32, z: f32) -> Mat4 {
        Mat4::from_translation(Vec3::new(x, y, z))
    }

    fn arm() -> SceneNode {
        SceneNode::new("torso", offset(1.0, 0.0, 0.0))
            .with_visual(ShapeKind::Cube, Color::WHITE, scale(4.0, 1.0, 1.0))
            .with_child(
                SceneNode::new("hand", offset(0.0, 2.0, 0.0))
                    .with_visual(ShapeKind::Cube, Color::BLACK, scale(0.5, 0.5, 0.5)),
            )
            .with_child(SceneNode::new("socket", offset(0.0, 0.0, 3.0)))
    }

    #[test]
    fn child_world_frame_ignores_parent_visual_scale() {
        let tree = arm();
        let hand = tree.world_frame("hand").unwrap();
        assert!(hand.abs_diff_eq(offset(1.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn rescaling_parent_visual_leaves_child_untouched() {
        let mut tree = arm();
        let hand_before = tree.shape("hand").unwrap();
        let torso_before = tree.shape("torso").unwrap();

        tree.visual_mut().unwrap().transform = scale(10.0, 10.0, 10.0);

        assert_eq!(tree.shape("hand").unwrap(), hand_before);
        assert_ne!(tree.shape("torso").unwrap(), torso_before);
    }

    #[test]
    fn moving_parent_frame_moves_children() {
        let mut tree = arm();
        *tree.local_mut() = offset(5.0, 0.0, 0.0);
        let hand = tree.world_frame("hand").unwrap();
        assert!(hand.abs_diff_eq(offset(5.0, 2.0, 0.0), 1e-6));
    }

    #[test]
    fn invisible_nodes_produce_no_shapes() {
        let tree = arm();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.shapes().len(), 2);
        assert!(tree.shape("socket").is_none());
        assert!(tree.world_frame("socket").is_some());
    }

    #[test]
    fn draw_order_is_pre_order() {
        let names: Vec<_> = arm().named_shapes().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["torso", "hand"]);
    }

    #[test]
    fn render_emits_one_command_per_visible_node() {
        let mut list = DrawList::new();
        arm().render(&mut list);
        assert_eq!(list.commands().len(), 2);
        assert_eq!(list.triangle_count(), 24);
    }

    #[test]
    fn find_mut_reaches_nested_nodes() {
        let mut tree = arm();
        tree.find_mut("hand").unwrap().push_child(SceneNode::new("finger", Mat4::IDENTITY));
        assert!(tree.find("finger").is_some());
        assert!(tree.find("missing").is_none());
    }
}
