//! Scene nodes, their handles and the per-type behavior hooks.

use std::any::Any;
use std::fmt;

use cgmath::Matrix4;

use crate::gfx::render::DrawContext;
use crate::math::{Rotation, Vector3};

/// Generational handle to a node stored in a [`super::SceneGraph`].
///
/// Handles to removed nodes stay invalid even after their slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(super) index: u32,
    pub(super) generation: u32,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// World-space state of a node, resolved through all of its ancestors.
#[derive(Debug, Clone, Copy)]
pub struct WorldTransform {
    pub position: Vector3,
    pub rotation: Rotation,
    /// Parent matrices times the local `T * R * S` matrix.
    pub matrix: Matrix4<f32>,
}

/// Per-type behavior plugged into a node.
///
/// The graph owns the traversal order: `update_transform_self` runs before
/// any child is refreshed, `step_self` after the node's own motion has been
/// integrated, and `draw_self` before the node's children draw. Every hook
/// defaults to doing nothing.
pub trait NodeBehavior: Any {
    /// Called on every transform refresh with the node's new world transform.
    fn update_transform_self(&mut self, _world: &WorldTransform) {}

    /// Called once per step after velocities have been applied.
    fn step_self(&mut self, _dt: f32) {}

    /// Called once per draw pass.
    fn draw_self(&mut self, _node: NodeId, _world: &WorldTransform, _ctx: &mut DrawContext<'_>) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Behavior for pure hierarchy nodes (pivots, anchors) with nothing to draw.
#[derive(Debug, Default, Clone, Copy)]
pub struct Group;

impl NodeBehavior for Group {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A positioned, rotated, scaled entity in the scene hierarchy.
///
/// Transform state is local (relative to the parent). Hierarchy links and
/// transform mutators live on [`super::SceneGraph`] because they must refresh
/// descendants; the motion parameters below can be changed directly.
pub struct SceneNode {
    pub(super) name: String,

    pub(super) position: Vector3,
    pub(super) rotation: Rotation,
    pub(super) scale: Vector3,

    // Physics
    velocity: Vector3,
    max_velocity: f32,
    acceleration: f32,
    angular_velocity: Vector3,

    // Hierarchy
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,

    pub(super) behavior: Box<dyn NodeBehavior>,
}

impl SceneNode {
    pub(super) fn new(name: &str, behavior: Box<dyn NodeBehavior>) -> Self {
        Self {
            name: name.to_string(),
            position: Vector3::ZERO,
            rotation: Rotation::identity(),
            scale: Vector3::ONE,
            velocity: Vector3::ZERO,
            max_velocity: 0.0,
            acceleration: 0.0,
            angular_velocity: Vector3::ZERO,
            parent: None,
            children: Vec::new(),
            behavior,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Position relative to the parent.
    pub fn local_position(&self) -> Vector3 {
        self.position
    }

    /// Rotation relative to the parent.
    pub fn local_rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn scale(&self) -> Vector3 {
        self.scale
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children, most recently attached first.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn velocity(&self) -> Vector3 {
        self.velocity
    }

    /// Linear velocity in units per nominal frame.
    pub fn set_velocity(&mut self, velocity: Vector3) {
        self.velocity = velocity;
    }

    pub fn speed(&self) -> f32 {
        self.velocity.magnitude()
    }

    pub fn max_velocity(&self) -> f32 {
        self.max_velocity
    }

    /// Speed cap applied on every step; `0.0` disables it.
    pub fn set_max_velocity(&mut self, max_velocity: f32) {
        self.max_velocity = max_velocity;
    }

    pub fn acceleration(&self) -> f32 {
        self.acceleration
    }

    pub fn set_acceleration(&mut self, acceleration: f32) {
        self.acceleration = acceleration;
    }

    pub fn angular_velocity(&self) -> Vector3 {
        self.angular_velocity
    }

    /// Angular velocity as (pitch, yaw, roll) radians per nominal frame.
    pub fn set_angular_velocity(&mut self, angular_velocity: Vector3) {
        self.angular_velocity = angular_velocity;
    }

    /// Local `T * R * S` matrix.
    pub fn local_matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(cgmath::Vector3::from(self.position))
            * *self.rotation.matrix()
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Integrates velocities over `frame_time` nominal frames.
    ///
    /// The speed is clamped to `max_velocity` first (and stays clamped).
    /// Returns whether the local transform changed.
    pub(super) fn integrate(&mut self, frame_time: f32) -> bool {
        let mut moved = false;

        if !self.velocity.is_zero() {
            if self.max_velocity > 0.0 && self.velocity.magnitude() > self.max_velocity {
                self.velocity = self.velocity.normalize() * self.max_velocity;
            }
            self.position += self.velocity * frame_time;
            moved = true;
        }

        if !self.angular_velocity.is_zero() {
            let delta = self.angular_velocity * frame_time;
            self.rotation.rotate_by(delta.x, delta.y, delta.z);
            moved = true;
        }

        moved
    }

    pub fn behavior(&self) -> &dyn NodeBehavior {
        self.behavior.as_ref()
    }

    pub fn behavior_mut(&mut self) -> &mut dyn NodeBehavior {
        self.behavior.as_mut()
    }
}

impl fmt::Debug for SceneNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SceneNode")
            .field("name", &self.name)
            .field("position", &self.position)
            .field("rotation", &self.rotation)
            .field("scale", &self.scale)
            .field("velocity", &self.velocity)
            .field("angular_velocity", &self.angular_velocity)
            .field("parent", &self.parent)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_has_identity_transform() {
        let node = SceneNode::new("node", Box::new(Group));
        assert_eq!(node.name(), "node");
        assert_eq!(node.local_position(), Vector3::ZERO);
        assert_eq!(node.local_rotation(), Rotation::identity());
        assert_eq!(node.scale(), Vector3::ONE);
        assert!(node.parent().is_none());
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_integrate_without_motion_is_noop() {
        let mut node = SceneNode::new("still", Box::new(Group));
        assert!(!node.integrate(3.0));
        assert_eq!(node.local_position(), Vector3::ZERO);
        assert_eq!(node.local_rotation(), Rotation::identity());
    }

    #[test]
    fn test_integrate_clamps_speed() {
        let mut node = SceneNode::new("fast", Box::new(Group));
        node.set_velocity(Vector3::new(30.0, 40.0, 0.0));
        node.set_max_velocity(5.0);

        assert!(node.integrate(1.0));
        assert!((node.speed() - 5.0).abs() < 1e-5);
        assert!(node.local_position().distance(Vector3::new(3.0, 4.0, 0.0)) < 1e-5);
    }

    #[test]
    fn test_integrate_angular_velocity() {
        let mut node = SceneNode::new("spin", Box::new(Group));
        node.set_angular_velocity(Vector3::new(0.0, 0.5, 0.0));
        node.integrate(2.0);
        assert!((node.local_rotation().yaw() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_local_matrix_order() {
        let mut node = SceneNode::new("trs", Box::new(Group));
        node.position = Vector3::new(10.0, 0.0, 0.0);
        node.scale = Vector3::new(2.0, 2.0, 2.0);

        // Scale applies before translation.
        let p = node.local_matrix() * cgmath::Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert!((p.x - 12.0).abs() < 1e-5);
    }
}
