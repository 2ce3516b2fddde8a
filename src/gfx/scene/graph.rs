//! # Scene Graph
//!
//! Arena of [`SceneNode`]s addressed by generational [`NodeId`] handles.
//!
//! ## Hierarchy
//!
//! Every node has at most one parent. The parent link and the parent's child
//! list are only ever changed together, by [`SceneGraph::attach`] and
//! [`SceneGraph::detach`]. Parentless nodes are tracked as roots in insertion
//! order.
//!
//! ## Transforms
//!
//! World position, rotation and matrix are resolved on demand by walking the
//! ancestors (nothing is cached):
//!
//! - world position = parent world rotation applied to the local position,
//!   plus the parent world position
//! - world rotation = parent world rotation combined with the local rotation
//! - world matrix = parent world matrix * local `T * R * S`
//!
//! Any transform mutation runs [`SceneGraph::update_transform`], a top-down
//! pass that hands each node of the subtree its fresh [`WorldTransform`].
//!
//! ## Removal
//!
//! [`SceneGraph::remove`] orphans the children of the removed node: they are
//! detached, become roots and keep their local transforms.
//! [`SceneGraph::remove_recursive`] frees a whole subtree instead.

use cgmath::Matrix4;
use log::{debug, warn};

use super::node::{NodeBehavior, NodeId, SceneNode, WorldTransform};
use crate::error::{Error, Result};
use crate::gfx::render::DrawContext;
use crate::math::{Rotation, Vector3};

struct Slot {
    generation: u32,
    node: Option<SceneNode>,
}

/// Owner of all nodes of one scene.
#[derive(Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    roots: Vec<NodeId>,
    len: usize,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless node with an identity transform.
    pub fn insert<B: NodeBehavior>(&mut self, name: &str, behavior: B) -> NodeId {
        self.insert_boxed(name, Box::new(behavior))
    }

    pub fn insert_boxed(&mut self, name: &str, behavior: Box<dyn NodeBehavior>) -> NodeId {
        let node = SceneNode::new(name, behavior);

        let id = match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.node = Some(node);
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        };

        self.roots.push(id);
        self.len += 1;
        self.update_transform(id);
        id
    }

    /// Adds a node and attaches it to `parent`.
    pub fn insert_child<B: NodeBehavior>(
        &mut self,
        parent: NodeId,
        name: &str,
        behavior: B,
    ) -> Result<NodeId> {
        if !self.contains(parent) {
            return Err(Error::InvalidNode(parent));
        }
        let id = self.insert(name, behavior);
        self.attach(id, parent)?;
        Ok(id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parentless nodes in the order they became roots.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.node.as_ref().map(|node| {
                (
                    NodeId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    node,
                )
            })
        })
    }

    /// First live node with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.iter()
            .find(|(_, node)| node.name() == name)
            .map(|(id, _)| id)
    }

    /// The node's behavior, if it is of type `T`.
    pub fn behavior<T: NodeBehavior>(&self, id: NodeId) -> Option<&T> {
        self.get(id)?.behavior.as_any().downcast_ref::<T>()
    }

    pub fn behavior_mut<T: NodeBehavior>(&mut self, id: NodeId) -> Option<&mut T> {
        self.get_mut(id)?.behavior.as_any_mut().downcast_mut::<T>()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id)?.parent
    }

    /// Children of `id`, empty for unknown handles.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(|node| node.children()).unwrap_or(&[])
    }

    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// True if `ancestor` appears on the parent chain of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Makes `child` the first child of `parent`.
    ///
    /// Attaching to the current parent changes nothing. Otherwise the child
    /// leaves its old parent first and its subtree is refreshed afterwards.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        let current = self.get(child).ok_or(Error::InvalidNode(child))?.parent;
        if !self.contains(parent) {
            return Err(Error::InvalidNode(parent));
        }
        if current == Some(parent) {
            return Ok(());
        }
        if child == parent || self.is_ancestor(child, parent) {
            warn!("SceneGraph :: Refusing to attach {} to its descendant {}", child, parent);
            return Err(Error::HierarchyCycle { child, parent });
        }

        self.unlink(child);
        if let Some(node) = self.get_mut(parent) {
            node.children.insert(0, child);
        }
        if let Some(node) = self.get_mut(child) {
            node.parent = Some(parent);
        }

        self.update_transform(child);
        Ok(())
    }

    /// Detaches `child` from its parent; it becomes a root. No-op for roots
    /// and unknown handles.
    pub fn detach(&mut self, child: NodeId) {
        let Some(Some(_)) = self.get(child).map(|node| node.parent) else {
            return;
        };

        self.unlink(child);
        self.roots.push(child);
        self.update_transform(child);
    }

    /// Detaches every child of `parent`. The children stay alive as roots.
    pub fn detach_all_children(&mut self, parent: NodeId) {
        while let Some(first) = self.children(parent).first().copied() {
            self.detach(first);
        }
    }

    /// Frees `id`, orphaning its children, and hands back the node.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        if !self.contains(id) {
            debug!("SceneGraph :: Ignoring removal of unknown node {}", id);
            return None;
        }

        self.detach_all_children(id);
        self.unlink(id);

        let slot = &mut self.slots[id.index as usize];
        let node = slot.node.take();
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        node
    }

    /// Frees `id` and all of its descendants. Returns how many were freed.
    pub fn remove_recursive(&mut self, id: NodeId) -> usize {
        let children = self.children(id).to_vec();
        let mut removed = 0;
        for child in children {
            removed += self.remove_recursive(child);
        }
        if self.remove(id).is_some() {
            removed += 1;
        }
        removed
    }

    /// Removes `child` from its parent's child list or from the roots,
    /// without refreshing anything.
    fn unlink(&mut self, child: NodeId) {
        match self.parent(child) {
            Some(parent) => {
                if let Some(node) = self.get_mut(parent) {
                    node.children.retain(|id| *id != child);
                }
                if let Some(node) = self.get_mut(child) {
                    node.parent = None;
                }
            }
            None => self.roots.retain(|id| *id != child),
        }
    }

    pub fn world_position(&self, id: NodeId) -> Option<Vector3> {
        self.world_pose(id).map(|(position, _)| position)
    }

    pub fn world_rotation(&self, id: NodeId) -> Option<Rotation> {
        self.world_pose(id).map(|(_, rotation)| rotation)
    }

    /// World position and rotation in one walk up the ancestors.
    fn world_pose(&self, id: NodeId) -> Option<(Vector3, Rotation)> {
        let mut chain = vec![self.get(id)?];
        while let Some(parent) = chain[chain.len() - 1].parent {
            chain.push(self.get(parent)?);
        }

        let root = chain.pop()?;
        let mut position = root.position;
        let mut rotation = root.rotation;
        for node in chain.into_iter().rev() {
            position = rotation.transform_point(node.position) + position;
            rotation = rotation.combine(&node.rotation);
        }
        Some((position, rotation))
    }

    /// Full model matrix: ancestors' matrices times the local `T * R * S`.
    pub fn transform_matrix(&self, id: NodeId) -> Option<Matrix4<f32>> {
        let node = self.get(id)?;
        match node.parent {
            Some(parent) => Some(self.transform_matrix(parent)? * node.local_matrix()),
            None => Some(node.local_matrix()),
        }
    }

    pub fn world_transform(&self, id: NodeId) -> Option<WorldTransform> {
        let (position, rotation) = self.world_pose(id)?;
        Some(WorldTransform {
            position,
            rotation,
            matrix: self.transform_matrix(id)?,
        })
    }

    pub fn set_position(&mut self, id: NodeId, position: Vector3) {
        self.modify_transform(id, |node| node.position = position);
    }

    /// Moves the node by `delta` in its parent's space.
    pub fn move_by(&mut self, id: NodeId, delta: Vector3) {
        self.modify_transform(id, |node| node.position += delta);
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: Rotation) {
        self.modify_transform(id, |node| node.rotation = rotation);
    }

    pub fn set_angles(&mut self, id: NodeId, pitch: f32, yaw: f32, roll: f32) {
        self.modify_transform(id, |node| node.rotation.set_angles(pitch, yaw, roll));
    }

    pub fn rotate(&mut self, id: NodeId, d_pitch: f32, d_yaw: f32, d_roll: f32) {
        self.modify_transform(id, |node| node.rotation.rotate_by(d_pitch, d_yaw, d_roll));
    }

    pub fn set_scale(&mut self, id: NodeId, scale: Vector3) {
        self.modify_transform(id, |node| node.scale = scale);
    }

    fn modify_transform<F: FnOnce(&mut SceneNode)>(&mut self, id: NodeId, f: F) {
        match self.get_mut(id) {
            Some(node) => f(node),
            None => {
                debug!("SceneGraph :: Ignoring transform change on unknown node {}", id);
                return;
            }
        }
        self.update_transform(id);
    }

    /// Refreshes `id` and then every descendant, parents before children.
    pub fn update_transform(&mut self, id: NodeId) {
        if let Some(world) = self.world_transform(id) {
            self.refresh(id, &world);
        }
    }

    /// Runs the refresh hook of `id` with its known world transform, then
    /// derives each child's world transform from it.
    fn refresh(&mut self, id: NodeId, world: &WorldTransform) {
        let children = match self.get_mut(id) {
            Some(node) => {
                node.behavior.update_transform_self(world);
                node.children.clone()
            }
            None => return,
        };

        for child in children {
            if let Some(child_world) = self.child_world(world, child) {
                self.refresh(child, &child_world);
            }
        }
    }

    /// World transform of `child` given its parent's.
    fn child_world(&self, parent: &WorldTransform, child: NodeId) -> Option<WorldTransform> {
        let node = self.get(child)?;
        Some(WorldTransform {
            position: parent.rotation.transform_point(node.position) + parent.position,
            rotation: parent.rotation.combine(&node.rotation),
            matrix: parent.matrix * node.local_matrix(),
        })
    }

    /// Advances `id` and its subtree by `dt` milliseconds.
    ///
    /// Velocities are expressed per nominal frame, so motion is scaled by
    /// `dt / frame_unit`. Order: integrate motion, refresh transforms, run the
    /// node's `step_self`, then step the children.
    pub fn step(&mut self, id: NodeId, dt: f32, frame_unit: f32) {
        let frame_time = if frame_unit > 0.0 { dt / frame_unit } else { dt };

        let moved = match self.get_mut(id) {
            Some(node) => node.integrate(frame_time),
            None => return,
        };
        if moved {
            self.update_transform(id);
        }

        let children = match self.get_mut(id) {
            Some(node) => {
                node.behavior.step_self(dt);
                node.children.clone()
            }
            None => return,
        };

        for child in children {
            self.step(child, dt, frame_unit);
        }
    }

    /// Draws `id` and then its children, depth first.
    pub fn draw(&mut self, id: NodeId, ctx: &mut DrawContext<'_>) {
        if let Some(world) = self.world_transform(id) {
            self.draw_from(id, &world, ctx);
        }
    }

    fn draw_from(&mut self, id: NodeId, world: &WorldTransform, ctx: &mut DrawContext<'_>) {
        let children = match self.get_mut(id) {
            Some(node) => {
                node.behavior.draw_self(id, world, ctx);
                node.children.clone()
            }
            None => return,
        };

        for child in children {
            if let Some(child_world) = self.child_world(world, child) {
                self.draw_from(child, &child_world, ctx);
            }
        }
    }

    /// Steps every root (and so every node) once.
    pub fn step_all(&mut self, dt: f32, frame_unit: f32) {
        for root in self.roots.clone() {
            self.step(root, dt, frame_unit);
        }
    }

    /// Draws every root in root order.
    pub fn draw_all(&mut self, ctx: &mut DrawContext<'_>) {
        for root in self.roots.clone() {
            self.draw(root, ctx);
        }
    }
}
