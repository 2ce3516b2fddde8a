use log::{debug, info, warn};

use super::graph::SceneGraph;
use super::node::{NodeBehavior, NodeId};
use crate::config::Config;
use crate::gfx::camera::{Camera, CameraManager, CameraUniform};
use crate::gfx::render::{DrawContext, RenderBackend};

/// A named scene: its node graph, the root objects it steps and draws, and
/// its cameras.
///
/// Only root objects registered with the scene take part in stepping and
/// drawing; their descendants are reached through the graph.
pub struct Scene {
    name: String,
    pub graph: SceneGraph,
    pub cameras: CameraManager,
    roots: Vec<NodeId>,
    active: bool,
    current: bool,
    playable: bool,
}

impl Scene {
    pub fn new(name: &str) -> Self {
        info!("Scene :: Created scene: {}", name);
        Self {
            name: name.to_string(),
            graph: SceneGraph::new(),
            cameras: CameraManager::new(),
            roots: Vec::new(),
            active: false,
            current: false,
            playable: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Inserts a new node and registers it as a root object.
    pub fn spawn<B: NodeBehavior>(&mut self, name: &str, behavior: B) -> NodeId {
        let id = self.graph.insert(name, behavior);
        self.roots.push(id);
        id
    }

    /// Inserts a camera as a root object and registers it with the camera
    /// list.
    pub fn spawn_camera(&mut self, name: &str, camera: Camera) -> NodeId {
        let id = self.spawn(name, camera);
        self.cameras.add(id);
        id
    }

    /// Registers an existing camera node, e.g. one attached to a rig.
    pub fn register_camera(&mut self, id: NodeId) -> bool {
        if self.graph.behavior::<Camera>(id).is_none() {
            warn!("Scene :: Node {} is not a camera", id);
            return false;
        }
        self.cameras.add(id);
        true
    }

    /// Registers an existing parentless node as a root object.
    ///
    /// Nodes with a parent are refused since they are already reached
    /// through it.
    pub fn add_root(&mut self, id: NodeId) -> bool {
        let Some(node) = self.graph.get(id) else {
            warn!("Scene :: Cannot add unknown node {}", id);
            return false;
        };
        if node.parent().is_some() {
            warn!("Scene :: Cannot add item with parent directly to scene");
            return false;
        }
        if !self.roots.contains(&id) {
            self.roots.push(id);
        }
        true
    }

    /// Root objects, in registration order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn object_count(&self) -> usize {
        self.roots.len()
    }

    /// Registered roots that are still alive and parentless.
    fn live_roots(&self) -> Vec<NodeId> {
        self.roots
            .iter()
            .copied()
            .filter(|id| {
                self.graph
                    .get(*id)
                    .is_some_and(|node| node.parent().is_none())
            })
            .collect()
    }

    /// Removes `id` from the scene, orphaning its children.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.roots.retain(|root| *root != id);
        self.cameras.remove(id);
        self.graph.remove(id).is_some()
    }

    pub fn step(&mut self, dt: f32, frame_unit: f32) {
        if !self.active {
            return;
        }

        for root in self.live_roots() {
            self.graph.step(root, dt, frame_unit);
        }
    }

    /// Publishes the active camera to `backend` and draws every root object.
    pub fn draw(&mut self, config: &Config, backend: &mut dyn RenderBackend) {
        if !self.active {
            return;
        }

        let mut ctx = DrawContext::new(config, self.cameras.active(), backend);
        ctx.set_camera(&self.cameras.uniform(&self.graph));

        for root in self.live_roots() {
            self.graph.draw(root, &mut ctx);
        }
    }

    pub fn camera_uniform(&self) -> CameraUniform {
        self.cameras.uniform(&self.graph)
    }

    pub fn activate(&mut self) {
        debug!("Scene :: Activating {}", self.name);
        self.active = true;
        self.current = true;
    }

    pub fn deactivate(&mut self) {
        debug!("Scene :: Deactivating {}", self.name);
        self.active = false;
        self.current = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_current(&self) -> bool {
        self.current
    }

    pub fn is_playable(&self) -> bool {
        self.playable
    }

    pub fn set_playable(&mut self, playable: bool) {
        self.playable = playable;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::item::Item;
    use crate::gfx::render::{MeshId, RecordingBackend};
    use crate::gfx::scene::Group;
    use crate::math::Vector3;

    #[test]
    fn test_inactive_scene_does_nothing() {
        let mut scene = Scene::new("idle");
        let cube = scene.spawn("cube", Item::new(MeshId(0)));
        scene
            .graph
            .get_mut(cube)
            .unwrap()
            .set_velocity(Vector3::UNIT_X);

        let mut backend = RecordingBackend::new();
        scene.step(16.0, 16.0);
        scene.draw(&Config::default(), &mut backend);

        assert_eq!(scene.graph.world_position(cube), Some(Vector3::ZERO));
        assert!(backend.calls.is_empty());
        assert!(backend.camera.is_none());
    }

    #[test]
    fn test_active_scene_steps_and_draws() {
        let mut scene = Scene::new("main");
        let camera = scene.spawn_camera("camera", Camera::new(1.0));
        scene.graph.set_position(camera, Vector3::new(0.0, 0.0, 5.0));
        let cube = scene.spawn("cube", Item::new(MeshId(3)));
        scene
            .graph
            .get_mut(cube)
            .unwrap()
            .set_velocity(Vector3::UNIT_X);
        scene.activate();

        scene.step(16.0, 16.0);
        assert_eq!(scene.graph.world_position(cube), Some(Vector3::UNIT_X));

        let mut backend = RecordingBackend::new();
        scene.draw(&Config::default(), &mut backend);
        assert_eq!(backend.calls.len(), 1);
        assert_eq!(backend.gizmo_count(), 0);
        assert_eq!(
            backend.camera.map(|c| c.view_position),
            Some([0.0, 0.0, 5.0, 1.0])
        );
    }

    #[test]
    fn test_add_root_rejects_parented_nodes() {
        let mut scene = Scene::new("main");
        let parent = scene.spawn("parent", Group);
        let child = scene.graph.insert_child(parent, "child", Group).unwrap();
        let loose = scene.graph.insert("loose", Group);

        assert!(!scene.add_root(child));
        assert!(scene.add_root(loose));
        assert!(scene.add_root(loose));
        assert_eq!(scene.roots(), &[parent, loose]);
    }

    #[test]
    fn test_attached_root_is_not_stepped_twice() {
        let mut scene = Scene::new("main");
        let a = scene.spawn("a", Group);
        let b = scene.spawn("b", Group);
        scene.graph.get_mut(b).unwrap().set_velocity(Vector3::UNIT_Y);
        scene.graph.attach(b, a).unwrap();
        scene.activate();

        scene.step(10.0, 10.0);
        assert_eq!(scene.graph.world_position(b), Some(Vector3::UNIT_Y));
    }

    #[test]
    fn test_remove_forgets_camera() {
        let mut scene = Scene::new("main");
        let camera = scene.spawn_camera("camera", Camera::new(1.0));
        assert!(scene.remove(camera));
        assert!(scene.cameras.is_empty());
        assert_eq!(scene.object_count(), 0);
    }

    #[test]
    fn test_register_camera_requires_camera_behavior() {
        let mut scene = Scene::new("main");
        let rig = scene.spawn("rig", Group);
        let camera = scene
            .graph
            .insert_child(rig, "camera", Camera::new(1.0))
            .unwrap();

        assert!(!scene.register_camera(rig));
        assert!(scene.register_camera(camera));
        assert_eq!(scene.cameras.active(), Some(camera));
    }

    #[test]
    fn test_activation_flags() {
        let mut scene = Scene::new("flags");
        assert!(!scene.is_active() && !scene.is_current() && !scene.is_playable());

        scene.activate();
        assert!(scene.is_active() && scene.is_current());

        scene.deactivate();
        assert!(!scene.is_active() && !scene.is_current());

        scene.set_playable(true);
        assert!(scene.is_playable());
    }
}
