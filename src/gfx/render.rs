//! The seam between the scene core and whatever actually puts pixels on
//! screen. Nodes describe what they want drawn as [`DrawCall`]s and push them
//! into a [`RenderBackend`] through a [`DrawContext`].

use cgmath::Matrix4;
use log::debug;

use crate::config::Config;
use crate::gfx::camera::camera_utils::{convert_matrix4_to_array, CameraUniform};
use crate::gfx::scene::NodeId;

/// Handle of a mesh uploaded to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawSource {
    Mesh(MeshId),
    /// Debug gizmo showing where a non-active camera sits.
    CameraGizmo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub node: NodeId,
    pub source: DrawSource,
    /// Column-major world matrix.
    pub model: [[f32; 4]; 4],
    pub wireframe: bool,
    pub texture: Option<String>,
}

impl DrawCall {
    pub fn new(node: NodeId, source: DrawSource, model: Matrix4<f32>) -> Self {
        Self {
            node,
            source,
            model: convert_matrix4_to_array(model),
            wireframe: false,
            texture: None,
        }
    }
}

/// Receiver of camera matrices and draw calls for one frame.
pub trait RenderBackend {
    fn set_camera(&mut self, camera: &CameraUniform);
    fn draw(&mut self, call: DrawCall);
}

/// Everything a node may consult while drawing itself.
pub struct DrawContext<'a> {
    pub config: &'a Config,
    /// Node of the camera the frame is rendered from.
    pub active_camera: Option<NodeId>,
    backend: &'a mut dyn RenderBackend,
}

impl<'a> DrawContext<'a> {
    pub fn new(
        config: &'a Config,
        active_camera: Option<NodeId>,
        backend: &'a mut dyn RenderBackend,
    ) -> Self {
        Self {
            config,
            active_camera,
            backend,
        }
    }

    pub fn set_camera(&mut self, camera: &CameraUniform) {
        self.backend.set_camera(camera);
    }

    pub fn submit(&mut self, call: DrawCall) {
        self.backend.draw(call);
    }
}

/// Backend that keeps everything it is given. Handy for headless runs.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub camera: Option<CameraUniform>,
    pub calls: Vec<DrawCall>,
    frames: usize,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops the recorded calls, keeping the frame counter.
    pub fn begin_frame(&mut self) {
        self.calls.clear();
        self.frames += 1;
        debug!("RecordingBackend :: Frame {}", self.frames);
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn calls_for(&self, node: NodeId) -> impl Iterator<Item = &DrawCall> {
        self.calls.iter().filter(move |call| call.node == node)
    }

    pub fn gizmo_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| call.source == DrawSource::CameraGizmo)
            .count()
    }
}

impl RenderBackend for RecordingBackend {
    fn set_camera(&mut self, camera: &CameraUniform) {
        self.camera = Some(*camera);
    }

    fn draw(&mut self, call: DrawCall) {
        self.calls.push(call);
    }
}
