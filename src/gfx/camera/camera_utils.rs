use cgmath::{Matrix4, SquareMatrix};
use log::{info, warn};

use super::perspective_camera::Camera;
use crate::error::{Error, Result};
use crate::gfx::scene::{NodeId, SceneGraph};

/// Degrees of rotation per unit of cursor movement.
pub const MOUSE_SENSITIVITY: f32 = 0.05;

/// Pitch limit for mouse look, in degrees.
pub const PITCH_LIMIT: f32 = 89.0;

/// Ordered list of the cameras of a scene plus the one currently rendered
/// from.
#[derive(Debug, Default)]
pub struct CameraManager {
    cameras: Vec<NodeId>,
    active: usize,
}

impl CameraManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a camera node. Returns its index.
    pub fn add(&mut self, camera: NodeId) -> usize {
        self.cameras.push(camera);
        self.cameras.len() - 1
    }

    /// Forgets a camera node. The active camera stays active unless it is
    /// the one removed, in which case the selection is kept in range.
    pub fn remove(&mut self, camera: NodeId) {
        let Some(index) = self.cameras.iter().position(|id| *id == camera) else {
            return;
        };

        self.cameras.remove(index);
        if index < self.active {
            self.active -= 1;
        }
        if self.active >= self.cameras.len() {
            self.active = self.cameras.len().saturating_sub(1);
        }
    }

    pub fn cameras(&self) -> &[NodeId] {
        &self.cameras
    }

    pub fn len(&self) -> usize {
        self.cameras.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cameras.is_empty()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active(&self) -> Option<NodeId> {
        self.cameras.get(self.active).copied()
    }

    /// Makes camera `index` the active one. Invalid indices leave the
    /// selection unchanged.
    pub fn switch_to(&mut self, index: usize) -> Result<()> {
        if index >= self.cameras.len() {
            warn!("CameraManager :: No camera at index {}", index);
            return Err(Error::CameraIndexOutOfRange {
                index,
                len: self.cameras.len(),
            });
        }
        if index != self.active {
            info!("CameraManager :: Switching to camera {}", index);
        }
        self.active = index;
        Ok(())
    }

    /// Rotates the active camera from a cursor delta in pixels.
    ///
    /// Moving right turns right, moving down looks down. Pitch is clamped to
    /// ±89° and roll is reset so the horizon stays level.
    pub fn apply_mouse_look(&self, graph: &mut SceneGraph, dx: f32, dy: f32) {
        let Some(camera) = self.active() else {
            return;
        };
        let Some(node) = graph.get(camera) else {
            warn!("CameraManager :: Active camera {} is gone", camera);
            return;
        };

        let rotation = node.local_rotation();
        let limit = PITCH_LIMIT.to_radians();
        let pitch = (rotation.pitch() - (dy * MOUSE_SENSITIVITY).to_radians()).clamp(-limit, limit);
        let yaw = rotation.yaw() - (dx * MOUSE_SENSITIVITY).to_radians();

        graph.set_angles(camera, pitch, yaw, 0.0);
    }

    /// Uniform of the active camera, or an identity uniform when there is
    /// none.
    pub fn uniform(&self, graph: &SceneGraph) -> CameraUniform {
        self.active()
            .and_then(|id| graph.behavior::<Camera>(id))
            .map(Camera::uniform)
            .unwrap_or_default()
    }

    /// Propagates a new surface size to every camera.
    pub fn resize(&self, graph: &mut SceneGraph, width: u32, height: u32) {
        for id in &self.cameras {
            if let Some(camera) = graph.behavior_mut::<Camera>(*id) {
                camera.set_aspect(width, height);
            }
        }
    }
}

/// Anything that can produce view and projection matrices.
pub trait ViewProjection {
    fn view_matrix(&self) -> Matrix4<f32>;
    fn projection_matrix(&self) -> Matrix4<f32>;

    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        self.projection_matrix() * self.view_matrix()
    }
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable, Debug, PartialEq)]
pub struct CameraUniform {
    /// The eye position of the camera in homogenous coordinates.
    ///
    /// Homogenous coordinates are used to fullfill the 16 byte alignment requirement.
    pub view_position: [f32; 4],

    pub view: [[f32; 4]; 4],
    pub projection: [[f32; 4]; 4],

    /// Contains the view projection matrix.
    pub view_proj: [[f32; 4]; 4],
}

impl Default for CameraUniform {
    /// Creates a default [CameraUniform].
    fn default() -> Self {
        let identity = convert_matrix4_to_array(Matrix4::identity());
        Self {
            view_position: [0.0, 0.0, 0.0, 1.0],
            view: identity,
            projection: identity,
            view_proj: identity,
        }
    }
}

pub fn convert_matrix4_to_array(matrix4: Matrix4<f32>) -> [[f32; 4]; 4] {
    let mut result = [[0.0; 4]; 4];

    for i in 0..4 {
        for j in 0..4 {
            result[i][j] = matrix4[i][j];
        }
    }

    result
}
