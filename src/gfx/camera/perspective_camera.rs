use std::any::Any;

use cgmath::{perspective, Deg, Matrix4, Point3, SquareMatrix};
use log::warn;

use super::camera_utils::{convert_matrix4_to_array, CameraUniform, ViewProjection};
use crate::config::{self, Config};
use crate::gfx::render::{DrawCall, DrawContext, DrawSource};
use crate::gfx::scene::{NodeBehavior, NodeId, WorldTransform};
use crate::math::Vector3;

pub const DEFAULT_FOV: f32 = 45.0;
pub const DEFAULT_NEAR: f32 = 0.1;
pub const DEFAULT_FAR: f32 = 100.0;

/// Perspective camera attached to a scene node.
///
/// The view matrix follows the node: every transform refresh rebuilds it
/// from the node's world position looking along its world forward vector.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Vertical field of view in degrees.
    fov: f32,
    near: f32,
    far: f32,
    aspect: f32,
    eye: Vector3,
    view: Matrix4<f32>,
    projection: Matrix4<f32>,
}

impl Camera {
    /// Camera with the default lens. A non-positive `aspect` falls back to
    /// `1.0`.
    pub fn new(aspect: f32) -> Self {
        let aspect = if is_valid_perspective(DEFAULT_FOV, aspect, DEFAULT_NEAR, DEFAULT_FAR) {
            aspect
        } else {
            warn!("Camera :: Invalid aspect ratio {}, using 1.0", aspect);
            1.0
        };

        let mut camera = Self {
            fov: DEFAULT_FOV,
            near: DEFAULT_NEAR,
            far: DEFAULT_FAR,
            aspect,
            eye: Vector3::ZERO,
            view: Matrix4::identity(),
            projection: Matrix4::identity(),
        };
        camera.rebuild_projection();
        camera
    }

    /// Camera sized for the configured window.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.aspect_ratio())
    }

    /// Sets field of view (degrees) and clip planes.
    ///
    /// Requires `0 < fov < 180` and `0 < near < far`; otherwise the current
    /// lens is kept.
    pub fn set_perspective(&mut self, fov: f32, near: f32, far: f32) {
        if !is_valid_perspective(fov, self.aspect, near, far) {
            warn!(
                "Camera :: Ignoring invalid perspective fov={} near={} far={}",
                fov, near, far
            );
            return;
        }

        self.fov = fov;
        self.near = near;
        self.far = far;
        self.rebuild_projection();
    }

    /// Adapts the projection to a new surface size.
    pub fn set_aspect(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            warn!("Camera :: Ignoring degenerate surface size {}x{}", width, height);
            return;
        }
        self.set_aspect_ratio(width as f32 / height as f32);
    }

    /// Non-positive or non-finite ratios are ignored.
    pub fn set_aspect_ratio(&mut self, aspect: f32) {
        if !is_valid_perspective(self.fov, aspect, self.near, self.far) {
            warn!("Camera :: Ignoring invalid aspect ratio {}", aspect);
            return;
        }

        self.aspect = aspect;
        self.rebuild_projection();
    }

    fn rebuild_projection(&mut self) {
        self.projection = perspective(Deg(self.fov), self.aspect, self.near, self.far);
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn near(&self) -> f32 {
        self.near
    }

    pub fn far(&self) -> f32 {
        self.far
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    /// World position the view was last built from.
    pub fn eye(&self) -> Vector3 {
        self.eye
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: [self.eye.x, self.eye.y, self.eye.z, 1.0],
            view: convert_matrix4_to_array(self.view),
            projection: convert_matrix4_to_array(self.projection),
            view_proj: convert_matrix4_to_array(self.build_view_projection_matrix()),
        }
    }
}

/// Parameters `cgmath::perspective` accepts without panicking.
fn is_valid_perspective(fov: f32, aspect: f32, near: f32, far: f32) -> bool {
    (fov > 0.0 && fov < 180.0)
        && (aspect > 0.0 && aspect.is_finite())
        && (near > 0.0 && far > near && far.is_finite())
}

impl ViewProjection for Camera {
    fn view_matrix(&self) -> Matrix4<f32> {
        self.view
    }

    fn projection_matrix(&self) -> Matrix4<f32> {
        self.projection
    }
}

impl NodeBehavior for Camera {
    fn update_transform_self(&mut self, world: &WorldTransform) {
        let forward = world.rotation.forward();
        let up = world.rotation.up();

        self.eye = world.position;
        self.view = Matrix4::look_at_rh(
            Point3::from(self.eye),
            Point3::from(self.eye + forward),
            cgmath::Vector3::from(up),
        );
    }

    fn draw_self(&mut self, node: NodeId, world: &WorldTransform, ctx: &mut DrawContext<'_>) {
        if ctx.active_camera == Some(node) || !ctx.config.get_bool(config::DRAW_CAMERAS) {
            return;
        }

        let model = self.view.invert().unwrap_or(world.matrix);
        ctx.submit(DrawCall::new(node, DrawSource::CameraGizmo, model));
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
