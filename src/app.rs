use log::{debug, info};
use winit::{dpi::PhysicalSize, event::WindowEvent};

use crate::config::Config;
use crate::gfx::{
    camera::FlyController,
    render::RenderBackend,
    scene::{NodeId, SceneManager},
};
use crate::input::{Input, InputState};

/// Engine context: configuration, scenes and input for one window.
///
/// The app does not own a window or a GPU. The embedding event loop feeds it
/// window events and calls [`OkinawaApp::frame`] with the elapsed time and a
/// backend to draw into.
pub struct OkinawaApp {
    pub config: Config,
    pub scenes: SceneManager,
    pub input: Input,
    pub controller: FlyController,
    /// Whether the keyboard flies the active camera.
    pub fly_camera: bool,
    /// Scene index and camera the keyboard last set in motion.
    driven: Option<(usize, NodeId)>,
    last_cursor: Option<(f64, f64)>,
    exit_requested: bool,
}

impl Default for OkinawaApp {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl OkinawaApp {
    pub fn new(config: Config) -> Self {
        info!(
            "Okinawa :: Starting with a {}x{} window at {} fps",
            config.get_int(crate::config::WINDOW_WIDTH),
            config.get_int(crate::config::WINDOW_HEIGHT),
            config.get_int(crate::config::FPS)
        );
        Self {
            config,
            scenes: SceneManager::new(),
            input: Input::new(),
            controller: FlyController::default(),
            fly_camera: true,
            driven: None,
            last_cursor: None,
            exit_requested: false,
        }
    }

    /// Runs one frame of `dt` milliseconds against the current scene.
    ///
    /// Order: camera selection, keyboard flight, scene step, scene draw.
    /// Returns `false` once an exit has been requested.
    pub fn frame(&mut self, dt: f32, backend: &mut dyn RenderBackend) -> bool {
        let state = self.input.state();
        if state.exit_requested {
            self.exit_requested = true;
        }

        let frame_unit = self.config.frame_unit();
        if let (Some(index), Some(scene)) = (state.change_camera, self.scenes.current_mut()) {
            let _ = scene.cameras.switch_to(index);
        }
        if self.fly_camera {
            self.drive_camera(&state, frame_unit);
        }

        match self.scenes.current_mut() {
            Some(scene) => {
                scene.step(dt, frame_unit);
                scene.draw(&self.config, backend);
            }
            None => debug!("Okinawa :: No current scene to run"),
        }

        !self.exit_requested
    }

    /// Flies the active camera while movement or turn keys are held, and
    /// stops it once they are released or another camera takes over. Idle
    /// frames leave camera velocities alone.
    fn drive_camera(&mut self, state: &InputState, frame_unit: f32) {
        let target = self.scenes.current_index().and_then(|index| {
            let camera = self.scenes.get(index)?.cameras.active()?;
            Some((index, camera))
        });

        let keys_held = state.is_moving() || state.is_turning();

        if let Some((index, camera)) = self.driven {
            if Some((index, camera)) != target || !keys_held {
                if let Some(scene) = self.scenes.get_mut(index) {
                    self.controller
                        .apply(&mut scene.graph, camera, &InputState::default(), frame_unit);
                }
                self.driven = None;
            }
        }

        if !keys_held {
            return;
        }
        if let Some((index, camera)) = target {
            if let Some(scene) = self.scenes.get_mut(index) {
                self.controller.apply(&mut scene.graph, camera, state, frame_unit);
                self.driven = target;
            }
        }
    }

    /// Mouse look from an absolute cursor position. The first sample only
    /// records the position.
    pub fn process_cursor(&mut self, x: f64, y: f64) {
        let Some((last_x, last_y)) = self.last_cursor.replace((x, y)) else {
            return;
        };

        if let Some(scene) = self.scenes.current_mut() {
            scene
                .cameras
                .apply_mouse_look(&mut scene.graph, (x - last_x) as f32, (y - last_y) as f32);
        }
    }

    /// Records the new window size and resizes every camera of every scene.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.config
            .set_int(crate::config::WINDOW_WIDTH, width as i32);
        self.config
            .set_int(crate::config::WINDOW_HEIGHT, height as i32);

        for index in 0..self.scenes.len() {
            if let Some(scene) = self.scenes.get_mut(index) {
                scene.cameras.resize(&mut scene.graph, width, height);
            }
        }
    }

    /// Feeds a winit window event. Returns whether the app used it.
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => self.input.process_key_event(event),
            WindowEvent::CursorMoved { position, .. } => {
                self.process_cursor(position.x, position.y);
                true
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.resize(*width, *height);
                true
            }
            WindowEvent::Focused(false) => {
                self.input.clear();
                self.last_cursor = None;
                true
            }
            WindowEvent::CloseRequested => {
                self.request_exit();
                true
            }
            _ => false,
        }
    }

    pub fn request_exit(&mut self) {
        info!("Okinawa :: Exit requested");
        self.exit_requested = true;
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Fixed-rate frame gate: hands out a frame once at least one nominal frame
/// duration has passed since the previous one.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    time_per_frame: f64,
    last: Option<f64>,
}

impl FrameClock {
    pub fn new(time_per_frame: f64) -> Self {
        Self {
            time_per_frame,
            last: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.frame_unit() as f64)
    }

    /// Given the current time in milliseconds, returns the elapsed time of a
    /// due frame. The first call only starts the clock.
    pub fn tick(&mut self, now: f64) -> Option<f32> {
        let Some(last) = self.last else {
            self.last = Some(now);
            return None;
        };

        let delta = now - last;
        if delta < self.time_per_frame {
            return None;
        }

        self.last = Some(now);
        Some(delta as f32)
    }
}
