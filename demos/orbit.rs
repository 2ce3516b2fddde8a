//! Headless run of a small scene: a camera riding a spinning rig around a
//! cube, rendered into the recording backend.

use anyhow::Context;
use okinawa::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut app = okinawa::default();

    let mut scene = Scene::new("orbit");

    let cube = scene.spawn("cube", Item::new(MeshId(0)));
    scene
        .graph
        .behavior_mut::<Item>(cube)
        .context("cube lost its item behavior")?
        .set_texture("crate.png");

    let rig = scene.spawn("rig", Group);
    let camera = scene
        .graph
        .insert_child(rig, "orbit camera", Camera::from_config(&app.config))?;
    scene.graph.set_position(camera, Vector3::new(0.0, 2.0, 8.0));
    scene.register_camera(camera);

    let overview = scene.spawn_camera("overview", Camera::from_config(&app.config));
    let eye = Vector3::new(0.0, 20.0, 20.0);
    scene.graph.set_position(overview, eye);
    scene
        .graph
        .set_rotation(overview, look_at(eye, Vector3::ZERO, Vector3::UNIT_Y));

    scene
        .graph
        .get_mut(rig)
        .context("rig node missing")?
        .set_angular_velocity(Vector3::new(0.0, 0.02, 0.0));

    app.scenes.add(scene)?;
    app.scenes.set_current(0)?;

    let mut backend = RecordingBackend::new();
    let mut clock = FrameClock::from_config(&app.config);
    clock.tick(0.0);

    // Simulated millisecond timer.
    let mut now = 0.0;
    while backend.frames() < 120 {
        now += 1.0;
        let Some(dt) = clock.tick(now) else {
            continue;
        };

        backend.begin_frame();
        if !app.frame(dt, &mut backend) {
            break;
        }

        if backend.frames() % 30 == 0 {
            let scene = app.scenes.current().context("no current scene")?;
            let eye = scene
                .graph
                .world_position(camera)
                .context("camera node missing")?;
            log::info!(
                "frame {}: camera at {}, {} draw calls ({} gizmos)",
                backend.frames(),
                eye,
                backend.calls.len(),
                backend.gizmo_count()
            );
        }
    }

    // Switch to the overview camera for a last frame.
    if let Some(scene) = app.scenes.current_mut() {
        scene.cameras.switch_to(1)?;
    }
    backend.begin_frame();
    app.frame(app.config.frame_unit(), &mut backend);
    for call in &backend.calls {
        log::info!("{:?} -> {:?}", call.node, call.source);
    }

    Ok(())
}
