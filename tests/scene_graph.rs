use okinawa::prelude::*;
use std::f32::consts::{FRAC_PI_2, PI};

const TOLERANCE: f32 = 1e-4;

fn assert_vec_near(actual: Vector3, expected: Vector3) {
    assert!(
        actual.distance(expected) < TOLERANCE,
        "expected {} but got {}",
        expected,
        actual
    );
}

#[test]
fn test_half_turn_root_carries_child_behind() {
    let mut graph = SceneGraph::new();
    let root = graph.insert("root", Group);
    let child = graph.insert_child(root, "child", Group).unwrap();
    graph.set_position(child, Vector3::new(0.0, 0.0, -5.0));

    graph.set_rotation(root, Rotation::new(0.0, PI, 0.0));

    assert_vec_near(graph.world_position(child).unwrap(), Vector3::new(0.0, 0.0, 5.0));
}

#[test]
fn test_world_position_composes_parent_rotation_and_position() {
    let mut graph = SceneGraph::new();
    let parent = graph.insert("parent", Group);
    graph.set_position(parent, Vector3::new(10.0, 0.0, 0.0));
    graph.set_rotation(parent, Rotation::new(0.0, FRAC_PI_2, 0.0));
    let child = graph.insert_child(parent, "child", Group).unwrap();
    graph.set_position(child, Vector3::new(1.0, 0.0, 0.0));

    let parent_world = graph.world_rotation(parent).unwrap();
    let expected = parent_world.transform_point(Vector3::new(1.0, 0.0, 0.0))
        + graph.world_position(parent).unwrap();
    assert_vec_near(graph.world_position(child).unwrap(), expected);
    assert_vec_near(expected, Vector3::new(10.0, 0.0, 1.0));
}

#[test]
fn test_removed_parent_leaves_orphan_in_place_locally() {
    let mut scene = Scene::new("orphans");
    let parent = scene.spawn("parent", Group);
    scene.graph.set_position(parent, Vector3::new(3.0, 0.0, 0.0));
    let child = scene
        .graph
        .insert_child(parent, "child", Item::new(MeshId(1)))
        .unwrap();
    scene.graph.set_position(child, Vector3::new(0.0, 1.0, 0.0));

    assert!(scene.remove(parent));
    assert!(scene.graph.contains(child));
    assert_eq!(scene.graph.parent(child), None);
    assert_vec_near(scene.graph.world_position(child).unwrap(), Vector3::new(0.0, 1.0, 0.0));

    // Orphans are not scene objects until registered again.
    scene.activate();
    let mut backend = RecordingBackend::new();
    scene.draw(&Config::default(), &mut backend);
    assert!(backend.calls.is_empty());

    assert!(scene.add_root(child));
    scene.draw(&Config::default(), &mut backend);
    assert_eq!(backend.calls.len(), 1);
}

#[test]
fn test_camera_on_spinning_rig_follows_it() {
    let mut app = okinawa::default();

    let mut scene = Scene::new("orbit");
    let rig = scene.spawn("rig", Group);
    let camera = scene
        .graph
        .insert_child(rig, "camera", Camera::from_config(&app.config))
        .unwrap();
    scene.graph.set_position(camera, Vector3::new(0.0, 0.0, 10.0));
    scene.register_camera(camera);
    scene
        .graph
        .get_mut(rig)
        .unwrap()
        .set_angular_velocity(Vector3::new(0.0, 0.05, 0.0));
    app.scenes.add(scene).unwrap();
    app.scenes.set_current(0).unwrap();

    let mut backend = RecordingBackend::new();
    let dt = app.config.frame_unit();
    for _ in 0..20 {
        assert!(app.frame(dt, &mut backend));
    }

    let scene = app.scenes.current().unwrap();
    let eye = scene.graph.world_position(camera).unwrap();
    // 20 frames at 0.05 rad per frame.
    assert!((scene.graph.get(rig).unwrap().local_rotation().yaw() - 1.0).abs() < TOLERANCE);
    assert!((eye.magnitude() - 10.0).abs() < TOLERANCE);
    assert!(eye.y.abs() < TOLERANCE);
    assert!((scene.graph.world_rotation(camera).unwrap().yaw() - 1.0).abs() < TOLERANCE);

    let uniform = backend.camera.unwrap();
    assert_vec_near(
        Vector3::new(uniform.view_position[0], uniform.view_position[1], uniform.view_position[2]),
        eye,
    );
}

#[test]
fn test_look_at_then_attach_keeps_facing_in_world() {
    let mut graph = SceneGraph::new();
    let eye = Vector3::new(2.0, 3.0, 4.0);
    let target = Vector3::new(-1.0, 0.0, 0.0);

    let node = graph.insert("viewer", Group);
    graph.set_position(node, eye);
    graph.set_rotation(node, look_at(eye, target, Vector3::UNIT_Y));

    let forward = graph.world_rotation(node).unwrap().forward();
    assert_vec_near(forward, (target - eye).normalize());

    let (pitch, yaw) = direction_to_angles(target - eye);
    let rotation = graph.world_rotation(node).unwrap();
    assert!((rotation.pitch() - pitch).abs() < TOLERANCE);
    assert!((rotation.yaw() - yaw).abs() < TOLERANCE);
}
