use articula::World;
use articula::WorldConfig;
use articula::components::{Effector, EffectorError, SegmentConfig};
use articula::controllers::SineController;
use articula::core::{SegmentId, SideType, Transform};
use nalgebra::Vector3;

fn pair() -> (World, SegmentId, SegmentId) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut world = World::with_config(WorldConfig::builder().gravity(Vector3::zeros()).build());
    let root = world.new_segment("root", Transform::new());
    let child = world.new_segment("child", Transform::new());
    world.connect(child, root, SideType::Right).unwrap();
    (world, root, child)
}

fn forces(world: &World, id: SegmentId) -> (f32, f32) {
    let seg = world.get_segment(id).unwrap();
    (seg.axis_force(), seg.swing_axis_force())
}

#[test]
fn signals_map_onto_force_range() {
    let (mut world, _, child) = pair();
    let seg = world.get_segment_mut(child).unwrap();
    assert_eq!(seg.input_count(), 2);

    seg.affect(&[0.0, 1.0], 0.02).unwrap();
    assert_eq!(forces(&world, child), (-100.0, 100.0));

    let seg = world.get_segment_mut(child).unwrap();
    seg.affect(&[0.5, 0.75], 0.02).unwrap();
    assert_eq!(forces(&world, child), (0.0, 50.0));
}

#[test]
fn out_of_range_signals_are_clamped() {
    let (mut world, _, child) = pair();
    let seg = world.get_segment_mut(child).unwrap();

    seg.affect(&[-3.0, 7.0], 0.02).unwrap();
    assert_eq!(forces(&world, child), (-100.0, 100.0));

    let seg = world.get_segment_mut(child).unwrap();
    seg.affect(&[f32::NAN, 0.5], 0.02).unwrap();
    assert_eq!(forces(&world, child), (-100.0, 0.0));
}

#[test]
fn custom_force_range_is_used() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut world = World::new();
    let root = world.new_segment("root", Transform::new());
    let child = world.new_segment_with(
        "child",
        Transform::new(),
        SegmentConfig::builder().force_range((2.0, 4.0)).build(),
    );
    world.connect(child, root, SideType::Up).unwrap();

    world.affect(root, &[0.0, 0.0, 0.5, 1.0], 0.02).unwrap();
    assert_eq!(forces(&world, child), (3.0, 4.0));
}

#[test]
fn root_ignores_signals_but_still_counts_them() {
    let (mut world, root, _) = pair();
    let seg = world.get_segment_mut(root).unwrap();

    assert_eq!(seg.input_count(), 2);
    assert_eq!(seg.affect(&[1.0, 1.0], 0.02), Ok(()));
    assert_eq!(seg.affect(&[], 0.02), Ok(()));
    assert_eq!(forces(&world, root), (0.0, 0.0));
}

#[test]
fn too_few_signals_are_rejected() {
    let (mut world, root, child) = pair();

    let seg = world.get_segment_mut(child).unwrap();
    assert_eq!(
        seg.affect(&[0.3], 0.02),
        Err(EffectorError::NotEnoughInputs {
            expected: 2,
            got: 1
        })
    );

    assert_eq!(world.input_count(root), 4);
    assert_eq!(
        world.affect(root, &[0.1, 0.2, 0.3], 0.02),
        Err(EffectorError::NotEnoughInputs {
            expected: 4,
            got: 3
        })
    );
    assert_eq!(forces(&world, child), (0.0, 0.0));
}

#[test]
fn world_affect_slices_signals_in_tree_order() {
    let (mut world, root, child) = pair();
    let grandchild = world.new_segment("grandchild", Transform::new());
    world.connect(grandchild, child, SideType::Forward).unwrap();

    // the trailing surplus signal is ignored
    world
        .affect(root, &[0.9, 0.9, 0.0, 1.0, 1.0, 0.0, 0.4], 0.02)
        .unwrap();

    assert_eq!(forces(&world, root), (0.0, 0.0));
    assert_eq!(forces(&world, child), (-100.0, 100.0));
    assert_eq!(forces(&world, grandchild), (100.0, -100.0));
}

#[test]
fn torque_spins_the_child_up_to_the_cap() {
    let (mut world, root, child) = pair();
    world.affect(root, &[0.5, 0.5, 1.0, 0.5], 0.02).unwrap();

    world.fixed_update();

    let handle = world.get_segment(child).unwrap().body().body_handle;
    let angvel = *world.physics.rigid_body_set[handle].angvel();
    let cap = world.physics.max_angular_velocity;
    assert!(angvel.norm() > 1.0, "child should spin, got {angvel:?}");
    assert!(angvel.norm() <= cap + 1e-3, "{angvel:?} exceeds {cap}");
    // twist axis of a joint on the right face is X
    assert!(angvel.x.abs() > angvel.y.abs() + angvel.z.abs());
}

#[test]
fn zero_force_leaves_bodies_at_rest() {
    let (mut world, root, child) = pair();
    world.affect(root, &[0.5, 0.5, 0.5, 0.5], 0.02).unwrap();

    for _ in 0..5 {
        world.fixed_update();
    }

    let handle = world.get_segment(child).unwrap().body().body_handle;
    assert!(world.physics.rigid_body_set[handle].angvel().norm() < 1e-4);
}

#[test]
fn sleeping_segments_are_not_actuated() {
    let (mut world, root, child) = pair();
    world.sleep(root).unwrap();
    world.affect(root, &[1.0, 1.0, 1.0, 1.0], 0.02).unwrap();

    world.fixed_update();

    let handle = world.get_segment(child).unwrap().body().body_handle;
    assert_eq!(*world.physics.rigid_body_set[handle].angvel(), Vector3::zeros());
    // the signal is still stored for when the creature wakes up
    assert_eq!(forces(&world, child), (100.0, 100.0));
}

#[test]
fn affecting_a_deleted_creature_fails() {
    let (mut world, root, _) = pair();
    world.delete_segment(root);

    assert_eq!(world.input_count(root), 0);
    assert_eq!(
        world.affect(root, &[0.5; 4], 0.02),
        Err(EffectorError::UnknownEffector { id: root })
    );

    let mut controller = SineController::travelling_wave(2, 1.0);
    assert_eq!(
        world.drive(root, &mut controller, 0.02),
        Err(EffectorError::UnknownEffector { id: root })
    );
}
