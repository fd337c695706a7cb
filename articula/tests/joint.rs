use articula::World;
use articula::WorldConfig;
use articula::components::{CharacterJoint, CharacterJointError, SegmentConfig};
use articula::core::{SideType, Transform};
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;

fn world() -> World {
    let _ = env_logger::builder().is_test(true).try_init();
    World::with_config(WorldConfig::builder().gravity(Vector3::zeros()).build())
}

#[test]
fn joint_axes_follow_the_attach_side() {
    for side in SideType::ALL {
        let mut world = world();
        let parent = world.new_segment("parent", Transform::new().with_scale(2.0, 1.0, 1.5));
        let child = world.new_segment("child", Transform::new().with_scale(0.5, 0.5, 0.5));
        world.connect(child, parent, side).unwrap();

        let joint = world.get_segment(child).unwrap().joint().unwrap();
        assert_eq!(joint.axis(), side.axis().direction());
        assert_eq!(joint.swing_axis(), side.swing_axis().direction());
        assert_eq!(joint.anchor(), Point3::from(side.inverse().direction() * 0.25));
        assert_eq!(joint.limit_deg(), 120.0);
        assert!(joint.collision_enabled());
        assert!(joint.is_connected());
    }
}

#[test]
fn joint_frames_meet_at_the_anchor() {
    let mut world = world();
    let rot = UnitQuaternion::from_euler_angles(0.3, -0.2, 0.7);
    let parent = world.new_segment(
        "parent",
        Transform::new()
            .with_position(1.0, 2.0, 3.0)
            .with_rotation(rot)
            .with_scale(2.0, 1.0, 1.0),
    );
    let child = world.new_segment("child", Transform::new().with_scale(1.0, 0.5, 0.5));
    world.connect(child, parent, SideType::Right).unwrap();

    let parent_seg = world.get_segment(parent).unwrap();
    let child_seg = world.get_segment(child).unwrap();
    let joint = child_seg.joint().unwrap().get_joint(&world.physics).unwrap();

    assert_eq!(joint.body1, parent_seg.body().body_handle);
    assert_eq!(joint.body2, child_seg.body().body_handle);

    let world_anchor1 = parent_seg.transform.isometry() * joint.data.local_frame1;
    let world_anchor2 = child_seg.transform.isometry() * joint.data.local_frame2;

    let gap = world_anchor1.translation.vector - world_anchor2.translation.vector;
    assert!(gap.norm() < 1e-5);
    assert!(world_anchor1.rotation.angle_to(&world_anchor2.rotation) < 1e-4);

    // the anchor sits on the child's face pointing at the parent
    let expected = child_seg.transform.isometry() * Point3::new(-0.5, 0.0, 0.0);
    assert!((world_anchor2.translation.vector - expected.coords).norm() < 1e-5);
}

#[test]
fn joint_limits_are_symmetric() {
    let mut world = world();
    let parent = world.new_segment("parent", Transform::new());
    let child = world.new_segment_with(
        "child",
        Transform::new(),
        SegmentConfig::builder()
            .joint_limit_deg(60.0)
            .enable_collision(false)
            .build(),
    );
    world.connect(child, parent, SideType::Down).unwrap();

    let joint = world
        .get_segment(child)
        .unwrap()
        .joint()
        .unwrap()
        .get_joint(&world.physics)
        .unwrap();
    let limit = 60f32.to_radians();
    for axis in [JointAxis::AngX, JointAxis::AngY, JointAxis::AngZ] {
        let limits = joint.data.limits(axis).unwrap();
        assert!((limits.min + limit).abs() < 1e-6);
        assert!((limits.max - limit).abs() < 1e-6);
    }
    assert!(!joint.data.contacts_enabled);
}

#[test]
fn degenerate_axes_are_rejected() {
    let mut world = world();
    let a = world.new_segment("a", Transform::new());
    let b = world.new_segment("b", Transform::new().with_position(2.0, 0.0, 0.0));
    let body_a = world.get_segment(a).unwrap().body().body_handle;
    let body_b = world.get_segment(b).unwrap().body().body_handle;

    let mut joint = CharacterJoint::builder()
        .axis(Vector3::x())
        .swing_axis(Vector3::new(1.0, 0.1, 0.0))
        .build();
    assert_eq!(
        joint.try_connect(&mut world.physics, body_a, body_b),
        Err(CharacterJointError::DegenerateAxes)
    );
    assert!(!joint.is_connected());
    assert_eq!(world.physics.impulse_joint_set.len(), 0);
}

#[test]
fn joint_connects_once_and_disconnects() {
    let mut world = world();
    let a = world.new_segment("a", Transform::new());
    let b = world.new_segment("b", Transform::new().with_position(2.0, 0.0, 0.0));
    let body_a = world.get_segment(a).unwrap().body().body_handle;
    let body_b = world.get_segment(b).unwrap().body().body_handle;

    let mut joint = CharacterJoint::builder()
        .anchor(Point3::new(-1.0, 0.0, 0.0))
        .build();
    assert!(joint.try_connect(&mut world.physics, body_a, body_b).is_ok());
    assert_eq!(
        joint.try_connect(&mut world.physics, body_a, body_b),
        Err(CharacterJointError::AlreadyConnected)
    );
    assert_eq!(world.physics.impulse_joint_set.len(), 1);

    joint.disconnect(&mut world.physics);
    assert!(joint.handle().is_none());
    assert_eq!(world.physics.impulse_joint_set.len(), 0);

    world.delete_segment(b);
    assert_eq!(
        joint.try_connect(&mut world.physics, body_a, body_b),
        Err(CharacterJointError::NoChildRigidBody)
    );
}

#[test]
fn activate_joint_replaces_the_existing_joint() {
    let mut world = world();
    let parent = world.new_segment("parent", Transform::new());
    let child = world.new_segment("child", Transform::new());
    world.connect(child, parent, SideType::Up).unwrap();
    let first = world.get_segment(child).unwrap().joint().unwrap().handle();

    world.activate_joint(child, parent, SideType::Up).unwrap();

    let second = world.get_segment(child).unwrap().joint().unwrap().handle();
    assert_ne!(first, second);
    assert_eq!(world.physics.impulse_joint_set.len(), 1);
}
