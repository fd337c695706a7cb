use articula::World;
use articula::components::EffectorError;
use articula::controllers::{Controller, Oscillator, SineController};
use articula::core::{SideType, Transform};
use std::f32::consts::FRAC_PI_2;

#[test]
fn travelling_wave_spreads_phases() {
    let controller = SineController::travelling_wave(4, 2.0);
    let phases: Vec<f32> = controller.channels().iter().map(|c| c.phase).collect();

    assert_eq!(controller.output_count(), 4);
    assert!((phases[1] - FRAC_PI_2).abs() < 1e-6);
    assert!(controller.channels().iter().all(|c| c.frequency == 2.0));
}

#[test]
fn evaluate_fills_outputs() {
    let mut controller = SineController::new(vec![
        Oscillator::builder().phase(FRAC_PI_2).build(),
        Oscillator::builder().amplitude(0.0).bias(0.2).build(),
    ]);
    let mut outputs = [0.0; 2];
    controller.evaluate(0.0, &mut outputs);

    assert!((outputs[0] - 1.0).abs() < 1e-6);
    assert!((outputs[1] - 0.2).abs() < 1e-6);
}

#[test]
fn drive_feeds_the_whole_creature() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut world = World::new();
    let root = world.new_segment("root", Transform::new());
    let child = world.new_segment("child", Transform::new());
    world.connect(child, root, SideType::Right).unwrap();

    let mut controller = SineController::travelling_wave(world.input_count(root), 1.0);
    world.drive(root, &mut controller, 1.0 / 60.0).unwrap();

    // channel 2 sits at phase pi, channel 3 at 3pi/2
    let seg = world.get_segment(child).unwrap();
    assert!(seg.axis_force().abs() < 1e-3);
    assert!((seg.swing_axis_force() + 100.0).abs() < 1e-3);
}

#[test]
fn drive_rejects_small_controllers() {
    let mut world = World::new();
    let root = world.new_segment("root", Transform::new());
    let child = world.new_segment("child", Transform::new());
    world.connect(child, root, SideType::Right).unwrap();

    let mut controller = SineController::travelling_wave(3, 1.0);
    assert_eq!(
        world.drive(root, &mut controller, 1.0 / 60.0),
        Err(EffectorError::NotEnoughInputs {
            expected: 4,
            got: 3
        })
    );
}
