//! Builds a four-legged crawler, drives it with a travelling sine wave and logs how far
//! its center of mass moves.
//!
//! Run with `RUST_LOG=info cargo run --example crawler`.

use articula::World;
use articula::components::SegmentConfig;
use articula::controllers::SineController;
use articula::core::{SegmentId, SideType, Transform};
use log::{LevelFilter, info};
use nalgebra::Vector3;
use std::error::Error;

const SIM_SECONDS: f32 = 10.0;

fn leg(world: &mut World, name: &str) -> Result<SegmentId, Box<dyn Error>> {
    let config = SegmentConfig::builder()
        .force_range((-20.0, 20.0))
        .joint_limit_deg(60.0)
        .build();

    let upper = world.new_segment_with(
        format!("{name}_upper"),
        Transform::new().with_scale(0.8, 0.3, 0.3),
        config.clone(),
    );
    let lower = world.new_segment_with(
        format!("{name}_lower"),
        Transform::new().with_scale(0.3, 0.8, 0.3),
        config,
    );
    world.connect(lower, upper, SideType::Down)?;

    Ok(upper)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut world = World::new();

    let ground = world.new_segment(
        "ground",
        Transform::new()
            .with_position(0.0, -0.5, 0.0)
            .with_scale(100.0, 1.0, 100.0),
    );
    world.sleep(ground)?;

    let torso = world.new_segment(
        "torso",
        Transform::new()
            .with_position(0.0, 1.5, 0.0)
            .with_scale(1.5, 0.5, 1.0),
    );

    for (name, side) in [
        ("right", SideType::Right),
        ("left", SideType::Left),
        ("front", SideType::Forward),
        ("back", SideType::Back),
    ] {
        let upper = leg(&mut world, name)?;
        world.connect(upper, torso, side)?;
    }

    world.sleep(torso)?;
    world.print_segments();
    world.wake_up(torso)?;

    let mut controller = SineController::travelling_wave(world.input_count(torso), 1.2);
    let dt = world.physics.timestep.as_secs_f32();
    let start = world.center_of_mass(torso).unwrap_or_else(Vector3::zeros);

    let ticks = (SIM_SECONDS / dt) as usize;
    for tick in 0..ticks {
        world.drive(torso, &mut controller, dt)?;
        world.fixed_update();

        if tick % 60 == 0 {
            let com = world.center_of_mass(torso).unwrap_or_else(Vector3::zeros);
            info!(
                "t = {:5.2}s, center of mass = ({:.2}, {:.2}, {:.2})",
                world.simulated_time().as_secs_f32(),
                com.x,
                com.y,
                com.z
            );
        }
    }

    let end = world.center_of_mass(torso).unwrap_or_else(Vector3::zeros);
    let travelled = (end - start).xz().norm();
    info!("Crawler travelled {travelled:.3} units in {SIM_SECONDS}s");

    Ok(())
}
