//! Steps a scene and prints body poses.
//!
//! With no arguments this runs the built-in world: a unit sphere dropped
//! onto a planet-sized ground sphere. Pass a YAML scenario file to simulate
//! a custom scene instead.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use spherecast::prelude::*;

#[derive(Parser, Debug)]
struct Args {
    /// Optional YAML scenario file
    scenario: Option<PathBuf>,

    /// Seconds of simulated time
    #[arg(short, long, default_value_t = 5.0)]
    duration: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let args = Args::parse();

    let mut scene = match &args.scenario {
        Some(path) => {
            let config = SceneConfig::from_yaml_file(path)?;
            println!("Loaded scenario with {} bodies from {}", config.bodies.len(), path.display());
            Scene::from_config(&config)
        }
        None => {
            println!("Running the built-in world");
            let mut scene = Scene::new();
            scene.initialize();
            scene
        }
    };

    // Two half-steps per 60 Hz frame, the cadence a host renderer would use
    let dt = 1.0 / 120.0;
    let steps_per_frame = 2;
    let frames = (args.duration * 60.0) as usize;

    println!(
        "Simulating {:.1} s ({} frames at 60 Hz, {} Hz physics)\n",
        args.duration,
        frames,
        (1.0 / dt) as usize
    );

    for frame in 0..frames {
        for _ in 0..steps_per_frame {
            scene.step(dt);
        }

        // Report every half second
        if frame % 30 == 0 {
            let t = frame as f32 / 60.0;
            for (index, body) in scene.bodies().iter().enumerate() {
                if body.is_static() {
                    continue;
                }
                println!(
                    "t={t:5.2}s  body {index}: position=({:7.3}, {:7.3}, {:7.3})  speed={:6.3}",
                    body.position.x,
                    body.position.y,
                    body.position.z,
                    body.linear_velocity.length()
                );
            }
        }
    }

    println!("\nFinal state:");
    for (index, body) in scene.bodies().iter().enumerate() {
        let model = body.world_transform().to_cols_array();
        println!(
            "body {index}: position=({:7.3}, {:7.3}, {:7.3})  model matrix translation=({:.3}, {:.3}, {:.3})",
            body.position.x, body.position.y, body.position.z, model[12], model[13], model[14]
        );
    }

    Ok(())
}
