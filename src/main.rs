//! Demo binary: a window showing randomly regenerated cubes and points.
//!
//! ```text
//! cubeview [CUBES] [POINTS] [FPS]
//! ```
//!
//! All arguments are optional: cube count (default 10), point count
//! (default 100), frame-rate cap (default uncapped).

use std::time::Duration;

use cubeview::scene::producer::{RandomScene, SceneProducer};
use cubeview::Viewer;

/// Interval between whole-scene regenerations.
const SCENE_INTERVAL: Duration = Duration::from_millis(500);

struct Args {
    cube_count: usize,
    point_count: usize,
    frame_rate: Option<f64>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = std::env::args().skip(1);

    let mut parsed = Args {
        cube_count: 10,
        point_count: 100,
        frame_rate: None,
    };

    if let Some(arg) = args.next() {
        parsed.cube_count = arg
            .parse()
            .map_err(|_| format!("invalid cube count: {arg}"))?;
    }
    if let Some(arg) = args.next() {
        parsed.point_count = arg
            .parse()
            .map_err(|_| format!("invalid point count: {arg}"))?;
    }
    if let Some(arg) = args.next() {
        let fps: f64 = arg
            .parse()
            .map_err(|_| format!("invalid frame rate: {arg}"))?;
        parsed.frame_rate = Some(fps);
    }

    Ok(parsed)
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            log::error!("{e}");
            log::error!("Usage: cubeview [CUBES] [POINTS] [FPS]");
            std::process::exit(1);
        }
    };

    let scene = RandomScene {
        cube_count: args.cube_count,
        point_count: args.point_count,
        ..RandomScene::default()
    };

    let producer =
        match SceneProducer::spawn(SCENE_INTERVAL, scene.into_generator()) {
            Ok(p) => p,
            Err(e) => {
                log::error!("Failed to spawn scene producer: {e}");
                std::process::exit(1);
            }
        };

    let mut builder = Viewer::builder().with_producer(producer);
    if let Some(fps) = args.frame_rate {
        builder = builder.with_frame_rate(fps);
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
