//! Background scene producer with a lock-free frame handoff.
//!
//! A producer thread generates whole-scene replacements at its own cadence
//! and publishes them through a triple buffer; the render thread drains the
//! latest update once per frame with a non-blocking `try_recv`. A
//! replacement is therefore always observed atomically — a frame sees
//! either the old buffers or the new ones, never a mix.

use std::sync::mpsc;
use std::time::Duration;

use glam::Vec3;
use rand::Rng;

use super::CubeInstance;
use crate::error::CubeviewError;

/// A wholesale replacement for both scene collections.
#[derive(Debug, Clone, Default)]
pub struct SceneUpdate {
    /// New cube instances.
    pub cubes: Vec<CubeInstance>,
    /// New point cloud.
    pub points: Vec<Vec3>,
}

enum ProducerRequest {
    Shutdown,
}

/// Background thread that generates scene updates on a fixed interval.
pub struct SceneProducer {
    request_tx: mpsc::Sender<ProducerRequest>,
    result: triple_buffer::Output<Option<SceneUpdate>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl SceneProducer {
    /// Spawn the producer thread, calling `generate` once per `interval`.
    ///
    /// # Errors
    ///
    /// Returns [`CubeviewError::ThreadSpawn`] if the thread fails to spawn.
    pub fn spawn<F>(
        interval: Duration,
        mut generate: F,
    ) -> Result<Self, CubeviewError>
    where
        F: FnMut() -> SceneUpdate + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<ProducerRequest>();
        let (mut input, output) = triple_buffer::triple_buffer(&None);

        let thread = std::thread::Builder::new()
            .name("scene-producer".into())
            .spawn(move || loop {
                match request_rx.recv_timeout(interval) {
                    Ok(ProducerRequest::Shutdown)
                    | Err(mpsc::RecvTimeoutError::Disconnected) => break,
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        input.write(Some(generate()));
                    }
                }
            })
            .map_err(CubeviewError::ThreadSpawn)?;

        Ok(Self {
            request_tx,
            result: output,
            thread: Some(thread),
        })
    }

    /// Non-blocking check for a completed scene update.
    ///
    /// Intermediate updates published since the last call are skipped; only
    /// the most recent one is returned.
    pub fn try_recv(&mut self) -> Option<SceneUpdate> {
        let _ = self.result.update();
        self.result.output_buffer_mut().take()
    }

    /// Shut down the producer thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(ProducerRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for SceneProducer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Random-scene generator for the demo binary: cubes scattered in
/// [0, 10]³ and points in [-spread, spread]³.
#[derive(Debug, Clone, Copy)]
pub struct RandomScene {
    /// Number of cubes per update.
    pub cube_count: usize,
    /// Number of points per update.
    pub point_count: usize,
    /// Half-width of the point scatter volume.
    pub spread: f32,
    /// Full extents of every generated cube.
    pub cube_size: Vec3,
    /// Wireframe color of every generated cube.
    pub cube_color: [f32; 3],
}

impl Default for RandomScene {
    fn default() -> Self {
        Self {
            cube_count: 10,
            point_count: 100,
            spread: 20.0,
            cube_size: Vec3::splat(2.0),
            cube_color: [0.0, 1.0, 1.0],
        }
    }
}

impl RandomScene {
    /// Generate one scene update.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> SceneUpdate {
        let cubes = (0..self.cube_count)
            .map(|_| CubeInstance {
                position: Vec3::new(
                    rng.random::<f32>() * 10.0,
                    rng.random::<f32>() * 10.0,
                    rng.random::<f32>() * 10.0,
                ),
                size: self.cube_size,
                rotation: Vec3::ZERO,
                color: self.cube_color,
            })
            .collect();

        let points = (0..self.point_count)
            .map(|_| {
                let coord =
                    |r: &mut R| (r.random::<f32>() * 2.0 - 1.0) * self.spread;
                Vec3::new(coord(rng), coord(rng), coord(rng))
            })
            .collect();

        SceneUpdate { cubes, points }
    }

    /// Turn this configuration into a generator closure for
    /// [`SceneProducer::spawn`].
    #[must_use]
    pub fn into_generator(self) -> impl FnMut() -> SceneUpdate + Send {
        // rand::rng() is a thread-local handle and not Send; grab it on the
        // producer thread, per call.
        move || self.generate(&mut rand::rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_respects_configured_counts() {
        let config = RandomScene {
            cube_count: 7,
            point_count: 31,
            ..RandomScene::default()
        };
        let update = config.generate(&mut rand::rng());
        assert_eq!(update.cubes.len(), 7);
        assert_eq!(update.points.len(), 31);
    }

    #[test]
    fn points_stay_inside_spread_volume() {
        let config = RandomScene {
            point_count: 500,
            spread: 20.0,
            ..RandomScene::default()
        };
        let update = config.generate(&mut rand::rng());
        assert!(update
            .points
            .iter()
            .all(|p| p.abs().max_element() <= 20.0));
    }

    #[test]
    fn producer_delivers_latest_update_and_shuts_down() {
        let mut producer = SceneProducer::spawn(
            Duration::from_millis(1),
            RandomScene::default().into_generator(),
        )
        .unwrap();

        // Wait for at least one update to land.
        let mut received = None;
        for _ in 0..500 {
            if let Some(update) = producer.try_recv() {
                received = Some(update);
                break;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        let update = received.expect("producer never delivered an update");
        assert_eq!(update.cubes.len(), 10);
        assert_eq!(update.points.len(), 100);

        producer.shutdown();
    }
}
