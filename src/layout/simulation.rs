use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const STEP_INTERVAL: Duration = Duration::from_millis(16);

const REPULSION: f32 = 900.0;
const SPRING_STRENGTH: f32 = 0.06;
const SPRING_BASE_LENGTH: f32 = 40.0;
const CENTER_PULL: f32 = 0.002;
const DAMPING: f32 = 0.85;
const MAX_SPEED: f32 = 18.0;
const FORCE_SCALE: f32 = 0.05;

/// Handle to the background force-directed worker. The worker owns its
/// own copy of positions and publishes a whole snapshot per step, so
/// the main thread never observes a half-written frame. Stopping (or
/// dropping) the handle flags the worker and joins it.
pub struct SimulationHandle {
    stop: Arc<AtomicBool>,
    rx: Receiver<Vec<(f32, f32)>>,
    worker: Option<JoinHandle<()>>,
}

impl SimulationHandle {
    pub fn spawn(positions: Vec<(f32, f32)>, radii: Vec<f32>, edges: Vec<(usize, usize)>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = mpsc::channel();
        let worker_stop = Arc::clone(&stop);

        let worker = thread::spawn(move || {
            let mut body = SimulationBody::new(positions, radii, edges);
            while !worker_stop.load(Ordering::Relaxed) {
                body.step();
                if tx.send(body.positions.clone()).is_err() {
                    break;
                }
                thread::sleep(STEP_INTERVAL);
            }
        });

        Self {
            stop,
            rx,
            worker: Some(worker),
        }
    }

    /// Drain everything the worker published since the last tick and
    /// keep only the newest snapshot.
    pub fn latest_positions(&self) -> Option<Vec<(f32, f32)>> {
        let mut latest = None;
        while let Ok(snapshot) = self.rx.try_recv() {
            latest = Some(snapshot);
        }
        latest
    }

    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

impl Drop for SimulationHandle {
    fn drop(&mut self) {
        self.halt();
    }
}

struct SimulationBody {
    positions: Vec<(f32, f32)>,
    velocities: Vec<(f32, f32)>,
    radii: Vec<f32>,
    edges: Vec<(usize, usize)>,
}

impl SimulationBody {
    fn new(positions: Vec<(f32, f32)>, radii: Vec<f32>, edges: Vec<(usize, usize)>) -> Self {
        let velocities = vec![(0.0, 0.0); positions.len()];
        Self {
            positions,
            velocities,
            radii,
            edges,
        }
    }

    /// One relaxation step: pairwise repulsion with an overlap push,
    /// springs along edges toward a radius-aware preferred length, a
    /// weak center pull, then damped clamped integration. Crawl graphs
    /// stay small, so the direct O(n^2) pass is fine.
    fn step(&mut self) {
        let n = self.positions.len();
        if n < 2 {
            return;
        }

        let mut forces = vec![(0.0f32, 0.0f32); n];

        for i in 0..n {
            for j in (i + 1)..n {
                let dx = self.positions[i].0 - self.positions[j].0;
                let dy = self.positions[i].1 - self.positions[j].1;
                let distance = (dx * dx + dy * dy).sqrt().max(0.5);
                let (ux, uy) = (dx / distance, dy / distance);

                let push = REPULSION * (1.0 + (self.radii[i] + self.radii[j]) * 0.015) / distance;
                forces[i].0 += ux * push;
                forces[i].1 += uy * push;
                forces[j].0 -= ux * push;
                forces[j].1 -= uy * push;

                let min_distance = (self.radii[i] + self.radii[j]) * 1.6;
                if distance < min_distance {
                    let overlap = (min_distance - distance) * 2.4;
                    forces[i].0 += ux * overlap;
                    forces[i].1 += uy * overlap;
                    forces[j].0 -= ux * overlap;
                    forces[j].1 -= uy * overlap;
                }
            }
        }

        for &(from, to) in &self.edges {
            if from >= n || to >= n || from == to {
                continue;
            }

            let dx = self.positions[from].0 - self.positions[to].0;
            let dy = self.positions[from].1 - self.positions[to].1;
            let distance = (dx * dx + dy * dy).sqrt().max(0.5);
            let (ux, uy) = (dx / distance, dy / distance);

            let preferred = SPRING_BASE_LENGTH + (self.radii[from] + self.radii[to]) * 2.0;
            let pull = (distance - preferred) * SPRING_STRENGTH;
            forces[from].0 -= ux * pull;
            forces[from].1 -= uy * pull;
            forces[to].0 += ux * pull;
            forces[to].1 += uy * pull;
        }

        for (index, force) in forces.iter_mut().enumerate() {
            force.0 -= self.positions[index].0 * CENTER_PULL;
            force.1 -= self.positions[index].1 * CENTER_PULL;
        }

        for index in 0..n {
            let (fx, fy) = forces[index];
            let mut vx = (self.velocities[index].0 + fx * FORCE_SCALE) * DAMPING;
            let mut vy = (self.velocities[index].1 + fy * FORCE_SCALE) * DAMPING;

            let speed = (vx * vx + vy * vy).sqrt();
            if speed > MAX_SPEED {
                vx *= MAX_SPEED / speed;
                vy *= MAX_SPEED / speed;
            }

            self.velocities[index] = (vx, vy);
            self.positions[index].0 += vx;
            self.positions[index].1 += vy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_separates_overlapping_nodes() {
        let mut body = SimulationBody::new(
            vec![(0.0, 0.0), (1.0, 0.0)],
            vec![3.0, 3.0],
            vec![(0, 1)],
        );

        for _ in 0..50 {
            body.step();
        }

        let dx = body.positions[0].0 - body.positions[1].0;
        let dy = body.positions[0].1 - body.positions[1].1;
        assert!((dx * dx + dy * dy).sqrt() > 1.0);
    }

    #[test]
    fn single_node_never_moves() {
        let mut body = SimulationBody::new(vec![(5.0, 5.0)], vec![3.0], Vec::new());
        body.step();
        assert_eq!(body.positions, vec![(5.0, 5.0)]);
    }

    #[test]
    fn worker_stops_cleanly() {
        let handle = SimulationHandle::spawn(
            vec![(0.0, 0.0), (10.0, 0.0)],
            vec![3.0, 3.0],
            vec![(0, 1)],
        );
        thread::sleep(Duration::from_millis(40));
        assert!(handle.latest_positions().is_some());
        handle.stop();
    }
}
