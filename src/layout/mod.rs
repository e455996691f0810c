mod animation;
mod simulation;

use std::f32::consts::TAU;
use std::time::Instant;

use crate::graph::GraphStore;
use crate::jitter::seeded_unit_pair;
use animation::PositionAnimation;
pub use animation::ANIMATION_DURATION;
use simulation::SimulationHandle;

pub const CIRCLE_SCALE: f32 = 100.0;

/// Owns the mutually exclusive layout strategies: the continuously
/// running force simulation, or a single in-flight positional animation
/// (circular or random). Requesting a placement stops the simulation
/// first; starting a new animation cancels the previous one, freezing
/// nodes at their last interpolated position.
#[derive(Default)]
pub struct LayoutController {
    simulation: Option<SimulationHandle>,
    animation: Option<PositionAnimation>,
    random_rounds: u64,
}

impl LayoutController {
    pub fn is_simulating(&self) -> bool {
        self.simulation.is_some()
    }

    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Idempotent: a second start while running is a no-op.
    pub fn start_force_directed(&mut self, store: &GraphStore) {
        if self.simulation.is_some() {
            return;
        }

        self.animation = None;
        let positions = store.nodes().iter().map(|node| (node.x, node.y)).collect();
        let radii = store.nodes().iter().map(|node| node.size).collect();
        self.simulation = Some(SimulationHandle::spawn(
            positions,
            radii,
            store.edges().to_vec(),
        ));
    }

    /// Idempotent: stopping while not running is a no-op.
    pub fn stop_force_directed(&mut self) {
        if let Some(simulation) = self.simulation.take() {
            simulation.stop();
        }
    }

    pub fn toggle_force_directed(&mut self, store: &GraphStore) {
        if self.simulation.is_some() {
            self.stop_force_directed();
        } else {
            self.start_force_directed(store);
        }
    }

    /// Even placement on a fixed-radius ring in insertion order, so an
    /// unmutated graph always gets identical target angles.
    pub fn circular_layout(&mut self, store: &GraphStore, now: Instant) {
        self.stop_force_directed();

        let n = store.node_count();
        if n == 0 {
            self.animation = None;
            return;
        }

        let targets = (0..n)
            .map(|index| {
                let angle = index as f32 / n as f32 * TAU;
                (angle.cos() * CIRCLE_SCALE, angle.sin() * CIRCLE_SCALE)
            })
            .collect();
        self.begin_animation(store, targets, now);
    }

    /// Uniform re-sampling within the bounding box of the positions as
    /// they are right now.
    pub fn random_layout(&mut self, store: &GraphStore, now: Instant) {
        self.stop_force_directed();

        if store.node_count() == 0 {
            self.animation = None;
            return;
        }

        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for node in store.nodes() {
            min_x = min_x.min(node.x);
            max_x = max_x.max(node.x);
            min_y = min_y.min(node.y);
            max_y = max_y.max(node.y);
        }

        self.random_rounds = self.random_rounds.wrapping_add(1);
        let seed = self.random_rounds;
        let targets = store
            .nodes()
            .iter()
            .map(|node| {
                let (ux, uy) = seeded_unit_pair(&node.id, seed);
                (min_x + (max_x - min_x) * ux, min_y + (max_y - min_y) * uy)
            })
            .collect();
        self.begin_animation(store, targets, now);
    }

    fn begin_animation(&mut self, store: &GraphStore, targets: Vec<(f32, f32)>, now: Instant) {
        // Start positions are whatever the previous animation or
        // simulation last wrote; replacing `self.animation` is the
        // freeze-in-place cancellation.
        let start = store.nodes().iter().map(|node| (node.x, node.y)).collect();
        self.animation = Some(PositionAnimation::new(start, targets, now));
    }

    /// Main-thread pump: apply the newest simulation snapshot, then
    /// advance the in-flight animation one frame.
    pub fn tick(&mut self, store: &mut GraphStore, now: Instant) {
        if let Some(simulation) = &self.simulation
            && let Some(positions) = simulation.latest_positions()
            && positions.len() == store.node_count()
        {
            for (node, (x, y)) in store.nodes_mut().iter_mut().zip(positions) {
                node.x = x;
                node.y = y;
            }
        }

        if let Some(animation) = &self.animation
            && animation.advance(store, now)
        {
            self.animation = None;
        }
    }

    /// Stop all background layout work. A document load or reset calls
    /// this before touching the store so nothing races the rebuild.
    pub fn halt(&mut self) {
        self.stop_force_directed();
        self.animation = None;
    }
}
