use std::time::{Duration, Instant};

use crate::graph::GraphStore;

pub const ANIMATION_DURATION: Duration = Duration::from_millis(2000);

/// Time-bounded linear interpolation of every node from its position at
/// animation start to a computed target. At most one animation is alive
/// at a time; dropping one mid-flight leaves nodes exactly where the
/// last `advance` put them.
pub struct PositionAnimation {
    start: Vec<(f32, f32)>,
    target: Vec<(f32, f32)>,
    started_at: Instant,
    duration: Duration,
}

impl PositionAnimation {
    pub fn new(start: Vec<(f32, f32)>, target: Vec<(f32, f32)>, started_at: Instant) -> Self {
        Self {
            start,
            target,
            started_at,
            duration: ANIMATION_DURATION,
        }
    }

    /// Write the interpolated frame into the store. Returns true once
    /// the animation has finished (or no longer matches the store, which
    /// only happens if the graph was rebuilt underneath it).
    pub fn advance(&self, store: &mut GraphStore, now: Instant) -> bool {
        let nodes = store.nodes_mut();
        if nodes.len() != self.target.len() || nodes.len() != self.start.len() {
            return true;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let t = (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);

        for (node, (&(sx, sy), &(tx, ty))) in
            nodes.iter_mut().zip(self.start.iter().zip(&self.target))
        {
            node.x = sx + (tx - sx) * t;
            node.y = sy + (ty - sy) * t;
        }

        t >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, test_node};

    fn two_node_store() -> GraphStore {
        let mut store = GraphStore::new();
        for id in ["a", "b"] {
            store
                .add_node(test_node(id, "page", "example.com"))
                .expect("fresh id");
        }
        store
    }

    #[test]
    fn interpolates_linearly_and_finishes() {
        let mut store = two_node_store();
        let start = vec![(0.0, 0.0), (10.0, 10.0)];
        let target = vec![(100.0, 0.0), (10.0, 30.0)];
        let t0 = Instant::now();
        let animation = PositionAnimation::new(start, target, t0);

        let finished = animation.advance(&mut store, t0 + ANIMATION_DURATION / 2);
        assert!(!finished);
        assert_eq!(store.nodes()[0].x, 50.0);
        assert_eq!(store.nodes()[1].y, 20.0);

        let finished = animation.advance(&mut store, t0 + ANIMATION_DURATION);
        assert!(finished);
        assert_eq!(store.nodes()[0].x, 100.0);
        assert_eq!(store.nodes()[1].y, 30.0);
    }

    #[test]
    fn clamps_past_the_end() {
        let mut store = two_node_store();
        let t0 = Instant::now();
        let animation =
            PositionAnimation::new(vec![(0.0, 0.0), (0.0, 0.0)], vec![(8.0, 8.0), (4.0, 4.0)], t0);

        assert!(animation.advance(&mut store, t0 + ANIMATION_DURATION * 3));
        assert_eq!(store.nodes()[0].x, 8.0);
        assert_eq!(store.nodes()[1].x, 4.0);
    }
}
