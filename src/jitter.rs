use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Deterministic pseudo-random pair in [-1, 1] derived from a node id.
/// Used for initial placement so a freshly ingested graph is drawable
/// before any layout runs.
pub fn stable_pair(id: &str) -> (f32, f32) {
    let (x, y) = unit_pair(id, 0);
    ((x * 2.0) - 1.0, (y * 2.0) - 1.0)
}

/// Seeded variant in [0, 1], used by the random layout: the seed varies
/// per invocation so repeated layouts differ, while a single invocation
/// stays reproducible.
pub fn seeded_unit_pair(id: &str, seed: u64) -> (f32, f32) {
    unit_pair(id, seed)
}

fn unit_pair(id: &str, seed: u64) -> (f32, f32) {
    let mut hasher = DefaultHasher::new();
    seed.hash(&mut hasher);
    id.hash(&mut hasher);
    let hash = hasher.finish();

    let x = ((hash & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    let y = (((hash >> 32) & 0xffff_ffff) as f64 / u32::MAX as f64) as f32;
    (x, y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_pair_is_stable_and_bounded() {
        let first = stable_pair("node-a");
        let second = stable_pair("node-a");
        assert_eq!(first, second);
        assert!((-1.0..=1.0).contains(&first.0));
        assert!((-1.0..=1.0).contains(&first.1));
    }

    #[test]
    fn seeds_produce_distinct_samples() {
        let (x0, y0) = seeded_unit_pair("node-a", 1);
        let (x1, y1) = seeded_unit_pair("node-a", 2);
        assert!((x0, y0) != (x1, y1));
        for value in [x0, y0, x1, y1] {
            assert!((0.0..=1.0).contains(&value));
        }
    }
}
