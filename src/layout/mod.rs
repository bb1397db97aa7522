//! Deterministic placement of nodes in 3D space.
//!
//! Every policy is a pure function of the graph it is given: the same input
//! always yields the same positions. Jitter is derived from the node index,
//! never from an external random source.
//!
//! - `spherical` - Fibonacci spiral over a sphere surface (default)
//! - `grid` - square grid with depth jitter
//! - `force` - spherical seed relaxed by a force-directed pass over edges

mod force;
mod grid;
mod spherical;

use std::collections::HashSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

pub use force::ForceDirected;
pub use grid::GridLayout;
pub use spherical::SphericalLayout;

use crate::config::LayoutConfig;
use crate::models::{Graph, Position};

/// A node placement strategy.
///
/// Implementations compute a position for every node in graph order.
/// Callers use [`Layout::arrange`] to fill only missing positions or
/// [`Layout::relayout`] to overwrite all of them.
pub trait Layout {
    /// Positions for every node, in graph order.
    fn place(&self, graph: &Graph) -> Vec<Position>;

    /// Assign positions to nodes that lack one.
    fn arrange(&self, graph: &mut Graph) {
        if graph.is_positioned() {
            return;
        }
        let positions = self.place(graph);
        let mut assigned = 0usize;
        for (node, position) in graph.nodes.iter_mut().zip(positions) {
            if node.position.is_none() {
                node.position = Some(position);
                assigned += 1;
            }
        }
        tracing::debug!("Layout assigned {} of {} positions", assigned, graph.nodes.len());
    }

    /// Overwrite every node position.
    fn relayout(&self, graph: &mut Graph) {
        let positions = self.place(graph);
        for (node, position) in graph.nodes.iter_mut().zip(positions) {
            node.position = Some(position);
        }
    }
}

/// Selectable layout policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum LayoutPolicy {
    /// Golden-angle spiral over a sphere.
    #[default]
    Spherical,
    /// Square grid with depth jitter.
    Grid,
    /// Spherical seed relaxed along edges.
    Force,
}

impl LayoutConfig {
    /// Build the configured layout.
    pub fn build(&self) -> Box<dyn Layout + Send + Sync> {
        match self.policy {
            LayoutPolicy::Spherical => Box::new(SphericalLayout::new(
                self.radius,
                self.spacing,
                self.jitter,
            )),
            LayoutPolicy::Grid => Box::new(GridLayout::new(self.spacing, self.jitter)),
            LayoutPolicy::Force => Box::new(ForceDirected::new(
                SphericalLayout::new(self.radius, self.spacing, self.jitter),
                self.iterations,
            )),
        }
    }
}

/// Deterministic value in `[-0.5, 0.5)` derived from a node index.
///
/// SplitMix64 finalizer; `salt` separates independent streams.
pub(crate) fn index_jitter(index: usize, salt: u64) -> f64 {
    let mut z = (index as u64)
        .wrapping_add(salt.wrapping_mul(0x9E37_79B9_7F4A_7C15))
        .wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^= z >> 31;
    (z >> 11) as f64 / (1u64 << 53) as f64 - 0.5
}

/// Nudge later duplicates along z until every coordinate is distinct.
///
/// Earlier indices keep their place, so ties resolve by index.
pub(crate) fn separate_ties(positions: &mut [Position]) {
    const NUDGE: f64 = 1e-6;
    let mut seen: HashSet<(u64, u64, u64)> = HashSet::with_capacity(positions.len());
    for position in positions.iter_mut() {
        while !seen.insert(bits(position)) {
            position.z += NUDGE * (1.0 + position.z.abs());
        }
    }
}

fn bits(p: &Position) -> (u64, u64, u64) {
    // Normalize -0.0 so it collides with 0.0.
    let norm = |v: f64| if v == 0.0 { 0.0f64.to_bits() } else { v.to_bits() };
    (norm(p.x), norm(p.y), norm(p.z))
}

/// Calculate the bounding sphere that encompasses all positions.
/// Returns (center, radius) where center is the centroid.
pub fn bounding_sphere(positions: &[Position]) -> (Position, f64) {
    if positions.is_empty() {
        return (Position::ORIGIN, 1.0);
    }

    let n = positions.len() as f64;
    let center = Position::new(
        positions.iter().map(|p| p.x).sum::<f64>() / n,
        positions.iter().map(|p| p.y).sum::<f64>() / n,
        positions.iter().map(|p| p.z).sum::<f64>() / n,
    );

    let max_dist = positions
        .iter()
        .map(|p| p.distance(&center))
        .fold(0.0_f64, f64::max);

    (center, max_dist + 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_jitter_range_and_determinism() {
        for i in 0..1000 {
            let j = index_jitter(i, 1);
            assert!((-0.5..0.5).contains(&j));
            assert_eq!(j, index_jitter(i, 1));
        }
        assert_ne!(index_jitter(3, 1), index_jitter(3, 2));
    }

    #[test]
    fn test_separate_ties_keeps_first() {
        let mut positions = vec![Position::ORIGIN, Position::ORIGIN, Position::new(-0.0, 0.0, 0.0)];
        separate_ties(&mut positions);
        assert_eq!(positions[0], Position::ORIGIN);
        assert_ne!(positions[1], positions[0]);
        assert_ne!(positions[2], positions[1]);
        assert_ne!(positions[2], positions[0]);
    }

    #[test]
    fn test_bounding_sphere() {
        let (center, radius) = bounding_sphere(&[
            Position::new(-1.0, 0.0, 0.0),
            Position::new(1.0, 0.0, 0.0),
        ]);
        assert_eq!(center, Position::ORIGIN);
        assert!((radius - 3.0).abs() < 1e-9);
        assert_eq!(bounding_sphere(&[]).1, 1.0);
    }

    #[test]
    fn test_policy_from_config() {
        let mut config = LayoutConfig::default();
        for policy in [LayoutPolicy::Spherical, LayoutPolicy::Grid, LayoutPolicy::Force] {
            config.policy = policy;
            let layout = config.build();
            let mut graph = Graph::new();
            for i in 0..5 {
                graph.add_node(crate::models::Node::new(
                    format!("n{i}"),
                    crate::models::NodeType::Class,
                    format!("N{i}"),
                ));
            }
            layout.arrange(&mut graph);
            assert!(graph.is_positioned());
        }
    }
}
