//! Fibonacci sphere placement.

use std::f64::consts::PI;

use super::{index_jitter, separate_ties, Layout};
use crate::models::{Graph, Position};

const RADIUS_SALT: u64 = 0x5EED_0001;

/// Spreads nodes over a sphere along a golden-angle spiral.
///
/// `phi = acos(-1 + 2i/n)`, `theta = sqrt(n*pi) * phi`. The radius grows
/// with the node count so the surface area per node stays near
/// `spacing^2`, and each node gets a small index-seeded radius jitter.
#[derive(Debug, Clone)]
pub struct SphericalLayout {
    /// Minimum sphere radius.
    pub radius: f64,
    /// Approximate distance between neighbours on the surface.
    pub spacing: f64,
    /// Total width of the radius jitter band.
    pub jitter: f64,
}

impl SphericalLayout {
    pub fn new(radius: f64, spacing: f64, jitter: f64) -> Self {
        Self {
            radius,
            spacing,
            jitter,
        }
    }

    /// Sphere radius used for `total` nodes.
    pub fn radius_for(&self, total: usize) -> f64 {
        let n = total.max(1) as f64;
        self.radius.max(self.spacing * (n / (4.0 * PI)).sqrt())
    }

    /// Position of node `index` out of `total`.
    pub fn position_at(&self, index: usize, total: usize) -> Position {
        let n = total.max(1) as f64;
        let i = index as f64;

        let phi = (-1.0 + 2.0 * i / n).clamp(-1.0, 1.0).acos();
        let theta = (n * PI).sqrt() * phi;
        let r = self.radius_for(total) + index_jitter(index, RADIUS_SALT) * self.jitter;

        Position::new(
            r * theta.cos() * phi.sin(),
            r * theta.sin() * phi.sin(),
            r * phi.cos(),
        )
    }
}

impl Default for SphericalLayout {
    fn default() -> Self {
        Self::new(8.0, 2.5, 1.5)
    }
}

impl Layout for SphericalLayout {
    fn place(&self, graph: &Graph) -> Vec<Position> {
        let total = graph.nodes.len();
        let mut positions: Vec<Position> =
            (0..total).map(|i| self.position_at(i, total)).collect();
        separate_ties(&mut positions);
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Node, NodeType};
    use std::collections::HashSet;

    fn graph_of(n: usize) -> Graph {
        let mut graph = Graph::new();
        for i in 0..n {
            graph.add_node(Node::new(format!("n{i}"), NodeType::SourceFile, format!("f{i}")));
        }
        graph
    }

    #[test]
    fn test_positions_distinct() {
        for n in [1, 2, 3, 10, 500, 3000] {
            let positions = SphericalLayout::default().place(&graph_of(n));
            let unique: HashSet<_> = positions
                .iter()
                .map(|p| (p.x.to_bits(), p.y.to_bits(), p.z.to_bits()))
                .collect();
            assert_eq!(unique.len(), n);
        }
    }

    #[test]
    fn test_deterministic() {
        let layout = SphericalLayout::default();
        let graph = graph_of(250);
        assert_eq!(layout.place(&graph), layout.place(&graph));
    }

    #[test]
    fn test_positions_near_sphere() {
        let layout = SphericalLayout::default();
        let total = 400;
        let r = layout.radius_for(total);
        for i in 0..total {
            let d = layout.position_at(i, total).distance(&Position::ORIGIN);
            assert!((d - r).abs() <= layout.jitter / 2.0 + 1e-9);
        }
    }

    #[test]
    fn test_radius_grows_with_count() {
        let layout = SphericalLayout::default();
        assert_eq!(layout.radius_for(1), layout.radius);
        assert!(layout.radius_for(5000) > layout.radius_for(500));
    }

    #[test]
    fn test_arrange_keeps_existing_positions() {
        let mut graph = graph_of(3);
        let fixed = Position::new(1.0, 2.0, 3.0);
        graph.nodes[1].position = Some(fixed);
        SphericalLayout::default().arrange(&mut graph);
        assert!(graph.is_positioned());
        assert_eq!(graph.nodes[1].position, Some(fixed));
    }
}
