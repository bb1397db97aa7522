//! Square grid placement.

use super::{index_jitter, separate_ties, Layout};
use crate::models::{Graph, Position};

const DEPTH_SALT: u64 = 0x5EED_0002;

/// Places nodes row by row on a centered square grid in the XY plane.
#[derive(Debug, Clone)]
pub struct GridLayout {
    /// Distance between neighbouring cells.
    pub spacing: f64,
    /// Total width of the depth (z) jitter band.
    pub jitter: f64,
}

impl GridLayout {
    pub fn new(spacing: f64, jitter: f64) -> Self {
        Self { spacing, jitter }
    }

    /// Number of columns for `total` nodes: `ceil(sqrt(n))`.
    pub fn columns(total: usize) -> usize {
        ((total as f64).sqrt().ceil() as usize).max(1)
    }

    pub fn position_at(&self, index: usize, total: usize) -> Position {
        let cols = Self::columns(total);
        let rows = total.max(1).div_ceil(cols);
        let (row, col) = (index / cols, index % cols);

        let x = (col as f64 - (cols as f64 - 1.0) / 2.0) * self.spacing;
        let y = ((rows as f64 - 1.0) / 2.0 - row as f64) * self.spacing;
        let z = index_jitter(index, DEPTH_SALT) * self.jitter;

        Position::new(x, y, z)
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::new(2.5, 1.5)
    }
}

impl Layout for GridLayout {
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

    fn distinct(positions: &[Position]) -> usize {
        positions
            .iter()
            .map(|p| (p.x.to_bits(), p.y.to_bits(), p.z.to_bits()))
            .collect::<HashSet<_>>()
            .len()
    }

    #[test]
    fn test_columns() {
        assert_eq!(GridLayout::columns(0), 1);
        assert_eq!(GridLayout::columns(1), 1);
        assert_eq!(GridLayout::columns(4), 2);
        assert_eq!(GridLayout::columns(5), 3);
        assert_eq!(GridLayout::columns(100), 10);
    }

    #[test]
    fn test_grid_cells_row_major() {
        let layout = GridLayout::new(1.0, 0.0);
        // 5 nodes -> 3 columns, 2 rows
        let first = layout.position_at(0, 5);
        let second = layout.position_at(1, 5);
        let fourth = layout.position_at(3, 5);
        assert_eq!(first.x, -1.0);
        assert_eq!(second.x, 0.0);
        assert_eq!(first.y, 0.5);
        assert_eq!(fourth.x, -1.0);
        assert_eq!(fourth.y, -0.5);
    }

    #[test]
    fn test_depth_jitter_bounded_and_stable() {
        let layout = GridLayout::default();
        for i in 0..200 {
            let p = layout.position_at(i, 200);
            assert!(p.z.abs() <= layout.jitter / 2.0);
            assert_eq!(p, layout.position_at(i, 200));
        }
    }

    #[test]
    fn test_positions_distinct() {
        for layout in [GridLayout::default(), GridLayout::new(2.5, 0.0)] {
            for n in [1, 2, 5, 100, 3000] {
                let positions = layout.place(&graph_of(n));
                assert_eq!(positions.len(), n);
                assert_eq!(distinct(&positions), n);
            }
        }
    }

    #[test]
    fn test_collapsed_grid_breaks_ties_by_index() {
        // Zero spacing and jitter put every cell on the origin
        let layout = GridLayout::new(0.0, 0.0);
        let positions = layout.place(&graph_of(100));
        assert_eq!(distinct(&positions), 100);
        assert_eq!(positions[0], Position::ORIGIN);
    }

    #[test]
    fn test_deterministic() {
        let graph = graph_of(250);
        for layout in [GridLayout::default(), GridLayout::new(1.0, 0.0)] {
            assert_eq!(layout.place(&graph), layout.place(&graph));
        }
    }
}
