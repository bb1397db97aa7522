//! Per-node visual state and the edge set to draw.
//!
//! Everything here is a pure function of store state so it can be tested
//! without a window.

use std::collections::HashSet;

use crate::config::EdgeMode;
use crate::models::Edge;

/// Visual priority of a node. Later variants win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum NodeVisualState {
    #[default]
    Default,
    /// Shares a filtered edge with the selected node.
    Connected,
    Hovered,
    Selected,
}

impl NodeVisualState {
    pub fn resolve(selected: bool, hovered: bool, connected: bool) -> Self {
        if selected {
            Self::Selected
        } else if hovered {
            Self::Hovered
        } else if connected {
            Self::Connected
        } else {
            Self::Default
        }
    }

    /// Scale applied on top of the node radius.
    pub fn scale(self) -> f32 {
        match self {
            Self::Default => 1.0,
            Self::Connected => 1.15,
            Self::Hovered => 1.3,
            Self::Selected => 1.5,
        }
    }

    /// Emissive gain relative to the base color.
    pub fn emissive(self) -> f32 {
        match self {
            Self::Default => 0.0,
            Self::Connected => 0.4,
            Self::Hovered => 0.9,
            Self::Selected => 1.6,
        }
    }

    pub fn shows_ring(self) -> bool {
        self == Self::Selected
    }

    pub fn shows_label(self) -> bool {
        matches!(self, Self::Selected | Self::Hovered)
    }
}

/// Ids on the other end of every edge touching `selected`.
pub fn connected_ids(edges: &[&Edge], selected: &str) -> HashSet<String> {
    edges
        .iter()
        .filter_map(|e| e.other_end(selected))
        .filter(|id| *id != selected)
        .map(str::to_string)
        .collect()
}

/// Edges the scene draws.
///
/// `Selected` keeps only edges touching the selected node, so nothing is drawn
/// without a selection. `AllFiltered` draws every filtered edge.
pub fn render_edges<'g>(
    filtered: Vec<&'g Edge>,
    selected: Option<&str>,
    mode: EdgeMode,
) -> Vec<&'g Edge> {
    match (mode, selected) {
        (EdgeMode::AllFiltered, _) => filtered,
        (EdgeMode::Selected, Some(id)) => filtered.into_iter().filter(|e| e.touches(id)).collect(),
        (EdgeMode::Selected, None) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EdgeType;

    const ALL: [NodeVisualState; 4] = [
        NodeVisualState::Default,
        NodeVisualState::Connected,
        NodeVisualState::Hovered,
        NodeVisualState::Selected,
    ];

    #[test]
    fn test_priority_order() {
        assert_eq!(NodeVisualState::resolve(true, true, true), NodeVisualState::Selected);
        assert_eq!(NodeVisualState::resolve(false, true, true), NodeVisualState::Hovered);
        assert_eq!(NodeVisualState::resolve(false, false, true), NodeVisualState::Connected);
        assert_eq!(NodeVisualState::resolve(false, false, false), NodeVisualState::Default);
    }

    #[test]
    fn test_scale_and_emissive_monotonic() {
        for pair in ALL.windows(2) {
            assert!(pair[0].scale() < pair[1].scale());
            assert!(pair[0].emissive() < pair[1].emissive());
        }
    }

    #[test]
    fn test_ring_and_label_visibility() {
        let rings: Vec<_> = ALL.iter().filter(|s| s.shows_ring()).collect();
        assert_eq!(rings, vec![&NodeVisualState::Selected]);
        assert!(!NodeVisualState::Default.shows_label());
        assert!(!NodeVisualState::Connected.shows_label());
        assert!(NodeVisualState::Hovered.shows_label());
        assert!(NodeVisualState::Selected.shows_label());
    }

    #[test]
    fn test_render_edges_modes() {
        let ab = Edge::new("a", "b", EdgeType::Calls);
        let bc = Edge::new("b", "c", EdgeType::Calls);
        let cd = Edge::new("c", "d", EdgeType::Uses);
        let filtered = vec![&ab, &bc, &cd];

        assert!(render_edges(filtered.clone(), None, EdgeMode::Selected).is_empty());
        let touching = render_edges(filtered.clone(), Some("b"), EdgeMode::Selected);
        assert_eq!(touching.len(), 2);
        assert_eq!(render_edges(filtered, None, EdgeMode::AllFiltered).len(), 3);
    }

    #[test]
    fn test_connected_ids() {
        let ab = Edge::new("a", "b", EdgeType::Calls);
        let ca = Edge::new("c", "a", EdgeType::Uses);
        let bc = Edge::new("b", "c", EdgeType::Uses);
        let ids = connected_ids(&[&ab, &ca, &bc], "a");
        assert_eq!(ids.len(), 2);
        assert!(ids.contains("b") && ids.contains("c"));
    }
}
