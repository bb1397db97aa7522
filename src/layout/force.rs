//! Force-directed relaxation over a spherical seed.

use std::collections::HashMap;

use bevy::math::DVec3;

use super::{separate_ties, Layout, SphericalLayout};
use crate::models::{EdgeType, Graph, Position};

/// Physics constants for force-directed layout.
const REPULSION_STRENGTH: f64 = 200.0;
const DAMPING: f64 = 0.6; // Velocity friction per step
const MIN_DISTANCE: f64 = 0.5;
const MIN_MASS: f64 = 1.0;
const MASS_PER_CONNECTION: f64 = 1.5;
const MAX_VELOCITY: f64 = 200.0;
const TIMESTEP: f64 = 0.016;

// Per-relation spring parameters (stiffness, rest_length).
// Equilibrium: stiffness * ln(d/rest) = REPULSION / d^2
const SPRING_STRUCTURAL: (f64, f64) = (50.0, 4.0); // contains, defines, belongs_to, file_pair
const SPRING_CODE: (f64, f64) = (20.0, 7.0); // calls, uses, extends, ...
const SPRING_LOOSE: (f64, f64) = (10.0, 10.0); // references, custom
const SPRING_DEFAULT: (f64, f64) = (15.0, 8.0);

/// Relaxes a spherical seed layout with repulsion between all pairs,
/// logarithmic springs along edges and centroid re-centering.
///
/// Deterministic: no randomness beyond the seed layout's index jitter.
/// Cost is O(n^2) per iteration, so keep `iterations` modest for large graphs.
#[derive(Debug, Clone)]
pub struct ForceDirected {
    pub seed: SphericalLayout,
    pub iterations: usize,
}

struct Spring {
    from: usize,
    to: usize,
    stiffness: f64,
    rest_length: f64,
}

impl ForceDirected {
    pub fn new(seed: SphericalLayout, iterations: usize) -> Self {
        Self { seed, iterations }
    }

    fn springs(graph: &Graph) -> Vec<Spring> {
        let index: HashMap<&str, usize> = graph
            .nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id.as_str(), i))
            .collect();

        graph
            .edges
            .iter()
            .filter_map(|e| {
                let from = *index.get(e.source.as_str())?;
                let to = *index.get(e.target.as_str())?;
                if from == to {
                    return None;
                }
                let (stiffness, rest_length) = spring_params(&e.edge_type);
                Some(Spring {
                    from,
                    to,
                    stiffness,
                    rest_length,
                })
            })
            .collect()
    }

    /// One integration step.
    fn step(positions: &mut [DVec3], velocities: &mut [DVec3], masses: &[f64], springs: &[Spring]) {
        let n = positions.len();

        // Repulsion: F_r = K / d^2
        for i in 0..n {
            for j in (i + 1)..n {
                let delta = positions[i] - positions[j];
                let dist = delta.length().max(MIN_DISTANCE);
                let force = REPULSION_STRENGTH / (dist * dist);
                let dir = delta.normalize_or_zero();

                velocities[i] += dir * force * TIMESTEP / masses[i];
                velocities[j] -= dir * force * TIMESTEP / masses[j];
            }
        }

        // Attraction: F_a = stiffness * ln(d / rest_length)
        for s in springs {
            let delta = positions[s.to] - positions[s.from];
            let dist = delta.length().max(MIN_DISTANCE);
            let force = s.stiffness * (dist / s.rest_length).ln();
            let dir = delta.normalize_or_zero();

            velocities[s.from] += dir * force * TIMESTEP / masses[s.from];
            velocities[s.to] -= dir * force * TIMESTEP / masses[s.to];
        }

        // Centering: pure translation of the centroid to the origin
        let centroid = positions.iter().copied().sum::<DVec3>() / n as f64;
        for p in positions.iter_mut() {
            *p -= centroid;
        }

        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            *v *= DAMPING;
            let speed = v.length();
            if speed > MAX_VELOCITY {
                *v = *v / speed * MAX_VELOCITY;
            } else if speed < 0.001 {
                *v = DVec3::ZERO;
            }
            *p += *v * TIMESTEP;
        }
    }
}

impl Layout for ForceDirected {
    fn place(&self, graph: &Graph) -> Vec<Position> {
        let n = graph.nodes.len();
        if n == 0 {
            return Vec::new();
        }

        let mut positions: Vec<DVec3> = self
            .seed
            .place(graph)
            .into_iter()
            .map(|p| DVec3::new(p.x, p.y, p.z))
            .collect();
        let mut velocities = vec![DVec3::ZERO; n];

        let springs = Self::springs(graph);
        let masses = distribute_mass(n, &springs);

        for _ in 0..self.iterations {
            Self::step(&mut positions, &mut velocities, &masses, &springs);
        }

        let mut result: Vec<Position> = positions
            .into_iter()
            .map(|p| Position::new(p.x, p.y, p.z))
            .collect();
        separate_ties(&mut result);
        result
    }
}

/// Mass grows with the connection count so hubs move less.
fn distribute_mass(n: usize, springs: &[Spring]) -> Vec<f64> {
    let mut connection_counts = vec![0usize; n];
    for s in springs {
        connection_counts[s.from] += 1;
        connection_counts[s.to] += 1;
    }
    connection_counts
        .into_iter()
        .map(|c| MIN_MASS + c as f64 * MASS_PER_CONNECTION)
        .collect()
}

/// Structural edges cluster tighter; loose references stay apart.
fn spring_params(edge_type: &EdgeType) -> (f64, f64) {
    match edge_type {
        EdgeType::Contains | EdgeType::Defines | EdgeType::BelongsTo | EdgeType::FilePair => {
            SPRING_STRUCTURAL
        }
        EdgeType::Uses
        | EdgeType::Extends
        | EdgeType::Implements
        | EdgeType::Includes
        | EdgeType::Calls
        | EdgeType::Instantiates
        | EdgeType::Routes
        | EdgeType::Renders
        | EdgeType::QueriesTable
        | EdgeType::HasRelation => SPRING_CODE,
        EdgeType::References => SPRING_LOOSE,
        EdgeType::Custom(_) => SPRING_DEFAULT,
    }
}
