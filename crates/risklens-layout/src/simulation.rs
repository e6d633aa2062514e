//! Force-directed physics
//!
//! [`step`] is a pure function of the node state, the edges and the config,
//! so it can be tested without any rendering or scheduling. [`Simulation`]
//! adds the state that persists across ticks and the id-matching needed when
//! the underlying network changes.

use crate::LayoutConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use risklens_analysis::{CorrelationEdge, CorrelationNetwork, NetworkNode};
use risklens_domain::RiskId;
use serde::Serialize;
use std::collections::HashMap;

/// A network node with position and velocity
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimNode {
    /// The projected record
    #[serde(flatten)]
    pub node: NetworkNode,

    /// Horizontal position
    pub x: f64,

    /// Vertical position
    pub y: f64,

    /// Horizontal velocity
    pub vx: f64,

    /// Vertical velocity
    pub vy: f64,
}

impl SimNode {
    /// Place a node at rest
    pub fn at(node: NetworkNode, x: f64, y: f64) -> Self {
        Self {
            node,
            x,
            y,
            vx: 0.0,
            vy: 0.0,
        }
    }

    /// Record identifier
    pub fn id(&self) -> &RiskId {
        &self.node.id
    }
}

/// Advance the layout by one tick
///
/// Forces accumulate into velocity: a pull toward the canvas centre, pairwise
/// inverse-square repulsion, and a spring along every edge whose endpoints are
/// both present. Velocity is then damped and integrated over `dt`, and the
/// position clamped inside the margin. Edges naming unknown ids are skipped.
pub fn step(nodes: &mut [SimNode], edges: &[CorrelationEdge], config: &LayoutConfig, dt: f64) {
    let (cx, cy) = config.center();

    for node in nodes.iter_mut() {
        node.vx += (cx - node.x) * config.center_strength;
        node.vy += (cy - node.y) * config.center_strength;
    }

    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            let dx = nodes[i].x - nodes[j].x;
            let dy = nodes[i].y - nodes[j].y;
            let dist = distance(dx, dy);
            let force = config.repulsion / (dist * dist);

            let fx = dx / dist * force;
            let fy = dy / dist * force;
            nodes[i].vx += fx;
            nodes[i].vy += fy;
            nodes[j].vx -= fx;
            nodes[j].vy -= fy;
        }
    }

    if !edges.is_empty() {
        let springs: Vec<(usize, usize)> = {
            let index: HashMap<&RiskId, usize> = nodes
                .iter()
                .enumerate()
                .map(|(i, n)| (&n.node.id, i))
                .collect();

            edges
                .iter()
                .filter_map(|e| Some((*index.get(&e.source_id)?, *index.get(&e.target_id)?)))
                .collect()
        };

        for (s, t) in springs {
            let dx = nodes[t].x - nodes[s].x;
            let dy = nodes[t].y - nodes[s].y;
            let dist = distance(dx, dy);
            let force = (dist - config.link_distance) * config.link_strength;

            let fx = dx / dist * force;
            let fy = dy / dist * force;
            nodes[s].vx += fx;
            nodes[s].vy += fy;
            nodes[t].vx -= fx;
            nodes[t].vy -= fy;
        }
    }

    let (min_x, max_x) = (config.margin, config.width - config.margin);
    let (min_y, max_y) = (config.margin, config.height - config.margin);
    for node in nodes.iter_mut() {
        node.vx *= config.damping;
        node.vy *= config.damping;
        node.x = (node.x + node.vx * dt).clamp(min_x, max_x);
        node.y = (node.y + node.vy * dt).clamp(min_y, max_y);
    }
}

/// Euclidean distance, with coincident points treated as 1 apart
fn distance(dx: f64, dy: f64) -> f64 {
    let dist = (dx * dx + dy * dy).sqrt();
    if dist == 0.0 {
        1.0
    } else {
        dist
    }
}

/// Layout state carried from tick to tick
///
/// # Examples
///
/// ```
/// use risklens_layout::{LayoutConfig, Simulation};
/// use risklens_analysis::CorrelationNetwork;
///
/// let mut sim = Simulation::seeded(LayoutConfig::default(), 7);
/// sim.sync(CorrelationNetwork::default());
/// sim.tick();
/// assert!(sim.nodes().is_empty());
/// assert_eq!(sim.ticks(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: LayoutConfig,
    nodes: Vec<SimNode>,
    edges: Vec<CorrelationEdge>,
    rng: StdRng,
    ticks: u64,
}

impl Simulation {
    /// Create an empty simulation with an entropy-seeded RNG
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an empty simulation with a fixed seed
    pub fn seeded(config: LayoutConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create an empty simulation with the given RNG
    pub fn with_rng(config: LayoutConfig, rng: StdRng) -> Self {
        Self {
            config,
            nodes: Vec::new(),
            edges: Vec::new(),
            rng,
            ticks: 0,
        }
    }

    /// Current node state
    pub fn nodes(&self) -> &[SimNode] {
        &self.nodes
    }

    /// Current edges
    pub fn edges(&self) -> &[CorrelationEdge] {
        &self.edges
    }

    /// Active configuration
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Position of a node, if present
    pub fn position(&self, id: &RiskId) -> Option<(f64, f64)> {
        self.nodes.iter().find(|n| n.id() == id).map(|n| (n.x, n.y))
    }

    /// Replace the graph, keeping state for ids that survive
    ///
    /// Surviving nodes keep position and velocity and take the new projection
    /// (title, score). New ids start at rest near the centre. Ids no longer
    /// present are dropped. Node order follows the new network.
    pub fn sync(&mut self, network: CorrelationNetwork) {
        let mut previous: HashMap<RiskId, SimNode> = self
            .nodes
            .drain(..)
            .map(|n| (n.node.id.clone(), n))
            .collect();

        let (cx, cy) = self.config.center();
        let spread = self.config.spawn_spread;
        let mut spawned = 0usize;

        let nodes: Vec<SimNode> = network
            .nodes
            .into_iter()
            .map(|node| match previous.remove(&node.id) {
                Some(existing) => SimNode { node, ..existing },
                None => {
                    spawned += 1;
                    let x = cx + (self.rng.gen::<f64>() - 0.5) * spread;
                    let y = cy + (self.rng.gen::<f64>() - 0.5) * spread;
                    SimNode::at(node, x, y)
                }
            })
            .collect();

        tracing::debug!(
            nodes = nodes.len(),
            edges = network.edges.len(),
            spawned,
            removed = previous.len(),
            "layout synced"
        );

        self.nodes = nodes;
        self.edges = network.edges;
    }

    /// Advance one frame
    pub fn tick(&mut self) {
        step(&mut self.nodes, &self.edges, &self.config, 1.0);
        self.ticks += 1;
    }

    /// Advance several frames without a scheduler
    pub fn run(&mut self, frames: usize) {
        for _ in 0..frames {
            self.tick();
        }
    }
}
