//! Correlation network building
//!
//! Every unordered pair of records is scored, so the cost is O(n²) in the
//! number of records. That is fine for the tens to low hundreds of records a
//! register holds; beyond [`AnalysisConfig::max_interactive_corpus`] the
//! [`crate::Analyzer`] logs a warning. Callers with larger corpora should cap
//! the input or move the call off the interactive path.

use crate::correlation::CorrelationSignals;
use crate::similarity::ShingleSet;
use crate::AnalysisConfig;
use risklens_domain::{BusinessUnit, Risk, RiskId, RiskKind};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Display label for why two records are linked
///
/// Assigned by a fixed priority over raw attributes, not by which weighted
/// term contributed most to the strength.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DominantFactor {
    /// Both records belong to the same business unit
    SameBusinessUnit,
    /// Scores differ by less than the configured gap
    SimilarSeverity,
    /// Fallback label; does not guarantee strong text overlap
    TextOverlap,
}

impl DominantFactor {
    /// Get the label as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DominantFactor::SameBusinessUnit => "same-business-unit",
            DominantFactor::SimilarSeverity => "similar-severity",
            DominantFactor::TextOverlap => "text-overlap",
        }
    }
}

/// A retained link between two records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationEdge {
    /// Earlier record in input order
    pub source_id: RiskId,

    /// Later record in input order
    pub target_id: RiskId,

    /// Correlation strength in [0, 1]
    pub strength: f64,

    /// Why the pair is linked
    pub dominant_factor: DominantFactor,
}

impl CorrelationEdge {
    /// Whether this edge touches the given record
    pub fn touches(&self, id: &RiskId) -> bool {
        &self.source_id == id || &self.target_id == id
    }

    /// The endpoint opposite `id`, if the edge touches it
    pub fn other(&self, id: &RiskId) -> Option<&RiskId> {
        if &self.source_id == id {
            Some(&self.target_id)
        } else if &self.target_id == id {
            Some(&self.source_id)
        } else {
            None
        }
    }
}

/// Display projection of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNode {
    /// Record identifier
    pub id: RiskId,

    /// Record title
    pub title: String,

    /// Owning business unit
    pub business_unit: BusinessUnit,

    /// Likelihood × impact
    pub score: u8,

    /// Risk or issue
    pub kind: RiskKind,
}

impl From<&Risk> for NetworkNode {
    fn from(risk: &Risk) -> Self {
        Self {
            id: risk.id().clone(),
            title: risk.title().to_string(),
            business_unit: risk.business_unit(),
            score: risk.score(),
            kind: risk.kind(),
        }
    }
}

/// Which nodes a view wants to show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NodeFilter {
    /// Every node
    #[default]
    All,
    /// Nodes at or above the high-severity score
    HighSeverity,
    /// Nodes with at least one edge
    Correlated,
}

/// Nodes and retained edges for a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorrelationNetwork {
    /// One node per input record, in input order
    pub nodes: Vec<NetworkNode>,

    /// Edges above the threshold, in pair order
    pub edges: Vec<CorrelationEdge>,
}

impl CorrelationNetwork {
    /// Whether the network has no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of edges touching a node
    pub fn degree(&self, id: &RiskId) -> usize {
        self.edges.iter().filter(|e| e.touches(id)).count()
    }

    /// Identifiers linked to a node
    pub fn neighbors<'a>(&'a self, id: &'a RiskId) -> impl Iterator<Item = &'a RiskId> + 'a {
        self.edges.iter().filter_map(move |e| e.other(id))
    }

    /// Restrict to a subset of nodes, keeping only edges whose endpoints both survive
    pub fn filter(&self, filter: NodeFilter, high_severity_score: u8) -> CorrelationNetwork {
        let nodes: Vec<NetworkNode> = match filter {
            NodeFilter::All => self.nodes.clone(),
            NodeFilter::HighSeverity => self
                .nodes
                .iter()
                .filter(|n| n.score >= high_severity_score)
                .cloned()
                .collect(),
            NodeFilter::Correlated => {
                let linked: HashSet<&RiskId> = self
                    .edges
                    .iter()
                    .flat_map(|e| [&e.source_id, &e.target_id])
                    .collect();
                self.nodes
                    .iter()
                    .filter(|n| linked.contains(&n.id))
                    .cloned()
                    .collect()
            }
        };

        let visible: HashSet<&RiskId> = nodes.iter().map(|n| &n.id).collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| visible.contains(&e.source_id) && visible.contains(&e.target_id))
            .cloned()
            .collect();

        CorrelationNetwork { nodes, edges }
    }
}

/// Label an edge by priority: business unit, then severity gap, then text
pub fn classify_edge(a: &Risk, b: &Risk, similar_severity_gap: u8) -> DominantFactor {
    if a.business_unit() == b.business_unit() {
        DominantFactor::SameBusinessUnit
    } else if a.score().abs_diff(b.score()) < similar_severity_gap {
        DominantFactor::SimilarSeverity
    } else {
        DominantFactor::TextOverlap
    }
}

/// Build the correlation network with the default 0.4 edge threshold
///
/// # Examples
///
/// ```
/// use risklens_analysis::network::build_network;
///
/// let network = build_network(&[]);
/// assert!(network.nodes.is_empty());
/// assert!(network.edges.is_empty());
/// ```
pub fn build_network(records: &[Risk]) -> CorrelationNetwork {
    build_network_with(records, &AnalysisConfig::default())
}

/// Build the correlation network with explicit configuration
pub fn build_network_with(records: &[Risk], config: &AnalysisConfig) -> CorrelationNetwork {
    let nodes: Vec<NetworkNode> = records.iter().map(NetworkNode::from).collect();

    let k = config.similarity.shingle_size;
    let shingles: Vec<ShingleSet> = records
        .iter()
        .map(|r| ShingleSet::from_text(&r.text(), k))
        .collect();

    let mut edges = Vec::new();
    for i in 0..records.len() {
        for j in (i + 1)..records.len() {
            let (a, b) = (&records[i], &records[j]);
            let strength =
                CorrelationSignals::measure_shingled(a, &shingles[i], b, &shingles[j], &config.correlation)
                    .strength(&config.correlation);

            if strength > config.network.edge_threshold {
                edges.push(CorrelationEdge {
                    source_id: a.id().clone(),
                    target_id: b.id().clone(),
                    strength,
                    dominant_factor: classify_edge(a, b, config.network.similar_severity_gap),
                });
            }
        }
    }

    tracing::debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        "correlation network built"
    );

    CorrelationNetwork { nodes, edges }
}
