//! Configuration for the analysis engine
//!
//! Every threshold the engine applies lives here so that callers pass it
//! explicitly rather than reading ambient state.

use crate::alerts::AlertPolicy;
use crate::AnalysisError;
use serde::{Deserialize, Serialize};

/// Top-level analysis configuration
///
/// # Examples
///
/// ```
/// use risklens_analysis::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.duplicates.threshold, 0.3);
/// assert_eq!(config.network.edge_threshold, 0.4);
///
/// // Stricter thresholds produce fewer warnings and sparser graphs
/// let strict = AnalysisConfig::strict();
/// assert!(strict.network.edge_threshold > config.network.edge_threshold);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Text shingling
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Near-duplicate detection
    #[serde(default)]
    pub duplicates: DuplicateConfig,

    /// Pairwise correlation scoring
    #[serde(default)]
    pub correlation: CorrelationConfig,

    /// Network building
    #[serde(default)]
    pub network: NetworkConfig,

    /// Cascade detection
    #[serde(default)]
    pub cascade: CascadeConfig,

    /// Critical-score alerting
    #[serde(default)]
    pub alerts: AlertPolicy,

    /// Soft cap on corpus size for the O(n²) operations.
    /// Larger corpora are still processed but logged as a warning.
    #[serde(default = "default_max_interactive_corpus")]
    pub max_interactive_corpus: usize,
}

fn default_max_interactive_corpus() -> usize {
    200
}

/// Shingling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Characters per shingle
    pub shingle_size: usize,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self { shingle_size: 3 }
    }
}

/// Near-duplicate detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    /// Matches must be strictly above this similarity
    pub threshold: f64,

    /// Maximum number of matches returned
    pub limit: usize,
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        Self {
            threshold: 0.3,
            limit: 3,
        }
    }
}

/// Weights of the four correlation signals; they must sum to 1.0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationWeights {
    /// Identical business unit
    pub same_business_unit: f64,

    /// Closeness of scores
    pub score_proximity: f64,

    /// Jaccard overlap of title and description
    pub text_similarity: f64,

    /// Closeness of expected dates
    pub temporal_proximity: f64,
}

impl Default for CorrelationWeights {
    fn default() -> Self {
        Self {
            same_business_unit: 0.3,
            score_proximity: 0.2,
            text_similarity: 0.3,
            temporal_proximity: 0.2,
        }
    }
}

impl CorrelationWeights {
    /// Sum of all four weights
    pub fn total(&self) -> f64 {
        self.same_business_unit + self.score_proximity + self.text_similarity + self.temporal_proximity
    }

    fn as_array(&self) -> [(&'static str, f64); 4] {
        [
            ("same_business_unit", self.same_business_unit),
            ("score_proximity", self.score_proximity),
            ("text_similarity", self.text_similarity),
            ("temporal_proximity", self.temporal_proximity),
        ]
    }
}

/// Pairwise correlation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Signal weights
    pub weights: CorrelationWeights,

    /// Score difference at which score proximity reaches zero
    pub score_span: f64,

    /// Days apart at which temporal proximity reaches zero
    pub temporal_window_days: u32,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            weights: CorrelationWeights::default(),
            score_span: 25.0,
            temporal_window_days: 30,
        }
    }
}

/// Network building parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Edges must be strictly above this strength
    pub edge_threshold: f64,

    /// Score gap below which an edge is labelled similar-severity
    pub similar_severity_gap: u8,

    /// Score at or above which a node counts as high severity when filtering
    pub high_severity_score: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            edge_threshold: 0.4,
            similar_severity_gap: 5,
            high_severity_score: 15,
        }
    }
}

/// Cascade detection parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CascadeConfig {
    /// Correlation with the focal record must be strictly above this
    pub min_correlation: f64,

    /// The other record's score must be strictly above this
    pub min_score: u8,
}

impl Default for CascadeConfig {
    fn default() -> Self {
        Self {
            min_correlation: 0.6,
            min_score: 15,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            similarity: SimilarityConfig::default(),
            duplicates: DuplicateConfig::default(),
            correlation: CorrelationConfig::default(),
            network: NetworkConfig::default(),
            cascade: CascadeConfig::default(),
            alerts: AlertPolicy::default(),
            max_interactive_corpus: default_max_interactive_corpus(),
        }
    }
}

impl AnalysisConfig {
    /// Higher bars everywhere: fewer duplicate warnings, sparser networks
    pub fn strict() -> Self {
        Self {
            duplicates: DuplicateConfig {
                threshold: 0.45,
                limit: 3,
            },
            network: NetworkConfig {
                edge_threshold: 0.55,
                ..NetworkConfig::default()
            },
            cascade: CascadeConfig {
                min_correlation: 0.7,
                min_score: 19,
            },
            ..Self::default()
        }
    }

    /// Lower bars everywhere: more duplicate warnings, denser networks
    pub fn lenient() -> Self {
        Self {
            duplicates: DuplicateConfig {
                threshold: 0.2,
                limit: 5,
            },
            network: NetworkConfig {
                edge_threshold: 0.3,
                ..NetworkConfig::default()
            },
            cascade: CascadeConfig {
                min_correlation: 0.5,
                min_score: 11,
            },
            ..Self::default()
        }
    }

    /// Check internal consistency
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.similarity.shingle_size == 0 {
            return Err(AnalysisError::Config("shingle_size must be at least 1".into()));
        }
        if self.duplicates.limit == 0 {
            return Err(AnalysisError::Config("duplicates.limit must be at least 1".into()));
        }

        let weights = &self.correlation.weights;
        for (name, weight) in weights.as_array() {
            if !(0.0..=1.0).contains(&weight) {
                return Err(AnalysisError::Config(format!(
                    "weight {} = {} is outside [0.0, 1.0]",
                    name, weight
                )));
            }
        }
        if (weights.total() - 1.0).abs() > 1e-9 {
            return Err(AnalysisError::Config(format!(
                "correlation weights must sum to 1.0, got {}",
                weights.total()
            )));
        }

        if self.correlation.score_span <= 0.0 {
            return Err(AnalysisError::Config("score_span must be positive".into()));
        }
        if self.correlation.temporal_window_days == 0 {
            return Err(AnalysisError::Config("temporal_window_days must be positive".into()));
        }

        for (name, threshold) in [
            ("duplicates.threshold", self.duplicates.threshold),
            ("network.edge_threshold", self.network.edge_threshold),
            ("cascade.min_correlation", self.cascade.min_correlation),
        ] {
            if !(0.0..=1.0).contains(&threshold) {
                return Err(AnalysisError::Config(format!(
                    "{} = {} is outside [0.0, 1.0]",
                    name, threshold
                )));
            }
        }

        Ok(())
    }
}
