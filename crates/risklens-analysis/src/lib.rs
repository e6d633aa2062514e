//! RiskLens Analysis
//!
//! Pure, synchronous analytics over an in-memory risk register.
//!
//! # Overview
//!
//! - **Similarity**: Jaccard similarity over 3-character shingles
//! - **Near-duplicates**: warn while a record is drafted if the register already holds something like it
//! - **Correlation**: weighted pairwise strength from unit, score, text and date
//! - **Network**: edges above 0.4 between every pair of records
//! - **Cascades**: high-severity records tightly coupled to a focal record
//! - **Sentiment**: lexicon-based tone classification in Thai and English
//! - **Portfolio**: dashboard counts and the likelihood × impact heat map
//! - **Alerts**: the critical-score gate and escalation hand-off
//!
//! Nothing here performs I/O or reads ambient state. Every function takes the
//! records it works on, and the `_with` variants take an [`AnalysisConfig`].
//! Empty inputs give empty outputs, never errors.
//!
//! # Thresholds
//!
//! | Operation | Test | Default |
//! |-----------|------|---------|
//! | Near-duplicate | similarity `>` | 0.3 |
//! | Network edge | strength `>` | 0.4 |
//! | Cascade | strength `>` and score `>` | 0.6, 15 |
//! | Critical alert | score `>=` | 20 |
//!
//! # Corpus size
//!
//! Network building is O(n²). The [`Analyzer`] logs a warning past
//! [`AnalysisConfig::max_interactive_corpus`] records (200 by default) but
//! still does the work; capping the input is the caller's call.
//!
//! # Usage
//!
//! ```
//! use risklens_analysis::Analyzer;
//! use risklens_domain::{BusinessUnit, Risk, RiskKind, Severity};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let analyzer = Analyzer::default_config();
//! let records = vec![
//!     Risk::new("a", RiskKind::Risk, "Supplier insolvency", "Tier-1 vendor",
//!         BusinessUnit::Operations, Severity::new(4, 4)?),
//!     Risk::new("b", RiskKind::Risk, "Supplier insolvency", "Tier-1 vendor",
//!         BusinessUnit::Operations, Severity::new(4, 5)?),
//! ];
//!
//! let network = analyzer.build_network(&records);
//! assert_eq!(network.edges.len(), 1);
//!
//! let cascades = analyzer.find_cascades(&records, &records[1]);
//! assert_eq!(cascades.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [duplicates]
//! threshold = 0.3
//! limit = 3
//!
//! [network]
//! edge_threshold = 0.4
//!
//! [cascade]
//! min_correlation = 0.6
//! min_score = 15
//!
//! [alerts]
//! critical_threshold = 20
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod alerts;
mod analyzer;
pub mod cascade;
mod config;
pub mod correlation;
pub mod duplicates;
mod error;
pub mod kind_hint;
pub mod network;
pub mod portfolio;
pub mod sentiment;
pub mod similarity;

pub use alerts::AlertPolicy;
pub use analyzer::Analyzer;
pub use cascade::{find_cascades, CascadeRisk};
pub use config::{
    AnalysisConfig, CascadeConfig, CorrelationConfig, CorrelationWeights, DuplicateConfig,
    NetworkConfig, SimilarityConfig,
};
pub use correlation::correlate;
pub use duplicates::{find_similar, SimilarRisk};
pub use error::AnalysisError;
pub use network::{build_network, CorrelationEdge, CorrelationNetwork, DominantFactor, NetworkNode, NodeFilter};
pub use sentiment::{OrganizationSummary, OverallStatus, SentimentCategory, SentimentResult};
pub use similarity::similarity;
