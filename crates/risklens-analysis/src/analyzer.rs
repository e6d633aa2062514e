//! Configured entry point over the analysis functions

use crate::alerts::{self, AlertPolicy};
use crate::cascade::{self, CascadeRisk};
use crate::correlation;
use crate::duplicates::{self, SimilarRisk};
use crate::kind_hint::{self, KindHint};
use crate::network::{self, CorrelationNetwork, NodeFilter};
use crate::sentiment::{self, OrganizationSummary, SentimentResult};
use crate::{AnalysisConfig, AnalysisError};
use risklens_domain::traits::{Escalation, RiskNotifier};
use risklens_domain::{Risk, RiskId};
use std::collections::BTreeMap;
use std::fmt::Display;
use tracing::warn;

/// Analysis engine bound to one validated configuration
///
/// The free functions in each module take their configuration explicitly;
/// `Analyzer` just carries it so callers don't have to thread it through.
///
/// # Examples
///
/// ```
/// use risklens_analysis::{AnalysisConfig, Analyzer};
/// use risklens_domain::{BusinessUnit, Risk, RiskKind, Severity};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let analyzer = Analyzer::new(AnalysisConfig::default())?;
/// let corpus = vec![Risk::new(
///     "r1",
///     RiskKind::Issue,
///     "Server outage in Bangkok datacenter",
///     "",
///     BusinessUnit::It,
///     Severity::new(4, 5)?,
/// )];
///
/// let hits = analyzer.find_similar(&corpus, "Server outage at Bangkok DC", "");
/// assert_eq!(hits.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer, rejecting inconsistent configuration
    pub fn new(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an analyzer with default configuration
    pub fn default_config() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// The active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The active alert policy
    pub fn alert_policy(&self) -> &AlertPolicy {
        &self.config.alerts
    }

    /// See [`duplicates::find_similar`]
    pub fn find_similar<'a>(
        &self,
        corpus: &'a [Risk],
        title: &str,
        description: &str,
    ) -> Vec<SimilarRisk<'a>> {
        duplicates::find_similar_with(corpus, title, description, &self.config)
    }

    /// See [`correlation::correlate`]
    pub fn correlate(&self, a: &Risk, b: &Risk) -> f64 {
        correlation::correlate_with(a, b, &self.config)
    }

    /// See [`network::build_network`]
    pub fn build_network(&self, records: &[Risk]) -> CorrelationNetwork {
        self.warn_if_oversized(records.len(), "build_network");
        network::build_network_with(records, &self.config)
    }

    /// Build the network and keep only the nodes a view asked for
    pub fn build_filtered_network(&self, records: &[Risk], filter: NodeFilter) -> CorrelationNetwork {
        self.build_network(records)
            .filter(filter, self.config.network.high_severity_score)
    }

    /// See [`cascade::find_cascades`]
    pub fn find_cascades<'a>(&self, records: &'a [Risk], focal: &Risk) -> Vec<CascadeRisk<'a>> {
        cascade::find_cascades_with(records, focal, &self.config)
    }

    /// See [`sentiment::classify`]
    pub fn classify(&self, text: &str) -> SentimentResult {
        sentiment::classify(text)
    }

    /// See [`sentiment::classify_batch`]
    pub fn classify_batch(&self, records: &[Risk]) -> BTreeMap<RiskId, SentimentResult> {
        sentiment::classify_batch(records)
    }

    /// Classify every record and summarise the result
    pub fn organization_summary(&self, records: &[Risk]) -> OrganizationSummary {
        sentiment::organization_summary(self.classify_batch(records).values())
    }

    /// See [`kind_hint::suggest_kind`]
    pub fn suggest_kind(&self, title: &str, description: &str) -> KindHint {
        kind_hint::suggest_kind(title, description)
    }

    /// See [`alerts::check_new_risk`]
    pub fn check_new_risk<N>(&self, risk: &Risk, notifier: &mut N) -> Result<bool, AnalysisError>
    where
        N: RiskNotifier,
        N::Error: Display,
    {
        alerts::check_new_risk(risk, &self.config.alerts, notifier)
    }

    /// See [`alerts::escalate`]
    pub fn escalate<N>(
        &self,
        risk: &Risk,
        reason: &str,
        escalated_by: &str,
        notifier: &mut N,
    ) -> Result<Escalation, AnalysisError>
    where
        N: RiskNotifier,
        N::Error: Display,
    {
        alerts::escalate(risk, reason, escalated_by, notifier)
    }

    fn warn_if_oversized(&self, len: usize, operation: &'static str) {
        if len > self.config.max_interactive_corpus {
            warn!(
                operation,
                records = len,
                cap = self.config.max_interactive_corpus,
                "corpus exceeds interactive size; pairwise scoring may stall"
            );
        }
    }
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::default_config()
    }
}
