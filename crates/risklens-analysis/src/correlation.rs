//! Pairwise risk correlation
//!
//! The strength of a pair is a weighted sum of four signals:
//!
//! | Signal | Weight | Value |
//! |--------|--------|-------|
//! | Same business unit | 0.30 | 1 if identical, else 0 |
//! | Score proximity | 0.20 | `1 − min(|Δscore| / 25, 1)` |
//! | Text similarity | 0.30 | Jaccard over `title + " " + description` |
//! | Temporal proximity | 0.20 | `1 − days/30` when both dates are known, 0 past 30 days |
//!
//! The sum is not renormalized. When either record lacks an expected date the
//! temporal term is simply absent, so such pairs top out at 0.8.

use crate::similarity::ShingleSet;
use crate::{AnalysisConfig, CorrelationConfig};
use chrono::NaiveDate;
use risklens_domain::Risk;

/// The four raw signals between two records, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationSignals {
    /// 1.0 when the business units match
    pub same_business_unit: f64,

    /// Linear closeness of scores
    pub score_proximity: f64,

    /// Jaccard similarity of the texts
    pub text_similarity: f64,

    /// Linear closeness of expected dates; `None` when either is missing
    pub temporal_proximity: Option<f64>,
}

impl CorrelationSignals {
    /// Measure the signals between two records
    pub fn measure(a: &Risk, b: &Risk, config: &AnalysisConfig) -> Self {
        let k = config.similarity.shingle_size;
        Self::measure_shingled(
            a,
            &ShingleSet::from_text(&a.text(), k),
            b,
            &ShingleSet::from_text(&b.text(), k),
            &config.correlation,
        )
    }

    /// Measure using shingle sets the caller already built
    pub(crate) fn measure_shingled(
        a: &Risk,
        a_shingles: &ShingleSet,
        b: &Risk,
        b_shingles: &ShingleSet,
        config: &CorrelationConfig,
    ) -> Self {
        Self {
            same_business_unit: if a.business_unit() == b.business_unit() { 1.0 } else { 0.0 },
            score_proximity: score_proximity(a.score(), b.score(), config.score_span),
            text_similarity: a_shingles.jaccard(b_shingles),
            temporal_proximity: temporal_proximity(
                a.expected_date(),
                b.expected_date(),
                config.temporal_window_days,
            ),
        }
    }

    /// Weighted sum of the signals, in [0, 1]
    pub fn strength(&self, config: &CorrelationConfig) -> f64 {
        let w = &config.weights;
        let total = w.same_business_unit * self.same_business_unit
            + w.score_proximity * self.score_proximity
            + w.text_similarity * self.text_similarity
            + w.temporal_proximity * self.temporal_proximity.unwrap_or(0.0);

        total.clamp(0.0, 1.0)
    }
}

/// `1 − min(|a − b| / span, 1)`
pub fn score_proximity(a: u8, b: u8, span: f64) -> f64 {
    let diff = (a as f64 - b as f64).abs();
    1.0 - (diff / span).min(1.0)
}

/// `1 − days/window`, floored at zero; `None` if either date is missing
pub fn temporal_proximity(a: Option<NaiveDate>, b: Option<NaiveDate>, window_days: u32) -> Option<f64> {
    let (a, b) = (a?, b?);
    let days = (a - b).num_days().unsigned_abs() as f64;
    let window = window_days as f64;

    if days >= window {
        Some(0.0)
    } else {
        Some(1.0 - days / window)
    }
}

/// Correlation strength between two records with the default weights
///
/// # Examples
///
/// ```
/// use risklens_analysis::correlation::correlate;
/// use risklens_domain::{BusinessUnit, Risk, RiskKind, Severity};
///
/// let a = Risk::new("a", RiskKind::Risk, "ERP upgrade slips", "Vendor late",
///     BusinessUnit::It, Severity::new(4, 4).unwrap());
/// let b = Risk::new("b", RiskKind::Risk, "ERP upgrade slips", "Vendor late",
///     BusinessUnit::It, Severity::new(4, 4).unwrap());
///
/// // Identical records without dates reach 0.8, not 1.0
/// assert!((correlate(&a, &b) - 0.8).abs() < 1e-9);
/// ```
pub fn correlate(a: &Risk, b: &Risk) -> f64 {
    correlate_with(a, b, &AnalysisConfig::default())
}

/// Correlation strength with explicit configuration
pub fn correlate_with(a: &Risk, b: &Risk, config: &AnalysisConfig) -> f64 {
    CorrelationSignals::measure(a, b, config).strength(&config.correlation)
}
