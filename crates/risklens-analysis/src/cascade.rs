//! Cascade detection
//!
//! Given one high-severity record, find the others likely to be triggered or
//! worsened if it materializes. Advisory only.

use crate::correlation::CorrelationSignals;
use crate::similarity::ShingleSet;
use crate::AnalysisConfig;
use risklens_domain::Risk;

/// A record that may cascade from the focal record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CascadeRisk<'a> {
    /// The downstream record
    pub risk: &'a Risk,

    /// Its correlation with the focal record
    pub correlation: f64,
}

/// Records correlated above 0.6 with `focal` and scoring above 15
///
/// The focal record is recognised by id and never returned. Results keep
/// input order.
pub fn find_cascades<'a>(records: &'a [Risk], focal: &Risk) -> Vec<CascadeRisk<'a>> {
    find_cascades_with(records, focal, &AnalysisConfig::default())
}

/// [`find_cascades`] with explicit thresholds
pub fn find_cascades_with<'a>(
    records: &'a [Risk],
    focal: &Risk,
    config: &AnalysisConfig,
) -> Vec<CascadeRisk<'a>> {
    let k = config.similarity.shingle_size;
    let focal_shingles = ShingleSet::from_text(&focal.text(), k);

    let cascades: Vec<CascadeRisk<'a>> = records
        .iter()
        .filter(|r| r.id() != focal.id())
        .filter(|r| r.score() > config.cascade.min_score)
        .filter_map(|risk| {
            let correlation = CorrelationSignals::measure_shingled(
                focal,
                &focal_shingles,
                risk,
                &ShingleSet::from_text(&risk.text(), k),
                &config.correlation,
            )
            .strength(&config.correlation);

            (correlation > config.cascade.min_correlation).then_some(CascadeRisk { risk, correlation })
        })
        .collect();

    tracing::debug!(
        focal = %focal.id(),
        cascades = cascades.len(),
        "cascade scan complete"
    );

    cascades
}

/// Combined financial impact of the cascading records
///
/// Records without a recorded impact contribute nothing.
pub fn cascade_exposure(cascades: &[CascadeRisk<'_>]) -> f64 {
    cascades
        .iter()
        .filter_map(|c| c.risk.financial_impact())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use risklens_domain::{BusinessUnit, RiskKind, Severity};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn scenario() -> Vec<Risk> {
        vec![
            Risk::new(
                "x",
                RiskKind::Issue,
                "Core banking server overload",
                "Transaction queue backing up",
                BusinessUnit::It,
                Severity::new(4, 5).unwrap(),
            )
            .with_expected_date(date(10))
            .with_financial_impact(2_000_000.0),
            Risk::new(
                "y",
                RiskKind::Risk,
                "Core banking server overload spreads",
                "Transaction queue backing up further",
                BusinessUnit::It,
                Severity::new(4, 4).unwrap(),
            )
            .with_expected_date(date(13))
            .with_financial_impact(500_000.0),
            Risk::new(
                "z",
                RiskKind::Risk,
                "Trade show booth",
                "Booking deadline",
                BusinessUnit::Sales,
                Severity::new(2, 2).unwrap(),
            ),
        ]
    }

    #[test]
    fn test_scenario() {
        let records = scenario();
        let cascades = find_cascades(&records, &records[0]);

        let ids: Vec<&str> = cascades.iter().map(|c| c.risk.id().as_str()).collect();
        assert_eq!(ids, vec!["y"]);
        assert!(cascades[0].correlation > 0.6);
    }

    #[test]
    fn test_focal_never_included() {
        let records = scenario();
        for focal in &records {
            assert!(find_cascades(&records, focal)
                .iter()
                .all(|c| c.risk.id() != focal.id()));
        }
    }

    #[test]
    fn test_score_bar_is_strict() {
        // A perfect twin at exactly 15 does not qualify
        let focal = Risk::new("f", RiskKind::Risk, "Data loss", "", BusinessUnit::It, Severity::new(5, 5).unwrap());
        let twin = Risk::new("t", RiskKind::Risk, "Data loss", "", BusinessUnit::It, Severity::new(3, 5).unwrap());
        let records = vec![focal.clone(), twin];

        assert!(find_cascades(&records, &focal).is_empty());
    }

    #[test]
    fn test_empty_records() {
        let records = scenario();
        assert!(find_cascades(&[], &records[0]).is_empty());
    }

    #[test]
    fn test_exposure() {
        let records = scenario();
        let cascades = find_cascades(&records, &records[0]);
        assert_eq!(cascade_exposure(&cascades), 500_000.0);
        assert_eq!(cascade_exposure(&[]), 0.0);
    }
}
