//! Register-wide statistics for dashboards

use risklens_domain::{BusinessUnit, Risk, RiskKind, RiskLevel};
use serde::Serialize;
use std::collections::BTreeMap;

/// Score at or above which the dashboard counts a record as critical
pub const DASHBOARD_CRITICAL_SCORE: u8 = 15;

/// Summary counts over a set of records
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStats {
    /// Number of records
    pub total: usize,

    /// Records per display band
    pub by_level: BTreeMap<RiskLevel, usize>,

    /// Records per business unit
    pub by_business_unit: BTreeMap<BusinessUnit, usize>,

    /// Records scoring at or above the dashboard critical bar
    pub critical: usize,

    /// Records that are live issues rather than risks
    pub issues: usize,

    /// Sum of recorded financial impacts
    pub financial_exposure: f64,

    /// Mean score; 0 for an empty set
    pub average_score: f64,
}

impl PortfolioStats {
    /// Records in a given band
    pub fn level_count(&self, level: RiskLevel) -> usize {
        self.by_level.get(&level).copied().unwrap_or(0)
    }

    /// Records owned by a given unit
    pub fn unit_count(&self, unit: BusinessUnit) -> usize {
        self.by_business_unit.get(&unit).copied().unwrap_or(0)
    }
}

/// Compute summary counts
pub fn portfolio_stats(records: &[Risk]) -> PortfolioStats {
    let mut stats = PortfolioStats {
        total: records.len(),
        ..PortfolioStats::default()
    };

    let mut score_sum = 0u64;
    for risk in records {
        *stats.by_level.entry(risk.level()).or_insert(0) += 1;
        *stats.by_business_unit.entry(risk.business_unit()).or_insert(0) += 1;

        if risk.score() >= DASHBOARD_CRITICAL_SCORE {
            stats.critical += 1;
        }
        if risk.kind() == RiskKind::Issue {
            stats.issues += 1;
        }
        stats.financial_exposure += risk.financial_impact().unwrap_or(0.0);
        score_sum += u64::from(risk.score());
    }

    if !records.is_empty() {
        stats.average_score = score_sum as f64 / records.len() as f64;
    }

    stats
}

/// The `n` highest-scoring records, ties kept in input order
pub fn top_risks(records: &[Risk], n: usize) -> Vec<&Risk> {
    let mut sorted: Vec<&Risk> = records.iter().collect();
    sorted.sort_by(|a, b| b.score().cmp(&a.score()));
    sorted.truncate(n);
    sorted
}

/// Likelihood × impact grid of record counts
///
/// `cells[l - 1][i - 1]` counts records with likelihood `l` and impact `i`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeatMap {
    cells: [[usize; 5]; 5],
}

impl HeatMap {
    /// Count records into the grid
    pub fn from_records(records: &[Risk]) -> Self {
        let mut map = Self::default();
        for risk in records {
            let severity = risk.severity();
            let l = usize::from(severity.likelihood()) - 1;
            let i = usize::from(severity.impact()) - 1;
            map.cells[l][i] += 1;
        }
        map
    }

    /// Records at a given likelihood and impact; 0 outside 1..=5
    pub fn count(&self, likelihood: u8, impact: u8) -> usize {
        if !(1..=5).contains(&likelihood) || !(1..=5).contains(&impact) {
            return 0;
        }
        self.cells[usize::from(likelihood) - 1][usize::from(impact) - 1]
    }

    /// Rows from likelihood 5 down to 1, as a dashboard draws them
    pub fn rows(&self) -> impl Iterator<Item = (u8, &[usize; 5])> {
        self.cells
            .iter()
            .enumerate()
            .rev()
            .map(|(l, row)| (l as u8 + 1, row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use risklens_domain::Severity;

    fn risk(id: &str, kind: RiskKind, unit: BusinessUnit, likelihood: u8, impact: u8) -> Risk {
        Risk::new(id, kind, id, "", unit, Severity::new(likelihood, impact).unwrap())
    }

    fn register() -> Vec<Risk> {
        vec![
            risk("a", RiskKind::Risk, BusinessUnit::It, 5, 5).with_financial_impact(1_000.0),
            risk("b", RiskKind::Issue, BusinessUnit::It, 3, 5),
            risk("c", RiskKind::Risk, BusinessUnit::Sales, 2, 2).with_financial_impact(250.0),
            risk("d", RiskKind::Issue, BusinessUnit::Finance, 3, 5),
        ]
    }

    #[test]
    fn test_stats() {
        let stats = portfolio_stats(&register());

        assert_eq!(stats.total, 4);
        assert_eq!(stats.critical, 3);
        assert_eq!(stats.issues, 2);
        assert_eq!(stats.financial_exposure, 1_250.0);
        assert_eq!(stats.level_count(RiskLevel::Critical), 1);
        assert_eq!(stats.level_count(RiskLevel::High), 2);
        assert_eq!(stats.level_count(RiskLevel::Low), 1);
        assert_eq!(stats.unit_count(BusinessUnit::It), 2);
        assert_eq!(stats.unit_count(BusinessUnit::Hr), 0);
        assert_eq!(stats.average_score, (25.0 + 15.0 + 4.0 + 15.0) / 4.0);
    }

    #[test]
    fn test_loaded_negative_amount_does_not_offset_exposure() {
        let records: Vec<Risk> = serde_json::from_str(
            r#"[
                {"id": "x", "title": "x", "businessUnit": "IT", "likelihood": 2, "impact": 2,
                 "financialImpact": -50000},
                {"id": "y", "title": "y", "businessUnit": "IT", "likelihood": 2, "impact": 2,
                 "financialImpact": 10000}
            ]"#,
        )
        .unwrap();
        assert_eq!(portfolio_stats(&records).financial_exposure, 10_000.0);
    }

    #[test]
    fn test_empty_stats() {
        let stats = portfolio_stats(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.average_score, 0.0);
    }

    #[test]
    fn test_top_risks_stable() {
        let records = register();
        let ids: Vec<&str> = top_risks(&records, 3).iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert!(top_risks(&records, 0).is_empty());
        assert_eq!(top_risks(&records, 10).len(), 4);
    }

    #[test]
    fn test_heat_map() {
        let map = HeatMap::from_records(&register());
        assert_eq!(map.count(3, 5), 2);
        assert_eq!(map.count(5, 5), 1);
        assert_eq!(map.count(1, 1), 0);
        assert_eq!(map.count(0, 9), 0);

        let first = map.rows().next().unwrap();
        assert_eq!(first.0, 5);
        assert_eq!(first.1[4], 1);
    }
}
