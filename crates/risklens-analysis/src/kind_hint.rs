//! Risk-or-issue suggestion while a record is drafted
//!
//! Past-tense and incident words point to an issue that already happened;
//! hedged and forward-looking words point to a risk.

use risklens_domain::RiskKind;
use serde::Serialize;

const ISSUE_KEYWORDS: &[&str] = &[
    "happened",
    "occurred",
    "broke",
    "failed",
    "is happening",
    "outage",
    "crash",
    "stopped",
    "resigned",
    "breach",
    "overrun",
];

const RISK_KEYWORDS: &[&str] = &[
    "might",
    "could",
    "may",
    "potential",
    "risk of",
    "possible",
    "forecast",
    "future",
    "coming",
    "expecting",
    "threat",
];

/// Suggested kind with a confidence in [0.5, 0.95]
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KindHint {
    /// Suggested kind
    pub kind: RiskKind,

    /// How sure the heuristic is
    pub confidence: f64,

    /// Issue keywords found
    pub issue_hits: usize,

    /// Risk keywords found
    pub risk_hits: usize,
}

/// Suggest whether a draft describes a risk or an issue
///
/// A tie, including no hits at all, falls back to risk at 0.5.
///
/// # Examples
///
/// ```
/// use risklens_analysis::kind_hint::suggest_kind;
/// use risklens_domain::RiskKind;
///
/// let hint = suggest_kind("Payment gateway outage", "Checkout failed for all users");
/// assert_eq!(hint.kind, RiskKind::Issue);
/// assert!(hint.confidence > 0.8);
/// ```
pub fn suggest_kind(title: &str, description: &str) -> KindHint {
    let text = format!("{} {}", title, description).to_lowercase();
    let count = |words: &[&str]| words.iter().filter(|w| text.contains(*w)).count();

    let issue_hits = count(ISSUE_KEYWORDS);
    let risk_hits = count(RISK_KEYWORDS);

    let (kind, confidence) = if issue_hits > risk_hits {
        (RiskKind::Issue, (0.75 + 0.05 * issue_hits as f64).min(0.95))
    } else if risk_hits > issue_hits {
        (RiskKind::Risk, (0.70 + 0.05 * risk_hits as f64).min(0.95))
    } else {
        (RiskKind::Risk, 0.5)
    };

    KindHint {
        kind,
        confidence,
        issue_hits,
        risk_hits,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_majority() {
        let hint = suggest_kind("Database crash", "Service stopped overnight");
        assert_eq!(hint.kind, RiskKind::Issue);
        assert_eq!(hint.issue_hits, 2);
        assert!((hint.confidence - 0.85).abs() < 1e-9);
    }

    #[test]
    fn test_risk_majority() {
        let hint = suggest_kind("Potential supplier exit", "");
        assert_eq!(hint.kind, RiskKind::Risk);
        assert!((hint.confidence - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_tie_defaults_to_risk() {
        let hint = suggest_kind("Office relocation", "");
        assert_eq!(hint.kind, RiskKind::Risk);
        assert_eq!(hint.confidence, 0.5);
    }

    #[test]
    fn test_confidence_capped() {
        let hint = suggest_kind(
            "outage crash breach",
            "it happened, it failed, it stopped, it broke, staff resigned",
        );
        assert_eq!(hint.kind, RiskKind::Issue);
        assert_eq!(hint.confidence, 0.95);
    }
}
