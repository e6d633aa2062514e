//! Severity module - likelihood, impact and the score derived from them

use crate::DomainError;
use serde::{Deserialize, Serialize};

/// Lowest value on the likelihood and impact scales
pub const MIN_FACTOR: u8 = 1;

/// Highest value on the likelihood and impact scales
pub const MAX_FACTOR: u8 = 5;

/// Highest achievable score (5 × 5)
pub const MAX_SCORE: u8 = MAX_FACTOR * MAX_FACTOR;

/// Likelihood and impact of a risk, each on a 1-5 scale
///
/// The score is always computed as `likelihood × impact`; it is never stored,
/// so it cannot drift from its factors.
///
/// # Examples
///
/// ```
/// use risklens_domain::Severity;
///
/// let severity = Severity::new(4, 5).unwrap();
/// assert_eq!(severity.score(), 20);
/// assert!(Severity::new(0, 3).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SeverityRepr", into = "SeverityRepr")]
pub struct Severity {
    likelihood: u8,
    impact: u8,
}

impl Severity {
    /// Create a severity, rejecting factors outside 1-5
    pub fn new(likelihood: u8, impact: u8) -> Result<Self, DomainError> {
        check_factor("likelihood", likelihood)?;
        check_factor("impact", impact)?;
        Ok(Self { likelihood, impact })
    }

    /// Create a severity by clamping both factors into 1-5
    pub fn clamped(likelihood: i32, impact: i32) -> Self {
        let clamp = |v: i32| v.clamp(MIN_FACTOR as i32, MAX_FACTOR as i32) as u8;
        Self {
            likelihood: clamp(likelihood),
            impact: clamp(impact),
        }
    }

    /// Likelihood factor (1-5)
    pub fn likelihood(&self) -> u8 {
        self.likelihood
    }

    /// Impact factor (1-5)
    pub fn impact(&self) -> u8 {
        self.impact
    }

    /// Score in 1-25
    pub fn score(&self) -> u8 {
        self.likelihood * self.impact
    }

    /// Display band for this score
    pub fn level(&self) -> RiskLevel {
        RiskLevel::from_score(self.score())
    }
}

fn check_factor(field: &'static str, value: u8) -> Result<(), DomainError> {
    if (MIN_FACTOR..=MAX_FACTOR).contains(&value) {
        Ok(())
    } else {
        Err(DomainError::OutOfRange { field, value })
    }
}

/// Serialized form; carries the derived score for consumers of the JSON
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct SeverityRepr {
    likelihood: u8,
    impact: u8,
    #[serde(default)]
    score: Option<u8>,
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = DomainError;

    fn try_from(repr: SeverityRepr) -> Result<Self, Self::Error> {
        let severity = Severity::new(repr.likelihood, repr.impact)?;
        match repr.score {
            Some(score) if score != severity.score() => Err(DomainError::ScoreMismatch {
                likelihood: repr.likelihood,
                impact: repr.impact,
                score,
            }),
            _ => Ok(severity),
        }
    }
}

impl From<Severity> for SeverityRepr {
    fn from(severity: Severity) -> Self {
        Self {
            likelihood: severity.likelihood,
            impact: severity.impact,
            score: Some(severity.score()),
        }
    }
}

/// Display band derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 7
    Low,
    /// Score 7-12
    Medium,
    /// Score 13-20
    High,
    /// Score 21 and above
    Critical,
}

impl RiskLevel {
    /// Band a raw score
    pub fn from_score(score: u8) -> Self {
        match score {
            21.. => RiskLevel::Critical,
            13.. => RiskLevel::High,
            7.. => RiskLevel::Medium,
            _ => RiskLevel::Low,
        }
    }

    /// Get the level name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
            RiskLevel::Critical => "Critical",
        }
    }
}

/// Coarse trend estimate for a risk
///
/// There is no score history yet, so the trend is read off the current score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskVelocity {
    /// Score 20 and above
    Increasing,
    /// Score 15-19
    Stable,
    /// Score below 15
    Decreasing,
}

impl RiskVelocity {
    /// Estimate from a score
    pub fn from_score(score: u8) -> Self {
        match score {
            20.. => RiskVelocity::Increasing,
            15.. => RiskVelocity::Stable,
            _ => RiskVelocity::Decreasing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_out_of_range() {
        assert_eq!(
            Severity::new(6, 1),
            Err(DomainError::OutOfRange { field: "likelihood", value: 6 })
        );
        assert_eq!(
            Severity::new(1, 0),
            Err(DomainError::OutOfRange { field: "impact", value: 0 })
        );
    }

    #[test]
    fn test_clamped() {
        let severity = Severity::clamped(7, -2);
        assert_eq!(severity.likelihood(), 5);
        assert_eq!(severity.impact(), 1);
    }

    #[test]
    fn test_level_bands() {
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(21), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(20), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(13), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(12), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(7), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(6), RiskLevel::Low);
    }

    #[test]
    fn test_velocity() {
        assert_eq!(RiskVelocity::from_score(20), RiskVelocity::Increasing);
        assert_eq!(RiskVelocity::from_score(16), RiskVelocity::Stable);
        assert_eq!(RiskVelocity::from_score(12), RiskVelocity::Decreasing);
    }

    #[test]
    fn test_serde_includes_score() {
        let json = serde_json::to_string(&Severity::new(3, 4).unwrap()).unwrap();
        assert!(json.contains("\"score\":12"));
    }

    #[test]
    fn test_serde_rejects_inconsistent_score() {
        let err = serde_json::from_str::<Severity>(r#"{"likelihood":3,"impact":4,"score":15}"#);
        assert!(err.is_err());

        let ok: Severity = serde_json::from_str(r#"{"likelihood":3,"impact":4}"#).unwrap();
        assert_eq!(ok.score(), 12);
    }
}
