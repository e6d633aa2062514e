//! Risk module - the record every analysis reads

use crate::{BusinessUnit, DomainError, RiskLevel, RiskVelocity, Severity};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a risk record; never reused
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskId(String);

impl RiskId {
    /// Generate a fresh UUIDv7-based identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use risklens_domain::RiskId;
    ///
    /// let a = RiskId::generate();
    /// let b = RiskId::generate();
    /// assert_ne!(a, b);
    /// assert_eq!(a.as_str().len(), 36);
    /// ```
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RiskId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RiskId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Whether a record is anticipated or already happening
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskKind {
    /// An anticipated future event
    #[default]
    Risk,
    /// An event that is already occurring
    Issue,
}

impl RiskKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskKind::Risk => "risk",
            RiskKind::Issue => "issue",
        }
    }
}

impl std::str::FromStr for RiskKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "risk" => Ok(RiskKind::Risk),
            "issue" => Ok(RiskKind::Issue),
            _ => Err(DomainError::UnknownKind(s.to_string())),
        }
    }
}

/// Lifecycle status of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    /// Still open
    #[default]
    Active,
    /// Controls are in place
    Mitigated,
    /// No longer tracked
    Closed,
}

/// A risk or issue in the register
///
/// Fields are private so that every edit goes through a method that bumps
/// `updated_at`. The score is derived from [`Severity`] and cannot be set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Risk {
    id: RiskId,

    #[serde(rename = "type", default)]
    kind: RiskKind,

    title: String,

    #[serde(default)]
    description: String,

    business_unit: BusinessUnit,

    #[serde(flatten)]
    severity: Severity,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    expected_date: Option<NaiveDate>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "non_negative_amount"
    )]
    financial_impact: Option<f64>,

    #[serde(default)]
    status: RiskStatus,

    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,

    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

/// Floors a loaded amount at zero, the same as [`Risk::with_financial_impact`]
fn non_negative_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.map(|amount| amount.max(0.0)))
}

impl Risk {
    /// Create a new active record stamped with the current time
    pub fn new(
        id: impl Into<RiskId>,
        kind: RiskKind,
        title: impl Into<String>,
        description: impl Into<String>,
        business_unit: BusinessUnit,
        severity: Severity,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            description: description.into(),
            business_unit,
            severity,
            expected_date: None,
            financial_impact: None,
            status: RiskStatus::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the expected date
    pub fn with_expected_date(mut self, date: NaiveDate) -> Self {
        self.expected_date = Some(date);
        self
    }

    /// Set the estimated financial impact; negative amounts are floored at zero
    pub fn with_financial_impact(mut self, amount: f64) -> Self {
        self.financial_impact = Some(amount.max(0.0));
        self
    }

    /// Set the lifecycle status
    pub fn with_status(mut self, status: RiskStatus) -> Self {
        self.status = status;
        self
    }

    /// Override creation and modification timestamps
    pub fn with_created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = at;
        self.updated_at = at;
        self
    }

    /// Identifier
    pub fn id(&self) -> &RiskId {
        &self.id
    }

    /// Risk or issue
    pub fn kind(&self) -> RiskKind {
        self.kind
    }

    /// Short label
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Free-text description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Title and description joined by a space, the input to text analysis
    pub fn text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }

    /// Owning business unit
    pub fn business_unit(&self) -> BusinessUnit {
        self.business_unit
    }

    /// Likelihood and impact
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Likelihood × impact
    pub fn score(&self) -> u8 {
        self.severity.score()
    }

    /// Display band
    pub fn level(&self) -> RiskLevel {
        self.severity.level()
    }

    /// Trend estimate
    pub fn velocity(&self) -> RiskVelocity {
        RiskVelocity::from_score(self.score())
    }

    /// Expected calendar date, if known
    pub fn expected_date(&self) -> Option<NaiveDate> {
        self.expected_date
    }

    /// Estimated financial impact, if known
    pub fn financial_impact(&self) -> Option<f64> {
        self.financial_impact
    }

    /// Lifecycle status
    pub fn status(&self) -> RiskStatus {
        self.status
    }

    /// Creation timestamp
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last modification timestamp
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace likelihood and impact; the score follows automatically
    pub fn set_severity(&mut self, severity: Severity) {
        self.severity = severity;
        self.touch();
    }

    /// Replace title and description
    pub fn set_text(&mut self, title: impl Into<String>, description: impl Into<String>) {
        self.title = title.into();
        self.description = description.into();
        self.touch();
    }

    /// Change lifecycle status
    pub fn set_status(&mut self, status: RiskStatus) {
        self.status = status;
        self.touch();
    }

    /// Change or clear the expected date
    pub fn set_expected_date(&mut self, date: Option<NaiveDate>) {
        self.expected_date = date;
        self.touch();
    }

    fn touch(&mut self) {
        // Never move backwards, even if the wall clock does
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Risk {
        Risk::new(
            "R-001",
            RiskKind::Issue,
            "Server outage",
            "Primary database cluster unreachable",
            BusinessUnit::It,
            Severity::new(4, 5).unwrap(),
        )
    }

    #[test]
    fn test_score_follows_severity_edits() {
        let mut risk = sample();
        assert_eq!(risk.score(), 20);

        risk.set_severity(Severity::new(2, 3).unwrap());
        assert_eq!(risk.score(), 6);
        assert_eq!(risk.level(), RiskLevel::Low);
    }

    #[test]
    fn test_edit_bumps_updated_at() {
        let past = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let mut risk = sample().with_created_at(past);
        assert_eq!(risk.updated_at(), past);

        risk.set_status(RiskStatus::Mitigated);
        assert!(risk.updated_at() > past);
        assert_eq!(risk.created_at(), past);
    }

    #[test]
    fn test_text_joins_title_and_description() {
        assert_eq!(sample().text(), "Server outage Primary database cluster unreachable");
    }

    #[test]
    fn test_negative_financial_impact_is_floored() {
        let risk = sample().with_financial_impact(-10.0);
        assert_eq!(risk.financial_impact(), Some(0.0));
    }

    #[test]
    fn test_deserialize_dashboard_json() {
        let json = r#"{
            "id": "R-042",
            "type": "risk",
            "title": "Vendor delay",
            "description": "Chip supplier may slip",
            "businessUnit": "Operations",
            "likelihood": 3,
            "impact": 4,
            "score": 12,
            "expectedDate": "2025-03-15",
            "financialImpact": 50000,
            "status": "active",
            "createdAt": "2025-01-02T03:04:05Z",
            "updatedAt": "2025-01-02T03:04:05Z"
        }"#;

        let risk: Risk = serde_json::from_str(json).unwrap();
        assert_eq!(risk.id().as_str(), "R-042");
        assert_eq!(risk.business_unit(), BusinessUnit::Operations);
        assert_eq!(risk.score(), 12);
        assert_eq!(risk.expected_date(), NaiveDate::from_ymd_opt(2025, 3, 15));
        assert_eq!(risk.financial_impact(), Some(50000.0));
    }

    #[test]
    fn test_deserialize_floors_negative_financial_impact() {
        let json = r#"{
            "id": "R-044",
            "title": "Refund owed",
            "businessUnit": "Finance",
            "likelihood": 2,
            "impact": 3,
            "financialImpact": -50000
        }"#;

        let risk: Risk = serde_json::from_str(json).unwrap();
        assert_eq!(risk.financial_impact(), Some(0.0));

        let absent: Risk = serde_json::from_str(
            r#"{"id": "R-045", "title": "t", "businessUnit": "HR", "likelihood": 1, "impact": 1}"#,
        )
        .unwrap();
        assert_eq!(absent.financial_impact(), None);

        let null: Risk = serde_json::from_str(
            r#"{"id": "R-046", "title": "t", "businessUnit": "HR", "likelihood": 1, "impact": 1,
                "financialImpact": null}"#,
        )
        .unwrap();
        assert_eq!(null.financial_impact(), None);
    }

    #[test]
    fn test_deserialize_rejects_forged_score() {
        let json = r#"{
            "id": "R-043",
            "title": "Forged",
            "businessUnit": "Sales",
            "likelihood": 2,
            "impact": 2,
            "score": 25
        }"#;

        assert!(serde_json::from_str::<Risk>(json).is_err());
    }

    #[test]
    fn test_serialize_round_trips_score() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["score"], 20);
        assert_eq!(json["type"], "issue");
        assert_eq!(json["businessUnit"], "IT");
    }
}
