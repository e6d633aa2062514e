//! Flow selection from the user's opening statement

use crate::question::{self, Question};
use risklens_domain::RiskKind;
use serde::{Deserialize, Serialize};

/// A scripted line of questioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    /// Supplier or delivery delays
    VendorDelay,
    /// Server load and outages
    ServerCapacity,
    /// Client contracts and relationships
    ClientRisk,
    /// Staffing and turnover
    HrRisk,
    /// Anything else
    Generic,
}

impl Flow {
    /// Get the flow name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Flow::VendorDelay => "vendor_delay",
            Flow::ServerCapacity => "server_capacity",
            Flow::ClientRisk => "client_risk",
            Flow::HrRisk => "hr_risk",
            Flow::Generic => "generic",
        }
    }

    /// The questions asked in this flow, in order
    pub fn questions(&self) -> &'static [Question] {
        match self {
            Flow::VendorDelay => question::VENDOR_DELAY,
            Flow::ServerCapacity => question::SERVER_CAPACITY,
            Flow::ClientRisk => question::CLIENT_RISK,
            Flow::HrRisk => question::HR_RISK,
            Flow::Generic => question::GENERIC,
        }
    }
}

impl std::fmt::Display for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The chosen flow and what it implies about the record
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FlowSelection {
    /// Selected flow
    pub flow: Flow,

    /// How well the opening statement matched
    pub confidence: f64,

    /// Whether the record is more likely a risk or a live issue
    pub suggested_kind: RiskKind,
}

const ROUTES: &[(&[&str], Flow, f64, RiskKind)] = &[
    (&["vendor", "supplier", "ส่งของ"], Flow::VendorDelay, 0.9, RiskKind::Risk),
    (&["server", "ระบบล่ม", "capacity"], Flow::ServerCapacity, 0.85, RiskKind::Issue),
    (&["ลูกค้า", "client", "contract", "สัญญา"], Flow::ClientRisk, 0.8, RiskKind::Risk),
    (&["พนักงาน", "ลาออก", "turnover", "resign", "staff"], Flow::HrRisk, 0.85, RiskKind::Risk),
];

/// Route an opening statement to a flow
///
/// Routes are tried in a fixed order and the first keyword hit wins, so a
/// statement mentioning both a vendor and a server goes to the vendor flow.
///
/// # Examples
///
/// ```
/// use risklens_interview::{select_flow, Flow};
///
/// assert_eq!(select_flow("Supplier in Chonburi is late again").flow, Flow::VendorDelay);
/// assert_eq!(select_flow("Something feels off").flow, Flow::Generic);
/// ```
pub fn select_flow(input: &str) -> FlowSelection {
    let lower = input.to_lowercase();

    let selection = ROUTES
        .iter()
        .find(|(keywords, ..)| keywords.iter().any(|k| lower.contains(k)))
        .map(|&(_, flow, confidence, suggested_kind)| FlowSelection {
            flow,
            confidence,
            suggested_kind,
        })
        .unwrap_or(FlowSelection {
            flow: Flow::Generic,
            confidence: 0.5,
            suggested_kind: RiskKind::Risk,
        });

    tracing::debug!(flow = %selection.flow, confidence = selection.confidence, "interview flow selected");
    selection
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_routes() {
        let server = select_flow("Production SERVER at 95% capacity");
        assert_eq!(server.flow, Flow::ServerCapacity);
        assert_eq!(server.suggested_kind, RiskKind::Issue);
        assert_eq!(server.confidence, 0.85);

        assert_eq!(select_flow("ลูกค้ารายใหญ่อาจยกเลิกสัญญา").flow, Flow::ClientRisk);
        assert_eq!(select_flow("พนักงานลาออกหลายคน").flow, Flow::HrRisk);
        assert_eq!(select_flow("ผู้ขายส่งของช้า").flow, Flow::VendorDelay);
    }

    #[test]
    fn test_first_route_wins() {
        assert_eq!(select_flow("vendor server migration").flow, Flow::VendorDelay);
    }

    #[test]
    fn test_generic_fallback() {
        let selection = select_flow("");
        assert_eq!(selection.flow, Flow::Generic);
        assert_eq!(selection.confidence, 0.5);
        assert_eq!(selection.suggested_kind, RiskKind::Risk);
    }

    #[test]
    fn test_every_flow_has_questions() {
        for flow in [
            Flow::VendorDelay,
            Flow::ServerCapacity,
            Flow::ClientRisk,
            Flow::HrRisk,
            Flow::Generic,
        ] {
            assert!(!flow.questions().is_empty(), "{} has no questions", flow);
        }
    }
}
