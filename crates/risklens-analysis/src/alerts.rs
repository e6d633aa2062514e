//! Critical-score alerting and escalation
//!
//! This module decides *when* a notification is due. Delivery belongs to the
//! [`RiskNotifier`] implementation supplied by the caller.

use crate::AnalysisError;
use risklens_domain::traits::{Escalation, RiskNotifier};
use risklens_domain::Risk;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tracing::{info, warn};

/// When newly created records trigger a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertPolicy {
    /// Records scoring at or above this are critical
    pub critical_threshold: u8,

    /// Whether critical records are sent to the notifier at all
    pub notify_on_critical: bool,
}

impl Default for AlertPolicy {
    fn default() -> Self {
        Self {
            critical_threshold: 20,
            notify_on_critical: true,
        }
    }
}

impl AlertPolicy {
    /// Whether a record crosses the critical threshold
    pub fn is_critical(&self, risk: &Risk) -> bool {
        risk.score() >= self.critical_threshold
    }
}

/// Notify if a newly created record is critical
///
/// Returns whether the notifier was invoked.
pub fn check_new_risk<N>(
    risk: &Risk,
    policy: &AlertPolicy,
    notifier: &mut N,
) -> Result<bool, AnalysisError>
where
    N: RiskNotifier,
    N::Error: Display,
{
    if !policy.notify_on_critical || !policy.is_critical(risk) {
        return Ok(false);
    }

    notifier.notify_critical(risk).map_err(|e| {
        warn!(risk = %risk.id(), error = %e, "critical notification failed");
        AnalysisError::Notifier(e.to_string())
    })?;

    info!(risk = %risk.id(), score = risk.score(), "critical risk notified");
    Ok(true)
}

/// Forward a user's escalation to the notifier
pub fn escalate<N>(
    risk: &Risk,
    reason: &str,
    escalated_by: &str,
    notifier: &mut N,
) -> Result<Escalation, AnalysisError>
where
    N: RiskNotifier,
    N::Error: Display,
{
    let escalation = Escalation::for_risk(risk, reason, escalated_by);

    notifier.notify_escalation(&escalation).map_err(|e| {
        warn!(risk = %risk.id(), error = %e, "escalation notification failed");
        AnalysisError::Notifier(e.to_string())
    })?;

    info!(risk = %risk.id(), by = escalated_by, "risk escalated");
    Ok(escalation)
}
