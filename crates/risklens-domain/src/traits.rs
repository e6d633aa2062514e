//! Trait definitions for external collaborators
//!
//! Delivery channels (email, LINE) live outside the core. The analysis layer
//! only decides *when* to notify and hands the record to an implementation of
//! these traits.

use crate::{Risk, RiskId};
use chrono::{DateTime, Utc};

/// A user's request to escalate a record
#[derive(Debug, Clone, PartialEq)]
pub struct Escalation {
    /// Record being escalated
    pub risk_id: RiskId,

    /// Record title at the time of escalation
    pub title: String,

    /// Score at the time of escalation
    pub score: u8,

    /// Free-text reason supplied by the user
    pub reason: String,

    /// Who escalated
    pub escalated_by: String,

    /// When the escalation was requested
    pub escalated_at: DateTime<Utc>,
}

impl Escalation {
    /// Snapshot a record into an escalation request
    pub fn for_risk(risk: &Risk, reason: impl Into<String>, escalated_by: impl Into<String>) -> Self {
        Self {
            risk_id: risk.id().clone(),
            title: risk.title().to_string(),
            score: risk.score(),
            reason: reason.into(),
            escalated_by: escalated_by.into(),
            escalated_at: Utc::now(),
        }
    }
}

/// Outbound notification seam
///
/// Implemented by whatever owns message delivery.
pub trait RiskNotifier {
    /// Error type for delivery failures
    type Error;

    /// A newly created record crossed the critical threshold
    fn notify_critical(&mut self, risk: &Risk) -> Result<(), Self::Error>;

    /// A user escalated a record
    fn notify_escalation(&mut self, escalation: &Escalation) -> Result<(), Self::Error>;
}
