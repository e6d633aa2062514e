//! Alert gate and escalation commands.

use crate::cli::{AlertsArgs, EscalateArgs};
use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::Formatter;
use crate::records::{find_record, load_records};
use risklens_analysis::Analyzer;
use risklens_domain::traits::{Escalation, RiskNotifier};
use risklens_domain::{Risk, RiskId};
use std::convert::Infallible;

/// Notifier that writes to stdout instead of delivering messages.
pub struct ConsoleNotifier<'a> {
    formatter: &'a Formatter,
    critical: Vec<RiskId>,
    escalations: Vec<Escalation>,
}

impl<'a> ConsoleNotifier<'a> {
    /// Create a notifier printing through the given formatter.
    pub fn new(formatter: &'a Formatter) -> Self {
        Self {
            formatter,
            critical: Vec::new(),
            escalations: Vec::new(),
        }
    }

    /// Records that crossed the critical threshold.
    pub fn critical(&self) -> &[RiskId] {
        &self.critical
    }

    /// Escalations handed over.
    pub fn escalations(&self) -> &[Escalation] {
        &self.escalations
    }
}

impl RiskNotifier for ConsoleNotifier<'_> {
    type Error = Infallible;

    fn notify_critical(&mut self, risk: &Risk) -> std::result::Result<(), Self::Error> {
        if self.formatter.format() == OutputFormat::Table {
            println!(
                "{}",
                self.formatter.error(&format!(
                    "Critical: '{}' scores {} ({})",
                    risk.title(),
                    risk.score(),
                    risk.business_unit()
                ))
            );
        }
        self.critical.push(risk.id().clone());
        Ok(())
    }

    fn notify_escalation(&mut self, escalation: &Escalation) -> std::result::Result<(), Self::Error> {
        if self.formatter.format() == OutputFormat::Table {
            println!("{}", self.formatter.escalation(escalation));
        }
        self.escalations.push(escalation.clone());
        Ok(())
    }
}

/// Execute the alerts command.
pub async fn execute_alerts(args: AlertsArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.records)?;
    let mut notifier = ConsoleNotifier::new(formatter);

    for risk in &records {
        analyzer.check_new_risk(risk, &mut notifier)?;
    }

    let fired: Vec<&Risk> = notifier
        .critical()
        .iter()
        .filter_map(|id| records.iter().find(|r| r.id() == id))
        .collect();

    match formatter.format() {
        OutputFormat::Table if fired.is_empty() => println!(
            "{}",
            formatter.success(&format!(
                "No record at or above {}",
                analyzer.alert_policy().critical_threshold
            ))
        ),
        OutputFormat::Table => println!(
            "{}",
            formatter.warning(&format!("{} of {} record(s) need attention", fired.len(), records.len()))
        ),
        _ => println!("{}", formatter.format_records(&fired)?),
    }
    Ok(())
}

/// Execute the escalate command.
pub async fn execute_escalate(
    args: EscalateArgs,
    analyzer: &Analyzer,
    default_by: &str,
    formatter: &Formatter,
) -> Result<()> {
    let records = load_records(&args.records)?;
    let risk = find_record(&records, &args.id)?;
    let by = args.by.as_deref().unwrap_or(default_by);

    let mut notifier = ConsoleNotifier::new(formatter);
    let escalation = analyzer.escalate(risk, &args.reason, by, &mut notifier)?;

    match formatter.format() {
        OutputFormat::Table => {}
        OutputFormat::Quiet => println!("{}", escalation.risk_id),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "riskId": escalation.risk_id,
                "title": escalation.title,
                "score": escalation.score,
                "reason": escalation.reason,
                "escalatedBy": escalation.escalated_by,
                "escalatedAt": escalation.escalated_at.to_rfc3339(),
            }))?
        ),
    }
    Ok(())
}
