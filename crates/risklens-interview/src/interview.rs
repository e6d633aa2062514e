//! Interview state and the risk statement it produces

use crate::answer::{AffectedArea, Answer, ImpactBand, MitigationStatus, RawAnswer};
use crate::flow::{select_flow, Flow, FlowSelection};
use crate::question::{Question, QuestionId};
use crate::InterviewError;
use risklens_domain::{BusinessUnit, Risk, RiskId, RiskKind, Severity};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Baseline likelihood and impact before any answer adjusts them
const BASELINE: i32 = 3;

/// One guided conversation
///
/// Answers are keyed by question, so answering the same question twice
/// replaces the earlier answer.
#[derive(Debug, Clone)]
pub struct Interview {
    original_input: String,
    selection: FlowSelection,
    answers: BTreeMap<QuestionId, Answer>,
    skipped: BTreeSet<QuestionId>,
}

impl Interview {
    /// Start an interview from the user's opening statement
    pub fn start(input: impl Into<String>) -> Self {
        let original_input = input.into();
        let selection = select_flow(&original_input);
        Self {
            original_input,
            selection,
            answers: BTreeMap::new(),
            skipped: BTreeSet::new(),
        }
    }

    /// The opening statement
    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    /// The selected flow
    pub fn flow(&self) -> Flow {
        self.selection.flow
    }

    /// Flow, confidence and suggested kind
    pub fn selection(&self) -> &FlowSelection {
        &self.selection
    }

    /// All questions in the selected flow
    pub fn questions(&self) -> &'static [Question] {
        self.selection.flow.questions()
    }

    /// The first question not yet answered
    pub fn next_question(&self) -> Option<&'static Question> {
        self.questions()
            .iter()
            .find(|q| !self.answers.contains_key(&q.id) && !self.skipped.contains(&q.id))
    }

    /// Answers recorded so far
    pub fn answers(&self) -> impl Iterator<Item = &Answer> {
        self.answers.values()
    }

    /// Record an answer
    pub fn answer(&mut self, id: QuestionId, raw: RawAnswer) -> Result<&Answer, InterviewError> {
        let question = self
            .questions()
            .iter()
            .find(|q| q.id == id)
            .ok_or(InterviewError::UnknownQuestion {
                question: id.as_str(),
                flow: self.selection.flow.as_str(),
            })?;

        let answer = Answer::parse(question, raw)?;
        tracing::debug!(flow = %self.selection.flow, question = %id, "answer recorded");

        self.skipped.remove(&id);
        self.answers.insert(id, answer);
        self.answers
            .get(&id)
            .ok_or(InterviewError::UnknownQuestion {
                question: id.as_str(),
                flow: self.selection.flow.as_str(),
            })
    }

    /// Pass over an optional question without answering it
    pub fn skip(&mut self, id: QuestionId) -> Result<(), InterviewError> {
        let question = self
            .questions()
            .iter()
            .find(|q| q.id == id)
            .ok_or(InterviewError::UnknownQuestion {
                question: id.as_str(),
                flow: self.selection.flow.as_str(),
            })?;
        if !question.is_optional() {
            return Err(InterviewError::NotOptional(id.as_str()));
        }

        self.answers.remove(&id);
        self.skipped.insert(id);
        Ok(())
    }

    /// Whether every question in the flow has an answer or was skipped
    pub fn is_complete(&self) -> bool {
        self.next_question().is_none()
    }

    /// Fold the answers so far into a risk statement
    ///
    /// Can be called before the interview is complete; unanswered
    /// questions simply leave the baseline in place.
    pub fn statement(&self) -> RiskStatement {
        let mut likelihood = BASELINE;
        let mut impact = BASELINE;
        let mut likelihood_override = None;
        let mut severity_override = None;
        let mut financial_impact = None;
        let mut title = None;
        let mut summaries = Vec::new();
        let mut reasons = Vec::new();

        for answer in self.answers.values() {
            match answer {
                Answer::VendorName(name) => {
                    title = Some(format!("{} delivery delay risk", name));
                    summaries.push(format!("Vendor: {}", name));
                }
                Answer::DelayDuration(delay) => {
                    summaries.push(format!("Delay: {} days", delay.as_str()));
                }
                Answer::AffectedAreas(areas) => {
                    if areas.contains(&AffectedArea::Revenue) {
                        impact += 1;
                        reasons.push("affects revenue");
                    }
                    if areas.contains(&AffectedArea::Production) {
                        impact += 1;
                        reasons.push("affects production");
                    }
                    if areas.len() > 2 {
                        impact += 1;
                        reasons.push("affects several areas");
                    }
                    let names: Vec<_> = areas.iter().map(|a| a.as_str()).collect();
                    summaries.push(format!("Affected: {}", names.join(", ")));
                }
                Answer::Mitigation(status) => {
                    match status {
                        MitigationStatus::None => {
                            likelihood += 1;
                            reasons.push("no mitigation in place");
                        }
                        MitigationStatus::Active => {
                            likelihood -= 1;
                            reasons.push("mitigation under way");
                        }
                        MitigationStatus::Planned | MitigationStatus::Resolved => {}
                    }
                    summaries.push(format!("Mitigation: {}", status.as_str()));
                }
                Answer::ServerType(kind) => {
                    summaries.push(format!("System: {}", kind.as_str()));
                }
                Answer::CurrentUsage(band) => {
                    summaries.push(format!("Usage: {}%", band.as_str()));
                }
                Answer::ScalingPlan(plan) => {
                    summaries.push(format!("Scaling: {}", plan.as_str()));
                }
                Answer::ClientName(name) => {
                    title = Some(format!("Client project risk: {}", name));
                    summaries.push(format!("Client: {}", name));
                }
                Answer::ContractImpact(band) => {
                    impact = band_impact(*band, impact);
                    summaries.push(format!("Contract impact: {}", band.as_str()));
                }
                Answer::RelationshipStatus(status) => {
                    summaries.push(format!("Relationship: {}", status.as_str()));
                }
                Answer::Position(position) => {
                    title = Some(format!("Staffing issue: {}", position));
                    summaries.push(format!("Position: {}", position));
                }
                Answer::ImpactLevel(band) => {
                    impact = band_impact(*band, impact);
                    summaries.push(format!("Impact: {}", band.as_str()));
                }
                Answer::ReplacementPlan(plan) => {
                    summaries.push(format!("Replacement: {}", plan.as_str()));
                }
                Answer::ImpactDescription(text) => {
                    summaries.push(format!("Impact area: {}", text));
                }
                Answer::LikelihoodEstimate(value) => {
                    likelihood_override = Some(i32::from(*value));
                }
                Answer::Severity(value) => {
                    severity_override = Some(i32::from(*value));
                }
                Answer::FinancialImpact(amount) => {
                    financial_impact = Some(*amount);
                    summaries.push(format!("Financial impact: {:.0}", amount));
                }
            }
        }

        let severity = Severity::clamped(
            likelihood_override.unwrap_or(likelihood),
            severity_override.unwrap_or(impact),
        );

        let mut description = vec![self.original_input.clone()];
        description.extend(summaries);

        let reasoning = if reasons.is_empty() {
            format!(
                "{} flow, likelihood {} and impact {}",
                self.selection.flow,
                severity.likelihood(),
                severity.impact()
            )
        } else {
            format!(
                "{} flow, likelihood {} and impact {} ({})",
                self.selection.flow,
                severity.likelihood(),
                severity.impact(),
                reasons.join("; ")
            )
        };

        RiskStatement {
            title: title.unwrap_or_else(|| self.original_input.clone()),
            description: description.join(" | "),
            severity,
            kind: self.selection.suggested_kind,
            financial_impact,
            reasoning,
        }
    }
}

fn band_impact(band: ImpactBand, current: i32) -> i32 {
    match band {
        ImpactBand::High => 5,
        ImpactBand::Low => 2,
        ImpactBand::Medium => current,
    }
}

/// Draft record produced by an interview
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskStatement {
    /// Short title
    pub title: String,

    /// Opening statement followed by answer summaries
    pub description: String,

    /// Derived severity
    #[serde(flatten)]
    pub severity: Severity,

    /// Risk or issue
    #[serde(rename = "type")]
    pub kind: RiskKind,

    /// Money at stake, if asked
    pub financial_impact: Option<f64>,

    /// How the severity was reached
    pub reasoning: String,
}

impl RiskStatement {
    /// Turn the statement into a register record
    pub fn into_risk(self, id: impl Into<RiskId>, business_unit: BusinessUnit) -> Risk {
        let risk = Risk::new(
            id,
            self.kind,
            self.title,
            self.description,
            business_unit,
            self.severity,
        );
        match self.financial_impact {
            Some(amount) => risk.with_financial_impact(amount),
            None => risk,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn choice(value: &str) -> RawAnswer {
        RawAnswer::Choice(value.to_string())
    }

    fn text(value: &str) -> RawAnswer {
        RawAnswer::Text(value.to_string())
    }

    #[test]
    fn test_question_order() {
        let mut interview = Interview::start("Our vendor is late");
        assert_eq!(interview.flow(), Flow::VendorDelay);
        assert_eq!(interview.next_question().unwrap().id, QuestionId::VendorName);

        interview.answer(QuestionId::VendorName, text("Siam Steel")).unwrap();
        assert_eq!(interview.next_question().unwrap().id, QuestionId::DelayDuration);
        assert!(!interview.is_complete());
    }

    #[test]
    fn test_rejects_question_from_other_flow() {
        let mut interview = Interview::start("Our vendor is late");
        let err = interview
            .answer(QuestionId::ServerType, choice("production"))
            .unwrap_err();
        assert_eq!(
            err,
            InterviewError::UnknownQuestion {
                question: "server_type",
                flow: "vendor_delay"
            }
        );
    }

    #[test]
    fn test_rejected_answer_is_not_recorded() {
        let mut interview = Interview::start("Our vendor is late");
        assert!(interview.answer(QuestionId::VendorName, choice("x")).is_err());
        assert_eq!(interview.next_question().unwrap().id, QuestionId::VendorName);
    }

    #[test]
    fn test_vendor_statement() {
        let mut interview = Interview::start("Supplier shipment delayed");
        interview.answer(QuestionId::VendorName, text("Siam Steel")).unwrap();
        interview.answer(QuestionId::DelayDuration, choice("8-14")).unwrap();
        interview
            .answer(
                QuestionId::AffectedAreas,
                RawAnswer::Choices(vec!["production".into(), "revenue".into(), "delivery".into()]),
            )
            .unwrap();
        interview.answer(QuestionId::Mitigation, choice("none")).unwrap();
        assert!(interview.is_complete());

        let statement = interview.statement();
        assert_eq!(statement.title, "Siam Steel delivery delay risk");
        // 3 + revenue + production + three areas, clamped
        assert_eq!(statement.severity.impact(), 5);
        assert_eq!(statement.severity.likelihood(), 4);
        assert_eq!(statement.kind, RiskKind::Risk);
        assert!(statement.description.starts_with("Supplier shipment delayed | "));
        assert!(statement.description.contains("Vendor: Siam Steel"));
        assert!(statement.reasoning.contains("no mitigation in place"));
    }

    #[test]
    fn test_active_mitigation_lowers_likelihood() {
        let mut interview = Interview::start("vendor late");
        interview.answer(QuestionId::Mitigation, choice("active")).unwrap();
        let statement = interview.statement();
        assert_eq!(statement.severity.likelihood(), 2);
        assert_eq!(statement.severity.impact(), 3);
    }

    #[test]
    fn test_impact_bands() {
        let mut interview = Interview::start("Client contract at risk");
        assert_eq!(interview.flow(), Flow::ClientRisk);
        interview.answer(QuestionId::ClientName, text("Acme")).unwrap();
        interview.answer(QuestionId::ContractImpact, choice("high")).unwrap();

        let statement = interview.statement();
        assert_eq!(statement.title, "Client project risk: Acme");
        assert_eq!(statement.severity.impact(), 5);

        interview.answer(QuestionId::ContractImpact, choice("low")).unwrap();
        assert_eq!(interview.statement().severity.impact(), 2);
    }

    #[test]
    fn test_skip_optional_amount() {
        let mut interview = Interview::start("Something feels off");
        interview.answer(QuestionId::ImpactDescription, text("Cash flow")).unwrap();
        interview.answer(QuestionId::LikelihoodEstimate, choice("3")).unwrap();
        interview.answer(QuestionId::Severity, choice("5")).unwrap();
        assert_eq!(interview.next_question().unwrap().id, QuestionId::FinancialImpact);

        interview.skip(QuestionId::FinancialImpact).unwrap();
        assert!(interview.next_question().is_none());
        assert!(interview.is_complete());
        assert_eq!(interview.statement().financial_impact, None);

        // A later answer still counts
        interview
            .answer(QuestionId::FinancialImpact, RawAnswer::Number(20_000.0))
            .unwrap();
        assert_eq!(interview.statement().financial_impact, Some(20_000.0));
    }

    #[test]
    fn test_required_questions_cannot_be_skipped() {
        let mut interview = Interview::start("Something feels off");
        assert_eq!(
            interview.skip(QuestionId::Severity),
            Err(InterviewError::NotOptional("severity"))
        );
        assert!(matches!(
            interview.skip(QuestionId::VendorName),
            Err(InterviewError::UnknownQuestion { .. })
        ));
        assert_eq!(interview.next_question().unwrap().id, QuestionId::ImpactDescription);
    }

    #[test]
    fn test_generic_overrides() {
        let mut interview = Interview::start("Something feels off");
        assert_eq!(interview.flow(), Flow::Generic);
        interview.answer(QuestionId::LikelihoodEstimate, choice("1")).unwrap();
        interview.answer(QuestionId::Severity, choice("5")).unwrap();
        interview
            .answer(QuestionId::FinancialImpact, RawAnswer::Number(50_000.0))
            .unwrap();

        let statement = interview.statement();
        assert_eq!(statement.title, "Something feels off");
        assert_eq!(statement.severity.likelihood(), 1);
        assert_eq!(statement.severity.impact(), 5);
        assert_eq!(statement.financial_impact, Some(50_000.0));
    }

    #[test]
    fn test_server_flow_suggests_issue() {
        let interview = Interview::start("server is down again");
        let statement = interview.statement();
        assert_eq!(statement.kind, RiskKind::Issue);
        assert_eq!(statement.description, "server is down again");
    }

    #[test]
    fn test_into_risk() {
        let mut interview = Interview::start("Staff turnover in the warehouse");
        interview.answer(QuestionId::Position, text("Forklift operator")).unwrap();
        interview.answer(QuestionId::ImpactLevel, choice("high")).unwrap();

        let risk = interview.statement().into_risk("hr-1", BusinessUnit::Operations);
        assert_eq!(risk.id().as_str(), "hr-1");
        assert_eq!(risk.title(), "Staffing issue: Forklift operator");
        assert_eq!(risk.score(), 15);
        assert_eq!(risk.financial_impact(), None);
    }
}
