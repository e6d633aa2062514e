//! Raw and typed answers
//!
//! A [`RawAnswer`] is what a form or chat front end submits. It is parsed
//! against its [`Question`] into an [`Answer`], which has one variant per
//! question so that the statement fold can match exhaustively.

use crate::question::{Question, QuestionId, QuestionKind};
use crate::InterviewError;
use serde::{Deserialize, Serialize};

/// An answer as submitted, before it is checked against its question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum RawAnswer {
    /// One option value
    Choice(String),
    /// Several option values
    Choices(Vec<String>),
    /// Free text
    Text(String),
    /// A number
    Number(f64),
}

impl RawAnswer {
    fn shape(&self) -> QuestionKind {
        match self {
            RawAnswer::Choice(_) => QuestionKind::SingleChoice,
            RawAnswer::Choices(_) => QuestionKind::MultiChoice,
            RawAnswer::Text(_) => QuestionKind::FreeText,
            RawAnswer::Number(_) => QuestionKind::Numeric,
        }
    }
}

macro_rules! choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $( $(#[$vmeta:meta])* $variant:ident => $value:literal ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* #[serde(rename = $value)] $variant ),+
        }

        impl $name {
            /// The option value this variant was parsed from
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $value ),+
                }
            }

            fn from_value(value: &str) -> Option<Self> {
                match value {
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }
        }
    };
}

choice_enum! {
    /// How late a delivery is
    DelayDuration {
        /// 1-3 days
        Minor => "1-3",
        /// 4-7 days
        Moderate => "4-7",
        /// 8-14 days
        Major => "8-14",
        /// 15 days or more
        Critical => "15+",
    }
}

choice_enum! {
    /// Part of the business a delay touches
    AffectedArea {
        /// Production line
        Production => "production",
        /// Customer delivery
        Delivery => "delivery",
        /// Revenue
        Revenue => "revenue",
        /// Reputation
        Reputation => "reputation",
        /// Other contracts
        OtherContracts => "other_contracts",
    }
}

choice_enum! {
    /// State of the response plan
    MitigationStatus {
        /// No plan
        None => "none",
        /// Planned, not started
        Planned => "planned",
        /// In progress
        Active => "active",
        /// Done
        Resolved => "resolved",
    }
}

choice_enum! {
    /// Which kind of system is under load
    ServerType {
        /// Customer-facing
        Production => "production",
        /// Staff-facing
        Internal => "internal",
        /// Backup or disaster recovery
        Backup => "backup",
    }
}

choice_enum! {
    /// Current utilisation band
    UsageBand {
        /// 70-80%
        Elevated => "70-80",
        /// 80-90%
        High => "80-90",
        /// 90-95%
        VeryHigh => "90-95",
        /// Above 95%
        Saturated => "95+",
    }
}

choice_enum! {
    /// Whether capacity can be added
    ScalingPlan {
        /// Auto-scaling in place
        Auto => "auto",
        /// Manual scaling planned
        Manual => "manual",
        /// Waiting for budget
        BudgetPending => "budget_pending",
        /// No plan
        None => "none",
    }
}

choice_enum! {
    /// Three-level magnitude used by the client and HR flows
    ImpactBand {
        /// Small
        Low => "low",
        /// Moderate
        Medium => "medium",
        /// Large
        High => "high",
    }
}

choice_enum! {
    /// State of a client relationship
    RelationshipStatus {
        /// Healthy
        Good => "good",
        /// Under strain
        Strained => "strained",
        /// At risk of cancellation
        Critical => "critical",
    }
}

choice_enum! {
    /// How a vacant position gets filled
    ReplacementPlan {
        /// Covered internally
        Internal => "internal",
        /// Recruiting
        Recruiting => "recruiting",
        /// Hard to fill
        Difficult => "difficult",
    }
}

/// A validated answer to one question
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "question", content = "answer", rename_all = "snake_case")]
pub enum Answer {
    /// Vendor name
    VendorName(String),
    /// Delay band
    DelayDuration(DelayDuration),
    /// Affected areas, deduplicated in submission order
    AffectedAreas(Vec<AffectedArea>),
    /// Response plan state
    Mitigation(MitigationStatus),
    /// System kind
    ServerType(ServerType),
    /// Utilisation band
    CurrentUsage(UsageBand),
    /// Scaling plan
    ScalingPlan(ScalingPlan),
    /// Client or project
    ClientName(String),
    /// Contract value band
    ContractImpact(ImpactBand),
    /// Relationship state
    RelationshipStatus(RelationshipStatus),
    /// Position
    Position(String),
    /// Work impact band
    ImpactLevel(ImpactBand),
    /// Replacement plan
    ReplacementPlan(ReplacementPlan),
    /// Main area of impact
    #[serde(rename = "impact_desc")]
    ImpactDescription(String),
    /// Likelihood on 1-5
    #[serde(rename = "likelihood_est")]
    LikelihoodEstimate(u8),
    /// Severity on 1-5
    Severity(u8),
    /// Money at stake
    FinancialImpact(f64),
}

impl Answer {
    /// The question this answers
    pub fn question_id(&self) -> QuestionId {
        match self {
            Answer::VendorName(_) => QuestionId::VendorName,
            Answer::DelayDuration(_) => QuestionId::DelayDuration,
            Answer::AffectedAreas(_) => QuestionId::AffectedAreas,
            Answer::Mitigation(_) => QuestionId::Mitigation,
            Answer::ServerType(_) => QuestionId::ServerType,
            Answer::CurrentUsage(_) => QuestionId::CurrentUsage,
            Answer::ScalingPlan(_) => QuestionId::ScalingPlan,
            Answer::ClientName(_) => QuestionId::ClientName,
            Answer::ContractImpact(_) => QuestionId::ContractImpact,
            Answer::RelationshipStatus(_) => QuestionId::RelationshipStatus,
            Answer::Position(_) => QuestionId::Position,
            Answer::ImpactLevel(_) => QuestionId::ImpactLevel,
            Answer::ReplacementPlan(_) => QuestionId::ReplacementPlan,
            Answer::ImpactDescription(_) => QuestionId::ImpactDescription,
            Answer::LikelihoodEstimate(_) => QuestionId::LikelihoodEstimate,
            Answer::Severity(_) => QuestionId::Severity,
            Answer::FinancialImpact(_) => QuestionId::FinancialImpact,
        }
    }

    /// Check a raw answer against its question
    ///
    /// # Examples
    ///
    /// ```
    /// use risklens_interview::{Answer, Flow, MitigationStatus, RawAnswer};
    ///
    /// let question = &Flow::VendorDelay.questions()[3];
    /// let answer = Answer::parse(question, RawAnswer::Choice("active".into())).unwrap();
    /// assert_eq!(answer, Answer::Mitigation(MitigationStatus::Active));
    ///
    /// assert!(Answer::parse(question, RawAnswer::Text("active".into())).is_err());
    /// ```
    pub fn parse(question: &Question, raw: RawAnswer) -> Result<Self, InterviewError> {
        let qid = question.id.as_str();
        if raw.shape() != question.kind {
            return Err(InterviewError::ShapeMismatch {
                question: qid,
                expected: question.kind.expects(),
            });
        }

        match raw {
            RawAnswer::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    return Err(InterviewError::InvalidValue {
                        question: qid,
                        reason: "answer is empty".to_string(),
                    });
                }
                text_answer(question.id, text.to_string())
            }
            RawAnswer::Number(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(InterviewError::InvalidValue {
                        question: qid,
                        reason: format!("{} is not a non-negative amount", value),
                    });
                }
                number_answer(question.id, value)
            }
            RawAnswer::Choice(value) => {
                if !question.offers(&value) {
                    return Err(InterviewError::UnknownOption { question: qid, value });
                }
                choice_answer(question.id, &value)
            }
            RawAnswer::Choices(values) => {
                let mut areas = Vec::new();
                for value in values {
                    if !question.offers(&value) {
                        return Err(InterviewError::UnknownOption { question: qid, value });
                    }
                    let area = AffectedArea::from_value(&value)
                        .ok_or_else(|| unsupported(question.id))?;
                    if !areas.contains(&area) {
                        areas.push(area);
                    }
                }
                match question.id {
                    QuestionId::AffectedAreas => Ok(Answer::AffectedAreas(areas)),
                    other => Err(unsupported(other)),
                }
            }
        }
    }
}

fn unsupported(id: QuestionId) -> InterviewError {
    InterviewError::InvalidValue {
        question: id.as_str(),
        reason: "question does not accept this answer".to_string(),
    }
}

fn text_answer(id: QuestionId, text: String) -> Result<Answer, InterviewError> {
    match id {
        QuestionId::VendorName => Ok(Answer::VendorName(text)),
        QuestionId::ClientName => Ok(Answer::ClientName(text)),
        QuestionId::Position => Ok(Answer::Position(text)),
        QuestionId::ImpactDescription => Ok(Answer::ImpactDescription(text)),
        other => Err(unsupported(other)),
    }
}

fn number_answer(id: QuestionId, value: f64) -> Result<Answer, InterviewError> {
    match id {
        QuestionId::FinancialImpact => Ok(Answer::FinancialImpact(value)),
        other => Err(unsupported(other)),
    }
}

fn choice_answer(id: QuestionId, value: &str) -> Result<Answer, InterviewError> {
    let parsed = match id {
        QuestionId::DelayDuration => DelayDuration::from_value(value).map(Answer::DelayDuration),
        QuestionId::Mitigation => MitigationStatus::from_value(value).map(Answer::Mitigation),
        QuestionId::ServerType => ServerType::from_value(value).map(Answer::ServerType),
        QuestionId::CurrentUsage => UsageBand::from_value(value).map(Answer::CurrentUsage),
        QuestionId::ScalingPlan => ScalingPlan::from_value(value).map(Answer::ScalingPlan),
        QuestionId::ContractImpact => ImpactBand::from_value(value).map(Answer::ContractImpact),
        QuestionId::RelationshipStatus => {
            RelationshipStatus::from_value(value).map(Answer::RelationshipStatus)
        }
        QuestionId::ImpactLevel => ImpactBand::from_value(value).map(Answer::ImpactLevel),
        QuestionId::ReplacementPlan => ReplacementPlan::from_value(value).map(Answer::ReplacementPlan),
        QuestionId::LikelihoodEstimate => scale_value(value).map(Answer::LikelihoodEstimate),
        QuestionId::Severity => scale_value(value).map(Answer::Severity),
        _ => None,
    };
    parsed.ok_or_else(|| unsupported(id))
}

fn scale_value(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|v| (1..=5).contains(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Flow;

    fn question(flow: Flow, id: QuestionId) -> &'static Question {
        flow.questions().iter().find(|q| q.id == id).unwrap()
    }

    #[test]
    fn test_free_text() {
        let q = question(Flow::VendorDelay, QuestionId::VendorName);
        assert_eq!(
            Answer::parse(q, RawAnswer::Text("  Siam Steel ".into())).unwrap(),
            Answer::VendorName("Siam Steel".into())
        );
        assert!(matches!(
            Answer::parse(q, RawAnswer::Text("   ".into())),
            Err(InterviewError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_option() {
        let q = question(Flow::VendorDelay, QuestionId::DelayDuration);
        let err = Answer::parse(q, RawAnswer::Choice("30".into())).unwrap_err();
        assert_eq!(
            err,
            InterviewError::UnknownOption {
                question: "delay_duration",
                value: "30".into()
            }
        );
    }

    #[test]
    fn test_shape_mismatch() {
        let q = question(Flow::VendorDelay, QuestionId::AffectedAreas);
        let err = Answer::parse(q, RawAnswer::Choice("revenue".into())).unwrap_err();
        assert!(matches!(err, InterviewError::ShapeMismatch { expected: "a list of choices", .. }));
    }

    #[test]
    fn test_multi_choice_dedups() {
        let q = question(Flow::VendorDelay, QuestionId::AffectedAreas);
        let answer = Answer::parse(
            q,
            RawAnswer::Choices(vec!["revenue".into(), "production".into(), "revenue".into()]),
        )
        .unwrap();
        assert_eq!(
            answer,
            Answer::AffectedAreas(vec![AffectedArea::Revenue, AffectedArea::Production])
        );
    }

    #[test]
    fn test_scale_choices() {
        let q = question(Flow::Generic, QuestionId::LikelihoodEstimate);
        assert_eq!(
            Answer::parse(q, RawAnswer::Choice("5".into())).unwrap(),
            Answer::LikelihoodEstimate(5)
        );
    }

    #[test]
    fn test_numeric() {
        let q = question(Flow::Generic, QuestionId::FinancialImpact);
        assert_eq!(
            Answer::parse(q, RawAnswer::Number(250_000.0)).unwrap(),
            Answer::FinancialImpact(250_000.0)
        );
        assert!(Answer::parse(q, RawAnswer::Number(-1.0)).is_err());
        assert!(Answer::parse(q, RawAnswer::Number(f64::NAN)).is_err());
    }

    #[test]
    fn test_every_option_parses() {
        for flow in [
            Flow::VendorDelay,
            Flow::ServerCapacity,
            Flow::ClientRisk,
            Flow::HrRisk,
            Flow::Generic,
        ] {
            for q in flow.questions() {
                for option in q.options {
                    let raw = match q.kind {
                        QuestionKind::MultiChoice => RawAnswer::Choices(vec![option.value.to_string()]),
                        _ => RawAnswer::Choice(option.value.to_string()),
                    };
                    let answer = Answer::parse(q, raw).unwrap();
                    assert_eq!(answer.question_id(), q.id);
                }
            }
        }
    }

    #[test]
    fn test_raw_answer_json() {
        let raw: RawAnswer = serde_json::from_str(r#"{"type": "choices", "value": ["delivery"]}"#).unwrap();
        assert_eq!(raw, RawAnswer::Choices(vec!["delivery".into()]));

        let raw: RawAnswer = serde_json::from_str(r#"{"type": "number", "value": 12.5}"#).unwrap();
        assert_eq!(raw, RawAnswer::Number(12.5));
    }
}
