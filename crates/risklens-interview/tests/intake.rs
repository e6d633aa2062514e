//! Integration tests for risklens-interview
//!
//! Full conversations driven the way a form front end would, with answers
//! arriving as JSON.

use risklens_domain::{BusinessUnit, RiskKind};
use risklens_interview::{Flow, Interview, InterviewError, QuestionId, RawAnswer};

fn answer_json(interview: &mut Interview, id: QuestionId, json: &str) -> Result<(), InterviewError> {
    let raw: RawAnswer = serde_json::from_str(json).unwrap();
    interview.answer(id, raw).map(|_| ())
}

#[test]
fn test_thai_server_conversation() {
    let mut interview = Interview::start("ระบบล่มบ่อย ลูกค้าร้องเรียน");
    assert_eq!(interview.flow(), Flow::ServerCapacity);
    assert_eq!(interview.selection().suggested_kind, RiskKind::Issue);

    answer_json(&mut interview, QuestionId::ServerType, r#"{"type":"choice","value":"production"}"#).unwrap();
    answer_json(&mut interview, QuestionId::CurrentUsage, r#"{"type":"choice","value":"95+"}"#).unwrap();
    answer_json(&mut interview, QuestionId::ScalingPlan, r#"{"type":"choice","value":"none"}"#).unwrap();
    assert!(interview.is_complete());

    let statement = interview.statement();
    assert_eq!(statement.title, "ระบบล่มบ่อย ลูกค้าร้องเรียน");
    assert_eq!(statement.kind, RiskKind::Issue);
    assert_eq!(statement.severity.score(), 9);
    assert!(statement.description.contains("Usage: 95+%"));
}

#[test]
fn test_generic_conversation_to_record() {
    let mut interview = Interview::start("Regulator may change import quotas");
    assert_eq!(interview.flow(), Flow::Generic);

    answer_json(&mut interview, QuestionId::ImpactDescription, r#"{"type":"text","value":"Raw material cost"}"#).unwrap();
    answer_json(&mut interview, QuestionId::LikelihoodEstimate, r#"{"type":"choice","value":"3"}"#).unwrap();
    answer_json(&mut interview, QuestionId::Severity, r#"{"type":"choice","value":"5"}"#).unwrap();
    answer_json(&mut interview, QuestionId::FinancialImpact, r#"{"type":"number","value":1200000}"#).unwrap();

    let risk = interview.statement().into_risk("gen-1", BusinessUnit::Finance);
    assert_eq!(risk.score(), 15);
    assert_eq!(risk.financial_impact(), Some(1_200_000.0));
    assert_eq!(risk.business_unit(), BusinessUnit::Finance);
    assert!(risk.description().contains("Impact area: Raw material cost"));
}

#[test]
fn test_bad_answers_leave_state_untouched() {
    let mut interview = Interview::start("Key client wants to renegotiate the contract");
    assert_eq!(interview.flow(), Flow::ClientRisk);

    let err = answer_json(&mut interview, QuestionId::ContractImpact, r#"{"type":"number","value":5}"#)
        .unwrap_err();
    assert!(matches!(err, InterviewError::ShapeMismatch { .. }));

    let err = answer_json(&mut interview, QuestionId::Mitigation, r#"{"type":"choice","value":"none"}"#)
        .unwrap_err();
    assert!(matches!(err, InterviewError::UnknownQuestion { .. }));

    assert_eq!(interview.answers().count(), 0);
    assert_eq!(interview.statement().severity.score(), 9);
}

#[test]
fn test_statement_serializes_flat() {
    let mut interview = Interview::start("Staff resign after bonus cut");
    answer_json(&mut interview, QuestionId::ImpactLevel, r#"{"type":"choice","value":"low"}"#).unwrap();

    let json = serde_json::to_value(interview.statement()).unwrap();
    assert_eq!(json["type"], "risk");
    assert_eq!(json["impact"], 2);
    assert_eq!(json["likelihood"], 3);
    assert!(json["financialImpact"].is_null());
}
