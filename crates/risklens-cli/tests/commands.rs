//! Integration tests for the risklens CLI commands
//!
//! Commands print to stdout; these tests check that they run end to end
//! against a register on disk and fail cleanly on bad input.

use risklens_analysis::Analyzer;
use risklens_cli::cli::{
    CascadesArgs, InterviewArgs, LayoutArgs, NetworkArgs, FilterArg, SentimentArgs, SimilarArgs, UnitArg,
};
use risklens_cli::commands;
use risklens_cli::config::OutputFormat;
use risklens_cli::{CliError, Formatter};
use risklens_layout::LayoutConfig;
use std::fs;
use tempfile::TempDir;

const REGISTER: &str = r#"[
    {"id": "r1", "type": "risk", "title": "ระบบ ERP ล่ม", "description": "ระบบ ERP ล่มทั้งวัน ต้องแก้ไขด่วน",
     "businessUnit": "IT", "likelihood": 4, "impact": 5},
    {"id": "r2", "type": "risk", "title": "ระบบ ERP ล่ม", "description": "ระบบ ERP ล่มทั้งวัน",
     "businessUnit": "IT", "likelihood": 4, "impact": 4, "financialImpact": 500000},
    {"id": "r3", "type": "issue", "title": "Payroll delay", "description": "Bank cut-off missed",
     "businessUnit": "Finance", "likelihood": 2, "impact": 2}
]"#;

fn register(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("register.json");
    fs::write(&path, REGISTER).unwrap();
    path
}

fn formatter() -> Formatter {
    Formatter::new(OutputFormat::Json, false)
}

#[tokio::test]
async fn test_similar_and_network() {
    let dir = TempDir::new().unwrap();
    let records = register(&dir);
    let analyzer = Analyzer::default_config();

    commands::execute_similar(
        SimilarArgs {
            records: records.clone(),
            title: "ระบบ ERP ล่ม".into(),
            description: String::new(),
        },
        &analyzer,
        &formatter(),
    )
    .await
    .unwrap();

    commands::execute_network(
        NetworkArgs {
            records,
            filter: FilterArg::Correlated,
        },
        &analyzer,
        &formatter(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_cascades_unknown_focal() {
    let dir = TempDir::new().unwrap();
    let records = register(&dir);

    let result = commands::execute_cascades(
        CascadesArgs {
            records,
            id: "missing".into(),
        },
        &Analyzer::default_config(),
        &formatter(),
    )
    .await;
    assert!(matches!(result, Err(CliError::NotFound(_))));
}

#[tokio::test]
async fn test_sentiment_batch() {
    let dir = TempDir::new().unwrap();
    let records = register(&dir);

    commands::execute_sentiment(
        SentimentArgs {
            records: Some(records),
            text: None,
        },
        &Analyzer::default_config(),
        &formatter(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_layout_through_worker() {
    let dir = TempDir::new().unwrap();
    let records = register(&dir);
    let config = LayoutConfig {
        frame_interval_ms: 1,
        ..LayoutConfig::default()
    };

    commands::execute_layout(
        LayoutArgs {
            records,
            frames: 20,
            seed: Some(7),
            instant: false,
        },
        &Analyzer::default_config(),
        &config,
        &formatter(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_interview_from_answer_file() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    fs::write(
        &answers,
        r#"{"client_name": {"type": "text", "value": "Acme"},
            "contract_impact": {"type": "choice", "value": "high"},
            "relationship_status": {"type": "choice", "value": "strained"}}"#,
    )
    .unwrap();

    commands::execute_interview(
        InterviewArgs {
            input: "Client may cancel the contract".into(),
            answers: Some(answers),
            unit: UnitArg::Sales,
            id: Some("draft-1".into()),
        },
        &formatter(),
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_interview_rejects_foreign_question() {
    let dir = TempDir::new().unwrap();
    let answers = dir.path().join("answers.json");
    fs::write(&answers, r#"{"server_type": {"type": "choice", "value": "backup"}}"#).unwrap();

    let result = commands::execute_interview(
        InterviewArgs {
            input: "Client may cancel the contract".into(),
            answers: Some(answers),
            unit: UnitArg::Sales,
            id: None,
        },
        &formatter(),
    )
    .await;
    assert!(matches!(result, Err(CliError::Interview(_))));
}
