//! Sentiment command implementation.

use crate::cli::SentimentArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::records::load_records;
use risklens_analysis::{sentiment, Analyzer, OrganizationSummary, SentimentResult};
use risklens_domain::{Risk, RiskId};
use std::collections::BTreeMap;

/// Execute the sentiment command.
pub async fn execute_sentiment(args: SentimentArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    match (args.text, args.records) {
        (Some(text), _) => {
            let result = analyzer.classify(&text);
            println!("{}", formatter.format_sentiment(&result)?);
        }
        (None, Some(path)) => {
            let records = load_records(&path)?;
            let (results, summary) = classify_register(analyzer, &records);
            println!("{}", formatter.format_sentiment_batch(&results, &summary)?);
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "Must specify either a register file or --text".to_string(),
            ));
        }
    }
    Ok(())
}

/// Classify every record once and summarise those same results.
pub fn classify_register(
    analyzer: &Analyzer,
    records: &[Risk],
) -> (BTreeMap<RiskId, SentimentResult>, OrganizationSummary) {
    let results = analyzer.classify_batch(records);
    let summary = sentiment::organization_summary(results.values());
    (results, summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use risklens_analysis::SentimentCategory;
    use risklens_domain::{BusinessUnit, RiskKind, Severity};

    #[test]
    fn test_summary_matches_batch() {
        let records = vec![
            Risk::new("a", RiskKind::Risk, "Plant flood", "crisis!!!", BusinessUnit::Operations, Severity::new(5, 5).unwrap()),
            Risk::new("b", RiskKind::Risk, "Audit", "under control", BusinessUnit::Finance, Severity::new(1, 2).unwrap()),
            Risk::new("c", RiskKind::Issue, "Payroll", "quarterly review", BusinessUnit::Hr, Severity::new(2, 2).unwrap()),
        ];

        let (results, summary) = classify_register(&Analyzer::default_config(), &records);

        assert_eq!(results.len(), 3);
        assert_eq!(summary.total, 3);
        for category in SentimentCategory::ALL {
            let in_batch = results.values().filter(|r| r.category == category).count();
            assert_eq!(summary.count(category), in_batch);
        }
        let mean = results.values().map(|r| r.score).sum::<f64>() / 3.0;
        assert!((summary.average_score - mean).abs() < 1e-9);
    }
}
