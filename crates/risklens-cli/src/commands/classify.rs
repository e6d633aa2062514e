//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::error::Result;
use crate::output::Formatter;
use risklens_analysis::Analyzer;

/// Execute the classify command.
pub async fn execute_classify(args: ClassifyArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    let hint = analyzer.suggest_kind(&args.title, &args.description);
    println!("{}", formatter.format_kind_hint(&hint)?);
    Ok(())
}
