//! Similar command implementation.

use crate::cli::SimilarArgs;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::records::load_records;
use risklens_analysis::Analyzer;

/// Execute the similar command.
pub async fn execute_similar(args: SimilarArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    if args.title.trim().is_empty() {
        return Err(CliError::InvalidInput("Title must not be empty".to_string()));
    }

    let records = load_records(&args.records)?;
    let matches = analyzer.find_similar(&records, &args.title, &args.description);

    println!("{}", formatter.format_similar(&matches)?);
    Ok(())
}
