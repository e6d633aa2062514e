//! Network command implementation.

use crate::cli::NetworkArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::records::load_records;
use risklens_analysis::Analyzer;

/// Execute the network command.
pub async fn execute_network(args: NetworkArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.records)?;
    let network = analyzer.build_filtered_network(&records, args.filter.into());

    println!("{}", formatter.format_network(&network)?);
    Ok(())
}
