//! Summary command implementation.

use crate::cli::SummaryArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::records::load_records;
use risklens_analysis::portfolio::{portfolio_stats, top_risks, HeatMap};

/// Execute the summary command.
pub async fn execute_summary(args: SummaryArgs, default_top: usize, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.records)?;

    let stats = portfolio_stats(&records);
    let heat_map = HeatMap::from_records(&records);
    let top = top_risks(&records, args.top.unwrap_or(default_top));

    println!("{}", formatter.format_summary(&stats, &heat_map, &top)?);
    Ok(())
}
