//! Cascades command implementation.

use crate::cli::CascadesArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::records::{find_record, load_records};
use risklens_analysis::cascade::cascade_exposure;
use risklens_analysis::Analyzer;

/// Execute the cascades command.
pub async fn execute_cascades(args: CascadesArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    let records = load_records(&args.records)?;
    let focal = find_record(&records, &args.id)?;

    let cascades = analyzer.find_cascades(&records, focal);
    let exposure = cascade_exposure(&cascades);

    println!("{}", formatter.format_cascades(focal, &cascades, exposure)?);
    Ok(())
}
