//! Layout command implementation.

use crate::cli::LayoutArgs;
use crate::error::Result;
use crate::output::Formatter;
use crate::records::load_records;
use risklens_analysis::Analyzer;
use risklens_layout::{LayoutConfig, LayoutWorker, Simulation};

/// Execute the layout command.
pub async fn execute_layout(
    args: LayoutArgs,
    analyzer: &Analyzer,
    config: &LayoutConfig,
    formatter: &Formatter,
) -> Result<()> {
    let simulation = run_layout(&args, analyzer, config).await?;
    println!("{}", formatter.format_layout(simulation.nodes())?);
    Ok(())
}

async fn run_layout(args: &LayoutArgs, analyzer: &Analyzer, config: &LayoutConfig) -> Result<Simulation> {
    config.validate()?;
    let records = load_records(&args.records)?;
    let network = analyzer.build_network(&records);

    let mut simulation = match args.seed {
        Some(seed) => Simulation::seeded(config.clone(), seed),
        None => Simulation::new(config.clone()),
    };
    simulation.sync(network);

    if args.instant {
        simulation.run(args.frames);
        return Ok(simulation);
    }

    let mut worker = LayoutWorker::with_simulation(simulation)?;
    worker.run_frames(args.frames).await;
    Ok(worker.simulation().clone())
}
