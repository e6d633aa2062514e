//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// RiskLens CLI - Similarity, correlation and tone analysis over a risk register.
#[derive(Debug, Parser)]
#[command(name = "risklens")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true, env = "RISKLENS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Threshold preset applied over the configured analysis settings
    #[arg(long, value_enum, global = true)]
    pub preset: Option<PresetArg>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

/// Analysis threshold presets.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum PresetArg {
    /// Built-in defaults
    Default,
    /// Higher bars, fewer hits
    Strict,
    /// Lower bars, more hits
    Lenient,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a draft against the register for near-duplicates
    Similar(SimilarArgs),

    /// Build the correlation network
    Network(NetworkArgs),

    /// Find records a focal record may cascade into
    Cascades(CascadesArgs),

    /// Classify the tone of a text or of every record
    Sentiment(SentimentArgs),

    /// Portfolio counts, heat map and top records
    Summary(SummaryArgs),

    /// Run the force-directed layout and print positions
    Layout(LayoutArgs),

    /// Suggest whether a draft is a risk or an issue
    Classify(ClassifyArgs),

    /// Run the critical-score alert gate over the register
    Alerts(AlertsArgs),

    /// Escalate a record
    Escalate(EscalateArgs),

    /// Turn a concern into a draft record through guided questions
    Interview(InterviewArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the similar command.
#[derive(Debug, Parser)]
pub struct SimilarArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Draft title
    #[arg(short, long)]
    pub title: String,

    /// Draft description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Arguments for the network command.
#[derive(Debug, Parser)]
pub struct NetworkArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Which nodes to keep
    #[arg(long, value_enum, default_value = "all")]
    pub filter: FilterArg,
}

/// Arguments for the cascades command.
#[derive(Debug, Parser)]
pub struct CascadesArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Focal record id
    pub id: String,
}

/// Arguments for the sentiment command.
#[derive(Debug, Parser)]
pub struct SentimentArgs {
    /// Register file; every record is classified and summarised
    #[arg(required_unless_present = "text", conflicts_with = "text")]
    pub records: Option<PathBuf>,

    /// Classify a single text instead
    #[arg(short, long)]
    pub text: Option<String>,
}

/// Arguments for the summary command.
#[derive(Debug, Parser)]
pub struct SummaryArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Number of top records to list
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

/// Arguments for the layout command.
#[derive(Debug, Parser)]
pub struct LayoutArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Frames to simulate
    #[arg(long, default_value = "300")]
    pub frames: usize,

    /// RNG seed for reproducible placement
    #[arg(long)]
    pub seed: Option<u64>,

    /// Skip the frame interval and run frames back to back
    #[arg(long)]
    pub instant: bool,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Draft title
    pub title: String,

    /// Draft description
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Arguments for the alerts command.
#[derive(Debug, Parser)]
pub struct AlertsArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,
}

/// Arguments for the escalate command.
#[derive(Debug, Parser)]
pub struct EscalateArgs {
    /// Register file (JSON, `-` for stdin)
    pub records: PathBuf,

    /// Record id
    pub id: String,

    /// Why the record is escalated
    #[arg(short, long)]
    pub reason: String,

    /// Who is escalating
    #[arg(long, env = "RISKLENS_USER")]
    pub by: Option<String>,
}

/// Arguments for the interview command.
#[derive(Debug, Parser)]
pub struct InterviewArgs {
    /// Opening statement describing the concern
    pub input: String,

    /// JSON file of answers keyed by question id; prompts on stdin when absent
    #[arg(short, long)]
    pub answers: Option<PathBuf>,

    /// Business unit of the drafted record
    #[arg(short, long, value_enum, default_value = "operations")]
    pub unit: UnitArg,

    /// Id for the drafted record; generated when absent
    #[arg(long)]
    pub id: Option<String>,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration file path
    Path,
}

/// Network node filter argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum FilterArg {
    /// Every record
    All,
    /// Records at or above the high-severity score
    HighSeverity,
    /// Records with at least one link
    Correlated,
}

/// Business unit argument.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum UnitArg {
    /// Sales
    Sales,
    /// IT
    It,
    /// Finance
    Finance,
    /// Operations
    Operations,
    /// HR
    Hr,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<PresetArg> for risklens_analysis::AnalysisConfig {
    fn from(preset: PresetArg) -> Self {
        match preset {
            PresetArg::Default => risklens_analysis::AnalysisConfig::default(),
            PresetArg::Strict => risklens_analysis::AnalysisConfig::strict(),
            PresetArg::Lenient => risklens_analysis::AnalysisConfig::lenient(),
        }
    }
}

impl PresetArg {
    /// Overlay the preset's duplicate, network and cascade thresholds.
    ///
    /// Alert, correlation, shingling and corpus settings keep their configured values.
    pub fn apply(self, config: &mut risklens_analysis::AnalysisConfig) {
        let preset: risklens_analysis::AnalysisConfig = self.into();
        config.duplicates = preset.duplicates;
        config.network = preset.network;
        config.cascade = preset.cascade;
    }
}

impl From<FilterArg> for risklens_analysis::NodeFilter {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => risklens_analysis::NodeFilter::All,
            FilterArg::HighSeverity => risklens_analysis::NodeFilter::HighSeverity,
            FilterArg::Correlated => risklens_analysis::NodeFilter::Correlated,
        }
    }
}

impl From<UnitArg> for risklens_domain::BusinessUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Sales => risklens_domain::BusinessUnit::Sales,
            UnitArg::It => risklens_domain::BusinessUnit::It,
            UnitArg::Finance => risklens_domain::BusinessUnit::Finance,
            UnitArg::Operations => risklens_domain::BusinessUnit::Operations,
            UnitArg::Hr => risklens_domain::BusinessUnit::Hr,
        }
    }
}
