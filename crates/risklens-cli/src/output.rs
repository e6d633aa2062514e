//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use risklens_analysis::kind_hint::KindHint;
use risklens_analysis::portfolio::{HeatMap, PortfolioStats};
use risklens_analysis::{
    CascadeRisk, CorrelationNetwork, OrganizationSummary, OverallStatus, SentimentResult,
    SimilarRisk,
};
use risklens_domain::traits::Escalation;
use risklens_domain::{Risk, RiskId, RiskLevel};
use risklens_interview::{Question, RiskStatement};
use risklens_layout::SimNode;
use std::collections::BTreeMap;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a list of records.
    pub fn format_records(&self, records: &[&Risk]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
            OutputFormat::Quiet => Ok(join_ids(records.iter().map(|r| r.id()))),
            OutputFormat::Table => {
                if records.is_empty() {
                    return Ok(self.colorize("No records found.", "yellow"));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Type", "Title", "Unit", "L", "I", "Score", "Level"]);
                for risk in records {
                    builder.push_record([
                        risk.id().to_string(),
                        risk.kind().as_str().to_string(),
                        risk.title().to_string(),
                        risk.business_unit().to_string(),
                        risk.severity().likelihood().to_string(),
                        risk.severity().impact().to_string(),
                        risk.score().to_string(),
                        self.level(risk.level()),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format near-duplicate matches.
    pub fn format_similar(&self, matches: &[SimilarRisk<'_>]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json: Vec<serde_json::Value> = matches
                    .iter()
                    .map(|m| {
                        serde_json::json!({
                            "risk": m.risk,
                            "similarity": m.similarity,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(join_ids(matches.iter().map(|m| m.risk.id()))),
            OutputFormat::Table => {
                if matches.is_empty() {
                    return Ok(self.success("No similar records."));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Unit", "Similarity"]);
                for m in matches {
                    builder.push_record([
                        m.risk.id().to_string(),
                        m.risk.title().to_string(),
                        m.risk.business_unit().to_string(),
                        format!("{:.0}%", m.similarity * 100.0),
                    ]);
                }
                Ok(format!(
                    "{}\n{}",
                    self.warning(&format!("{} similar record(s) already in the register", matches.len())),
                    render(builder)
                ))
            }
        }
    }

    /// Format a correlation network.
    pub fn format_network(&self, network: &CorrelationNetwork) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(network)?),
            OutputFormat::Quiet => Ok(network
                .edges
                .iter()
                .map(|e| format!("{} {}", e.source_id, e.target_id))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if network.edges.is_empty() {
                    return Ok(self.info(&format!(
                        "{} record(s), no correlations above the edge threshold",
                        network.nodes.len()
                    )));
                }
                let mut builder = Builder::default();
                builder.push_record(["Source", "Target", "Strength", "Factor"]);
                for edge in &network.edges {
                    builder.push_record([
                        edge.source_id.to_string(),
                        edge.target_id.to_string(),
                        format!("{:.2}", edge.strength),
                        edge.dominant_factor.as_str().to_string(),
                    ]);
                }
                Ok(format!(
                    "{}\n{}",
                    render(builder),
                    self.info(&format!(
                        "{} record(s), {} link(s)",
                        network.nodes.len(),
                        network.edges.len()
                    ))
                ))
            }
        }
    }

    /// Format cascade candidates for a focal record.
    pub fn format_cascades(&self, focal: &Risk, cascades: &[CascadeRisk<'_>], exposure: f64) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "focal": focal.id(),
                    "exposure": exposure,
                    "cascades": cascades
                        .iter()
                        .map(|c| serde_json::json!({ "risk": c.risk, "correlation": c.correlation }))
                        .collect::<Vec<_>>(),
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(join_ids(cascades.iter().map(|c| c.risk.id()))),
            OutputFormat::Table => {
                if cascades.is_empty() {
                    return Ok(self.success(&format!("No cascade risk from '{}'", focal.title())));
                }
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "Score", "Correlation"]);
                for c in cascades {
                    builder.push_record([
                        c.risk.id().to_string(),
                        c.risk.title().to_string(),
                        c.risk.score().to_string(),
                        format!("{:.2}", c.correlation),
                    ]);
                }
                let mut out = format!(
                    "{}\n{}",
                    self.warning(&format!("'{}' may cascade into {} record(s)", focal.title(), cascades.len())),
                    render(builder)
                );
                if exposure > 0.0 {
                    out.push('\n');
                    out.push_str(&self.info(&format!("Combined financial exposure: {:.0}", exposure)));
                }
                Ok(out)
            }
        }
    }

    /// Format a single tone classification.
    pub fn format_sentiment(&self, result: &SentimentResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Quiet => Ok(result.category.as_str().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Category", "Score", "Keywords", "Action"]);
                builder.push_record([
                    result.category.as_str().to_string(),
                    format!("{:.2}", result.score),
                    result.keywords.join(", "),
                    result.recommended_action.clone(),
                ]);
                Ok(format!("{}\n{}", render(builder), self.info(&result.explanation)))
            }
        }
    }

    /// Format a batch of tone classifications with its summary.
    pub fn format_sentiment_batch(
        &self,
        results: &BTreeMap<RiskId, SentimentResult>,
        summary: &OrganizationSummary,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "results": results,
                    "summary": summary,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(summary.overall_status.as_str().to_string()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Category", "Score", "Keywords"]);
                for (id, result) in results {
                    builder.push_record([
                        id.to_string(),
                        result.category.as_str().to_string(),
                        format!("{:.2}", result.score),
                        result.keywords.join(", "),
                    ]);
                }

                let distribution: Vec<String> = summary
                    .distribution
                    .iter()
                    .map(|(category, count)| format!("{} {}", category.as_str(), count))
                    .collect();
                let status = format!(
                    "Overall: {} (average {:.2}; {})",
                    summary.overall_status.as_str(),
                    summary.average_score,
                    distribution.join(", ")
                );
                let status = match summary.overall_status {
                    OverallStatus::Critical => self.error(&status),
                    OverallStatus::Warning => self.warning(&status),
                    OverallStatus::Healthy | OverallStatus::Stable => self.success(&status),
                };
                Ok(format!("{}\n{}", render(builder), status))
            }
        }
    }

    /// Format portfolio statistics, the heat map, and the top records.
    pub fn format_summary(&self, stats: &PortfolioStats, heat_map: &HeatMap, top: &[&Risk]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "stats": stats,
                    "heatMap": heat_map,
                    "top": top,
                });
                Ok(serde_json::to_string_pretty(&json)?)
            }
            OutputFormat::Quiet => Ok(stats.total.to_string()),
            OutputFormat::Table => {
                let mut counts = Builder::default();
                counts.push_record(["Total", "Critical", "High", "Medium", "Low", "Issues", "Avg score", "Exposure"]);
                counts.push_record([
                    stats.total.to_string(),
                    stats.level_count(RiskLevel::Critical).to_string(),
                    stats.level_count(RiskLevel::High).to_string(),
                    stats.level_count(RiskLevel::Medium).to_string(),
                    stats.level_count(RiskLevel::Low).to_string(),
                    stats.issues.to_string(),
                    format!("{:.1}", stats.average_score),
                    format!("{:.0}", stats.financial_exposure),
                ]);

                let mut grid = Builder::default();
                grid.push_record(["L \\ I", "1", "2", "3", "4", "5"]);
                for (likelihood, row) in heat_map.rows() {
                    let mut record = vec![likelihood.to_string()];
                    record.extend(row.iter().map(|n| if *n == 0 { "·".to_string() } else { n.to_string() }));
                    grid.push_record(record);
                }

                Ok(format!(
                    "{}\n{}\n{}",
                    render(counts),
                    render(grid),
                    self.format_records(top)?
                ))
            }
        }
    }

    /// Format settled layout positions.
    pub fn format_layout(&self, nodes: &[SimNode]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(nodes)?),
            OutputFormat::Quiet => Ok(nodes
                .iter()
                .map(|n| format!("{} {:.1} {:.1}", n.id(), n.x, n.y))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["ID", "Title", "X", "Y"]);
                for node in nodes {
                    builder.push_record([
                        node.id().to_string(),
                        node.node.title.clone(),
                        format!("{:.1}", node.x),
                        format!("{:.1}", node.y),
                    ]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a risk/issue suggestion.
    pub fn format_kind_hint(&self, hint: &KindHint) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(hint)?),
            OutputFormat::Quiet => Ok(hint.kind.as_str().to_string()),
            OutputFormat::Table => Ok(self.info(&format!(
                "Looks like a {} ({:.0}% confident; {} issue and {} risk keyword(s))",
                hint.kind.as_str(),
                hint.confidence * 100.0,
                hint.issue_hits,
                hint.risk_hits
            ))),
        }
    }

    /// Format the statement an interview produced.
    pub fn format_statement(&self, statement: &RiskStatement) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(statement)?),
            OutputFormat::Quiet => Ok(statement.title.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Title", "Type", "L", "I", "Score"]);
                builder.push_record([
                    statement.title.clone(),
                    statement.kind.as_str().to_string(),
                    statement.severity.likelihood().to_string(),
                    statement.severity.impact().to_string(),
                    statement.severity.score().to_string(),
                ]);
                Ok(format!(
                    "{}\n{}\n{}",
                    render(builder),
                    statement.description,
                    self.info(&statement.reasoning)
                ))
            }
        }
    }

    /// Format an escalation hand-off.
    pub fn escalation(&self, escalation: &Escalation) -> String {
        self.warning(&format!(
            "Escalated '{}' (score {}) by {}: {}",
            escalation.title, escalation.score, escalation.escalated_by, escalation.reason
        ))
    }

    /// Format an interview question as a prompt.
    pub fn question(&self, question: &Question) -> String {
        let mut out = self.colorize(question.prompt, "cyan");
        if let Some(context) = question.context {
            out.push_str(&format!("\n  ({})", context));
        }
        for (i, option) in question.options.iter().enumerate() {
            out.push_str(&format!("\n  {}. {} [{}]", i + 1, option.label, option.value));
        }
        if question.is_optional() {
            out.push_str("\n  (press Enter to skip)");
        }
        out
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn level(&self, level: RiskLevel) -> String {
        let color = match level {
            RiskLevel::Critical => "red",
            RiskLevel::High => "magenta",
            RiskLevel::Medium => "yellow",
            RiskLevel::Low => "green",
        };
        self.colorize(level.as_str(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids<'a>(ids: impl Iterator<Item = &'a RiskId>) -> String {
    ids.map(|id| id.to_string()).collect::<Vec<_>>().join("\n")
}
