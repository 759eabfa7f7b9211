//! Output formatting for the CLI.

use crate::cli::CliFormat;
use crate::error::Result;
use colored::*;
use provenant_domain::TrustLevel;
use provenant_report::{BatchSummary, DimensionBlock, Report};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: CliFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: CliFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format analysis reports.
    ///
    /// JSON and flat output are always arrays, one entry per report.
    pub fn format_reports(&self, reports: &[Report]) -> Result<String> {
        match self.format {
            CliFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
            CliFormat::Flat => {
                let flat = reports
                    .iter()
                    .map(Report::flatten)
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                Ok(serde_json::to_string_pretty(&flat)?)
            }
            CliFormat::Table => Ok(reports
                .iter()
                .map(|r| self.format_report_table(r))
                .collect::<Vec<_>>()
                .join("\n\n")),
        }
    }

    /// Format one report as tables.
    fn format_report_table(&self, report: &Report) -> String {
        let trust = &report.trust;
        let heading = format!(
            "{}: trust {} ({})",
            report.identity.filename,
            trust.overall_score,
            self.colorize_level(trust.trust_level)
        );

        let provenance = &report.provenance;
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        builder.push_record(["Title", or_dash(provenance.title.as_deref()).as_str()]);
        builder.push_record(["Authors", or_dash_list(&provenance.authors).as_str()]);
        builder.push_record(["Institution", or_dash(provenance.institution.as_deref()).as_str()]);
        let published = provenance
            .publication_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        builder.push_record(["Published", published.as_str()]);
        builder.push_record(["Type", provenance.document_type.as_str()]);
        builder.push_record(["Review", provenance.review_status.as_str()]);
        builder.push_record(["Completeness", provenance.completeness.to_string().as_str()]);
        builder.push_record(["License", report.ai_use.license.as_str()]);

        let mut sections = vec![heading, styled(builder)];

        let mut builder = Builder::default();
        builder.push_record(["Dimension", "Weight", "Score", "Explanation"]);
        let dimensions = &trust.dimensions;
        for (name, block) in [
            ("authority", &dimensions.authority),
            ("document_type", &dimensions.document_type),
            ("review", &dimensions.review),
            ("currency", &dimensions.currency),
            ("completeness", &dimensions.completeness),
        ] {
            let weight = trust
                .weights
                .get(name)
                .map(|w| w.to_string())
                .unwrap_or_else(|| "-".to_string());
            let score = block.score.to_string();
            let explanation = explain(block);
            builder.push_record([name, weight.as_str(), score.as_str(), explanation.as_str()]);
        }
        sections.push(styled(builder));

        let permissions = &report.ai_use.permissions;
        let mut builder = Builder::default();
        builder.push_record(["Action", "Allowed"]);
        for (action, allowed) in [
            ("summarize", permissions.summarize),
            ("quote", permissions.quote),
            ("train", permissions.train),
            ("redistribute", permissions.redistribute),
        ] {
            builder.push_record([action, self.mark(allowed).as_str()]);
        }
        sections.push(styled(builder));

        if let Some(attribution) = &report.ai_use.attribution_text {
            sections.push(self.info(&format!("Attribution: {}", attribution)));
        }
        for condition in &report.ai_use.conditions {
            sections.push(self.info(condition));
        }
        for warning in &report.explainability.warnings {
            sections.push(self.warning(warning));
        }

        sections.join("\n")
    }

    /// Format a batch summary line.
    pub fn format_summary(&self, summary: &BatchSummary) -> String {
        if summary.has_failures() {
            self.warning(&summary.summary())
        } else {
            self.success(&summary.summary())
        }
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

    fn mark(&self, allowed: bool) -> String {
        if allowed {
            self.colorize("yes", "green")
        } else {
            self.colorize("no", "red")
        }
    }

    fn colorize_level(&self, level: TrustLevel) -> String {
        let color = match level {
            TrustLevel::High => "green",
            TrustLevel::Medium => "yellow",
            TrustLevel::Low => "red",
        };
        self.colorize(level.as_str(), color)
    }

    /// Apply color to text if colors are enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "red" => text.red().to_string(),
            "yellow" => text.yellow().to_string(),
            "blue" => text.blue().to_string(),
            _ => text.to_string(),
        }
    }
}

fn styled(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn or_dash(value: Option<&str>) -> String {
    value.unwrap_or("-").to_string()
}

fn or_dash_list(values: &[String]) -> String {
    if values.is_empty() {
        "-".to_string()
    } else {
        values.join("; ")
    }
}

fn explain(block: &DimensionBlock) -> String {
    block.explanations.join("; ")
}
