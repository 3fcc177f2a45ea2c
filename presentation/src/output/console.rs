//! Console output formatter for prediction results

use colored::Colorize;
use serde_json::Value;
use wml_application::{Extraction, RunPredictionError, RunPredictionOutput};
use wml_domain::{
    ConfigIssue, OutputFormat, PredictionRequest, PredictionResponse, PredictionTable,
};

/// Widest bar drawn by [`ConsoleFormatter::format_chart`]
const CHART_WIDTH: usize = 40;

/// Formats prediction results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Apply `[output].color`.
    ///
    /// `false` turns styling off; `true` leaves terminal and `NO_COLOR`
    /// detection to `colored`.
    pub fn set_color(enabled: bool) {
        if let Some(forced) = Self::color_override(enabled) {
            colored::control::set_override(forced);
        }
    }

    fn color_override(enabled: bool) -> Option<bool> {
        (!enabled).then_some(false)
    }

    /// Format a completed invocation in the requested format
    pub fn format(output: &RunPredictionOutput, format: OutputFormat, chart: bool) -> String {
        match format {
            OutputFormat::Json => Self::format_json(&output.response),
            OutputFormat::Raw => output.response.raw().to_string(),
            OutputFormat::Table => Self::format_report(output, chart),
        }
    }

    /// Table, chart and (when the shape was unexpected) warning plus raw JSON
    pub fn format_report(output: &RunPredictionOutput, chart: bool) -> String {
        let mut out = String::new();

        out.push_str(&Self::header("Prediction Results"));
        out.push('\n');

        match &output.extraction {
            Extraction::Table(table) => {
                out.push_str(&Self::section_header("Prediction Table"));
                out.push_str(&Self::format_table(table));

                if chart {
                    if let Some(rendered) = Self::format_chart(table) {
                        out.push_str(&Self::section_header("Prediction Chart"));
                        out.push_str(&rendered);
                    }
                }
            }
            Extraction::Unexpected { .. } => {
                if let Some(warning) = output.extraction.warning() {
                    out.push_str(&format!("\n{} {}\n", "warning:".yellow().bold(), warning));
                }
                out.push_str(&Self::section_header("Prediction Response (Raw JSON)"));
                out.push_str(&Self::format_json(&output.response));
                out.push('\n');
            }
        }

        out.push_str(&Self::footer());
        out
    }

    /// Pretty-print the decoded response
    pub fn format_json(response: &PredictionResponse) -> String {
        serde_json::to_string_pretty(response.body())
            .unwrap_or_else(|_| response.raw().to_string())
    }

    /// Pretty-print the request body that would be sent
    pub fn format_payload(request: &PredictionRequest) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&request.to_payload())
    }

    /// Render the table with a leading row index column
    pub fn format_table(table: &PredictionTable) -> String {
        let cells: Vec<Vec<String>> = table
            .rows
            .iter()
            .map(|row| row.iter().map(Self::cell).collect())
            .collect();

        let index_width = table.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = table
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                cells
                    .iter()
                    .filter_map(|row| row.get(i).map(String::len))
                    .chain(std::iter::once(name.len()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let mut out = String::new();
        let header: Vec<String> = table
            .columns
            .iter()
            .zip(&widths)
            .map(|(name, w)| format!("{:<w$}", name, w = *w))
            .collect();
        out.push_str(&format!(
            "{:>iw$}  {}\n",
            "",
            header.join("  ").bold(),
            iw = index_width
        ));

        for (i, row) in cells.iter().enumerate() {
            let line: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, w)| format!("{:<w$}", cell, w = *w))
                .collect();
            out.push_str(&format!(
                "{:>iw$}  {}\n",
                i.to_string().dimmed(),
                line.join("  "),
                iw = index_width
            ));
        }
        out
    }

    /// Horizontal bar chart of the first column, one bar per row.
    ///
    /// Returns None when the column is not numeric or the table is empty.
    pub fn format_chart(table: &PredictionTable) -> Option<String> {
        let series = table.primary_series()?;
        if series.is_empty() {
            return None;
        }

        let max = series.iter().cloned().fold(f64::MIN, f64::max);
        let min = series.iter().cloned().fold(f64::MAX, f64::min).min(0.0);
        let span = if max - min > 0.0 { max - min } else { 1.0 };
        let index_width = (series.len() - 1).to_string().len();

        let mut out = String::new();
        for (i, value) in series.iter().enumerate() {
            let len = (((value - min) / span) * CHART_WIDTH as f64).round() as usize;
            out.push_str(&format!(
                "{:>iw$} {} {}\n",
                i,
                "#".repeat(len).green(),
                value,
                iw = index_width
            ));
        }
        Some(out)
    }

    /// Format a halting error, including any response text received
    pub fn format_error(error: &RunPredictionError) -> String {
        let mut out = format!("{} {}\n", "error:".red().bold(), error);
        if let Some(raw) = error.raw_body() {
            out.push_str(&format!("\n{}\n{}\n", "Response body:".dimmed(), raw));
        }
        out
    }

    /// One configuration issue, prefixed by its severity
    pub fn format_issue(issue: &ConfigIssue) -> String {
        if issue.is_error() {
            format!("{} {}", "error:".red().bold(), issue.message)
        } else {
            format!("{} {}", "warning:".yellow().bold(), issue.message)
        }
    }

    fn cell(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
