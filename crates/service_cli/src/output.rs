//! Result rendering as JSON or a two-column table

use serde::Serialize;

use crate::config::OutputFormat;
use crate::Result;

/// A report that can be laid out as label/value rows
pub trait Tabular {
    /// Table heading
    fn title(&self) -> String;

    /// Rows in display order
    fn rows(&self) -> Vec<(String, String)>;
}

/// Renders `report` in the requested format
pub fn render<T: Serialize + Tabular>(report: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Table => Ok(table(&report.title(), &report.rows())),
    }
}

/// Formats a number with `decimals` places
pub fn num(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, value)
}

/// Formats a fraction as a percentage
pub fn pct(value: f64) -> String {
    format!("{:.4}%", value * 100.0)
}

/// Formats an optional number, `-` when absent
pub fn opt(value: Option<f64>, decimals: usize) -> String {
    value.map_or_else(|| "-".to_string(), |v| num(v, decimals))
}

fn table(title: &str, rows: &[(String, String)]) -> String {
    let key_width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0).max(title.chars().count());
    let value_width = rows.iter().map(|(_, v)| v.chars().count()).max().unwrap_or(0);
    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}",
            left,
            "─".repeat(key_width + 2),
            mid,
            "─".repeat(value_width + 2),
            right
        )
    };

    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(rule("┌", "┬", "┐"));
    lines.push(format!("│ {:<kw$} │ {:<vw$} │", title, "", kw = key_width, vw = value_width));
    lines.push(rule("├", "┼", "┤"));
    for (key, value) in rows {
        lines.push(format!("│ {:<kw$} │ {:>vw$} │", key, value, kw = key_width, vw = value_width));
    }
    lines.push(rule("└", "┴", "┘"));
    lines.join("\n")
}
